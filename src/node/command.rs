use thiserror::Error;

/// One line of the interactive node session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Put { file_name: String, size_mb: u64 },
    Get { file_name: String },
    Leave,
}

/// Input rejected before anything is sent to the network.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("wrong usage. Example: put example.txt 10")]
    PutUsage,
    #[error("wrong usage. Example: get example.txt")]
    GetUsage,
    #[error("invalid file size '{0}': expected a whole number of MB")]
    InvalidSize(String),
    #[error("unrecognized command '{0}'. Try put, get or leave")]
    Unknown(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Ok(None);
    };

    let command = match verb {
        "put" => match args {
            [file_name, size] => Command::Put {
                file_name: file_name.to_string(),
                size_mb: size
                    .parse()
                    .map_err(|_| CommandError::InvalidSize(size.to_string()))?,
            },
            _ => return Err(CommandError::PutUsage),
        },
        "get" => match args {
            [file_name] => Command::Get {
                file_name: file_name.to_string(),
            },
            _ => return Err(CommandError::GetUsage),
        },
        "leave" => Command::Leave,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}
