use thiserror::Error;

/// Reasons a tracker request is rejected before any state is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("node id must not be empty")]
    MissingNodeId,
    #[error("file name must not be empty for action '{0}'")]
    MissingFileName(String),
}
