//! Chunk Module Tests
//!
//! ## Test Scopes
//! - **Partitioner**: Chunk counts, naming and ordering for various sizes.
//! - **ChunkId**: Parsing and exact file-name matching.
//! - **Placeholder data**: Fabricated bytes line up with the partition.

#[cfg(test)]
mod tests {
    use crate::chunk::partitioner::{partition, placeholder_chunks};
    use crate::chunk::types::ChunkId;
    use std::num::NonZeroU64;

    fn mb(value: u64) -> NonZeroU64 {
        NonZeroU64::new(value).unwrap()
    }

    fn ids(names: &[&str]) -> Vec<ChunkId> {
        names.iter().map(|name| ChunkId::from(*name)).collect()
    }

    // ============================================================
    // PARTITIONER TESTS
    // ============================================================

    #[test]
    fn test_partition_one_chunk_per_mb() {
        let chunks = partition("f", 10, mb(1));

        let expected: Vec<ChunkId> = (1..=10).map(|i| ChunkId(format!("f-{}", i))).collect();
        assert_eq!(chunks, expected);
    }

    #[test]
    fn test_partition_discards_remainder() {
        assert_eq!(partition("f", 5, mb(2)), ids(&["f-1", "f-2"]));
    }

    #[test]
    fn test_partition_empty_file() {
        assert!(partition("f", 0, mb(1)).is_empty());
    }

    #[test]
    fn test_partition_smaller_than_one_chunk() {
        assert!(partition("f", 3, mb(4)).is_empty());
    }

    #[test]
    fn test_partition_is_deterministic() {
        let first = partition("movie.mkv", 7, mb(3));
        let second = partition("movie.mkv", 7, mb(3));

        assert_eq!(first, second);
        assert_eq!(first, ids(&["movie.mkv-1", "movie.mkv-2"]));
    }

    // ============================================================
    // CHUNK ID TESTS
    // ============================================================

    #[test]
    fn test_chunk_id_parse() {
        let id = ChunkId::new("song.mp3", 12);

        assert_eq!(id.as_str(), "song.mp3-12");
        assert_eq!(id.parse(), Some(("song.mp3", 12)));
        assert_eq!(id.sequence(), Some(12));
    }

    #[test]
    fn test_chunk_id_with_dashes_in_file_name() {
        let id = ChunkId::from("my-file-name-3");

        assert_eq!(id.parse(), Some(("my-file-name", 3)));
        assert!(id.belongs_to("my-file-name"));
        assert!(!id.belongs_to("my-file"));
        assert!(!id.belongs_to("my"));
    }

    #[test]
    fn test_chunk_id_rejects_malformed_suffix() {
        assert_eq!(ChunkId::from("video").parse(), None);
        assert_eq!(ChunkId::from("video-").parse(), None);
        assert_eq!(ChunkId::from("video-1a").parse(), None);
        assert_eq!(ChunkId::from("video-+1").parse(), None);
        assert_eq!(ChunkId::from("video-0").parse(), None);
    }

    #[test]
    fn test_belongs_to_is_exact() {
        let video = ChunkId::from("video-1");
        let video2 = ChunkId::from("video2-1");

        assert!(video.belongs_to("video"));
        assert!(!video.belongs_to("vid"));
        assert!(!video.belongs_to("video-1"));
        assert!(!video2.belongs_to("video"));
    }

    #[test]
    fn test_chunk_id_serializes_as_plain_string() {
        let id = ChunkId::new("a", 1);
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"a-1\"");
    }

    // ============================================================
    // PLACEHOLDER DATA TESTS
    // ============================================================

    #[test]
    fn test_placeholder_chunks_follow_partition() {
        let chunks = placeholder_chunks("doc.txt", 3, mb(1));

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].id, ChunkId::from("doc.txt-1"));
        assert_eq!(chunks[2].data, b"data of chunk doc.txt-3".to_vec());
    }
}
