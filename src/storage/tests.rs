//! Storage Module Tests
//!
//! ## Test Scopes
//! - **ChunkStore**: Store/fetch round-trips, overwrites and misses.
//! - **Concurrency**: Parallel writers and readers on one store.
//!
//! *Note: The HTTP surface is exercised in the network integration tests.*

#[cfg(test)]
mod tests {
    use crate::chunk::types::ChunkId;
    use crate::storage::memory::ChunkStore;
    use crate::storage::protocol::ChunkResponse;

    // ============================================================
    // CHUNK STORE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_store_then_fetch_roundtrip() {
        let store = ChunkStore::new();
        let id = ChunkId::from("song.mp3-1");
        let data = vec![0u8, 1, 2, 255, 128];

        store.store(id.clone(), data.clone()).await;

        assert_eq!(store.fetch(&id).await, Some(data));
    }

    #[tokio::test]
    async fn test_fetch_missing_chunk_is_none() {
        let store = ChunkStore::new();
        store.store(ChunkId::from("a-1"), b"x".to_vec()).await;

        assert_eq!(store.fetch(&ChunkId::from("a-2")).await, None);
        assert!(!store.contains(&ChunkId::from("a-2")).await);
    }

    #[tokio::test]
    async fn test_store_overwrites() {
        let store = ChunkStore::new();
        let id = ChunkId::from("a-1");

        assert_eq!(store.store(id.clone(), b"old".to_vec()).await, None);
        let previous = store.store(id.clone(), b"new".to_vec()).await;

        assert_eq!(previous, Some(b"old".to_vec()));
        assert_eq!(store.fetch(&id).await, Some(b"new".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_empty_chunk_is_stored() {
        let store = ChunkStore::new();
        let id = ChunkId::from("empty-1");

        store.store(id.clone(), Vec::new()).await;

        assert_eq!(store.fetch(&id).await, Some(Vec::new()));
        assert!(!store.is_empty().await);
    }

    #[tokio::test]
    async fn test_chunk_ids_are_sorted() {
        let store = ChunkStore::new();
        store.store(ChunkId::from("b-1"), vec![]).await;
        store.store(ChunkId::from("a-2"), vec![]).await;
        store.store(ChunkId::from("a-1"), vec![]).await;

        let ids = store.chunk_ids().await;

        assert_eq!(
            ids,
            vec![ChunkId::from("a-1"), ChunkId::from("a-2"), ChunkId::from("b-1")]
        );
    }

    // ============================================================
    // CONCURRENCY TESTS
    // ============================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_stores_and_fetches() {
        let store = ChunkStore::new();

        let mut handles = Vec::new();
        for i in 1..=50u64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let id = ChunkId::new("file", i);
                let data = format!("payload {}", i).into_bytes();
                store.store(id.clone(), data.clone()).await;
                assert_eq!(store.fetch(&id).await, Some(data));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.len().await, 50);
    }

    // ============================================================
    // PROTOCOL TESTS
    // ============================================================

    #[test]
    fn test_chunk_response_without_data() {
        let json = r#"{"chunk_data":null,"message":"Chunk a-1 is not available"}"#;

        let response: ChunkResponse = serde_json::from_str(json).unwrap();

        assert!(response.chunk_data.is_none());
    }
}
