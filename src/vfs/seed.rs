use std::path::Path;

use log::info;

use super::{put_json, KvError, KvStore};
use crate::models::SeedData;

/// Parses seed data from JSON content.
pub fn parse_seed(content: &str) -> Result<SeedData, KvError> {
    serde_json::from_str(content).map_err(|e| KvError::Serialization {
        key: "seed".to_string(),
        reason: e.to_string(),
    })
}

/// Writes the node and profile collections of `seed` under their keys,
/// replacing whatever was stored there.
pub async fn import_seed<K: KvStore>(
    store: &K,
    seed: &SeedData,
    nodes_key: &str,
    profiles_key: &str,
) -> Result<(), KvError> {
    put_json(store, nodes_key, &seed.nodes).await?;
    put_json(store, profiles_key, &seed.profiles).await?;
    Ok(())
}

/// Loads a JSON seed file (`{"nodes": [...], "profiles": [...]}`) into the store.
pub async fn import_data_file<K: KvStore>(
    store: &K,
    path: &Path,
    nodes_key: &str,
    profiles_key: &str,
) -> Result<SeedData, KvError> {
    let content = tokio::fs::read_to_string(path).await?;
    let seed = parse_seed(&content)?;
    import_seed(store, &seed, nodes_key, profiles_key).await?;
    info!(
        "Imported {} nodes and {} profiles from {}",
        seed.nodes.len(),
        seed.profiles.len(),
        path.display()
    );
    Ok(seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NodeRecord, ProfileRecord};
    use crate::vfs::{get_json, MemoryKvStore};

    #[tokio::test]
    async fn test_import_seed_writes_both_collections() {
        let seed = parse_seed(
            r#"{
                "nodes": [{"id": "n1", "name": "A", "url": "trojan://pw@a.com:443"}],
                "profiles": [{"id": "p1", "name": "P", "nodeIds": ["n1"], "outputFormat": "clash"}]
            }"#,
        )
        .unwrap();

        let store = MemoryKvStore::new();
        import_seed(&store, &seed, "nodes", "profiles").await.unwrap();

        let nodes: Vec<NodeRecord> = get_json(&store, "nodes").await.unwrap().unwrap();
        let profiles: Vec<ProfileRecord> = get_json(&store, "profiles").await.unwrap().unwrap();
        assert_eq!(nodes[0].id, "n1");
        assert_eq!(profiles[0].node_ids, vec!["n1"]);
    }

    #[tokio::test]
    async fn test_import_missing_file_is_io_error() {
        let store = MemoryKvStore::new();
        let err = import_data_file(&store, Path::new("/nonexistent/seed.json"), "n", "p")
            .await
            .unwrap_err();
        assert!(matches!(err, KvError::IoError(_)));
    }

    #[test]
    fn test_parse_seed_rejects_garbage() {
        assert!(matches!(
            parse_seed("not json"),
            Err(KvError::Serialization { .. })
        ));
    }
}
