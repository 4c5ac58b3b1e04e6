//! `diff-last`: compare piped items with the last stored snapshot.

use super::print_json;
use anyhow::{bail, Context};
use lobster_state::SnapshotStore;
use serde_json::Value;
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

/// Parse a stream of whitespace-separated JSON values (NDJSON or
/// concatenated documents). Each value is one item.
pub fn parse_items(text: &str) -> anyhow::Result<Vec<Value>> {
    serde_json::Deserializer::from_str(text)
        .into_iter::<Value>()
        .enumerate()
        .map(|(i, item)| item.with_context(|| format!("Invalid JSON in input item {}", i + 1)))
        .collect()
}

async fn read_input(input: Option<PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Handle `lobster diff-last`.
pub async fn handle_diff_last(
    store: &SnapshotStore,
    key: Option<String>,
    input: Option<PathBuf>,
) -> anyhow::Result<()> {
    let Some(key) = key else {
        bail!("diff-last requires --key");
    };

    let items = parse_items(&read_input(input).await?)?;
    let result = store.compare_items(&key, items).await?;
    print_json(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_items_ndjson() {
        let items = parse_items("{\"a\":1}\n{\"b\":2}\n").unwrap();
        assert_eq!(items, vec![json!({"a": 1}), json!({"b": 2})]);
    }

    #[test]
    fn test_parse_items_array_is_one_item() {
        let items = parse_items("[1, 2, 3]").unwrap();
        assert_eq!(items, vec![json!([1, 2, 3])]);
    }

    #[test]
    fn test_parse_items_empty() {
        assert!(parse_items("").unwrap().is_empty());
        assert!(parse_items("  \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_parse_items_reports_position() {
        let err = parse_items("1 2 {oops").unwrap_err();
        assert!(err.to_string().contains("item 3"));
    }
}
