//! Dataset ingestion: local JSON file or HTTP endpoint.
//!
//! Both entry points parse either accepted wire shape (rich object or flat
//! FAQ list) and hand the result to `DatasetStore::replace`.

use std::path::Path;

use askdesk_core::error::{AskDeskError, Result};
use askdesk_core::types::Dataset;

/// Load a dataset from a JSON file.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| AskDeskError::Dataset(format!("Failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| AskDeskError::Dataset(format!("Failed to parse {}: {e}", path.display())))
}

/// Fetch a dataset from an HTTP endpoint.
pub async fn fetch_url(url: &str) -> Result<Dataset> {
    let resp = reqwest::get(url)
        .await
        .map_err(|e| AskDeskError::Http(format!("Dataset fetch failed ({url}): {e}")))?;

    if !resp.status().is_success() {
        return Err(AskDeskError::Http(format!(
            "Dataset fetch failed ({url}): status {}",
            resp.status()
        )));
    }

    resp.json::<Dataset>()
        .await
        .map_err(|e| AskDeskError::Dataset(format!("Malformed dataset from {url}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_file_flat_shape() {
        let dir = std::env::temp_dir();
        let path = dir.join("askdesk_test_flat_dataset.json");
        std::fs::write(
            &path,
            r#"[{"question": "Where are you?", "answer": "Gadhinglaj."}]"#,
        )
        .unwrap();

        let ds = load_file(&path).unwrap();
        assert_eq!(ds.faqs.len(), 1);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_file_missing_is_dataset_error() {
        let err = load_file(Path::new("/nonexistent/askdesk.json")).unwrap_err();
        assert!(matches!(err, AskDeskError::Dataset(_)));
    }
}
