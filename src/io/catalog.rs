//! Load an alternative item catalog from JSON.
//!
//! The file is a JSON array of item records in the same shape `ItemMeta`
//! serializes to; `im catalog --dump` writes the compiled-in one.

use std::fs::File;
use std::path::Path;

use crate::catalog::ItemCatalog;
use crate::domain::ItemMeta;
use crate::error::AppError;

pub fn read_catalog_json(path: &Path) -> Result<ItemCatalog, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open catalog JSON '{}': {e}", path.display())))?;
    let items: Vec<ItemMeta> =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid catalog JSON: {e}")))?;
    Ok(ItemCatalog::new(items)?)
}

pub fn write_catalog_json(path: &Path, catalog: &ItemCatalog) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create catalog JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, catalog.items())
        .map_err(|e| AppError::new(2, format!("Failed to write catalog JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        write_catalog_json(&path, ItemCatalog::default_catalog()).unwrap();
        let loaded = read_catalog_json(&path).unwrap();
        assert_eq!(loaded.items(), ItemCatalog::default_catalog().items());
    }

    #[test]
    fn duplicate_ids_are_rejected_with_input_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dup.json");
        std::fs::write(&path, r#"[{"id": 1}, {"id": 1}]"#).unwrap();
        let err = read_catalog_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("more than once"));
    }
}
