//! Filesystem infrastructure — implements `InventoryWriter`.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::application::ports::InventoryWriter;

/// File name of the generated inventory inside the inventory directory.
pub const INVENTORY_FILE_NAME: &str = "generated_inventory";

/// Writes the generated inventory to `<dir>/generated_inventory`.
///
/// The file is left untouched when its content already matches, so the
/// modification time only moves when the inventory changes.
pub struct FsInventoryWriter {
    dir: PathBuf,
}

impl FsInventoryWriter {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl InventoryWriter for FsInventoryWriter {
    fn write_inventory(&self, content: &str) -> Result<PathBuf> {
        let path = self.dir.join(INVENTORY_FILE_NAME);
        if std::fs::read_to_string(&path).is_ok_and(|existing| existing == content) {
            tracing::debug!(path = %path.display(), "inventory unchanged");
            return Ok(path);
        }
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating inventory dir {}", self.dir.display()))?;
        std::fs::write(&path, content)
            .with_context(|| format!("writing inventory {}", path.display()))?;
        Ok(path)
    }
}
