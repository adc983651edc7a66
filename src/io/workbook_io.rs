use tracing::debug;

use crate::io::storage::{StorageBackend, StorageError};
use crate::state::workbook::Workbook;

/// The single keyed entry holding the whole workbook collection.
pub const STORAGE_KEY: &str = "coal_metrics_workbooks_v2";

/// Serializes the entire collection into the backing store. Nothing is
/// written when serialization or the store itself fails, so the previously
/// persisted state stays intact.
pub fn persist<S: StorageBackend>(
    backend: &mut S,
    workbooks: &[Workbook],
) -> Result<(), StorageError> {
    let payload = serde_json::to_string(workbooks)?;
    backend.write(STORAGE_KEY, &payload)?;
    debug!(count = workbooks.len(), "persisted workbook collection");
    Ok(())
}

/// Loads the persisted collection; a missing entry is an empty collection,
/// not an error.
pub fn restore<S: StorageBackend>(backend: &S) -> Result<Vec<Workbook>, StorageError> {
    let Some(payload) = backend.read(STORAGE_KEY)? else {
        debug!("no persisted workbook collection found");
        return Ok(Vec::new());
    };
    let workbooks: Vec<Workbook> = serde_json::from_str(&payload)?;
    debug!(count = workbooks.len(), "restored workbook collection");
    Ok(workbooks)
}
