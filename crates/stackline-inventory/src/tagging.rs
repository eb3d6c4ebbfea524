//! Record tagging.
//!
//! Stamps every record of a run with the run's bucket label. A label is
//! written once: re-tagging with the same label changes nothing, and a batch
//! containing a record that already carries another label is refused whole.

use stackline_core::Label;

use crate::error::{InventoryError, InventoryResult};
use crate::types::Record;

/// Tags records in place.
///
/// # Errors
///
/// Returns `InventoryError::LabelConflict` if any record already carries a
/// different label. No record is modified in that case.
pub fn tag(records: &mut [Record], label: &Label) -> InventoryResult<()> {
    if let Some((index, existing)) = records
        .iter()
        .enumerate()
        .find_map(|(i, r)| r.label().filter(|l| *l != label).map(|l| (i, l)))
    {
        return Err(InventoryError::label_conflict(
            index,
            existing.as_str(),
            label.as_str(),
        ));
    }

    for record in records.iter_mut() {
        record.assign_label(label);
    }
    tracing::debug!(count = records.len(), label = %label, "tagged records");
    Ok(())
}

/// Tags an owned batch and returns it.
///
/// # Errors
///
/// See [`tag`].
pub fn tagged(mut records: Vec<Record>, label: &Label) -> InventoryResult<Vec<Record>> {
    tag(&mut records, label)?;
    Ok(records)
}
