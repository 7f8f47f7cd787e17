use log::trace;

use crate::error::SyncError;
use super::model::DocumentModel;

/// What a synchronization pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub rows_wrapped: usize,
    pub cells_added: usize,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.rows_wrapped == 0 && self.cells_added == 0
    }

    pub(crate) fn absorb(&mut self, other: SyncReport) {
        self.rows_wrapped += other.rows_wrapped;
        self.cells_added += other.cells_added;
    }
}

/// Bring every other row's cell count up to the trigger row's.
///
/// The trigger row's own count after the edit is the target; rows already
/// at or above it are left alone, rows below it get a cell list wrapped
/// in when absent and empty cells appended until they reach the target.
/// Nothing ever shrinks and row order never changes, which also makes the
/// pass idempotent. The trigger row is validated before the first
/// mutation, so an unresolvable trigger aborts with the document intact.
pub fn synchronize(
    model: &mut impl DocumentModel,
    trigger_row: usize,
) -> Result<SyncReport, SyncError> {
    let rows = model.row_count();
    if trigger_row >= rows {
        return Err(SyncError::UnresolvedRow { row: trigger_row });
    }
    let target = model.cell_count(trigger_row)?.unwrap_or(0);
    let mut report = SyncReport::default();
    for row in 0..rows {
        if row == trigger_row {
            continue;
        }
        let cells = model.cell_count(row)?;
        if cells.unwrap_or(0) >= target {
            continue;
        }
        if cells.is_none() {
            model.wrap_in_cell_list(row)?;
            report.rows_wrapped += 1;
        }
        let mut have = model.cell_count(row)?.unwrap_or(0);
        while have < target {
            model.append_empty_cell(row)?;
            have += 1;
            report.cells_added += 1;
        }
        trace!("row {} grown to {} cells", row, target);
    }
    Ok(report)
}

#[cfg(test)]
#[path = "sync_props.rs"]
mod sync_props;
