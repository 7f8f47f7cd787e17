use tdoc::Document;

use crate::error::SyncError;
use super::inspect::outline_entries;
use super::{NodePath, PathStep};

/// Kind of structural edit a host reports. Only used for bookkeeping;
/// the locator treats every kind the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditKind {
    SplitItem,
    Indent,
    Outdent,
    RemoveRow,
    Other,
}

/// Who produced an edit. Edits the synchronizer made itself are tagged so
/// they never start another pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditOrigin {
    User,
    Synchronizer,
}

/// One structural edit as reported by the host's edit stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditRecord {
    pub kind: EditKind,
    pub path: NodePath,
    pub origin: EditOrigin,
}

impl EditRecord {
    pub fn user(kind: EditKind, path: NodePath) -> Self {
        Self {
            kind,
            path,
            origin: EditOrigin::User,
        }
    }
}

/// Row and, when the edit sat inside a row's nested list, the column it
/// touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellLocation {
    pub row: usize,
    pub column: Option<usize>,
}

/// Map an edited paragraph to the row and column it belongs to.
///
/// Paths outside the outline region are `NotApplicable`; a path naming a
/// row the document no longer has is `UnresolvedRow`. Edits below the
/// cell level are attributed to their cell-level ancestor.
pub fn locate(document: &Document, path: &NodePath) -> Result<CellLocation, SyncError> {
    let Some(rows) = outline_entries(document) else {
        return Err(SyncError::NotApplicable);
    };
    let mut iter = path.steps().iter();
    match iter.next() {
        Some(PathStep::Root(0)) => {}
        _ => return Err(SyncError::NotApplicable),
    }
    let Some(PathStep::Entry {
        entry_index: row, ..
    }) = iter.next()
    else {
        return Err(SyncError::NotApplicable);
    };
    let row = *row;
    if row >= rows.len() {
        return Err(SyncError::UnresolvedRow { row });
    }
    let column = match iter.next() {
        Some(PathStep::Entry { entry_index, .. }) => Some(*entry_index),
        Some(PathStep::Root(_)) => return Err(SyncError::NotApplicable),
        None => None,
    };
    Ok(CellLocation { row, column })
}
