use tdoc::Document;

use crate::error::SyncError;
use super::NodePath;
use super::inspect::{outline_entries, outline_rows, row_cell_entries, row_entry};
use super::locate::{EditKind, EditOrigin, EditRecord};
use super::structure;

/// The primitives the synchronizer needs from a hosted document. Two
/// implementations exist: [`LiveModel`] mutates the document tree in
/// place, [`Patch`] collects the same edits against a working copy and
/// applies them in one step on commit.
pub trait DocumentModel {
    fn row_count(&self) -> usize;

    /// Cells of a row: `None` when the row has no nested list yet,
    /// `Some(n)` otherwise. Rows that do not resolve are an error.
    fn cell_count(&self, row: usize) -> Result<Option<usize>, SyncError>;

    /// Attach an empty nested cell list to a row that has none.
    fn wrap_in_cell_list(&mut self, row: usize) -> Result<(), SyncError>;

    /// Append one empty cell to a row's nested list.
    fn append_empty_cell(&mut self, row: usize) -> Result<(), SyncError>;
}

fn read_cell_count(document: &Document, row: usize) -> Result<Option<usize>, SyncError> {
    if row_entry(document, row).is_none() {
        return Err(SyncError::UnresolvedRow { row });
    }
    Ok(row_cell_entries(document, row).map(|cells| cells.len()))
}

/// Direct tree mutation over a borrowed document. Every call re-resolves
/// positions from the document; nothing is cached across mutations.
pub struct LiveModel<'a> {
    document: &'a mut Document,
}

impl<'a> LiveModel<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self { document }
    }
}

impl DocumentModel for LiveModel<'_> {
    fn row_count(&self) -> usize {
        outline_rows(self.document)
    }

    fn cell_count(&self, row: usize) -> Result<Option<usize>, SyncError> {
        read_cell_count(self.document, row)
    }

    fn wrap_in_cell_list(&mut self, row: usize) -> Result<(), SyncError> {
        structure::ensure_cell_list(self.document, row)
            .map(|_| ())
            .ok_or(SyncError::UnresolvedRow { row })
    }

    fn append_empty_cell(&mut self, row: usize) -> Result<(), SyncError> {
        structure::append_empty_cell(self.document, row).ok_or(SyncError::UnresolvedRow { row })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PatchOp {
    WrapRow { row: usize },
    AppendCell { row: usize },
}

impl PatchOp {
    fn row(&self) -> usize {
        match *self {
            PatchOp::WrapRow { row } | PatchOp::AppendCell { row } => row,
        }
    }
}

/// Transactional model: edits are applied to a private working copy and
/// recorded, then replayed onto the live document by [`Patch::commit`].
/// Dropping an uncommitted patch leaves the live document untouched.
pub struct Patch {
    working: Document,
    ops: Vec<PatchOp>,
}

impl Patch {
    pub fn new(document: &Document) -> Self {
        Self {
            working: document.clone(),
            ops: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    /// The document as it will look once the patch is committed.
    pub fn preview(&self) -> &Document {
        &self.working
    }

    /// Records describing this patch's own edits, tagged so that feeding
    /// them back into the pipeline does not start another pass.
    pub fn edit_records(&self) -> Vec<EditRecord> {
        self.ops
            .iter()
            .map(|op| EditRecord {
                kind: EditKind::Other,
                path: NodePath::row(op.row()),
                origin: EditOrigin::Synchronizer,
            })
            .collect()
    }

    /// Replay the recorded edits onto the live document. All target rows
    /// are checked first; nothing is written when any of them fails to
    /// resolve.
    pub fn commit(self, document: &mut Document) -> Result<(), SyncError> {
        for op in &self.ops {
            let row = op.row();
            if row_entry(document, row).is_none() {
                if outline_entries(document).is_none() {
                    return Err(SyncError::StructureMismatch { row });
                }
                return Err(SyncError::UnresolvedRow { row });
            }
        }
        for op in &self.ops {
            match *op {
                PatchOp::WrapRow { row } => {
                    if structure::ensure_cell_list(document, row).is_none() {
                        return Err(SyncError::UnresolvedRow { row });
                    }
                }
                PatchOp::AppendCell { row } => {
                    if structure::append_empty_cell(document, row).is_none() {
                        return Err(SyncError::UnresolvedRow { row });
                    }
                }
            }
        }
        Ok(())
    }
}

impl DocumentModel for Patch {
    fn row_count(&self) -> usize {
        outline_rows(&self.working)
    }

    fn cell_count(&self, row: usize) -> Result<Option<usize>, SyncError> {
        read_cell_count(&self.working, row)
    }

    fn wrap_in_cell_list(&mut self, row: usize) -> Result<(), SyncError> {
        structure::ensure_cell_list(&mut self.working, row)
            .ok_or(SyncError::UnresolvedRow { row })?;
        self.ops.push(PatchOp::WrapRow { row });
        Ok(())
    }

    fn append_empty_cell(&mut self, row: usize) -> Result<(), SyncError> {
        structure::append_empty_cell(&mut self.working, row)
            .ok_or(SyncError::UnresolvedRow { row })?;
        self.ops.push(PatchOp::AppendCell { row });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::synchronize;
    use tdoc::ftml;

    fn two_rows() -> Document {
        ftml! {
            ul {
                li {
                    p { "first" }
                    ul {
                        li { p { "a" } }
                        li { p { "b" } }
                    }
                }
                li { p { "second" } }
            }
        }
    }

    #[test]
    fn live_model_reports_counts() {
        let mut document = two_rows();
        let model = LiveModel::new(&mut document);
        assert_eq!(model.row_count(), 2);
        assert_eq!(model.cell_count(0), Ok(Some(2)));
        assert_eq!(model.cell_count(1), Ok(None));
        assert_eq!(
            model.cell_count(5),
            Err(SyncError::UnresolvedRow { row: 5 })
        );
    }

    #[test]
    fn patch_leaves_live_document_alone_until_commit() {
        let mut document = two_rows();
        let before = document.clone();
        let mut patch = Patch::new(&document);
        synchronize(&mut patch, 0).unwrap();
        assert!(!patch.is_empty());
        assert_eq!(document, before);

        patch.commit(&mut document).unwrap();
        let mut expected = before;
        let mut live = LiveModel::new(&mut expected);
        synchronize(&mut live, 0).unwrap();
        assert_eq!(document, expected);
    }

    #[test]
    fn dropped_patch_changes_nothing() {
        let mut document = two_rows();
        let before = document.clone();
        {
            let mut patch = Patch::new(&document);
            synchronize(&mut patch, 0).unwrap();
            assert_eq!(patch.op_count(), 3);
        }
        assert_eq!(document, before);
    }

    #[test]
    fn patch_preview_matches_commit_result() {
        let mut document = two_rows();
        let mut patch = Patch::new(&document);
        synchronize(&mut patch, 0).unwrap();
        let preview = patch.preview().clone();
        patch.commit(&mut document).unwrap();
        assert_eq!(document, preview);
    }

    #[test]
    fn commit_aborts_cleanly_when_rows_vanished() {
        let mut document = two_rows();
        let mut patch = Patch::new(&document);
        synchronize(&mut patch, 0).unwrap();

        let mut emptied = ftml! {
            ul {
                li { p { "only row" } }
            }
        };
        let before = emptied.clone();
        assert_eq!(
            patch.commit(&mut emptied),
            Err(SyncError::UnresolvedRow { row: 1 })
        );
        assert_eq!(emptied, before);
    }

    #[test]
    fn patch_records_are_tagged() {
        let document = two_rows();
        let mut patch = Patch::new(&document);
        synchronize(&mut patch, 0).unwrap();
        let records = patch.edit_records();
        assert!(!records.is_empty());
        assert!(
            records
                .iter()
                .all(|record| record.origin == EditOrigin::Synchronizer)
        );
    }
}
