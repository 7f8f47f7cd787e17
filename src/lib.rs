//! Column-synchronized outline editing.
//!
//! Hosts a tdoc document whose first paragraph is a single list: each
//! top-level entry is a table row, and an entry's own nested list holds that
//! row's cells. The outline module grows rows to a uniform cell count after
//! every structural edit, either directly on the live document or through a
//! reviewable patch. The table module is the parallel plain tabular model
//! used by the non-outline editing surface, uniform by construction.

pub mod error;
pub mod outline;
pub mod table;

pub use error::SyncError;
pub use outline::{
    Caret, CellLocation, DocumentModel, EditKind, EditOrigin, EditRecord, GridRow, KeyCommand,
    LiveModel, NodePath, OutlineEditor, Patch, SyncOptions, SyncPipeline, SyncReport, locate,
    synchronize, translate_key,
};
pub use table::{RowSection, TableCell, TableData, TableRow};
