use crossterm::event::{KeyEvent, KeyEventKind};
use log::debug;
use tdoc::Document;

use crate::error::SyncError;

mod content;
mod inspect;
mod locate;
mod model;
mod structure;
mod sync;
mod trigger;

pub use inspect::GridRow;
pub use locate::{CellLocation, EditKind, EditOrigin, EditRecord, locate};
pub use model::{DocumentModel, LiveModel, Patch};
pub use sync::{SyncReport, synchronize};
pub use trigger::{KeyCommand, SyncOptions, SyncPipeline, translate_key};

use content::{entry_is_blank, insert_char_at, paragraph_char_len};
use inspect::{
    caret_path,
    collect_grid,
    entry_at,
    entry_text,
    outline_rows,
    paragraph_ref,
    row_cell_entries,
    row_entry,
};
use structure::{
    append_row_entry,
    ensure_outline_initialized,
    lift_entry,
    paragraph_mut,
    remove_row_entry,
    set_text_at,
    sink_entry,
    split_entry,
};

/// Structural address of a paragraph inside the hosted document. Paths are
/// re-derived from the document after every mutation; they are never kept
/// alive across edits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodePath {
    steps: Vec<PathStep>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PathStep {
    Root(usize),
    Entry {
        entry_index: usize,
        paragraph_index: usize,
    },
}

impl NodePath {
    /// Path of the label paragraph of a top-level row.
    pub fn row(row: usize) -> Self {
        Self {
            steps: vec![
                PathStep::Root(0),
                PathStep::Entry {
                    entry_index: row,
                    paragraph_index: 0,
                },
            ],
        }
    }

    /// Path of the text paragraph of one cell inside a row's nested list.
    pub fn cell(row: usize, column: usize) -> Self {
        Self {
            steps: vec![
                PathStep::Root(0),
                PathStep::Entry {
                    entry_index: row,
                    paragraph_index: 1,
                },
                PathStep::Entry {
                    entry_index: column,
                    paragraph_index: 0,
                },
            ],
        }
    }

    fn from_steps(steps: Vec<PathStep>) -> Self {
        Self { steps }
    }

    fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Logical caret: the paragraph it sits in plus a character offset into
/// that paragraph's text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Caret {
    pub path: NodePath,
    pub offset: usize,
}

/// Direct-mutation editing surface over a hosted outline document.
///
/// The first paragraph of the document is the outline: one list whose
/// entries are the rows. Each row entry carries a label paragraph and,
/// once the row has cells, a nested list holding one entry per cell.
/// Structural commands keep all rows' cell counts aligned by running a
/// synchronization pass after every structural edit.
pub struct OutlineEditor {
    document: Document,
    caret: Caret,
    options: SyncOptions,
    syncing: bool,
}

impl OutlineEditor {
    pub fn new(document: Document) -> Self {
        Self::with_options(document, SyncOptions::default())
    }

    pub fn with_options(mut document: Document, options: SyncOptions) -> Self {
        ensure_outline_initialized(&mut document);
        let mut editor = Self {
            document,
            caret: Caret::default(),
            options,
            syncing: false,
        };
        editor.ensure_caret_resolvable();
        editor
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn caret(&self) -> &Caret {
        &self.caret
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    pub fn row_count(&self) -> usize {
        outline_rows(&self.document)
    }

    /// Cell count of a row, `None` if the row does not exist. A row
    /// without a nested list counts as zero cells.
    pub fn cell_count(&self, row: usize) -> Option<usize> {
        row_entry(&self.document, row)?;
        Some(
            row_cell_entries(&self.document, row)
                .map(|cells| cells.len())
                .unwrap_or(0),
        )
    }

    pub fn label_text(&self, row: usize) -> Option<String> {
        let entry = row_entry(&self.document, row)?;
        Some(entry_text(entry))
    }

    pub fn cell_text(&self, row: usize, column: usize) -> Option<String> {
        let cells = row_cell_entries(&self.document, row)?;
        let cell = cells.get(column)?;
        Some(entry_text(cell))
    }

    /// Tabular snapshot of the whole outline.
    pub fn grid(&self) -> Vec<GridRow> {
        collect_grid(&self.document)
    }

    /// Row/column projection of the current caret position.
    pub fn caret_location(&self) -> Option<CellLocation> {
        locate(&self.document, &self.caret.path).ok()
    }

    pub fn move_caret_to_row(&mut self, row: usize) -> bool {
        let Some(path) = caret_path(&self.document, row, None) else {
            return false;
        };
        self.caret = Caret { path, offset: 0 };
        true
    }

    pub fn move_caret_to_cell(&mut self, row: usize, column: usize) -> bool {
        let Some(path) = caret_path(&self.document, row, Some(column)) else {
            return false;
        };
        self.caret = Caret { path, offset: 0 };
        true
    }

    /// Place the caret explicitly. Fails when the path does not resolve
    /// to a text-bearing paragraph.
    pub fn set_caret(&mut self, caret: Caret) -> bool {
        let resolves = paragraph_ref(&self.document, &caret.path)
            .map(|paragraph| paragraph.paragraph_type().is_leaf())
            .unwrap_or(false);
        if !resolves {
            return false;
        }
        self.caret = caret;
        self.clamp_caret_offset();
        true
    }

    /// Raw key entry point for hosts without a transactional edit stream.
    /// Returns whether the document changed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let Some(command) = translate_key(key) else {
            return false;
        };
        self.apply(command)
    }

    pub fn apply(&mut self, command: KeyCommand) -> bool {
        match command {
            KeyCommand::Indent => self.indent_current_item(),
            KeyCommand::Outdent => self.outdent_current_item(),
            KeyCommand::ItemBreak => self.insert_item_break(),
            KeyCommand::InsertChar(ch) => self.insert_char(ch),
        }
    }

    /// Content-changed hook: runs synchronization passes for the caret row
    /// until they stop producing changes. Re-entrant calls are ignored.
    pub fn on_content_changed(&mut self) -> bool {
        if self.syncing {
            return false;
        }
        let Ok(location) = locate(&self.document, &self.caret.path) else {
            return false;
        };
        let limit = self
            .options
            .pass_limit
            .unwrap_or_else(|| self.row_count().max(1));
        self.syncing = true;
        let mut total = SyncReport::default();
        for _ in 0..limit {
            let report = self.run_sync(location.row);
            if report.is_noop() {
                break;
            }
            total.absorb(report);
        }
        self.syncing = false;
        !total.is_noop()
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        let Some(paragraph) = paragraph_mut(&mut self.document, &self.caret.path) else {
            return false;
        };
        if !insert_char_at(paragraph, self.caret.offset, ch) {
            return false;
        }
        self.caret.offset += 1;
        true
    }

    pub fn set_label_text(&mut self, row: usize, text: &str) -> bool {
        let Some(path) = caret_path(&self.document, row, None) else {
            return false;
        };
        set_text_at(&mut self.document, &path, text)
    }

    pub fn set_cell_text(&mut self, row: usize, column: usize, text: &str) -> bool {
        let Some(path) = caret_path(&self.document, row, Some(column)) else {
            return false;
        };
        set_text_at(&mut self.document, &path, text)
    }

    /// Split the caret item at the caret offset: trailing text moves into a
    /// new following item, nested structure stays with the original one.
    /// On an empty nested item this lifts the item out instead and leaves
    /// the caret at its start.
    pub fn insert_item_break(&mut self) -> bool {
        if self.caret_is_nested() && self.current_entry_is_blank() {
            if !self.outdent_current_item() {
                return false;
            }
            self.caret.offset = 0;
            return true;
        }
        let offset = self.caret.offset;
        let Some(path) = split_entry(&mut self.document, &self.caret.path, offset) else {
            return false;
        };
        self.caret = Caret { path, offset: 0 };
        self.sync_after_structural_edit();
        true
    }

    /// Move the caret item into a nested list under its previous sibling,
    /// creating that list when absent.
    pub fn indent_current_item(&mut self) -> bool {
        let Some(path) = sink_entry(&mut self.document, &self.caret.path) else {
            return false;
        };
        self.caret.path = path;
        self.sync_after_structural_edit();
        true
    }

    /// Move the caret item out of its nested list to sit right after its
    /// former parent item. An emptied list container is dropped.
    pub fn outdent_current_item(&mut self) -> bool {
        let Some(path) = lift_entry(&mut self.document, &self.caret.path) else {
            return false;
        };
        self.caret.path = path;
        self.sync_after_structural_edit();
        true
    }

    /// Append a top-level row. New rows are grown to the first row's cell
    /// count so the outline stays uniform.
    pub fn append_row(&mut self, label: &str) -> Option<usize> {
        let row = append_row_entry(&mut self.document, label)?;
        if row > 0 {
            self.run_sync(0);
        }
        if !self.caret_resolves() {
            self.move_caret_to_row(row);
        }
        Some(row)
    }

    pub fn remove_row(&mut self, row: usize) -> bool {
        if remove_row_entry(&mut self.document, row).is_none() {
            return false;
        }
        self.ensure_caret_resolvable();
        true
    }

    fn caret_is_nested(&self) -> bool {
        self.caret.path.steps().len() >= 3
    }

    fn current_entry_is_blank(&self) -> bool {
        entry_at(&self.document, &self.caret.path)
            .map(|entry| entry_is_blank(entry))
            .unwrap_or(false)
    }

    fn sync_after_structural_edit(&mut self) {
        if self.syncing {
            return;
        }
        let location = locate(&self.document, &self.caret.path).ok();
        let Some(location) = location else {
            return;
        };
        self.syncing = true;
        self.run_sync(location.row);
        self.syncing = false;
        self.clamp_caret_offset();
    }

    fn run_sync(&mut self, trigger_row: usize) -> SyncReport {
        let mut model = LiveModel::new(&mut self.document);
        match synchronize(&mut model, trigger_row) {
            Ok(report) => {
                if self.options.trace && !report.is_noop() {
                    debug!(
                        "row {} pass: wrapped {} rows, added {} cells",
                        trigger_row, report.rows_wrapped, report.cells_added
                    );
                }
                report
            }
            Err(err) => {
                debug!("pass aborted: {}", err);
                SyncReport::default()
            }
        }
    }

    fn caret_resolves(&self) -> bool {
        paragraph_ref(&self.document, &self.caret.path)
            .map(|paragraph| paragraph.paragraph_type().is_leaf())
            .unwrap_or(false)
    }

    fn ensure_caret_resolvable(&mut self) {
        if self.caret_resolves() {
            self.clamp_caret_offset();
            return;
        }
        let rows = self.row_count();
        if rows == 0 {
            self.caret = Caret::default();
            return;
        }
        let row = match locate(&self.document, &self.caret.path) {
            Ok(location) => location.row.min(rows - 1),
            Err(SyncError::UnresolvedRow { row }) => row.min(rows - 1),
            Err(_) => 0,
        };
        if let Some(path) = caret_path(&self.document, row, None) {
            self.caret = Caret { path, offset: 0 };
        } else {
            self.caret = Caret::default();
        }
    }

    fn clamp_caret_offset(&mut self) {
        let len = paragraph_ref(&self.document, &self.caret.path)
            .map(paragraph_char_len)
            .unwrap_or(0);
        if self.caret.offset > len {
            self.caret.offset = len;
        }
    }
}

#[cfg(test)]
#[path = "outline_tests.rs"]
mod outline_tests;
