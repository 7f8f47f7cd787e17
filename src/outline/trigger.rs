use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use tdoc::Document;

use crate::error::SyncError;
use super::locate::{EditOrigin, EditRecord, locate};
use super::model::Patch;
use super::sync::synchronize;

/// Per-instance tuning for the synchronization passes. Passed in at
/// construction instead of living in process-wide state.
#[derive(Clone, Copy, Debug, Default)]
pub struct SyncOptions {
    /// Log a summary of every pass, including no-ops.
    pub trace: bool,
    /// Upper bound for content-changed passes; `None` means the row count.
    pub pass_limit: Option<usize>,
}

/// Outline command a key event maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    Indent,
    Outdent,
    ItemBreak,
    InsertChar(char),
}

/// Translate a raw key event into an outline command. Keys the outline
/// does not own (Backspace, navigation, anything with Control or Alt)
/// return `None` and stay with the host.
pub fn translate_key(key: &KeyEvent) -> Option<KeyCommand> {
    match (key.code, key.modifiers) {
        (KeyCode::BackTab, _) => Some(KeyCommand::Outdent),
        (KeyCode::Tab, m) if m.contains(KeyModifiers::SHIFT) => Some(KeyCommand::Outdent),
        (KeyCode::Tab, _) => Some(KeyCommand::Indent),
        (KeyCode::Enter, m)
            if m.contains(KeyModifiers::SHIFT) || m.contains(KeyModifiers::CONTROL) =>
        {
            None
        }
        (KeyCode::Enter, _) => Some(KeyCommand::ItemBreak),
        (KeyCode::Char(ch), m)
            if !m.contains(KeyModifiers::CONTROL) && !m.contains(KeyModifiers::ALT) =>
        {
            Some(KeyCommand::InsertChar(ch))
        }
        _ => None,
    }
}

/// Entry point for hosts with a transactional edit stream: turns a batch
/// of structural edit records into the growth patch they call for.
pub struct SyncPipeline {
    options: SyncOptions,
}

impl SyncPipeline {
    pub fn new() -> Self {
        Self::with_options(SyncOptions::default())
    }

    pub fn with_options(options: SyncOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Run a synchronization pass for the first user-origin record that
    /// locates inside the outline. Returns `None` when no record applies,
    /// when the pass fails, or when it would change nothing; otherwise
    /// the patch, ready for [`Patch::commit`].
    ///
    /// Records tagged [`EditOrigin::Synchronizer`] are ignored, so a
    /// committed patch's own records can be fed back in safely.
    pub fn on_structural_edit(
        &self,
        document: &Document,
        records: &[EditRecord],
    ) -> Option<Patch> {
        let located = records.iter().find_map(|record| {
            if record.origin == EditOrigin::Synchronizer {
                return None;
            }
            match locate(document, &record.path) {
                Ok(location) => Some(Ok(location)),
                Err(SyncError::NotApplicable) => None,
                Err(err) => Some(Err(err)),
            }
        });
        let location = match located {
            Some(Ok(location)) => location,
            Some(Err(err)) => {
                debug!("pass skipped: {}", err);
                return None;
            }
            None => return None,
        };
        let mut patch = Patch::new(document);
        match synchronize(&mut patch, location.row) {
            Ok(report) if report.is_noop() => {
                if self.options.trace {
                    debug!("row {} pass had nothing to do", location.row);
                }
                None
            }
            Ok(report) => {
                if self.options.trace {
                    debug!(
                        "row {} pass: wrapped {} rows, added {} cells",
                        location.row, report.rows_wrapped, report.cells_added
                    );
                }
                Some(patch)
            }
            Err(err) => {
                debug!("pass aborted: {}", err);
                None
            }
        }
    }
}

impl Default for SyncPipeline {
    fn default() -> Self {
        Self::new()
    }
}
