use thiserror::Error;

/// Failures a synchronization pass can hit. All of these are recovered
/// close to where they occur: callers skip the pass or abort it without
/// mutating the document, they never tear down the host.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The edit happened outside the outline region. Nothing to do.
    #[error("edit does not touch the outline")]
    NotApplicable,

    /// A row index stopped resolving mid-pass, e.g. because the
    /// document changed under us. The pass aborts without writing.
    #[error("row {row} cannot be resolved")]
    UnresolvedRow { row: usize },

    /// A row entry exists but its contents are not usable even when
    /// read leniently.
    #[error("row {row} has unexpected structure")]
    StructureMismatch { row: usize },
}
