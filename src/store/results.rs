//! Store result types

/// What a successful reload installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The file was parsed; `records` lines were accepted.
    Loaded { records: usize },
    /// The file does not exist; an empty index was installed.
    Cleared,
}
