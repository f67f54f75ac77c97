use thiserror::Error;

/// Usage errors reported by the red-black tree primitives.
///
/// The high-level `add` / `remove` calls log these and turn into no-ops.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("key already present in tree")]
    DuplicateKey,
    #[error("key not present in tree")]
    KeyNotFound,
}
