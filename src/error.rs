use thiserror::Error;

/// Error types for `OArray` and `OrderedMap` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ContainerError {
    /// Index or position is not within the live elements
    #[error("Index out of range: index {index} is beyond count {count}")]
    IndexOutOfRange {
        /// Index that was accessed
        index: usize,
        /// Number of live elements at the time of the call
        count: usize,
    },
    /// Range is malformed or reaches past the live elements
    #[error("Invalid range: {start}..{end} does not fit within count {count}")]
    InvalidRange {
        /// First index of the range
        start: usize,
        /// One past the last index of the range
        end: usize,
        /// Number of live elements at the time of the call
        count: usize,
    },
    /// Removal attempted on a container without elements
    #[error("Empty collection: cannot remove from an empty container")]
    EmptyCollection,
    /// Positional map write with a key that is stored at another position
    #[error("Duplicate key: key is already present at position {position}")]
    DuplicateKey {
        /// Position currently holding the key
        position: usize,
    },
    /// Map lookup by index operator with a key that is not present
    #[error("Missing key: key is not present in the map")]
    MissingKey,
}

/// Unwraps the result of a `try_*` operation, panicking with the error message.
#[track_caller]
pub(crate) fn or_panic<T>(result: Result<T, ContainerError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}
