//! Error types for the recycler engine.

/// Result type alias for recycler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the recycler engine.
///
/// These all indicate contract violations rather than recoverable
/// conditions: they surface immediately to the caller and are never
/// retried or suppressed. Mutation operations (`add`, `clear`,
/// `replace_all`) cannot fail and have no error variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A position-based lookup was outside the valid row range.
    ///
    /// This indicates a desynchronized position/holder mapping on the
    /// caller's side.
    #[error("row position {position} out of range for {len} rows")]
    IndexOutOfRange { position: usize, len: usize },
}

impl Error {
    /// Create an out-of-range error for a lookup against a store of
    /// `len` rows.
    pub fn out_of_range(position: usize, len: usize) -> Self {
        Self::IndexOutOfRange { position, len }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_bounds() {
        let err = Error::out_of_range(5, 3);
        assert_eq!(err.to_string(), "row position 5 out of range for 3 rows");
    }
}
