use crate::core::config::LimitSpec;
use crate::core::error::{Result, StoreError};

/// Checks the normalized batch size against the configured limit, if any.
///
/// Runs before any record is touched, so a breached limit leaves the
/// existing collection exactly as it was.
pub fn check_record_limit(limit: Option<&LimitSpec>, got: usize) -> Result<()> {
    if let Some(spec) = limit {
        let limit = spec.resolve();
        if got > limit {
            return Err(StoreError::TooManyRecords { limit, got });
        }
    }
    Ok(())
}
