//! Collection reconciliation pipeline.
//!
//! Computes a replacement collection from the stored records, an incoming
//! batch and a per-attribute config. Pure in-memory computation: no I/O,
//! no state between calls.
//!
//! # Architecture
//!
//! - `input.rs` - batch normalization (mapping-of-maps or sequence-of-maps)
//! - `limit.rs` - record-count guard
//! - `merge.rs` - match/merge/reject/destroy against the existing records

mod input;
mod limit;
mod merge;

pub use input::normalize_batch;
pub use limit::check_record_limit;
pub use merge::merge_batch;

use serde_json::Value;

use crate::core::config::ReconcileConfig;
use crate::core::error::Result;
use crate::core::record::AttributeMap;

/// Reconciles the existing collection with a raw incoming batch.
///
/// Records matched by primary key are merged (or destroyed when allowed),
/// unmatched incoming records are appended, and existing records the batch
/// never referenced are retained after them. Fails before touching
/// anything when the batch has an invalid shape or exceeds the configured
/// limit.
pub fn reconcile_collection(
    existing: Vec<AttributeMap>,
    raw: &Value,
    config: &ReconcileConfig,
) -> Result<Vec<AttributeMap>> {
    let batch = normalize_batch(raw, &config.primary_key)?;
    check_record_limit(config.limit.as_ref(), batch.len())?;
    Ok(merge_batch(existing, batch, config))
}
