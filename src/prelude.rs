//! Recommended API entrypoints grouped by abstraction level.
//!
//! `dx` is the stable default for document-first applications.
//! `advanced` is an explicit escape hatch for the reconciliation internals.

pub mod dx {
    //! Stable high-level surface.
    //!
    //! Intended usage in app code:
    //! - declare a `Document` with its fields,
    //! - register collection attributes with `ReconcileConfig`,
    //! - write batches through `set_collection_attribute`.
    pub use crate::{
        AttributeMap, Document, LimitSpec, ReconcileConfig, RejectRule, Result,
        StoreError,
    };
}

pub mod advanced {
    //! Escape hatch for the reconciliation pipeline internals.
    //!
    //! App-level product code should normally stay on `prelude::dx`.
    pub use crate::facade::ConfigRegistry;
    pub use crate::reconcile::{
        check_record_limit, merge_batch, normalize_batch, reconcile_collection,
    };
}
