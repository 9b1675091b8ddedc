pub mod config;
pub mod error;
pub mod record;

pub use config::{LimitSpec, ReconcileConfig, ReconcileConfigBuilder, RejectRule};
pub use error::{Result, StoreError};
pub use record::{AttributeMap, UNASSIGNABLE_KEYS};
