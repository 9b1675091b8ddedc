use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{Result, StoreError};
use super::record::{AttributeMap, all_blank_except_destroy};

/// The default primary key used to match incoming records against
/// existing ones.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Option keys accepted by [`ReconcileConfig::from_options`].
const PERMITTED_OPTIONS: [&str; 5] = [
    "allow_destroy",
    "reject_if",
    "limit",
    "update_only",
    "primary_key",
];

/// Decides whether an incoming record should be dropped instead of
/// inserted or updated.
#[derive(Clone)]
pub enum RejectRule {
    /// Reject records whose every field is either `_destroy` or blank.
    AllBlank,
    /// Custom predicate over the incoming record.
    Predicate(Arc<dyn Fn(&AttributeMap) -> bool + Send + Sync>),
}

impl RejectRule {
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&AttributeMap) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    pub fn rejects(&self, record: &AttributeMap) -> bool {
        match self {
            Self::AllBlank => all_blank_except_destroy(record),
            Self::Predicate(f) => f(record),
        }
    }
}

impl fmt::Debug for RejectRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllBlank => write!(f, "AllBlank"),
            Self::Predicate(_) => write!(f, "Predicate(..)"),
        }
    }
}

/// Maximum record count for one batch: either a literal or a callable
/// resolved at reconcile time. The callable form lets the owning entity
/// bind its own context into the closure.
#[derive(Clone)]
pub enum LimitSpec {
    Fixed(usize),
    Computed(Arc<dyn Fn() -> usize + Send + Sync>),
}

impl LimitSpec {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn() -> usize + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    pub fn resolve(&self) -> usize {
        match self {
            Self::Fixed(limit) => *limit,
            Self::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for LimitSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(limit) => write!(f, "Fixed({})", limit),
            Self::Computed(_) => write!(f, "Computed(..)"),
        }
    }
}

impl From<usize> for LimitSpec {
    fn from(limit: usize) -> Self {
        Self::Fixed(limit)
    }
}

/// Per-attribute reconciliation configuration.
///
/// Supported options:
/// - `allow_destroy`: if true, removes any matched record whose attributes
///   carry a `_destroy` key with a value that evaluates to true
///   (eg. 1, "1", true, or "true"). Off by default.
/// - `reject_if`: a rule deciding whether a record should be built for a
///   given attribute map. [`RejectRule::AllBlank`] rejects records where
///   all attributes are blank excluding any value for `_destroy`.
/// - `limit`: maximum number of records one batch may carry, as a literal
///   or a callable. Exceeding it fails with
///   [`StoreError::TooManyRecords`](super::error::StoreError::TooManyRecords).
/// - `primary_key`: the field used when checking for existing records.
///   Defaults to `id`.
/// - `update_only`: accepted for compatibility, unused by the reconciler.
#[derive(Debug, Clone)]
pub struct ReconcileConfig {
    pub allow_destroy: bool,
    pub update_only: bool,
    pub primary_key: String,
    pub reject_if: Option<RejectRule>,
    pub limit: Option<LimitSpec>,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            allow_destroy: false,
            update_only: false,
            primary_key: DEFAULT_PRIMARY_KEY.to_string(),
            reject_if: None,
            limit: None,
        }
    }
}

impl ReconcileConfig {
    pub fn builder() -> ReconcileConfigBuilder {
        ReconcileConfigBuilder::default()
    }

    /// Builds a config from a data-driven options map, e.g. one loaded
    /// from a configuration file.
    ///
    /// Recognized keys are `allow_destroy`, `reject_if`, `limit`,
    /// `update_only` and `primary_key`; anything else fails with
    /// `UnknownOption`. Only the `"all_blank"` reject keyword is
    /// expressible in data form; arbitrary predicates and computed limits
    /// go through the builder.
    pub fn from_options(options: &AttributeMap) -> Result<Self> {
        for key in options.keys() {
            if !PERMITTED_OPTIONS.contains(&key.as_str()) {
                return Err(StoreError::UnknownOption(key.clone()));
            }
        }

        let parsed: ReconcileOptions =
            serde_json::from_value(Value::Object(options.clone()))
                .map_err(|err| StoreError::InvalidOption(err.to_string()))?;

        let reject_if = match parsed.reject_if.as_deref() {
            None => None,
            Some("all_blank") => Some(RejectRule::AllBlank),
            Some(other) => {
                return Err(StoreError::InvalidOption(format!(
                    "reject_if keyword `{}` is not supported",
                    other
                )));
            }
        };

        Ok(Self {
            allow_destroy: parsed.allow_destroy,
            update_only: parsed.update_only,
            primary_key: parsed
                .primary_key
                .unwrap_or_else(|| DEFAULT_PRIMARY_KEY.to_string()),
            reject_if,
            limit: parsed.limit.map(|limit| LimitSpec::Fixed(limit as usize)),
        })
    }
}

/// Wire form of the data-driven options map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ReconcileOptions {
    allow_destroy: bool,
    update_only: bool,
    primary_key: Option<String>,
    limit: Option<u64>,
    reject_if: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReconcileConfigBuilder {
    config: ReconcileConfig,
}

impl ReconcileConfigBuilder {
    pub fn allow_destroy(mut self, allow_destroy: bool) -> Self {
        self.config.allow_destroy = allow_destroy;
        self
    }

    pub fn update_only(mut self, update_only: bool) -> Self {
        self.config.update_only = update_only;
        self
    }

    pub fn primary_key(mut self, primary_key: impl Into<String>) -> Self {
        self.config.primary_key = primary_key.into();
        self
    }

    pub fn reject_if(mut self, rule: RejectRule) -> Self {
        self.config.reject_if = Some(rule);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(LimitSpec::Fixed(limit));
        self
    }

    pub fn limit_spec(mut self, limit: LimitSpec) -> Self {
        self.config.limit = Some(limit);
        self
    }

    pub fn build(self) -> ReconcileConfig {
        self.config
    }
}
