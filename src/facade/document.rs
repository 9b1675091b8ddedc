use log::debug;
use serde_json::{Map, Value};

use super::registry::ConfigRegistry;
use crate::core::config::ReconcileConfig;
use crate::core::error::{Result, StoreError};
use crate::core::record::AttributeMap;
use crate::reconcile::reconcile_collection;

/// The owning entity for one or more collection attributes.
///
/// A `Document` declares a fixed set of named fields. A field configured
/// through [`accepts_collection`](Document::accepts_collection) stores an
/// ordered collection of records as a single serialized JSON string, and
/// accepts batches of attribute maps through the generic
/// [`set_collection_attribute`](Document::set_collection_attribute) entry
/// point, which reconciles them against the stored records and assigns
/// the result back. That one field assignment is the only side effect.
///
/// # Examples
///
/// ```
/// use nestedstore::{Document, ReconcileConfig};
/// use serde_json::json;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut person = Document::new(["books"]);
/// person.accepts_collection(
///     "books",
///     ReconcileConfig::builder()
///         .primary_key("isbn")
///         .allow_destroy(true)
///         .build(),
/// )?;
///
/// person.set_collection_attribute("books", json!([
///     {"isbn": 1234, "name": "war, what is it good for"},
///     {"isbn": 5678, "name": "the borg"},
/// ]))?;
/// person.set_collection_attribute("books", json!([
///     {"isbn": 1234, "name": "war and peace"},
/// ]))?;
///
/// let books = person.collection("books")?;
/// assert_eq!(books.len(), 2);
/// assert_eq!(books[0]["name"], "war and peace");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Document {
    fields: Map<String, Value>,
    registry: ConfigRegistry,
}

impl Document {
    /// Creates a document declaring the given field names. Every field
    /// starts out null.
    pub fn new<I, S>(field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields = Map::new();
        for name in field_names {
            fields.insert(name.into(), Value::Null);
        }
        Self {
            fields,
            registry: ConfigRegistry::new(),
        }
    }

    /// Registers `config` for a declared field, installing the collection
    /// accessor for it. Fails with `UnknownAttribute` when the field was
    /// never declared.
    pub fn accepts_collection(
        &mut self,
        name: impl Into<String>,
        config: ReconcileConfig,
    ) -> Result<()> {
        let name = name.into();
        if !self.fields.contains_key(&name) {
            return Err(StoreError::UnknownAttribute(name));
        }
        self.registry.insert(name, config);
        Ok(())
    }

    /// Registers several attributes with one shared config.
    pub fn accepts_collections<I, S>(
        &mut self,
        names: I,
        config: ReconcileConfig,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.accepts_collection(name, config.clone())?;
        }
        Ok(())
    }

    /// The write entry point for a configured collection attribute:
    /// reconciles `raw` against the stored records and assigns the result
    /// back to the field.
    ///
    /// `raw` may be a sequence of attribute maps, an index-keyed mapping
    /// of attribute maps, or a single attribute map carrying the
    /// configured primary key. On any failure the stored field is left
    /// untouched.
    pub fn set_collection_attribute(&mut self, name: &str, raw: Value) -> Result<()> {
        let config = self
            .registry
            .get(name)
            .ok_or_else(|| StoreError::UnconfiguredAttribute(name.to_string()))?;

        let existing = self.stored_collection(name)?;
        let assembled = reconcile_collection(existing, &raw, config)?;
        debug!(
            "assigning {} reconciled records to attribute '{}'",
            assembled.len(),
            name
        );

        let serialized = serde_json::to_string(&assembled)?;
        self.fields.insert(name.to_string(), Value::String(serialized));
        Ok(())
    }

    /// The current collection stored under `name`. A null field reads as
    /// an empty collection.
    pub fn collection(&self, name: &str) -> Result<Vec<AttributeMap>> {
        self.stored_collection(name)
    }

    /// Raw field access.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Plain field assignment for declared fields.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        if !self.fields.contains_key(name) {
            return Err(StoreError::UnknownAttribute(name.to_string()));
        }
        self.fields.insert(name.to_string(), value);
        Ok(())
    }

    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    fn stored_collection(&self, name: &str) -> Result<Vec<AttributeMap>> {
        match self.fields.get(name) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(serialized)) => {
                let records: Vec<AttributeMap> = serde_json::from_str(serialized)?;
                Ok(records)
            }
            Some(other) => Err(StoreError::Serialization(format!(
                "attribute '{}' does not hold a serialized collection: {}",
                name, other
            ))),
        }
    }
}
