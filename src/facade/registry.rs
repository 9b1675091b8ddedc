use log::warn;

use crate::core::config::ReconcileConfig;

/// Explicit map from attribute name to reconciliation config, kept in
/// registration order. One registry entry per collection attribute
/// replaces per-attribute generated writer methods.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    entries: Vec<(String, ReconcileConfig)>,
}

impl ConfigRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `config` under `name`, replacing any previous registration.
    pub fn insert(&mut self, name: impl Into<String>, config: ReconcileConfig) {
        let name = name.into();
        match self.entries.iter_mut().find(|(entry, _)| *entry == name) {
            Some(slot) => {
                warn!("replacing reconcile config for attribute '{}'", name);
                slot.1 = config;
            }
            None => self.entries.push((name, config)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ReconcileConfig> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, config)| config)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReconcileConfig)> {
        self.entries
            .iter()
            .map(|(name, config)| (name.as_str(), config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_order_and_replacement() {
        let mut registry = ConfigRegistry::new();
        registry.insert("books", ReconcileConfig::default());
        registry.insert("cars", ReconcileConfig::default());
        registry.insert(
            "books",
            ReconcileConfig::builder().primary_key("isbn").build(),
        );

        let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["books", "cars"]);
        assert_eq!(registry.get("books").unwrap().primary_key, "isbn");
        assert_eq!(registry.len(), 2);
    }
}
