//! Companion catalog implementing [`battle_core::UnitOracle`].

use std::collections::HashMap;

use battle_core::{CompanionTemplate, UnitOracle};

/// Oracle providing companion templates.
pub struct UnitOracleImpl {
    templates: HashMap<String, CompanionTemplate>,
}

impl UnitOracleImpl {
    /// Create an empty oracle.
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn from_catalog(entries: impl IntoIterator<Item = (String, CompanionTemplate)>) -> Self {
        let mut oracle = Self::new();
        for (id, template) in entries {
            oracle.add(id, template);
        }
        oracle
    }

    /// Add a companion template to the oracle.
    pub fn add(&mut self, id: impl Into<String>, template: CompanionTemplate) {
        self.templates.insert(id.into(), template);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for UnitOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitOracle for UnitOracleImpl {
    fn companion(&self, template_id: &str) -> Option<CompanionTemplate> {
        self.templates.get(template_id).cloned()
    }

    fn all_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.templates.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_content::builtin;

    #[test]
    fn serves_builtin_catalog() {
        let oracle = UnitOracleImpl::from_catalog(builtin::companions());
        assert_eq!(oracle.len(), builtin::companions().len());
        assert_eq!(oracle.companion("lyra").map(|t| t.name), Some("Lyra".to_string()));
        assert!(oracle.companion("ghost").is_none());
        assert_eq!(oracle.all_ids().first().map(String::as_str), Some("aria"));
    }
}
