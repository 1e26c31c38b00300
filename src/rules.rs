//! Saved rule list plus the currently active rule text
//!
//! Rules are compared by exact string equality. Insertion order is the
//! display order of the dropdown.

use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleStore {
    rules: Vec<String>,
    /// Whatever the rule field shows; not necessarily a stored rule
    active: String,
}

impl RuleStore {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from persisted rules, dropping empty and repeated entries
    pub fn from_rules<I>(rules: I, active: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut store = Self {
            rules: Vec::new(),
            active: active.into(),
        };
        for rule in rules {
            if !store.add(&rule) && !rule.is_empty() {
                warn!(rule = %rule, "Dropping duplicate saved rule");
            }
        }
        store
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Mutable access for the editable rule field
    pub fn active_mut(&mut self) -> &mut String {
        &mut self.active
    }

    pub fn set_active(&mut self, text: impl Into<String>) {
        self.active = text.into();
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.rules.iter().any(|r| r == rule)
    }

    /// Append `rule` unless it is empty or already stored.
    ///
    /// Returns true when the list changed.
    pub fn add(&mut self, rule: &str) -> bool {
        if rule.is_empty() || self.contains(rule) {
            return false;
        }
        self.rules.push(rule.to_string());
        debug!(rule = %rule, count = self.rules.len(), "Rule added");
        true
    }

    /// Remove `rule` if stored. Returns true when the list changed.
    pub fn remove(&mut self, rule: &str) -> bool {
        let Some(idx) = self.rules.iter().position(|r| r == rule) else {
            return false;
        };
        self.rules.remove(idx);
        debug!(rule = %rule, count = self.rules.len(), "Rule removed");
        true
    }

    /// Trim the active text and store it, keeping the trimmed text active
    pub fn save_active(&mut self) -> bool {
        let trimmed = self.active.trim().to_string();
        if !self.add(&trimmed) {
            return false;
        }
        self.active = trimmed;
        true
    }

    /// Remove the active text from the list, then activate the first
    /// remaining rule (or nothing)
    pub fn delete_active(&mut self) -> bool {
        let current = self.active.clone();
        if !self.remove(&current) {
            return false;
        }
        self.active = self.rules.first().cloned().unwrap_or_default();
        true
    }
}
