/// Append-only, ordered record of human-readable combat events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatLog {
    entries: Vec<String>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries appended at or after `start`.
    pub fn since(&self, start: usize) -> &[String] {
        self.entries.get(start..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_returns_tail() {
        let mut log = CombatLog::new();
        log.push("a");
        log.push("b");
        log.push("c");

        assert_eq!(log.since(1), &["b".to_string(), "c".to_string()]);
        assert!(log.since(3).is_empty());
        assert!(log.since(10).is_empty());
        assert_eq!(log.last(), Some("c"));
    }
}
