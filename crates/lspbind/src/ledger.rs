//! Bookkeeping of which mandatory keys a record has seen.

/// Required keys of one record, in registration order, with a seen flag each.
///
/// A fresh ledger is created for every object being bound, so flags never
/// leak from one object to the next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: Vec<(&'static str, bool)>,
}

impl Ledger {
    /// Registers `key` as mandatory. Registering it twice keeps one entry.
    pub fn require(&mut self, key: &'static str) {
        if !self.entries.iter().any(|(k, _)| *k == key) {
            self.entries.push((key, false));
        }
    }

    /// Drops `key` from the mandatory set.
    pub fn release(&mut self, key: &str) {
        self.entries.retain(|(k, _)| *k != key);
    }

    /// Flags `key` as seen. Keys that are not mandatory are ignored.
    pub fn mark(&mut self, key: &str) {
        if let Some((_, seen)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *seen = true;
        }
    }

    /// The first mandatory key, in registration order, that was not seen.
    #[must_use]
    pub fn first_missing(&self) -> Option<&'static str> {
        self.unseen().next()
    }

    /// All mandatory keys not seen yet.
    pub fn unseen(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|(_, seen)| !seen)
            .map(|(key, _)| *key)
    }

    /// Whether every mandatory key was seen.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|(_, seen)| *seen)
    }

    /// Whether `key` is mandatory.
    #[must_use]
    pub fn requires(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    /// Appends the entries of an embedded group.
    pub fn merge(&mut self, other: Ledger) {
        for (key, seen) in other.entries {
            match self.entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 |= seen,
                None => self.entries.push((key, seen)),
            }
        }
    }
}
