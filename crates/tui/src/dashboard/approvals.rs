use std::collections::HashMap;

use api_types::transaction::Transaction;

/// Client-side approval decisions, keyed by transaction id.
///
/// Entries are only ever added or overwritten; nothing is evicted and a
/// refetch never clears them. They live as long as the session.
#[derive(Debug, Default, Clone)]
pub struct ApprovalOverrides {
    values: HashMap<String, bool>,
}

impl ApprovalOverrides {
    pub fn set(&mut self, transaction_id: &str, new_value: bool) {
        self.values.insert(transaction_id.to_string(), new_value);
    }

    pub fn get(&self, transaction_id: &str) -> Option<bool> {
        self.values.get(transaction_id).copied()
    }

    pub fn effective(&self, transaction: &Transaction) -> bool {
        self.get(&transaction.id).unwrap_or(transaction.approved)
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{employee, transaction};

    use super::*;

    #[test]
    fn falls_back_to_server_value() {
        let owner = employee("e1", "Alice", "Smith");
        let overrides = ApprovalOverrides::default();
        assert!(overrides.effective(&transaction("t1", &owner, true)));
        assert!(!overrides.effective(&transaction("t2", &owner, false)));
    }

    #[test]
    fn override_wins_in_both_directions() {
        let owner = employee("e1", "Alice", "Smith");
        let mut overrides = ApprovalOverrides::default();
        overrides.set("t1", true);
        overrides.set("t2", false);

        assert!(overrides.effective(&transaction("t1", &owner, false)));
        assert!(!overrides.effective(&transaction("t2", &owner, true)));
    }

    #[test]
    fn toggling_back_overwrites_without_shrinking() {
        let mut overrides = ApprovalOverrides::default();
        overrides.set("t1", true);
        overrides.set("t1", false);
        overrides.set("t2", true);

        assert_eq!(overrides.get("t1"), Some(false));
        assert_eq!(overrides.get("t2"), Some(true));
        assert_eq!(overrides.get("t3"), None);
    }
}
