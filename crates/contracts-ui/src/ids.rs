use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Element identifier source shared by one component tree.
///
/// Clones share the counter, so identifiers stay unique across every widget
/// mounted under the same [`crate::App`].
#[derive(Debug, Clone, Default)]
pub struct ElementIds {
    next: Arc<AtomicU64>,
}

impl ElementIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `"{prefix}-{n}"` with `n` starting at 1.
    pub fn next(&self, prefix: &str) -> String {
        let id = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{id}")
    }
}

#[cfg(test)]
mod tests {
    use super::ElementIds;

    #[test]
    fn identifiers_are_unique_across_clones() {
        let ids = ElementIds::new();
        let shared = ids.clone();
        assert_eq!(ids.next("input"), "input-1");
        assert_eq!(shared.next("textarea"), "textarea-2");
        assert_eq!(ids.next("input"), "input-3");
    }
}
