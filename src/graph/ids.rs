use std::collections::HashMap;

/// Dense node IDs in first-seen order, starting at 0.
///
/// IDs are never renumbered, so a package that ends up hidden still consumes one.
#[derive(Debug, Clone, Default)]
pub struct IdRegistry {
    ids: HashMap<String, usize>,
    next_id: usize,
}

impl IdRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id_for(&mut self, path: &str) -> usize {
        if let Some(id) = self.ids.get(path) {
            return *id;
        }
        let id = self.next_id;
        self.next_id += 1;
        self.ids.insert(path.to_string(), id);
        id
    }

    #[must_use]
    pub fn get(&self, path: &str) -> Option<usize> {
        self.ids.get(path).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_stable_and_dense() {
        let mut ids = IdRegistry::new();
        assert_eq!(ids.id_for("b"), 0);
        assert_eq!(ids.id_for("a"), 1);
        assert_eq!(ids.id_for("b"), 0);
        assert_eq!(ids.id_for("c"), 2);
        assert_eq!(ids.len(), 3);
        assert_eq!(ids.get("a"), Some(1));
        assert_eq!(ids.get("zzz"), None);
    }
}
