use std::collections::HashMap;

use glam::DVec3;

/// Named anchor positions used as edge endpoints.
#[derive(Debug, Default)]
pub struct AnchorRegistry {
    positions: HashMap<String, DVec3>,
}

impl AnchorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or overwrites the anchor for `name`. Positions come from a
    /// memoized layout, so re-registering writes the same value back.
    pub fn register(&mut self, name: &str, position: DVec3) {
        self.positions.insert(name.to_owned(), position);
    }

    pub fn register_all(&mut self, names: &[&str], positions: &[DVec3]) {
        for (name, position) in names.iter().zip(positions) {
            self.register(name, *position);
        }
    }

    pub fn lookup(&self, name: &str) -> Option<DVec3> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::layout::fibonacci_sphere;

    #[test]
    fn test_lookup_unknown_name_is_none() {
        let registry = AnchorRegistry::new();
        assert!(registry.lookup("AI").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_all_zips_names_with_positions() {
        let points = fibonacci_sphere(3, 1.0);
        let mut registry = AnchorRegistry::new();
        registry.register_all(&["a", "b", "c", "d"], &points);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("b"), Some(points[1]));
        assert!(!registry.contains("d"));
    }

    #[test]
    fn test_reregistering_same_layout_is_stable() {
        let points = fibonacci_sphere(2, 1.0);
        let mut registry = AnchorRegistry::new();
        registry.register("a", points[0]);
        registry.register("a", fibonacci_sphere(2, 1.0)[0]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("a"), Some(points[0]));
    }
}
