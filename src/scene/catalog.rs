/// Label of the central node. It sits at the origin and is not part of the sphere layout.
pub const CENTER: &str = "DT";

pub const AI: &str = "AI";
pub const SPATIAL_INTELLIGENCE: &str = "Spatial Intelligence";
pub const ION: &str = "ION";

/// Sphere nodes in layout order; index `i` receives lattice point `i`.
pub const NODE_NAMES: [&str; 10] = [
    AI,
    "Robotics",
    SPATIAL_INTELLIGENCE,
    "Computer Vision",
    "Drones IoT",
    "Security",
    "Cultural Heritage",
    "Safe School",
    ION,
    "MIT MST",
];

pub fn node_names(count: usize) -> &'static [&'static str] {
    &NODE_NAMES[..count.min(NODE_NAMES.len())]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_names_are_unique() {
        let unique = NODE_NAMES.iter().collect::<HashSet<_>>();
        assert_eq!(unique.len(), NODE_NAMES.len());
        assert!(!unique.contains(&CENTER));
    }

    #[test]
    fn test_node_names_clamps_to_catalog() {
        assert_eq!(node_names(3), &[AI, "Robotics", SPATIAL_INTELLIGENCE]);
        assert_eq!(node_names(50).len(), NODE_NAMES.len());
    }
}
