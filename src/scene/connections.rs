use std::collections::HashSet;

use glam::DVec3;

use super::anchors::AnchorRegistry;
use super::catalog::{AI, CENTER, ION, SPATIAL_INTELLIGENCE};
use super::edges::Edge;

/// Progress along the fixed connection chain `DT -> AI -> Spatial Intelligence -> ION`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum ChainState {
    #[default]
    None,
    HasDtAi,
    HasAiSi,
    HasSiIon,
}

struct ChainLink {
    trigger: &'static str,
    from: &'static str,
    to: &'static str,
    requires: ChainState,
    next: ChainState,
}

static CHAIN: [ChainLink; 3] = [
    ChainLink {
        trigger: CENTER,
        from: CENTER,
        to: AI,
        requires: ChainState::None,
        next: ChainState::HasDtAi,
    },
    ChainLink {
        trigger: AI,
        from: AI,
        to: SPATIAL_INTELLIGENCE,
        requires: ChainState::HasDtAi,
        next: ChainState::HasAiSi,
    },
    ChainLink {
        trigger: SPATIAL_INTELLIGENCE,
        from: SPATIAL_INTELLIGENCE,
        to: ION,
        requires: ChainState::HasAiSi,
        next: ChainState::HasSiIon,
    },
];

impl ChainState {
    pub fn is_terminal(self) -> bool {
        self == Self::HasSiIon
    }
}

/// Click-driven chain of connections between catalog nodes.
///
/// Edges are kept in creation order, which is also draw order. The connected set
/// only ever grows.
#[derive(Debug, Default)]
pub struct ConnectionGraph {
    state: ChainState,
    edges: Vec<Edge>,
    connected: HashSet<String>,
}

fn anchor_position(anchors: &AnchorRegistry, name: &str) -> Option<DVec3> {
    if name == CENTER {
        Some(DVec3::ZERO)
    } else {
        anchors.lookup(name)
    }
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ChainState {
        self.state
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [Edge] {
        &mut self.edges
    }

    pub fn is_connected(&self, name: &str) -> bool {
        self.connected.contains(name)
    }

    pub fn connected(&self) -> &HashSet<String> {
        &self.connected
    }

    /// Handles a click on `name`. Only the next link of the chain produces an
    /// edge; every other click, or a click whose target anchor is not registered
    /// yet, leaves the graph untouched and returns `None`.
    pub fn trigger(&mut self, name: &str, anchors: &AnchorRegistry) -> Option<&Edge> {
        let Some(link) = CHAIN
            .iter()
            .find(|link| link.trigger == name && link.requires == self.state)
        else {
            log::trace!("ignored trigger {name:?} in state {:?}", self.state);
            return None;
        };

        if self.edges.iter().any(|edge| edge.connects(link.from, link.to)) {
            log::trace!("link {} -> {} already present", link.from, link.to);
            return None;
        }

        let (Some(start), Some(end)) = (
            anchor_position(anchors, link.from),
            anchor_position(anchors, link.to),
        ) else {
            log::trace!("link {} -> {} has no registered anchors yet", link.from, link.to);
            return None;
        };

        self.edges.push(Edge::new(link.from, link.to, start, end));
        self.connected.insert(link.from.to_owned());
        self.connected.insert(link.to.to_owned());
        self.state = link.next;
        log::debug!("connected {} -> {}, chain now {:?}", link.from, link.to, self.state);

        self.edges.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::catalog::NODE_NAMES;
    use crate::scene::layout::fibonacci_sphere;

    fn registered_anchors() -> AnchorRegistry {
        let mut anchors = AnchorRegistry::new();
        anchors.register_all(&NODE_NAMES, &fibonacci_sphere(NODE_NAMES.len(), 2.5));
        anchors
    }

    #[test]
    fn test_center_before_registration_is_noop() {
        let mut graph = ConnectionGraph::new();
        let anchors = AnchorRegistry::new();

        assert!(graph.trigger(CENTER, &anchors).is_none());
        assert!(graph.edges().is_empty());
        assert!(graph.connected().is_empty());
        assert_eq!(graph.state(), ChainState::None);
    }

    #[test]
    fn test_full_chain_in_order() {
        let mut graph = ConnectionGraph::new();
        let anchors = registered_anchors();

        assert!(graph.trigger(CENTER, &anchors).is_some());
        assert!(graph.trigger(AI, &anchors).is_some());
        assert!(graph.trigger(SPATIAL_INTELLIGENCE, &anchors).is_some());

        let pairs = graph
            .edges()
            .iter()
            .map(|edge| (edge.from(), edge.to()))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            vec![
                (CENTER, AI),
                (AI, SPATIAL_INTELLIGENCE),
                (SPATIAL_INTELLIGENCE, ION)
            ]
        );

        let expected = [CENTER, AI, SPATIAL_INTELLIGENCE, ION]
            .into_iter()
            .map(str::to_owned)
            .collect::<HashSet<_>>();
        assert_eq!(graph.connected(), &expected);
        assert!(graph.state().is_terminal());

        assert!(graph.trigger(CENTER, &anchors).is_none());
        assert!(graph.trigger(AI, &anchors).is_none());
        assert_eq!(graph.edges().len(), 3);
    }

    #[test]
    fn test_first_edge_runs_from_origin_to_ai() {
        let mut graph = ConnectionGraph::new();
        let anchors = registered_anchors();
        graph.trigger(CENTER, &anchors);

        let edge = &graph.edges()[0];
        assert_eq!(edge.start(), DVec3::ZERO);
        assert_eq!(Some(edge.end()), anchors.lookup(AI));
    }

    #[test]
    fn test_out_of_order_triggers_are_ignored() {
        let mut graph = ConnectionGraph::new();
        let anchors = registered_anchors();

        assert!(graph.trigger(AI, &anchors).is_none());
        assert!(graph.trigger(SPATIAL_INTELLIGENCE, &anchors).is_none());
        assert!(graph.trigger("Robotics", &anchors).is_none());
        assert!(graph.trigger("unknown", &anchors).is_none());
        assert!(graph.edges().is_empty());

        graph.trigger(CENTER, &anchors);
        assert!(graph.trigger(SPATIAL_INTELLIGENCE, &anchors).is_none());
        assert_eq!(graph.state(), ChainState::HasDtAi);
        assert!(!graph.is_connected(SPATIAL_INTELLIGENCE));
    }

    #[test]
    fn test_missing_target_anchor_keeps_state() {
        let mut graph = ConnectionGraph::new();
        let mut anchors = AnchorRegistry::new();
        anchors.register(AI, DVec3::X);

        graph.trigger(CENTER, &anchors);
        assert!(graph.trigger(AI, &anchors).is_none());
        assert_eq!(graph.state(), ChainState::HasDtAi);

        anchors.register(SPATIAL_INTELLIGENCE, DVec3::Y);
        assert!(graph.trigger(AI, &anchors).is_some());
        assert_eq!(graph.state(), ChainState::HasAiSi);
    }
}
