//! Conversion graph and shortest-path search
//!
//! The graph is a throwaway view over a slice of edges: nodes are unit
//! names, and each node's outgoing edges keep registration order. Search is
//! breadth-first, so a path has the fewest possible hops, and among equally
//! short paths the one through the earliest registered edges wins.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use crate::conversion::Edge;

/// One step of a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

/// An ordered chain of hops from a source node to a target node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<'a> {
    hops: Vec<Hop<'a>>,
}

impl<'a> Path<'a> {
    pub fn hops(&self) -> &[Hop<'a>] {
        &self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.hops.first() else {
            return Ok(());
        };
        write!(f, "{}", first.from)?;
        for hop in &self.hops {
            write!(f, " -> {}", hop.to)?;
        }
        Ok(())
    }
}

/// Directed graph of unit names
#[derive(Debug, Default)]
pub struct ConversionGraph<'a> {
    adjacency: HashMap<&'a str, Vec<&'a str>>,
    edge_count: usize,
}

impl<'a> ConversionGraph<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from edges, keeping their order
    pub fn from_edges<E: Edge>(edges: &'a [E]) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.source(), edge.target());
        }
        graph
    }

    /// Add a directed edge; repeating an existing edge changes nothing
    pub fn add_edge(&mut self, from: &'a str, to: &'a str) {
        self.adjacency.entry(to).or_default();
        let targets = self.adjacency.entry(from).or_default();
        if !targets.contains(&to) {
            targets.push(to);
            self.edge_count += 1;
        }
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Breadth-first search for the shortest path from `from` to `to`
    ///
    /// There is no implicit zero-hop path: when `from == to` a path exists
    /// only through a registered self-loop, never through a longer cycle.
    pub fn find_path(&self, from: &str, to: &str) -> Option<Path<'a>> {
        let (&start, targets) = self.adjacency.get_key_value(from)?;

        if from == to {
            return targets.iter()
                .find(|&&next| next == start)
                .map(|&next| Path { hops: vec![Hop { from: start, to: next }] });
        }

        let mut parent: HashMap<&'a str, &'a str> = HashMap::new();
        let mut visited: HashSet<&'a str> = HashSet::new();
        let mut queue: VecDeque<&'a str> = VecDeque::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(node) = queue.pop_front() {
            let Some(targets) = self.adjacency.get(node) else {
                continue;
            };
            for &next in targets {
                if next == to {
                    return Some(Self::trace(&parent, node, next));
                }
                if visited.insert(next) {
                    parent.insert(next, node);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Walk parent links back from the final hop
    fn trace(parent: &HashMap<&'a str, &'a str>, last_from: &'a str, last_to: &'a str) -> Path<'a> {
        let mut hops = vec![Hop { from: last_from, to: last_to }];
        let mut current = last_from;
        while let Some(&prev) = parent.get(current) {
            hops.push(Hop { from: prev, to: current });
            current = prev;
        }
        hops.reverse();
        Path { hops }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct E(&'static str, &'static str);

    impl Edge for E {
        fn source(&self) -> &str {
            self.0
        }
        fn target(&self) -> &str {
            self.1
        }
    }

    fn names<'a>(path: &Path<'a>) -> Vec<(&'a str, &'a str)> {
        path.hops().iter().map(|h| (h.from, h.to)).collect()
    }

    #[test]
    fn test_direct_edge() {
        let edges = [E("a", "b")];
        let graph = ConversionGraph::from_edges(&edges);
        let path = graph.find_path("a", "b").unwrap();
        assert_eq!(names(&path), vec![("a", "b")]);
    }

    #[test]
    fn test_directed() {
        let edges = [E("a", "b")];
        let graph = ConversionGraph::from_edges(&edges);
        assert!(graph.find_path("b", "a").is_none());
    }

    #[test]
    fn test_tie_break_by_registration_order() {
        let edges = [E("a", "b"), E("b", "c"), E("a", "d"), E("d", "c")];
        let graph = ConversionGraph::from_edges(&edges);
        let path = graph.find_path("a", "c").unwrap();
        assert_eq!(names(&path), vec![("a", "b"), ("b", "c")]);

        // Same edges, D route registered first
        let edges = [E("a", "d"), E("d", "c"), E("a", "b"), E("b", "c")];
        let graph = ConversionGraph::from_edges(&edges);
        let path = graph.find_path("a", "c").unwrap();
        assert_eq!(names(&path), vec![("a", "d"), ("d", "c")]);
    }

    #[test]
    fn test_fewest_hops_wins_over_registration_order() {
        let edges = [E("a", "b"), E("b", "c"), E("c", "d"), E("a", "d")];
        let graph = ConversionGraph::from_edges(&edges);
        let path = graph.find_path("a", "d").unwrap();
        assert_eq!(names(&path), vec![("a", "d")]);
    }

    #[test]
    fn test_no_implicit_identity() {
        let edges = [E("a", "b"), E("b", "a")];
        let graph = ConversionGraph::from_edges(&edges);
        // A round trip is not a self-conversion
        assert!(graph.find_path("a", "a").is_none());
        assert!(graph.find_path("b", "b").is_none());

        let edges = [E("a", "b")];
        let graph = ConversionGraph::from_edges(&edges);
        assert!(graph.find_path("a", "a").is_none());
    }

    #[test]
    fn test_self_loop() {
        let edges = [E("a", "b"), E("b", "a"), E("a", "a")];
        let graph = ConversionGraph::from_edges(&edges);
        let path = graph.find_path("a", "a").unwrap();
        assert_eq!(names(&path), vec![("a", "a")]);
        assert!(graph.find_path("b", "b").is_none());
    }

    #[test]
    fn test_unknown_nodes() {
        let edges = [E("a", "b")];
        let graph = ConversionGraph::from_edges(&edges);
        assert!(graph.find_path("x", "b").is_none());
        assert!(graph.find_path("a", "x").is_none());
    }

    #[test]
    fn test_cycle_terminates() {
        let edges = [E("a", "b"), E("b", "c"), E("c", "a"), E("x", "y")];
        let graph = ConversionGraph::from_edges(&edges);
        assert!(graph.find_path("a", "y").is_none());
    }

    #[test]
    fn test_long_chain() {
        let edges = [E("a", "b"), E("b", "c"), E("c", "d"), E("d", "e")];
        let graph = ConversionGraph::from_edges(&edges);
        let path = graph.find_path("a", "e").unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.to_string(), "a -> b -> c -> d -> e");
    }

    #[test]
    fn test_duplicate_edges_counted_once() {
        let edges = [E("a", "b"), E("a", "b"), E("b", "a")];
        let graph = ConversionGraph::from_edges(&edges);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.contains("b"));
    }
}
