//! Directed hyperlink graph produced by a crawl.

use petgraph::Direction;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;

/// Pages as vertices, "source links to target" as edges.
///
/// Nodes keep insertion order and edges are never duplicated.
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    index: HashMap<String, NodeIndex>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `url` if absent and return its index.
    pub fn add_node(&mut self, url: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(url) {
            return idx;
        }
        let idx = self.graph.add_node(url.to_string());
        self.index.insert(url.to_string(), idx);
        idx
    }

    /// Add `source -> target`, inserting missing endpoints. Returns false if
    /// the edge was already present.
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let a = self.add_node(source);
        let b = self.add_node(target);
        if self.graph.contains_edge(a, b) {
            return false;
        }
        self.graph.add_edge(a, b, ());
        true
    }

    pub fn contains_node(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        match (self.index.get(source), self.index.get(target)) {
            (Some(&a), Some(&b)) => self.graph.contains_edge(a, b),
            _ => false,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.graph.node_weights().map(String::as_str)
    }

    /// Edges as `(source, target)` pairs in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.graph.edge_references().map(|e| {
            (
                self.graph[e.source()].as_str(),
                self.graph[e.target()].as_str(),
            )
        })
    }

    /// Pages linked from `url`.
    pub fn successors(&self, url: &str) -> Vec<&str> {
        let Some(&idx) = self.index.get(url) else {
            return Vec::new();
        };
        let mut targets: Vec<&str> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        // petgraph walks adjacency newest-first
        targets.reverse();
        targets
    }

    pub fn out_degree(&self, url: &str) -> usize {
        self.index
            .get(url)
            .map(|&idx| self.graph.neighbors_directed(idx, Direction::Outgoing).count())
            .unwrap_or(0)
    }

    /// Graphviz rendering with urls as labels.
    pub fn to_dot(&self) -> String {
        format!("{:?}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }
}

impl Serialize for LinkGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<&str> = self.nodes().collect();
        let edges: Vec<(&str, &str)> = self.edges().collect();
        let mut state = serializer.serialize_struct("LinkGraph", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("edges", &edges)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_are_unique_and_ordered() {
        let mut graph = LinkGraph::new();
        let a = graph.add_node("http://a.com");
        graph.add_node("http://b.com");
        let again = graph.add_node("http://a.com");

        assert_eq!(a, again);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["http://a.com", "http://b.com"]);
    }

    #[test]
    fn test_duplicate_edges_ignored() {
        let mut graph = LinkGraph::new();
        assert!(graph.add_edge("http://a.com", "http://b.com"));
        assert!(!graph.add_edge("http://a.com", "http://b.com"));
        assert!(graph.add_edge("http://b.com", "http://a.com"));

        assert_eq!(graph.edge_count(), 2);
        assert!(graph.contains_edge("http://a.com", "http://b.com"));
        assert!(graph.contains_edge("http://b.com", "http://a.com"));
        assert!(!graph.contains_edge("http://a.com", "http://c.com"));
    }

    #[test]
    fn test_successors_in_insertion_order() {
        let mut graph = LinkGraph::new();
        graph.add_edge("http://a.com", "http://b.com");
        graph.add_edge("http://a.com", "http://c.com");
        graph.add_edge("http://a.com", "http://d.com");

        assert_eq!(
            graph.successors("http://a.com"),
            vec!["http://b.com", "http://c.com", "http://d.com"]
        );
        assert_eq!(graph.out_degree("http://a.com"), 3);
        assert_eq!(graph.out_degree("http://b.com"), 0);
        assert!(graph.successors("http://missing.com").is_empty());
    }

    #[test]
    fn test_self_loop() {
        let mut graph = LinkGraph::new();
        graph.add_edge("http://a.com", "http://a.com");
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edges().collect::<Vec<_>>(), vec![("http://a.com", "http://a.com")]);
    }

    #[test]
    fn test_dot_output_contains_labels() {
        let mut graph = LinkGraph::new();
        graph.add_edge("http://a.com", "http://b.com");
        let dot = graph.to_dot();

        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("http://a.com"));
        assert!(dot.contains("0 -> 1"));
    }

    #[test]
    fn test_serialize_nodes_and_edges() {
        let mut graph = LinkGraph::new();
        graph.add_edge("http://a.com", "http://b.com");

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["nodes"], serde_json::json!(["http://a.com", "http://b.com"]));
        assert_eq!(json["edges"], serde_json::json!([["http://a.com", "http://b.com"]]));
    }
}
