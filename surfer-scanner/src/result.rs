use crate::graph::LinkGraph;
use serde::Serialize;

/// Everything a finished crawl produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlOutcome {
    /// The normalised seed url.
    pub root: String,
    /// The requested node count.
    pub target: usize,
    /// Discovered pages in discovery order, truncated to the target count.
    pub nodes: Vec<String>,
    /// Links between the pages in `nodes`.
    pub graph: LinkGraph,
    /// Pages that failed to fetch or parse, in the order they failed.
    pub bad_links: Vec<String>,
    /// Visit attempts made, failed ones included.
    pub iterations: usize,
}

impl CrawlOutcome {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
