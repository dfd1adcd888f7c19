use crate::error::{Result, ScanError};
use crate::extract::{extract_links, strip_trailing_slash};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::filter::LinkFilter;
use crate::graph::LinkGraph;
use crate::result::CrawlOutcome;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Called with `(completed, total)` as the visit loop advances.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// How a failed page interacts with the position in the discovery list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraversalMode {
    /// The discovery list is also the worklist. Iteration `i` visits
    /// `nodes[i]`; a failed node is removed in place and `i` still advances,
    /// so the node that slides into its slot is skipped for that round.
    Indexed,
    /// A cursor over the discovery list that only advances past pages that
    /// were expanded. A failure never skips a neighbour.
    #[default]
    Frontier,
}

/// What the target count `n` bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Budget {
    /// Exactly `n` visit attempts, failed ones included.
    #[default]
    Iterations,
    /// Keep visiting until `n` pages were expanded.
    ConfirmedNodes,
}

/// Breadth-first crawler that grows a link graph from a seed page.
pub struct Crawler<F = HttpFetcher> {
    fetcher: F,
    filter: LinkFilter,
    mode: TraversalMode,
    budget: Budget,
    progress_callback: Option<ProgressCallback>,
}

impl<F: Fetcher> Crawler<F> {
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            filter: LinkFilter::default(),
            mode: TraversalMode::default(),
            budget: Budget::default(),
            progress_callback: None,
        }
    }

    pub fn with_filter(mut self, filter: LinkFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawl outward from `root` and return the first `n` discovered pages
    /// together with the links between them.
    ///
    /// Pages that fail to fetch or parse are recorded in
    /// [`CrawlOutcome::bad_links`] and never become nodes. Only malformed
    /// input (a seed without a scheme, or `n == 0`) is returned as an error,
    /// before anything is fetched.
    pub async fn crawl(&self, root: &str, n: usize) -> Result<CrawlOutcome> {
        let root = validate_seed(root)?;
        if n == 0 {
            return Err(ScanError::InvalidNodeCount(n));
        }

        info!("Starting crawl of {} for {} nodes ({:?}, {:?})", root, n, self.mode, self.budget);

        let mut nodes: Vec<String> = vec![root.clone()];
        let mut known: HashSet<String> = HashSet::from([root.clone()]);
        let mut edges: Vec<(String, String)> = Vec::new();
        let mut seen_edges: HashSet<(String, String)> = HashSet::new();
        let mut bad_links: Vec<String> = Vec::new();

        let mut iterations = 0;
        let mut confirmed = 0;
        // Position in `nodes` of the next page to visit.
        let mut cursor = 0;

        loop {
            let done = match self.budget {
                Budget::Iterations => iterations >= n,
                Budget::ConfirmedNodes => confirmed >= n,
            };
            if done {
                break;
            }
            let Some(link) = nodes.get(cursor).cloned() else {
                debug!("Frontier exhausted after {} iterations", iterations);
                break;
            };

            self.report_progress(self.progress_position(iterations, confirmed), n);
            iterations += 1;

            match self.fetch_page_links(&link).await {
                Ok(page_links) => {
                    confirmed += 1;
                    cursor += 1;

                    let mut added = 0;
                    for target in &page_links {
                        if known.insert(target.clone()) {
                            nodes.push(target.clone());
                            added += 1;
                        }
                        let edge = (link.clone(), target.clone());
                        if seen_edges.insert(edge.clone()) {
                            edges.push(edge);
                        }
                    }
                    debug!("{}: {} links, {} new", link, page_links.len(), added);
                }
                Err(e) => {
                    warn!("bad link: {} ({})", link, e);
                    nodes.remove(cursor);
                    bad_links.push(link);
                    if self.mode == TraversalMode::Indexed {
                        cursor += 1;
                    }
                }
            }
        }

        self.report_progress(n, n);

        nodes.truncate(n);
        let graph = build_graph(&nodes, &edges);

        info!(
            "Crawl complete. {} nodes, {} edges, {} bad links in {} iterations",
            graph.node_count(),
            graph.edge_count(),
            bad_links.len(),
            iterations
        );

        Ok(CrawlOutcome {
            root,
            target: n,
            nodes,
            graph,
            bad_links,
            iterations,
        })
    }

    /// Fetch `url` and return its extracted links that pass the filter.
    async fn fetch_page_links(&self, url: &str) -> Result<Vec<String>> {
        let body = self.fetcher.fetch(url).await?;
        let links = extract_links(url, &body)?;
        Ok(links
            .into_iter()
            .filter(|l| self.filter.is_valid(l))
            .collect())
    }

    fn progress_position(&self, iterations: usize, confirmed: usize) -> usize {
        match self.budget {
            Budget::Iterations => iterations,
            Budget::ConfirmedNodes => confirmed,
        }
    }

    fn report_progress(&self, completed: usize, total: usize) {
        if let Some(ref callback) = self.progress_callback {
            callback(completed, total);
        }
    }
}

/// Check that `root` is an absolute url and normalise its trailing slash.
fn validate_seed(root: &str) -> Result<String> {
    let parsed = Url::parse(root).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", root, e)))?;
    if parsed.cannot_be_a_base() {
        return Err(ScanError::InvalidUrl(format!("{}: not a web address", root)));
    }
    Ok(strip_trailing_slash(root).to_string())
}

/// Restrict the edge list to pages that survived truncation.
fn build_graph(nodes: &[String], edges: &[(String, String)]) -> LinkGraph {
    let mut graph = LinkGraph::new();
    for node in nodes {
        graph.add_node(node);
    }
    for (source, target) in edges {
        if graph.contains_node(source) && graph.contains_node(target) {
            graph.add_edge(source, target);
        }
    }
    graph
}
