use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use surfer_scanner::{
    Budget, CrawlOutcome, Crawler, Fetcher, HttpFetcher, LinkFilter, ScanError, TraversalMode,
};
use tracing::info;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub nodes: usize,
    pub mode: TraversalMode,
    pub budget: Budget,
    pub filter: LinkFilter,
    pub timeout_secs: u64,
    pub show_progress_bar: bool,
}

impl CrawlOptions {
    pub fn new(url: impl Into<String>, nodes: usize) -> Self {
        Self {
            url: url.into(),
            nodes,
            mode: TraversalMode::default(),
            budget: Budget::default(),
            filter: LinkFilter::default(),
            timeout_secs: 10,
            show_progress_bar: false,
        }
    }
}

/// Textual `[====      ] 40%` bar sized to the node target.
fn progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:20}] {percent}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("= "),
    );
    pb
}

/// Execute a crawl over HTTP with the given options
pub async fn execute_crawl(options: CrawlOptions) -> Result<CrawlOutcome, ScanError> {
    let fetcher = HttpFetcher::with_timeout(options.timeout_secs)?;
    execute_crawl_with(fetcher, options).await
}

/// Execute a crawl using `fetcher` as the transport
pub async fn execute_crawl_with<F: Fetcher>(
    fetcher: F,
    options: CrawlOptions,
) -> Result<CrawlOutcome, ScanError> {
    let CrawlOptions {
        url,
        nodes,
        mode,
        budget,
        filter,
        show_progress_bar,
        ..
    } = options;

    let mut crawler = Crawler::with_fetcher(fetcher)
        .with_filter(filter)
        .with_mode(mode)
        .with_budget(budget);

    let progress = show_progress_bar.then(|| Arc::new(progress_bar(nodes)));
    if let Some(ref pb) = progress {
        let pb_clone = pb.clone();
        crawler = crawler.with_progress_callback(Arc::new(move |done: usize, _total: usize| {
            pb_clone.set_position(done as u64);
        }));
    }

    let result = crawler.crawl(&url, nodes).await;

    if let Some(ref pb) = progress {
        match result {
            Ok(ref outcome) => pb.finish_with_message(format!(
                "{} nodes, {} bad links",
                outcome.node_count(),
                outcome.bad_links.len()
            )),
            Err(_) => pb.abandon(),
        }
    }

    if let Ok(ref outcome) = result {
        info!(
            "{} yielded {} of {} requested nodes",
            outcome.root,
            outcome.node_count(),
            outcome.target
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfer_scanner::StaticFetcher;

    #[tokio::test]
    async fn test_execute_crawl_with_static_pages() {
        let fetcher = StaticFetcher::new()
            .with_page("http://r.com", r#"<a href="http://a.com">a</a>"#)
            .with_page("http://a.com", "<p>leaf</p>");

        let outcome = execute_crawl_with(fetcher, CrawlOptions::new("http://r.com", 2))
            .await
            .unwrap();

        assert_eq!(outcome.nodes, vec!["http://r.com", "http://a.com"]);
        assert_eq!(outcome.edge_count(), 1);
    }

    #[tokio::test]
    async fn test_execute_crawl_with_progress_bar_enabled() {
        let fetcher = StaticFetcher::new().with_page("http://r.com", "<p>alone</p>");
        let mut options = CrawlOptions::new("http://r.com", 3);
        options.show_progress_bar = true;

        let outcome = execute_crawl_with(fetcher, options).await.unwrap();
        assert_eq!(outcome.nodes, vec!["http://r.com"]);
    }

    #[tokio::test]
    async fn test_malformed_input_surfaces() {
        let err = execute_crawl_with(StaticFetcher::new(), CrawlOptions::new("nope", 3))
            .await
            .unwrap_err();
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_options_defaults() {
        let options = CrawlOptions::new("http://r.com", 7);
        assert_eq!(options.nodes, 7);
        assert_eq!(options.mode, TraversalMode::Frontier);
        assert_eq!(options.budget, Budget::Iterations);
        assert_eq!(options.timeout_secs, 10);
        assert!(!options.show_progress_bar);
    }
}
