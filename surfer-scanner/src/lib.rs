pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod graph;
pub mod result;

pub use crawler::{Budget, Crawler, ProgressCallback, TraversalMode};
pub use error::ScanError;
pub use extract::extract_links;
pub use fetch::{Fetcher, HttpFetcher, StaticFetcher};
pub use filter::{DEFAULT_SKIP_LIST, LinkFilter, SchemePolicy, is_valid};
pub use graph::LinkGraph;
pub use result::CrawlOutcome;
