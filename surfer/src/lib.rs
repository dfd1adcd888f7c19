pub mod commands;

// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{build_filter, expand_path, load_skip_list, parse_budget, parse_mode};

// Re-export crawl functionality from surfer-core
pub use surfer_core::crawl::{CrawlOptions, execute_crawl};
pub use surfer_core::report::{ReportFormat, render_report};
