pub mod crawl;
pub mod report;

pub use crawl::{CrawlOptions, execute_crawl, execute_crawl_with};
pub use report::{ReportFormat, render_report, save_report};
