// Report generation from a finished crawl

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use surfer_scanner::CrawlOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Dot,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            _ => None,
        }
    }
}

/// Render `outcome` in the requested format.
pub fn render_report(
    outcome: &CrawlOutcome,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(outcome)),
        ReportFormat::Json => generate_json_report(outcome),
        ReportFormat::Dot => Ok(generate_dot_report(outcome)),
    }
}

pub fn generate_text_report(outcome: &CrawlOutcome) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Seed: {}\n", outcome.root));
    report.push_str(&format!(
        "  Nodes: {} of {} requested\n",
        outcome.node_count(),
        outcome.target
    ));
    report.push_str(&format!("  Edges: {}\n", outcome.edge_count()));
    report.push_str(&format!("  Bad links: {}\n", outcome.bad_links.len()));
    report.push_str(&format!("  Iterations: {}\n", outcome.iterations));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    report.push_str("## Nodes\n");
    for (idx, node) in outcome.nodes.iter().enumerate() {
        report.push_str(&format!(
            "  {:>4}  {} ({} out)\n",
            idx,
            node,
            outcome.graph.out_degree(node)
        ));
    }

    if !outcome.bad_links.is_empty() {
        report.push_str("\n## Bad links\n");
        for link in &outcome.bad_links {
            report.push_str(&format!("  {}\n", link));
        }
    }
    report.push('\n');

    report
}

pub fn generate_json_report(outcome: &CrawlOutcome) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Surfer",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "crawl": {
                "root": outcome.root,
                "target": outcome.target,
                "iterations": outcome.iterations
            },
            "summary": {
                "total_nodes": outcome.node_count(),
                "total_edges": outcome.edge_count(),
                "total_bad_links": outcome.bad_links.len()
            },
            "nodes": outcome.nodes,
            "graph": outcome.graph,
            "bad_links": outcome.bad_links
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn generate_dot_report(outcome: &CrawlOutcome) -> String {
    outcome.graph.to_dot()
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
