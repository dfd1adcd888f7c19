use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use surfer_core::crawl::{CrawlOptions, execute_crawl};
use surfer_core::report::{ReportFormat, render_report, save_report};
use surfer_scanner::{Budget, LinkFilter, SchemePolicy, TraversalMode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Banner goes to stderr; stdout carries only the report.
pub fn print_banner() {
    eprintln!(
        "{}",
        r#"
  ___ _   _ _ __ / _| ___ _ __
 / __| | | | '__| |_ / _ \ '__|
 \__ \ |_| | |  |  _|  __/ |
 |___/\__,_|_|  |_|  \___|_|
"#
        .bright_blue()
        .bold()
    );
}

// Helper functions for crawl handler

/// Load a newline-delimited exclusion list. Blank lines and `#` comments are ignored.
pub fn load_skip_list(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read skip list {}", path.display()))?;

    let entries: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    debug!("Loaded {} skip entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Assemble the link filter from the crawl flags
pub fn build_filter(
    allow_https: bool,
    extra_skips: &[String],
    skip_list_file: Option<&Path>,
) -> Result<LinkFilter> {
    let scheme = if allow_https {
        SchemePolicy::HttpOrHttps
    } else {
        SchemePolicy::HttpOnly
    };

    let mut filter = LinkFilter::new().with_scheme(scheme);
    if let Some(path) = skip_list_file {
        filter = filter.with_skip_list(load_skip_list(path)?);
    }
    Ok(filter.extend_skip_list(extra_skips.iter().cloned()))
}

pub fn parse_mode(value: &str) -> Result<TraversalMode> {
    match value {
        "frontier" => Ok(TraversalMode::Frontier),
        "indexed" => Ok(TraversalMode::Indexed),
        other => Err(anyhow!("Unknown traversal mode '{}'", other)),
    }
}

pub fn parse_budget(value: &str) -> Result<Budget> {
    match value {
        "iterations" => Ok(Budget::Iterations),
        "nodes" => Ok(Budget::ConfirmedNodes),
        other => Err(anyhow!("Unknown budget '{}'", other)),
    }
}

/// Expand `~` in a user supplied path
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

/// Translate parsed `crawl` arguments into crawl options
pub fn crawl_options_from_args(args: &ArgMatches, quiet: bool) -> Result<CrawlOptions> {
    let url = args
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let nodes = *args.get_one::<usize>("nodes").unwrap_or(&100);
    let mode = parse_mode(args.get_one::<String>("mode").map_or("frontier", String::as_str))?;
    let budget = parse_budget(
        args.get_one::<String>("budget")
            .map_or("iterations", String::as_str),
    )?;
    let extra_skips: Vec<String> = args
        .get_many::<String>("skip")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let skip_list_file = args
        .get_one::<PathBuf>("skip-list")
        .map(|p| expand_path(&p.to_string_lossy()));
    let filter = build_filter(
        args.get_flag("allow-https"),
        &extra_skips,
        skip_list_file.as_deref(),
    )?;

    let mut options = CrawlOptions::new(url.as_str(), nodes);
    options.mode = mode;
    options.budget = budget;
    options.filter = filter;
    options.timeout_secs = *args.get_one::<u64>("timeout").unwrap_or(&10);
    options.show_progress_bar = !quiet;
    Ok(options)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. from tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn handle_crawl(sub_matches: &ArgMatches, quiet: bool) -> Result<()> {
    // Initialize tracing for logging
    init_tracing();

    let options = crawl_options_from_args(sub_matches, quiet)?;
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let output = sub_matches.get_one::<String>("output").map(|p| expand_path(p));

    if !quiet {
        eprintln!("\n🕸️  Surfing from {}", options.url.bright_white());
        eprintln!("Nodes: {}", options.nodes);
        eprintln!("Mode: {:?}, budget: {:?}", options.mode, options.budget);
        let scheme = match options.filter.scheme() {
            SchemePolicy::HttpOnly => "http only",
            SchemePolicy::HttpOrHttps => "http and https",
        };
        eprintln!("Schemes: {}\n", scheme);
    }

    let outcome = execute_crawl(options).await.context("Crawl failed")?;

    if !quiet {
        eprintln!(
            "\n{} Crawl complete! {} nodes, {} edges, {} bad links\n",
            "✓".green().bold(),
            outcome.node_count(),
            outcome.edge_count(),
            outcome.bad_links.len()
        );
    }

    let report = render_report(&outcome, format).context("Failed to render report")?;

    match output {
        Some(path) => {
            save_report(&report, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                eprintln!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}
