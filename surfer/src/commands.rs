use clap::{arg, command};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("surfer")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("surfer")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and progress output")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl breadth-first from a seed page and map the hyperlink graph of the \
                first N pages discovered.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(true)
                        .help("The seed URL, including its scheme (e.g. http://example.com)"),
                )
                .arg(
                    arg!(-n --"nodes" <N>)
                        .required(false)
                        .help("Number of nodes to collect")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("100"),
                )
                .arg(
                    arg!(--"mode" <MODE>)
                        .required(false)
                        .help(
                            "How a failed page affects the visit order: 'frontier' never skips a \
                        neighbour, 'indexed' reproduces the classic list-index walk",
                        )
                        .value_parser(["frontier", "indexed"])
                        .default_value("frontier"),
                )
                .arg(
                    arg!(--"budget" <BUDGET>)
                        .required(false)
                        .help(
                            "What N bounds: 'iterations' counts every visit attempt, 'nodes' \
                        counts successfully expanded pages",
                        )
                        .value_parser(["iterations", "nodes"])
                        .default_value("iterations"),
                )
                .arg(
                    arg!(--"allow-https")
                        .required(false)
                        .help("Accept https:// links as well as http:// links")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(--"skip" <SUBSTRING>)
                        .required(false)
                        .help("Exclude links containing this substring (repeatable)")
                        .action(clap::ArgAction::Append),
                )
                .arg(
                    arg!(--"skip-list" <PATH>)
                        .required(false)
                        .help("Newline-delimited file of substrings replacing the default exclusion list")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64).range(1..))
                        .default_value("10"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, dot")
                        .value_parser(["text", "json", "dot"])
                        .default_value("text"),
                ),
        )
}
