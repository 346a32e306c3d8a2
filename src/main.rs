//! catalog-search CLI
//!
//! Interactive search UI by default; `search` runs one query and prints the
//! hits.

use catalog_search::{
    logging, AppConfig, ConfigOverrides, Highlighter, HttpCatalog, Product, SearchController,
};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the one-shot mode waits for the catalog
const ONE_SHOT_TIMEOUT: Duration = Duration::from_secs(60);

/// catalog-search - Debounced product search
///
/// Type to search a remote product catalog; matches are highlighted inline.
#[derive(Parser)]
#[command(name = "catalog-search")]
#[command(version)]
#[command(about = "Debounced product catalog search", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Search endpoint (the query is sent as ?q=)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Debounce delay in milliseconds
    #[arg(long = "delay-ms", global = true)]
    delay_ms: Option<u64>,

    /// Log file (default: catalog-search.log next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one search and print the results
    Search {
        /// Search text (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Print the raw products as JSON
        #[arg(long)]
        json: bool,

        /// Maximum results to print
        #[arg(short, long)]
        max: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> catalog_search::Result<()> {
    let config = AppConfig::load_or_default(cli.config.as_deref())?.with_overrides(
        ConfigOverrides {
            endpoint: cli.endpoint,
            debounce_ms: cli.delay_ms,
            log_file: cli.log_file,
        },
    );
    config.validate()?;

    // Printed before the TUI takes over the terminal
    let log_path = logging::init(config.log_file.as_deref(), &config.log_filter);
    eprintln!("{}", log_banner(log_path.as_deref()));

    let catalog = Arc::new(HttpCatalog::new(config.endpoint.clone())?);
    tracing::info!(
        target: "main",
        version = catalog_search::VERSION,
        endpoint = catalog.endpoint(),
        delay_ms = config.debounce_ms,
        "catalog-search starting up"
    );

    match cli.command {
        None => catalog_search::tui::run(&config, catalog),
        Some(Commands::Search { query, json, max }) => {
            cmd_search(&config, catalog, &query, json, max)
        }
    }
}

fn log_banner(path: Option<&Path>) -> String {
    match path {
        Some(p) => format!("{} Logging to: {}", style("→").cyan().bold(), p.display()),
        None => format!(
            "{} Log file could not be opened; logging is disabled",
            style("Warning:").yellow().bold()
        ),
    }
}

/// One-shot search: same controller flow, without waiting out the debounce
fn cmd_search(
    config: &AppConfig,
    catalog: Arc<HttpCatalog>,
    query: &str,
    json: bool,
    max: Option<usize>,
) -> catalog_search::Result<()> {
    let mut controller = SearchController::new(catalog, config.debounce_delay(), Instant::now());
    controller.set_query(query, Instant::now());
    controller.flush();

    let spinner = ProgressBar::new_spinner();
    if !json {
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Searching for '{}'...", query));
        spinner.enable_steady_tick(Duration::from_millis(80));
    }

    let settled = controller.wait_idle(ONE_SHOT_TIMEOUT);
    spinner.finish_and_clear();

    if !settled {
        tracing::warn!(target: "main", query, "search did not complete in time");
    }

    let limit = max.unwrap_or(usize::MAX);
    let products: Vec<&Product> = controller.results().iter().take(limit).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    print_products(controller.query(), &products, controller.total());
    Ok(())
}

fn print_products(query: &str, products: &[&Product], total: Option<u64>) {
    if products.is_empty() {
        println!("{} No results for '{}'", style("→").cyan().bold(), style(query).yellow());
        return;
    }

    let shown = products.len();
    let total_str = match total {
        Some(t) if t as usize > shown => format!(" (of {})", t),
        _ => String::new(),
    };
    println!(
        "Found {}{} results for '{}':",
        style(shown).green(),
        total_str,
        style(query).yellow()
    );
    println!();

    let highlighter = Highlighter::new(query);
    for (i, product) in products.iter().enumerate() {
        println!(
            "  {} {}",
            style(format!("{:3}.", i + 1)).dim(),
            styled(&highlighter, &product.title, true)
        );
        println!("       {}", styled(&highlighter, &product.description, false));
        println!("       {}", style(&product.thumbnail).dim().italic());
    }
}

/// Render `text` with query matches marked
fn styled(highlighter: &Highlighter, text: &str, bold: bool) -> String {
    highlighter
        .segments(text)
        .iter()
        .map(|seg| {
            let s = if seg.emphasized {
                style(seg.text).black().on_yellow().bold()
            } else if bold {
                style(seg.text).bold()
            } else {
                style(seg.text)
            };
            s.to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_the_log_file() {
        let raw = log_banner(Some(Path::new("/tmp/catalog-search.log")));
        let banner = console::strip_ansi_codes(&raw).into_owned();
        assert_eq!(banner, "→ Logging to: /tmp/catalog-search.log");
    }

    #[test]
    fn banner_warns_when_logging_is_off() {
        let banner = console::strip_ansi_codes(&log_banner(None)).into_owned();
        assert!(banner.starts_with("Warning:"));
        assert!(banner.contains("logging is disabled"));
    }

    #[test]
    fn search_subcommand_parses() {
        let cli = Cli::try_parse_from([
            "catalog-search",
            "--delay-ms",
            "50",
            "search",
            "phone",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.delay_ms, Some(50));
        assert!(matches!(
            cli.command,
            Some(Commands::Search { ref query, json: true, max: None }) if query == "phone"
        ));
    }
}
