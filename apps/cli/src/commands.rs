//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use merchimport_core::csv_parser::{ParseOptions, parse_csv};
use merchimport_core::headers::{missing_headers, unrecognized_headers};
use merchimport_core::templates::{template_csv, template_name, template_path_in};
use merchimport_shared::{
    AppConfig, ImportConfig, ImportKind, MerchImportError, init_config, load_config,
    load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// merchimport — bulk-import merchandising CSV files.
#[derive(Parser)]
#[command(
    name = "merchimport",
    version,
    about = "Turn merchandising CSV files into typed items for dashboard content blocks.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file to use instead of ~/.merchimport/merchimport.toml.
    #[arg(long, global = true, env = "MERCHIMPORT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Parse a CSV file and print the mapped items as JSON.
    Import {
        /// Target content block: best-seller, top-seller, advertisement,
        /// popular-category, or seasonal-category.
        #[arg(short, long)]
        kind: ImportKind,

        /// CSV file to import.
        file: PathBuf,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,

        /// Let quoted fields span line breaks.
        #[arg(long)]
        multiline_quotes: bool,

        /// Print the full import report instead of the bare item list.
        #[arg(long)]
        report: bool,
    },

    /// Check that a CSV file has the headers its content block needs.
    Validate {
        /// Target content block.
        #[arg(short, long)]
        kind: ImportKind,

        /// CSV file to check.
        file: PathBuf,
    },

    /// Print or save the blank CSV template for a content block.
    Template {
        /// Target content block.
        #[arg(short, long)]
        kind: ImportKind,

        /// Write the template to this file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Print only the dashboard asset path of the template.
        #[arg(long)]
        path_only: bool,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so stdout stays
/// clean JSON.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "merchimport=info",
        1 => "merchimport=debug",
        _ => "merchimport=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Import {
            kind,
            file,
            pretty,
            multiline_quotes,
            report,
        } => cmd_import(&config, kind, &file, pretty, multiline_quotes, report),
        Command::Validate { kind, file } => cmd_validate(&config, kind, &file),
        Command::Template {
            kind,
            out,
            path_only,
        } => cmd_template(&config, kind, out.as_deref(), path_only),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    };
    Ok(config)
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

fn cmd_import(
    config: &AppConfig,
    kind: ImportKind,
    file: &Path,
    pretty: bool,
    multiline_quotes: bool,
    report: bool,
) -> Result<()> {
    let mut import_config = ImportConfig::from(config);
    import_config.multiline_quotes |= multiline_quotes;

    info!(%kind, file = %file.display(), "importing CSV");

    let outcome = match merchimport_core::import_file(kind, file, &import_config) {
        Ok(outcome) => outcome,
        Err(e @ MerchImportError::NoValidRows { .. }) => {
            return Err(eyre!(
                "{e} (check that '{}' has a header row and at least one data row)",
                file.display()
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if !outcome.missing_headers.is_empty() {
        eprintln!(
            "warning: missing column(s) {}; those fields were left empty",
            outcome.missing_headers.join(", ")
        );
    }

    let json = match (report, pretty) {
        (true, true) => serde_json::to_string_pretty(&outcome)?,
        (true, false) => serde_json::to_string(&outcome)?,
        (false, true) => serde_json::to_string_pretty(&outcome.items)?,
        (false, false) => serde_json::to_string(&outcome.items)?,
    };
    println!("{json}");

    Ok(())
}

fn cmd_validate(config: &AppConfig, kind: ImportKind, file: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(file).map_err(|e| MerchImportError::io(file, e))?;
    let options = ParseOptions {
        multiline_quotes: config.parser.multiline_quotes,
    };
    let check = check_headers(&raw, kind, &options);

    if !check.unrecognized.is_empty() {
        println!("  Ignored columns: {}", check.unrecognized.join(", "));
    }

    if !check.missing.is_empty() {
        return Err(eyre!(
            "'{}' is missing required column(s) for {kind}: {}",
            file.display(),
            check.missing.join(", ")
        ));
    }

    println!("  {} has every required column for {kind}.", file.display());
    println!("  Data rows: {}", check.data_rows);
    Ok(())
}

/// Header findings for one file, from a single parse.
#[derive(Debug, PartialEq, Eq)]
struct HeaderCheck {
    missing: Vec<String>,
    unrecognized: Vec<String>,
    data_rows: usize,
}

fn check_headers(raw: &str, kind: ImportKind, options: &ParseOptions) -> HeaderCheck {
    let content = raw.trim_start_matches('\u{feff}');
    let rows = parse_csv(content, options);
    let header = rows.first().map(Vec::as_slice).unwrap_or_default();

    HeaderCheck {
        missing: missing_headers(header, kind.required_headers()),
        unrecognized: unrecognized_headers(header, kind),
        data_rows: rows.len().saturating_sub(1),
    }
}

fn cmd_template(
    config: &AppConfig,
    kind: ImportKind,
    out: Option<&Path>,
    path_only: bool,
) -> Result<()> {
    if path_only {
        println!("{}", template_path_in(&config.templates.base_path, kind));
        return Ok(());
    }

    let content = template_csv(kind);
    match out {
        Some(path) => {
            std::fs::write(path, &content).map_err(|e| MerchImportError::io(path, e))?;
            info!(path = %path.display(), template = template_name(kind), "wrote template");
            println!("Template written to: {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn import_kind_parses_from_flag() {
        let cli = Cli::try_parse_from([
            "merchimport",
            "import",
            "--kind",
            "popular-category",
            "subs.csv",
            "--pretty",
        ])
        .expect("parse args");

        match cli.command {
            Command::Import {
                kind, file, pretty, ..
            } => {
                assert_eq!(kind, ImportKind::PopularCategory);
                assert_eq!(file, PathBuf::from("subs.csv"));
                assert!(pretty);
            }
            _ => panic!("expected import command"),
        }
    }

    #[test]
    fn multiline_header_check_uses_the_configured_parse() {
        let content = "\"note\nmore\",p_code\nA,SKU1\n";
        let check = check_headers(
            content,
            ImportKind::BestSeller,
            &ParseOptions {
                multiline_quotes: true,
            },
        );
        assert!(check.missing.is_empty());
        assert_eq!(check.data_rows, 1);

        let line_mode = check_headers(content, ImportKind::BestSeller, &ParseOptions::default());
        assert_eq!(line_mode.missing, vec!["p_code"]);
    }

    #[test]
    fn header_check_strips_bom_and_reports_extras() {
        let content = "\u{feff}P_Code,sku\nSKU1,x\n";
        let check = check_headers(content, ImportKind::TopSeller, &ParseOptions::default());
        assert!(check.missing.is_empty());
        assert_eq!(check.unrecognized, vec!["sku"]);
        assert_eq!(check.data_rows, 1);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let result = Cli::try_parse_from(["merchimport", "template", "--kind", "banner"]);
        assert!(result.is_err());
    }
}
