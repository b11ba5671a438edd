use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cmdline_options_catalog::{CatalogFile, CatalogSet};
use cmdline_options_core::{CommandLine, Dialect, DialectKind, ParseSettings};
use serde::Serialize;
use tracing::debug;

/// Dialect names accepted on the command line.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliDialect {
    Posix,
    Gnu,
}

impl From<CliDialect> for DialectKind {
    fn from(dialect: CliDialect) -> Self {
        match dialect {
            CliDialect::Posix => Self::Posix,
            CliDialect::Gnu => Self::Gnu,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "cmdline-parse")]
#[command(about = "Parse command lines against declarative option catalogs")]
struct Cli {
    /// Log parser decisions to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the arguments after `--` against a catalog and print the result.
    Parse(ParseArgs),
    /// Validate catalog files and/or directories of catalog files.
    Check(CheckArgs),
    /// Rewrite a catalog in another format (picked from the output extension).
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Catalog file (.yaml, .yml or .json).
    #[arg(long)]
    catalog: PathBuf,
    /// Dialect to use instead of the catalog's.
    #[arg(long)]
    dialect: Option<CliDialect>,
    /// Stop option processing at the first non-option argument.
    #[arg(long)]
    stop_at_non_option: bool,
    /// Accept unique prefixes of long option names.
    #[arg(long)]
    partial_matching: bool,
    /// Keep surrounding double quotes on option values.
    #[arg(long)]
    keep_quotes: bool,
    /// Default for an option not given on the command line (repeatable).
    #[arg(long = "property", value_name = "KEY=VALUE", value_parser = parse_property)]
    properties: Vec<(String, String)>,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to parse.
    #[arg(last = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Catalog files and/or directories containing catalog files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct ConvertArgs {
    /// Catalog to read.
    #[arg(long)]
    catalog: PathBuf,
    /// Output path; `.json`, `.yaml` or `.yml`.
    #[arg(long)]
    output: PathBuf,
}

/// Why a subcommand failed.
#[derive(Debug)]
enum Failure {
    /// The parsed arguments were rejected by the catalog.
    Rejected(String),
    Other(String),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Rejected(_) => 2,
            Failure::Other(_) => 1,
        }
    }
}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::Other(message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Rejected(message) | Failure::Other(message) => f.write_str(message),
        }
    }
}

#[derive(Debug, Serialize)]
struct ParseOutput<'a> {
    #[serde(skip_serializing_if = "str::is_empty")]
    catalog: &'a str,
    dialect: &'static str,
    options: Vec<OptionOutput<'a>>,
    args: &'a [String],
}

#[derive(Debug, Serialize)]
struct OptionOutput<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    values: &'a [String],
}

impl<'a> ParseOutput<'a> {
    fn new(file: &'a CatalogFile, dialect: DialectKind, cmd: &'a CommandLine) -> Self {
        Self {
            catalog: &file.name,
            dialect: dialect.name(),
            options: cmd
                .options()
                .iter()
                .map(|parsed| OptionOutput {
                    name: parsed.option.key(),
                    values: &parsed.values,
                })
                .collect(),
            args: cmd.args(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Parse(args) => run_parse(args),
        Command::Check(args) => run_check(args),
        Command::Convert(args) => run_convert(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

fn run_parse(args: ParseArgs) -> Result<(), Failure> {
    let file = load_catalog(&args.catalog)?;
    let options = file.to_options().map_err(|e| e.to_string())?;

    let dialect = args.dialect.map(DialectKind::from).unwrap_or(file.dialect);
    let settings = ParseSettings {
        stop_at_non_option: file.settings.stop_at_non_option || args.stop_at_non_option,
        partial_matching: file.settings.partial_matching || args.partial_matching,
        strip_quotes: file.settings.strip_quotes && !args.keep_quotes,
    };
    debug!(
        catalog = %args.catalog.display(),
        dialect = dialect.name(),
        properties = args.properties.len(),
        "Running parse"
    );

    let parser = cmdline_options_core::Parser::new(dialect).with_settings(settings);
    let properties = args.properties.iter().map(|(key, value)| (key, value));
    let cmd = parser
        .parse_with_properties(&options, &args.args, properties)
        .map_err(|e| Failure::Rejected(e.to_string()))?;

    let output = ParseOutput::new(&file, dialect, &cmd);
    let text = match args.format {
        CliOutputFormat::Json => serde_json::to_string_pretty(&output)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(&output)
            .map_err(|e| format!("Failed to serialize output: {e}"))?,
    };
    println!("{}", text.trim_end());
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<(), Failure> {
    let mut checked = 0usize;
    let mut problems = Vec::new();

    for input in &args.inputs {
        if input.is_dir() {
            let set = CatalogSet::from_dir(input)
                .map_err(|e| format!("Failed to load '{}': {e}", input.display()))?;
            for name in set.names() {
                if let Some(file) = set.get(name) {
                    checked += 1;
                    if let Err(err) = file.to_options() {
                        problems.push(format!("{}/{name}: {err}", input.display()));
                    }
                }
            }
        } else {
            let file = load_catalog(input)?;
            checked += 1;
            if let Err(err) = file.to_options() {
                problems.push(format!("{}: {err}", input.display()));
            }
        }
    }

    if !problems.is_empty() {
        return Err(Failure::Other(problems.join("\n")));
    }
    println!("Checked {checked} catalog(s).");
    Ok(())
}

fn run_convert(args: ConvertArgs) -> Result<(), Failure> {
    let file = load_catalog(&args.catalog)?;
    file.to_options().map_err(|e| e.to_string())?;
    file.save(&args.output)
        .map_err(|e| format!("Failed to write '{}': {e}", args.output.display()))?;
    println!(
        "Wrote '{}' ({} option(s), {} group(s)).",
        args.output.display(),
        file.options.len(),
        file.groups.len()
    );
    Ok(())
}

fn load_catalog(path: &Path) -> Result<CatalogFile, String> {
    CatalogFile::load(path).map_err(|e| format!("Failed to load '{}': {e}", path.display()))
}

fn parse_property(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}
