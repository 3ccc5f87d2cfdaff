//! Command-line interface for parsekit
//!
//! Runs the S-expression sample grammar over a file (or stdin) and prints the
//! token stream or the resulting tree.
//!
//! Usage:
//!   parsekit tokens `<path>` [--format `<format>`]  - Print the token stream
//!   parsekit tree `<path>` [--format `<format>`]    - Print the syntax tree
//!   parsekit formats                            - List available output formats
//!
//! A path of `-` reads from stdin.

use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgMatches, Command};
use parsekit::config::{ConfigError, Loader, ParsekitConfig};
use parsekit::formats::{self, FormatError, TokenFormat, TreeFormat};
use parsekit::grammars::sexp;
use parsekit::logging::{self, LoggingError};
use std::io::{self, BufWriter, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("cannot read {path}: {source}")]
    Input {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    let matches = Command::new("parsekit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tokenize and parse S-expressions with the parsekit toolkit")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Configuration file layered over the built-in defaults"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .help("Log verbosity (off, error, warn, info, debug, trace)"),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream")
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(PossibleValuesParser::new(
                            TokenFormat::ALL.map(|format| format.name()),
                        ))
                        .help("Output format (defaults to output.tokens from the config)"),
                ),
        )
        .subcommand(
            Command::new("tree")
                .about("Print the syntax tree")
                .arg(input_arg())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .value_parser(PossibleValuesParser::new(
                            TreeFormat::ALL.map(|format| format.name()),
                        ))
                        .help("Output format (defaults to output.tree from the config)"),
                ),
        )
        .subcommand(Command::new("formats").about("List available output formats"))
        .get_matches();

    match run(&matches) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn input_arg() -> Arg {
    Arg::new("path")
        .help("Path to the input file, or - for stdin")
        .required(true)
        .index(1)
}

/// Ok(false) means the input did not lex completely.
fn run(matches: &ArgMatches) -> Result<bool, CliError> {
    let config = load_config(matches)?;
    logging::init(&config.logging)?;

    match matches.subcommand() {
        Some(("tokens", sub)) => {
            let format = match sub.get_one::<String>("format") {
                Some(name) => name.parse()?,
                None => config.output.tokens,
            };
            handle_tokens_command(&read_input(sub)?, format)
        }
        Some(("tree", sub)) => {
            let format = match sub.get_one::<String>("format") {
                Some(name) => name.parse()?,
                None => config.output.tree,
            };
            handle_tree_command(&read_input(sub)?, format)
        }
        Some(("formats", _)) => {
            handle_formats_command();
            Ok(true)
        }
        _ => unreachable!(),
    }
}

fn load_config(matches: &ArgMatches) -> Result<ParsekitConfig, CliError> {
    let mut loader = Loader::new().with_env();
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        loader = loader.set_override("logging.level", level.as_str())?;
    }
    Ok(loader.build()?)
}

fn read_input(matches: &ArgMatches) -> Result<String, CliError> {
    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let result = if path == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source).map(|_| source)
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Input {
        path: path.to_string(),
        source,
    })
}

fn handle_tokens_command(source: &str, format: TokenFormat) -> Result<bool, CliError> {
    let (tokens, status) = sexp::tokenize(source);
    let output = formats::render_tokens_with(&tokens, format, &sexp::color_printer())?;
    print!("{output}");
    if format == TokenFormat::Color {
        println!();
    }
    Ok(status.is_complete())
}

fn handle_tree_command(source: &str, format: TreeFormat) -> Result<bool, CliError> {
    let outcome = sexp::parse(source);
    match format {
        TreeFormat::Dump => formats::write_tree(&outcome.tree, BufWriter::new(io::stdout().lock()))?,
        _ => print!("{}", formats::render_tree(&outcome.tree, format)?),
    }
    if outcome.unclosed > 0 {
        eprintln!("warning: {} unclosed list(s) at end of input", outcome.unclosed);
    }
    Ok(outcome.status.is_complete())
}

fn handle_formats_command() {
    println!("Token formats (parsekit tokens --format):\n");
    for format in TokenFormat::ALL {
        println!("  {:<6} {}", format.name(), format.description());
    }
    println!("\nTree formats (parsekit tree --format):\n");
    for format in TreeFormat::ALL {
        println!("  {:<6} {}", format.name(), format.description());
    }
}
