//! Command-line interface for analizador
//! This binary checks source files written in the template language and dumps their tokens.
//!
//! Usage:
//!   analizador check `<path>` [--format `<format>`] [--config `<file>`] [--halt]  - Check a file ("-" reads stdin)
//!   analizador tokens `<path>` [--format `<format>`]                            - Print the token stream
//!   analizador templates                                                    - List the accepted templates
//!
//! An `analizador.toml` in the working directory is layered over the defaults
//! when present; `--config` goes on top of it.
//!
//! Exit status: 0 when the text is accepted (or blank), 1 when it is rejected, 2 on usage or I/O errors.

use analizador::config::{AnalyzerConfig, Loader};
use analizador::processor::{self, OutputFormat, ProcessingSpec, ProcessingStage};
use analizador::{TokenKind, Verdict, RESERVED_WORDS, STANDARD_GRAMMAR};
use clap::{Arg, ArgAction, ArgMatches, Command};
use log::info;
use std::io::Read;
use std::process;

/// Picked up from the working directory when present
const LOCAL_CONFIG: &str = "analizador.toml";

fn main() {
    env_logger::init();

    let matches = Command::new("analizador")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Checks programs against the fixed templates of the teaching language")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("check")
                .about("Check a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file, or - for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: text, json or yaml (defaults to the configured one)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .short('c')
                        .help("Configuration file layered over the built-in defaults"),
                )
                .arg(
                    Arg::new("halt")
                        .long("halt")
                        .help("Stop matching at the first syntax error")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Print the token stream of a source file")
                .arg(
                    Arg::new("path")
                        .help("Path to the source file, or - for stdin")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: simple or json")
                        .default_value("simple"),
                ),
        )
        .subcommand(Command::new("templates").about("List the templates the checker accepts"))
        .get_matches();

    match matches.subcommand() {
        Some(("check", check_matches)) => handle_check_command(check_matches),
        Some(("tokens", tokens_matches)) => handle_tokens_command(tokens_matches),
        Some(("templates", _)) => handle_templates_command(),
        _ => unreachable!(),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(2);
}

fn read_stdin() -> String {
    let mut source = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut source) {
        fail(format!("reading stdin: {}", e));
    }
    source
}

fn read_input(path: &str) -> String {
    if path == "-" {
        return read_stdin();
    }
    processor::read_source(path).unwrap_or_else(|e| fail(e))
}

fn load_config(matches: &ArgMatches) -> AnalyzerConfig {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("halt") {
        loader = loader
            .set_override("recovery.mode", "halt")
            .unwrap_or_else(|e| fail(e));
    }
    if let Some(format) = matches.get_one::<String>("format") {
        loader = loader
            .set_override("output.format", format.as_str())
            .unwrap_or_else(|e| fail(e));
    }
    loader.build().unwrap_or_else(|e| fail(e))
}

/// Handle the check command
fn handle_check_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let spec = ProcessingSpec::new(ProcessingStage::Check, config.output.format)
        .unwrap_or_else(|e| fail(e));

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let processed = if path == "-" {
        processor::process_source(&read_stdin(), &spec, &config)
    } else {
        processor::process_file(path, &spec, &config)
    }
    .unwrap_or_else(|e| fail(e));
    info!("{}: {:?}", path, processed.verdict);
    print!("{}", processed.output);

    if processed.verdict == Some(Verdict::Rejected) {
        process::exit(1);
    }
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let format = match matches.get_one::<String>("format").map(String::as_str) {
        Some("json") => OutputFormat::Json,
        Some("simple") | None => OutputFormat::Simple,
        Some(other) => fail(format!(
            "unknown tokens format '{}' (available: {})",
            other,
            processor::available_formats().join(", ")
        )),
    };

    let path = matches
        .get_one::<String>("path")
        .map(String::as_str)
        .unwrap_or("-");
    let source = read_input(path);
    let output = processor::render_tokens(&source, format).unwrap_or_else(|e| fail(e));
    print!("{}", output);
}

/// Handle the templates command
fn handle_templates_command() {
    let grammar = &*STANDARD_GRAMMAR;
    println!(
        "Templates of '{}' ({}):\n",
        grammar.start_symbol(),
        grammar.template_names().join(", ")
    );
    for production in grammar.productions() {
        println!("  {}", production);
    }

    let first: Vec<&str> = grammar.first_kinds().iter().map(TokenKind::name).collect();
    println!("\nA program starts with: {}", first.join(" or "));

    if !grammar.detached().is_empty() {
        println!("\nDefined but unreachable:\n");
        for production in grammar.detached() {
            println!("  {}", production);
        }
    }

    println!("\nReserved words:\n");
    for word in RESERVED_WORDS.words() {
        if let Some(kind) = RESERVED_WORDS.get(word) {
            println!("  {:<10} {}", word, kind);
        }
    }
}
