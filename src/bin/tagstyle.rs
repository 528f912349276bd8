//! Command-line interface for tagstyle
//! Inspects the style blocks embedded in JS/TS files.
//!
//! Usage:
//!   tagstyle inspect `<path>` [--syntax `<name>`] [--config `<file>`] [--format `<format>`]
//!   tagstyle extract `<path>` [--syntax `<name>`] [--config `<file>`]
//!   tagstyle roundtrip `<path>` [--syntax `<name>`] [--config `<file>`]
//!   tagstyle list-syntaxes

use clap::{Arg, ArgMatches, Command};
use std::path::Path;
use tagstyle::formats::FormatRegistry;
use tagstyle::style::{DialectRegistry, ParseOptions};
use tagstyle::syntax::{Syntax, SyntaxOptions, SyntaxRegistry};

fn syntax_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("path")
                .help("Path to the JS/TS file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("syntax")
                .long("syntax")
                .short('s')
                .help("Syntax preset (see list-syntaxes)")
                .default_value("styled-components"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("YAML or JSON syntax configuration, overrides --syntax"),
        )
}

fn main() {
    let matches = Command::new("tagstyle")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting style blocks embedded in tagged templates")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            syntax_args(Command::new("inspect").about("Print the parsed style blocks")).arg(
                Arg::new("format")
                    .long("format")
                    .short('f')
                    .help("Output format (e.g., 'treeviz', 'json')")
                    .default_value("treeviz"),
            ),
        )
        .subcommand(syntax_args(
            Command::new("extract").about("Print the normalized text of every style block"),
        ))
        .subcommand(syntax_args(
            Command::new("roundtrip").about("Check that printing the parsed file reproduces it"),
        ))
        .subcommand(Command::new("list-syntaxes").about("List syntax presets and dialects"))
        .get_matches();

    match matches.subcommand() {
        Some(("inspect", inspect_matches)) => {
            let format = inspect_matches.get_one::<String>("format").unwrap();
            handle_inspect_command(inspect_matches, format);
        }
        Some(("extract", extract_matches)) => handle_extract_command(extract_matches),
        Some(("roundtrip", roundtrip_matches)) => handle_roundtrip_command(roundtrip_matches),
        Some(("list-syntaxes", _)) => handle_list_syntaxes_command(),
        _ => unreachable!(),
    }
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

/// Build the syntax named by --syntax, or loaded from --config
fn load_syntax(matches: &ArgMatches) -> Syntax {
    let dialects = DialectRegistry::with_defaults();
    let result = match matches.get_one::<String>("config") {
        Some(config) => SyntaxOptions::from_file(Path::new(config))
            .and_then(|options| Syntax::new(options, &dialects)),
        None => {
            let name = matches.get_one::<String>("syntax").unwrap();
            SyntaxRegistry::with_defaults().build(name, &dialects)
        }
    };
    result.unwrap_or_else(|e| fail(e))
}

fn read_source(matches: &ArgMatches) -> (String, String) {
    let path = matches.get_one::<String>("path").unwrap().clone();
    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| fail(format!("reading file: {}", e)));
    (path, source)
}

/// Handle the inspect command
fn handle_inspect_command(matches: &ArgMatches, format: &str) {
    let syntax = load_syntax(matches);
    let (path, source) = read_source(matches);

    let options = ParseOptions {
        from: Some(path),
        map: false,
    };
    let document = syntax
        .parse_with(&source, &options)
        .unwrap_or_else(|e| fail(e));

    for diagnostic in document.diagnostics() {
        eprintln!("{}", diagnostic);
    }

    let output = FormatRegistry::with_defaults()
        .serialize(&document, format)
        .unwrap_or_else(|e| fail(e));
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }
}

/// Handle the extract command
fn handle_extract_command(matches: &ArgMatches) {
    let syntax = load_syntax(matches);
    let (_, source) = read_source(matches);

    let blocks = syntax
        .normalized_blocks(&source)
        .unwrap_or_else(|e| fail(e));
    for block in blocks {
        println!("/* {} */", block.range);
        println!("{}", block.text);
    }
}

/// Handle the roundtrip command
fn handle_roundtrip_command(matches: &ArgMatches) {
    let syntax = load_syntax(matches);
    let (path, source) = read_source(matches);

    let document = syntax.parse(&source).unwrap_or_else(|e| fail(e));
    let printed = syntax.stringify(&document);
    if printed != source {
        eprintln!("{}: printed output differs from the source", path);
        std::process::exit(1);
    }
    println!(
        "{}: {} block(s), {} skipped, round trip ok",
        path,
        document.roots.len(),
        document.skipped.len()
    );
}

/// Handle the list-syntaxes command
fn handle_list_syntaxes_command() {
    let syntaxes = SyntaxRegistry::with_defaults();
    let dialects = DialectRegistry::with_defaults();

    println!("Available syntaxes:\n");
    for name in syntaxes.list_syntaxes() {
        if let Some(options) = syntaxes.get(&name) {
            println!("  {}", name);
            println!("    dialect: {}, directive: {}", options.dialect, options.directive());
        }
    }

    println!("\nAvailable dialects:\n");
    for name in dialects.list_dialects() {
        let description = dialects.get(&name).map_or("", |d| d.description());
        println!("  {:<6} {}", name, description);
    }
}
