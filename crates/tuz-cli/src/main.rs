// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! tuz CLI - runs name resolution over a parsed program.
//!
//! The parser hands its tree over as JSON; this binary loads it, resolves
//! it, and prints either the first diagnostic or a summary of the result.

mod output;
mod summary;

use std::env;
use std::fs;
use std::process;

use tracing::debug;
use tracing_subscriber::EnvFilter;
use tuz_ast::Program;
use tuz_diagnostics::codes::ErrorCodeRegistry;
use tuz_diagnostics::formatter::DiagnosticFormatter;
use tuz_diagnostics::json;
use tuz_diagnostics::ToDiagnostic;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Human,
    Json,
}

struct ResolveArgs {
    program: String,
    source: Option<String>,
    format: Format,
}

fn main() {
    output::init();
    init_logging();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    match args[1].as_str() {
        "resolve" => match parse_resolve_args(&args[2..]) {
            Ok(opts) => cmd_resolve(&opts),
            Err(msg) => {
                eprintln!("{}: {}", output::error_label(), msg);
                eprintln!("Usage: tuz resolve <program.json> [--source <file.tz>] [--format human|json]");
                process::exit(1);
            }
        },
        "codes" => cmd_codes(),
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => println!("tuz {}", VERSION),
        other => {
            eprintln!("{}: unknown command: {}", output::error_label(), other);
            print_usage();
            process::exit(1);
        }
    }
}

/// Log level comes from `TUZ_LOG` (same syntax as `RUST_LOG`), default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("TUZ_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_resolve_args(args: &[String]) -> Result<ResolveArgs, String> {
    let mut program = None;
    let mut source = None;
    let mut format = Format::Human;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--source" => {
                i += 1;
                let path = args.get(i).ok_or("--source needs a file")?;
                source = Some(path.clone());
            }
            "--format" => {
                i += 1;
                format = match args.get(i).map(String::as_str) {
                    Some("human") => Format::Human,
                    Some("json") => Format::Json,
                    Some(other) => return Err(format!("unknown format: {}", other)),
                    None => return Err("--format needs a value".to_string()),
                };
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option: {}", flag)),
            path => {
                if program.is_some() {
                    return Err(format!("unexpected argument: {}", path));
                }
                program = Some(path.to_string());
            }
        }
        i += 1;
    }

    Ok(ResolveArgs {
        program: program.ok_or("missing program file")?,
        source,
        format,
    })
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}: reading {}: {}", output::error_label(), path, e);
            process::exit(1);
        }
    }
}

fn cmd_resolve(opts: &ResolveArgs) {
    let text = read_file(&opts.program);
    let mut program: Program = match serde_json::from_str(&text) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}: {} is not a valid program: {}", output::error_label(), opts.program, e);
            process::exit(1);
        }
    };
    debug!(declarations = program.declarations.len(), "loaded program");

    let source = opts.source.as_deref().map(read_file);
    let display_name = opts.source.as_deref().unwrap_or(&opts.program);

    match tuz_resolve::resolve(&mut program) {
        Ok(()) => match opts.format {
            Format::Human => {
                print!("{}", summary::render(&program));
                println!("{}", output::banner_ok("Resolve"));
            }
            Format::Json => {
                let report = json::to_json_report(&[], source.as_deref(), display_name, "resolve");
                println!("{}", json::to_json_string(&report));
            }
        },
        Err(err) => {
            let diag = err.to_diagnostic();
            match opts.format {
                Format::Human => {
                    let formatter = match source.as_deref() {
                        Some(src) => DiagnosticFormatter::new(src),
                        None => DiagnosticFormatter::without_source(),
                    };
                    eprint!("{}", formatter.with_file_name(display_name).format(&diag));
                    eprintln!("{}", output::banner_fail("Resolve"));
                }
                Format::Json => {
                    let report = json::to_json_report(&[diag], source.as_deref(), display_name, "resolve");
                    println!("{}", json::to_json_string(&report));
                }
            }
            process::exit(1);
        }
    }
}

fn cmd_codes() {
    let registry = ErrorCodeRegistry::default();
    for info in registry.all() {
        println!(
            "{}  {:<12} {}",
            output::command(info.code),
            info.category.to_string(),
            info.title
        );
    }
}

fn print_usage() {
    println!(
        "{} {} - name resolution for the tuz language",
        output::title("tuz"),
        output::version(VERSION)
    );
    println!();
    println!("{} tuz <command> [args]", output::section_header("Usage:"));
    println!();
    println!("{}", output::section_header("Commands:"));
    println!(
        "  {} {}   Resolve a parsed program and print a summary",
        output::command("resolve"),
        output::arg("<program.json>")
    );
    println!(
        "      {} {}   Source text for diagnostic context",
        output::arg("--source"),
        output::arg("<file.tz>")
    );
    println!(
        "      {} {}  Output format (default: human)",
        output::arg("--format"),
        output::arg("human|json")
    );
    println!("  {}                  List error codes", output::command("codes"));
    println!("  {}                   Show this help", output::command("help"));
    println!("  {}                Show version", output::command("version"));
    println!();
    println!("{}", output::section_header("Environment:"));
    println!("  {}   Log filter (default: warn)", output::arg("TUZ_LOG"));
    println!("  {}  Disable colors", output::arg("NO_COLOR"));
    println!("  {}  Force colors", output::arg("FORCE_COLOR"));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_resolve_options() {
        let opts = parse_resolve_args(&args(&["p.json", "--source", "p.tz", "--format", "json"])).unwrap();
        assert_eq!(opts.program, "p.json");
        assert_eq!(opts.source.as_deref(), Some("p.tz"));
        assert_eq!(opts.format, Format::Json);
    }

    #[test]
    fn rejects_bad_options() {
        assert!(parse_resolve_args(&args(&[])).is_err());
        assert!(parse_resolve_args(&args(&["a.json", "b.json"])).is_err());
        assert!(parse_resolve_args(&args(&["a.json", "--format", "xml"])).is_err());
        assert!(parse_resolve_args(&args(&["a.json", "--source"])).is_err());
        assert!(parse_resolve_args(&args(&["a.json", "--verbose"])).is_err());
    }
}
