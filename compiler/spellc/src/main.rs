//! Spellc CLI
//!
//! Compile spell grids and run them against a sandbox world.

use std::path::Path;
use std::sync::Arc;

use spell_compile::{unused_pieces, CompilerConfig};
use spell_diagnostic::emitter::{ColorMode, TerminalEmitter};
use spell_diagnostic::Diagnostic;
use spellc::commands::{
    cast_spell, check_grid, explain, parse_cast_options, parse_check_options, summarize,
};
use spellc::{init_tracing, load_grid, CliError};

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "check" => {
            let (path, config) = parse_check_options(&args[2..]).unwrap_or_else(|e| fail(&e));
            let Some(path) = path else {
                eprintln!("Usage: spellc check <grid.json> [--max-complexity=N] [--max-repeat=N]");
                std::process::exit(1);
            };
            let spell = load_grid(Path::new(&path))
                .map_err(CliError::from)
                .and_then(|grid| check_grid(grid, &config))
                .unwrap_or_else(|e| fail(&e));
            let warnings = unused_pieces(&spell);
            if !warnings.is_empty() {
                if let Err(io) = emit(&warnings) {
                    eprintln!("warning: could not print diagnostics ({io})");
                }
            }
            println!("OK: {path} ({})", summarize(&spell));
        }
        "cast" => {
            let (path, options) = parse_cast_options(&args[2..]).unwrap_or_else(|e| fail(&e));
            let Some(path) = path else {
                eprintln!("Usage: spellc cast <grid.json> [--loops=N] [--max-ticks=N]");
                std::process::exit(1);
            };
            let spell = load_grid(Path::new(&path))
                .map_err(CliError::from)
                .and_then(|grid| check_grid(grid, &CompilerConfig::default()))
                .unwrap_or_else(|e| fail(&e));
            let report = cast_spell(Arc::new(spell), options);
            print!("{report}");
            if report.faulted() {
                std::process::exit(1);
            }
        }
        "explain" | "--explain" => {
            if args.len() < 3 {
                eprintln!("Usage: spellc explain <ERROR_CODE>");
                eprintln!("Example: spellc explain E0007");
                std::process::exit(1);
            }
            match explain(&args[2]) {
                Ok(doc) => println!("{doc}"),
                Err(e) => fail(&e),
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("spellc {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

/// Render diagnostics on stderr.
fn emit(diags: &[Diagnostic]) -> std::io::Result<()> {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    TerminalEmitter::with_color_mode(std::io::stderr(), ColorMode::Auto, is_tty).emit_all(diags)
}

/// Render `err` as a diagnostic on stderr and exit with status 1.
fn fail(err: &CliError) -> ! {
    if let Err(io) = emit(&[err.to_diagnostic()]) {
        eprintln!("error: {err} ({io})");
    }
    std::process::exit(1);
}

fn print_usage() {
    println!("Spellc - spell grid compiler");
    println!();
    println!("Usage: spellc <command> [options]");
    println!();
    println!("Commands:");
    println!("  check <grid.json>    Compile a grid and print its stats");
    println!("  cast <grid.json>     Compile and cast in the sandbox world");
    println!("  explain <code>       Explain an error code (e.g., E0007)");
    println!("  help                 Show this help message");
    println!("  version              Show version information");
    println!();
    println!("Check options:");
    println!("  --max-complexity=N   Reject spells with complexity above N");
    println!("  --max-repeat=N       Highest repeat count allowed (default 8)");
    println!();
    println!("Cast options:");
    println!("  --loops=N            Cast N times with loop index 0..N (default 1)");
    println!("  --max-ticks=N        Ticks to wait on delays per loop (default 200)");
    println!();
    println!("Environment:");
    println!("  RUST_LOG             Enable tracing, e.g. RUST_LOG=spell_eval=trace");
    println!("  SPELLC_TRACE_TREE    Print spans as an indented tree");
    println!();
    println!("Examples:");
    println!("  spellc check fireball.json");
    println!("  spellc cast fireball.json --loops=3");
    println!("  spellc explain E1001");
}
