//! Ree toolchain CLI.

use ree_diagnostic::emitter::ColorMode;
use reec::commands::{check_file, lex_file};

fn main() {
    reec::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: reec lex <file.ree|->");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "check" => {
            let mut color = ColorMode::Auto;
            let mut path = None;

            for arg in args.iter().skip(2) {
                if let Some(value) = arg.strip_prefix("--color=") {
                    let Some(mode) = ColorMode::parse(value) else {
                        eprintln!("error: invalid --color value '{value}'");
                        eprintln!("expected one of: auto, always, never");
                        std::process::exit(1);
                    };
                    color = mode;
                } else if (arg == "-" || !arg.starts_with('-')) && path.is_none() {
                    path = Some(arg.as_str());
                } else {
                    eprintln!("error: unexpected argument '{arg}'");
                    std::process::exit(1);
                }
            }

            let Some(path) = path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: reec check <file.ree|-> [--color=auto|always|never]");
                std::process::exit(1);
            };
            check_file(path, color);
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("reec {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Ree toolchain");
    println!();
    println!("Usage: reec <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file.ree|->     Print the token stream");
    println!("  check <file.ree|->   Report lexical errors");
    println!("  help                 Show this message");
    println!("  version              Show version information");
    println!();
    println!("Options (check):");
    println!("  --color=<when>       auto, always or never");
    println!();
    println!("Set RUST_LOG (e.g. RUST_LOG=ree_lexer=trace) to enable tracing.");
}
