//! Keel CLI.

use keelc::commands::{lex_file, parse_file, run_file};
use keelc::init_tracing;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    init_tracing();

    let command = &args[1];

    match command.as_str() {
        "run" => {
            if args.len() < 3 {
                eprintln!("Usage: keel run <file.kl> [args...]");
                eprintln!();
                eprintln!("Arguments after the file are visible to the program as `args`.");
                std::process::exit(1);
            }
            run_file(&args[2], &args[3..]);
        }
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: keel lex <file.kl>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: keel parse <file.kl>");
                std::process::exit(1);
            }
            parse_file(&args[2]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("Keel {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            // A bare `.kl` path runs the file.
            if std::path::Path::new(command)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("kl"))
            {
                run_file(command, &args[2..]);
            } else {
                eprintln!("Unknown command: {command}");
                eprintln!();
                print_usage();
                std::process::exit(1);
            }
        }
    }
}

fn print_usage() {
    println!("Keel");
    println!();
    println!("Usage: keel <command> [options]");
    println!();
    println!("Commands:");
    println!("  run <file.kl> [args...]  Run a Keel program");
    println!("  lex <file.kl>            Tokenize and display tokens");
    println!("  parse <file.kl>          Parse and display the syntax tree");
    println!("  help                     Show this help message");
    println!("  version                  Show version information");
    println!();
    println!("Environment:");
    println!("  KEEL_MAX_DEPTH   Maximum nesting of block calls (default 10000)");
    println!("  KEEL_LOG         Tracing filter, e.g. `keel_eval=trace`");
}
