//! Lark parser CLI

use larkc::commands::{complete_file, lex_file, parse_file, ParseFlags};

fn main() {
    larkc::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];
    match command.as_str() {
        "tokens" | "lex" => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: larkc tokens <file.lark>");
                std::process::exit(1);
            };
            lex_file(path);
        }
        "parse" => {
            let mut flags = ParseFlags::default();
            let mut file_path = None;
            for arg in args.iter().skip(2) {
                match arg.as_str() {
                    "--eager" => flags.eager = true,
                    "--comments" => flags.comments = true,
                    _ if arg.starts_with('-') => {
                        eprintln!("error: unknown option '{arg}'");
                        std::process::exit(1);
                    }
                    _ if file_path.is_none() => file_path = Some(arg.as_str()),
                    _ => {
                        eprintln!("error: unexpected argument '{arg}'");
                        std::process::exit(1);
                    }
                }
            }
            let Some(path) = file_path else {
                eprintln!("error: missing file path");
                eprintln!("Usage: larkc parse <file.lark> [--eager] [--comments]");
                std::process::exit(1);
            };
            if !parse_file(path, flags) {
                std::process::exit(1);
            }
        }
        "complete" => {
            let (Some(path), Some(offset)) = (args.get(2), args.get(3)) else {
                eprintln!("Usage: larkc complete <file.lark> <byte-offset>");
                std::process::exit(1);
            };
            let Ok(offset) = offset.parse::<u32>() else {
                eprintln!("error: '{offset}' is not a byte offset");
                std::process::exit(1);
            };
            if !complete_file(path, offset) {
                std::process::exit(1);
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        "version" | "--version" | "-V" => {
            println!("larkc {}", env!("CARGO_PKG_VERSION"));
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
    println!("Lark parser driver");
    println!();
    println!("Usage: larkc <command> [options]");
    println!();
    println!("Commands:");
    println!("  tokens <file.lark>            Tokenize and display tokens");
    println!("  parse <file.lark>             Parse in two passes and summarize");
    println!("  complete <file.lark> <offset> Report completion requests at a byte offset");
    println!("  help                          Show this help message");
    println!("  version                       Show version information");
    println!();
    println!("Parse options:");
    println!("  --eager      Parse every body in the first pass");
    println!("  --comments   Collect line comments");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=lark_parse=debug     Log parser decisions to stderr");
    println!("  LARK_LOG_TREE=1               Indent log output by span nesting");
}
