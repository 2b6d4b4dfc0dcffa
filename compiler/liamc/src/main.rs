//! Liam compiler CLI.

use liamc::{CompileError, CompileOptions};

fn main() {
    liamc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "lex" => {
            if args.len() < 3 {
                eprintln!("Usage: liamc lex <file.liam>");
                std::process::exit(1);
            }
            lex_file(&args[2]);
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: liamc parse <file.liam> [--types]");
                std::process::exit(1);
            }
            let mut with_types = false;
            for arg in args.iter().skip(3) {
                match arg.as_str() {
                    "--types" => with_types = true,
                    other => {
                        eprintln!("error: unknown option '{other}'");
                        std::process::exit(1);
                    }
                }
            }
            parse_file(&args[2], with_types);
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: liamc check <file.liam>");
                std::process::exit(1);
            }
            check_file(&args[2]);
        }
        "build" => {
            if args.len() < 3 {
                eprintln!("Usage: liamc build <file.liam> [--verify]");
                std::process::exit(1);
            }
            let mut options = CompileOptions::default();
            for arg in args.iter().skip(3) {
                match arg.as_str() {
                    "--verify" => options.verify = true,
                    other => {
                        eprintln!("error: unknown option '{other}'");
                        std::process::exit(1);
                    }
                }
            }
            build_file(&args[2], &options);
        }
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Liam Compiler");
    println!();
    println!("Usage: liamc <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>                 Print the token stream");
    println!("  parse <file> [--types]     Print the AST, optionally with resolved types");
    println!("  check <file>               Type check and print types and signatures");
    println!("  build <file> [--verify]    Compile and print the bytecode listing");
    println!("  help                       Show this message");
    println!();
    println!("Environment:");
    println!("  RUST_LOG        Enable logging (e.g. RUST_LOG=liam_types=debug)");
    println!("  LIAM_LOG_TREE   Render log output as an indented span tree");
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn fail(path: &str, source: &str, err: &CompileError) -> ! {
    eprintln!("{path}:{}", err.render(source));
    std::process::exit(1);
}

fn lex_file(path: &str) {
    let source = read_file(path);
    let tokens = match liamc::lex(&source) {
        Ok(tokens) => tokens,
        Err(err) => fail(path, &source, &err),
    };
    for token in tokens.iter() {
        println!(
            "{:<6} {:<10} {}",
            token.span.line_col(&source).to_string(),
            token.kind.display_name(),
            token.span.text(&source)
        );
    }
}

fn parse_file(path: &str, with_types: bool) {
    let source = read_file(path);
    match liamc::dump_ast(&source, with_types) {
        Ok(tree) => print!("{tree}"),
        Err(err) => fail(path, &source, &err),
    }
}

fn check_file(path: &str) {
    let source = read_file(path);
    let checked = match liamc::check(&source) {
        Ok(checked) => checked,
        Err(err) => fail(path, &source, &err),
    };
    let types = &checked.typed.types;
    for (idx, _) in types.iter() {
        if let Some(name) = types.name(idx) {
            println!("type{} {}", idx.raw(), checked.interner.lookup(name));
        }
    }
    for (idx, sig) in checked.typed.signatures.iter() {
        println!(
            "fn{} {}() {}",
            idx.raw(),
            checked.interner.lookup(sig.name),
            sig.return_type
                .display(&checked.interner, &checked.typed.signatures)
        );
    }
    println!("ok");
}

fn build_file(path: &str, options: &CompileOptions) {
    let source = read_file(path);
    let compiled = match liamc::compile(&source, options) {
        Ok(compiled) => compiled,
        Err(err) => fail(path, &source, &err),
    };
    print!("{}", compiled.bytecode.display(&compiled.checked.interner));
}
