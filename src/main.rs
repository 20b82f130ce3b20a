// Hexagony: command-line interpreter for the Hexagony language

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use hexagony::grid::source::SourceCode;
use hexagony::grid::{count_bytes, count_codepoints, count_operators};
use hexagony::interpreter::engine::Interpreter;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [options] <file.hxg> [args...]", program_name);
    eprintln!();
    eprintln!("Trailing arguments become the program's input, separated by");
    eprintln!("null bytes the way the `,` instruction expects.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -i <input>    raw input string (overrides trailing args)");
    eprintln!("  -n <steps>    stop after this many steps");
    eprintln!("  -l, --layout  print the program laid out as a hexagon and exit");
    eprintln!("  -m, --minify  print the minified program and exit");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("hexagony");

    let mut file: Option<&str> = None;
    let mut raw_input: Option<String> = None;
    let mut max_steps: Option<u64> = None;
    let mut layout = false;
    let mut minify = false;
    let mut trailing: Vec<&str> = Vec::new();

    let mut iter = args[1..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-i" => match iter.next() {
                Some(input) => raw_input = Some(input.clone()),
                None => {
                    eprintln!("Error: -i requires an argument");
                    std::process::exit(1);
                }
            },
            "-n" => {
                let steps = iter.next().and_then(|s| s.parse().ok());
                match steps {
                    Some(steps) => max_steps = Some(steps),
                    None => {
                        eprintln!("Error: -n requires a number");
                        std::process::exit(1);
                    }
                }
            }
            "-l" | "--layout" => layout = true,
            "-m" | "--minify" => minify = true,
            "-h" | "--help" => {
                print_usage(program_name);
                return Ok(());
            }
            other if other.starts_with('-') && other.len() > 1 => {
                eprintln!("Error: unknown option '{}'", other);
                print_usage(program_name);
                std::process::exit(1);
            }
            positional => {
                if file.is_none() {
                    file = Some(positional);
                } else {
                    trailing.push(positional);
                }
            }
        }
    }

    let file = match file {
        Some(file) => file,
        None => {
            eprintln!("Error: No input file provided");
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    if !Path::new(file).exists() {
        eprintln!("Error: File '{}' not found", file);
        std::process::exit(1);
    }

    let code = fs::read_to_string(file)?;
    let source = SourceCode::from_string(&code);

    if layout {
        println!("{}", source.layout_code());
        return Ok(());
    }
    if minify {
        println!("{}", source.minify_code());
        return Ok(());
    }

    eprintln!(
        "Loaded size-{} hexagon ({} operators, {} codepoints, {} bytes).",
        source.size(),
        count_operators(&code),
        count_codepoints(&code),
        count_bytes(&code)
    );

    // Arguments input mode: argument boundaries are null bytes.
    let input = raw_input.unwrap_or_else(|| trailing.join("\0"));
    let mut interpreter = Interpreter::new(source, &input);

    eprintln!("Executing program...");
    let mut steps = 0u64;
    while interpreter.termination_reason().is_none() {
        if max_steps.is_some_and(|limit| steps >= limit) {
            break;
        }
        interpreter.step();
        steps += 1;
    }

    let mut stdout = io::stdout();
    stdout.write_all(interpreter.output())?;
    stdout.flush()?;

    match interpreter.termination_reason() {
        Some(reason) => eprintln!("{} ({} ticks)", reason, interpreter.ticks()),
        None => eprintln!("Stopped after {} steps without terminating.", steps),
    }

    Ok(())
}
