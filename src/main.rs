mod debug_report;

use kuaidi::{Divisions, parse_verbose_with};
use std::io::{self, IsTerminal, Read};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let loaded;
    let divisions = match &config.data {
        Some(path) => {
            loaded = match load_divisions(path) {
                Ok(divisions) => divisions,
                Err(err) => {
                    eprintln!("{err}");
                    std::process::exit(2);
                }
            };
            &loaded
        }
        None => Divisions::bundled(),
    };

    let report = parse_verbose_with(&config.input, divisions);
    if config.json {
        match serde_json::to_string_pretty(&report.address) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to serialize result: {err}");
                std::process::exit(1);
            }
        }
    } else {
        debug_report::print_run(&report, config.color);
    }
}

struct CliConfig {
    input: String,
    data: Option<String>,
    json: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut data: Option<String> = None;
    let mut json = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("kuaidi {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--json" => json = true,
            "--color" => color = true,
            "--no-color" => color = false,
            "--data" => {
                let value = args.next().ok_or_else(|| "error: --data expects a path".to_string())?;
                data = Some(value);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--data=") => {
                data = Some(arg.trim_start_matches("--data=").to_string());
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, data, json, color })
}

fn load_divisions(path: &str) -> Result<Divisions, String> {
    let json = std::fs::read_to_string(path).map_err(|err| format!("error: failed to read '{path}': {err}"))?;
    Divisions::from_json(&json).map_err(|err| format!("error: failed to load '{path}': {err}"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "kuaidi {version}

Chinese shipping-address parsing CLI.

Usage:
  kuaidi [OPTIONS] [--] <text...>
  kuaidi [OPTIONS] --input <text>

Options:
  -i, --input <text>         Address text to parse. If omitted, reads remaining
                             args or stdin when no args are provided.
  --data <path>              Load a division table (nested code/name/children
                             JSON) instead of the bundled snapshot.
  --json                     Print the parsed record as JSON.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments, missing input, or a bad division table.
",
        version = env!("CARGO_PKG_VERSION")
    )
}
