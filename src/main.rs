use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{convert, symbols};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "phpns")]
#[command(version = VERSION)]
#[command(about = "Move a flat-namespace PHP library under a single namespace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a library into a namespaced tree and rewrite every reference
    Convert(convert::ConvertArgs),
    /// Show the class-like and functions a single file declares
    Symbols(symbols::SymbolsArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        // Text mode: progress lines on stdout, errors on stderr.
        Commands::Convert(args) if !args.json => match convert::run(args) {
            Ok((_, exit_code)) => exit_code,
            Err(err) => {
                output::print_text_error(&err);
                output::exit_code_for_error(err.code)
            }
        },
        command => {
            let (json_result, exit_code) = commands::run_json(command);
            match output::print_json_result(json_result) {
                Ok(()) => exit_code,
                Err(err) => {
                    output::print_text_error(&err);
                    1
                }
            }
        }
    };

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
