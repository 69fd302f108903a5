//! Color and HSL command implementations

use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::color::{Color, Hsl};
use crate::terminal;

fn print_color(color: &Color, json: bool) -> ExitCode {
    if json {
        return match serde_json::to_string_pretty(color) {
            Ok(out) => {
                println!("{}", out);
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        };
    }

    if atty::is(atty::Stream::Stdout) {
        print!("{} ", terminal::swatch(color));
    }
    println!("{}  {}", color.hex(), color.hsl());
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the color command
pub fn run_color(input: &str, json: bool) -> ExitCode {
    match Color::parse(input) {
        Ok(color) => print_color(&color, json),
        Err(e) => {
            eprintln!("Error: '{}': {}", input, e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
    }
}

/// Execute the hsl command
pub fn run_hsl(hue: i32, saturation: i32, lightness: i32, json: bool) -> ExitCode {
    match Hsl::new(hue, saturation, lightness) {
        Ok(hsl) => print_color(&Color::from_hsl(hsl), json),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
    }
}
