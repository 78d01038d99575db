// UI layer: a line-based prompt loop using `dialoguer`. The user types
// a digit (0-9) to generate a batch of images, or 'q' to quit. Anything
// else is rejected with a message and the prompt repeats.

use crate::fetcher::{DigitFetcher, BATCH_SIZE};
use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

/// What one line of user input asks for.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// A digit in 0-9: generate a batch for it.
    Generate(u8),
    /// The quit sentinel ('q', case-insensitive).
    Quit,
    /// Anything else: report and re-prompt.
    Invalid,
}

/// Parse one line of input. Whitespace is trimmed; the quit sentinel is
/// case-insensitive; only integers 0-9 count as digits (so "12" or
/// "-1" are invalid, not clamped).
pub fn parse_command(input: &str) -> Command {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        return Command::Quit;
    }
    match trimmed.parse::<u8>() {
        Ok(digit) if digit <= 9 => Command::Generate(digit),
        _ => Command::Invalid,
    }
}

/// Main interactive loop. Blocks until the user quits. Fetcher errors
/// are printed and the loop continues, so a failed batch never takes
/// the process down.
pub fn prompt_loop(fetcher: &DigitFetcher) -> Result<()> {
    println!("--- Handwritten Digit Image Generator ---");
    loop {
        let line: String = Input::new()
            .with_prompt("Enter the digit you want to generate (0-9), or 'q' to quit")
            .allow_empty(true)
            .interact_text()?;
        match parse_command(&line) {
            Command::Quit => break,
            Command::Invalid => {
                println!("Invalid input. Please enter a number between 0 and 9.");
            }
            Command::Generate(digit) => run_batch(fetcher, digit),
        }
    }
    Ok(())
}

/// Run one batch of BATCH_SIZE images with a spinner for feedback.
fn run_batch(fetcher: &DigitFetcher, digit: u8) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(format!("Generating images for digit {}...", digit));

    match fetcher.fetch_batch(digit, BATCH_SIZE) {
        Ok(n) => {
            spinner.finish_and_clear();
            println!("Done: {} image(s) saved to '{}'.", n, fetcher.output_dir().display());
        }
        Err(e) => {
            spinner.finish_and_clear();
            // `{:#}` prints the whole context chain on one line.
            println!("An error occurred: {:#}", e);
        }
    }
}
