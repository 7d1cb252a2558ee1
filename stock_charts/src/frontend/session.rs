//! The interactive comparison loop behind the `compare` subcommand.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::{
    controller::{COMPARISON_CHART, ComparisonController, EntityRef},
    errors::{Error, StoreError},
    providers::DataProvider,
    render::RenderSurface,
};

pub const TICKER_PROMPT: &str =
    "Enter a stock ticker symbol in the S&P 500 (press Enter to finish): ";
pub const ACTION_PROMPT: &str =
    "Do you want to add another company (add), remove a company (remove), or finish (finish): ";
pub const REMOVE_PROMPT: &str = "Enter the number of the company you want to remove: ";

pub const ALREADY_ADDED: &str = "Company already added. Please choose a different company.";
pub const REMOVED: &str = "Company removed.";
pub const INVALID_SELECTION: &str = "Invalid selection. No company removed.";
pub const INVALID_NUMBER: &str = "Invalid input. Please enter a valid number.";

pub const FINAL_TITLE: &str = "Final Stock Comparison";

/// Prints `prompt` and reads one trimmed line. `None` at end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, prompts: &mut W, prompt: &str) -> io::Result<Option<String>> {
    write!(prompts, "{prompt}")?;
    prompts.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Runs the add/remove/finish loop until an empty ticker, `finish`, or end
/// of input, then renders the final comparison if anything is tracked.
///
/// Prompts and messages go to `prompts`; charts go to `surface`.
pub async fn run_prompt_session<P, R, W, S>(
    controller: &mut ComparisonController<P>,
    mut input: R,
    mut prompts: W,
    surface: &mut S,
) -> Result<(), Error>
where
    P: DataProvider,
    R: BufRead,
    W: Write,
    S: RenderSurface + ?Sized,
{
    loop {
        let Some(ticker) = ask(&mut input, &mut prompts, TICKER_PROMPT)? else {
            break;
        };
        if ticker.is_empty() {
            break;
        }

        match controller.add_entity(Some(ticker.as_str())).await {
            Ok(Some(frame)) => surface.render_frame(&frame)?,
            Ok(None) => continue,
            Err(Error::Store(StoreError::DuplicateEntity { .. })) => {
                writeln!(prompts, "{ALREADY_ADDED}")?;
                continue;
            }
            Err(err) => {
                warn!(%ticker, %err, "Could not add symbol");
                writeln!(prompts, "Error fetching stock data for {ticker}: {err}")?;
                continue;
            }
        }

        let Some(action) = ask(&mut input, &mut prompts, ACTION_PROMPT)? else {
            break;
        };
        match action.to_lowercase().as_str() {
            "finish" => break,
            "remove" => {
                if !remove_one(controller, &mut input, &mut prompts, surface)? {
                    break;
                }
            }
            _ => {}
        }
    }

    if let Some(payload) = controller.snapshot(FINAL_TITLE) {
        surface.render(COMPARISON_CHART, &payload)?;
    }
    Ok(())
}

/// Lists the tracked symbols and removes the one picked by number.
/// Returns `false` when input ran out.
fn remove_one<P, R, W, S>(
    controller: &mut ComparisonController<P>,
    input: &mut R,
    prompts: &mut W,
    surface: &mut S,
) -> Result<bool, Error>
where
    P: DataProvider,
    R: BufRead,
    W: Write,
    S: RenderSurface + ?Sized,
{
    writeln!(prompts, "Companies currently on the graph:")?;
    for (i, symbol) in controller.tracked().symbols().enumerate() {
        writeln!(prompts, "{}. {symbol}", i + 1)?;
    }

    let Some(answer) = ask(input, prompts, REMOVE_PROMPT)? else {
        return Ok(false);
    };
    let Ok(position) = answer.parse::<i64>() else {
        writeln!(prompts, "{INVALID_NUMBER}")?;
        return Ok(true);
    };

    match controller.remove_entity(Some(&EntityRef::Position(position))) {
        Ok(frame) => {
            writeln!(prompts, "{REMOVED}")?;
            if let Some(frame) = frame.filter(|_| !controller.tracked().is_empty()) {
                surface.render_frame(&frame)?;
            }
        }
        Err(_) => writeln!(prompts, "{INVALID_SELECTION}")?,
    }
    Ok(true)
}
