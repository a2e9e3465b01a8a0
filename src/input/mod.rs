//! Console button input
//!
//! Lets an operator fire buzzer events by typing a color (`red`, `green`,
//! `blue`, `yellow`) or its first letter, one per line. Useful when no button
//! hardware is attached. A hardware driver publishes through the same
//! [`EventSender`].
//!
//! Input is read on a plain OS thread. A pending stdin read never holds up
//! runtime shutdown.

use std::io::{self, BufRead};
use std::thread::{self, JoinHandle};

use crate::hub::{ButtonColor, ButtonHit, EventSender, HubError};

/// Parse one line of operator input
pub fn parse_line(line: &str) -> Result<ButtonColor, HubError> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "r" => Ok(ButtonColor::Red),
        "g" => Ok(ButtonColor::Green),
        "b" => Ok(ButtonColor::Blue),
        "y" => Ok(ButtonColor::Yellow),
        _ => line.parse(),
    }
}

/// Publish a hit for every valid line of `reader`
///
/// Blocks the calling thread, so it must not run on an async worker. Stops at
/// end of input or when the bus closes. Returns how many events were
/// published.
pub fn pump_lines<R: BufRead>(reader: R, sender: &EventSender) -> usize {
    let mut published = 0;

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read button input");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let color = match parse_line(&line) {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring button input");
                continue;
            }
        };

        tracing::info!(color = %color, "Button pressed");
        if let Err(e) = sender.blocking_publish(ButtonHit::new(color)) {
            tracing::warn!(error = %e, "Button input stopped");
            break;
        }
        published += 1;
    }

    published
}

/// Read button presses from standard input on a background thread
pub fn spawn_console_input(sender: EventSender) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("console-input".into())
        .spawn(move || {
            let published = pump_lines(io::stdin().lock(), &sender);
            tracing::debug!(published = published, "Console input closed");
        })
}
