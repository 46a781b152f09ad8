//! Line-oriented operator input with retry loops.
//!
//! Reads always go through [`Prompt::text`], which turns end of input into
//! `Error::InputClosed` and Ctrl-C into `Error::Interrupted`, so no retry loop
//! can spin on a closed stream.

use crate::errors::{Error, Result};
use std::{fmt::Display, str::FromStr};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Question/answer channel between the session and the operator.
#[derive(Debug)]
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R, W> Prompt<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wraps an input and an output stream.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Hands back the underlying streams.
    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Prints one line.
    pub async fn say(&mut self, text: impl Display) -> Result<()> {
        self.write_raw(&format!("{text}\n")).await
    }

    /// Prints raw text without a newline and flushes it.
    pub async fn write_raw(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }

    /// Asks `label` and returns the trimmed answer.
    ///
    /// A line that is not valid UTF-8 is rejected and asked for again.
    ///
    /// # Errors
    /// Returns `Error::InputClosed` at end of input, `Error::Interrupted` when
    /// the operator presses Ctrl-C, or `Error::Io` if the terminal cannot be
    /// read or written.
    pub async fn text(&mut self, label: &str) -> Result<String> {
        loop {
            self.write_raw(label).await?;

            let mut line = Vec::new();
            let read = tokio::select! {
                read = self.input.read_until(b'\n', &mut line) => read?,
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    return Err(Error::Interrupted);
                }
            };
            if read == 0 {
                return Err(Error::InputClosed);
            }

            match String::from_utf8(line) {
                Ok(answer) => return Ok(answer.trim().to_string()),
                Err(e) => {
                    debug!(error = %e, "Rejected unreadable answer");
                    self.say("That answer could not be read as text. Try again.")
                        .await?;
                }
            }
        }
    }

    /// Asks `label` until the answer parses as a number.
    ///
    /// # Errors
    /// Only fails when input is closed, interrupted or unreadable.
    pub async fn number<T: FromStr>(&mut self, label: &str) -> Result<T> {
        loop {
            let raw = self.text(label).await?;
            if let Ok(value) = raw.parse() {
                return Ok(value);
            }
            debug!(input = %raw, "Rejected non-numeric answer");
            self.say(format!("Expected a whole number, got '{raw}'. Try again."))
                .await?;
        }
    }

    /// Asks `label` until the answer is not blank.
    ///
    /// # Errors
    /// Only fails when input is closed, interrupted or unreadable.
    pub async fn non_empty(&mut self, label: &str) -> Result<String> {
        loop {
            let answer = self.text(label).await?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("An answer is required. Try again.").await?;
        }
    }

    /// Asks a yes/no question; anything starting with `y` means yes.
    ///
    /// # Errors
    /// Only fails when input is closed, interrupted or unreadable.
    pub async fn confirm(&mut self, label: &str) -> Result<bool> {
        Ok(self.text(label).await?.to_lowercase().starts_with('y'))
    }
}
