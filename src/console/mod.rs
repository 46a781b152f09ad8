//! Console layer - the interactive menu loop around the inventory.
//!
//! A [`Session`] owns the inventory for the whole run and talks to the operator
//! through a [`Prompt`]. Each pass of the loop shows the menu, runs one action,
//! and pauses. Recoverable domain errors are reported and the loop carries on;
//! only an I/O failure ends the session with an error.

/// Product action handlers (add, remove, recount, list, details)
pub mod commands;
/// Table and detail rendering, screen clearing, pauses
pub mod display;
/// The numbered main menu
pub mod menu;
/// Operator input with retry loops
pub mod prompt;

pub use menu::MenuChoice;
pub use prompt::Prompt;

use crate::{
    config::DisplayConfig,
    core::InventoryManager,
    errors::{Error, Result},
};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{info, instrument, warn};

/// What the loop does after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One operator session over one inventory.
#[derive(Debug)]
pub struct Session<R, W> {
    pub(crate) inventory: InventoryManager,
    pub(crate) display: DisplayConfig,
    pub(crate) prompt: Prompt<R, W>,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a session over `inventory`.
    pub const fn new(inventory: InventoryManager, display: DisplayConfig, prompt: Prompt<R, W>) -> Self {
        Self {
            inventory,
            display,
            prompt,
        }
    }

    /// The inventory as it currently stands.
    pub const fn inventory(&self) -> &InventoryManager {
        &self.inventory
    }

    /// Ends the session, returning the inventory and the prompt streams.
    pub fn into_parts(self) -> (InventoryManager, Prompt<R, W>) {
        (self.inventory, self.prompt)
    }

    /// Runs the menu loop until the operator exits, closes input or presses
    /// Ctrl-C at a prompt.
    ///
    /// # Errors
    /// Returns `Error::Io` if the terminal fails. Domain errors never end the
    /// session.
    #[instrument(skip(self))]
    pub async fn run(&mut self) -> Result<()> {
        info!(products = self.inventory.len(), "Session started");
        loop {
            match self.step().await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e @ (Error::InputClosed | Error::Interrupted)) => {
                    info!(reason = %e, "Ending session");
                    self.prompt.say("").await?;
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        self.prompt.say(":-( Goodbye").await?;
        info!(products = self.inventory.len(), "Session finished");
        Ok(())
    }

    async fn step(&mut self) -> Result<Flow> {
        self.clear().await?;
        self.prompt.say(menu::render()).await?;
        let number: i64 = self.prompt.number("Your choice: ").await?;

        let Some(choice) = MenuChoice::from_number(number) else {
            self.prompt.say("Sorry, I didn't understand that.").await?;
            display::pause(self.display.message_pause()).await;
            return Ok(Flow::Continue);
        };
        if choice == MenuChoice::Exit {
            return Ok(Flow::Exit);
        }

        self.clear().await?;
        match commands::dispatch(self, choice).await {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, ?choice, "Menu action failed");
                self.prompt.say(user_message(&e)).await?;
            }
            Err(e) => return Err(e),
        }

        display::pause(self.display.message_pause()).await;
        Ok(Flow::Continue)
    }

    async fn clear(&mut self) -> Result<()> {
        if self.display.clear_screen {
            self.prompt.write_raw(display::CLEAR_SCREEN).await?;
        }
        Ok(())
    }
}

/// Operator-facing wording for a recoverable error.
fn user_message(error: &Error) -> String {
    match error {
        Error::ProductNotFound { name } => format!(
            "Product '{}' was not found.",
            crate::core::product::title_case(name)
        ),
        Error::InvalidQuantity { .. } => "The quantity cannot be negative.".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::{manager_with, run_script};

    #[tokio::test]
    async fn test_exit_immediately() -> Result<()> {
        let (manager, out) = run_script(InventoryManager::new(), "0\n").await?;
        assert!(manager.is_empty());
        assert!(out.contains("Hello. What would you like to do?"));
        assert!(out.ends_with(":-( Goodbye\n"));
        Ok(())
    }

    #[tokio::test]
    async fn test_closed_input_ends_session_cleanly() -> Result<()> {
        let (_, out) = run_script(InventoryManager::new(), "4\n").await?;
        assert!(out.contains("No products in stock."));
        assert!(out.ends_with(":-( Goodbye\n"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_line_is_asked_again() -> Result<()> {
        let mut script = b"1\n".to_vec();
        script.extend_from_slice(&[0xff, 0xfe, b'\n']);
        script.extend_from_slice(b"widget\n3\n0\n");
        let (manager, out) = run_script(InventoryManager::new(), script).await?;

        assert_eq!(manager.len(), 1);
        assert!(out.contains("That answer could not be read as text. Try again."));
        assert!(out.contains("Widget was added successfully."));
        assert!(out.ends_with(":-( Goodbye\n"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_choice_returns_to_menu() -> Result<()> {
        let (_, out) = run_script(InventoryManager::new(), "9\nhello\n0\n").await?;
        assert!(out.contains("Sorry, I didn't understand that."));
        assert!(out.contains("Expected a whole number, got 'hello'. Try again."));
        assert_eq!(out.matches("Hello. What would you like to do?").count(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_not_found_is_reported_and_session_continues() -> Result<()> {
        let manager = manager_with(&[("apple", 5), ("apple pie", 2)]);
        let (manager, out) = run_script(manager, "2\npie\n0\n").await?;
        assert!(out.contains("Product 'Pie' was not found."));
        assert_eq!(manager.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_clear_screen_is_written_when_enabled() -> Result<()> {
        let display = DisplayConfig {
            clear_screen: true,
            ..DisplayConfig::immediate()
        };
        let prompt = Prompt::new(std::io::Cursor::new(b"0\n".to_vec()), Vec::new());
        let mut session = Session::new(manager_with(&[("tea", 1)]), display, prompt);
        session.run().await?;
        assert_eq!(session.inventory().len(), 1);

        let (_, prompt) = session.into_parts();
        let out = String::from_utf8(prompt.into_inner().1).unwrap();
        assert!(out.starts_with(display::CLEAR_SCREEN));
        Ok(())
    }
}
