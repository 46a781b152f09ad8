//! Menu action handlers organized by category.

/// Product actions
pub mod product;

use crate::{
    console::{MenuChoice, Session},
    errors::Result,
};
use tokio::io::{AsyncBufRead, AsyncWrite};

/// Runs the handler behind a menu entry. `Exit` is handled by the session loop.
pub async fn dispatch<R, W>(
    session: &mut Session<R, W>,
    choice: MenuChoice,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match choice {
        MenuChoice::Add => product::add(session).await,
        MenuChoice::Remove => product::remove(session).await,
        MenuChoice::Recount => product::recount(session).await,
        MenuChoice::List => product::list(session).await,
        MenuChoice::Info => product::info(session).await,
        MenuChoice::Exit => Ok(()),
    }
}
