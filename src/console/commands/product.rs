//! Product actions - add, remove, recount, list and show details.
//!
//! Handlers talk to the operator through the session's prompt and call into the
//! inventory. Recoverable errors are returned to the session loop, which reports
//! them; a negative quantity is asked for again on the spot.

use crate::{
    console::{Session, display},
    core::{Lookup, ProductId, product::title_case},
    errors::{Error, Result},
};
use tokio::io::{AsyncBufRead, AsyncWrite};
use tracing::{debug, info};

/// Asks for a name and a starting count, then adds the product.
pub async fn add<R, W>(session: &mut Session<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let name = session.prompt.non_empty("Product name: ").await?;
    let shown = title_case(&name);

    loop {
        let quantity: i64 = session
            .prompt
            .number(&format!("How many {shown} are in stock: "))
            .await?;
        match session.inventory.add_product(&name, Some(quantity)) {
            Ok(product) => {
                let message = format!("{} was added successfully.", product.display_name());
                session.prompt.say(message).await?;
                return Ok(());
            }
            Err(e @ Error::InvalidQuantity { .. }) => {
                debug!(error = %e, "Asking for the starting quantity again");
                session
                    .prompt
                    .say("The quantity cannot be negative. Try again.")
                    .await?;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Finds a product by name and deletes it after confirmation.
pub async fn remove<R, W>(session: &mut Session<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = resolve_product(session).await?;

    if session
        .prompt
        .confirm("Do you really want to delete it? (yes/no): ")
        .await?
    {
        session.inventory.remove_product(id)?;
        session.prompt.say("Deleted successfully.").await?;
    } else {
        info!(product_id = %id, "Removal cancelled by operator");
        session.prompt.say("Cancelling...").await?;
    }
    Ok(())
}

/// Finds a product by name and replaces its stock count.
pub async fn recount<R, W>(session: &mut Session<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = resolve_product(session).await?;

    loop {
        let quantity: i64 = session
            .prompt
            .number("What is the new stock count: ")
            .await?;
        match session.inventory.recount(id, quantity) {
            Ok(_) => {
                session.prompt.say("Saved successfully.").await?;
                return Ok(());
            }
            Err(e @ Error::InvalidQuantity { .. }) => {
                debug!(error = %e, "Asking for the new count again");
                session
                    .prompt
                    .say("The new count cannot be negative. Try again.")
                    .await?;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Shows the stock table.
pub async fn list<R, W>(session: &mut Session<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let Some(table) = display::stock_table(&session.inventory) else {
        session.prompt.say("No products in stock.").await?;
        return Ok(());
    };
    session.prompt.say(table).await?;
    display::pause(session.display.table_pause()).await;
    Ok(())
}

/// Finds a product by name and shows its details.
pub async fn info<R, W>(session: &mut Session<R, W>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let id = resolve_product(session).await?;
    let product = session
        .inventory
        .get(id)
        .ok_or_else(|| Error::ProductNotFound {
            name: id.to_string(),
        })?;

    let details = display::product_details(&product.describe());
    session.prompt.say("").await?;
    session.prompt.say(details).await?;
    display::pause(session.display.info_pause()).await;
    Ok(())
}

/// Asks for a product name and narrows it down to a single product.
///
/// When several products match, they are listed with their indexes and the
/// operator is asked until a valid index is given.
///
/// # Errors
/// Returns `Error::ProductNotFound` when nothing matches the name.
pub async fn resolve_product<R, W>(session: &mut Session<R, W>) -> Result<ProductId>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let query = session.prompt.text("Product name: ").await?;
    let candidates = match session.inventory.find_by_name(&query)? {
        Lookup::Found(product) => return Ok(product.id()),
        Lookup::Ambiguous(candidates) => candidates,
    };

    session.prompt.say("I found these products:").await?;
    for (index, product) in candidates.iter().enumerate() {
        session
            .prompt
            .say(format!(" - {index}) {}", product.display_name()))
            .await?;
    }

    loop {
        let index: usize = session.prompt.number("Which product: ").await?;
        match candidates.select(index) {
            Ok(product) => return Ok(product.id()),
            Err(e @ Error::OutOfRangeSelection { .. }) => session.prompt.say(e).await?,
            Err(e) => return Err(e),
        }
    }
}
