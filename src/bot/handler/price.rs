use std::sync::Arc;

use teloxide::prelude::*;

use crate::bot::{
    api::PriceFetcher,
    companies::Companies,
    dispatcher::{Command, HandlerResult},
    processor::{get_price, ProcessError},
};

pub const NOT_FOUND_MESSAGE: &str = "name not found in the list";
const PRICE_LABEL: &str = "Price: Rs. ";

/* Builds the reply text for a price request.
 */
pub async fn price_reply(companies: &Companies, fetcher: &PriceFetcher, symbol: &str) -> String {
    match get_price(companies, fetcher, symbol).await {
        Ok(price) => format!("{PRICE_LABEL}{price}"),
        Err(ProcessError::CompanyNotFound(_)) => NOT_FOUND_MESSAGE.to_string(),
    }
}

/* Price command.
 * Looks up the requested company and replies in the same chat with its
 * last traded price, or a fixed message if it cannot.
 */
pub async fn action_price(
    bot: Bot,
    msg: Message,
    cmd: Command,
    companies: Arc<Companies>,
    fetcher: PriceFetcher,
) -> HandlerResult {
    let Command::Price { symbol } = cmd;

    let reply = price_reply(&companies, &fetcher, &symbol).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}
