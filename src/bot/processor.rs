use super::{
    api::{PriceFetcher, FETCH_ERROR_MESSAGE},
    companies::Companies,
};

/* Processor is the overall logic center of the bot.
 * It handles the main logic, communicating with the front-facing handler
 * and the back-facing company table and exchange API.
 * Errors from the exchange are logged here and never reach the user in raw form.
 */

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ProcessError {
    #[error("Company not found: {0}")]
    CompanyNotFound(String),
}

/* Retrieves the latest traded price of a company by its symbol.
 * Any failure while fetching or scraping is downgraded to the generic
 * fetch error text, so users cannot tell a timeout from a broken page.
 */
pub async fn get_price(
    companies: &Companies,
    fetcher: &PriceFetcher,
    symbol: &str,
) -> Result<String, ProcessError> {
    let code = match companies.find_code(symbol) {
        Some(code) => code,
        None => return Err(ProcessError::CompanyNotFound(symbol.to_string())),
    };

    match fetcher.fetch_price(code).await {
        Ok(price) => Ok(price),
        Err(err) => {
            log::error!("Failed to fetch price for {symbol} ({code}): {err}");
            Ok(FETCH_ERROR_MESSAGE.to_string())
        }
    }
}
