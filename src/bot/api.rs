use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};

/* API contains the logic for calling the stock exchange website.
 * Links the bot's logic with the company page it scrapes prices from.
 * Called and used by the Processor only.
 */

pub const FETCH_ERROR_MESSAGE: &str = "err: could not fetch price";

const TABLE_SELECTOR: &str = ".my-table.table";
const ROW_SELECTOR: &str = "tr";
const CELL_SELECTOR: &str = "td";
const PRICE_CAPTION: &str = "Last Traded Price (Rs.)";

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("could not Get(): {0}")]
    Request(#[from] reqwest::Error),
    #[error("price not found on company page")]
    PriceNotFound,
}

#[derive(Clone, Debug)]
pub struct PriceFetcher {
    client: Client,
    host: String,
}

impl PriceFetcher {
    pub fn new(host: &str, timeout: Duration) -> Result<PriceFetcher, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(PriceFetcher {
            client,
            host: host.to_string(),
        })
    }

    pub fn company_url(&self, id: i64) -> String {
        format!("http://{}/company/display/{id}", self.host)
    }

    // Fetches the company page once and scrapes the last traded price from it.
    pub async fn fetch_price(&self, id: i64) -> Result<String, ApiError> {
        let url = self.company_url(id);
        log::debug!("Fetching price from {url}");

        let body = self.client.get(url).send().await?.text().await?;
        extract_price(&body).ok_or(ApiError::PriceNotFound)
    }
}

/* Scrapes the price table of a company page.
 * Walks every cell of the first matching table in document order. A cell whose
 * text is exactly the caption arms a flag, and the next cell's text (even if it
 * sits in the following row) is captured as the price.
 * The capture is overwritten every time the caption shows up again, so the
 * cell after the last caption wins.
 */
pub fn extract_price(html: &str) -> Option<String> {
    let table_selector = Selector::parse(TABLE_SELECTOR).ok()?;
    let row_selector = Selector::parse(ROW_SELECTOR).ok()?;
    let cell_selector = Selector::parse(CELL_SELECTOR).ok()?;

    let document = Html::parse_document(html);
    let table = document.select(&table_selector).next()?;

    let mut found = false;
    let mut price = String::new();
    for row in table.select(&row_selector) {
        for cell in row.select(&cell_selector) {
            let text: String = cell.text().collect();
            if found {
                price = text.clone();
                found = false;
            }
            if text == PRICE_CAPTION {
                found = true;
            }
        }
    }

    if price.is_empty() {
        None
    } else {
        Some(price)
    }
}
