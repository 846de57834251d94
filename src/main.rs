use std::process;

use nepse_price_bot::bot::{run_dispatcher, BotConfig, Companies, PriceFetcher};
use teloxide::prelude::*;

#[tokio::main]
pub async fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();
    log::info!("Starting price bot...");

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(err) => fatal(err),
    };

    let companies = match Companies::load(&config.companies_path) {
        Ok(companies) => companies,
        Err(err) => fatal(err),
    };
    if companies.is_empty() {
        log::warn!(
            "No companies in {}, every lookup will come back not found",
            config.companies_path
        );
    } else {
        log::info!(
            "Loaded {} companies from {}",
            companies.len(),
            config.companies_path
        );
    }

    let fetcher = match PriceFetcher::new(&config.exchange_host, config.fetch_timeout) {
        Ok(fetcher) => fetcher,
        Err(err) => fatal(err),
    };

    let bot = Bot::new(config.token);
    let me = match bot.get_me().await {
        Ok(me) => me,
        Err(err) => fatal(format!("could not open chat session: {err}")),
    };

    log::info!(
        "Bot @{} is now running. Press CTRL-C to exit.",
        me.username()
    );

    run_dispatcher(bot, companies, fetcher).await;

    log::info!("Chat session closed.");
}

fn fatal<E: std::fmt::Display>(err: E) -> ! {
    log::error!("{err}");
    process::exit(1);
}
