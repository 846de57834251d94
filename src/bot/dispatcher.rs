use std::sync::Arc;

use teloxide::{
    dispatching::{ShutdownToken, UpdateHandler},
    prelude::*,
    types::{AllowedUpdate, Me, UserId},
    update_listeners::Polling,
    RequestError,
};

use super::{api::PriceFetcher, companies::Companies, handler::action_price};

/* Dispatcher wires incoming chat updates to the handlers.
 * Only plain messages are requested from the chat server. Anything that is not
 * a price command, or that the bot wrote itself, is dropped without a reply.
 */

/* Types */
pub type HandlerResult = Result<(), BotError>;

#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("Request error: {0}")]
    RequestError(RequestError),
}

impl From<RequestError> for BotError {
    fn from(request_error: RequestError) -> BotError {
        BotError::RequestError(request_error)
    }
}

pub const COMMAND_PREFIX: &str = "!price ";

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Price { symbol: String },
}

impl Command {
    // Everything after the prefix is the symbol, untouched.
    pub fn parse(text: &str) -> Option<Command> {
        text.strip_prefix(COMMAND_PREFIX).map(|symbol| Command::Price {
            symbol: symbol.to_string(),
        })
    }
}

/* Utility functions */
pub fn is_own_message(author: Option<UserId>, me: UserId) -> bool {
    author == Some(me)
}

pub fn parse_request(msg: &Message, me: &Me) -> Option<Command> {
    if is_own_message(msg.from().map(|user| user.id), me.user.id) {
        return None;
    }
    Command::parse(msg.text()?)
}

fn schema() -> UpdateHandler<BotError> {
    Update::filter_message()
        .filter_map(|msg: Message, me: Me| parse_request(&msg, &me))
        .endpoint(action_price)
}

#[cfg(unix)]
fn spawn_sigterm_handler(token: ShutdownToken) {
    use tokio::signal::unix::{signal, SignalKind};

    tokio::spawn(async move {
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(err) => {
                log::warn!("Could not listen for SIGTERM: {err}");
                return;
            }
        };
        sigterm.recv().await;

        log::info!("SIGTERM received, closing the chat session...");
        match token.shutdown() {
            Ok(shutdown) => shutdown.await,
            Err(_) => log::warn!("Dispatcher was idle, nothing to shut down"),
        }
    });
}

#[cfg(not(unix))]
fn spawn_sigterm_handler(_token: ShutdownToken) {}

/* Main Dispatch function */
pub async fn run_dispatcher(bot: Bot, companies: Companies, fetcher: PriceFetcher) {
    let mut dispatcher = Dispatcher::builder(bot.clone(), schema())
        .dependencies(dptree::deps![Arc::new(companies), fetcher])
        .default_handler(|update| async move {
            log::trace!("Ignoring update {:?}", update.id);
        })
        .enable_ctrlc_handler()
        .build();

    spawn_sigterm_handler(dispatcher.shutdown_token());

    let listener = Polling::builder(bot)
        .allowed_updates(vec![AllowedUpdate::Message])
        .build();

    dispatcher
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_command() {
        assert_eq!(
            Command::parse("!price nabil"),
            Some(Command::Price {
                symbol: "nabil".to_string()
            })
        );
    }

    #[test]
    fn test_parse_keeps_remainder_untrimmed() {
        assert_eq!(
            Command::parse("!price  NTC "),
            Some(Command::Price {
                symbol: " NTC ".to_string()
            })
        );
        assert_eq!(
            Command::parse("!price "),
            Some(Command::Price {
                symbol: "".to_string()
            })
        );
    }

    #[test]
    fn test_parse_ignores_other_messages() {
        assert_eq!(Command::parse("hello there"), None);
        assert_eq!(Command::parse("!price"), None);
        assert_eq!(Command::parse("!pricenabil"), None);
        assert_eq!(Command::parse("!PRICE nabil"), None);
        assert_eq!(Command::parse(" !price nabil"), None);
        assert_eq!(Command::parse("/price nabil"), None);
    }

    #[test]
    fn test_is_own_message() {
        let me = UserId(42);
        assert!(is_own_message(Some(UserId(42)), me));
        assert!(!is_own_message(Some(UserId(7)), me));
        assert!(!is_own_message(None, me));
    }

    fn me() -> Me {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "is_bot": true,
            "first_name": "Price Bot",
            "username": "price_bot",
            "can_join_groups": true,
            "can_read_all_group_messages": true,
            "supports_inline_queries": false
        }))
        .unwrap()
    }

    fn message(from_id: u64, text: &str) -> Message {
        serde_json::from_value(serde_json::json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": -1001160242915i64, "title": "stocks", "type": "supergroup"},
            "from": {"id": from_id, "is_bot": from_id == 42, "first_name": "Sita"},
            "text": text
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_request() {
        assert_eq!(
            parse_request(&message(7, "!price nabil"), &me()),
            Some(Command::Price {
                symbol: "nabil".to_string()
            })
        );
        assert_eq!(parse_request(&message(7, "what is nabil at?"), &me()), None);
    }

    #[test]
    fn test_parse_request_skips_own_messages() {
        assert_eq!(parse_request(&message(42, "!price nabil"), &me()), None);
    }
}
