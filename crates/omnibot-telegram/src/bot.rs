//! Dispatcher setup for the Telegram front door.

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{debug, info};

use omnibot_router::Router;
use omnibot_store::FileStore;

use crate::error::Result;
use crate::handlers::{handle_command, handle_message, handle_photo, Command};

/// Shared state for the Telegram handlers.
pub struct BotState {
    /// Dispatch core shared with the HTTP front door.
    pub router: Arc<Router>,
    /// Artifact store for inbound photos and outbound attachments.
    pub files: Arc<FileStore>,
}

/// The polling Telegram front door.
pub struct BotFront {
    bot: Bot,
    state: Arc<BotState>,
}

impl BotFront {
    /// Creates the front door from an already-validated bot token.
    pub fn new(token: &str, router: Arc<Router>, files: Arc<FileStore>) -> Self {
        Self {
            bot: Bot::new(token),
            state: Arc::new(BotState { router, files }),
        }
    }

    /// The bot's username, fetched from the Telegram API.
    pub async fn username(&self) -> Result<String> {
        let me = self.bot.get_me().await?;
        Ok(me.username().to_string())
    }

    /// Registers the slash-command menu so clients can offer completion.
    pub async fn set_commands(&self) -> Result<()> {
        self.bot.set_my_commands(Command::bot_commands()).await?;
        Ok(())
    }

    /// Runs the long-polling dispatcher until the process is stopped.
    pub async fn run(self) {
        let state_for_commands = Arc::clone(&self.state);
        let state_for_photos = Arc::clone(&self.state);
        let state_for_messages = Arc::clone(&self.state);

        let handler = dptree::entry()
            .branch(
                Update::filter_message()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = Arc::clone(&state_for_commands);
                        async move { handle_command(bot, msg, cmd, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| msg.photo().is_some())
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_photos);
                        async move { handle_photo(bot, msg, state).await }
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        // Slash-prefixed text that didn't parse as a command.
                        msg.text().map(|t| t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(|msg: Message| async move {
                        debug!(text = ?msg.text(), "ignoring unrecognized command");
                        respond(())
                    }),
            )
            .branch(
                Update::filter_message()
                    .filter(|msg: Message| {
                        msg.text().map(|t| !t.starts_with('/')).unwrap_or(false)
                    })
                    .endpoint(move |bot: Bot, msg: Message| {
                        let state = Arc::clone(&state_for_messages);
                        async move { handle_message(bot, msg, state).await }
                    }),
            );

        info!("Telegram front door polling for updates");

        Dispatcher::builder(self.bot, handler)
            .default_handler(|update| async move {
                debug!(update = ?update, "unhandled update");
            })
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}
