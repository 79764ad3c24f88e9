//! Command, message, and photo handlers for the Telegram front door.

use std::sync::Arc;

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::InputFile;
use teloxide::utils::command::BotCommands;
use tracing::{debug, error, info, warn};

use omnibot_router::{Reply, Request, IMG_MARKER};
use omnibot_store::FileStore;

use crate::bot::BotState;
use crate::error::Result;

/// Interstitial sent before AI-bound calls, so the user sees the bot took
/// the message while the upstream call is in flight.
const THINKING: &str = "⏳ Thinking...";
const ANALYZING: &str = "⏳ Analyzing the image and answering...";

const PHOTO_SAVE_FAILED: &str = "Failed to save image.";

/// Bot commands that can be invoked with /.
#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,

    #[command(description = "Show help")]
    Help,

    #[command(description = "Chat with AI: /ai <your question>")]
    Ai(String),

    #[command(description = "Search Wikipedia: /wiki <topic>")]
    Wiki(String),

    #[command(description = "Weather info: /weather <city>")]
    Weather(String),

    #[command(description = "Generate an image: /image <prompt>")]
    Image(String),

    #[command(description = "Make a meme: /meme <text>")]
    Meme(String),

    #[command(description = "Text to speech: /tts <text>")]
    Tts(String),

    #[command(description = "Text to PDF: /pdf <text>")]
    Pdf(String),

    #[command(description = "Save a note, or list them: /note [text]")]
    Note(String),

    #[command(description = "Show saved notes")]
    Notes,
}

impl Command {
    fn into_request(self) -> Request {
        match self {
            Command::Start => Request::Start,
            Command::Help => Request::Help,
            Command::Ai(query) => Request::Ai(query),
            Command::Wiki(topic) => Request::Wiki(topic),
            Command::Weather(city) => Request::Weather(city),
            Command::Image(prompt) => Request::Image(prompt),
            Command::Meme(text) => Request::Meme(text),
            Command::Tts(text) => Request::Tts(text),
            Command::Pdf(text) => Request::Pdf(text),
            Command::Note(text) => Request::Note(text),
            Command::Notes => Request::Notes,
        }
    }
}

/// Handles a parsed slash command.
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<BotState>,
) -> ResponseResult<()> {
    info!(chat_id = %msg.chat.id, command = ?cmd, "command received");

    // The AI call can take a while; acknowledge first. Missing-argument
    // invocations skip the interstitial and go straight to the usage reply.
    if matches!(&cmd, Command::Ai(query) if !query.trim().is_empty()) {
        bot.send_message(msg.chat.id, THINKING).await?;
    }

    let reply = state.router.dispatch(cmd.into_request()).await;
    deliver(&bot, msg.chat.id, reply, &state.files).await
}

/// Handles free text: image questions (`img:` marker) and direct chat.
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let text = text.trim().to_string();
    if text.is_empty() || text.starts_with('/') {
        // Unrecognized slash commands are ignored.
        return Ok(());
    }

    if let Some(interstitial) = interstitial_for(&text) {
        bot.send_message(msg.chat.id, interstitial).await?;
    }

    // The messaging front door knows no request host; image references fall
    // back to the configured public base.
    let reply = state.router.dispatch(Request::Text { text, host: None }).await;
    deliver(&bot, msg.chat.id, reply, &state.files).await
}

/// Picks the acknowledgment for an AI-bound free-text message, if any.
fn interstitial_for(text: &str) -> Option<&'static str> {
    match text.strip_prefix(IMG_MARKER) {
        Some(rest) => {
            let has_question = rest
                .split_once(char::is_whitespace)
                .is_some_and(|(_, question)| !question.trim().is_empty());
            // Missing question gets an immediate fixed reply, no AI call.
            has_question.then_some(ANALYZING)
        }
        None => Some(THINKING),
    }
}

/// Handles an inbound photo: stores the largest size and tells the sender
/// how to ask about it.
pub async fn handle_photo(bot: Bot, msg: Message, state: Arc<BotState>) -> ResponseResult<()> {
    let Some(photo) = msg.photo().and_then(|sizes| sizes.last()) else {
        return Ok(());
    };

    match download_photo(&bot, &photo.file.id).await {
        Ok(bytes) => match state.files.save(&bytes, "tg.jpg") {
            Ok(filename) => {
                info!(chat_id = %msg.chat.id, filename = %filename, "photo stored");
                bot.send_message(
                    msg.chat.id,
                    format!(
                        "Image received and saved. To ask about it, type:\n\
                         img:{filename} <your question>\n\
                         (example: img:{filename} What is in this picture?)"
                    ),
                )
                .await?;
            }
            Err(e) => {
                error!(chat_id = %msg.chat.id, error = %e, "failed to store photo");
                bot.send_message(msg.chat.id, PHOTO_SAVE_FAILED).await?;
            }
        },
        Err(e) => {
            error!(chat_id = %msg.chat.id, error = %e, "photo download failed");
            bot.send_message(msg.chat.id, PHOTO_SAVE_FAILED).await?;
        }
    }

    Ok(())
}

async fn download_photo(bot: &Bot, file_id: &str) -> Result<Vec<u8>> {
    let file = bot.get_file(file_id.to_string()).await?;
    let mut buf = std::io::Cursor::new(Vec::new());
    bot.download_file(&file.path, &mut buf).await?;
    Ok(buf.into_inner())
}

/// Delivers a router reply in its native Telegram shape.
pub async fn deliver(
    bot: &Bot,
    chat_id: ChatId,
    reply: Reply,
    files: &FileStore,
) -> ResponseResult<()> {
    match reply {
        Reply::Text(text) => {
            bot.send_message(chat_id, text).await?;
        }

        Reply::Photo { url, caption } => match url::Url::parse(&url) {
            Ok(parsed) => {
                bot.send_photo(chat_id, InputFile::url(parsed))
                    .caption(caption)
                    .await?;
            }
            Err(e) => {
                warn!(url = %url, error = %e, "generated photo URL did not parse");
                bot.send_message(chat_id, caption).await?;
            }
        },

        Reply::Audio { filename } => {
            bot.send_audio(chat_id, InputFile::file(files.path_of(&filename)))
                .await?;
            cleanup_artifact(files, &filename);
        }

        Reply::Document { filename } => {
            bot.send_document(chat_id, InputFile::file(files.path_of(&filename)))
                .await?;
            cleanup_artifact(files, &filename);
        }
    }

    Ok(())
}

// Speech and document outputs are ephemeral; a failed delete only leaks a
// file in the uploads directory.
fn cleanup_artifact(files: &FileStore, filename: &str) {
    if let Err(e) = files.delete(filename) {
        debug!(filename = %filename, error = %e, "could not delete sent artifact");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interstitial_for_plain_text() {
        assert_eq!(interstitial_for("hello there"), Some(THINKING));
    }

    #[test]
    fn test_interstitial_for_image_question() {
        assert_eq!(
            interstitial_for("img:123_tg.jpg what is this"),
            Some(ANALYZING)
        );
    }

    #[test]
    fn test_no_interstitial_for_image_without_question() {
        assert_eq!(interstitial_for("img:123_tg.jpg"), None);
        assert_eq!(interstitial_for("img:123_tg.jpg   "), None);
    }
}
