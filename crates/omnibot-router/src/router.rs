//! Request model and dispatch.

use std::sync::Arc;

use tracing::{error, info, warn};

use omnibot_services::{
    image_url, meme_url, render_pdf, AiClient, ServiceError, SpeechClient, WeatherClient,
    WeatherReport, WikiClient,
};
use omnibot_store::{FileStore, NotesStore};

use crate::reply::Reply;

/// Marker starting a free-text question about a stored image.
pub const IMG_MARKER: &str = "img:";

// Usage strings, sent verbatim when a required argument is missing. No
// external call is made in that case.
pub const USAGE_AI: &str = "Usage: /ai <your question>";
pub const USAGE_WIKI: &str = "Usage: /wiki <topic>";
pub const USAGE_WEATHER: &str = "Usage: /weather <city>";
pub const USAGE_IMAGE: &str = "Usage: /image <prompt>";
pub const USAGE_MEME: &str = "Usage: /meme <text>";
pub const USAGE_TTS: &str = "Usage: /tts <text>";
pub const USAGE_PDF: &str = "Usage: /pdf <text to convert to pdf>";

// Fixed replies.
pub const START_REPLY: &str = "👋 Hello! I'm an all-in-one AI bot.\nUse commands or chat directly!";
pub const HELP_REPLY: &str =
    "Commands: /ai, /wiki, /weather, /image, /meme, /tts, /pdf, /note, /notes, or just chat directly.";
pub const WIKI_NOT_FOUND: &str = "❌ Couldn't find that on Wikipedia.";
pub const WEATHER_DISABLED: &str = "Weather API key not configured.";
pub const WEATHER_NOT_FOUND: &str = "City not found.";
pub const WEATHER_FETCH_ERROR: &str = "Weather fetch error.";
pub const TTS_FAILED: &str = "TTS failed.";
pub const PDF_FAILED: &str = "PDF creation failed.";
pub const NOTE_SAVED: &str = "✅ Note saved.";
pub const NOTE_SAVE_FAILED: &str = "❌ Could not save that note.";
pub const NO_NOTES: &str = "No notes yet.";
pub const IMG_NEEDS_QUESTION: &str = "Please add your question after the image filename.";

/// A parsed inbound unit: either a recognized command with its argument, or
/// free text (with the originating request host, when the front door knows
/// one).
#[derive(Debug, Clone)]
pub enum Request {
    Start,
    Help,
    Ai(String),
    Wiki(String),
    Weather(String),
    Image(String),
    Meme(String),
    Tts(String),
    Pdf(String),
    /// `note <text>` appends; a bare `note` lists.
    Note(String),
    Notes,
    Text {
        text: String,
        host: Option<String>,
    },
}

/// Routes requests to the shared adapters and stores.
///
/// Cheap to share behind an `Arc`; holds no mutable state of its own.
pub struct Router {
    ai: AiClient,
    wiki: WikiClient,
    weather: WeatherClient,
    tts: SpeechClient,
    files: Arc<FileStore>,
    notes: Arc<NotesStore>,
}

impl Router {
    pub fn new(
        ai: AiClient,
        wiki: WikiClient,
        weather: WeatherClient,
        tts: SpeechClient,
        files: Arc<FileStore>,
        notes: Arc<NotesStore>,
    ) -> Self {
        Self {
            ai,
            wiki,
            weather,
            tts,
            files,
            notes,
        }
    }

    /// Handles one request and produces the reply to deliver.
    pub async fn dispatch(&self, request: Request) -> Reply {
        match request {
            Request::Start => Reply::text(START_REPLY),
            Request::Help => Reply::text(HELP_REPLY),

            Request::Ai(query) => {
                let query = query.trim();
                if query.is_empty() {
                    return Reply::text(USAGE_AI);
                }
                Reply::Text(self.ai.complete(query).await)
            }

            Request::Wiki(topic) => {
                let topic = topic.trim();
                if topic.is_empty() {
                    return Reply::text(USAGE_WIKI);
                }
                match self.wiki.summary(topic).await {
                    Ok(summary) => Reply::Text(summary),
                    Err(e) => {
                        info!(topic, error = %e, "wiki lookup failed");
                        Reply::text(WIKI_NOT_FOUND)
                    }
                }
            }

            Request::Weather(city) => {
                let city = city.trim();
                if city.is_empty() {
                    return Reply::text(USAGE_WEATHER);
                }
                match self.weather.current(city).await {
                    Ok(report) => Reply::Text(format_weather(city, &report)),
                    Err(ServiceError::Disabled(_)) => Reply::text(WEATHER_DISABLED),
                    Err(ServiceError::NotFound) => Reply::text(WEATHER_NOT_FOUND),
                    Err(e) => {
                        warn!(city, error = %e, "weather lookup failed");
                        Reply::text(WEATHER_FETCH_ERROR)
                    }
                }
            }

            Request::Image(prompt) => {
                let prompt = prompt.trim();
                if prompt.is_empty() {
                    return Reply::text(USAGE_IMAGE);
                }
                Reply::Photo {
                    url: image_url(prompt),
                    caption: format!("Image for: {prompt}"),
                }
            }

            Request::Meme(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Reply::text(USAGE_MEME);
                }
                Reply::Photo {
                    url: meme_url(text),
                    caption: format!("Meme: {text}"),
                }
            }

            Request::Tts(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Reply::text(USAGE_TTS);
                }
                match self.tts.synthesize(text, "en").await {
                    Ok(bytes) => match self.files.save(&bytes, "tts.mp3") {
                        Ok(filename) => Reply::Audio { filename },
                        Err(e) => {
                            error!(error = %e, "failed to store speech audio");
                            Reply::text(TTS_FAILED)
                        }
                    },
                    Err(e) => {
                        warn!(error = %e, "speech synthesis failed");
                        Reply::text(TTS_FAILED)
                    }
                }
            }

            Request::Pdf(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Reply::text(USAGE_PDF);
                }
                // Rendering is sync CPU work; keep it off the async workers.
                let rendered = tokio::task::spawn_blocking(move || render_pdf(&text)).await;
                match rendered {
                    Ok(Ok(bytes)) => match self.files.save(&bytes, "doc.pdf") {
                        Ok(filename) => Reply::Document { filename },
                        Err(e) => {
                            error!(error = %e, "failed to store generated document");
                            Reply::text(PDF_FAILED)
                        }
                    },
                    Ok(Err(e)) => {
                        warn!(error = %e, "document rendering failed");
                        Reply::text(PDF_FAILED)
                    }
                    Err(e) => {
                        error!(error = %e, "document rendering task failed");
                        Reply::text(PDF_FAILED)
                    }
                }
            }

            Request::Note(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return self.list_notes();
                }
                match self.notes.append(text) {
                    Ok(()) => Reply::text(NOTE_SAVED),
                    Err(e) => {
                        error!(error = %e, "failed to append note");
                        Reply::text(NOTE_SAVE_FAILED)
                    }
                }
            }

            Request::Notes => self.list_notes(),

            Request::Text { text, host } => {
                Reply::Text(self.dispatch_text(&text, host.as_deref()).await)
            }
        }
    }

    /// Free-text path shared by both front doors.
    ///
    /// Text starting with [`IMG_MARKER`] is a question about a stored image:
    /// the token up to the first whitespace names the artifact, the rest is
    /// the question. Everything else goes to the AI adapter verbatim.
    pub async fn dispatch_text(&self, text: &str, request_host: Option<&str>) -> String {
        let text = text.trim();

        if let Some(rest) = text.strip_prefix(IMG_MARKER) {
            let (filename, question) = match rest.split_once(char::is_whitespace) {
                Some((filename, question)) => (filename, question.trim()),
                None => (rest, ""),
            };
            if question.is_empty() {
                return IMG_NEEDS_QUESTION.to_string();
            }
            let image_url = self.files.public_url(filename, request_host);
            return self.ai.complete(&image_prompt(question, &image_url)).await;
        }

        self.ai.complete(text).await
    }

    fn list_notes(&self) -> Reply {
        let notes = self.notes.list_all();
        if notes.is_empty() {
            return Reply::text(NO_NOTES);
        }
        let listing = notes
            .iter()
            .enumerate()
            .map(|(i, note)| format!("{}. {note}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        Reply::Text(listing)
    }
}

/// Prompt asking the model about a publicly resolvable image.
fn image_prompt(question: &str, image_url: &str) -> String {
    format!(
        "User question about image: {question}\nImage URL: {image_url}\nPlease describe and answer based on the image."
    )
}

fn format_weather(city: &str, report: &WeatherReport) -> String {
    format!(
        "🌤 Weather in {city}:\n🌡 {}°C\n💧 Humidity: {}%\n{}",
        report.temp_c, report.humidity, report.description
    )
}
