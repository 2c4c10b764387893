//! LINE webhook wire types.
//!
//! Only the fields linedrop acts on or logs are modelled; everything else in
//! the payload is ignored. Unknown event and message kinds decode to an
//! `Other` variant instead of failing the whole request.

use serde::Deserialize;

/// Top-level webhook body: `{ "destination": ..., "events": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackRequest {
    /// Bot user id the events were delivered to.
    pub destination: Option<String>,
    pub events: Vec<WebhookEvent>,
}

/// Non-message kinds carry no data linedrop acts on.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message(MessageEvent),
    Follow,
    Unfollow,
    Join,
    Leave,
    Postback,
    #[serde(other)]
    Other,
}

impl WebhookEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            WebhookEvent::Message(_) => "message",
            WebhookEvent::Follow => "follow",
            WebhookEvent::Unfollow => "unfollow",
            WebhookEvent::Join => "join",
            WebhookEvent::Leave => "leave",
            WebhookEvent::Postback => "postback",
            WebhookEvent::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub message: Message,
    pub source: Option<Source>,
    /// Stable across redeliveries of the same event.
    pub webhook_event_id: Option<String>,
}

impl MessageEvent {
    /// Sending user's id, when the source exposes one.
    pub fn user_id(&self) -> Option<&str> {
        self.source.as_ref().and_then(Source::user_id)
    }
}

/// Only images carry data linedrop reads; the other kinds decode without
/// looking at their fields, so a sparse text or sticker payload never fails
/// the batch it arrives in.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Image { id: String },
    Text,
    Video,
    Audio,
    File,
    Location,
    Sticker,
    #[serde(other)]
    Other,
}

impl Message {
    pub fn kind(&self) -> &'static str {
        match self {
            Message::Image { .. } => "image",
            Message::Text => "text",
            Message::Video => "video",
            Message::Audio => "audio",
            Message::File => "file",
            Message::Location => "location",
            Message::Sticker => "sticker",
            Message::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Source {
    User {
        #[serde(rename = "userId")]
        user_id: Option<String>,
    },
    Group {
        #[serde(rename = "userId")]
        user_id: Option<String>,
    },
    Room {
        #[serde(rename = "userId")]
        user_id: Option<String>,
    },
}

impl Source {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Source::User { user_id } | Source::Group { user_id } | Source::Room { user_id } => {
                user_id.as_deref()
            }
        }
    }
}
