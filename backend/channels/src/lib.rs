//! LINE Messaging API channel: webhook intake and message content retrieval.

pub mod line;
pub mod line_content;
pub mod line_events;
pub mod line_receive;
pub mod line_signature;

pub use line::{LineConfig, LineWebhook, LINE_SIGNATURE_HEADER};
pub use line_content::LineContentClient;
pub use line_events::{CallbackRequest, Message, MessageEvent, Source, WebhookEvent};
pub use line_receive::{ImageIngest, IngestSummary};
pub use line_signature::{compute_signature, verify_signature};
