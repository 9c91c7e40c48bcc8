//! # chat-handlers
//!
//! Dispatch branches for inbound messages, as handler-chain pieces:
//! [`AddressGate`] drops bot-authored and un-addressed messages,
//! [`EveryoneHandler`] acknowledges @everyone broadcasts, [`ResetHandler`]
//! clears conversation history, [`TextHandler`] runs the text path, and
//! [`ImageHandler`] runs the attachment path.

mod gate;
mod image_handler;
mod reset;
mod resize;
mod text;

pub use gate::{AddressGate, EveryoneHandler};
pub use image_handler::ImageHandler;
pub use reset::ResetHandler;
pub use resize::{resize_to_limit, MAX_IMAGE_BYTES};
pub use text::TextHandler;

/// Reaction acknowledging a text request.
pub const REACTION_TEXT: &str = "💬";
/// Reaction acknowledging an image request.
pub const REACTION_IMAGE: &str = "🎨";
/// Prefix for backend-reported generation failures forwarded to the user.
pub const FAILURE_MARKER: &str = "❌";
/// Prompt used when an image arrives with no accompanying text.
pub const DEFAULT_IMAGE_PROMPT: &str = "What is this a picture of?";
