//! # gembot-core
//!
//! Core types and traits for the Discord Gemini bot: message/user/channel types,
//! the [`Handler`] and [`Middleware`] traits, the [`ChatGateway`] send/react/typing
//! abstraction, markup stripping, the response splitter, and tracing initialization.
//! Transport-agnostic; used by gembot-discord, handler-chain, and chat-handlers.

pub mod error;
pub mod gateway;
pub mod logger;
pub mod markup;
pub mod split;
pub mod types;

pub use error::{GembotError, HandlerError, Result};
pub use gateway::ChatGateway;
pub use logger::init_tracing;
pub use markup::strip_markup;
pub use split::{send_chunked, split_message, DEFAULT_CHUNK_LEN};
pub use types::{
    Attachment, Channel, Handler, HandlerResponse, Message, Middleware, ToCoreMessage, ToCoreUser,
    User,
};
