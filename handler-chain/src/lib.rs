//! # Handler chain
//!
//! Runs a sequence of middleware and handlers for each message. Order per
//! message: middleware `before` (any false stops the chain), handler `before`
//! (any false skips the handle phase), `handle` until the first Stop or Reply,
//! handler `after` in reverse with the final response, middleware `after` in
//! reverse.

use gembot_core::{Handler, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of middleware and handlers.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no middleware, no handlers).
    pub fn new() -> Self {
        Self {
            middleware: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Appends a middleware (runs before handlers, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs the full chain for one message and returns the final response:
    /// the first Stop or Reply, or Continue if every handler passed.
    #[instrument(skip(self, message))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(
            user_id = message.user.id,
            channel_id = message.channel.id,
            message_id = %message.id,
            "step: handler_chain started"
        );

        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            if !mw.before(message).await? {
                info!(
                    user_id = message.user.id,
                    middleware = %mw_name,
                    "step: middleware before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
            debug!(middleware = %mw_name, "Middleware before passed");
        }

        let mut final_response = HandlerResponse::Continue;
        let mut blocked = false;
        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = %handler_name,
                    "step: handler before returned false, handle phase skipped"
                );
                final_response = HandlerResponse::Stop;
                blocked = true;
                break;
            }
        }

        if !blocked {
            for handler in &self.handlers {
                let handler_name = std::any::type_name_of_val(handler.as_ref());
                let response = handler.handle(message).await?;
                info!(
                    user_id = message.user.id,
                    handler = %handler_name,
                    response = response_label(&response),
                    "step: handler done"
                );
                match response {
                    HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                        final_response = response;
                        break;
                    }
                    HandlerResponse::Continue | HandlerResponse::Ignore => continue,
                }
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }
        for mw in self.middleware.iter().rev() {
            mw.after(message, &final_response).await?;
        }

        info!(
            user_id = message.user.id,
            channel_id = message.channel.id,
            message_id = %message.id,
            "step: handler_chain finished"
        );

        Ok(final_response)
    }
}

fn response_label(response: &HandlerResponse) -> &'static str {
    match response {
        HandlerResponse::Continue => "Continue",
        HandlerResponse::Stop => "Stop",
        HandlerResponse::Ignore => "Ignore",
        HandlerResponse::Reply(_) => "Reply",
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs
