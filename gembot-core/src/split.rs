//! Fixed-width response splitting for chat platforms with a message length cap.

use crate::error::Result;
use crate::gateway::ChatGateway;
use crate::types::Channel;
use tracing::debug;

/// Default chunk size in characters, under Discord's 2000-character limit.
pub const DEFAULT_CHUNK_LEN: usize = 1700;

/// Splits `text` into consecutive non-overlapping chunks of at most `max_len`
/// characters, preserving order. No word or sentence boundary handling; pure
/// fixed-width slicing. Empty input yields no chunks.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    assert!(max_len > 0, "chunk size must be positive");
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_len)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Sends `text` to `channel` as one message per chunk, in order.
pub async fn send_chunked(
    gateway: &dyn ChatGateway,
    channel: &Channel,
    text: &str,
    max_len: usize,
) -> Result<()> {
    let chunks = split_message(text, max_len);
    debug!(
        channel_id = channel.id,
        chunk_count = chunks.len(),
        total_len = text.len(),
        "Sending chunked response"
    );
    for chunk in chunks {
        gateway.send_message(channel, &chunk).await?;
    }
    Ok(())
}
