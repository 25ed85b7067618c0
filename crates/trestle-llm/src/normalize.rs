//! Multimodal-to-text message normalization
//!
//! The backends this adapter fronts have no multimodal support, so any
//! non-text content in a user message is degraded to a descriptive text
//! placeholder before the request goes out. Total function: unrecognized
//! content falls back to its serialized representation rather than
//! failing the request.

use crate::types::{Content, ContentPart, Message, Role};

/// Rewrite messages so that every user message carries plain text
///
/// User messages whose content is a part list become a single text
/// message: the transformed fragments of all parts, joined with one
/// space, in part order. Everything else passes through unmodified.
pub fn convert_files_to_text(messages: Vec<Message>) -> Vec<Message> {
    messages.into_iter().map(convert_message).collect()
}

fn convert_message(message: Message) -> Message {
    if message.role != Role::User {
        return message;
    }

    let Content::Parts(parts) = &message.content else {
        return message;
    };

    let text = parts.iter().map(part_to_text).collect::<Vec<_>>().join(" ");

    Message {
        content: Content::Text(text),
        ..message
    }
}

fn part_to_text(part: &ContentPart) -> String {
    match part {
        ContentPart::Text { text } => text.clone(),
        ContentPart::Image { url: Some(url) } => format!("[Image file uploaded]: {url}"),
        ContentPart::Image { url: None } => "[Image file uploaded]".to_owned(),
        ContentPart::Document { url: Some(url) } => format!("[Document file uploaded]: {url}"),
        ContentPart::Document { url: None } => "[Document file uploaded]".to_owned(),
        ContentPart::Other { url: Some(url) } => format!("[File uploaded]: {url}"),
        // No URL to describe the file by; fall back to the raw representation
        other @ ContentPart::Other { url: None } => serde_json::to_string(other).unwrap_or_default(),
    }
}
