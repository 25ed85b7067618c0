//! Reasoning-stream reassembly
//!
//! Some backends stream their reasoning narrative through a separate
//! delta field (`reasoning` in the `OpenRouter` dialect,
//! `reasoning_content` elsewhere) instead of `content`. Downstream
//! renderers expect a single content stream where the narrative is
//! delimited by think-tags; this module merges the two fields back into
//! one stream, per request.

use crate::protocol::openai::WireStreamDelta;

/// Per-request state machine merging reasoning deltas into the content
/// stream
///
/// A stream that ends while reasoning is still open never emits the
/// closing tag; callers observing a truncated narrative see exactly what
/// the backend sent.
#[derive(Debug, Default)]
pub struct ThinkTagStream {
    is_reasoning: bool,
}

impl ThinkTagStream {
    /// Start a fresh stream with reasoning closed
    pub const fn new() -> Self {
        Self { is_reasoning: false }
    }

    /// Whether a think-tag region is currently open
    pub const fn is_reasoning(&self) -> bool {
        self.is_reasoning
    }

    /// Merge one delta into the content stream
    ///
    /// The reasoning fragment is taken from `reasoning` first, then
    /// `reasoning_content`; the first non-empty field wins.
    pub fn wrap(&mut self, delta: &WireStreamDelta) -> String {
        let content = delta.content.as_deref().unwrap_or("");
        let fragment = delta
            .reasoning
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| delta.reasoning_content.as_deref().filter(|s| !s.is_empty()));

        if let Some(fragment) = fragment {
            if self.is_reasoning {
                fragment.to_owned()
            } else {
                self.is_reasoning = true;
                format!("<think>\n{fragment}")
            }
        } else if self.is_reasoning && !content.is_empty() {
            self.is_reasoning = false;
            format!("\n</think>{content}")
        } else {
            content.to_owned()
        }
    }
}

/// Wrap a fully materialized response's reasoning into the same
/// think-tag convention
///
/// Used when a blocking response is replayed as a single synthetic
/// chunk: the whole narrative is present at once, so the region is
/// opened and closed in one pass.
pub fn wrap_complete(reasoning: Option<&str>, content: &str) -> String {
    match reasoning.filter(|s| !s.is_empty()) {
        Some(reasoning) => format!("<think>\n{reasoning}\n</think>{content}"),
        None => content.to_owned(),
    }
}
