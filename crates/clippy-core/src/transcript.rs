//! Projection of the conversation into the role-tagged request transcript

use clippy_ai::{ChatRequest, Role, TranscriptEntry};

use crate::message::Message;

/// Persona instruction sent as the first (system) turn
pub const CLIPPY_INSTRUCTION: &str = "You are in an app that revives Microsoft Clippy in Windows. Speak in a Clippy style and try to stay as concise/short as possible and not output long messages.";

/// Build the transcript for one dispatch.
///
/// The system instruction comes first, then every user/assistant message in
/// conversation order (announcements are skipped), then `pending` as a user
/// turn. `pending` is appended even when it is already the last conversation
/// entry, so the newest user turn is sent twice.
pub fn build_transcript(conversation: &[Message], pending: &Message) -> Vec<TranscriptEntry> {
    let mut transcript = Vec::with_capacity(conversation.len() + 2);
    transcript.push(TranscriptEntry::system(CLIPPY_INSTRUCTION));

    transcript.extend(
        conversation
            .iter()
            .filter_map(|m| m.role().map(|role| TranscriptEntry::new(role, m.text()))),
    );

    transcript.push(TranscriptEntry::new(Role::User, pending.text()));
    transcript
}

/// Build the full request body with the configured token budget
pub fn build_request(conversation: &[Message], pending: &Message, max_tokens: u32) -> ChatRequest {
    ChatRequest {
        messages: build_transcript(conversation, pending),
        max_tokens,
    }
}
