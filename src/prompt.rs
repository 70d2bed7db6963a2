//! Prompt template for the event filter.

use crate::types::{EventBatch, Prompt};

/// Interests the model filters for. Fixed; the prompt never varies beyond the events.
pub const INTERESTS: [&str; 3] = ["elektronische Musik", "Kunst & Technologie", "kleine Events"];

const HEADER: &str = "Filtere diese Events nach meinen Interessen:";

/// Render the prompt for a batch of events
pub fn build_prompt(events: &EventBatch) -> Prompt {
    let mut text = String::from("\n");
    text.push_str(HEADER);
    text.push('\n');
    for interest in INTERESTS {
        text.push_str("- ");
        text.push_str(interest);
        text.push('\n');
    }
    text.push_str("\nEvents:\n");
    text.push_str(&events.to_text());
    text.push('\n');
    Prompt::new(text)
}
