#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use tracing::Span;

use super::resolve_payload;
use super::DisplaySettings;
use super::ProductCard;
use crate::domain::models::AlertKind;
use crate::domain::models::Author;
use crate::domain::models::Element;
use crate::domain::models::Message;
use crate::domain::models::MessageContent;
use crate::domain::models::ProductError;
use crate::domain::models::ProductRecord;
use crate::domain::models::Role;
use crate::domain::models::Turn;

pub fn title(settings: &DisplaySettings) -> Element {
    return Element::Heading(settings.app_name.to_string());
}

pub fn initial_turn() -> Turn {
    return Turn::new(
        Author::Assistant,
        vec![
            Element::Markdown("This is a conversational product recommendation assistant. Describe the product you are looking for in the chat, and I will recommend one that fits.".to_string()),
            Element::Bold("Examples".to_string()),
            Element::Alert(
                AlertKind::Info,
                [
                    "- Wireless earbuds with long battery life and great sound",
                    "- A desk lamp",
                    "- A humidifier that charges over USB",
                ]
                .join("\n"),
            ),
        ],
    );
}

/// Renders a single message. Assistant messages must parse into a complete
/// product record.
pub fn render_message(
    message: &Message,
    settings: &DisplaySettings,
    span: &Span,
) -> Result<Turn, ProductError> {
    match message.role {
        Role::User => {
            let text = match &message.content {
                MessageContent::Text(text) => text.to_string(),
                MessageContent::Payload(payload) => {
                    resolve_payload(payload, span)?.text().to_string()
                }
            };

            return Ok(Turn::new(message.author(), vec![Element::Markdown(text)]));
        }
        Role::Assistant => {
            let record = ProductRecord::from_payload(&message.payload(), span)?;
            let elements = ProductCard::new(&record, settings).elements();

            return Ok(Turn::new(message.author(), elements));
        }
    }
}

/// Renders the log in insertion order, stopping at the first message that
/// fails to render.
pub fn render_conversation(
    messages: &[Message],
    settings: &DisplaySettings,
    span: &Span,
) -> Result<Vec<Turn>, ProductError> {
    return messages
        .iter()
        .map(|message| return render_message(message, settings, span))
        .collect();
}
