#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use ratatui::prelude::Rect;
use tracing::Span;

use super::initial_turn;
use super::render_message;
use super::BubbleList;
use super::DisplaySettings;
use super::Scroll;
use crate::domain::models::AlertKind;
use crate::domain::models::Author;
use crate::domain::models::Element;
use crate::domain::models::Message;
use crate::domain::models::Turn;

pub struct AppState {
    pub bubble_list: BubbleList,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub scroll: Scroll,
    pub title: String,
    pub turns: Vec<Turn>,
}

impl AppState {
    /// A recommendation that fails to parse is replaced by an error bubble so
    /// the rest of the conversation stays readable.
    pub fn new(messages: &[Message], settings: &DisplaySettings, span: &Span) -> AppState {
        let mut turns = vec![initial_turn()];

        for (idx, message) in messages.iter().enumerate() {
            match render_message(message, settings, span) {
                Ok(turn) => turns.push(turn),
                Err(err) => {
                    tracing::warn!(parent: span, message_index = idx, error = %err, "skipping broken recommendation");
                    turns.push(Turn::new(
                        Author::System,
                        vec![Element::Alert(
                            AlertKind::Error,
                            format!("This recommendation could not be displayed.\n\nError: {err}"),
                        )],
                    ));
                }
            }
        }

        return AppState {
            bubble_list: BubbleList::default(),
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            title: settings.app_name.to_string(),
            turns,
        };
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    fn sync_dependants(&mut self) {
        self.bubble_list
            .set_turns(&self.turns, self.last_known_width.into());

        let list_length = u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX);
        self.scroll.set_state(list_length, self.last_known_height);
    }
}
