use std::collections::HashMap;

use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Turn;

#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

#[derive(Default)]
pub struct BubbleList {
    cache: HashMap<usize, Vec<Line<'static>>>,
    line_width: usize,
    lines_len: usize,
}

impl BubbleList {
    /// Turns are append only, so a cached entry stays valid until the width
    /// changes.
    pub fn set_turns(&mut self, turns: &[Turn], line_width: usize) {
        if self.line_width != line_width {
            self.cache.clear();
            self.line_width = line_width;
        }
        self.cache.retain(|idx, _| return *idx < turns.len());

        self.lines_len = turns
            .iter()
            .enumerate()
            .map(|(idx, turn)| {
                if let Some(lines) = self.cache.get(&idx) {
                    return lines.len();
                }

                let mut align = BubbleAlignment::Left;
                if turn.author == Author::User {
                    align = BubbleAlignment::Right;
                }

                let bubble_lines = Bubble::new(turn, align, line_width).as_lines();
                let bubble_line_len = bubble_lines.len();
                self.cache.insert(idx, bubble_lines);

                return bubble_line_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();

        return indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|lines| return lines.to_owned())
            .collect();
    }

    /// Lines without styling, for printing outside of the terminal UI.
    pub fn as_plain_text(&self) -> String {
        return self
            .lines()
            .iter()
            .map(|line| {
                return line
                    .spans
                    .iter()
                    .map(|span| return span.content.to_string())
                    .collect::<Vec<String>>()
                    .join("")
                    .trim_end()
                    .to_string();
            })
            .collect::<Vec<String>>()
            .join("\n");
    }

    pub fn widget(&self, scroll: u16) -> Paragraph<'static> {
        return Paragraph::new(self.lines())
            .block(Block::default())
            .scroll((scroll, 0));
    }
}
