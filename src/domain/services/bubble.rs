#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

use crate::domain::models::AlertKind;
use crate::domain::models::Author;
use crate::domain::models::Element;
use crate::domain::models::Turn;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    turn: &'a Turn,
    window_max_width: usize,
}

pub struct BubbleConfig {
    pub bubble_padding: usize,
    pub outer_padding_percentage: f32,
}

type Row = Vec<Span<'static>>;

fn repeat_from_subtractions(text: &str, subtractions: Vec<usize>) -> String {
    let mut iter = subtractions.into_iter();
    let first = iter.next().unwrap_or_default();
    let count = iter.fold(first, |a, b| return a.saturating_sub(b));

    return text.repeat(count);
}

fn row_width(row: &Row) -> usize {
    return row.iter().map(|span| return span.content.width()).sum();
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    return text
        .split('\n')
        .flat_map(|line| {
            if line.trim().is_empty() {
                return vec!["".to_string()];
            }

            let options = textwrap::Options::new(width.max(1))
                .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);

            return textwrap::wrap(line, options)
                .into_iter()
                .map(|part| return part.to_string())
                .collect::<Vec<String>>();
        })
        .collect();
}

fn styled_rows(text: &str, width: usize, style: Style) -> Vec<Row> {
    return wrap(text, width)
        .into_iter()
        .map(|line| return vec![Span::styled(line, style)])
        .collect();
}

fn alert_colour(kind: AlertKind) -> Color {
    match kind {
        AlertKind::Success => return Color::Green,
        AlertKind::Info => return Color::Cyan,
        AlertKind::Warning => return Color::Yellow,
        AlertKind::Error => return Color::Red,
    }
}

impl<'a> Bubble<'a> {
    pub fn new(turn: &'a Turn, alignment: BubbleAlignment, window_max_width: usize) -> Bubble<'a> {
        return Bubble {
            alignment,
            turn,
            window_max_width,
        };
    }

    pub fn style_config() -> BubbleConfig {
        return BubbleConfig {
            // left border + left padding + (text, not counted) + right padding + right border,
            // plus room for the scrollbar.
            bubble_padding: 8,
            outer_padding_percentage: 0.04,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let content_width = self.get_content_width();

        let mut rows: Vec<Row> = vec![];
        for (idx, element) in self.turn.elements.iter().enumerate() {
            if idx > 0 {
                rows.push(vec![]);
            }
            rows.extend(self.element_rows(element, content_width));
        }

        let username = self.turn.author.to_string();
        let max_line_length = rows
            .iter()
            .map(row_width)
            .max()
            .unwrap_or_default()
            .max(username.width());

        let lines = rows
            .into_iter()
            .map(|row| return self.row_to_line(row, max_line_length))
            .collect::<Vec<Line<'static>>>();

        return self.wrap_lines_in_bubble(lines, &username, max_line_length);
    }

    fn element_rows(&self, element: &Element, width: usize) -> Vec<Row> {
        match element {
            Element::Heading(text) => {
                return styled_rows(
                    text,
                    width,
                    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                );
            }
            Element::Markdown(text) => {
                return styled_rows(text, width, Style::default());
            }
            Element::Bold(text) => {
                return styled_rows(text, width, Style::default().add_modifier(Modifier::BOLD));
            }
            Element::Alert(kind, text) => {
                return styled_rows(text, width, Style::default().fg(alert_colour(*kind)));
            }
            Element::Code(text) => {
                let gutter_style = Style::default().fg(Color::DarkGray);
                return wrap(text, width.saturating_sub(2))
                    .into_iter()
                    .map(|line| {
                        return vec![
                            Span::styled("▎ ", gutter_style),
                            Span::styled(line, Style::default().fg(Color::Gray)),
                        ];
                    })
                    .collect();
            }
            Element::Image(path) => {
                return styled_rows(
                    &format!("[image] {}", path.display()),
                    width,
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::ITALIC),
                );
            }
            Element::LinkButton { label, url } => {
                let mut rows = styled_rows(
                    &format!("[ {label} ]"),
                    width,
                    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD),
                );
                rows.extend(styled_rows(
                    url,
                    width,
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::UNDERLINED),
                ));
                return rows;
            }
        }
    }

    fn row_to_line(&self, mut spans: Row, max_line_length: usize) -> Line<'static> {
        let line_str_len = row_width(&spans);
        let fill = repeat_from_subtractions(" ", vec![max_line_length, line_str_len]);
        let formatted_line_length =
            line_str_len + fill.len() + Bubble::style_config().bubble_padding;

        let mut wrapped_spans = vec![self.highlight_span("│ ".to_string())];
        wrapped_spans.append(&mut spans);
        wrapped_spans.push(self.highlight_span(format!("{fill} │")));

        let outer_bubble_padding =
            repeat_from_subtractions(" ", vec![self.window_max_width, formatted_line_length]);

        if self.alignment == BubbleAlignment::Left {
            wrapped_spans.push(Span::from(outer_bubble_padding));
            return Line::from(wrapped_spans);
        }

        let mut line_spans = vec![Span::from(outer_bubble_padding)];
        line_spans.extend(wrapped_spans);

        return Line::from(line_spans);
    }

    fn get_content_width(&self) -> usize {
        let style_config = Bubble::style_config();
        // Add a minimum 4% of padding on the side.
        let min_bubble_padding_length = ((self.window_max_width as f32
            * style_config.outer_padding_percentage)
            .ceil()) as usize;

        let line_border_width = style_config.bubble_padding + min_bubble_padding_length;

        return self.window_max_width.saturating_sub(line_border_width).max(1);
    }

    fn wrap_lines_in_bubble(
        &self,
        lines: Vec<Line<'static>>,
        username: &str,
        max_line_length: usize,
    ) -> Vec<Line<'static>> {
        // Add 2 for the inner padding. The author label overwrites the start of the top bar.
        let label_width = username.width();
        let top_bar = format!(
            "╭{username}{}╮",
            "─".repeat(max_line_length + 2 - label_width)
        );
        let bottom_bar = format!("╰{}╯", "─".repeat(max_line_length + 2));
        let bar_bubble_padding = repeat_from_subtractions(
            " ",
            vec![
                self.window_max_width,
                max_line_length,
                Bubble::style_config().bubble_padding,
            ],
        );

        let mut res = vec![];
        if self.alignment == BubbleAlignment::Left {
            res.push(self.highlight_line(format!("{top_bar}{bar_bubble_padding}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bottom_bar}{bar_bubble_padding}")));
        } else {
            res.push(self.highlight_line(format!("{bar_bubble_padding}{top_bar}")));
            res.extend(lines);
            res.push(self.highlight_line(format!("{bar_bubble_padding}{bottom_bar}")));
        }

        return res;
    }

    fn highlight_span(&self, text: String) -> Span<'static> {
        match self.turn.author {
            Author::System => {
                return Span::styled(text, Style::default().fg(Color::Red));
            }
            Author::Assistant => {
                return Span::styled(text, Style::default().fg(Color::Rgb(138, 85, 63)));
            }
            Author::User => {
                return Span::from(text);
            }
        }
    }

    fn highlight_line(&self, text: String) -> Line<'static> {
        return Line::from(self.highlight_span(text));
    }
}
