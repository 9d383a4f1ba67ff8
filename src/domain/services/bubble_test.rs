use std::path::PathBuf;

use unicode_width::UnicodeWidthStr;

use super::Bubble;
use super::BubbleAlignment;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AlertKind;
use crate::domain::models::Author;
use crate::domain::models::Element;
use crate::domain::models::Turn;

fn create_lines(turn: &Turn, alignment: BubbleAlignment, width: usize) -> Vec<String> {
    Config::set(ConfigKey::Username, "testuser");
    Config::set(ConfigKey::AssistantName, "Curator");

    return Bubble::new(turn, alignment, width)
        .as_lines()
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| {
                    return span.content.to_string();
                })
                .collect::<Vec<String>>()
                .join("");
        })
        .collect();
}

#[test]
fn it_creates_user_text_aligned_right() {
    let turn = Turn::new(Author::User, vec![Element::Markdown("Hi there!".to_string())]);
    let lines = create_lines(&turn, BubbleAlignment::Right, 50);
    let padding = " ".repeat(33);

    assert_eq!(
        lines,
        vec![
            format!("{padding}╭testuser───╮"),
            format!("{padding}│ Hi there! │"),
            format!("{padding}╰───────────╯"),
        ]
    );
}

#[test]
fn it_creates_assistant_elements_aligned_left() {
    let turn = Turn::new(
        Author::Assistant,
        vec![
            Element::Markdown("Hi".to_string()),
            Element::Bold("Examples".to_string()),
        ],
    );
    let lines = create_lines(&turn, BubbleAlignment::Left, 50);
    let padding = " ".repeat(34);

    assert_eq!(
        lines,
        vec![
            format!("╭Curator───╮{padding}"),
            format!("│ Hi       │{padding}"),
            format!("│          │{padding}"),
            format!("│ Examples │{padding}"),
            format!("╰──────────╯{padding}"),
        ]
    );
}

#[test]
fn it_wraps_long_text() {
    let turn = Turn::new(
        Author::User,
        vec![Element::Markdown(
            "The quick brown fox jumps over the lazy dog".to_string(),
        )],
    );
    let lines = create_lines(&turn, BubbleAlignment::Left, 30);

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1].trim_end(), "│ The quick brown fox │");
    assert_eq!(lines[2].trim_end(), "│ jumps over the lazy │");
    assert_eq!(lines[3].trim_end(), "│ dog                 │");
    assert!(lines.iter().all(|line| return line.width() == 26));
}

#[test]
fn it_aligns_wide_characters() {
    let turn = Turn::new(
        Author::Assistant,
        vec![
            Element::Markdown("長時間使える、高音質なワイヤレスイヤホン".to_string()),
            Element::Alert(AlertKind::Error, "❗ Sold out.".to_string()),
        ],
    );
    let lines = create_lines(&turn, BubbleAlignment::Left, 40);

    assert!(lines.len() > 4);
    assert!(lines.iter().all(|line| return line.width() == 36));
}

#[test]
fn it_renders_code_images_and_links() {
    let turn = Turn::new(
        Author::Assistant,
        vec![
            Element::Code("Category: Audio\nMaker: Lumen".to_string()),
            Element::Image(PathBuf::from("images/products/a.jpg")),
            Element::LinkButton {
                label: "Open product page".to_string(),
                url: "https://google.com".to_string(),
            },
        ],
    );
    let lines = create_lines(&turn, BubbleAlignment::Left, 60)
        .iter()
        .map(|line| return line.trim_end().to_string())
        .collect::<Vec<String>>();

    assert_eq!(
        lines,
        vec![
            "╭Curator────────────────────────╮",
            "│ ▎ Category: Audio             │",
            "│ ▎ Maker: Lumen                │",
            "│                               │",
            "│ [image] images/products/a.jpg │",
            "│                               │",
            "│ [ Open product page ]         │",
            "│ https://google.com            │",
            "╰───────────────────────────────╯",
        ]
    );
}
