use std::path::PathBuf;

use super::Author;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Info,
    Warning,
    Error,
}

/// Building blocks a chat bubble is composed of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    Heading(String),
    Markdown(String),
    Bold(String),
    Alert(AlertKind, String),
    Code(String),
    Image(PathBuf),
    LinkButton { label: String, url: String },
}

/// A single chat bubble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub author: Author,
    pub elements: Vec<Element>,
}

impl Turn {
    pub fn new(author: Author, elements: Vec<Element>) -> Turn {
        return Turn { author, elements };
    }
}
