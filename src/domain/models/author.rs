use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Who a chat bubble is attributed to. The label acts as the bubble's avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Assistant,
    System,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User => return Config::get(ConfigKey::Username),
            Author::Assistant => return Config::get(ConfigKey::AssistantName),
            Author::System => return String::from("System"),
        }
    }
}
