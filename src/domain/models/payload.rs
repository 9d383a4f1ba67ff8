#[cfg(test)]
#[path = "payload_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::Value;

use super::ExtractionError;

/// One element of a recommendation payload as handed over by the retrieval
/// chain. Documents expose their text through `page_content`, everything else
/// is coerced to a string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadItem {
    Document {
        page_content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },
    Text(String),
    Other(Value),
}

impl PayloadItem {
    fn kind(&self) -> &'static str {
        match self {
            PayloadItem::Document { .. } => return "document",
            PayloadItem::Text(_) => return "string",
            PayloadItem::Other(Value::Null) => return "null",
            PayloadItem::Other(Value::Bool(_)) => return "bool",
            PayloadItem::Other(Value::Number(_)) => return "number",
            PayloadItem::Other(Value::String(_)) => return "string",
            PayloadItem::Other(Value::Array(_)) => return "array",
            PayloadItem::Other(Value::Object(_)) => return "object",
        }
    }
}

/// Text extracted from the first payload item, tagged with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayloadText {
    TextContent(String),
    RawString(String),
}

impl PayloadText {
    pub fn text(&self) -> &str {
        match self {
            PayloadText::TextContent(text) => return text,
            PayloadText::RawString(text) => return text,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecommendationPayload(Vec<PayloadItem>);

impl RecommendationPayload {
    pub fn new(items: Vec<PayloadItem>) -> RecommendationPayload {
        return RecommendationPayload(items);
    }

    pub fn from_text(text: &str) -> RecommendationPayload {
        return RecommendationPayload::new(vec![PayloadItem::Text(text.to_string())]);
    }

    pub fn items(&self) -> &[PayloadItem] {
        return &self.0;
    }

    /// Resolves the first item into text. Only the first item is consulted.
    pub fn resolve(&self) -> Result<PayloadText, ExtractionError> {
        let first = self
            .items()
            .first()
            .ok_or(ExtractionError::EmptyPayload)?;

        match first {
            PayloadItem::Document { page_content, .. } => {
                return Ok(PayloadText::TextContent(page_content.to_string()));
            }
            PayloadItem::Text(text) => {
                return Ok(PayloadText::RawString(text.to_string()));
            }
            PayloadItem::Other(Value::Null) => {
                return Err(ExtractionError::UnusableItem {
                    shape: self.shape(),
                });
            }
            PayloadItem::Other(Value::String(text)) => {
                return Ok(PayloadText::RawString(text.to_string()));
            }
            PayloadItem::Other(value) => {
                return Ok(PayloadText::RawString(value.to_string()));
            }
        }
    }

    /// Runtime shape used in diagnostics, e.g. `documents[2]` or `mixed[3]`.
    pub fn shape(&self) -> String {
        if self.0.is_empty() {
            return "empty".to_string();
        }

        let first_kind = self.0[0].kind();
        let uniform = self.0.iter().all(|item| return item.kind() == first_kind);
        if !uniform {
            return format!("mixed[{}]", self.0.len());
        }

        let kind = match first_kind {
            "document" => "documents",
            "string" => "strings",
            "null" => "nulls",
            "bool" => "bools",
            "number" => "numbers",
            "array" => "arrays",
            _ => "objects",
        };

        return format!("{kind}[{}]", self.0.len());
    }

    /// JSON form of the payload for logs.
    pub fn describe(&self) -> String {
        return serde_json::to_string(self).unwrap_or_else(|_| return format!("{:?}", self.0));
    }
}
