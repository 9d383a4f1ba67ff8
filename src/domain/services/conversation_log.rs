#[cfg(test)]
#[path = "conversation_log_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use tokio::fs;
use tokio::io;
use tokio::io::AsyncReadExt;

use crate::domain::models::Message;
use crate::domain::models::RecommendationPayload;

/// Read only access to conversation logs written by the recommendation
/// service.
pub struct ConversationLog {}

impl ConversationLog {
    pub async fn load(file_path: &path::Path) -> Result<Vec<Message>> {
        if !file_path.exists() {
            bail!(format!(
                "No conversation found at {}",
                file_path.to_string_lossy()
            ));
        }

        let payload = fs::read_to_string(file_path).await?;
        let is_json = file_path
            .extension()
            .map(|ext| return ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let messages: Vec<Message> = if is_json {
            serde_json::from_str(&payload).with_context(|| {
                return format!("Failed to parse {}", file_path.to_string_lossy());
            })?
        } else {
            serde_yaml::from_str(&payload).with_context(|| {
                return format!("Failed to parse {}", file_path.to_string_lossy());
            })?
        };

        tracing::debug!(
            file = file_path.to_string_lossy().to_string(),
            messages = messages.len(),
            "loaded conversation"
        );

        return Ok(messages);
    }

    /// Reads a raw recommendation, from stdin when no file is given.
    pub async fn read_payload(file_path: Option<&path::Path>) -> Result<RecommendationPayload> {
        let text = match file_path {
            Some(file_path) => fs::read_to_string(file_path).await?,
            None => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text).await?;
                text
            }
        };

        return Ok(RecommendationPayload::from_text(&text));
    }
}
