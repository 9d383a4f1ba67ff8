use anyhow::Result;
use serde_json::json;

use super::PayloadItem;
use super::PayloadText;
use super::RecommendationPayload;
use crate::domain::models::ExtractionError;

#[test]
fn it_resolves_documents_to_text_content() -> Result<()> {
    let payload: RecommendationPayload = serde_json::from_value(json!([
        { "page_content": "name: Lamp", "metadata": { "row": 3 } },
        { "page_content": "name: Fan" }
    ]))?;

    assert_eq!(
        payload.resolve()?,
        PayloadText::TextContent("name: Lamp".to_string())
    );
    assert_eq!(payload.shape(), "documents[2]");
    return Ok(());
}

#[test]
fn it_resolves_strings_to_raw_string() -> Result<()> {
    let payload = RecommendationPayload::from_text("name: Lamp");
    let text = payload.resolve()?;

    assert_eq!(text, PayloadText::RawString("name: Lamp".to_string()));
    assert_eq!(text.text(), "name: Lamp");
    assert_eq!(payload.shape(), "strings[1]");
    return Ok(());
}

#[test]
fn it_coerces_other_values_to_strings() -> Result<()> {
    let payload: RecommendationPayload = serde_json::from_value(json!([42, "name: Lamp"]))?;

    assert_eq!(payload.resolve()?, PayloadText::RawString("42".to_string()));
    assert_eq!(payload.shape(), "mixed[2]");
    return Ok(());
}

#[test]
fn it_fails_on_empty_payload() {
    let payload = RecommendationPayload::default();

    assert_eq!(payload.resolve(), Err(ExtractionError::EmptyPayload));
    assert_eq!(payload.shape(), "empty");
}

#[test]
fn it_fails_on_null_item() {
    let payload = RecommendationPayload::new(vec![PayloadItem::Other(serde_json::Value::Null)]);

    assert_eq!(
        payload.resolve(),
        Err(ExtractionError::UnusableItem {
            shape: "nulls[1]".to_string()
        })
    );
}

#[test]
fn it_describes_payload_as_json() {
    let payload = RecommendationPayload::from_text("name: Lamp");
    insta::assert_snapshot!(payload.describe(), @r###"["name: Lamp"]"###);
}
