use anyhow::Result;
use serde_json::json;
use test_utils::capture_logs;
use test_utils::product_fixture;
use test_utils::product_fixture_without;
use tracing::Span;

use super::parse_product;
use crate::domain::models::ExtractionError;
use crate::domain::models::ProductError;
use crate::domain::models::ProductField;
use crate::domain::models::ProductRecord;
use crate::domain::models::RecommendationPayload;

#[test]
fn it_parses_all_required_fields() -> Result<()> {
    let record = parse_product(product_fixture())?;

    assert_eq!(record.fields().len(), 11);
    assert_eq!(record.field(ProductField::Name), "Aurora ANC Wireless Earbuds");
    assert_eq!(record.field(ProductField::Id), "10042");
    assert_eq!(record.field(ProductField::Price), "¥12,800");
    assert_eq!(record.field(ProductField::StockStatus), "in stock");
    assert_eq!(record.field(ProductField::Category), "Audio");
    assert_eq!(record.field(ProductField::Maker), "Lumen Acoustics");
    assert_eq!(record.field(ProductField::Score), "4.6");
    assert_eq!(record.field(ProductField::ReviewNumber), "238");
    assert_eq!(record.field(ProductField::FileName), "aurora_anc.jpg");
    assert_eq!(
        record.field(ProductField::RecommendedPeople),
        "Commuters who want long battery life and clear sound."
    );
    return Ok(());
}

#[test]
fn it_keeps_separators_inside_values() -> Result<()> {
    let record = parse_product(product_fixture())?;
    assert_eq!(
        record.field(ProductField::Description),
        "Note: works with USB-C chargers. Up to 30 hours of playback."
    );
    return Ok(());
}

#[test]
fn it_strips_leading_bom() -> Result<()> {
    let text = format!("\u{feff}{}", product_fixture().trim_start());
    let record = parse_product(&text)?;

    assert_eq!(record.get("\u{feff}name"), None);
    assert_eq!(record.field(ProductField::Name), "Aurora ANC Wireless Earbuds");
    return Ok(());
}

#[test]
fn it_strips_invisible_characters_from_keys() -> Result<()> {
    let text = product_fixture().replace("maker: ", "\u{200b}\u{feff}maker: ");
    let record = parse_product(&text)?;

    assert_eq!(record.field(ProductField::Maker), "Lumen Acoustics");
    assert_eq!(record.fields().len(), 11);
    return Ok(());
}

#[test]
fn it_trims_keys_and_values() -> Result<()> {
    let text = product_fixture().replace("price: ¥12,800", "   price :   ¥12,800   \t");
    let record = parse_product(&text)?;

    assert_eq!(record.field(ProductField::Price), "¥12,800");
    return Ok(());
}

#[test]
fn it_handles_windows_line_endings() -> Result<()> {
    let text = product_fixture().replace('\n', "\r\n");
    let record = parse_product(&text)?;

    assert_eq!(record.field(ProductField::Category), "Audio");
    assert_eq!(record.fields().len(), 11);
    return Ok(());
}

#[test]
fn it_keeps_last_duplicate_key() -> Result<()> {
    let text = format!("{}\nprice: ¥9,800\n", product_fixture());
    let record = parse_product(&text)?;

    assert_eq!(record.field(ProductField::Price), "¥9,800");
    return Ok(());
}

#[test]
fn it_ignores_lines_without_separator() -> Result<()> {
    let text = format!(
        "Here is my recommendation!\n{}\nurl:https://example.com\n:\n",
        product_fixture()
    );
    let record = parse_product(&text)?;

    assert_eq!(record.fields().len(), 11);
    return Ok(());
}

#[test]
fn it_ignores_blank_lines() -> Result<()> {
    let text = product_fixture().replace('\n', "\n   \n\t\n");
    let record = parse_product(&text)?;

    assert_eq!(record.fields().len(), 11);
    assert!(record.fields().keys().all(|key| return !key.is_empty()));
    return Ok(());
}

#[test]
fn it_keeps_extra_keys() -> Result<()> {
    let text = format!("{}\ncolor: white", product_fixture());
    let record = parse_product(&text)?;

    assert_eq!(record.get("color"), Some("white"));
    return Ok(());
}

#[test]
fn it_reports_each_missing_field() {
    for field in [
        ProductField::Name,
        ProductField::Id,
        ProductField::Price,
        ProductField::Category,
        ProductField::Maker,
        ProductField::Score,
        ProductField::ReviewNumber,
        ProductField::FileName,
        ProductField::Description,
        ProductField::RecommendedPeople,
        ProductField::StockStatus,
    ] {
        let text = product_fixture_without(&field.to_string());
        let err = parse_product(&text).unwrap_err();

        assert_eq!(err.missing, vec![field]);
        assert_eq!(err.raw, text);
    }
}

#[test]
fn it_reports_missing_fields_for_empty_text() {
    let err = parse_product("").unwrap_err();
    assert_eq!(err.missing.len(), 11);
}

#[test]
fn it_parses_from_document_payload() -> Result<()> {
    let payload: RecommendationPayload =
        serde_json::from_value(json!([{ "page_content": product_fixture() }]))?;
    let record = ProductRecord::from_payload(&payload, &Span::none())?;

    assert_eq!(record.field(ProductField::Id), "10042");
    return Ok(());
}

#[test]
fn it_parses_from_string_payload() -> Result<()> {
    let payload = RecommendationPayload::from_text(product_fixture());
    let record = ProductRecord::from_payload(&payload, &Span::none())?;

    assert_eq!(record, parse_product(product_fixture())?);
    return Ok(());
}

#[test]
fn it_propagates_extraction_errors() {
    let payload = RecommendationPayload::default();
    let err = ProductRecord::from_payload(&payload, &Span::none()).unwrap_err();

    assert_eq!(err, ProductError::Extraction(ExtractionError::EmptyPayload));
}

#[test]
fn it_propagates_missing_fields_errors() {
    let payload = RecommendationPayload::from_text(&product_fixture_without("stock_status"));
    let err = ProductRecord::from_payload(&payload, &Span::none()).unwrap_err();

    match err {
        ProductError::MissingFields(missing_err) => {
            assert_eq!(missing_err.missing, vec![ProductField::StockStatus]);
        }
        _ => panic!("expected missing fields error"),
    }
}

#[test]
fn it_logs_missing_fields_with_payload() {
    let payload = RecommendationPayload::from_text(&product_fixture_without("price"));
    let logs = capture_logs(|| {
        let res = ProductRecord::from_payload(&payload, &Span::none());
        assert!(res.is_err());
    });

    assert!(logs.contains(r#""missing":"price""#));
    assert!(logs.contains("name: Aurora ANC Wireless Earbuds"));
    assert!(logs.contains(r#""payload_shape":"strings[1]""#));
    assert!(logs.contains(r#""payload":"[\"\\nname: Aurora"#));
}

#[test]
fn it_logs_empty_payloads() {
    let payload = RecommendationPayload::default();
    let logs = capture_logs(|| {
        let res = ProductRecord::from_payload(&payload, &Span::none());
        assert!(res.is_err());
    });

    assert!(logs.contains(r#""error":"recommendation payload is empty""#));
    assert!(logs.contains(r#""payload_shape":"empty""#));
    assert!(logs.contains(r#""payload":"[]""#));
}
