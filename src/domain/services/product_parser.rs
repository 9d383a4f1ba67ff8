#[cfg(test)]
#[path = "product_parser_test.rs"]
mod tests;

use std::collections::BTreeMap;

use tracing::Span;

use crate::domain::models::MissingFieldsError;
use crate::domain::models::PayloadText;
use crate::domain::models::ProductError;
use crate::domain::models::ProductRecord;
use crate::domain::models::RecommendationPayload;

const BOM: char = '\u{feff}';
const SEPARATOR: &str = ": ";

fn is_invisible(c: char) -> bool {
    return matches!(c, BOM | '\u{200b}' | '\u{200c}' | '\u{200d}' | '\u{2060}');
}

/// Parses newline delimited `key: value` pairs into a product record.
///
/// Only the first `": "` on a line splits it, so values may contain the
/// separator themselves. Lines without a separator are skipped, and a repeated
/// key overwrites the earlier value.
pub fn parse_product(text: &str) -> Result<ProductRecord, MissingFieldsError> {
    let content = text.strip_prefix(BOM).unwrap_or(text);
    let mut fields: BTreeMap<String, String> = BTreeMap::new();

    for line in content.split('\n') {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(SEPARATOR) else {
            continue;
        };

        let key = key.trim().trim_start_matches(is_invisible).trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        if let Some(previous) = fields.insert(key.to_string(), value.to_string()) {
            tracing::debug!(key, previous, value, "duplicate product key, keeping last value");
        }
    }

    return ProductRecord::from_fields(fields, content);
}

fn log_payload_failure(payload: &RecommendationPayload, err: &ProductError) {
    tracing::error!(
        error = %err,
        payload_shape = payload.shape(),
        payload = payload.describe(),
        "failed to read recommendation payload"
    );
}

/// Resolves the payload's first item into text, logging the payload's shape
/// and content on `span` when it has none.
pub fn resolve_payload(
    payload: &RecommendationPayload,
    span: &Span,
) -> Result<PayloadText, ProductError> {
    let _entered = span.enter();

    return payload.resolve().map_err(|err| {
        let err = ProductError::from(err);
        log_payload_failure(payload, &err);
        return err;
    });
}

impl ProductRecord {
    /// Resolves the payload's first item and parses it. Failures are logged
    /// on `span` with the payload's shape and content before being returned.
    pub fn from_payload(
        payload: &RecommendationPayload,
        span: &Span,
    ) -> Result<ProductRecord, ProductError> {
        let text = resolve_payload(payload, span)?;

        let _entered = span.enter();
        match parse_product(text.text()) {
            Ok(record) => {
                tracing::debug!(product = ?record.fields(), "parsed product");
                return Ok(record);
            }
            Err(missing_err) => {
                tracing::error!(
                    missing = missing_err.missing_keys(),
                    content = missing_err.raw,
                    "missing required product keys"
                );

                let err = ProductError::from(missing_err);
                log_payload_failure(payload, &err);
                return Err(err);
            }
        }
    }
}
