#[cfg(test)]
#[path = "product_test.rs"]
mod tests;

use std::collections::BTreeMap;

use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use thiserror::Error;

/// Keys every recommendation must carry before it can be displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ProductField {
    Name,
    Id,
    Price,
    Category,
    Maker,
    Score,
    ReviewNumber,
    FileName,
    Description,
    RecommendedPeople,
    StockStatus,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("recommendation payload is empty")]
    EmptyPayload,
    #[error("first item of a {shape} payload has no usable text")]
    UnusableItem { shape: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("missing required keys: {}", format_fields(.missing))]
pub struct MissingFieldsError {
    pub missing: Vec<ProductField>,
    pub raw: String,
}

impl MissingFieldsError {
    /// Missing fields as record keys, e.g. `price, stock_status`.
    pub fn missing_keys(&self) -> String {
        return format_fields(&self.missing);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProductError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    MissingFields(#[from] MissingFieldsError),
}

fn format_fields(fields: &[ProductField]) -> String {
    return fields
        .iter()
        .map(|field| return field.to_string())
        .collect::<Vec<String>>()
        .join(", ");
}

/// Product parsed out of a recommendation. Holds every required field, plus
/// whatever extra keys the model decided to emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProductRecord {
    fields: BTreeMap<String, String>,
}

impl ProductRecord {
    pub fn from_fields(
        fields: BTreeMap<String, String>,
        raw: &str,
    ) -> Result<ProductRecord, MissingFieldsError> {
        let missing = ProductField::iter()
            .filter(|field| return !fields.contains_key(&field.to_string()))
            .collect::<Vec<ProductField>>();

        if !missing.is_empty() {
            return Err(MissingFieldsError {
                missing,
                raw: raw.to_string(),
            });
        }

        return Ok(ProductRecord { fields });
    }

    pub fn field(&self, field: ProductField) -> &str {
        return self.get(&field.to_string()).unwrap_or_default();
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        return self.fields.get(key).map(|value| return value.as_str());
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        return &self.fields;
    }
}
