#[cfg(test)]
#[path = "product_card_test.rs"]
mod tests;

use std::path::PathBuf;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AlertKind;
use crate::domain::models::Element;
use crate::domain::models::ProductField;
use crate::domain::models::ProductRecord;

/// Constants the display layer consumes from configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplaySettings {
    pub app_name: String,
    pub image_dir: PathBuf,
    pub product_url: String,
    pub stock_status_warning: String,
    pub stock_status_out_of_stock: String,
    pub stock_warning_message: String,
    pub stock_out_of_stock_message: String,
}

impl DisplaySettings {
    pub fn from_config() -> DisplaySettings {
        return DisplaySettings {
            app_name: Config::get(ConfigKey::AppName),
            image_dir: PathBuf::from(Config::get(ConfigKey::ImageDir)),
            product_url: Config::get(ConfigKey::ProductURL),
            stock_status_warning: Config::get(ConfigKey::StockStatusWarning),
            stock_status_out_of_stock: Config::get(ConfigKey::StockStatusOutOfStock),
            stock_warning_message: Config::get(ConfigKey::StockWarningMessage),
            stock_out_of_stock_message: Config::get(ConfigKey::StockOutOfStockMessage),
        };
    }

    #[cfg(test)]
    pub fn defaults() -> DisplaySettings {
        return DisplaySettings {
            app_name: Config::default(ConfigKey::AppName),
            image_dir: PathBuf::from(Config::default(ConfigKey::ImageDir)),
            product_url: Config::default(ConfigKey::ProductURL),
            stock_status_warning: Config::default(ConfigKey::StockStatusWarning),
            stock_status_out_of_stock: Config::default(ConfigKey::StockStatusOutOfStock),
            stock_warning_message: Config::default(ConfigKey::StockWarningMessage),
            stock_out_of_stock_message: Config::default(ConfigKey::StockOutOfStockMessage),
        };
    }
}

pub struct ProductCard<'a> {
    record: &'a ProductRecord,
    settings: &'a DisplaySettings,
}

impl<'a> ProductCard<'a> {
    pub fn new(record: &'a ProductRecord, settings: &'a DisplaySettings) -> ProductCard<'a> {
        return ProductCard { record, settings };
    }

    /// Stock advisory for the record, if its status matches one of the
    /// configured sentinels exactly.
    pub fn stock_advisory(&self) -> Option<Element> {
        let stock_status = self.record.field(ProductField::StockStatus);

        if stock_status == self.settings.stock_status_warning {
            return Some(Element::Alert(
                AlertKind::Warning,
                format!("⚠ {}", self.settings.stock_warning_message),
            ));
        }
        if stock_status == self.settings.stock_status_out_of_stock {
            return Some(Element::Alert(
                AlertKind::Error,
                format!("❗ {}", self.settings.stock_out_of_stock_message),
            ));
        }

        return None;
    }

    /// Fields are displayed exactly as the model wrote them.
    pub fn elements(&self) -> Vec<Element> {
        let field = |name: ProductField| return self.record.field(name);

        let mut elements = vec![
            Element::Markdown("Here is the product we recommend.".to_string()),
            Element::Alert(
                AlertKind::Success,
                format!(
                    "Name: {} (ID: {})\nPrice: {}",
                    field(ProductField::Name),
                    field(ProductField::Id),
                    field(ProductField::Price)
                ),
            ),
        ];

        if let Some(advisory) = self.stock_advisory() {
            elements.push(advisory);
        }

        elements.extend(vec![
            Element::Code(format!(
                "Category: {}\nMaker: {}\nRating: {} ({} reviews)",
                field(ProductField::Category),
                field(ProductField::Maker),
                field(ProductField::Score),
                field(ProductField::ReviewNumber)
            )),
            Element::Image(self.settings.image_dir.join(field(ProductField::FileName))),
            Element::Code(field(ProductField::Description).to_string()),
            Element::Bold("Recommended for".to_string()),
            Element::Alert(
                AlertKind::Info,
                field(ProductField::RecommendedPeople).to_string(),
            ),
            Element::LinkButton {
                label: "Open product page".to_string(),
                url: self.settings.product_url.to_string(),
            },
        ]);

        return elements;
    }
}
