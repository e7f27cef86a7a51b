//! Website template catalog entries.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ColorScheme;

/// A content block on a template page (hero, gallery, pricing table, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSection {
    /// Section identifier, unique within its page
    pub id: String,
    /// Section type (e.g., "hero", "features", "contact")
    #[serde(rename = "type")]
    pub kind: String,
    /// Optional heading shown in the editor outline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free-form props consumed by the page renderer
    #[serde(default)]
    pub props: serde_json::Value,
}

/// A page within a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePage {
    /// Page identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// URL slug ("/" for the home page)
    pub slug: String,
    /// Sections in render order
    #[serde(default)]
    pub sections: Vec<TemplateSection>,
}

/// A read-only entry in the template marketplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteTemplate {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Marketing description
    pub description: String,
    /// Primary category (e.g., "business", "portfolio")
    pub category: String,
    /// Visual style (e.g., "modern", "minimal")
    pub style: String,
    /// Built-in capabilities (e.g., "contact-form", "blog")
    #[serde(default)]
    pub features: Vec<String>,
    /// Searchable keywords
    #[serde(default)]
    pub tags: Vec<String>,
    /// Price in USD (0 for free templates)
    pub price: f64,
    /// Whether the template requires a premium plan
    pub is_premium: bool,
    /// Average rating (0-5)
    pub rating: f64,
    /// Popularity score (0-100)
    pub popularity: u32,
    /// Publication timestamp
    pub created_at: DateTime<Utc>,
    /// Preview image URL
    #[serde(default)]
    pub preview_image: String,
    /// Fixed color scheme shipped with the template
    pub color_scheme: ColorScheme,
    /// Pages included in the template
    #[serde(default)]
    pub pages: Vec<TemplatePage>,
}

#[derive(Deserialize)]
struct CatalogFile {
    templates: Vec<WebsiteTemplate>,
}

impl WebsiteTemplate {
    /// Loads the sample catalog from embedded JSON data.
    ///
    /// # Errors
    /// Returns an error if the JSON data cannot be parsed.
    pub fn samples() -> Result<Vec<Self>> {
        let json_data = include_str!("../data/templates.json");
        let catalog: CatalogFile =
            serde_json::from_str(json_data).context("Failed to parse embedded template catalog")?;
        Ok(catalog.templates)
    }

    /// Whether the template is free to use.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.price <= 0.0
    }

    /// Total number of sections across all pages.
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.pages.iter().map(|p| p.sections.len()).sum()
    }
}
