//! Search, filtering, pagination and recommendation over the template catalog.
//!
//! All functions take the catalog as a slice and never mutate it.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::WebsiteTemplate;

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Field a search result list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Popularity score
    Popularity,
    /// Average rating
    Rating,
    /// Publication date
    Newest,
    /// Name, case-insensitive
    Name,
    /// Price
    Price,
}

impl FromStr for SortKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "popularity" | "popular" => Ok(Self::Popularity),
            "rating" => Ok(Self::Rating),
            "newest" | "date" => Ok(Self::Newest),
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            other => bail!(
                "Unknown sort key '{}' (expected popularity, rating, newest, name or price)",
                other
            ),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Popularity => "popularity",
            Self::Rating => "rating",
            Self::Newest => "newest",
            Self::Name => "name",
            Self::Price => "price",
        };
        write!(f, "{name}")
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Smallest first
    Asc,
    /// Largest first
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => bail!("Unknown sort order '{}' (expected asc or desc)", other),
        }
    }
}

/// Sort key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort by
    pub key: SortKey,
    /// Direction
    #[serde(default)]
    pub order: SortOrder,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl PriceRange {
    /// Whether `price` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Structured filters; every non-empty filter must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateFilters {
    /// Accepted categories
    pub categories: Vec<String>,
    /// Accepted styles
    pub styles: Vec<String>,
    /// Matches when the template has any of these
    pub features: Vec<String>,
    /// Inclusive price bounds
    pub price_range: Option<PriceRange>,
    /// Premium flag must equal this
    pub premium: Option<bool>,
    /// Minimum rating, inclusive
    pub min_rating: Option<f64>,
}

impl TemplateFilters {
    /// Whether `template` passes every active filter.
    pub fn matches(&self, template: &WebsiteTemplate) -> bool {
        (self.categories.is_empty() || contains_ignore_case(&self.categories, &template.category))
            && (self.styles.is_empty() || contains_ignore_case(&self.styles, &template.style))
            && (self.features.is_empty()
                || template
                    .features
                    .iter()
                    .any(|f| contains_ignore_case(&self.features, f)))
            && self.price_range.is_none_or(|r| r.contains(template.price))
            && self.premium.is_none_or(|p| template.is_premium == p)
            && self.min_rating.is_none_or(|min| template.rating >= min)
    }
}

/// A search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    /// Free-text query
    pub query: Option<String>,
    /// Structured filters
    pub filters: TemplateFilters,
    /// Ordering; catalog order when absent
    pub sort: Option<SortSpec>,
    /// 1-based page number
    pub page: usize,
    /// Page size
    pub limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            query: None,
            filters: TemplateFilters::default(),
            sort: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Per-value tallies for building filter menus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    /// Templates per category
    pub categories: BTreeMap<String, usize>,
    /// Templates per style
    pub styles: BTreeMap<String, usize>,
    /// Templates per feature
    pub features: BTreeMap<String, usize>,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// Templates on this page
    pub templates: Vec<WebsiteTemplate>,
    /// Matches across all pages
    pub total: usize,
    /// Page number actually used
    pub page: usize,
    /// Page size actually used
    pub limit: usize,
    /// `ceil(total / limit)`
    pub total_pages: usize,
    /// Tallies over text-query matches
    pub facets: Facets,
}

/// What a user told us they want, for [`recommend`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    /// Preferred category
    pub category: Option<String>,
    /// Preferred style
    pub style: Option<String>,
    /// Wanted features
    pub features: Vec<String>,
}

/// A template with its recommendation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTemplate {
    /// Recommendation score
    pub score: f64,
    /// The template
    pub template: WebsiteTemplate,
}

fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    haystack.iter().any(|h| h.eq_ignore_ascii_case(needle))
}

/// Case-insensitive substring match against name, description or any tag.
pub fn matches_query(template: &WebsiteTemplate, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    template.name.to_lowercase().contains(&query)
        || template.description.to_lowercase().contains(&query)
        || template.tags.iter().any(|t| t.to_lowercase().contains(&query))
}

fn compare(a: &WebsiteTemplate, b: &WebsiteTemplate, key: SortKey) -> Ordering {
    match key {
        SortKey::Popularity => a.popularity.cmp(&b.popularity),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
        SortKey::Newest => a.created_at.cmp(&b.created_at),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Price => a.price.total_cmp(&b.price),
    }
}

/// Sorts in place; ties always fall back to ascending id.
pub fn sort_templates(templates: &mut [WebsiteTemplate], sort: SortSpec) {
    templates.sort_by(|a, b| {
        let primary = compare(a, b, sort.key);
        let primary = match sort.order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    });
}

fn facets<'a>(templates: impl Iterator<Item = &'a WebsiteTemplate>) -> Facets {
    let mut facets = Facets::default();
    for template in templates {
        *facets.categories.entry(template.category.clone()).or_default() += 1;
        *facets.styles.entry(template.style.clone()).or_default() += 1;
        for feature in &template.features {
            *facets.features.entry(feature.clone()).or_default() += 1;
        }
    }
    facets
}

/// Filters, sorts and paginates `all`.
///
/// `page` and `limit` below 1 are treated as 1. A page past the end is empty
/// but still reports the real `total`.
pub fn search(all: &[WebsiteTemplate], params: &SearchParams) -> SearchResults {
    let page = params.page.max(1);
    let limit = params.limit.max(1);
    let query = params.query.as_deref().unwrap_or("");

    let text_matches: Vec<&WebsiteTemplate> =
        all.iter().filter(|t| matches_query(t, query)).collect();
    let facets = facets(text_matches.iter().copied());

    let mut matched: Vec<WebsiteTemplate> = text_matches
        .into_iter()
        .filter(|t| params.filters.matches(t))
        .cloned()
        .collect();
    if let Some(sort) = params.sort {
        sort_templates(&mut matched, sort);
    }

    let total = matched.len();
    let templates = matched
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    SearchResults {
        templates,
        total,
        page,
        limit,
        total_pages: total.div_ceil(limit),
        facets,
    }
}

/// Recommendation score for one template.
///
/// `3·category + 2·style + matching features + 2·popularity/100 + rating`.
pub fn score(template: &WebsiteTemplate, prefs: &UserPreferences) -> f64 {
    let category = prefs
        .category
        .as_deref()
        .is_some_and(|c| c.eq_ignore_ascii_case(&template.category));
    let style = prefs
        .style
        .as_deref()
        .is_some_and(|s| s.eq_ignore_ascii_case(&template.style));
    let features = template
        .features
        .iter()
        .filter(|f| contains_ignore_case(&prefs.features, f))
        .count();

    let mut score = 0.0;
    if category {
        score += 3.0;
    }
    if style {
        score += 2.0;
    }
    // Feature lists are tiny; the count is exact in f64.
    #[allow(clippy::cast_precision_loss)]
    let features = features as f64;
    score + features + 2.0 * f64::from(template.popularity) / 100.0 + template.rating
}

/// The `limit` best-scoring templates, highest first, ties by id.
pub fn recommend(
    all: &[WebsiteTemplate],
    prefs: &UserPreferences,
    limit: usize,
) -> Vec<ScoredTemplate> {
    let mut scored: Vec<ScoredTemplate> = all
        .iter()
        .map(|t| ScoredTemplate {
            score: score(t, prefs),
            template: t.clone(),
        })
        .collect();
    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.template.id.cmp(&b.template.id))
    });
    scored.truncate(limit);
    scored
}

/// Looks up a template by id.
pub fn find_by_id<'a>(all: &'a [WebsiteTemplate], id: &str) -> Option<&'a WebsiteTemplate> {
    all.iter().find(|t| t.id == id)
}

/// Templates sharing a category or style with `template`, most popular first.
pub fn related(
    all: &[WebsiteTemplate],
    template: &WebsiteTemplate,
    limit: usize,
) -> Vec<WebsiteTemplate> {
    let mut related: Vec<WebsiteTemplate> = all
        .iter()
        .filter(|t| t.id != template.id)
        .filter(|t| t.category == template.category || t.style == template.style)
        .cloned()
        .collect();
    sort_templates(
        &mut related,
        SortSpec {
            key: SortKey::Popularity,
            order: SortOrder::Desc,
        },
    );
    related.truncate(limit);
    related
}

/// The `limit` most popular templates.
pub fn popular(all: &[WebsiteTemplate], limit: usize) -> Vec<WebsiteTemplate> {
    let mut templates = all.to_vec();
    sort_templates(
        &mut templates,
        SortSpec {
            key: SortKey::Popularity,
            order: SortOrder::Desc,
        },
    );
    templates.truncate(limit);
    templates
}
