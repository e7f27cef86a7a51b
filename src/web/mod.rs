//! Web API module for Sitecraft.
//!
//! This module provides a REST API for the website builder's design panel,
//! exposing palette generation, scheme derivation, contrast checks, the
//! template catalog and saved themes.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/templates` - Search the catalog (`?q=&category=&style=&feature=&min_price=&max_price=&premium=&min_rating=&sort=&order=&page=&limit=`)
//! - `GET /api/templates/{id}` - One template
//! - `GET /api/templates/{id}/related` - Similar templates (`?limit=`)
//! - `POST /api/templates/recommend` - Rank templates against preferences
//! - `GET /api/palettes` - Built-in palettes
//! - `POST /api/palettes/generate` - Generate a harmony palette
//! - `POST /api/schemes` - Derive a color scheme
//! - `POST /api/contrast` - WCAG contrast check
//! - `GET|POST /api/themes` - List or create saved themes
//! - `GET|PATCH|DELETE /api/themes/{id}` - Read, update or delete a theme
//! - `GET /api/themes/{id}/variables` - CSS custom properties
//! - `GET /api/themes/{id}/stylesheet` - Compiled stylesheet (text/css)
//! - `GET|PUT /api/themes/active` - Read or set the active theme

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::models::{ColorPalette, ColorScheme, HarmonyMode, ThemeCustomizations, ThemeUpdate, WebsiteTemplate};
use crate::services::accessibility::{self, ContrastCheck, ContrastReport};
use crate::services::template_query::{
    self, PriceRange, ScoredTemplate, SearchParams, SearchResults, SortKey, SortOrder, SortSpec,
    TemplateFilters, UserPreferences, DEFAULT_PAGE_SIZE,
};
use crate::services::theme_compiler::{self, StylesheetWriter};
use crate::services::{palette, scheme, KeyValueStore, NamedScheme, ThemeRepository};

/// Upper bound on generated palette size.
const MAX_PALETTE_SIZE: usize = 24;

// ============================================================================
// Application State
// ============================================================================

/// Shared application state for the web API.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    config: Arc<Config>,
    /// Template catalog (immutable after load)
    catalog: Arc<Vec<WebsiteTemplate>>,
    /// Saved themes
    themes: ThemeRepository,
}

impl AppState {
    /// Creates a new application state over the given theme store.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let catalog = WebsiteTemplate::samples()?;
        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            themes: ThemeRepository::new(store),
        })
    }

    /// Returns the theme repository.
    #[must_use]
    pub const fn themes(&self) -> &ThemeRepository {
        &self.themes
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// API version.
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn bad_request(error: &str, details: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError::with_details(error, details.to_string())),
    )
}

fn internal(error: &str, details: &anyhow::Error) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_details(error, format!("{details:#}"))),
    )
}

fn theme_not_found(id: &str) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::new(format!("Theme not found: {id}"))),
    )
}

/// Query string for `GET /api/templates`. List values are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    /// Free-text query
    pub q: Option<String>,
    /// Categories
    pub category: Option<String>,
    /// Styles
    pub style: Option<String>,
    /// Features (any may match)
    pub feature: Option<String>,
    /// Minimum price
    pub min_price: Option<f64>,
    /// Maximum price
    pub max_price: Option<f64>,
    /// Premium flag
    pub premium: Option<bool>,
    /// Minimum rating
    pub min_rating: Option<f64>,
    /// Sort key
    pub sort: Option<String>,
    /// Sort order
    pub order: Option<String>,
    /// 1-based page
    pub page: Option<usize>,
    /// Page size
    pub limit: Option<usize>,
}

fn split(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl TemplateQuery {
    fn into_params(self) -> ApiResult<SearchParams> {
        let sort = match self.sort.as_deref() {
            None | Some("") => None,
            Some(key) => {
                let key: SortKey = key.parse().map_err(|e| bad_request("Invalid sort key", e))?;
                let order = match self.order.as_deref() {
                    None | Some("") => SortOrder::default(),
                    Some(order) => order
                        .parse()
                        .map_err(|e| bad_request("Invalid sort order", e))?,
                };
                Some(SortSpec { key, order })
            }
        };

        let price_range = match (self.min_price, self.max_price) {
            (None, None) => None,
            (min, max) => Some(PriceRange {
                min: min.unwrap_or(0.0),
                max: max.unwrap_or(f64::MAX),
            }),
        };

        Ok(SearchParams {
            filters: TemplateFilters {
                categories: split(self.category.as_deref()),
                styles: split(self.style.as_deref()),
                features: split(self.feature.as_deref()),
                price_range,
                premium: self.premium,
                min_rating: self.min_rating,
            },
            query: self.q,
            sort,
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE),
        })
    }
}

/// Query string with an optional result limit.
#[derive(Debug, Deserialize)]
pub struct LimitQuery {
    /// Number of results
    pub limit: Option<usize>,
}

/// Body of `POST /api/templates/recommend`.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    /// User preferences
    #[serde(flatten)]
    pub preferences: UserPreferences,
    /// Number of results
    pub limit: Option<usize>,
}

/// Palette list response.
#[derive(Debug, Serialize)]
pub struct PaletteListResponse {
    /// Built-in palettes
    pub palettes: Vec<ColorPalette>,
}

/// Body of `POST /api/palettes/generate`.
#[derive(Debug, Deserialize)]
pub struct GeneratePaletteRequest {
    /// Base color
    pub base: Option<String>,
    /// Harmony mode
    pub mode: Option<HarmonyMode>,
    /// Number of colors
    pub count: Option<usize>,
    /// Explicit lightness values (monochromatic)
    pub lightness: Option<Vec<f64>>,
}

/// Generated palette response.
#[derive(Debug, Serialize)]
pub struct GeneratePaletteResponse {
    /// Base color as given
    pub base: String,
    /// Harmony mode used
    pub mode: HarmonyMode,
    /// Generated colors; a single echoed entry when the base is unparseable
    pub colors: Vec<String>,
}

/// Body of `POST /api/schemes`.
#[derive(Debug, Deserialize)]
pub struct SchemeRequest {
    /// Base color
    pub base: Option<String>,
    /// Scheme name
    pub name: Option<String>,
}

/// Scheme response with its contrast audit.
#[derive(Debug, Serialize)]
pub struct SchemeResponse {
    /// Scheme and name
    #[serde(flatten)]
    pub scheme: NamedScheme,
    /// Contrast checks for the scheme's text pairs
    pub audit: Vec<ContrastCheck>,
}

/// Body of `POST /api/contrast`.
#[derive(Debug, Deserialize)]
pub struct ContrastRequest {
    /// Text color
    pub foreground: String,
    /// Background color
    pub background: String,
}

/// Body of `POST /api/themes`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThemeRequest {
    /// Theme name; defaults to "<template> Theme" with a template
    pub name: Option<String>,
    /// Seed from a catalog template
    pub template_id: Option<String>,
    /// Explicit colors
    pub colors: Option<ColorScheme>,
    /// Derive colors from a base color
    pub base_color: Option<String>,
}

/// Body of `PUT /api/themes/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    /// Theme id
    pub id: String,
}

/// Body of `PATCH /api/themes/{id}`: one update or a list applied in order.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PatchThemeRequest {
    /// Several updates
    Many(Vec<ThemeUpdate>),
    /// A single update
    One(ThemeUpdate),
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/templates - Search the catalog.
async fn search_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> ApiResult<Json<SearchResults>> {
    let params = query.into_params()?;
    Ok(Json(template_query::search(&state.catalog, &params)))
}

/// GET /api/templates/{id} - One template.
async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WebsiteTemplate>> {
    template_query::find_by_id(&state.catalog, &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            (
                StatusCode::NOT_FOUND,
                Json(ApiError::new(format!("Template not found: {id}"))),
            )
        })
}

/// GET /api/templates/{id}/related - Templates sharing a category or style.
async fn related_templates(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<Json<Vec<WebsiteTemplate>>> {
    let template = template_query::find_by_id(&state.catalog, &id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::new(format!("Template not found: {id}"))),
        )
    })?;
    Ok(Json(template_query::related(
        &state.catalog,
        template,
        query.limit.unwrap_or(3),
    )))
}

/// POST /api/templates/recommend - Rank templates against preferences.
async fn recommend_templates(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> Json<Vec<ScoredTemplate>> {
    Json(template_query::recommend(
        &state.catalog,
        &request.preferences,
        request.limit.unwrap_or(3),
    ))
}

/// GET /api/palettes - Built-in palettes.
async fn list_palettes() -> ApiResult<Json<PaletteListResponse>> {
    let palettes =
        ColorPalette::presets().map_err(|e| internal("Failed to load palettes", &e))?;
    Ok(Json(PaletteListResponse { palettes }))
}

/// POST /api/palettes/generate - Generate a harmony palette.
async fn generate_palette(
    State(state): State<AppState>,
    Json(request): Json<GeneratePaletteRequest>,
) -> ApiResult<Json<GeneratePaletteResponse>> {
    let defaults = &state.config.defaults;
    let base = request.base.unwrap_or_else(|| defaults.base_color.clone());
    let mode = request.mode.unwrap_or(defaults.harmony);
    let count = request.count.unwrap_or(defaults.palette_size);

    if count == 0 || count > MAX_PALETTE_SIZE {
        return Err(bad_request(
            "Invalid palette size",
            format!("count must be between 1 and {MAX_PALETTE_SIZE}"),
        ));
    }

    let colors = palette::generate(&base, mode, count, request.lightness.as_deref());
    Ok(Json(GeneratePaletteResponse { base, mode, colors }))
}

/// POST /api/schemes - Derive a color scheme.
async fn build_scheme(
    State(state): State<AppState>,
    Json(request): Json<SchemeRequest>,
) -> Json<SchemeResponse> {
    let base = request
        .base
        .unwrap_or_else(|| state.config.defaults.base_color.clone());
    let built = scheme::build(&base, request.name.as_deref().unwrap_or("Custom"));
    let audit = accessibility::audit_scheme(&built.colors);
    Json(SchemeResponse {
        scheme: built,
        audit,
    })
}

/// POST /api/contrast - WCAG contrast check.
async fn check_contrast(Json(request): Json<ContrastRequest>) -> Json<ContrastReport> {
    Json(accessibility::analyze(&request.foreground, &request.background))
}

/// GET /api/themes - List saved themes.
async fn list_themes(State(state): State<AppState>) -> Json<Vec<ThemeCustomizations>> {
    Json(state.themes.list())
}

/// POST /api/themes - Create a theme.
async fn create_theme(
    State(state): State<AppState>,
    Json(request): Json<CreateThemeRequest>,
) -> ApiResult<(StatusCode, Json<ThemeCustomizations>)> {
    let template = match &request.template_id {
        Some(id) => Some(template_query::find_by_id(&state.catalog, id).ok_or_else(|| {
            bad_request("Unknown template", id)
        })?),
        None => None,
    };

    let name = match (&request.name, template) {
        (Some(name), _) => name.clone(),
        (None, Some(template)) => format!("{} Theme", template.name),
        (None, None) => return Err(bad_request("Invalid theme", "name is required")),
    };

    let colors = request
        .colors
        .or_else(|| {
            request
                .base_color
                .as_deref()
                .map(|base| scheme::build(base, &name).colors)
        })
        .or_else(|| template.map(|t| t.color_scheme));

    let theme = state
        .themes
        .create(&name, template.map(|t| t.id.as_str()), colors)
        .map_err(|e| bad_request("Invalid theme", format!("{e:#}")))?;

    Ok((StatusCode::CREATED, Json(theme)))
}

/// GET /api/themes/{id} - One theme.
async fn get_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ThemeCustomizations>> {
    state
        .themes
        .get(&id)
        .map(Json)
        .ok_or_else(|| theme_not_found(&id))
}

/// PATCH /api/themes/{id} - Apply typed section updates.
async fn update_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<PatchThemeRequest>,
) -> ApiResult<Json<ThemeCustomizations>> {
    if state.themes.get(&id).is_none() {
        return Err(theme_not_found(&id));
    }

    let updates = match request {
        PatchThemeRequest::Many(updates) => updates,
        PatchThemeRequest::One(update) => vec![update],
    };

    state
        .themes
        .update_many(&id, updates)
        .map(Json)
        .map_err(|e| internal("Failed to update theme", &e))
}

/// DELETE /api/themes/{id} - Delete a theme.
async fn delete_theme(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    match state.themes.delete(&id) {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(theme_not_found(&id)),
        Err(e) => Err(internal("Failed to delete theme", &e)),
    }
}

/// GET /api/themes/{id}/variables - CSS custom properties.
async fn theme_variables(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BTreeMap<String, String>>> {
    let theme = state.themes.get(&id).ok_or_else(|| theme_not_found(&id))?;
    Ok(Json(theme_compiler::to_css_variables(&theme)))
}

/// GET /api/themes/{id}/stylesheet - Compiled stylesheet.
async fn theme_stylesheet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let theme = state.themes.get(&id).ok_or_else(|| theme_not_found(&id))?;
    Ok((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        StylesheetWriter::render(&theme),
    ))
}

/// GET /api/themes/active - The active theme, or null.
async fn get_active_theme(State(state): State<AppState>) -> Json<Option<ThemeCustomizations>> {
    Json(state.themes.active())
}

/// PUT /api/themes/active - Set the active theme.
async fn set_active_theme(
    State(state): State<AppState>,
    Json(request): Json<SetActiveRequest>,
) -> ApiResult<Json<ThemeCustomizations>> {
    let theme = state
        .themes
        .get(&request.id)
        .ok_or_else(|| theme_not_found(&request.id))?;
    state
        .themes
        .set_active(&theme.id)
        .map_err(|e| internal("Failed to set active theme", &e))?;
    Ok(Json(theme))
}

// ============================================================================
// Router Setup
// ============================================================================

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    // CORS for the editor frontend dev server
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Template catalog
        .route("/api/templates", get(search_templates))
        .route("/api/templates/recommend", post(recommend_templates))
        .route("/api/templates/{id}", get(get_template))
        .route("/api/templates/{id}/related", get(related_templates))
        // Colors
        .route("/api/palettes", get(list_palettes))
        .route("/api/palettes/generate", post(generate_palette))
        .route("/api/schemes", post(build_scheme))
        .route("/api/contrast", post(check_contrast))
        // Themes
        .route("/api/themes", get(list_themes).post(create_theme))
        .route(
            "/api/themes/active",
            get(get_active_theme).put(set_active_theme),
        )
        .route(
            "/api/themes/{id}",
            get(get_theme).patch(update_theme).delete(delete_theme),
        )
        .route("/api/themes/{id}/variables", get(theme_variables))
        .route("/api/themes/{id}/stylesheet", get(theme_stylesheet))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Runs the web server.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn run_server(
    config: Config,
    store: Arc<dyn KeyValueStore>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = AppState::new(config, store)?;
    let app = create_router(state);

    info!("Starting Sitecraft web server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
