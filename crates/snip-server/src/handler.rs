use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use snip_sdk::{
    FeedbackEntry, Language, LanguageHint, PublicId, RenderedVersion, SnippetView, VersionComparison,
    VersionId,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_seconds: u64,
}

#[derive(Debug, Serialize)]
pub struct LanguageOption {
    pub id: &'static str,
    pub label: &'static str,
}

/// Body for publishing a snippet or a new version.
#[derive(Debug, Deserialize)]
pub struct PublishRequest {
    pub code: String,
    #[serde(default)]
    pub language: LanguageHint,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedSnippet {
    pub public_id: PublicId,
    pub version: u32,
}

#[derive(Debug, Serialize)]
pub struct CreatedVersion {
    pub public_id: PublicId,
    pub version: u32,
}

/// Version numbers arrive as text so malformed ones map to 404 like
/// malformed path segments.
#[derive(Debug, Default, Deserialize)]
pub struct DiffQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub content: String,
}

/// Health check handler.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "snip-server",
        "version": env!("CARGO_PKG_VERSION"),
        "publishing_enabled": state.snippets().gate().is_configured(),
        "languages": Language::ALL.len(),
    }))
}

/// Selectable languages, `auto` first.
pub async fn languages_handler() -> Json<Vec<LanguageOption>> {
    let auto = LanguageOption {
        id: LanguageHint::AUTO,
        label: "Auto-detect",
    };
    let named = Language::ALL.iter().map(|l| LanguageOption {
        id: l.id(),
        label: l.label(),
    });
    Json(std::iter::once(auto).chain(named).collect())
}

pub async fn create_snippet_handler(
    State(state): State<AppState>,
    Json(req): Json<PublishRequest>,
) -> Result<(StatusCode, Json<CreatedSnippet>), ApiError> {
    let public_id = state
        .run(move |s| s.create_snippet(&req.code, req.language, &req.password))
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedSnippet {
            public_id,
            version: 1,
        }),
    ))
}

pub async fn get_snippet_handler(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
) -> Result<Json<SnippetView>, ApiError> {
    let public_id = parse_public_id(&public_id)?;
    let not_found = format!("snippet {public_id}");
    state
        .run(move |s| s.get_snippet(&public_id))
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(not_found))
}

pub async fn create_version_handler(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
    Json(req): Json<PublishRequest>,
) -> Result<(StatusCode, Json<CreatedVersion>), ApiError> {
    let public_id = parse_public_id(&public_id)?;
    let id = public_id.clone();
    let version = state
        .run(move |s| s.create_version(&id, &req.code, req.language, &req.password))
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedVersion { public_id, version })))
}

pub async fn get_version_handler(
    State(state): State<AppState>,
    Path((public_id, version)): Path<(String, String)>,
) -> Result<Json<RenderedVersion>, ApiError> {
    let public_id = parse_public_id(&public_id)?;
    let version = parse_version_number(&version)?;
    let rendered = state
        .run(move |s| s.render_version(&public_id, Some(version)))
        .await?;
    Ok(Json(rendered))
}

/// Highlighted diff between two versions.
///
/// With no `from`, `to` (default: latest) is compared with its predecessor.
/// With `from` and no `to`, `from` is compared with the latest version.
pub async fn diff_handler(
    State(state): State<AppState>,
    Path(public_id): Path<String>,
    Query(query): Query<DiffQuery>,
) -> Result<Json<VersionComparison>, ApiError> {
    let public_id = parse_public_id(&public_id)?;
    let from = query.from.as_deref().map(parse_version_number).transpose()?;
    let to = query.to.as_deref().map(parse_version_number).transpose()?;
    let comparison = state
        .run(move |s| match (from, to) {
            (None, to) => s.compare_with_previous(&public_id, to),
            (Some(from), Some(to)) => s.compare(&public_id, from, to),
            (Some(from), None) => {
                let latest = s
                    .get_snippet(&public_id)?
                    .map(|view| view.snippet.latest_version)
                    .unwrap_or(0);
                s.compare(&public_id, from, latest)
            }
        })
        .await?;
    Ok(Json(comparison))
}

pub async fn add_feedback_handler(
    State(state): State<AppState>,
    Path(version_id): Path<String>,
    Json(req): Json<FeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackEntry>), ApiError> {
    let version_id = parse_version_id(&version_id)?;
    let entry = state
        .run(move |s| s.add_feedback(&version_id, &req.content))
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn get_feedback_handler(
    State(state): State<AppState>,
    Path(version_id): Path<String>,
) -> Result<Json<Vec<FeedbackEntry>>, ApiError> {
    let version_id = parse_version_id(&version_id)?;
    let entries = state.run(move |s| s.get_feedback(&version_id)).await?;
    Ok(Json(entries))
}

// Malformed ids cannot name a record, so they read as unknown.

fn parse_public_id(raw: &str) -> Result<PublicId, ApiError> {
    PublicId::parse(raw).map_err(|_| ApiError::NotFound(format!("snippet {raw}")))
}

fn parse_version_number(raw: &str) -> Result<u32, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("version {raw}")))
}

fn parse_version_id(raw: &str) -> Result<VersionId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(format!("version {raw}")))
}
