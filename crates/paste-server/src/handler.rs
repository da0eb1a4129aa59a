use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use axum::Form;
use serde::{Deserialize, Serialize};
use serde_json::json;

use paste_types::{Address, FullId, ShortId};

use crate::error::ServerResult;
use crate::state::AppState;
use crate::views;

/// Body of the HTML form post. `content` is optional so that a missing
/// field is answered with 400 rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct PasteForm {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePaste {
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedPaste {
    pub id: FullId,
    pub short_id: ShortId,
    pub url: String,
    pub short_url: String,
}

impl From<Address> for CreatedPaste {
    fn from(addr: Address) -> Self {
        Self {
            url: format!("/paste/{}", addr.id),
            short_url: format!("/s/{}", addr.short_id),
            id: addr.id,
            short_id: addr.short_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

fn not_found_page() -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found())).into_response()
}

async fn store_content(state: &AppState, content: String) -> ServerResult<Address> {
    let id = state
        .with_store(move |store| store.put(content.as_bytes()))
        .await?;
    Ok(Address::from(id))
}

pub async fn index() -> Html<String> {
    Html(views::home())
}

pub async fn create_paste(
    State(state): State<AppState>,
    Form(form): Form<PasteForm>,
) -> ServerResult<Response> {
    let Some(content) = form.content else {
        return Ok((StatusCode::BAD_REQUEST, "Missing paste content").into_response());
    };
    let addr = store_content(&state, content).await?;
    Ok(Html(views::created(&addr)).into_response())
}

pub async fn show_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Response> {
    let id = FullId::from_hex(&id).map_err(paste_store::StoreError::from)?;
    match state.with_store(move |store| store.get(&id)).await? {
        Some(bytes) => {
            let content = String::from_utf8_lossy(&bytes);
            Ok(Html(views::paste(&Address::from(id), &content)).into_response())
        }
        None => Ok(not_found_page()),
    }
}

pub async fn short_redirect(
    State(state): State<AppState>,
    Path(short): Path<String>,
) -> ServerResult<Response> {
    let short = ShortId::from_hex(&short).map_err(paste_store::StoreError::from)?;
    match state
        .with_store(move |store| store.resolve_short_id(&short))
        .await?
    {
        Some(id) => {
            let location = format!("/paste/{id}");
            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        None => Ok(not_found_page()),
    }
}

pub async fn raw_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Response> {
    let id = FullId::from_hex(&id).map_err(paste_store::StoreError::from)?;
    match state.with_store(move |store| store.get_raw(&id)).await? {
        Some(bytes) => Ok((
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            bytes,
        )
            .into_response()),
        None => Ok((StatusCode::NOT_FOUND, "Paste not found").into_response()),
    }
}

pub async fn api_create_paste(
    State(state): State<AppState>,
    Json(body): Json<CreatePaste>,
) -> ServerResult<(StatusCode, Json<CreatedPaste>)> {
    let addr = store_content(&state, body.content).await?;
    Ok((StatusCode::CREATED, Json(CreatedPaste::from(addr))))
}

/// Health check handler.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::default())
}

/// Info handler.
pub async fn info_handler(State(state): State<AppState>) -> ServerResult<Json<serde_json::Value>> {
    let pastes = state.with_store(|store| store.len()).await?;
    Ok(Json(json!({
        "name": "paste-server",
        "version": env!("CARGO_PKG_VERSION"),
        "pastes": pastes,
        "short_id_policy": state.config.store.short_id_policy,
    })))
}
