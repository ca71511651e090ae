pub mod artists;
pub mod shows;
pub mod venues;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use fyyur_db::repository::SearchResults;
use fyyur_db::{AppState, DirectoryError, FormFields, Outcome, WriteAction};
use serde::{Deserialize, Serialize};

/// Routes mounted under `/api`.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/venues",
            get(venues::list_venues).post(venues::create_venue),
        )
        .route("/venues/search", post(venues::search_venues))
        .route(
            "/venues/{id}",
            get(venues::get_venue)
                .put(venues::update_venue)
                .delete(venues::delete_venue),
        )
        .route("/venues/{id}/edit", get(venues::edit_venue))
        .route(
            "/artists",
            get(artists::list_artists).post(artists::create_artist),
        )
        .route("/artists/search", post(artists::search_artists))
        .route(
            "/artists/{id}",
            get(artists::get_artist).put(artists::update_artist),
        )
        .route("/artists/{id}/edit", get(artists::edit_artist))
        .route("/shows", get(shows::list_shows).post(shows::create_show))
}

/// A submitted create/edit form: loose scalar fields plus the genre list.
#[derive(Debug, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(flatten)]
    pub fields: HashMap<String, serde_json::Value>,
}

impl FormSubmission {
    /// Scalars become strings; nulls, arrays and objects are dropped.
    pub fn form_fields(&self) -> FormFields {
        self.fields
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Number(n) => n.to_string(),
                    serde_json::Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect()
    }

    /// Outcome subject such as `"Venue The Musical Hop"`, or just `kind`
    /// when no usable name was submitted.
    pub fn subject(&self, kind: &str) -> String {
        let name = match self.fields.get("name") {
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        if name.is_empty() {
            kind.to_string()
        } else {
            format!("{kind} {name}")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub results: SearchResults,
}

pub fn status_for(err: &DirectoryError) -> StatusCode {
    match err {
        DirectoryError::NotFound { .. } => StatusCode::NOT_FOUND,
        DirectoryError::ConstraintViolation(_) => StatusCode::CONFLICT,
        DirectoryError::MissingField(_) | DirectoryError::InvalidField { .. } => {
            StatusCode::BAD_REQUEST
        }
        DirectoryError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        DirectoryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(err: DirectoryError) -> (StatusCode, String) {
    if matches!(
        err,
        DirectoryError::Database(_) | DirectoryError::StoreUnavailable(_)
    ) {
        tracing::error!("store error: {err}");
    }
    (status_for(&err), err.to_string())
}

/// Turn a write result into the status code and message shown to the user.
pub fn outcome_response<T>(
    subject: &str,
    action: WriteAction,
    result: Result<T, DirectoryError>,
    ok: StatusCode,
) -> (StatusCode, Json<Outcome>) {
    match result {
        Ok(_) => (ok, Json(Outcome::success(subject, action))),
        Err(err) => {
            tracing::warn!(%subject, "write failed: {err}");
            (status_for(&err), Json(Outcome::failure(subject, action, &err)))
        }
    }
}
