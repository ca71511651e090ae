use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use super::{error_response, outcome_response, FormSubmission};
use fyyur_db::repository::shows::{self as repo, ShowListing};
use fyyur_db::{AppState, DirectoryError, Outcome, ShowForm, WriteAction};

/// GET /api/shows
pub async fn list_shows(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ShowListing>>, (StatusCode, String)> {
    repo::list_with_names(&state.db)
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/shows
pub async fn create_show(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FormSubmission>,
) -> (StatusCode, Json<Outcome>) {
    let result = book_submitted(&state, &body).await;
    outcome_response("Show", WriteAction::Listed, result, StatusCode::CREATED)
}

async fn book_submitted(state: &AppState, body: &FormSubmission) -> Result<(), DirectoryError> {
    let form = ShowForm::from_fields(&body.form_fields())?;
    repo::create(&state.db, &form).await?;
    Ok(())
}
