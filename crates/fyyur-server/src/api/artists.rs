use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{error_response, outcome_response, FormSubmission, SearchRequest, SearchResponse};
use fyyur_db::repository::artists::{self as repo, ArtistDetail};
use fyyur_db::repository::EntityRef;
use fyyur_db::{AppState, ArtistForm, DirectoryError, Outcome, WriteAction};

/// GET /api/artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<EntityRef>>, (StatusCode, String)> {
    repo::list(&state.db).await.map(Json).map_err(error_response)
}

/// POST /api/artists/search
pub async fn search_artists(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let results = repo::search(&state.db, &body.search_term)
        .await
        .map_err(error_response)?;
    Ok(Json(SearchResponse {
        search_term: body.search_term,
        results,
    }))
}

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistDetail>, (StatusCode, String)> {
    repo::detail(&state.db, id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/artists/:id/edit
pub async fn edit_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ArtistForm>, (StatusCode, String)> {
    repo::edit_form(&state.db, id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/artists
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FormSubmission>,
) -> (StatusCode, Json<Outcome>) {
    let result = insert_submitted(&state, &body).await;
    outcome_response(&body.subject("Artist"), WriteAction::Listed, result, StatusCode::CREATED)
}

/// PUT /api/artists/:id
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<FormSubmission>,
) -> (StatusCode, Json<Outcome>) {
    let result = update_submitted(&state, id, &body).await;
    outcome_response(&body.subject("Artist"), WriteAction::Updated, result, StatusCode::OK)
}

async fn insert_submitted(state: &AppState, body: &FormSubmission) -> Result<(), DirectoryError> {
    let form = ArtistForm::from_fields(&body.form_fields(), body.genres.clone())?;
    repo::create(&state.db, &form).await?;
    Ok(())
}

async fn update_submitted(
    state: &AppState,
    id: i32,
    body: &FormSubmission,
) -> Result<(), DirectoryError> {
    let form = ArtistForm::from_fields(&body.form_fields(), body.genres.clone())?;
    repo::update(&state.db, id, &form).await?;
    Ok(())
}
