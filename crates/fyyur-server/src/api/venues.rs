use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{error_response, outcome_response, FormSubmission, SearchRequest, SearchResponse};
use fyyur_db::repository::venues::{self as repo, LocationGroup, VenueDetail};
use fyyur_db::{AppState, DirectoryError, Outcome, VenueForm, WriteAction};

/// GET /api/venues
pub async fn list_venues(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<LocationGroup>>, (StatusCode, String)> {
    repo::group_by_location(&state.db)
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/venues/search
pub async fn search_venues(
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

/// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueDetail>, (StatusCode, String)> {
    repo::detail(&state.db, id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// GET /api/venues/:id/edit
pub async fn edit_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<VenueForm>, (StatusCode, String)> {
    repo::edit_form(&state.db, id)
        .await
        .map(Json)
        .map_err(error_response)
}

/// POST /api/venues
pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FormSubmission>,
) -> (StatusCode, Json<Outcome>) {
    let result = insert_submitted(&state, &body).await;
    outcome_response(&body.subject("Venue"), WriteAction::Listed, result, StatusCode::CREATED)
}

/// PUT /api/venues/:id
pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<FormSubmission>,
) -> (StatusCode, Json<Outcome>) {
    let result = update_submitted(&state, id, &body).await;
    outcome_response(&body.subject("Venue"), WriteAction::Updated, result, StatusCode::OK)
}

/// DELETE /api/venues/:id
pub async fn delete_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> (StatusCode, Json<Outcome>) {
    let result = repo::delete(&state.db, id).await;
    outcome_response(
        &format!("Venue with id {id}"),
        WriteAction::Deleted,
        result,
        StatusCode::OK,
    )
}

async fn insert_submitted(state: &AppState, body: &FormSubmission) -> Result<(), DirectoryError> {
    let form = VenueForm::from_fields(&body.form_fields(), body.genres.clone())?;
    repo::create(&state.db, &form).await?;
    Ok(())
}

async fn update_submitted(
    state: &AppState,
    id: i32,
    body: &FormSubmission,
) -> Result<(), DirectoryError> {
    let form = VenueForm::from_fields(&body.form_fields(), body.genres.clone())?;
    repo::update(&state.db, id, &form).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::test_support::{read_json, read_text, send, test_app};
    use axum::{http::StatusCode, Router};
    use serde_json::{json, Value};

    async fn post_venue(app: &Router, name: &str, city: &str, state: &str) -> StatusCode {
        send(
            app,
            "POST",
            "/api/venues",
            Some(json!({
                "name": name,
                "city": city,
                "state": state,
                "address": "1015 Folsom Street",
                "phone": "123-123-1234",
                "seeking_talent": "y",
                "seeking_description": "We are on the lookout for a local artist",
                "genres": ["Jazz", "Reggae", "Swing"]
            })),
        )
        .await
        .status()
    }

    // ── Create ──

    #[tokio::test]
    async fn test_create_venue() {
        let app = test_app().await;
        let resp = send(
            &app,
            "POST",
            "/api/venues",
            Some(json!({
                "name": "The Musical Hop",
                "city": "San Francisco",
                "state": "CA",
                "address": "1015 Folsom Street"
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let outcome = read_json(resp).await;
        assert_eq!(outcome["success"], true);
        assert_eq!(
            outcome["message"],
            "Venue The Musical Hop was successfully listed!"
        );
    }

    #[tokio::test]
    async fn test_create_venue_missing_address() {
        let app = test_app().await;
        let resp = send(
            &app,
            "POST",
            "/api/venues",
            Some(json!({"name": "Park Square", "city": "San Francisco", "state": "CA"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let outcome = read_json(resp).await;
        assert_eq!(outcome["success"], false);
        let message = outcome["message"].as_str().unwrap();
        assert!(message.starts_with("An error occurred. Venue Park Square could not be listed"));
        assert!(message.contains("address"));

        let groups = read_json(send(&app, "GET", "/api/venues", None).await).await;
        assert!(groups.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_venue_without_name() {
        let app = test_app().await;
        let resp = send(
            &app,
            "POST",
            "/api/venues",
            Some(json!({"city": "San Francisco", "state": "CA", "address": "1 Main St"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let outcome = read_json(resp).await;
        assert_eq!(
            outcome["message"],
            "An error occurred. Venue could not be listed: missing required field: name"
        );
    }

    // ── Read ──

    #[tokio::test]
    async fn test_list_groups_by_location() {
        let app = test_app().await;
        post_venue(&app, "The Musical Hop", "San Francisco", "CA").await;
        post_venue(&app, "The Dueling Pianos Bar", "New York", "NY").await;
        post_venue(&app, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

        let resp = send(&app, "GET", "/api/venues", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let groups = read_json(resp).await;
        assert_eq!(groups.as_array().unwrap().len(), 2);
        assert_eq!(groups[0]["city"], "San Francisco");
        assert_eq!(groups[0]["venues"].as_array().unwrap().len(), 2);
        assert_eq!(groups[0]["venues"][1]["name"], "Park Square Live Music & Coffee");
        assert_eq!(groups[1]["state"], "NY");
    }

    #[tokio::test]
    async fn test_search_venues() {
        let app = test_app().await;
        post_venue(&app, "The Musical Hop", "San Francisco", "CA").await;
        post_venue(&app, "Park Square Live Music & Coffee", "San Francisco", "CA").await;

        let resp = send(
            &app,
            "POST",
            "/api/venues/search",
            Some(json!({"search_term": "Music"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["search_term"], "Music");
        assert_eq!(body["results"]["count"], 2);

        let body = read_json(
            send(
                &app,
                "POST",
                "/api/venues/search",
                Some(json!({"search_term": "music"})),
            )
            .await,
        )
        .await;
        assert_eq!(body["results"]["count"], 0);
    }

    #[tokio::test]
    async fn test_get_venue_detail() {
        let app = test_app().await;
        post_venue(&app, "The Musical Hop", "San Francisco", "CA").await;

        let resp = send(&app, "GET", "/api/venues/1", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let venue = read_json(resp).await;
        assert_eq!(venue["id"], 1);
        assert_eq!(venue["genres"], json!(["Jazz", "Reggae", "Swing"]));
        assert_eq!(venue["seeking_talent"], true);
        assert_eq!(venue["past_shows_count"], 0);
        assert_eq!(venue["upcoming_shows"], json!([]));
    }

    #[tokio::test]
    async fn test_get_missing_venue() {
        let app = test_app().await;
        let resp = send(&app, "GET", "/api/venues/42", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_text(resp).await, "venue 42 not found");
    }

    #[tokio::test]
    async fn test_edit_prefill() {
        let app = test_app().await;
        post_venue(&app, "The Musical Hop", "San Francisco", "CA").await;

        let form: Value = read_json(send(&app, "GET", "/api/venues/1/edit", None).await).await;
        assert_eq!(form["name"], "The Musical Hop");
        assert_eq!(form["address"], "1015 Folsom Street");
        assert_eq!(form["genres"].as_array().unwrap().len(), 3);
    }

    // ── Update / delete ──

    #[tokio::test]
    async fn test_update_venue() {
        let app = test_app().await;
        post_venue(&app, "The Musical Hop", "San Francisco", "CA").await;

        let resp = send(
            &app,
            "PUT",
            "/api/venues/1",
            Some(json!({
                "name": "The Musical Hop",
                "city": "Oakland",
                "state": "CA",
                "address": "1 Broadway",
                "genres": ["Folk"]
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
        let outcome = read_json(resp).await;
        assert_eq!(
            outcome["message"],
            "Venue The Musical Hop was successfully updated!"
        );

        let venue = read_json(send(&app, "GET", "/api/venues/1", None).await).await;
        assert_eq!(venue["city"], "Oakland");
        assert_eq!(venue["genres"], json!(["Folk"]));
        assert_eq!(venue["seeking_talent"], false);
    }

    #[tokio::test]
    async fn test_update_missing_venue() {
        let app = test_app().await;
        let resp = send(
            &app,
            "PUT",
            "/api/venues/9",
            Some(json!({"name": "Nowhere", "city": "X", "state": "Y", "address": "Z"})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(resp).await["success"], false);
    }

    #[tokio::test]
    async fn test_delete_venue_with_shows() {
        let app = test_app().await;
        post_venue(&app, "The Musical Hop", "San Francisco", "CA").await;
        send(
            &app,
            "POST",
            "/api/artists",
            Some(json!({"name": "Guns N Petals", "city": "San Francisco", "state": "CA"})),
        )
        .await;
        send(
            &app,
            "POST",
            "/api/shows",
            Some(json!({"artist_id": "1", "venue_id": "1", "start_time": "2019-05-21T21:30:00Z"})),
        )
        .await;

        let resp = send(&app, "DELETE", "/api/venues/1", None).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            read_json(resp).await["message"],
            "Venue with id 1 was successfully deleted!"
        );

        let resp = send(&app, "GET", "/api/venues/1", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let shows = read_json(send(&app, "GET", "/api/shows", None).await).await;
        assert!(shows.as_array().unwrap().is_empty());
        let artist = read_json(send(&app, "GET", "/api/artists/1", None).await).await;
        assert_eq!(artist["past_shows_count"], 0);
    }

    #[tokio::test]
    async fn test_delete_missing_venue() {
        let app = test_app().await;
        let resp = send(&app, "DELETE", "/api/venues/3", None).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let outcome = read_json(resp).await;
        assert_eq!(outcome["success"], false);
    }
}
