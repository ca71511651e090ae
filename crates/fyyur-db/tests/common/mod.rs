// Shared helpers for the repository integration tests
#![allow(dead_code)]

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use fyyur_db::sea_orm::{ConnectOptions, Database, DatabaseConnection};
use fyyur_db::{ArtistForm, VenueForm};
use fyyur_migration::{Migrator, MigratorTrait};

/// Fresh in-memory SQLite database with the schema applied.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(opt).await.expect("failed to open sqlite");
    Migrator::up(&db, None).await.expect("failed to run migrations");
    db
}

pub fn venue_form(name: &str, city: &str, state: &str, genres: &[&str]) -> VenueForm {
    VenueForm {
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        address: "1015 Folsom Street".to_string(),
        phone: Some("123-123-1234".to_string()),
        image_link: Some("https://images.example.com/venue.jpg".to_string()),
        facebook_link: None,
        seeking_talent: true,
        seeking_description: Some("Looking for local acts".to_string()),
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

pub fn artist_form(name: &str, genres: &[&str]) -> ArtistForm {
    ArtistForm {
        name: name.to_string(),
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: Some("326-123-5000".to_string()),
        image_link: Some("https://images.example.com/artist.jpg".to_string()),
        facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
        seeking_venue: false,
        seeking_description: None,
        genres: genres.iter().map(|g| g.to_string()).collect(),
    }
}

/// Fixed reference instant for past/upcoming assertions.
pub fn reference_time() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0)
        .unwrap()
        .fixed_offset()
}
