//! Validated input for the write operations.
//!
//! The request layer hands over raw string fields plus a genre list; the
//! `from_fields` constructors check presence and parse before anything
//! touches the store.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::Serialize;

use crate::error::{DirectoryError, Result};

/// Raw submitted form values keyed by field name.
pub type FormFields = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields, genres: Vec<String>) -> Result<Self> {
        Ok(Self {
            name: required(fields, "name")?,
            city: required(fields, "city")?,
            state: required(fields, "state")?,
            address: required(fields, "address")?,
            phone: optional(fields, "phone"),
            image_link: optional(fields, "image_link"),
            facebook_link: optional(fields, "facebook_link"),
            seeking_talent: checkbox(fields, "seeking_talent"),
            seeking_description: optional(fields, "seeking_description"),
            genres: clean_labels(genres),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub genres: Vec<String>,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields, genres: Vec<String>) -> Result<Self> {
        Ok(Self {
            name: required(fields, "name")?,
            city: required(fields, "city")?,
            state: required(fields, "state")?,
            phone: optional(fields, "phone"),
            image_link: optional(fields, "image_link"),
            facebook_link: optional(fields, "facebook_link"),
            seeking_venue: checkbox(fields, "seeking_venue"),
            seeking_description: optional(fields, "seeking_description"),
            genres: clean_labels(genres),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowForm {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<FixedOffset>,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Result<Self> {
        Ok(Self {
            artist_id: parse_id(fields, "artist_id")?,
            venue_id: parse_id(fields, "venue_id")?,
            start_time: parse_start_time(&required(fields, "start_time")?)?,
        })
    }
}

fn required(fields: &FormFields, key: &str) -> Result<String> {
    optional(fields, key).ok_or_else(|| DirectoryError::MissingField(key.to_string()))
}

/// Blank values count as absent.
fn optional(fields: &FormFields, key: &str) -> Option<String> {
    fields
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// HTML checkboxes are only submitted when ticked.
fn checkbox(fields: &FormFields, key: &str) -> bool {
    fields
        .get(key)
        .map(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "y" | "yes" | "true" | "on" | "1"
            )
        })
        .unwrap_or(false)
}

fn clean_labels(labels: Vec<String>) -> Vec<String> {
    labels
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

fn parse_id(fields: &FormFields, key: &str) -> Result<i32> {
    let raw = required(fields, key)?;
    raw.parse::<i32>()
        .map_err(|e| DirectoryError::invalid(key, format!("{raw:?} is not an id ({e})")))
}

/// RFC 3339, or a naive `YYYY-MM-DD HH:MM[:SS]` taken as UTC.
pub fn parse_start_time(raw: &str) -> Result<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }
    Err(DirectoryError::invalid(
        "start_time",
        format!("{raw:?} is not a recognised timestamp"),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn venue_fields() -> FormFields {
        fields(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
            ("phone", "123-123-1234"),
            ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
            ("seeking_talent", "y"),
            ("seeking_description", "Looking for local jazz acts"),
        ])
    }

    #[test]
    fn test_venue_form_complete() {
        let form = VenueForm::from_fields(
            &venue_fields(),
            vec!["Jazz".into(), " Reggae ".into(), "".into()],
        )
        .unwrap();
        assert_eq!(form.name, "The Musical Hop");
        assert_eq!(form.address, "1015 Folsom Street");
        assert_eq!(form.phone.as_deref(), Some("123-123-1234"));
        assert!(form.image_link.is_none());
        assert!(form.seeking_talent);
        assert_eq!(form.genres, vec!["Jazz", "Reggae"]);
    }

    #[test]
    fn test_venue_form_missing_address() {
        let mut f = venue_fields();
        f.remove("address");
        let err = VenueForm::from_fields(&f, vec![]).unwrap_err();
        assert!(matches!(err, DirectoryError::MissingField(ref k) if k == "address"));
    }

    #[test]
    fn test_blank_required_field_is_missing() {
        let mut f = venue_fields();
        f.insert("name".into(), "   ".into());
        let err = VenueForm::from_fields(&f, vec![]).unwrap_err();
        assert!(matches!(err, DirectoryError::MissingField(ref k) if k == "name"));
    }

    #[test]
    fn test_unticked_checkbox() {
        let mut f = venue_fields();
        f.remove("seeking_talent");
        assert!(!VenueForm::from_fields(&f, vec![]).unwrap().seeking_talent);
        f.insert("seeking_talent".into(), "false".into());
        assert!(!VenueForm::from_fields(&f, vec![]).unwrap().seeking_talent);
        f.insert("seeking_talent".into(), "ON".into());
        assert!(VenueForm::from_fields(&f, vec![]).unwrap().seeking_talent);
    }

    #[test]
    fn test_artist_form_minimal() {
        let f = fields(&[("name", "Guns N Petals"), ("city", "San Francisco"), ("state", "CA")]);
        let form = ArtistForm::from_fields(&f, vec!["Rock n Roll".into()]).unwrap();
        assert_eq!(form.name, "Guns N Petals");
        assert!(!form.seeking_venue);
        assert!(form.seeking_description.is_none());
        assert_eq!(form.genres, vec!["Rock n Roll"]);
    }

    #[test]
    fn test_artist_form_missing_state() {
        let f = fields(&[("name", "Guns N Petals"), ("city", "San Francisco")]);
        let err = ArtistForm::from_fields(&f, vec![]).unwrap_err();
        assert!(matches!(err, DirectoryError::MissingField(ref k) if k == "state"));
    }

    #[test]
    fn test_show_form() {
        let f = fields(&[
            ("artist_id", "4"),
            ("venue_id", "1"),
            ("start_time", "2035-04-01 20:00:00"),
        ]);
        let form = ShowForm::from_fields(&f).unwrap();
        assert_eq!(form.artist_id, 4);
        assert_eq!(form.venue_id, 1);
        assert_eq!(
            form.start_time,
            Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap().fixed_offset()
        );
    }

    #[test]
    fn test_show_form_bad_id() {
        let f = fields(&[
            ("artist_id", "four"),
            ("venue_id", "1"),
            ("start_time", "2035-04-01 20:00:00"),
        ]);
        let err = ShowForm::from_fields(&f).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidField { ref field, .. } if field == "artist_id"));
    }

    #[test]
    fn test_show_form_missing_start_time() {
        let f = fields(&[("artist_id", "4"), ("venue_id", "1")]);
        let err = ShowForm::from_fields(&f).unwrap_err();
        assert!(matches!(err, DirectoryError::MissingField(ref k) if k == "start_time"));
    }

    #[test]
    fn test_parse_start_time_formats() {
        let expected = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        assert_eq!(parse_start_time("2019-05-21T21:30:00.000Z").unwrap(), expected);
        assert_eq!(parse_start_time("2019-05-21 21:30").unwrap(), expected);
        assert_eq!(parse_start_time("2019-05-21T23:30:00+02:00").unwrap(), expected);
        assert!(parse_start_time("next tuesday").is_err());
    }
}
