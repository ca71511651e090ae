use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use serde::Serialize;

use super::{finish, match_names, EntityRef, SearchResults};
use crate::entities::{artist, genre, show, venue};
use crate::error::{DirectoryError, EntityKind, Result};
use crate::forms::VenueForm;
use crate::schedule::{self, Scheduled, ShowBuckets};

/// Venues sharing one (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntityRef>,
}

/// A show as listed on a venue's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct VenueShow {
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

impl Scheduled for VenueShow {
    fn start_time(&self) -> DateTime<FixedOffset> {
        self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl VenueDetail {
    fn assemble(v: venue::Model, genres: Vec<String>, shows: ShowBuckets<VenueShow>) -> Self {
        Self {
            id: v.id,
            name: v.name,
            genres,
            address: v.address,
            city: v.city,
            state: v.state,
            phone: v.phone,
            facebook_link: v.facebook_link,
            image_link: v.image_link,
            seeking_talent: v.seeking_talent,
            seeking_description: v.seeking_talent_desc,
            past_shows_count: shows.past_count(),
            upcoming_shows_count: shows.upcoming_count(),
            past_shows: shows.past,
            upcoming_shows: shows.upcoming,
        }
    }
}

/// What a venue deletion removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedVenue {
    pub id: i32,
    pub name: String,
    pub genres_removed: u64,
    pub shows_removed: u64,
}

/// All venues grouped by (city, state), groups in order of first
/// appearance and members in store order.
pub async fn group_by_location<C: ConnectionTrait>(db: &C) -> Result<Vec<LocationGroup>> {
    let venues = venue::Entity::find()
        .order_by_asc(venue::Column::Id)
        .all(db)
        .await?;

    let mut groups: Vec<LocationGroup> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    for v in venues {
        let member = EntityRef {
            id: v.id,
            name: v.name,
        };
        let key = (v.city, v.state);
        match index.get(&key).copied() {
            Some(i) => groups[i].venues.push(member),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(LocationGroup {
                    city: key.0,
                    state: key.1,
                    venues: vec![member],
                });
            }
        }
    }
    Ok(groups)
}

/// Venues whose name contains `term`, case-sensitively.
pub async fn search<C: ConnectionTrait>(db: &C, term: &str) -> Result<SearchResults> {
    let rows: Vec<(i32, String)> = venue::Entity::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .order_by_asc(venue::Column::Id)
        .into_tuple()
        .all(db)
        .await?;
    let results = match_names(rows, term);
    tracing::debug!(term, count = results.count, "venue search");
    Ok(results)
}

pub async fn detail<C: ConnectionTrait>(db: &C, id: i32) -> Result<VenueDetail> {
    detail_at(db, id, schedule::now()).await
}

/// Venue page with its shows split around `now`.
pub async fn detail_at<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<FixedOffset>,
) -> Result<VenueDetail> {
    let venue = find_venue(db, id).await?;
    let genres = genre_labels(db, id).await?;

    let entries: Vec<VenueShow> = show::Entity::find()
        .select_only()
        .column(show::Column::ArtistId)
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .filter(show::Column::VenueId.eq(id))
        .order_by_asc(show::Column::Id)
        .into_model::<VenueShow>()
        .all(db)
        .await?;

    Ok(VenueDetail::assemble(
        venue,
        genres,
        schedule::classify(entries, now),
    ))
}

/// Current values of a venue, shaped like the form that edits it.
pub async fn edit_form<C: ConnectionTrait>(db: &C, id: i32) -> Result<VenueForm> {
    let v = find_venue(db, id).await?;
    let genres = genre_labels(db, id).await?;
    Ok(VenueForm {
        name: v.name,
        city: v.city,
        state: v.state,
        address: v.address,
        phone: v.phone,
        image_link: v.image_link,
        facebook_link: v.facebook_link,
        seeking_talent: v.seeking_talent,
        seeking_description: v.seeking_talent_desc,
        genres,
    })
}

/// Insert a venue and its genre rows in one transaction.
pub async fn create<C>(db: &C, form: &VenueForm) -> Result<venue::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let result = insert(&txn, form).await;
    let created = finish(txn, result).await?;
    tracing::info!(venue_id = created.id, name = %created.name, "venue created");
    Ok(created)
}

/// Replace every field of a venue and swap its genre rows for `form.genres`.
pub async fn update<C>(db: &C, id: i32, form: &VenueForm) -> Result<venue::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let result = apply_update(&txn, id, form).await;
    let updated = finish(txn, result).await?;
    tracing::info!(venue_id = id, "venue updated");
    Ok(updated)
}

/// Delete a venue together with its genres and shows.
pub async fn delete<C>(db: &C, id: i32) -> Result<DeletedVenue>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let result = remove(&txn, id).await;
    let deleted = finish(txn, result).await?;
    tracing::info!(
        venue_id = id,
        genres_removed = deleted.genres_removed,
        shows_removed = deleted.shows_removed,
        "venue deleted"
    );
    Ok(deleted)
}

async fn insert(txn: &DatabaseTransaction, form: &VenueForm) -> Result<venue::Model> {
    let created = venue::ActiveModel {
        name: Set(form.name.clone()),
        city: Set(form.city.clone()),
        state: Set(form.state.clone()),
        address: Set(form.address.clone()),
        phone: Set(form.phone.clone()),
        image_link: Set(form.image_link.clone()),
        facebook_link: Set(form.facebook_link.clone()),
        seeking_talent: Set(form.seeking_talent),
        seeking_talent_desc: Set(form.seeking_description.clone()),
        ..Default::default()
    }
    .insert(txn)
    .await?;

    insert_genres(txn, created.id, &form.genres).await?;
    Ok(created)
}

async fn apply_update(
    txn: &DatabaseTransaction,
    id: i32,
    form: &VenueForm,
) -> Result<venue::Model> {
    let existing = find_venue(txn, id).await?;

    let mut active: venue::ActiveModel = existing.into();
    active.name = Set(form.name.clone());
    active.city = Set(form.city.clone());
    active.state = Set(form.state.clone());
    active.address = Set(form.address.clone());
    active.phone = Set(form.phone.clone());
    active.image_link = Set(form.image_link.clone());
    active.facebook_link = Set(form.facebook_link.clone());
    active.seeking_talent = Set(form.seeking_talent);
    active.seeking_talent_desc = Set(form.seeking_description.clone());
    let updated = active.update(txn).await?;

    genre::Entity::delete_many()
        .filter(genre::Column::VenueId.eq(id))
        .exec(txn)
        .await?;
    insert_genres(txn, id, &form.genres).await?;

    Ok(updated)
}

async fn remove(txn: &DatabaseTransaction, id: i32) -> Result<DeletedVenue> {
    let existing = find_venue(txn, id).await?;

    let shows = show::Entity::delete_many()
        .filter(show::Column::VenueId.eq(id))
        .exec(txn)
        .await?;
    let genres = genre::Entity::delete_many()
        .filter(genre::Column::VenueId.eq(id))
        .exec(txn)
        .await?;
    venue::Entity::delete_by_id(id).exec(txn).await?;

    Ok(DeletedVenue {
        id,
        name: existing.name,
        genres_removed: genres.rows_affected,
        shows_removed: shows.rows_affected,
    })
}

async fn find_venue<C: ConnectionTrait>(db: &C, id: i32) -> Result<venue::Model> {
    venue::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DirectoryError::not_found(EntityKind::Venue, id))
}

async fn genre_labels<C: ConnectionTrait>(db: &C, venue_id: i32) -> Result<Vec<String>> {
    Ok(genre::Entity::find()
        .filter(genre::Column::VenueId.eq(venue_id))
        .order_by_asc(genre::Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|g| g.genre)
        .collect())
}

async fn insert_genres<C: ConnectionTrait>(db: &C, venue_id: i32, labels: &[String]) -> Result<()> {
    if labels.is_empty() {
        return Ok(());
    }
    let rows = labels.iter().map(|label| genre::ActiveModel {
        genre: Set(label.clone()),
        venue_id: Set(venue_id),
        ..Default::default()
    });
    genre::Entity::insert_many(rows).exec(db).await?;
    Ok(())
}
