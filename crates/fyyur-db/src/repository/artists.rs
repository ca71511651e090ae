use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
    TransactionTrait,
};
use serde::Serialize;

use super::{finish, match_names, EntityRef, SearchResults};
use crate::entities::{artist, show, venue};
use crate::error::{DirectoryError, EntityKind, Result};
use crate::forms::ArtistForm;
use crate::genres;
use crate::schedule::{self, Scheduled, ShowBuckets};

/// A show as listed on an artist's page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ArtistShow {
    pub venue_id: i32,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

impl Scheduled for ArtistShow {
    fn start_time(&self) -> DateTime<FixedOffset> {
        self.start_time
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    pub id: i32,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

impl ArtistDetail {
    fn assemble(a: artist::Model, shows: ShowBuckets<ArtistShow>) -> Self {
        Self {
            id: a.id,
            genres: genres::decode(&a.genres),
            name: a.name,
            city: a.city,
            state: a.state,
            phone: a.phone,
            facebook_link: a.facebook_link,
            image_link: a.image_link,
            seeking_venue: a.seeking_venue,
            seeking_description: a.seeking_venue_desc,
            past_shows_count: shows.past_count(),
            upcoming_shows_count: shows.upcoming_count(),
            past_shows: shows.past,
            upcoming_shows: shows.upcoming,
        }
    }
}

/// Every artist in store order.
pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<EntityRef>> {
    let rows: Vec<(i32, String)> = name_rows(db).await?;
    Ok(rows
        .into_iter()
        .map(|(id, name)| EntityRef { id, name })
        .collect())
}

/// Artists whose name contains `term`, case-sensitively.
pub async fn search<C: ConnectionTrait>(db: &C, term: &str) -> Result<SearchResults> {
    let results = match_names(name_rows(db).await?, term);
    tracing::debug!(term, count = results.count, "artist search");
    Ok(results)
}

pub async fn detail<C: ConnectionTrait>(db: &C, id: i32) -> Result<ArtistDetail> {
    detail_at(db, id, schedule::now()).await
}

/// Artist page with its shows split around `now`.
pub async fn detail_at<C: ConnectionTrait>(
    db: &C,
    id: i32,
    now: DateTime<FixedOffset>,
) -> Result<ArtistDetail> {
    let artist = find_artist(db, id).await?;

    let entries: Vec<ArtistShow> = show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(venue::Column::Name, "venue_name")
        .column_as(venue::Column::ImageLink, "venue_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .filter(show::Column::ArtistId.eq(id))
        .order_by_asc(show::Column::Id)
        .into_model::<ArtistShow>()
        .all(db)
        .await?;

    Ok(ArtistDetail::assemble(artist, schedule::classify(entries, now)))
}

/// Current values of an artist, shaped like the form that edits it.
pub async fn edit_form<C: ConnectionTrait>(db: &C, id: i32) -> Result<ArtistForm> {
    let a = find_artist(db, id).await?;
    Ok(ArtistForm {
        genres: genres::decode(&a.genres),
        name: a.name,
        city: a.city,
        state: a.state,
        phone: a.phone,
        image_link: a.image_link,
        facebook_link: a.facebook_link,
        seeking_venue: a.seeking_venue,
        seeking_description: a.seeking_venue_desc,
    })
}

pub async fn create<C>(db: &C, form: &ArtistForm) -> Result<artist::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let result = insert(&txn, form).await;
    let created = finish(txn, result).await?;
    tracing::info!(artist_id = created.id, name = %created.name, "artist created");
    Ok(created)
}

/// Replace every field of an artist, genres included.
pub async fn update<C>(db: &C, id: i32, form: &ArtistForm) -> Result<artist::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let result = apply_update(&txn, id, form).await;
    let updated = finish(txn, result).await?;
    tracing::info!(artist_id = id, "artist updated");
    Ok(updated)
}

async fn insert(txn: &DatabaseTransaction, form: &ArtistForm) -> Result<artist::Model> {
    Ok(artist::ActiveModel {
        name: Set(form.name.clone()),
        city: Set(form.city.clone()),
        state: Set(form.state.clone()),
        phone: Set(form.phone.clone()),
        genres: Set(genres::encode(&form.genres)),
        image_link: Set(form.image_link.clone()),
        facebook_link: Set(form.facebook_link.clone()),
        seeking_venue: Set(form.seeking_venue),
        seeking_venue_desc: Set(form.seeking_description.clone()),
        ..Default::default()
    }
    .insert(txn)
    .await?)
}

async fn apply_update(
    txn: &DatabaseTransaction,
    id: i32,
    form: &ArtistForm,
) -> Result<artist::Model> {
    let existing = find_artist(txn, id).await?;

    let mut active: artist::ActiveModel = existing.into();
    active.name = Set(form.name.clone());
    active.city = Set(form.city.clone());
    active.state = Set(form.state.clone());
    active.phone = Set(form.phone.clone());
    active.genres = Set(genres::encode(&form.genres));
    active.image_link = Set(form.image_link.clone());
    active.facebook_link = Set(form.facebook_link.clone());
    active.seeking_venue = Set(form.seeking_venue);
    active.seeking_venue_desc = Set(form.seeking_description.clone());

    Ok(active.update(txn).await?)
}

async fn find_artist<C: ConnectionTrait>(db: &C, id: i32) -> Result<artist::Model> {
    artist::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DirectoryError::not_found(EntityKind::Artist, id))
}

async fn name_rows<C: ConnectionTrait>(db: &C) -> Result<Vec<(i32, String)>> {
    Ok(artist::Entity::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Id)
        .into_tuple()
        .all(db)
        .await?)
}
