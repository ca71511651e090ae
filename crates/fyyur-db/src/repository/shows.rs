use chrono::{DateTime, FixedOffset};
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, FromQueryResult,
    JoinType, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::Serialize;

use super::finish;
use crate::entities::{artist, show, venue};
use crate::error::{DirectoryError, Result};
use crate::forms::ShowForm;

/// One row of the global schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct ShowListing {
    pub venue_id: i32,
    pub venue_name: String,
    pub artist_id: i32,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<FixedOffset>,
}

/// Book an artist at a venue. Both must already exist.
pub async fn create<C>(db: &C, form: &ShowForm) -> Result<show::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let result = insert(&txn, form).await;
    let created = finish(txn, result).await?;
    tracing::info!(
        show_id = created.id,
        artist_id = created.artist_id,
        venue_id = created.venue_id,
        start_time = %created.start_time,
        "show created"
    );
    Ok(created)
}

/// Every show, in store order, with its venue and artist names.
pub async fn list_with_names<C: ConnectionTrait>(db: &C) -> Result<Vec<ShowListing>> {
    Ok(show::Entity::find()
        .select_only()
        .column(show::Column::VenueId)
        .column_as(venue::Column::Name, "venue_name")
        .column(show::Column::ArtistId)
        .column_as(artist::Column::Name, "artist_name")
        .column_as(artist::Column::ImageLink, "artist_image_link")
        .column(show::Column::StartTime)
        .join(JoinType::InnerJoin, show::Relation::Venue.def())
        .join(JoinType::InnerJoin, show::Relation::Artist.def())
        .order_by_asc(show::Column::Id)
        .into_model::<ShowListing>()
        .all(db)
        .await?)
}

async fn insert(txn: &DatabaseTransaction, form: &ShowForm) -> Result<show::Model> {
    if artist::Entity::find_by_id(form.artist_id)
        .one(txn)
        .await?
        .is_none()
    {
        return Err(DirectoryError::ConstraintViolation(format!(
            "artist {} does not exist",
            form.artist_id
        )));
    }
    if venue::Entity::find_by_id(form.venue_id)
        .one(txn)
        .await?
        .is_none()
    {
        return Err(DirectoryError::ConstraintViolation(format!(
            "venue {} does not exist",
            form.venue_id
        )));
    }

    Ok(show::ActiveModel {
        start_time: Set(form.start_time),
        venue_id: Set(form.venue_id),
        artist_id: Set(form.artist_id),
        ..Default::default()
    }
    .insert(txn)
    .await?)
}
