use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_venues::Venues;

/// Venue genres live in a side table, one row per label. Labels are not
/// unique per venue.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Genres::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Genres::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Genres::Genre).string_len(50).not_null())
                    .col(ColumnDef::new(Genres::VenueId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genres_venue_id")
                            .from(Genres::Table, Genres::VenueId)
                            .to(Venues::Table, Venues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_genres_venue_id")
                    .table(Genres::Table)
                    .col(Genres::VenueId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Genres {
    Table,
    Id,
    Genre,
    VenueId,
}
