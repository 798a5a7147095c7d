use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Players {
    Table,
    Id,
    Name,
    Email,
    Attempts,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::Name).string().not_null())
                    .col(ColumnDef::new(Players::Email).string().not_null())
                    .col(
                        ColumnDef::new(Players::Attempts)
                            .integer()
                            .not_null()
                            .check(Expr::col(Players::Attempts).gte(0)),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Email is the natural key the upsert conflicts on.
        manager
            .create_index(
                Index::create()
                    .name("players_email_key")
                    .table(Players::Table)
                    .col(Players::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Leaderboard reads order by attempts ascending.
        manager
            .create_index(
                Index::create()
                    .name("players_attempts_idx")
                    .table(Players::Table)
                    .col(Players::Attempts)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await
    }
}
