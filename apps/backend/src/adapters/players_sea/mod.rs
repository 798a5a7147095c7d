//! SeaORM adapter for the players table.

use sea_orm::sea_query::{Alias, Expr, OnConflict};
use sea_orm::{
    ActiveValue::NotSet, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::players;

pub mod dto;

pub use dto::PlayerUpsert;

// Adapter functions return DbErr; the repository maps to DomainError.

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .order_by_asc(players::Column::Attempts)
        .order_by_asc(players::Column::UpdatedAt)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

/// Insert the player, or lower the stored attempts when the new count is
/// strictly better. A single statement, so concurrent submissions for one
/// email cannot lose the better score. The stored name is never replaced.
pub async fn upsert_if_better<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: PlayerUpsert,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let email = dto.email.clone();

    let active = players::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        email: Set(dto.email),
        attempts: Set(dto.attempts),
        created_at: Set(now),
        updated_at: Set(now),
    };

    players::Entity::insert(active)
        .on_conflict(
            OnConflict::column(players::Column::Email)
                .update_columns([players::Column::Attempts, players::Column::UpdatedAt])
                .action_and_where(
                    Expr::col((Alias::new("excluded"), players::Column::Attempts))
                        .lt(Expr::col((players::Entity, players::Column::Attempts))),
                )
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await?;

    find_by_email(conn, &email)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("players.email not found after upsert".to_string()))
}
