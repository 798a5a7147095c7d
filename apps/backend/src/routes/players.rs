//! Leaderboard and player routes.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::{Player, PlayerDetails, SubmissionStatus};
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct LeaderboardEntry {
    rank: usize,
    id: i64,
    name: String,
    email: String,
    attempts: i32,
    avatar_url: String,
    #[serde(with = "time::serde::rfc3339")]
    updated_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
struct SavePlayerRequest {
    name: String,
    email: String,
    attempts: i32,
}

#[derive(Debug, Serialize)]
struct SavePlayerResponse {
    status: SubmissionStatus,
    player: Player,
}

/// GET /api/leaderboard
///
/// Avatar lookups run concurrently and never fail the request.
async fn leaderboard(app_state: web::Data<AppState>) -> Result<web::Json<Vec<LeaderboardEntry>>, AppError> {
    let ranked = app_state.leaderboard().fetch_leaderboard().await?;
    let ids: Vec<i64> = ranked.iter().map(|r| r.player.id).collect();
    let avatars = app_state.avatars().avatar_urls(&ids).await;

    let entries = ranked
        .into_iter()
        .zip(avatars)
        .map(|(ranked, avatar_url)| LeaderboardEntry {
            rank: ranked.rank,
            id: ranked.player.id,
            name: ranked.player.name,
            email: ranked.player.email,
            attempts: ranked.player.attempts,
            avatar_url,
            updated_at: ranked.player.updated_at,
        })
        .collect();

    Ok(web::Json(entries))
}

/// GET /api/players
async fn list_players(app_state: web::Data<AppState>) -> Result<web::Json<Vec<Player>>, AppError> {
    Ok(web::Json(app_state.leaderboard().list_players().await?))
}

/// POST /api/players
///
/// Saves a score outside a session. 201 for a new player, 200 otherwise.
async fn save_player(
    body: ValidatedJson<SavePlayerRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let details = PlayerDetails::new(&body.name, &body.email)?;
    let submission = app_state.leaderboard().record(&details, body.attempts).await?;

    let mut response = match submission.status {
        SubmissionStatus::Created => HttpResponse::Created(),
        _ => HttpResponse::Ok(),
    };
    Ok(response.json(SavePlayerResponse {
        status: submission.status,
        player: submission.player,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/leaderboard").route(web::get().to(leaderboard)))
        .service(
            web::resource("/players")
                .route(web::get().to(list_players))
                .route(web::post().to(save_player)),
        );
}
