//! Game session routes: the boundary between the browser and the game.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{FlipOutcome, Player, PlayerDetails, SessionView, SubmissionStatus};
use crate::error::AppError;
use crate::extractors::{SessionId, ValidatedJson};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct StartRequest {
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct FlipRequest {
    position: usize,
}

#[derive(Debug, Serialize)]
struct SessionResponse {
    id: Uuid,
    view: SessionView,
}

#[derive(Debug, Serialize)]
struct FlipResponse {
    outcome: FlipOutcome,
    view: SessionView,
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    status: SubmissionStatus,
    player: Player,
    /// Fresh board dealt after the save.
    view: SessionView,
}

/// POST /api/sessions
async fn start_session(
    body: ValidatedJson<StartRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let details = PlayerDetails::new(&body.name, &body.email)?;
    let handle = app_state.sessions().open(details).await;

    Ok(HttpResponse::Created().json(SessionResponse {
        id: handle.id(),
        view: handle.view(),
    }))
}

/// GET /api/sessions/{session_id}
async fn get_session(
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionResponse>, AppError> {
    let handle = app_state.sessions().get(session_id.0).await?;
    Ok(web::Json(SessionResponse {
        id: handle.id(),
        view: handle.view(),
    }))
}

/// POST /api/sessions/{session_id}/flip
///
/// Ignored flips still answer 200; the outcome says why nothing happened.
async fn flip_card(
    session_id: SessionId,
    body: ValidatedJson<FlipRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<FlipResponse>, AppError> {
    let (outcome, view) = app_state
        .sessions()
        .flip(session_id.0, body.position)
        .await?;
    Ok(web::Json(FlipResponse { outcome, view }))
}

/// POST /api/sessions/{session_id}/reset
async fn reset_session(
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<SessionResponse>, AppError> {
    let view = app_state.sessions().reset(session_id.0).await?;
    Ok(web::Json(SessionResponse {
        id: session_id.0,
        view,
    }))
}

/// POST /api/sessions/{session_id}/score
///
/// Saves the finished game under the details given at start and deals a
/// new board. The new board stays even if the save fails.
async fn submit_score(
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<ScoreResponse>, AppError> {
    let (handle, finished) = app_state.sessions().finish(session_id.0).await?;
    let player = handle.player();

    let submission = app_state
        .leaderboard()
        .submit_score(&finished, player.name(), player.email())
        .await?;

    Ok(web::Json(ScoreResponse {
        status: submission.status,
        player: submission.player,
        view: handle.view(),
    }))
}

/// DELETE /api/sessions/{session_id}
async fn close_session(
    session_id: SessionId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    app_state.sessions().close(session_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::post().to(start_session)))
        .service(
            web::resource("/{session_id}")
                .route(web::get().to(get_session))
                .route(web::delete().to(close_session)),
        )
        .service(web::resource("/{session_id}/flip").route(web::post().to(flip_card)))
        .service(web::resource("/{session_id}/reset").route(web::post().to(reset_session)))
        .service(web::resource("/{session_id}/score").route(web::post().to(submit_score)));
}
