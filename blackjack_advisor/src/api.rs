//! HTTP front end. Each client opens its own session and feeds it cards one at a time.

use crate::config::{AdvisorConfig, SessionParams};
use crate::store::{SessionId, SessionStore, StoreError};
use actix_web::{
    body::BoxBody, delete, error::JsonPayloadError, get, http::StatusCode, post, web,
    HttpRequest, HttpResponse, ResponseError,
};
use blackjack_lib::prelude::*;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard};
use thiserror::Error;

/// Shared application state: the server defaults and every open session.
pub struct AppState {
    pub defaults: AdvisorConfig,
    pub store: Mutex<SessionStore>,
}

impl AppState {
    pub fn new(defaults: AdvisorConfig) -> Self {
        AppState {
            store: Mutex::new(SessionStore::new(defaults.max_sessions)),
            defaults,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, SessionStore>, UserError> {
        self.store.lock().map_err(|_| {
            error!("session store lock poisoned");
            UserError::InternalError
        })
    }
}

/// An enum that will handle user facing errors
#[derive(Debug, Error)]
pub enum UserError {
    #[error("an internal error occured")]
    InternalError,
    #[error("session #{0} does not exist")]
    SessionNotFound(SessionId),
    #[error("{0}")]
    BadInput(#[from] AdvisorError),
    #[error("malformed request body: {0}")]
    BadRequestBody(String),
    #[error("{max} sessions are already open, close one first")]
    TooManySessions { max: usize },
}

impl From<StoreError> for UserError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Full { max } => UserError::TooManySessions { max },
            StoreError::Advisor(e) => UserError::BadInput(e),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for UserError {
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            UserError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            UserError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            UserError::BadInput(_) | UserError::BadRequestBody(_) => StatusCode::BAD_REQUEST,
            UserError::TooManySessions { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CardParams {
    pub card: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RoundParams {
    #[serde(default)]
    pub revealed: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SettleParams {
    pub dealer_cards: Vec<String>,
    #[serde(default)]
    pub revealed: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeckParams {
    pub num_decks: i64,
}

#[derive(Serialize)]
struct SessionCreated {
    session_id: SessionId,
    snapshot: SessionSnapshot,
}

#[derive(Serialize)]
struct CardAccepted {
    recommendation: Option<Recommendation>,
    snapshot: SessionSnapshot,
}

#[derive(Serialize)]
struct RoundSettled {
    result: RoundResult,
    snapshot: SessionSnapshot,
}

#[derive(Serialize)]
struct RoundFinished {
    bet_advice: BetAdvice,
    snapshot: SessionSnapshot,
}

fn parse_card(card: &str) -> Result<CardRank, UserError> {
    card.parse::<CardRank>().map_err(|e| {
        warn!("rejected card {:?}", card);
        UserError::from(e)
    })
}

fn parse_cards(cards: &[String]) -> Result<Vec<CardRank>, UserError> {
    cards.iter().map(|c| parse_card(c)).collect()
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("rejected request body: {}", err);
    UserError::BadRequestBody(err.to_string()).into()
}

/// Every JSON body must parse, a malformed one is answered with a 400 and changes nothing.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Runs `f` against session `id` while holding the store lock.
fn with_session<T>(
    state: &AppState,
    id: SessionId,
    f: impl FnOnce(&mut AdvisorSession) -> Result<T, UserError>,
) -> Result<T, UserError> {
    let mut guard = state.lock()?;
    let session = guard.get_mut(id).ok_or(UserError::SessionNotFound(id))?;
    f(session)
}

/// A handler that opens a new session, the body may override the server's deck count and rules.
#[post("/sessions")]
async fn create_session(
    params: web::Json<SessionParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let config = params.apply(&state.defaults);
    let mut guard = state.lock()?;
    let session_id = guard.create(&config).map_err(|e| {
        warn!("session not created: {}", e);
        UserError::from(e)
    })?;
    let snapshot = guard
        .get(session_id)
        .map(|s| s.snapshot())
        .ok_or(UserError::InternalError)?;
    Ok(HttpResponse::Created().json(SessionCreated {
        session_id,
        snapshot,
    }))
}

#[get("/sessions/{id}")]
async fn get_session(
    path: web::Path<SessionId>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let snapshot = with_session(&state, path.into_inner(), |s| Ok(s.snapshot()))?;
    Ok(HttpResponse::Ok().json(snapshot))
}

#[delete("/sessions/{id}")]
async fn delete_session(
    path: web::Path<SessionId>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let id = path.into_inner();
    let mut guard = state.lock()?;
    guard.remove(id).ok_or(UserError::SessionNotFound(id))?;
    Ok(HttpResponse::NoContent().finish())
}

/// A handler that adds a card to the player's hand.
#[post("/sessions/{id}/player-card")]
async fn add_player_card(
    path: web::Path<SessionId>,
    params: web::Json<CardParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let card = parse_card(&params.card)?;
    let body = with_session(&state, path.into_inner(), |s| {
        let recommendation = s.add_player_card(card)?;
        Ok(CardAccepted {
            recommendation,
            snapshot: s.snapshot(),
        })
    })?;
    Ok(HttpResponse::Ok().json(body))
}

/// A handler that sets the dealer's up card.
#[post("/sessions/{id}/dealer-card")]
async fn set_dealer_card(
    path: web::Path<SessionId>,
    params: web::Json<CardParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let card = parse_card(&params.card)?;
    let body = with_session(&state, path.into_inner(), |s| {
        let recommendation = s.set_dealer_card(card)?;
        Ok(CardAccepted {
            recommendation,
            snapshot: s.snapshot(),
        })
    })?;
    Ok(HttpResponse::Ok().json(body))
}

#[get("/sessions/{id}/recommendation")]
async fn get_recommendation(
    path: web::Path<SessionId>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let recommendation = with_session(&state, path.into_inner(), |s| Ok(s.recommendation()?))?;
    Ok(HttpResponse::Ok().json(recommendation))
}

/// A handler that closes the round. Cards revealed after the player's decision are counted here.
#[post("/sessions/{id}/finish-round")]
async fn finish_round(
    path: web::Path<SessionId>,
    params: web::Json<RoundParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    // Parse everything before counting anything, a bad card must not leave a half counted round
    let revealed = parse_cards(&params.revealed)?;
    let body = with_session(&state, path.into_inner(), |s| {
        let bet_advice = s.finish_round(&revealed);
        Ok(RoundFinished {
            bet_advice,
            snapshot: s.snapshot(),
        })
    })?;
    Ok(HttpResponse::Ok().json(body))
}

/// A handler that settles the hand against the dealer's hole card and draws, then closes the round.
#[post("/sessions/{id}/settle")]
async fn settle_round(
    path: web::Path<SessionId>,
    params: web::Json<SettleParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let dealer_cards = parse_cards(&params.dealer_cards)?;
    let revealed = parse_cards(&params.revealed)?;
    let body = with_session(&state, path.into_inner(), |s| {
        let result = s.settle_round(&dealer_cards, &revealed)?;
        Ok(RoundSettled {
            result,
            snapshot: s.snapshot(),
        })
    })?;
    Ok(HttpResponse::Ok().json(body))
}

/// A handler that changes the deck size, which starts a new count.
#[post("/sessions/{id}/decks")]
async fn change_decks(
    path: web::Path<SessionId>,
    params: web::Json<DeckParams>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let snapshot = with_session(&state, path.into_inner(), |s| {
        s.change_decks(params.num_decks)?;
        Ok(s.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// A handler that resets the count for a fresh shoe of the same size.
#[post("/sessions/{id}/reset")]
async fn reset_count(
    path: web::Path<SessionId>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, UserError> {
    let snapshot = with_session(&state, path.into_inner(), |s| {
        s.reset_count();
        Ok(s.snapshot())
    })?;
    Ok(HttpResponse::Ok().json(snapshot))
}

/// Registers every handler, shared by the server binary and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(add_player_card)
        .service(set_dealer_card)
        .service(get_recommendation)
        .service(finish_round)
        .service(settle_round)
        .service(change_decks)
        .service(reset_count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::{json, Value};

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(AdvisorConfig::default()))
    }

    #[actix_web::test]
    async fn test_round_trip_through_http() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({ "num_decks": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id = body["session_id"].as_u64().unwrap();
        assert_eq!(body["snapshot"]["count"]["total_decks"], 1);

        for card in ["10", "6"] {
            let req = test::TestRequest::post()
                .uri(&format!("/sessions/{}/player-card", id))
                .set_json(json!({ "card": card }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert!(resp.status().is_success());
        }

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/dealer-card", id))
            .set_json(json!({ "card": "K" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["recommendation"]["action"], "H");
        assert_eq!(body["recommendation"]["hand"]["total"], 16);
        assert_eq!(body["snapshot"]["count"]["cards_seen"], 3);

        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}/recommendation", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["action"], "H");

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/finish-round", id))
            .set_json(json!({ "revealed": ["2", "3", "4", "5", "6"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        // 10, 6, K, then five low cards: running count +4
        assert_eq!(body["snapshot"]["count"]["running_count"], 4);
        assert_eq!(body["snapshot"]["count"]["cards_seen"], 8);
        assert_eq!(body["bet_advice"]["action"], "INCREASE_BET");
        assert_eq!(body["snapshot"]["player_cards"], json!([]));
    }

    #[actix_web::test]
    async fn test_rejects_bad_input() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({ "num_decks": -2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["session_id"].as_u64().unwrap();

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/player-card", id))
            .set_json(json!({ "card": "11" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/finish-round", id))
            .set_json(json!({ "revealed": ["2", "X"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"]["cards_seen"], 0);

        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}/recommendation", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_session() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::get().uri("/sessions/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete().uri("/sessions/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_decks_reset_and_delete() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["session_id"].as_u64().unwrap();
        assert_eq!(body["snapshot"]["count"]["total_decks"], 6);

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/player-card", id))
            .set_json(json!({ "card": "A" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/decks", id))
            .set_json(json!({ "num_decks": 2 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"]["total_decks"], 2);
        assert_eq!(body["count"]["cards_seen"], 0);

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/reset", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"]["total_decks"], 2);

        let req = test::TestRequest::delete()
            .uri(&format!("/sessions/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_malformed_bodies_change_nothing() {
        let state = state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({ "num_decks": "2" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().starts_with("malformed request body"));

        let req = test::TestRequest::post().uri("/sessions").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(state.store.lock().unwrap().is_empty());

        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({ "num_decks": 1 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["session_id"].as_u64().unwrap();
        for card in ["10", "6"] {
            let req = test::TestRequest::post()
                .uri(&format!("/sessions/{}/player-card", id))
                .set_json(json!({ "card": card }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/finish-round", id))
            .set_json(json!({ "revealed": ["2", 3, "4"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/settle", id))
            .set_json(json!({ "dealer_cards": "K" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // The round is still open with both cards counted
        let req = test::TestRequest::get()
            .uri(&format!("/sessions/{}", id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"]["cards_seen"], 2);
        assert_eq!(body["player_cards"], json!(["10", "6"]));
    }

    #[actix_web::test]
    async fn test_settle_round() {
        let app = test::init_service(App::new().app_data(state()).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/sessions")
            .set_json(json!({ "num_decks": 1 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let id = body["session_id"].as_u64().unwrap();

        for card in ["10", "9"] {
            let req = test::TestRequest::post()
                .uri(&format!("/sessions/{}/player-card", id))
                .set_json(json!({ "card": card }))
                .to_request();
            test::call_service(&app, req).await;
        }
        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/dealer-card", id))
            .set_json(json!({ "card": "A" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["recommendation"]["notes"], json!(["INSURANCE"]));

        // Soft 17 still draws under the default rules
        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/settle", id))
            .set_json(json!({ "dealer_cards": ["6"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/sessions/{}/settle", id))
            .set_json(json!({ "dealer_cards": ["6", "K"], "revealed": ["2"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"]["outcome"], "WIN");
        assert_eq!(body["result"]["dealer_total"], 17);
        assert_eq!(body["result"]["stats"]["wins"], 1);
        assert_eq!(body["snapshot"]["count"]["cards_seen"], 6);
        assert_eq!(body["snapshot"]["stats"]["hands"], 1);
    }

    #[actix_web::test]
    async fn test_session_limit() {
        let config = AdvisorConfig::new().max_sessions(1).build();
        let state = web::Data::new(AppState::new(config));
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;
        for expected in [StatusCode::CREATED, StatusCode::SERVICE_UNAVAILABLE] {
            let req = test::TestRequest::post()
                .uri("/sessions")
                .set_json(json!({}))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);
        }
    }
}
