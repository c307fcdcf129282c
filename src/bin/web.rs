//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), ADMIN_PASSWORD,
//! SESSION_SECRET, DATA_FILE.

use actix_files::Files;
use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::Key;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::Utc;
use ligue_scoreboard_web::{
    aggregate_meta, import_dataset, recompute, Championship, Dataset, DerivedViews, Document,
    FileStore, Game, LeagueError, PenaltyKey, SeasonKey, Store, SyncEvent, SyncQueue,
    MAX_IMPORT_BYTES,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::RwLock;
use std::time::Duration;

/// Whole application state: the dataset snapshot plus its derived views.
#[derive(serde::Serialize)]
struct AppState {
    dataset: Dataset,
    derived: DerivedViews,
}

impl AppState {
    /// Recompute all derived views from the current snapshot and queue a
    /// writeback for anything that changed.
    fn refresh(&mut self, queue: &SyncQueue) {
        let previous = std::mem::take(&mut self.derived.champions);
        self.derived = recompute(&mut self.dataset);
        for champion in &self.derived.champions {
            if !previous.contains(champion) {
                queue.push(SyncEvent::ChampionSaved {
                    championship: champion.championship,
                    season: champion.season,
                });
            }
        }
        queue.push(SyncEvent::PantheonUpdated);
    }
}

/// In-memory state: one scoreboard, shared across all handlers.
type SharedState = Data<RwLock<AppState>>;

/// How often the sync worker flushes queued edits to the store. Rapid
/// successive edits coalesce into a single snapshot write.
const WRITEBACK_INTERVAL: Duration = Duration::from_millis(750);

/// Admin sessions expire after this long without a request.
const ADMIN_IDLE_MINUTES: i64 = 30;

const DEFAULT_ADMIN_PASSWORD: &str = "admin";

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    password: String,
}

#[derive(Deserialize)]
struct ManagerBody {
    name: String,
}

#[derive(Deserialize)]
struct MatchdayBody {
    games: Vec<Game>,
}

#[derive(Deserialize)]
struct PenaltyBody {
    points: u32,
}

#[derive(Deserialize)]
struct ExemptBody {
    team: Option<String>,
}

/// Path segment: manager id (e.g. /api/managers/{id})
#[derive(Deserialize)]
struct ManagerPath {
    id: String,
}

/// Path segment: championship in either naming scheme.
#[derive(Deserialize)]
struct ChampionshipPath {
    championship: String,
}

#[derive(Deserialize)]
struct InstancePath {
    championship: String,
    season: u32,
}

#[derive(Deserialize)]
struct MatchdayPath {
    championship: String,
    season: u32,
    matchday: u32,
}

#[derive(Deserialize)]
struct PenaltyPath {
    championship: String,
    season: u32,
    team: String,
}

#[derive(Deserialize)]
struct SeasonPath {
    season: u32,
}

fn is_admin(session: &Session) -> bool {
    session.get::<bool>("admin").ok().flatten().unwrap_or(false)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({ "error": "Admin login required" }))
}

fn unknown_championship(raw: &str) -> HttpResponse {
    let error = LeagueError::UnknownChampionship(raw.to_string());
    HttpResponse::BadRequest().json(serde_json::json!({ "error": error.to_string() }))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "ligue-scoreboard-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Open the admin session (single admin role, password from env).
#[post("/api/login")]
async fn api_login(session: Session, body: Json<LoginBody>) -> HttpResponse {
    let expected =
        std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());
    if body.password != expected {
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Invalid password" }));
    }
    if session.insert("admin", true).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    HttpResponse::Ok().json(serde_json::json!({ "admin": true }))
}

#[post("/api/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "admin": false }))
}

#[get("/api/session")]
async fn api_session(session: Session) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "admin": is_admin(&session) }))
}

/// Full scoreboard: dataset snapshot plus derived views.
#[get("/api/scoreboard")]
async fn api_scoreboard(state: SharedState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&*g)
}

/// Create a manager.
#[post("/api/managers")]
async fn api_add_manager(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    body: Json<ManagerBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.dataset.add_manager(&body.name) {
        Ok(created) => {
            queue.push(SyncEvent::ManagerSaved(created.id));
            g.refresh(&queue);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Rename a manager; the new name cascades to matches, penalties, and
/// exempt-team references.
#[put("/api/managers/{id}/name")]
async fn api_rename_manager(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    path: Path<ManagerPath>,
    body: Json<ManagerBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let old = match g.dataset.managers.get(&path.id) {
        Some(m) => m.name.clone(),
        None => {
            return HttpResponse::NotFound()
                .json(serde_json::json!({ "error": "Manager not found" }))
        }
    };
    match g.dataset.rename_manager(&path.id, &body.name) {
        Ok(()) => {
            queue.push(SyncEvent::ManagerRenamed {
                old,
                new: body.name.trim().to_string(),
            });
            g.refresh(&queue);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Delete a manager (participation references go with it; match history stays).
#[delete("/api/managers/{id}")]
async fn api_delete_manager(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    path: Path<ManagerPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.dataset.delete_manager(&path.id) {
        Ok(removed) => {
            queue.push(SyncEvent::ManagerDeleted(removed.id));
            g.refresh(&queue);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Save one matchday block of games.
#[put("/api/matchdays/{championship}/{season}/{matchday}")]
async fn api_save_matchday(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    path: Path<MatchdayPath>,
    body: Json<MatchdayBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let championship = match Championship::parse(&path.championship) {
        Some(c) => c,
        None => return unknown_championship(&path.championship),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let games: Vec<Value> = body.games.iter().map(Game::to_raw).collect();
    match g
        .dataset
        .upsert_block(championship, path.season, path.matchday, games)
    {
        Ok(()) => {
            queue.push(SyncEvent::MatchdaySaved {
                championship,
                season: path.season,
                matchday: path.matchday,
            });
            g.refresh(&queue);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Set a penalty (overwrites any previous value for the same key).
#[put("/api/penalties/{championship}/{season}/{team}")]
async fn api_set_penalty(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    path: Path<PenaltyPath>,
    body: Json<PenaltyBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let championship = match Championship::parse(&path.championship) {
        Some(c) => c,
        None => return unknown_championship(&path.championship),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let key = PenaltyKey {
        championship,
        season: path.season,
        team: path.team.clone(),
    };
    let key_string = key.to_string();
    g.dataset.set_penalty(key, body.points);
    queue.push(SyncEvent::PenaltySaved(key_string));
    g.refresh(&queue);
    HttpResponse::Ok().json(&*g)
}

#[delete("/api/penalties/{championship}/{season}/{team}")]
async fn api_delete_penalty(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    path: Path<PenaltyPath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let championship = match Championship::parse(&path.championship) {
        Some(c) => c,
        None => return unknown_championship(&path.championship),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let key = PenaltyKey {
        championship,
        season: path.season,
        team: path.team.clone(),
    };
    match g.dataset.remove_penalty(&key) {
        Some(_) => {
            queue.push(SyncEvent::PenaltyDeleted(key.to_string()));
            g.refresh(&queue);
            HttpResponse::Ok().json(&*g)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No penalty" })),
    }
}

/// Create a season entry for one championship (idempotent).
#[post("/api/seasons/{championship}/{season}")]
async fn api_create_season(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    path: Path<InstancePath>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let championship = match Championship::parse(&path.championship) {
        Some(c) => c,
        None => return unknown_championship(&path.championship),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.dataset.create_season(championship, path.season);
    let key = SeasonKey {
        championship,
        season: path.season,
    };
    queue.push(SyncEvent::SeasonSaved(key.to_string()));
    g.refresh(&queue);
    HttpResponse::Ok().json(&*g)
}

/// Set or clear the exempt (bye) team of one season, shared across the four
/// sub-championships.
#[put("/api/seasons/{season}/exempt")]
async fn api_set_exempt_team(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    path: Path<SeasonPath>,
    body: Json<ExemptBody>,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.dataset.set_exempt_team(path.season, body.team.clone());
    queue.push(SyncEvent::ExemptTeamUpdated {
        season: path.season,
    });
    g.refresh(&queue);
    HttpResponse::Ok().json(&*g)
}

/// Cached standings table for one competition-instance.
#[get("/api/standings/{championship}/{season}")]
async fn api_standings(state: SharedState, path: Path<InstancePath>) -> HttpResponse {
    let championship = match Championship::parse(&path.championship) {
        Some(c) => c,
        None => return unknown_championship(&path.championship),
    };
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let key = SeasonKey {
        championship,
        season: path.season,
    };
    match g.dataset.seasons.get(&key) {
        Some(entry) => HttpResponse::Ok().json(entry),
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No season" })),
    }
}

/// Ligue des Ligues view for one season: summed table, per-championship
/// points breakdown, and progress.
#[get("/api/meta/{season}")]
async fn api_meta(state: SharedState, path: Path<SeasonPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(aggregate_meta(&g.dataset, path.season))
}

/// Chronological champions of one championship.
#[get("/api/palmares/{championship}")]
async fn api_palmares(state: SharedState, path: Path<ChampionshipPath>) -> HttpResponse {
    let championship = match Championship::parse(&path.championship) {
        Some(c) => c,
        None => return unknown_championship(&path.championship),
    };
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(g.derived.palmares(championship))
}

/// All-time trophy counts.
#[get("/api/pantheon")]
async fn api_pantheon(state: SharedState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(&g.derived.pantheon)
}

/// Download the whole dataset as a timestamped v2.0 document.
#[get("/api/export")]
async fn api_export(state: SharedState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    HttpResponse::Ok().json(Document::export(&g.dataset, Utc::now()))
}

/// Upload a v1.0 or v2.0 document; validated, then upserted into the dataset.
#[post("/api/import")]
async fn api_import(
    state: SharedState,
    queue: Data<SyncQueue>,
    session: Session,
    body: web::Bytes,
) -> HttpResponse {
    if !is_admin(&session) {
        return unauthorized();
    }
    match import_dataset(&body) {
        Ok(incoming) => {
            let mut g = match state.write() {
                Ok(guard) => guard,
                Err(_) => return HttpResponse::InternalServerError().body("lock error"),
            };
            g.dataset.merge(incoming);
            queue.push(SyncEvent::DatasetImported);
            g.refresh(&queue);
            HttpResponse::Ok().json(&*g)
        }
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Cookie signing key derived from SESSION_SECRET (padded to the required
/// 64 bytes; the default is only suitable for local use).
fn session_key() -> Key {
    let secret =
        std::env::var("SESSION_SECRET").unwrap_or_else(|_| "ligue-scoreboard-dev-secret".into());
    let mut bytes = secret.into_bytes();
    while bytes.len() < 64 {
        bytes.extend_from_slice(b"ligue-scoreboard-session-pad");
    }
    Key::from(&bytes[..64])
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    if std::env::var("ADMIN_PASSWORD").is_err() {
        log::warn!("ADMIN_PASSWORD not set; using the default admin password");
    }

    let store = FileStore::from_env();
    let mut dataset = match store.load() {
        Ok(Some(document)) => document.into_dataset(),
        Ok(None) => {
            log::info!("No data file at {}; starting empty", store.path().display());
            Dataset::default()
        }
        Err(e) => {
            log::warn!("Could not load {}: {}; starting empty", store.path().display(), e);
            Dataset::default()
        }
    };
    let derived = recompute(&mut dataset);
    let state = Data::new(RwLock::new(AppState { dataset, derived }));
    let queue = Data::new(SyncQueue::default());
    let key = session_key();

    // Background task: flush queued edits to the store as one coalesced
    // snapshot write per interval.
    let state_sync = state.clone();
    let queue_sync = queue.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(WRITEBACK_INTERVAL);
        loop {
            interval.tick().await;
            let events = queue_sync.drain();
            if events.is_empty() {
                continue;
            }
            for event in &events {
                log::debug!("sync: {event}");
            }
            let document = {
                let g = match state_sync.read() {
                    Ok(guard) => guard,
                    Err(_) => continue,
                };
                Document::snapshot(&g.dataset)
            };
            if let Err(e) = store.persist(&document) {
                log::warn!("Writeback failed ({} events kept in memory): {}", events.len(), e);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(queue.clone())
            .app_data(web::PayloadConfig::new(MAX_IMPORT_BYTES + 1024 * 1024))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_name("ligue_session".to_string())
                    .session_lifecycle(
                        PersistentSession::default()
                            .session_ttl(CookieDuration::minutes(ADMIN_IDLE_MINUTES)),
                    )
                    .build(),
            )
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_login)
            .service(api_logout)
            .service(api_session)
            .service(api_scoreboard)
            .service(api_add_manager)
            .service(api_rename_manager)
            .service(api_delete_manager)
            .service(api_save_matchday)
            .service(api_set_penalty)
            .service(api_delete_penalty)
            .service(api_create_season)
            .service(api_set_exempt_team)
            .service(api_standings)
            .service(api_meta)
            .service(api_palmares)
            .service(api_pantheon)
            .service(api_export)
            .service(api_import)
            .service(Files::new("/static", "static").show_files_listing())
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
