//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.
//! Set LEAGUE_DATA_FILE to keep leagues across restarts (JSON snapshot, see SNAPSHOT_INTERVAL_SECS).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::NaiveDate;
use darts_league_web::{
    clear_result, compute_standings, import_players_csv, record_result, restart_season,
    schedule_csv, season_progress, set_matchday_date, standings_csv, start_season,
    write_snapshot, FixtureId, FixtureResult, League, LeagueError, LeagueId, LeagueStore,
    PlayerId, Season, SeasonId, SeasonSettings, ServerConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// In-memory state: every league by id.
type AppState = Data<RwLock<LeagueStore>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateLeagueBody {
    name: String,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
    #[serde(default)]
    nickname: Option<String>,
}

#[derive(Deserialize)]
struct RenamePlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct AddParticipantBody {
    player_id: PlayerId,
}

#[derive(Deserialize, Default)]
struct StartSeasonBody {
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct MatchdayDateBody {
    date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct SeasonResponse<'a> {
    #[serde(flatten)]
    season: &'a Season,
    played: usize,
    total: usize,
}

#[derive(Serialize)]
struct ImportResponse<'a> {
    added: usize,
    league: &'a League,
}

/// Path segment: league id (e.g. /api/leagues/{id})
#[derive(Deserialize)]
struct LeaguePath {
    id: LeagueId,
}

/// Path segments: league id and player id
#[derive(Deserialize)]
struct LeaguePlayerPath {
    id: LeagueId,
    player_id: PlayerId,
}

/// Path segments: league id and season id
#[derive(Deserialize)]
struct SeasonPath {
    id: LeagueId,
    season_id: SeasonId,
}

#[derive(Deserialize)]
struct SeasonPlayerPath {
    id: LeagueId,
    season_id: SeasonId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct FixturePath {
    id: LeagueId,
    season_id: SeasonId,
    fixture_id: FixtureId,
}

#[derive(Deserialize)]
struct MatchdayPath {
    id: LeagueId,
    season_id: SeasonId,
    number: u32,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn no_league() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No league" }))
}

fn bad_request(e: LeagueError) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn season_json(season: &Season) -> HttpResponse {
    let (played, total) = season_progress(season);
    HttpResponse::Ok().json(SeasonResponse {
        season,
        played,
        total,
    })
}

fn csv_download(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(body)
}

/// Apply `f` to a league and answer with the updated league.
fn update_league<F>(state: &AppState, id: LeagueId, f: F) -> HttpResponse
where
    F: FnOnce(&mut League) -> Result<(), LeagueError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let league = match g.get_mut(id) {
        Some(l) => l,
        None => return no_league(),
    };
    match f(&mut *league) {
        Ok(()) => HttpResponse::Ok().json(&*league),
        Err(e) => bad_request(e),
    }
}

/// Apply `f` to one season of a league and answer with the updated season.
fn update_season<F>(state: &AppState, id: LeagueId, season_id: SeasonId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Season) -> Result<(), LeagueError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let league = match g.get_mut(id) {
        Some(l) => l,
        None => return no_league(),
    };
    let season = match league.season_mut(season_id) {
        Some(s) => s,
        None => return bad_request(LeagueError::SeasonNotFound(season_id)),
    };
    match f(&mut *season) {
        Ok(()) => season_json(season),
        Err(e) => bad_request(e),
    }
}

/// Run `f` against a league and season without modifying them.
fn read_season<F>(state: &AppState, id: LeagueId, season_id: SeasonId, f: F) -> HttpResponse
where
    F: FnOnce(&League, &Season) -> HttpResponse,
{
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let league = match g.get(id) {
        Some(l) => l,
        None => return no_league(),
    };
    match league.season(season_id) {
        Some(season) => f(league, season),
        None => bad_request(LeagueError::SeasonNotFound(season_id)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "darts-league-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// List all leagues (id, name, counts).
#[get("/api/leagues")]
async fn api_list_leagues(state: AppState) -> HttpResponse {
    match state.read() {
        Ok(g) => HttpResponse::Ok().json(g.summaries()),
        Err(_) => lock_error(),
    }
}

/// Create a new league (returns it with id).
#[post("/api/leagues")]
async fn api_create_league(state: AppState, body: Json<CreateLeagueBody>) -> HttpResponse {
    let league = match League::new(body.into_inner().name) {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let response = HttpResponse::Ok().json(&league);
    log::info!("League '{}' created ({})", league.name, league.id);
    g.insert(league);
    response
}

#[get("/api/leagues/{id}")]
async fn api_get_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(path.id) {
        Some(league) => HttpResponse::Ok().json(league),
        None => no_league(),
    }
}

#[delete("/api/leagues/{id}")]
async fn api_delete_league(state: AppState, path: Path<LeaguePath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove(path.id) {
        Some(league) => {
            log::info!("League '{}' deleted", league.name);
            HttpResponse::NoContent().finish()
        }
        None => no_league(),
    }
}

/// Add a player to the roster.
#[post("/api/leagues/{id}/players")]
async fn api_add_player(state: AppState, path: Path<LeaguePath>, body: Json<AddPlayerBody>) -> HttpResponse {
    let AddPlayerBody { name, nickname } = body.into_inner();
    update_league(&state, path.id, |league| league.add_player(name, nickname).map(|_| ()))
}

/// Import players from a CSV body (header: name[,nickname]).
#[post("/api/leagues/{id}/players/import")]
async fn api_import_players(state: AppState, path: Path<LeaguePath>, body: String) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let league = match g.get_mut(path.id) {
        Some(l) => l,
        None => return no_league(),
    };
    match import_players_csv(league, body.as_bytes()) {
        Ok(added) => HttpResponse::Ok().json(ImportResponse {
            added,
            league: &*league,
        }),
        Err(e) => bad_request(e),
    }
}

#[put("/api/leagues/{id}/players/{player_id}")]
async fn api_rename_player(
    state: AppState,
    path: Path<LeaguePlayerPath>,
    body: Json<RenamePlayerBody>,
) -> HttpResponse {
    update_league(&state, path.id, |league| league.rename_player(path.player_id, &body.name))
}

/// Remove a player from the roster (not while in a started season).
#[delete("/api/leagues/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<LeaguePlayerPath>) -> HttpResponse {
    update_league(&state, path.id, |league| league.remove_player(path.player_id))
}

/// Create a season in Setup (body: season settings).
#[post("/api/leagues/{id}/seasons")]
async fn api_create_season(
    state: AppState,
    path: Path<LeaguePath>,
    body: Json<SeasonSettings>,
) -> HttpResponse {
    let settings = body.into_inner();
    update_league(&state, path.id, |league| league.create_season(settings).map(|_| ()))
}

#[get("/api/leagues/{id}/seasons/{season_id}")]
async fn api_get_season(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    read_season(&state, path.id, path.season_id, |_, season| season_json(season))
}

/// Replace a season's settings (Setup only; the name is kept).
#[put("/api/leagues/{id}/seasons/{season_id}")]
async fn api_update_season(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<SeasonSettings>,
) -> HttpResponse {
    let settings = body.into_inner();
    update_season(&state, path.id, path.season_id, |season| season.update_settings(settings))
}

#[delete("/api/leagues/{id}/seasons/{season_id}")]
async fn api_delete_season(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    update_league(&state, path.id, |league| league.remove_season(path.season_id))
}

/// Enter a rostered player into a season (Setup only).
#[post("/api/leagues/{id}/seasons/{season_id}/participants")]
async fn api_add_participant(
    state: AppState,
    path: Path<SeasonPath>,
    body: Json<AddParticipantBody>,
) -> HttpResponse {
    update_league(&state, path.id, |league| {
        league.add_participant(path.season_id, body.player_id)
    })
}

#[delete("/api/leagues/{id}/seasons/{season_id}/participants/{player_id}")]
async fn api_remove_participant(state: AppState, path: Path<SeasonPlayerPath>) -> HttpResponse {
    update_league(&state, path.id, |league| {
        league.remove_participant(path.season_id, path.player_id)
    })
}

/// Generate the schedule and start the season (Setup -> InProgress).
#[post("/api/leagues/{id}/seasons/{season_id}/start")]
async fn api_start_season(
    state: AppState,
    path: Path<SeasonPath>,
    body: Option<Json<StartSeasonBody>>,
) -> HttpResponse {
    let shuffle = body.map(|b| b.into_inner()).unwrap_or_default().shuffle;
    update_season(&state, path.id, path.season_id, |season| start_season(season, shuffle))
}

/// Drop the schedule and results, back to Setup.
#[post("/api/leagues/{id}/seasons/{season_id}/restart")]
async fn api_restart_season(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    update_season(&state, path.id, path.season_id, restart_season)
}

/// Record or overwrite a fixture result.
#[put("/api/leagues/{id}/seasons/{season_id}/fixtures/{fixture_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<FixturePath>,
    body: Json<FixtureResult>,
) -> HttpResponse {
    let result = body.into_inner();
    update_season(&state, path.id, path.season_id, |season| {
        record_result(season, path.fixture_id, result)
    })
}

#[delete("/api/leagues/{id}/seasons/{season_id}/fixtures/{fixture_id}/result")]
async fn api_clear_result(state: AppState, path: Path<FixturePath>) -> HttpResponse {
    update_season(&state, path.id, path.season_id, |season| {
        clear_result(season, path.fixture_id)
    })
}

/// Move a matchday to another date (or clear it with null).
#[put("/api/leagues/{id}/seasons/{season_id}/matchdays/{number}/date")]
async fn api_set_matchday_date(
    state: AppState,
    path: Path<MatchdayPath>,
    body: Json<MatchdayDateBody>,
) -> HttpResponse {
    update_season(&state, path.id, path.season_id, |season| {
        set_matchday_date(season, path.number, body.date)
    })
}

#[get("/api/leagues/{id}/seasons/{season_id}/standings")]
async fn api_standings(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    read_season(&state, path.id, path.season_id, |league, season| {
        HttpResponse::Ok().json(compute_standings(season, &league.players))
    })
}

#[get("/api/leagues/{id}/seasons/{season_id}/standings.csv")]
async fn api_standings_csv(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    read_season(&state, path.id, path.season_id, |league, season| {
        let rows = compute_standings(season, &league.players);
        match standings_csv(&rows) {
            Ok(csv) => csv_download("standings.csv", csv),
            Err(e) => bad_request(e),
        }
    })
}

#[get("/api/leagues/{id}/seasons/{season_id}/schedule.csv")]
async fn api_schedule_csv(state: AppState, path: Path<SeasonPath>) -> HttpResponse {
    read_season(&state, path.id, path.season_id, |league, season| {
        match schedule_csv(season, &league.players) {
            Ok(csv) => csv_download("schedule.csv", csv),
            Err(e) => bad_request(e),
        }
    })
}

/// Write the store to the configured data file if anything changed.
///
/// Serializes under the read lock and writes the file with no lock held.
fn snapshot(state: &AppState, config: &ServerConfig) {
    let Some(path) = config.data_file.as_deref() else {
        return;
    };
    let serialized = match state.read() {
        Ok(g) if !g.is_dirty() => return,
        Ok(g) => g.snapshot_bytes(),
        Err(_) => {
            log::warn!("Snapshot skipped: lock error");
            return;
        }
    };
    let (revision, json) = match serialized {
        Ok(snap) => snap,
        Err(e) => {
            log::warn!("Snapshot serialization failed: {}", e);
            return;
        }
    };
    if let Err(e) = write_snapshot(path, &json) {
        log::warn!("Snapshot to {} failed: {}", path.display(), e);
        return;
    }
    match state.write() {
        Ok(mut g) => g.mark_saved(revision),
        Err(_) => log::warn!("Snapshot written but not marked saved: lock error"),
    }
    log::debug!("Snapshot written to {}", path.display());
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    let store = match config.data_file.as_deref() {
        Some(path) => LeagueStore::load(path)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?,
        None => LeagueStore::new(),
    };
    let state = Data::new(RwLock::new(store));

    // Background task: periodically write a snapshot when a data file is configured
    if config.data_file.is_some() {
        let state_snapshot = state.clone();
        let config_snapshot = config.clone();
        actix_web::rt::spawn(async move {
            let mut interval = tokio::time::interval(config_snapshot.snapshot_interval);
            interval.tick().await;
            loop {
                interval.tick().await;
                snapshot(&state_snapshot, &config_snapshot);
            }
        });
    }

    let (host, port) = config.bind_addr();
    log::info!("Starting server at http://{}:{}", host, port);

    let app_state = state.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_list_leagues)
            .service(api_create_league)
            .service(api_get_league)
            .service(api_delete_league)
            .service(api_import_players)
            .service(api_add_player)
            .service(api_rename_player)
            .service(api_remove_player)
            .service(api_create_season)
            .service(api_get_season)
            .service(api_update_season)
            .service(api_delete_season)
            .service(api_add_participant)
            .service(api_remove_participant)
            .service(api_start_season)
            .service(api_restart_season)
            .service(api_record_result)
            .service(api_clear_result)
            .service(api_set_matchday_date)
            .service(api_standings_csv)
            .service(api_schedule_csv)
            .service(api_standings)
            .service(Files::new("/static", "static"))
    })
    .bind((host, port))?
    .run()
    .await?;

    snapshot(&state, &config);
    Ok(())
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
