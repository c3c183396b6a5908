// HTTP handler bindings for Battlesnake API endpoints
//
// Thin wrappers binding Rocket routes to the Bot's methods. Handlers
// deserialize the request, reject malformed snapshots, delegate to the Bot
// and serialize its answer.

use log::warn;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{get, post, routes, Build, Rocket};
use serde_json::Value;

use crate::bot::Bot;
use crate::types::GameState;

/// GET / endpoint
/// Returns bot metadata and appearance configuration
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Called when a game starts - allows initialization logic
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<GameState>) -> Status {
    bot.start(
        &start_req.game,
        &start_req.turn,
        &start_req.board,
        &start_req.you,
    );

    Status::Ok
}

/// POST /move endpoint
/// Called each turn to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Json<GameState>,
) -> Result<Json<Value>, Status> {
    if let Err(e) = move_req.validate() {
        warn!("Rejecting move request for game {}: {}", move_req.game.id, e);
        return Err(Status::UnprocessableEntity);
    }

    let response = bot
        .get_move(
            &move_req.game,
            &move_req.turn,
            &move_req.board,
            &move_req.you,
        )
        .await;

    Ok(Json(response))
}

/// POST /end endpoint
/// Called when a game ends - allows cleanup and logging
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameState>) -> Status {
    bot.end(&end_req.game, &end_req.turn, &end_req.board, &end_req.you);

    Status::Ok
}

/// Assembles the Rocket instance serving `bot`
pub fn build_rocket(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/fieldsnake");
            })
        }))
        .mount("/", routes![index, start, get_move, end])
}
