pub mod processor;
pub mod routes;
pub mod store;
pub mod queries;
pub mod config;
pub mod cors;
pub mod error;
pub mod utils;
pub mod catchers;
pub use shared::{models::*, error::*};

use rocket::{Build, Rocket};
use crate::{
    catchers::{bad_request, internal_error, not_found, unprocessable},
    config::AppConfig,
    cors::CORS,
    routes::{all_options, cast_vote, create_poll, get_poll, list_polls, AppState},
};

pub fn build_rocket(state: AppState, config: &AppConfig) -> Rocket<Build> {
    rocket::build()
        .attach(CORS::new(config.clone()))
        .manage(state)
        .mount(
            "/api",
            rocket::routes![
                list_polls,
                create_poll,
                get_poll,
                cast_vote,
                all_options
            ],
        )
        .register(
            "/",
            rocket::catchers![
                bad_request,
                not_found,
                unprocessable,
                internal_error
            ],
        )
}
