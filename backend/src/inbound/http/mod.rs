//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and render domain values through the DTO modules.

pub mod catalogue;
pub mod error;
pub mod health;
pub mod recipes;
pub mod recipes_dto;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod users_dto;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every `/api/v1` route on the given config.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(catalogue::list_ingredients)
        .service(catalogue::get_ingredient)
        .service(catalogue::list_tags)
        .service(catalogue::get_tag)
        .configure(recipes::configure)
        .configure(users::configure);
}
