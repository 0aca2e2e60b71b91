mod create_itinerary;
mod delete_itinerary;
mod get_itinerary;
mod get_user_itineraries;
mod update_itinerary;

use actix_web::web;
use create_itinerary::create_itinerary_controller;
use delete_itinerary::delete_itinerary_controller;
use get_itinerary::get_itinerary_controller;
use get_user_itineraries::get_user_itineraries_controller;
use update_itinerary::update_itinerary_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/user/{user_id}/itineraries",
        web::post().to(create_itinerary_controller),
    );
    cfg.route(
        "/user/{user_id}/itineraries",
        web::get().to(get_user_itineraries_controller),
    );
    cfg.route(
        "/itineraries/{itinerary_id}",
        web::get().to(get_itinerary_controller),
    );
    cfg.route(
        "/itineraries/{itinerary_id}",
        web::put().to(update_itinerary_controller),
    );
    cfg.route(
        "/itineraries/{itinerary_id}",
        web::delete().to(delete_itinerary_controller),
    );
}
