mod send_itinerary_reminders;

use actix_web::web;
use send_itinerary_reminders::send_itinerary_reminders_controller;
pub use send_itinerary_reminders::SendItineraryRemindersUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Hit by the external cron scheduler
    cfg.route(
        "/api/send-itinerary-reminders",
        web::get().to(send_itinerary_reminders_controller),
    );
}
