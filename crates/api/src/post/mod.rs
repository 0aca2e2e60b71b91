mod create_post;
mod delete_post;
mod get_post;
mod get_user_posts;
mod update_post;

use actix_web::web;
use create_post::create_post_controller;
use delete_post::delete_post_controller;
use get_post::get_post_controller;
use get_user_posts::get_user_posts_controller;
use update_post::update_post_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/{user_id}/posts", web::post().to(create_post_controller));
    cfg.route("/user/{user_id}/posts", web::get().to(get_user_posts_controller));
    cfg.route("/posts/{post_id}", web::get().to(get_post_controller));
    cfg.route("/posts/{post_id}", web::put().to(update_post_controller));
    cfg.route("/posts/{post_id}", web::delete().to(delete_post_controller));
}
