/// HTTP handlers for the Nexus API
pub mod health;
pub mod posts;
pub mod users;

use actix_web::web;

/// Route table, shared by the server binary and the test harness.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health))
        .route("/users", web::get().to(users::list_users))
        .route("/users/add", web::post().to(users::add_user))
        .route("/user/{name}", web::get().to(users::search_users))
        .route("/user-img/{id}", web::get().to(users::user_image))
        .route("/register", web::post().to(users::register))
        .route("/login", web::post().to(users::login))
        .route("/posts", web::get().to(posts::feed))
        .route("/posts", web::post().to(posts::create_post))
        .route("/midia-post/{id}", web::get().to(posts::post_media));
}
