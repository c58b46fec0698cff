//! HTTP handlers and route configuration.

mod auth;
mod groups;
mod health;
mod posts;
mod profile;
mod views;

use actix_web::{HttpRequest, HttpResponse, web};

use yatube_shared::ErrorResponse;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/profile/{username}", web::get().to(profile::profile))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .service(
                        web::resource("/me")
                            .route(web::get().to(auth::me))
                            .route(web::delete().to(auth::delete_me)),
                    ),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::index))
                            .route(web::post().to(posts::create)),
                    )
                    .service(
                        web::resource("/{post_id}")
                            .route(web::get().to(posts::detail))
                            .route(web::put().to(posts::edit)),
                    ),
            )
            .service(
                web::scope("/groups")
                    .service(
                        web::resource("")
                            .route(web::get().to(groups::list))
                            .route(web::post().to(groups::create)),
                    )
                    .service(
                        web::resource("/{slug}")
                            .route(web::get().to(groups::posts))
                            .route(web::patch().to(groups::update))
                            .route(web::delete().to(groups::delete)),
                    ),
            ),
    );
}

/// Fallback for unknown routes.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    HttpResponse::NotFound()
        .json(ErrorResponse::not_found("No such page").with_instance(req.path().to_string()))
}
