//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::extractor_error;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| extractor_error(err, req)))
        .app_data(web::QueryConfig::default().error_handler(|err, req| extractor_error(err, req)))
        .app_data(web::PathConfig::default().error_handler(|err, req| extractor_error(err, req)))
        .service(
            web::scope("/v1")
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("", web::get().to(posts::get_posts))
                        .route("/{postId}", web::get().to(posts::get_post))
                        .route("/{postId}", web::patch().to(posts::update_post))
                        .route("/{postId}", web::delete().to(posts::delete_post)),
                ),
        );
}
