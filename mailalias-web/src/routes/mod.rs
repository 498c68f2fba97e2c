//! HTTP routes

mod emails;
mod forwarding;
mod health;
mod send;
mod test_webhook;

use actix_web::web;

use crate::error::json_error_handler;

pub use test_webhook::PublicUrl;

/// Register every route plus the JSON body config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health))
        .service(
            web::scope("/api")
                .route("/forwarding", web::get().to(forwarding::get_forwarding))
                .route("/forwarding", web::post().to(forwarding::update_forwarding))
                .route("/emails", web::get().to(emails::list_emails))
                .route("/emails", web::patch().to(emails::mark_email))
                .route("/send", web::post().to(send::send_email))
                .route("/test-webhook", web::get().to(test_webhook::usage))
                .route("/test-webhook", web::post().to(test_webhook::trigger)),
        );
}
