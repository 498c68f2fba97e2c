use std::sync::Arc;
use std::time::Instant;

use actix_service::Service;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use mailalias_app::AppStateBuilder;
use mailalias_app::adapters::SqliteStore;
use mailalias_web::config::Config;
use mailalias_web::{PublicUrl, configure, logging};
use uuid::Uuid;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("MAILALIAS_CONFIG").ok();
    let config = Config::load(config_path.as_deref()).context("failed to load configuration")?;
    config.validate()?;

    // 持有 guard 直到进程退出，保证文件日志落盘
    let _log_guard = logging::init(&config.logging)?;

    tracing::info!("Starting mailalias v{}", env!("CARGO_PKG_VERSION"));

    let store = SqliteStore::connect(&config.database.url)
        .await
        .context("failed to open database")?;

    let state = AppStateBuilder::new()
        .sqlite_store(Arc::new(store))
        .dns_sync(config.dns.clone())
        .relay_api_key(config.relay.api_key.clone())
        .apex_domain(config.mail.apex_domain.clone())
        .build()
        .context("failed to build application state")?;

    tracing::info!(
        apex_domain = %state.ctx.apex_domain,
        dns_sync = state.dns_sync_enabled(),
        relay = state.relay_configured(),
        "application state ready"
    );

    let state = web::Data::new(state);
    if config.server.public_url.is_none() {
        tracing::warn!("server.public_url not set, /api/test-webhook will post to the request Host");
    }
    let public_url = web::Data::new(PublicUrl(config.server.public_url.clone()));
    let workers = config.server.workers.unwrap_or_else(num_cpus::get);
    let bind = (config.server.bind_address.clone(), config.server.port);

    tracing::info!("Listening on {}:{} ({workers} workers)", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(public_url.clone())
            .wrap_fn(|req, srv| {
                let request_id = Uuid::new_v4();
                let method = req.method().clone();
                let path = req.path().to_owned();
                let started = Instant::now();
                let fut = srv.call(req);
                async move {
                    let res = fut.await?;
                    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                    tracing::info!(
                        %request_id,
                        %method,
                        %path,
                        status = res.status().as_u16(),
                        elapsed_ms,
                        "request"
                    );
                    Ok(res)
                }
            })
            .configure(configure)
    })
    .workers(workers)
    .bind(bind)
    .context("failed to bind HTTP listener")?
    .run()
    .await?;

    Ok(())
}
