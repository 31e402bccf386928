use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use study_buddy::{api, data, store::SnapshotStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading Study Buddy seed data...");
    let store = web::Data::new(SnapshotStore::new());
    data::seed_store(store.get_ref())?;
    info!(classrooms = store.classrooms().len(), "store ready");

    info!("Starting Study Buddy API on http://127.0.0.1:8080");
    HttpServer::new({
        let store = store.clone();
        move || App::new().app_data(store.clone()).configure(api::configure)
    })
    .bind(("127.0.0.1", 8080))
    .context("failed to bind 127.0.0.1:8080")?
    .run()
    .await?;

    Ok(())
}
