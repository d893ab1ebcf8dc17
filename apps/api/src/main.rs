use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

mod router;

use scheduling_cell::{
    AppointmentBookingService, InMemoryAppointmentStore, InMemoryClinicDirectory,
    LoggingNotificationTrigger, SystemClock, WorkingHours,
};
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinic scheduling API server");

    // Load configuration
    let config = AppConfig::from_env();
    let clinics = load_clinic_directory(&config)?;
    info!("Loaded working hours for {} clinics", clinics.clinic_count().await);

    let service = AppointmentBookingService::new(
        &config,
        Arc::new(clinics),
        Arc::new(InMemoryAppointmentStore::new()),
        Arc::new(SystemClock),
        Arc::new(LoggingNotificationTrigger),
    );

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(Arc::new(service))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn load_clinic_directory(config: &AppConfig) -> Result<InMemoryClinicDirectory> {
    let Some(path) = config.clinic_hours_file.as_deref() else {
        return Ok(InMemoryClinicDirectory::new());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read clinic hours file {}", path))?;
    let clinics: HashMap<Uuid, WorkingHours> = serde_json::from_str(&raw)
        .with_context(|| format!("invalid clinic hours in {}", path))?;

    Ok(InMemoryClinicDirectory::with_clinics(clinics))
}
