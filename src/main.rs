use poem::{listener::TcpListener, middleware::Tracing, EndpointExt, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::Database;
use std::sync::Arc;

use hospital_backend::api::{AppointmentApi, AuthApi, DashboardApi, HealthApi, PatientApi};
use hospital_backend::app_data::AppData;
use hospital_backend::config::{init_logging, AppSettings};
use migration::{Migrator, MigratorTrait};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging().expect("Failed to initialize logging");

    let settings = AppSettings::from_env().expect("Invalid configuration");

    let db = Database::connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!(database_url = %settings.database_url, "Connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    let bind_addr = settings.bind_addr.clone();
    let app_data = Arc::new(AppData::init(db, settings));

    // Bootstrap an admin account on a fresh database so someone can log in
    if let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_EMAIL"),
        std::env::var("ADMIN_PASSWORD"),
    ) {
        match app_data.user_store.ensure_admin(&email, &password).await {
            Ok(true) => tracing::info!(%email, "Seeded initial admin account"),
            Ok(false) => tracing::debug!(%email, "Admin account already exists"),
            Err(e) => tracing::error!("Failed to seed admin account: {}", e),
        }
    }

    let auth_api = AuthApi::new(
        app_data.user_store.clone(),
        app_data.token_service.clone(),
    );
    let patient_api = PatientApi::new(
        app_data.patient_store.clone(),
        app_data.token_service.clone(),
        app_data.permissions.clone(),
    );
    let appointment_api = AppointmentApi::new(
        app_data.appointment_store.clone(),
        app_data.patient_store.clone(),
        app_data.user_store.clone(),
        app_data.token_service.clone(),
        app_data.permissions.clone(),
    );
    let dashboard_api = DashboardApi::new(
        app_data.appointment_store.clone(),
        app_data.patient_store.clone(),
        app_data.user_store.clone(),
        app_data.catalog_store.clone(),
        app_data.token_service.clone(),
        app_data.permissions.clone(),
    );

    let api_service = OpenApiService::new(
        (
            HealthApi,
            auth_api,
            patient_api,
            appointment_api,
            dashboard_api,
        ),
        "Hospital Management API",
        "1.0.0",
    )
    .server(format!("http://localhost:{}/api", port_of(&bind_addr)));

    let ui = api_service.swagger_ui();

    let app = Route::new()
        .nest("/api", api_service)
        .nest("/swagger", ui)
        .with(Tracing);

    tracing::info!("Starting server on http://{}", bind_addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger",
        port_of(&bind_addr)
    );

    Server::new(TcpListener::bind(bind_addr)).run(app).await
}

fn port_of(bind_addr: &str) -> &str {
    bind_addr.rsplit(':').next().unwrap_or("3000")
}
