use std::env;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use device_shop_backend::api::ApiDoc;
use device_shop_backend::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use device_shop_backend::auth::adapter::outgoing::security::{Argon2Hasher, BcryptHasher};
use device_shop_backend::auth::adapter::outgoing::{
    TokenRepositoryPostgres, UserQueryPostgres, UserRepositoryPostgres,
};
use device_shop_backend::auth::application::ports::outgoing::PasswordHasher;
use device_shop_backend::auth::application::services::TokenService;
use device_shop_backend::auth::application::{UserService, UserServiceDeps};
use device_shop_backend::email::adapter::outgoing::{MockEmailSender, SmtpEmailSender};
use device_shop_backend::email::application::ports::outgoing::EmailSender;
use device_shop_backend::email::application::services::{
    ActivationOutbox, OutboxConfig, UserEmailService,
};
use device_shop_backend::shared::api::custom_json_config;
use device_shop_backend::{init_routes, AppState};

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} is not set"))
}

fn password_hasher() -> Arc<dyn PasswordHasher> {
    match env::var("PASSWORD_HASHER").as_deref() {
        Ok("bcrypt") => {
            let hasher = BcryptHasher::from_env();
            info!(cost = hasher.cost(), "Using bcrypt password hasher");
            Arc::new(hasher)
        }
        Ok("argon2") | Err(_) => {
            info!("Using argon2 password hasher");
            Arc::new(Argon2Hasher::from_env())
        }
        Ok(other) => {
            warn!(value = other, "Unknown PASSWORD_HASHER, falling back to argon2");
            Arc::new(Argon2Hasher::from_env())
        }
    }
}

fn email_sender() -> anyhow::Result<Arc<dyn EmailSender>> {
    let from_email = required("EMAIL_FROM")?;

    if env::var("RUST_ENV").as_deref() == Ok("test") {
        // Local Mailpit
        let host = env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .context("Invalid SMTP_PORT")?;
        return Ok(Arc::new(SmtpEmailSender::new_local(&host, port, &from_email)));
    }

    match env::var("SMTP_SERVER") {
        Ok(server) => {
            let user = required("SMTP_USERNAME")?;
            let pass = required("SMTP_PASSWORD")?;
            let sender = SmtpEmailSender::new(&server, &user, &pass, &from_email)
                .context("Failed to configure SMTP transport")?;
            Ok(Arc::new(sender))
        }
        Err(_) => {
            warn!("SMTP_SERVER not set; activation mail will only be logged");
            Ok(Arc::new(MockEmailSender::new()))
        }
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Try .env.{environment} first, then fall back to .env
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    if dotenvy::from_filename(format!(".env.{rust_env}")).is_err() {
        dotenvy::dotenv().ok();
    }
    info!(env = %rust_env, "Starting application...");

    let db_url = required("DATABASE_URL")?;
    let host = required("HOST")?;
    let port = required("PORT")?;
    let server_url = format!("{host}:{port}");
    let api_url = env::var("API_URL").unwrap_or_else(|_| format!("http://{server_url}"));
    let client_url = env::var("CLIENT_URL").ok().filter(|url| !url.is_empty());

    let jwt_config = JwtConfig::from_env().context("Invalid JWT configuration")?;

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&conn, None)
        .await
        .context("Failed to run migrations")?;
    let db_arc = Arc::new(conn);

    let user_query = Arc::new(UserQueryPostgres::new(Arc::clone(&db_arc)));
    let user_repository = Arc::new(UserRepositoryPostgres::new(Arc::clone(&db_arc)));
    let token_repository = Arc::new(TokenRepositoryPostgres::new(Arc::clone(&db_arc)));

    let token_service = TokenService::new(
        Arc::new(JwtTokenService::new(jwt_config)),
        token_repository,
    );

    let notifier = Arc::new(UserEmailService::new(email_sender()?));
    let outbox_config = OutboxConfig::from_env();
    let retry_interval = outbox_config.retry_interval;
    let (outbox, outbox_worker) = ActivationOutbox::spawn(outbox_config, notifier);
    let retry_loop = retry_interval.map(|interval| outbox.spawn_retry_loop(interval));

    let user_service = UserService::new(UserServiceDeps {
        user_query,
        user_repository,
        password_hasher: password_hasher(),
        token_service: token_service.clone(),
        activation_dispatcher: Arc::new(outbox.clone()),
        api_url,
    });

    let state = AppState {
        user_service,
        token_service,
        client_url,
    };

    info!(address = %server_url, "HTTP server listening");
    let db_for_server = Arc::clone(&db_arc);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(&server_url)?
    .run()
    .await?;

    let stats = outbox.stats();
    info!(
        enqueued = stats.enqueued,
        delivered = stats.delivered,
        failed = stats.failed,
        rejected = stats.rejected,
        dropped = stats.dropped,
        pending = stats.pending(),
        "Server stopped"
    );
    if let Some(retry_loop) = retry_loop {
        retry_loop.abort();
    }
    let dead_letters = outbox.drain_dead_letters();
    if outbox.shutdown(outbox_worker, Duration::from_secs(10)).await {
        info!("Activation outbox drained");
    }
    for dead in dead_letters {
        warn!(to = %dead.mail.to, attempts = dead.attempts, error = %dead.last_error, "Undelivered activation mail");
    }

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
