use actix_cors::Cors;
use actix_limitation::Limiter;
use actix_session::{SessionMiddleware, storage::RedisSessionStore};
use actix_web::{App, HttpServer, cookie::Key, dev::Server, http, middleware::from_fn, web, web::Data};
use secrecy::{ExposeSecret, SecretString};
use sqlx::{PgPool, postgres::PgPoolOptions};
use std::net::TcpListener;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use crate::authentication::reject_anonymous_shops;
use crate::configuration::{
    AnalyticsSettings, CorsSettings, DatabaseSettings, LoginRateLimitSettings, Settings,
};
use crate::routes::{
    check_auth, get_analytics, get_not_found_errors, get_themes, health_check, login, logout,
    update_theme_status,
};
use crate::themes::ThemeClient;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    #[allow(clippy::missing_errors_doc)]
    pub async fn build(configuration: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&configuration.database);

        let theme_client = ThemeClient::new(
            configuration.shopify.base_url.clone(),
            configuration.shopify.api_version.clone(),
            configuration.shopify.timeout(),
        )?;

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port,
        );

        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();
        let server = run(
            listener,
            connection_pool,
            theme_client,
            configuration.application.hmac_secret,
            configuration.redis_uri,
            configuration.rate_limit.login,
            configuration.cors,
            configuration.analytics,
        )
        .await?;

        Ok(Self { port, server })
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[allow(clippy::missing_errors_doc)]
    // only return when the application is stopped
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

// run the actual server
#[allow(clippy::too_many_arguments)]
async fn run(
    listener: TcpListener,
    db_pool: PgPool,
    theme_client: ThemeClient,
    hmac_secret: SecretString,
    redis_uri: SecretString,
    login_rate: LoginRateLimitSettings,
    cors: CorsSettings,
    analytics: AnalyticsSettings,
) -> Result<Server, anyhow::Error> {
    let db_pool = Data::new(db_pool);
    let theme_client = Data::new(theme_client);
    let analytics = Data::new(analytics);
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let redis_store = RedisSessionStore::new(redis_uri.expose_secret()).await?;
    let limiter = Data::new(
        Limiter::builder(redis_uri.expose_secret())
            .key_by(|req| {
                req.connection_info()
                    .realip_remote_addr()
                    .map(ToString::to_string)
            })
            .limit(login_rate.max_requests)
            .period(Duration::from_secs(login_rate.window_secs))
            .build()?,
    );
    let allowed_origin = cors
        .allowed_origins
        .first()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("At least one allowed CORS origin is required"))?;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(
                redis_store.clone(),
                secret_key.clone(),
            ))
            .wrap(TracingLogger::default())
            .wrap(Cors::default()
                .allowed_origin(&allowed_origin)
                .allowed_methods(vec!["GET", "POST"])
                .allowed_headers(vec![
                    http::header::AUTHORIZATION,
                    http::header::ACCEPT,
                    http::header::CONTENT_TYPE,
                ])
                .supports_credentials()
                .max_age(cors.max_age)
            )
            .route("/health_check", web::get().to(health_check))
            .route("/api/login", web::post().to(login))
            .route("/api/logout", web::post().to(logout))
            .route("/api/check-auth", web::get().to(check_auth))
            .service(
                web::scope("/api/admin")
                    .wrap(from_fn(reject_anonymous_shops))
                    .route("/analytics", web::get().to(get_analytics))
                    .route("/errors", web::get().to(get_not_found_errors))
                    .route("/themes", web::get().to(get_themes))
                    .route("/themes/status", web::post().to(update_theme_status)),
            )
            .app_data(db_pool.clone())
            .app_data(theme_client.clone())
            .app_data(analytics.clone())
            .app_data(limiter.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

#[must_use]
pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new().connect_lazy_with(configuration.connect_options())
}
