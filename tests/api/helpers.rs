use argon2::{
    Algorithm, Argon2, Params, PasswordHasher, Version,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use rustls::crypto::CryptoProvider;
use secrecy::SecretString;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::sync::LazyLock;
use uuid::Uuid;
use wiremock::MockServer;

use broken_link_analytics::{
    configuration::{DatabaseSettings, get_configuration},
    startup::{Application, get_connection_pool},
    telemetry::{get_subscriber, init_subscriber},
};

// tracing and the rustls provider are process-wide, set them up once
static TRACING: LazyLock<()> = LazyLock::new(|| {
    let _ = CryptoProvider::install_default(rustls::crypto::aws_lc_rs::default_provider());

    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

#[derive(Debug)]
pub struct TestShop {
    pub shop_domain: String,
    pub password: String,
    pub access_token: String,
}

impl TestShop {
    pub fn generate() -> Self {
        Self {
            shop_domain: format!("{}.myshopify.com", Uuid::new_v4()),
            password: Uuid::new_v4().to_string(),
            access_token: format!("shpat_{}", Uuid::new_v4().simple()),
        }
    }

    pub async fn login(&self, app: &TestApp) {
        let response = app
            .post_login(&serde_json::json!({
                "shop_domain": &self.shop_domain,
                "password": &self.password
            }))
            .await;
        assert_eq!(response.status().as_u16(), 200, "test shop failed to log in");
    }

    async fn store(&self, pool: &PgPool) {
        let salt = SaltString::generate(&mut OsRng);

        let password_hash = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15000, 2, 1, None).unwrap(),
        )
        .hash_password(self.password.as_bytes(), &salt)
        .unwrap()
        .to_string();

        sqlx::query(
            "INSERT INTO shops (shop_domain, access_token, password_hash)
            VALUES ($1, $2, $3)",
        )
        .bind(&self.shop_domain)
        .bind(&self.access_token)
        .bind(password_hash)
        .execute(pool)
        .await
        .expect("Failed to store test shop.");
    }
}

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub _port: u16,
    pub test_shop: TestShop,
    pub api_client: reqwest::Client,
    pub theme_server: MockServer,
    pub api_version: String,
}

impl TestApp {
    pub async fn post_login<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/api/login", &self.address))
            .form(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/logout", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn check_auth(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/check-auth", &self.address))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn health_check(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/health_check", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_analytics(&self, range: Option<&str>) -> reqwest::Response {
        let url = match range {
            Some(range) => format!("{}/api/admin/analytics?range={}", &self.address, range),
            None => format!("{}/api/admin/analytics", &self.address),
        };
        self.api_client
            .get(&url)
            .send()
            .await
            .expect("Failed to get analytics.")
    }

    pub async fn get_errors(&self, query: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/admin/errors?{}", &self.address, query))
            .send()
            .await
            .expect("Failed to get 404 errors.")
    }

    pub async fn get_themes(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/api/admin/themes", &self.address))
            .send()
            .await
            .expect("Failed to get themes.")
    }

    pub async fn post_theme_status<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/api/admin/themes/status", &self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to update theme status.")
    }

    pub fn theme_api_path(&self) -> String {
        format!("/admin/api/{}/graphql.json", self.api_version)
    }

    pub async fn insert_error(
        &self,
        shop_domain: &str,
        path: &str,
        referer: Option<&str>,
        created_at: DateTime<Utc>,
        redirected: bool,
    ) {
        sqlx::query(
            "INSERT INTO not_found_errors (error_id, shop_domain, path, referer, created_at, redirected)
            VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(Uuid::new_v4())
        .bind(shop_domain)
        .bind(path)
        .bind(referer)
        .bind(created_at)
        .bind(redirected)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert 404 error.");
    }

    pub async fn insert_redirect(&self, shop_domain: &str, created_at: DateTime<Utc>) {
        sqlx::query(
            "INSERT INTO redirects (redirect_id, shop_domain, from_path, to_path, created_at)
            VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(Uuid::new_v4())
        .bind(shop_domain)
        .bind("/old")
        .bind("/new")
        .bind(created_at)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert redirect.");
    }
}

pub async fn spawn_app() -> TestApp {
    LazyLock::force(&TRACING);

    // stands in for the platform admin API
    let theme_server = MockServer::start().await;

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.database.database_name = Uuid::new_v4().to_string();
        c.application.port = 0;
        c.shopify.base_url = Some(theme_server.uri());
        c
    };

    //create and migrate the database
    configure_database(&configuration.database).await;

    // launch as background task
    let application = Application::build(configuration.clone())
        .await
        .expect("Failed to build application.");

    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    let test_app = TestApp {
        address: format!("http://localhost:{}", application_port),
        _port: application_port,
        db_pool: get_connection_pool(&configuration.database),
        test_shop: TestShop::generate(),
        api_client: client,
        theme_server,
        api_version: configuration.shopify.api_version.clone(),
    };
    test_app.test_shop.store(&test_app.db_pool).await;
    test_app
}

async fn configure_database(config: &DatabaseSettings) -> PgPool {
    let maintenance_settings = DatabaseSettings {
        database_name: "postgres".to_string(),
        username: "postgres".to_string(),
        password: SecretString::new("password".into()),
        ..config.clone()
    };

    let mut connection = PgConnection::connect_with(&maintenance_settings.connect_options())
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database.");

    let connection_pool = PgPool::connect_with(config.connect_options())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database.");

    connection_pool
}
