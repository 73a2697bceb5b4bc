use anyhow::Context;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

use crate::errors::AuthError;
use crate::telemetry::spawn_blocking_with_tracing;

pub struct Credentials {
    pub shop_domain: String,
    pub password: SecretString,
}

#[tracing::instrument(name = "Get stored credentials", skip(shop_domain, pool))]
async fn get_stored_credentials(
    shop_domain: &str,
    pool: &PgPool,
) -> Result<Option<(String, SecretString)>, anyhow::Error> {
    let row = sqlx::query_as::<_, (String, String)>(
        r#"
        SELECT shop_domain, password_hash
        FROM shops
        WHERE shop_domain = $1
        "#,
    )
    .bind(shop_domain)
    .fetch_optional(pool)
    .await
    .context("Failed to perform a query to retrieve stored credentials.")?
    .map(|(shop_domain, password_hash)| (shop_domain, SecretString::new(Box::from(password_hash))));
    Ok(row)
}

#[tracing::instrument("Validate credentials", skip(credentials, pool))]
/// # Errors
/// `AuthError::InvalidCredentials` if the shop is unknown or the password does not verify,
/// `AuthError::UnexpectedError` if the lookup itself fails
pub async fn validate_credentials(
    credentials: Credentials,
    pool: &PgPool,
) -> Result<String, AuthError> {
    let mut shop_domain = None;
    // made-up hash so unknown shops cost the same as known ones
    let expected_password_hash = if let Some((stored_shop_domain, stored_password_hash)) =
        get_stored_credentials(&credentials.shop_domain, pool).await?
    {
        shop_domain = Some(stored_shop_domain);
        stored_password_hash
    } else {
        SecretString::new(
            "$argon2id$v=19$m=15000,t=2,p=1$\
                gZiV/M1gPc22ElAH/Jh1Hw$\
                CWOrkoo7oJBQ/iyh7uJ0LO2aLEfrHwTWllSAxT0zRno"
                .into(),
        )
    };

    spawn_blocking_with_tracing(move || {
        verify_password_hash(&expected_password_hash, &credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    // only Some when the shop row exists, a matching dummy hash never logs anyone in
    shop_domain
        .ok_or_else(|| anyhow::anyhow!("Unknown shop."))
        .map_err(AuthError::InvalidCredentials)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: &SecretString,
    password_candidate: &SecretString,
) -> Result<(), AuthError> {
    let expected_password_hash = PasswordHash::new(expected_password_hash.expose_secret())
        .context("Failed to parse hash in PHC string format.")?;

    Argon2::default()
        .verify_password(
            password_candidate.expose_secret().as_bytes(),
            &expected_password_hash,
        )
        .context("Invalid password.")
        .map_err(AuthError::InvalidCredentials)
}
