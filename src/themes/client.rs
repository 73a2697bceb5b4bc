use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

use crate::models::theme::Theme;

const THEMES_QUERY: &str = r#"
query {
    themes(first: 10) {
        nodes {
            id
            name
            role
        }
    }
}
"#;

#[derive(serde::Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

#[derive(serde::Deserialize, Debug)]
struct GraphQlResponse {
    data: Option<ThemesData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(serde::Deserialize, Debug)]
struct ThemesData {
    themes: ThemeConnection,
}

#[derive(serde::Deserialize, Debug)]
struct ThemeConnection {
    nodes: Vec<Theme>,
}

#[derive(serde::Deserialize, Debug)]
struct GraphQlError {
    message: String,
}

// read-only client for the platform's GraphQL admin API
#[derive(Clone)]
pub struct ThemeClient {
    http_client: reqwest::Client,
    // only set when the admin API is not reached through the shop's own domain (tests)
    base_url: Option<String>,
    api_version: String,
}

impl ThemeClient {
    #[allow(clippy::missing_errors_doc)]
    pub fn new(
        base_url: Option<String>,
        api_version: String,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            api_version,
        })
    }

    /// Fetch up to ten themes for the shop.
    ///
    /// # Errors
    /// transport failures, non-2xx responses and GraphQL-level errors all come back as `anyhow` errors
    #[tracing::instrument(name = "Fetch themes from platform", skip(self, access_token))]
    pub async fn fetch_themes(
        &self,
        shop_domain: &str,
        access_token: &SecretString,
    ) -> Result<Vec<Theme>, anyhow::Error> {
        let response: GraphQlResponse = self
            .http_client
            .post(graphql_endpoint(
                self.base_url.as_deref(),
                shop_domain,
                &self.api_version,
            ))
            .header("X-Shopify-Access-Token", access_token.expose_secret())
            .json(&GraphQlRequest {
                query: THEMES_QUERY,
            })
            .send()
            .await
            .context("Failed to reach the theme platform.")?
            .error_for_status()
            .context("Theme platform returned an error status.")?
            .json()
            .await
            .context("Failed to decode the theme platform response.")?;

        themes_from_response(response)
    }
}

fn graphql_endpoint(base_url: Option<&str>, shop_domain: &str, api_version: &str) -> String {
    match base_url {
        Some(base) => format!("{base}/admin/api/{api_version}/graphql.json"),
        None => format!("https://{shop_domain}/admin/api/{api_version}/graphql.json"),
    }
}

fn themes_from_response(response: GraphQlResponse) -> Result<Vec<Theme>, anyhow::Error> {
    if let Some(error) = response.errors.first() {
        anyhow::bail!("Theme query returned an error: {}", error.message);
    }
    response
        .data
        .map(|data| data.themes.nodes)
        .ok_or_else(|| anyhow::anyhow!("Theme query returned no data"))
}
