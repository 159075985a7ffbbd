use crate::config::Settings;
use crate::domain::promotion::RawPromotion;
use crate::upstream::types::PromotionsResponse;
use crate::upstream::{FetchError, PromotionSource};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Duration;

const AUTH_HEADER: &str = "X-Auth-Token";
const PROMOTIONS_PATH: &str = "/promotions";

#[derive(Debug, Clone)]
pub struct BigCommerceConfig {
    pub store_hash: String,
    pub access_token: String,
    pub api_version: String,
    pub api_host: String,
    pub timeout: Option<Duration>,
}

impl BigCommerceConfig {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self {
            store_hash: settings.require_store_hash()?.to_string(),
            access_token: settings.require_access_token()?.to_string(),
            api_version: settings.api_version.clone(),
            api_host: settings.api_host.clone(),
            timeout: settings.timeout_secs.map(Duration::from_secs),
        })
    }

    /// `{host}/stores/{store_hash}/{api_version}`
    pub fn base_url(&self) -> String {
        format!(
            "{}/stores/{}/{}",
            self.api_host.trim_end_matches('/'),
            self.store_hash,
            self.api_version
        )
    }

    pub fn promotions_url(&self) -> String {
        format!("{}{}", self.base_url(), PROMOTIONS_PATH)
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut token = HeaderValue::from_str(&self.access_token)
            .context("BIGCOMMERCE_ACCESS_TOKEN is not a valid header value")?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[derive(Debug, Clone)]
pub struct BigCommerceClient {
    http: reqwest::Client,
    url: String,
}

impl BigCommerceClient {
    pub fn new(config: &BigCommerceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().default_headers(config.headers()?);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .context("failed to build BigCommerce http client")?;

        Ok(Self {
            http,
            url: config.promotions_url(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&BigCommerceConfig::from_settings(settings)?)
    }

    pub fn promotions_url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl PromotionSource for BigCommerceClient {
    fn source_name(&self) -> &'static str {
        "bigcommerce"
    }

    async fn fetch_promotions(&self) -> Result<Vec<RawPromotion>, FetchError> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "promotions request failed");
                FetchError::Transport(err)
            })?;

        let status = res.status();
        if !status.is_success() {
            // Body is best-effort; the status is what matters.
            let body = res.text().await.unwrap_or_default();
            tracing::warn!(http_status = %status, "promotions request rejected upstream");
            return Err(FetchError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let text = res.text().await.map_err(FetchError::Transport)?;
        let parsed =
            serde_json::from_str::<PromotionsResponse>(&text).map_err(FetchError::Parse)?;
        Ok(parsed.data)
    }
}
