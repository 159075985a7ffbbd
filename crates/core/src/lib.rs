pub mod domain;
pub mod selection;
pub mod time;
pub mod upstream;

pub mod config {
    use anyhow::Context;

    pub const DEFAULT_API_VERSION: &str = "v3";
    pub const DEFAULT_API_HOST: &str = "https://api.bigcommerce.com";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub store_hash: Option<String>,
        pub access_token: Option<String>,
        pub api_version: String,
        pub api_host: String,
        pub timeout_secs: Option<u64>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from an arbitrary key lookup. Blank values count as unset.
        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let get = |key: &str| {
                lookup(key)
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
            };

            let timeout_secs = get("BIGCOMMERCE_TIMEOUT_SECS")
                .map(|s| {
                    s.parse::<u64>()
                        .with_context(|| format!("BIGCOMMERCE_TIMEOUT_SECS is not a number: {s}"))
                })
                .transpose()?;

            Ok(Self {
                store_hash: get("BIGCOMMERCE_STORE_HASH"),
                access_token: get("BIGCOMMERCE_ACCESS_TOKEN"),
                api_version: get("BIGCOMMERCE_API_VERSION")
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                api_host: get("BIGCOMMERCE_API_HOST")
                    .unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
                timeout_secs,
                sentry_dsn: get("SENTRY_DSN"),
            })
        }

        pub fn require_store_hash(&self) -> anyhow::Result<&str> {
            self.store_hash
                .as_deref()
                .context("BIGCOMMERCE_STORE_HASH is required")
        }

        pub fn require_access_token(&self) -> anyhow::Result<&str> {
            self.access_token
                .as_deref()
                .context("BIGCOMMERCE_ACCESS_TOKEN is required")
        }
    }

}
