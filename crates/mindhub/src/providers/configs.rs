use std::env;
use std::fmt;

pub const OPENROUTER_HOST: &str = "https://openrouter.ai/api";

#[derive(Clone)]
pub struct OpenRouterProviderConfig {
    pub host: String,
    /// Checked on every request rather than at construction, so a process can
    /// start without a key and fail only when inference is attempted
    pub api_key: Option<String>,
    /// Sent as `HTTP-Referer` for provider-side attribution
    pub app_url: Option<String>,
    /// Sent as `X-Title` for provider-side attribution
    pub app_title: Option<String>,
}

impl OpenRouterProviderConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            host: OPENROUTER_HOST.to_string(),
            api_key: Some(api_key.into()),
            app_url: None,
            app_title: None,
        }
    }

    /// Load configuration from `OPENROUTER_API_KEY` and `OPENROUTER_HOST`
    pub fn from_env() -> Self {
        let api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());
        let host = env::var("OPENROUTER_HOST").unwrap_or_else(|_| OPENROUTER_HOST.to_string());

        Self {
            host,
            api_key,
            app_url: None,
            app_title: None,
        }
    }

    pub fn with_host<S: Into<String>>(mut self, host: S) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_attribution<U: Into<String>, T: Into<String>>(mut self, url: U, title: T) -> Self {
        self.app_url = Some(url.into());
        self.app_title = Some(title.into());
        self
    }
}

impl fmt::Debug for OpenRouterProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterProviderConfig")
            .field("host", &self.host)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("app_url", &self.app_url)
            .field("app_title", &self.app_title)
            .finish()
    }
}
