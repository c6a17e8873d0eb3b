//! Gateway environment selection and URL construction.

use error_stack::{report, ResultExt};
use serde::Deserialize;
use url::Url;

use crate::{
    consts,
    errors::{BuildError, CustomResult},
};

/// Which gateway the library talks to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// The live gateway; real money moves.
    Live,
    /// The test gateway.
    Test,
}

impl Environment {
    fn default_base_url(self) -> &'static str {
        match self {
            Self::Live => consts::LIVE_BASE_URL,
            Self::Test => consts::TEST_BASE_URL,
        }
    }
}

#[derive(Debug, Deserialize)]
struct EndpointConfig {
    environment: Environment,
    base_url: Option<String>,
}

/// A resolved gateway endpoint: environment plus base URL.
///
/// Deserializable so integrating applications can keep it in their own
/// configuration; `base_url` may be overridden for sandboxes and defaults
/// to the environment's well-known host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "EndpointConfig")]
pub struct Endpoint {
    environment: Environment,
    base_url: String,
}

impl From<EndpointConfig> for Endpoint {
    fn from(config: EndpointConfig) -> Self {
        let environment = config.environment;
        Self {
            environment,
            base_url: config
                .base_url
                .unwrap_or_else(|| environment.default_base_url().to_string()),
        }
    }
}

impl Endpoint {
    /// An endpoint on the environment's well-known host.
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            base_url: environment.default_base_url().to_string(),
        }
    }

    /// Override the base URL (sandbox or mock gateway).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The selected environment.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Resolve a resource path under the base URL.
    ///
    /// Each segment is appended individually so path parameters are
    /// percent-encoded on their own, never able to smuggle in extra
    /// segments.
    pub fn url_for(&self, segments: &[String]) -> CustomResult<String, BuildError> {
        let mut url = Url::parse(&self.base_url)
            .change_context(BuildError::UrlConstructionFailed)
            .attach_printable_lazy(|| format!("invalid base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|()| report!(BuildError::UrlConstructionFailed))?
            .extend(segments);
        Ok(url.into())
    }
}
