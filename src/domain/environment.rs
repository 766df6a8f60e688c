use url::Url;

use crate::domain::validation::ValidationError;

const PRODUCTION_SINGLE_ENDPOINT: &str = "https://messaging-service.co.tz/api/sms/v1/text/single";
const PRODUCTION_BULK_ENDPOINT: &str = "https://messaging-service.co.tz/api/sms/v1/text/multi";
const SANDBOX_SINGLE_ENDPOINT: &str =
    "https://messaging-service.co.tz/api/sms/v1/test/text/single";
const SANDBOX_BULK_ENDPOINT: &str = "https://messaging-service.co.tz/api/sms/v1/test/text/multi";

const SINGLE_PATH: &str = "api/sms/v1/text/single";
const BULK_PATH: &str = "api/sms/v1/text/multi";
const SANDBOX_SINGLE_PATH: &str = "api/sms/v1/test/text/single";
const SANDBOX_BULK_PATH: &str = "api/sms/v1/test/text/multi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Which gateway endpoint set requests go to.
pub enum Environment {
    /// Test endpoints; messages are accepted but not delivered.
    Sandbox,
    /// Live endpoints; messages are delivered and billed.
    #[default]
    Production,
}

impl Environment {
    /// Map a sandbox flag to an environment (`true` is [`Environment::Sandbox`]).
    pub fn from_sandbox(is_active: bool) -> Self {
        if is_active {
            Self::Sandbox
        } else {
            Self::Production
        }
    }

    /// Returns `true` for [`Environment::Sandbox`].
    pub fn is_sandbox(self) -> bool {
        self == Self::Sandbox
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Single-send and bulk-send URLs of one environment.
pub struct Endpoints {
    single: String,
    bulk: String,
}

impl Endpoints {
    /// Create an endpoint pair from two absolute URLs.
    pub fn new(
        single: impl Into<String>,
        bulk: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let single = parse_absolute(single.into())?;
        let bulk = parse_absolute(bulk.into())?;
        Ok(Self {
            single: single.into(),
            bulk: bulk.into(),
        })
    }

    /// Live gateway endpoints on `messaging-service.co.tz`.
    pub fn production() -> Self {
        Self {
            single: PRODUCTION_SINGLE_ENDPOINT.to_owned(),
            bulk: PRODUCTION_BULK_ENDPOINT.to_owned(),
        }
    }

    /// Test gateway endpoints on `messaging-service.co.tz`.
    pub fn sandbox() -> Self {
        Self {
            single: SANDBOX_SINGLE_ENDPOINT.to_owned(),
            bulk: SANDBOX_BULK_ENDPOINT.to_owned(),
        }
    }

    /// URL for single-send requests.
    pub fn single(&self) -> &str {
        &self.single
    }

    /// URL for bulk-send requests.
    pub fn bulk(&self) -> &str {
        &self.bulk
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Both endpoint pairs known to a client.
pub struct EndpointSet {
    pub production: Endpoints,
    pub sandbox: Endpoints,
}

impl EndpointSet {
    /// Re-root the gateway paths onto another base URL (a proxy or a mock server).
    pub fn with_base_url(base_url: &str) -> Result<Self, ValidationError> {
        let mut base = parse_absolute(base_url.to_owned())?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |path: &str| -> Result<String, ValidationError> {
            base.join(path)
                .map(String::from)
                .map_err(|err| ValidationError::InvalidUrl {
                    input: base_url.to_owned(),
                    reason: err.to_string(),
                })
        };

        Ok(Self {
            production: Endpoints {
                single: join(SINGLE_PATH)?,
                bulk: join(BULK_PATH)?,
            },
            sandbox: Endpoints {
                single: join(SANDBOX_SINGLE_PATH)?,
                bulk: join(SANDBOX_BULK_PATH)?,
            },
        })
    }

    /// Endpoint pair used in `environment`.
    pub fn for_environment(&self, environment: Environment) -> &Endpoints {
        match environment {
            Environment::Sandbox => &self.sandbox,
            Environment::Production => &self.production,
        }
    }
}

impl Default for EndpointSet {
    fn default() -> Self {
        Self {
            production: Endpoints::production(),
            sandbox: Endpoints::sandbox(),
        }
    }
}

fn parse_absolute(input: String) -> Result<Url, ValidationError> {
    let url = Url::parse(&input).map_err(|err| ValidationError::InvalidUrl {
        input: input.clone(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl {
            input,
            reason: "expected an absolute http(s) URL".to_owned(),
        });
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_defaults_to_production() {
        assert_eq!(Environment::default(), Environment::Production);
        assert_eq!(Environment::from_sandbox(true), Environment::Sandbox);
        assert!(!Environment::from_sandbox(false).is_sandbox());
    }

    #[test]
    fn default_set_points_at_gateway() {
        let set = EndpointSet::default();
        assert_eq!(
            set.for_environment(Environment::Production).single(),
            "https://messaging-service.co.tz/api/sms/v1/text/single"
        );
        assert_eq!(
            set.for_environment(Environment::Sandbox).bulk(),
            "https://messaging-service.co.tz/api/sms/v1/test/text/multi"
        );
    }

    #[test]
    fn base_url_reroots_all_paths() {
        let set = EndpointSet::with_base_url("http://127.0.0.1:8080/proxy").unwrap();
        assert_eq!(
            set.production.single(),
            "http://127.0.0.1:8080/proxy/api/sms/v1/text/single"
        );
        assert_eq!(
            set.production.bulk(),
            "http://127.0.0.1:8080/proxy/api/sms/v1/text/multi"
        );
        assert_eq!(
            set.sandbox.single(),
            "http://127.0.0.1:8080/proxy/api/sms/v1/test/text/single"
        );
        assert_eq!(
            set.sandbox.bulk(),
            "http://127.0.0.1:8080/proxy/api/sms/v1/test/text/multi"
        );
    }

    #[test]
    fn malformed_urls_are_rejected() {
        assert!(matches!(
            EndpointSet::with_base_url("not a url"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(matches!(
            Endpoints::new("mailto:someone@example.com", "https://example.com/bulk"),
            Err(ValidationError::InvalidUrl { .. })
        ));
        assert!(Endpoints::new("https://example.com/one", "https://example.com/many").is_ok());
    }
}
