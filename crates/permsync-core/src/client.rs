//! Frontegg identity REST API client.
//!
//! Uses reqwest to call the vendor auth, permission, and permission-category
//! endpoints. Every operation fetches a fresh vendor token for its
//! environment; tokens are deliberately not cached between calls.

use std::collections::HashMap;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use tracing::debug;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::types::{
    Category, CategoryRef, Credential, NewPermission, Permission, VendorTokenResponse,
};

const VENDOR_AUTH_PATH: &str = "/auth/vendor";
const PERMISSIONS_PATH: &str = "/identity/resources/permissions/v1";
const CATEGORIES_PATH: &str = "/identity/resources/permissions/v1/categories";

/// Frontegg identity REST API client.
///
/// Holds the credentials for every configured environment; each method takes
/// the environment name it should operate on.
#[derive(Debug)]
pub struct FronteggClient {
    http: reqwest::Client,
    base_url: String,
    environments: HashMap<String, Credential>,
}

impl FronteggClient {
    /// Create a new client from loaded settings.
    pub fn new(settings: Settings) -> Result<Self> {
        if settings.base_url.is_empty() {
            return Err(Error::Config("baseUrl is empty".into()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Ensure a TLS crypto provider is installed (reqwest uses rustls-no-provider).
        // The `Err` case just means it was already installed — safe to ignore.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        let base_url = settings.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            environments: settings.environments,
        })
    }

    /// Build the full URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Look up the credential for an environment.
    fn credential(&self, environment: &str) -> Result<&Credential> {
        self.environments.get(environment).ok_or_else(|| {
            Error::Config(format!(
                "no credentials found for environment: {environment}"
            ))
        })
    }

    /// Exchange an environment's credential for a vendor bearer token.
    ///
    /// Single attempt, no retry. Called once per dependent operation, so a
    /// failing identity provider surfaces before any listing call is made.
    pub async fn vendor_token(&self, environment: &str) -> Result<String> {
        let credential = self.credential(environment)?;
        let resp = self
            .http
            .post(self.url(VENDOR_AUTH_PATH))
            .json(credential)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Auth {
                status: status.as_u16(),
                message: status_message(status),
            });
        }
        let body: VendorTokenResponse = resp.json().await?;
        body.token.ok_or_else(|| Error::Auth {
            status: status.as_u16(),
            message: "response body is missing the token field".into(),
        })
    }

    /// List permission categories for an environment.
    ///
    /// Frontegg built-in categories are filtered out and the rest are
    /// narrowed to `{name, id}` — downstream mapping joins on nothing else.
    pub async fn list_categories(&self, environment: &str) -> Result<Vec<CategoryRef>> {
        let token = self.vendor_token(environment).await?;
        let resp = self
            .http
            .get(self.url(CATEGORIES_PATH))
            .bearer_auth(&token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                status: status.as_u16(),
                message: status_message(status),
            });
        }
        let body = resp.text().await?;
        let categories: Vec<Category> = serde_json::from_str(&body).map_err(|e| Error::Fetch {
            status: status.as_u16(),
            message: format!("unexpected categories payload: {e}"),
        })?;
        debug!(environment, count = categories.len(), "Fetched categories");
        Ok(project_categories(categories))
    }

    /// List the full permission set for an environment.
    ///
    /// Unfiltered: built-in and protected permissions are excluded later by
    /// the mapping stage, not here.
    pub async fn list_permissions(&self, environment: &str) -> Result<Vec<Permission>> {
        let token = self.vendor_token(environment).await?;
        let resp = self
            .http
            .get(self.url(PERMISSIONS_PATH))
            .bearer_auth(&token)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Fetch {
                status: status.as_u16(),
                message: status_message(status),
            });
        }
        let body = resp.text().await?;
        let permissions: Vec<Permission> =
            serde_json::from_str(&body).map_err(|e| Error::Fetch {
                status: status.as_u16(),
                message: format!("unexpected permissions payload: {e}"),
            })?;
        debug!(
            environment,
            count = permissions.len(),
            "Fetched permissions"
        );
        Ok(permissions)
    }

    /// Create permissions in an environment with one batched request.
    ///
    /// The batch is atomic from this client's point of view: either the
    /// whole request succeeds or the operation fails with nothing reported
    /// as migrated.
    pub async fn create_permissions(
        &self,
        environment: &str,
        permissions: &[NewPermission],
    ) -> Result<Vec<Permission>> {
        let token = self.vendor_token(environment).await?;
        let resp = self
            .http
            .post(self.url(PERMISSIONS_PATH))
            .bearer_auth(&token)
            .json(&permissions)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Migrate {
                status: status.as_u16(),
                message: status_message(status),
            });
        }
        Ok(resp.json().await?)
    }
}

/// Drop built-in categories and narrow the rest to `{name, id}`.
fn project_categories(categories: Vec<Category>) -> Vec<CategoryRef> {
    categories
        .into_iter()
        .filter(|c| !c.fe_category)
        .map(CategoryRef::from)
        .collect()
}

fn status_message(status: StatusCode) -> String {
    status.canonical_reason().unwrap_or("Unknown").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> Settings {
        let mut environments = HashMap::new();
        environments.insert(
            "dev".to_string(),
            Credential {
                client_id: "dev-client".into(),
                secret: "dev-secret".into(),
            },
        );
        Settings {
            base_url: base_url.to_string(),
            environments,
        }
    }

    #[test]
    fn empty_base_url_returns_config_error() {
        let err = FronteggClient::new(settings("")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn valid_settings_create_client() {
        assert!(FronteggClient::new(settings("https://api.frontegg.com")).is_ok());
    }

    #[test]
    fn trailing_slash_stripped_from_base_url() {
        let client = FronteggClient::new(settings("https://api.frontegg.com/")).unwrap();
        let url = client.url(CATEGORIES_PATH);
        assert_eq!(
            url,
            "https://api.frontegg.com/identity/resources/permissions/v1/categories"
        );
    }

    #[test]
    fn credential_lookup_misses_are_config_errors() {
        let client = FronteggClient::new(settings("https://api.frontegg.com")).unwrap();
        let err = client.credential("staging").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("staging"));
    }

    #[test]
    fn builtin_categories_are_filtered_and_projected() {
        let categories = vec![
            Category {
                id: "fe1".into(),
                name: "Frontegg".into(),
                description: None,
                fe_category: true,
            },
            Category {
                id: "catA".into(),
                name: "Widgets".into(),
                description: Some("Widget management".into()),
                fe_category: false,
            },
        ];
        let refs = project_categories(categories);
        assert_eq!(
            refs,
            vec![CategoryRef {
                id: "catA".into(),
                name: "Widgets".into()
            }]
        );
    }

    #[tokio::test]
    async fn vendor_token_for_unknown_environment_makes_no_request() {
        // An unconfigured environment fails before any network call.
        let client = FronteggClient::new(settings("https://api.frontegg.com")).unwrap();
        let err = client.vendor_token("staging").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
