use crate::config::Config;
use crate::error::{APIError, APIResult};

/// Identity returned by the hosted auth layer for a bearer token.
#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct AuthIdentity {
    pub id: String,
    pub email: String,
}

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AuthClient {
    pub fn new(config: &Config) -> Self {
        AuthClient {
            http: reqwest::Client::new(),
            base_url: config.auth_base_url.trim_end_matches('/').to_string(),
            api_key: config.auth_api_key.clone(),
        }
    }

    /// Exchanges a bearer token for the identity it belongs to. Any rejection
    /// by the auth layer means the credential is invalid or expired.
    pub async fn identity_for_token(&self, token: &str) -> APIResult<AuthIdentity> {
        let response = self.http
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token)
            .send()
            .await
            .map_err(APIError::internal)?;

        if !response.status().is_success() {
            return Err(APIError::unauthenticated("invalid or expired credentials"));
        }

        response.json::<AuthIdentity>()
            .await
            .map_err(APIError::internal)
    }
}
