use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{RegistrationRequest, RegistrationResponse, REGISTER_PATH};
use tracing::{debug, warn};
use url::Url;

use crate::error::ApiCallError;

/// Backend registration endpoint as seen by the form controller.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// Sends one registration request. A 2xx reply is returned as-is, including
    /// `success: false`; any other status becomes [`ApiCallError::Rejected`].
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, ApiCallError>;
}

pub struct HttpRegistrationApi {
    http: Client,
    endpoint: Url,
}

impl HttpRegistrationApi {
    pub fn new(base_url: &str) -> Result<Self, ApiCallError> {
        Self::with_client(Client::new(), base_url)
    }

    /// The endpoint path is appended to whatever path `base_url` already carries.
    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ApiCallError> {
        let endpoint = Url::parse(base_url)
            .and_then(|mut base| {
                if !base.path().ends_with('/') {
                    let dir = format!("{}/", base.path());
                    base.set_path(&dir);
                }
                base.join(REGISTER_PATH.trim_start_matches('/'))
            })
            .map_err(|source| ApiCallError::InvalidEndpoint {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RegistrationApi for HttpRegistrationApi {
    async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<RegistrationResponse, ApiCallError> {
        debug!(endpoint = %self.endpoint, role = %request.role, "posting registration");
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<RegistrationResponse>().await?);
        }

        // Error bodies are optional; only their `message` is of interest.
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<RegistrationResponse>(&body)
                .ok()
                .and_then(|body| body.message),
            Err(err) => {
                warn!("failed to read registration error body: {err}");
                None
            }
        };
        Err(ApiCallError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
