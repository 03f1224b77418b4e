//! Virtual-number API client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::ProviderError;
use crate::types::{ActiveNumber, ApiEnvelope, CountryListing, PurchasedNumberData, SmsMessage};

/// Default base URL of the virtual-number API.
pub const DEFAULT_API_URL: &str = "https://virtual-number.p.rapidapi.com/api/v1/e-sim";

/// Host identifier the provider authenticates requests against.
pub const API_HOST: &str = "virtual-number.p.rapidapi.com";

/// Service identifier sent with purchase requests.
pub const DEFAULT_SERVICE: &str = "telegram";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the virtual-number provider.
///
/// Every call is a single attempt with a bounded timeout; failures are
/// returned to the caller immediately, there is no retry policy.
#[derive(Clone)]
pub struct VirtualNumberClient {
    client: Client,
    base_url: String,
    host: String,
    api_key: SecretString,
}

impl std::fmt::Debug for VirtualNumberClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualNumberClient")
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl VirtualNumberClient {
    /// Create a client against the production API.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_API_URL, api_key)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();

        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            client,
            base_url,
            host: API_HOST.to_string(),
            api_key: SecretString::from(api_key.into()),
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<ApiEnvelope<T>, ProviderError> {
        let resp = req
            .header("x-rapidapi-host", &self.host)
            .header("x-rapidapi-key", self.api_key.expose_secret())
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!("Provider request failed: HTTP {}", status);
            return Err(ProviderError::Status { status, body });
        }

        Ok(resp.json().await?)
    }

    /// List every country numbers can currently be purchased in.
    pub async fn list_countries(&self) -> Result<Vec<CountryListing>, ProviderError> {
        let url = format!("{}/all-countries", self.base_url);
        debug!("GET {}", url);
        self.send(self.client.get(url)).await?.into_result()
    }

    /// Purchase a number in `country_code` for the given service.
    pub async fn purchase_number(
        &self,
        country_code: &str,
        service: &str,
    ) -> Result<PurchasedNumberData, ProviderError> {
        let url = format!("{}/purchase", self.base_url);
        debug!("POST {} (country: {})", url, country_code);
        let body = json!({
            "country_code": country_code,
            "service": service,
        });
        self.send(self.client.post(url).json(&body))
            .await?
            .into_result()
    }

    /// Fetch the SMS received by a purchased number, in provider order.
    pub async fn fetch_sms(&self, number_id: &str) -> Result<Vec<SmsMessage>, ProviderError> {
        let url = format!("{}/sms/{}", self.base_url, number_id);
        debug!("GET {}", url);
        self.send(self.client.get(url)).await?.into_result()
    }

    /// Provider-side view of currently active numbers.
    pub async fn active_numbers(&self) -> Result<Vec<ActiveNumber>, ProviderError> {
        let url = format!("{}/active-numbers", self.base_url);
        debug!("GET {}", url);
        self.send(self.client.get(url)).await?.into_result()
    }

    /// Release a purchased number.
    pub async fn cancel_number(&self, number_id: &str) -> Result<(), ProviderError> {
        let url = format!("{}/cancel/{}", self.base_url, number_id);
        debug!("DELETE {}", url);
        self.send::<serde_json::Value>(self.client.delete(url))
            .await?
            .ack()
    }
}
