use crate::core::error::BankbotError;
use reqwest::{Client, Response};
use serde::Serialize;

/// Thin reqwest wrapper shared by completion providers: one endpoint, one
/// bearer token, JSON in and out.
pub struct HttpClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpClient {
    pub fn new(endpoint: String, api_key: String) -> Result<Self, BankbotError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// POST a JSON payload and return the response, mapping non-2xx statuses
    /// to an API error carrying the response body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Response, BankbotError> {
        let url = format!("{}/{}", self.endpoint, path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BankbotError::Api(format!("{}: {}", status, body.trim())));
        }

        Ok(response)
    }
}
