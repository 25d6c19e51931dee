//! reqwest-backed `PathApi`

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{
    PairValidation, PathApi, SuggestResponse, ValidatePairRequest, ValidateRequest,
    ValidationResult,
};
use crate::config::ApiConfig;
use crate::error::ApiError;

const SUGGEST_ENDPOINT: &str = "/api/paths/suggest";
const VALIDATE_ENDPOINT: &str = "/api/paths/validate";
const VALIDATE_PAIR_ENDPOINT: &str = "/api/paths/validate-pair";

/// HTTP client for the path endpoints of the review server
#[derive(Debug, Clone)]
pub struct HttpPathApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPathApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Map non-2xx to `ApiError::Api` carrying the body, then decode JSON
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::Api {
                code: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl PathApi for HttpPathApi {
    async fn suggest(&self, partial: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .client
            .get(self.url(SUGGEST_ENDPOINT))
            .query(&[("partial", partial)])
            .send()
            .await?;

        let body: SuggestResponse = Self::decode(response).await?;
        Ok(body.suggestions)
    }

    async fn validate(&self, path: &str) -> Result<ValidationResult, ApiError> {
        let response = self
            .client
            .post(self.url(VALIDATE_ENDPOINT))
            .json(&ValidateRequest { path })
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn validate_pair(
        &self,
        backup_path: &str,
        sorted_path: &str,
    ) -> Result<PairValidation, ApiError> {
        let response = self
            .client
            .post(self.url(VALIDATE_PAIR_ENDPOINT))
            .json(&ValidatePairRequest {
                backup_path,
                sorted_path,
            })
            .send()
            .await?;

        Self::decode(response).await
    }
}
