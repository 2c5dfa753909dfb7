use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A product as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct CreateProduct<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Partial update; `None` fields are not sent.
#[derive(Debug, Default, Serialize)]
pub struct UpdateProduct<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

pub struct ProductClient {
    client: Client,
    base_url: String,
}

impl ProductClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a product. The returned record carries the assigned id.
    pub async fn create(&self, name: &str, description: &str) -> Result<Product, ClientError> {
        let resp = self.client
            .post(format!("{}/product", self.base_url))
            .json(&CreateProduct { name, description })
            .send()
            .await?;

        Ok(check(resp).await?.json().await?)
    }

    pub async fn list(&self) -> Result<Vec<Product>, ClientError> {
        let resp = self.client
            .get(format!("{}/products", self.base_url))
            .send()
            .await?;

        Ok(check(resp).await?.json().await?)
    }

    /// Fetch one product; `Ok(None)` if the id is unknown.
    pub async fn get(&self, id: u64) -> Result<Option<Product>, ClientError> {
        let resp = self.client
            .get(format!("{}/product/{}", self.base_url, id))
            .send()
            .await?;

        found(resp).await
    }

    pub async fn update(&self, id: u64, patch: &UpdateProduct<'_>) -> Result<Option<Product>, ClientError> {
        let resp = self.client
            .put(format!("{}/product/{}", self.base_url, id))
            .json(patch)
            .send()
            .await?;

        found(resp).await
    }

    /// Delete a product, returning it as it was before removal.
    pub async fn delete(&self, id: u64) -> Result<Option<Product>, ClientError> {
        let resp = self.client
            .delete(format!("{}/product/{}", self.base_url, id))
            .send()
            .await?;

        found(resp).await
    }
}

async fn check(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ClientError::Status { status, body })
}

async fn found(resp: Response) -> Result<Option<Product>, ClientError> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    Ok(Some(check(resp).await?.json().await?))
}
