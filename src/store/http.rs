use super::{Collection, DataSource, StoreError};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::time::Duration;

/// REST client for a Firebase-style realtime database.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// `base_url` is the database root, e.g. `https://example.firebaseio.com`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn endpoint(&self, collection: Collection) -> String {
        format!("{}/{}.json", self.base_url, collection.name())
    }
}

#[async_trait]
impl DataSource for HttpStore {
    async fn fetch_collection(&self, collection: Collection) -> Result<Value, StoreError> {
        let url = self.endpoint(collection);
        debug!("GET {}", url);

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
