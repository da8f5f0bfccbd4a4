use std::time::{Duration, Instant};

use log::{debug, warn};
use reqwest::StatusCode;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;

use crate::io::store::{StoreError, TextStore};
use crate::model::config::ApiConfig;
use crate::model::text::{TextInput, TextRecord};

/// Text store backed by the remote REST API.
///
/// Endpoints, relative to the base URL:
/// `GET /Texts/GET-ALL`, `POST /Texts`, `PUT /Texts/Edit/{id}`,
/// `DELETE /Texts/{id}`.
#[derive(Debug, Clone)]
pub struct HttpTextStore {
    base_url: String,
    client: Client,
}

impl HttpTextStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let parsed = reqwest::Url::parse(trimmed)
            .map_err(|_| StoreError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Transport {
                op: "client setup",
                message: e.to_string(),
            })?;
        Ok(HttpTextStore {
            base_url: trimmed.to_string(),
            client,
        })
    }

    /// Build a store from the `[api]` config section
    pub fn from_config(api: &ApiConfig) -> Result<Self, StoreError> {
        Self::new(&api.base_url, Duration::from_secs(api.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl TextStore for HttpTextStore {
    fn list_all(&self) -> Result<Vec<TextRecord>, StoreError> {
        let op = "list";
        let started = Instant::now();
        let resp = self
            .client
            .get(self.url("Texts/GET-ALL"))
            .send()
            .map_err(|e| transport(op, e))?;
        let records: Vec<TextRecord> = decode(op, check_status(op, None, resp)?)?;
        debug!(
            "event=store_request op={} status=ok count={} elapsed_ms={}",
            op,
            records.len(),
            started.elapsed().as_millis()
        );
        Ok(records)
    }

    fn create(&self, input: &TextInput) -> Result<TextRecord, StoreError> {
        let op = "create";
        let resp = self
            .client
            .post(self.url("Texts"))
            .json(input)
            .send()
            .map_err(|e| transport(op, e))?;
        let record: TextRecord = decode(op, check_status(op, None, resp)?)?;
        debug!("event=store_request op={} status=ok id={}", op, record.id);
        Ok(record)
    }

    fn update(&self, id: i64, input: &TextInput) -> Result<TextRecord, StoreError> {
        let op = "update";
        let resp = self
            .client
            .put(self.url(&format!("Texts/Edit/{id}")))
            .json(input)
            .send()
            .map_err(|e| transport(op, e))?;
        let record: TextRecord = decode(op, check_status(op, Some(id), resp)?)?;
        debug!("event=store_request op={} status=ok id={}", op, id);
        Ok(record)
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let op = "delete";
        let resp = self
            .client
            .delete(self.url(&format!("Texts/{id}")))
            .send()
            .map_err(|e| transport(op, e))?;
        check_status(op, Some(id), resp)?;
        debug!("event=store_request op={} status=ok id={}", op, id);
        Ok(())
    }
}

fn transport(op: &'static str, err: reqwest::Error) -> StoreError {
    warn!("event=store_request op={} status=error kind=transport", op);
    StoreError::Transport {
        op,
        message: err.to_string(),
    }
}

/// Map non-2xx responses to errors. A 404 on a request about a specific
/// record becomes `NotFound`.
fn check_status(op: &'static str, id: Option<i64>, resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    warn!(
        "event=store_request op={} status=error http_status={}",
        op,
        status.as_u16()
    );
    match id {
        Some(id) if status == StatusCode::NOT_FOUND => Err(StoreError::NotFound(id)),
        _ => Err(StoreError::Status {
            op,
            status: status.as_u16(),
        }),
    }
}

fn decode<T: DeserializeOwned>(op: &'static str, resp: Response) -> Result<T, StoreError> {
    resp.json::<T>().map_err(|e| StoreError::Decode {
        op,
        message: e.to_string(),
    })
}
