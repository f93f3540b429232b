//! Read access to the remote document store.
//!
//! The store answers every collection either as a dense JSON array (index is
//! the id, deleted slots are `null`) or as an object keyed by id. Both shapes
//! are normalized into `(id, record)` pairs before decoding. Fetch failures
//! never reach callers: they are logged and replaced by an empty collection.

pub mod http;

use crate::models::{Vote, Voter};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::{error, warn};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub use http::HttpStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Voters,
    Votes,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Voters => "voters",
            Collection::Votes => "votes",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the raw JSON body of a whole collection.
    async fn fetch_collection(&self, collection: Collection) -> Result<Value, StoreError>;
}

/// Flatten either store shape into `(id, record)` pairs, in store order.
///
/// Keyed collections list integer-like keys first in ascending numeric
/// order, then the remaining keys as they appear in the body.
pub fn normalize(body: Value) -> Vec<(String, Value)> {
    match body {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, item)| !item.is_null())
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        Value::Object(entries) => {
            let mut records: Vec<(String, Value)> = entries
                .into_iter()
                .filter(|(_, item)| !item.is_null())
                .collect();
            records.sort_by_key(|(key, _)| match index_key(key) {
                Some(index) => (false, index),
                None => (true, 0),
            });
            records
        }
        other => {
            warn!("Ignoring collection body that is neither array nor object: {}", other);
            Vec::new()
        }
    }
}

/// A key in canonical integer form: no sign, no leading zeros.
fn index_key(key: &str) -> Option<u32> {
    let index = key.parse::<u32>().ok()?;
    (index.to_string() == key && index < u32::MAX).then_some(index)
}

#[derive(Deserialize)]
struct VoterRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    name: String,
}

#[derive(Deserialize)]
struct VoteRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    candidate: String,
    #[serde(default, deserialize_with = "lenient_string")]
    voter_id: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    timestamp: Option<DateTime<Utc>>,
}

pub fn decode_voters(body: Value) -> Vec<Voter> {
    decode(Collection::Voters, body, |id, record: VoterRecord| Voter {
        id,
        name: record.name,
    })
}

pub fn decode_votes(body: Value) -> Vec<Vote> {
    decode(Collection::Votes, body, |id, record: VoteRecord| Vote {
        id,
        candidate: record.candidate,
        voter_id: record.voter_id,
        timestamp: record.timestamp,
    })
}

fn decode<R, T, F>(collection: Collection, body: Value, build: F) -> Vec<T>
where
    R: for<'de> Deserialize<'de>,
    F: Fn(String, R) -> T,
{
    normalize(body)
        .into_iter()
        .filter_map(|(id, item)| match serde_json::from_value::<R>(item) {
            Ok(record) => Some(build(id, record)),
            Err(e) => {
                warn!("Skipping malformed {} record {}: {}", collection, id, e);
                None
            }
        })
        .collect()
}

pub async fn fetch_voters(source: &dyn DataSource) -> Vec<Voter> {
    match source.fetch_collection(Collection::Voters).await {
        Ok(body) => decode_voters(body),
        Err(e) => {
            error!("Error fetching voters: {}", e);
            Vec::new()
        }
    }
}

pub async fn fetch_votes(source: &dyn DataSource) -> Vec<Vote> {
    match source.fetch_collection(Collection::Votes).await {
        Ok(body) => decode_votes(body),
        Err(e) => {
            error!("Error fetching votes: {}", e);
            Vec::new()
        }
    }
}

/// Both collections as read by one poll.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub voters: Vec<Voter>,
    pub votes: Vec<Vote>,
}

impl Snapshot {
    pub async fn load(source: &dyn DataSource) -> Self {
        let (voters, votes) = tokio::join!(fetch_voters(source), fetch_votes(source));
        Self { voters, votes }
    }

    pub async fn load_votes(source: &dyn DataSource) -> Self {
        Self {
            voters: Vec::new(),
            votes: fetch_votes(source).await,
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

/// Epoch milliseconds (number or numeric string) or an ISO-8601 string.
/// Strings without an offset are taken as UTC.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            Utc.timestamp_millis_opt(millis).single()
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(millis) = s.parse::<i64>() {
                return Utc.timestamp_millis_opt(millis).single();
            }
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive))
        }
        _ => None,
    }
}
