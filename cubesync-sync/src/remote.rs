//! Remote store seam — generic create / update / query over the hosted
//! workspace database.
//!
//! [`RemoteStore`] is the trait boundary the pipeline works against;
//! [`HttpRemote`] is the production implementation over the records API.
//! Tests substitute an in-memory store.

use serde_json::{json, Map, Value};

use cubesync_core::config::RemoteConfig;
use cubesync_core::types::RemoteId;

use crate::error::RemoteError;

/// Records the query endpoint returns per page. This is the remote's
/// pagination cap, unrelated to the mutation batch size.
const QUERY_PAGE_SIZE: u32 = 100;

/// The two synced collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Cases,
    Algorithms,
}

/// One sort criterion for [`RemoteStore::query_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: &'static str,
    pub ascending: bool,
}

impl SortKey {
    pub fn asc(field: &'static str) -> Self {
        Self {
            field,
            ascending: true,
        }
    }
}

/// A record to create: its property map in wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub properties: Map<String, Value>,
}

/// A partial update: only the named properties change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPatch {
    pub remote_id: RemoteId,
    pub properties: Map<String, Value>,
}

/// A record as returned by the query endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRecord {
    pub remote_id: RemoteId,
    pub properties: Map<String, Value>,
}

/// Create / update / query interface over the remote tabular database.
///
/// `Sync` is required so batched apply can dispatch a chunk across scoped
/// threads against one shared store.
pub trait RemoteStore: Sync {
    /// Create one record, returning its assigned remote id.
    fn create(&self, collection: Collection, record: NewRecord) -> Result<RemoteId, RemoteError>;

    /// Patch the named properties of one record.
    fn update(&self, collection: Collection, patch: RecordPatch) -> Result<(), RemoteError>;

    /// Fetch the full collection, paginated internally, in `sorts` order.
    fn query_all(
        &self,
        collection: Collection,
        sorts: &[SortKey],
    ) -> Result<Vec<RemoteRecord>, RemoteError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Blocking HTTP client for the workspace database's records API.
pub struct HttpRemote {
    agent: ureq::Agent,
    base_url: String,
    token: String,
    case_database_id: String,
    alg_database_id: String,
}

impl HttpRemote {
    pub fn new(config: &RemoteConfig, token: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            case_database_id: config.case_database_id.clone(),
            alg_database_id: config.alg_database_id.clone(),
        }
    }

    fn database_id(&self, collection: Collection) -> &str {
        match collection {
            Collection::Cases => &self.case_database_id,
            Collection::Algorithms => &self.alg_database_id,
        }
    }

    fn send(&self, request: ureq::Request, body: Value) -> Result<Value, RemoteError> {
        let request = request.set("Authorization", &format!("Bearer {}", self.token));
        match request.send_json(body) {
            Ok(response) => Ok(response.into_json()?),
            Err(ureq::Error::Status(status, response)) => Err(RemoteError::Api {
                status,
                body: response.into_string().unwrap_or_default(),
            }),
            Err(other) => Err(RemoteError::Transport(Box::new(other))),
        }
    }
}

/// `sorts` request fragment in wire shape.
fn sorts_body(sorts: &[SortKey]) -> Value {
    Value::Array(
        sorts
            .iter()
            .map(|key| {
                json!({
                    "property": key.field,
                    "direction": if key.ascending { "ascending" } else { "descending" },
                })
            })
            .collect(),
    )
}

fn parse_record(value: &Value) -> Result<RemoteRecord, RemoteError> {
    let remote_id = value
        .get("id")
        .and_then(Value::as_str)
        .ok_or(RemoteError::MissingId)?;
    let properties = value
        .get("properties")
        .and_then(Value::as_object)
        .ok_or(RemoteError::MissingField {
            remote_id: remote_id.to_string(),
            field: "properties",
        })?;
    Ok(RemoteRecord {
        remote_id: RemoteId::from(remote_id),
        properties: properties.clone(),
    })
}

impl RemoteStore for HttpRemote {
    fn create(&self, collection: Collection, record: NewRecord) -> Result<RemoteId, RemoteError> {
        let url = format!("{}/records", self.base_url);
        let body = json!({
            "parent": { "database_id": self.database_id(collection) },
            "properties": record.properties,
        });
        let response = self.send(self.agent.post(&url), body)?;
        response
            .get("id")
            .and_then(Value::as_str)
            .map(RemoteId::from)
            .ok_or(RemoteError::MissingId)
    }

    fn update(&self, _collection: Collection, patch: RecordPatch) -> Result<(), RemoteError> {
        // Records are id-addressed; the collection is implied by the id.
        let url = format!("{}/records/{}", self.base_url, patch.remote_id);
        let body = json!({ "properties": patch.properties });
        self.send(self.agent.request("PATCH", &url), body)?;
        Ok(())
    }

    fn query_all(
        &self,
        collection: Collection,
        sorts: &[SortKey],
    ) -> Result<Vec<RemoteRecord>, RemoteError> {
        let url = format!(
            "{}/databases/{}/query",
            self.base_url,
            self.database_id(collection)
        );

        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut body = json!({
                "sorts": sorts_body(sorts),
                "page_size": QUERY_PAGE_SIZE,
            });
            if let Some(cursor) = &cursor {
                body["start_cursor"] = json!(cursor);
            }

            let response = self.send(self.agent.post(&url), body)?;
            for result in response
                .get("results")
                .and_then(Value::as_array)
                .into_iter()
                .flatten()
            {
                records.push(parse_record(result)?);
            }
            tracing::debug!("queried {} records so far", records.len());

            match response.get("next_cursor").and_then(Value::as_str) {
                Some(next) => cursor = Some(next.to_string()),
                None => break,
            }
        }
        Ok(records)
    }
}
