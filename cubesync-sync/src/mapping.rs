//! Wire mapping — between domain records and remote property maps.
//!
//! Property field names (`name`, `algset`, `caseid`, `alg`, `rank`, `fave`,
//! `case_relation`, `alg_relation`, `allOrientations`) are the remote
//! database's schema and must not be renamed here.

use serde_json::{json, Map, Value};

use cubesync_core::types::{AlgSnapshot, AlgorithmRecord, CaseName, CaseRecord, CaseSnapshot, RemoteId};

use crate::error::RemoteError;
use crate::reconcile::{FaveUpdate, RankUpdate};
use crate::relations::RelationUpdate;
use crate::remote::{NewRecord, RecordPatch, RemoteRecord};

// ---------------------------------------------------------------------------
// Property constructors
// ---------------------------------------------------------------------------

fn title(text: &str) -> Value {
    json!({ "title": [{ "text": { "content": text } }] })
}

fn rich_text(text: &str) -> Value {
    json!({ "rich_text": [{ "text": { "content": text } }] })
}

fn rich_text_bold(text: &str) -> Value {
    json!({
        "rich_text": [{
            "text": { "content": text },
            "annotations": { "bold": true },
        }]
    })
}

fn select(name: &str) -> Value {
    json!({ "select": { "name": name } })
}

/// Blank strings are not accepted for url properties; map them to null.
fn url(value: &str) -> Value {
    if value.is_empty() {
        json!({ "url": Value::Null })
    } else {
        json!({ "url": value })
    }
}

fn number(value: u32) -> Value {
    json!({ "number": value })
}

fn checkbox(value: bool) -> Value {
    json!({ "checkbox": value })
}

fn relation(ids: &[RemoteId]) -> Value {
    json!({
        "relation": ids.iter().map(|id| json!({ "id": id.0 })).collect::<Vec<_>>()
    })
}

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

/// Create payload for one case record.
///
/// The alg texts, preview image, and color tag live only in the algorithm
/// collection and the dataset; the case record carries the identity,
/// grouping, and media fields.
pub fn case_properties(case: &CaseRecord) -> NewRecord {
    let mut properties = Map::new();
    properties.insert("name".to_string(), title(case.name.as_str()));
    properties.insert("algset".to_string(), select(&case.algset));
    properties.insert("caseid".to_string(), rich_text_bold(&case.case_id));
    properties.insert("catalog".to_string(), rich_text(&case.catalog));
    properties.insert("video".to_string(), url(&case.video));
    properties.insert("orientation".to_string(), select(&case.orientation));
    NewRecord { properties }
}

/// Create payload for one algorithm record, linked to its case.
pub fn algorithm_properties(alg: &AlgorithmRecord) -> NewRecord {
    let mut properties = Map::new();
    properties.insert("alg".to_string(), title(&alg.alg));
    properties.insert("rank".to_string(), number(alg.rank));
    properties.insert("name".to_string(), rich_text(alg.case_name.as_str()));
    properties.insert(
        "case_relation".to_string(),
        relation(std::slice::from_ref(&alg.case_remote_id)),
    );
    NewRecord { properties }
}

pub fn rank_patch(update: &RankUpdate) -> RecordPatch {
    let mut properties = Map::new();
    properties.insert("rank".to_string(), number(update.rank));
    RecordPatch {
        remote_id: update.remote_id.clone(),
        properties,
    }
}

pub fn fave_patch(update: &FaveUpdate) -> RecordPatch {
    let mut properties = Map::new();
    properties.insert("fave".to_string(), checkbox(update.fave));
    RecordPatch {
        remote_id: update.remote_id.clone(),
        properties,
    }
}

/// Patch linking a canonical case to all of its orientation variants.
pub fn orientation_patch(update: &RelationUpdate) -> RecordPatch {
    let mut properties = Map::new();
    properties.insert("allOrientations".to_string(), relation(&update.members));
    RecordPatch {
        remote_id: update.owner.clone(),
        properties,
    }
}

/// Patch linking a case to its algorithms in rank order.
pub fn alg_relation_patch(update: &RelationUpdate) -> RecordPatch {
    let mut properties = Map::new();
    properties.insert("alg_relation".to_string(), relation(&update.members));
    RecordPatch {
        remote_id: update.owner.clone(),
        properties,
    }
}

// ---------------------------------------------------------------------------
// Property readers
// ---------------------------------------------------------------------------

/// Flatten a title or rich-text property to its plain string.
///
/// Query responses carry `plain_text` per segment; records echoed back from
/// a create payload only have `text.content`. Both are accepted.
pub fn plain_text(record: &RemoteRecord, field: &'static str) -> Result<String, RemoteError> {
    let property = record
        .properties
        .get(field)
        .ok_or_else(|| missing(record, field))?;
    let segments = property
        .get("title")
        .or_else(|| property.get("rich_text"))
        .and_then(Value::as_array)
        .ok_or_else(|| missing(record, field))?;
    Ok(segments
        .iter()
        .filter_map(|segment| {
            segment
                .get("plain_text")
                .and_then(Value::as_str)
                .or_else(|| {
                    segment
                        .get("text")
                        .and_then(|text| text.get("content"))
                        .and_then(Value::as_str)
                })
        })
        .collect::<Vec<_>>()
        .join(""))
}

/// Read a number property as a rank.
pub fn number_value(record: &RemoteRecord, field: &'static str) -> Result<u32, RemoteError> {
    record
        .properties
        .get(field)
        .and_then(|property| property.get("number"))
        .and_then(Value::as_f64)
        .map(|value| value as u32)
        .ok_or_else(|| missing(record, field))
}

/// Read a checkbox property; an absent property reads as unchecked, which
/// is the remote schema's default for records created without it.
pub fn checkbox_value(record: &RemoteRecord, field: &str) -> bool {
    record
        .properties
        .get(field)
        .and_then(|property| property.get("checkbox"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn missing(record: &RemoteRecord, field: &'static str) -> RemoteError {
    RemoteError::MissingField {
        remote_id: record.remote_id.0.clone(),
        field,
    }
}

// ---------------------------------------------------------------------------
// Snapshot parsers
// ---------------------------------------------------------------------------

pub fn parse_case_snapshot(record: &RemoteRecord) -> Result<CaseSnapshot, RemoteError> {
    Ok(CaseSnapshot {
        name: CaseName::from(plain_text(record, "name")?),
        remote_id: record.remote_id.clone(),
    })
}

pub fn parse_alg_snapshot(record: &RemoteRecord) -> Result<AlgSnapshot, RemoteError> {
    Ok(AlgSnapshot {
        alg: plain_text(record, "alg")?,
        rank: number_value(record, "rank")?,
        name: CaseName::from(plain_text(record, "name")?),
        fave: checkbox_value(record, "fave"),
        remote_id: record.remote_id.clone(),
    })
}
