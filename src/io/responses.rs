//! Read response sets from JSON / JSONL and write synthetic respondents.
//!
//! Accepted shapes for one response set:
//!
//! - keyed object: `{"1": 4, "2": 7, ...}`
//! - positional array: `[4, 7, ...]` (position `i` answers item `i + 1`)
//! - record: `{"id": "r-01", "responses": <keyed or positional>}`

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::SampleRespondent;
use crate::domain::{ItemId, ResponseSet};
use crate::error::AppError;

// Keys stay strings here: untagged enums buffer their input, and buffered map
// keys cannot be read back as integers.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    Keyed(BTreeMap<String, i32>),
    Positional(Vec<i32>),
}

impl ResponsePayload {
    pub fn into_set(self) -> Result<ResponseSet, AppError> {
        match self {
            ResponsePayload::Keyed(map) => map
                .into_iter()
                .map(|(key, value)| {
                    key.trim()
                        .parse::<ItemId>()
                        .map(|id| (id, value))
                        .map_err(|_| AppError::new(2, format!("Invalid item id {key:?} in responses.")))
                })
                .collect(),
            ResponsePayload::Positional(values) => Ok(ResponseSet::from_positional(&values)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseInput {
    Record { id: Option<String>, responses: ResponsePayload },
    Bare(ResponsePayload),
}

/// One labelled response set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub id: String,
    pub responses: ResponseSet,
}

impl ResponseInput {
    fn into_record(self, fallback_id: impl FnOnce() -> String) -> Result<ResponseRecord, AppError> {
        let (id, payload) = match self {
            ResponseInput::Record { id, responses } => (id.unwrap_or_else(fallback_id), responses),
            ResponseInput::Bare(payload) => (fallback_id(), payload),
        };
        Ok(ResponseRecord {
            id,
            responses: payload.into_set()?,
        })
    }
}

pub fn parse_responses_json(text: &str) -> Result<ResponseSet, AppError> {
    let input: ResponseInput =
        serde_json::from_str(text).map_err(|e| AppError::new(2, format!("Invalid responses JSON: {e}")))?;
    Ok(input.into_record(String::new)?.responses)
}

/// Read a single response set from a JSON file.
pub fn read_responses_json(path: &Path) -> Result<ResponseSet, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::new(2, format!("Failed to read responses '{}': {e}", path.display())))?;
    parse_responses_json(&text)
}

/// Read one response set per non-empty line. Lines without an id get `line-N`.
pub fn read_responses_jsonl(path: &Path) -> Result<Vec<ResponseRecord>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open responses JSONL '{}': {e}", path.display())))?;

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| AppError::new(2, format!("Failed to read line {}: {e}", idx + 1)))?;
        if line.trim().is_empty() {
            continue;
        }
        let input: ResponseInput = serde_json::from_str(&line)
            .map_err(|e| AppError::new(2, format!("Invalid responses JSON on line {}: {e}", idx + 1)))?;
        records.push(input.into_record(|| format!("line-{}", idx + 1))?);
    }

    if records.is_empty() {
        return Err(AppError::new(2, format!("No response sets found in '{}'.", path.display())));
    }
    Ok(records)
}

/// Write synthetic respondents as JSONL records readable by [`read_responses_jsonl`].
pub fn write_respondents_jsonl(path: &Path, respondents: &[SampleRespondent]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    for r in respondents {
        let record = ResponseRecord {
            id: r.id.clone(),
            responses: r.responses.clone(),
        };
        serde_json::to_writer(&mut out, &record)
            .map_err(|e| AppError::new(2, format!("Failed to write respondent {}: {e}", r.id)))?;
        writeln!(out).map_err(|e| AppError::new(2, format!("Failed to write respondent {}: {e}", r.id)))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush '{}': {e}", path.display())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::data::generate_respondents;
    use crate::domain::LikertScale;

    #[test]
    fn accepts_keyed_positional_and_record_shapes() {
        let keyed = parse_responses_json(r#"{"1": 4, "2": 7}"#).unwrap();
        let positional = parse_responses_json("[4, 7]").unwrap();
        let record = parse_responses_json(r#"{"id": "x", "responses": [4, 7]}"#).unwrap();
        assert_eq!(keyed, positional);
        assert_eq!(keyed, record);
        assert!(parse_responses_json(r#"{"a": 1}"#).is_err());
    }

    #[test]
    fn jsonl_round_trip_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.jsonl");
        let sample = generate_respondents(ItemCatalog::default_catalog(), LikertScale::SEVEN_POINT, 3, 9).unwrap();

        write_respondents_jsonl(&path, &sample.respondents).unwrap();
        let records = read_responses_jsonl(&path).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id, "R-0001");
        assert_eq!(records[2].responses, sample.respondents[2].responses);
    }

    #[test]
    fn jsonl_lines_without_ids_are_numbered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.jsonl");
        std::fs::write(&path, "[1, 2]\n\n{\"1\": 3}\n").unwrap();
        let records = read_responses_jsonl(&path).unwrap();
        assert_eq!(records[0].id, "line-1");
        assert_eq!(records[1].id, "line-3");
    }
}
