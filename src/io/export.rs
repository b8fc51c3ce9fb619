//! Export scoring results to JSON, JSONL and CSV.
//!
//! The CSV export flattens one result per row so it is easy to consume in
//! spreadsheets or downstream scripts. Rejected inputs keep their row with the
//! error message and empty score columns.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::domain::EngineResult;
use crate::error::{AppError, ScoringError};

/// One scored (or rejected) input of a batch.
#[derive(Debug, Clone)]
pub struct BatchRow {
    pub id: String,
    pub outcome: Result<EngineResult, ScoringError>,
}

#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    status: &'static str,
    error: Option<String>,
    fingerprint: Option<&'a str>,
    openness: Option<u8>,
    conscientiousness: Option<u8>,
    extraversion: Option<u8>,
    agreeableness: Option<u8>,
    neuroticism: Option<u8>,
    code: Option<&'a str>,
    ei: Option<u8>,
    sn: Option<u8>,
    tf: Option<u8>,
    jp: Option<u8>,
    boundary_axes: Option<String>,
    primary: Option<u8>,
    prob_top: Option<f64>,
    wing: Option<String>,
    creation: Option<u8>,
    will: Option<u8>,
    expression: Option<u8>,
    harmony: Option<u8>,
    sensitivity: Option<u8>,
    insight: Option<u8>,
    resilience: Option<u8>,
    balance: Option<u8>,
    growth: Option<u8>,
}

impl<'a> CsvRow<'a> {
    fn rejected(id: &'a str, err: &ScoringError) -> Self {
        Self {
            id,
            status: "rejected",
            error: Some(err.to_string()),
            fingerprint: None,
            openness: None,
            conscientiousness: None,
            extraversion: None,
            agreeableness: None,
            neuroticism: None,
            code: None,
            ei: None,
            sn: None,
            tf: None,
            jp: None,
            boundary_axes: None,
            primary: None,
            prob_top: None,
            wing: None,
            creation: None,
            will: None,
            expression: None,
            harmony: None,
            sensitivity: None,
            insight: None,
            resilience: None,
            balance: None,
            growth: None,
        }
    }

    fn scored(id: &'a str, r: &'a EngineResult) -> Self {
        let b = &r.big5.scores;
        let t = &r.typology;
        let i = &r.inner9;
        let boundary: Vec<&str> = t.boundary_axes().into_iter().map(|a| a.display_name()).collect();

        Self {
            id,
            status: if r.fallback { "fallback" } else { "ok" },
            error: None,
            fingerprint: Some(&r.fingerprint),
            openness: Some(b.openness),
            conscientiousness: Some(b.conscientiousness),
            extraversion: Some(b.extraversion),
            agreeableness: Some(b.agreeableness),
            neuroticism: Some(b.neuroticism),
            code: Some(t.code.as_str()),
            ei: Some(t.axis100.ei),
            sn: Some(t.axis100.sn),
            tf: Some(t.axis100.tf),
            jp: Some(t.axis100.jp),
            boundary_axes: Some(boundary.join(" ")),
            primary: Some(r.nine_type.primary.number()),
            prob_top: Some(r.nine_type.prob_top),
            wing: Some(r.nine_type.wing_label()),
            creation: Some(i.creation),
            will: Some(i.will),
            expression: Some(i.expression),
            harmony: Some(i.harmony),
            sensitivity: Some(i.sensitivity),
            insight: Some(i.insight),
            resilience: Some(i.resilience),
            balance: Some(i.balance),
            growth: Some(i.growth),
        }
    }
}

/// Write one CSV row per batch input.
pub fn write_batch_csv(path: &Path, rows: &[BatchRow]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for row in rows {
        let record = match &row.outcome {
            Ok(result) => CsvRow::scored(&row.id, result),
            Err(err) => CsvRow::rejected(&row.id, err),
        };
        writer
            .serialize(record)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

#[derive(Serialize)]
struct JsonlRow<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a EngineResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Write one JSON object per batch input.
pub fn write_batch_jsonl(path: &Path, rows: &[BatchRow]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    for row in rows {
        let record = JsonlRow {
            id: &row.id,
            result: row.outcome.as_ref().ok(),
            error: row.outcome.as_ref().err().map(ToString::to_string),
        };
        serde_json::to_writer(&mut out, &record)
            .map_err(|e| AppError::new(2, format!("Failed to write result {}: {e}", row.id)))?;
        writeln!(out).map_err(|e| AppError::new(2, format!("Failed to write result {}: {e}", row.id)))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush '{}': {e}", path.display())))?;
    Ok(())
}

/// Write a single result as pretty JSON.
pub fn write_result_json(path: &Path, result: &EngineResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, result)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::data::generate_respondents;
    use crate::domain::{LikertScale, ResponseSet};
    use crate::engine::{EngineOptions, run_default, score_batch};

    fn rows() -> Vec<BatchRow> {
        vec![
            BatchRow {
                id: "a".to_string(),
                outcome: run_default(&ResponseSet::from_positional(&[4; 62])),
            },
            BatchRow {
                id: "b".to_string(),
                outcome: run_default(&ResponseSet::from_positional(&[4; 2])),
            },
        ]
    }

    #[test]
    fn csv_has_one_row_per_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_batch_csv(&path, &rows()).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "id");
        assert_eq!(headers.len(), 27);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "ok");
        assert_eq!(&records[0][4], "50");
        assert_eq!(&records[0][9], "ENTJ");
        assert_eq!(&records[1][1], "rejected");
        assert!(records[1][2].contains("expected 62"));
        assert_eq!(&records[1][4], "");
    }

    #[test]
    fn jsonl_and_json_results_parse_back() {
        let dir = tempfile::tempdir().unwrap();
        let jsonl = dir.path().join("out.jsonl");
        write_batch_jsonl(&jsonl, &rows()).unwrap();
        let text = std::fs::read_to_string(&jsonl).unwrap();
        let lines: Vec<serde_json::Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].get("result").is_some());
        assert!(lines[1].get("error").is_some());

        let single = dir.path().join("one.json");
        let result = run_default(&ResponseSet::from_positional(&[6; 62])).unwrap();
        write_result_json(&single, &result).unwrap();
        let back: EngineResult = serde_json::from_str(&std::fs::read_to_string(&single).unwrap()).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn seeded_batch_parses_back_bit_for_bit() {
        #[derive(serde::Deserialize)]
        struct Line {
            id: String,
            result: Option<EngineResult>,
        }

        let catalog = ItemCatalog::default_catalog();
        let sample = generate_respondents(catalog, LikertScale::SEVEN_POINT, 300, 21).unwrap();
        let sets: Vec<ResponseSet> = sample.respondents.iter().map(|r| r.responses.clone()).collect();
        let rows: Vec<BatchRow> = sample
            .respondents
            .iter()
            .zip(score_batch(&sets, catalog, &EngineOptions::default()))
            .map(|(r, outcome)| BatchRow { id: r.id.clone(), outcome })
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.jsonl");
        write_batch_jsonl(&path, &rows).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        let mut checked = 0;
        for (line, row) in text.lines().zip(&rows) {
            let line: Line = serde_json::from_str(line).unwrap();
            assert_eq!(line.id, row.id);
            let expected = row.outcome.as_ref().unwrap();
            assert_eq!(line.result.as_ref(), Some(expected), "{}", row.id);
            checked += 1;
        }
        assert_eq!(checked, 300);
    }
}
