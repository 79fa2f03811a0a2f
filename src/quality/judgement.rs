//! Judgement lists: generated questions with the chunk that answers them

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::Result;

/// Columns every judgement list starts with
pub const JUDGEMENT_HEADER: [&str; 4] = ["document", "chunk", "text", "question"];

/// One row of a judgement list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswerRecord {
    #[serde(rename = "document")]
    pub document_id: String,
    #[serde(rename = "chunk")]
    pub chunk_id: usize,
    pub text: String,
    pub question: String,
}

/// Write records as CSV with a header row, creating parent directories
pub fn write_judgement_list(path: &Path, records: &[QuestionAnswerRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    if records.is_empty() {
        writer.write_record(JUDGEMENT_HEADER)?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    debug!(path = %path.display(), records = records.len(), "Wrote judgement list");
    Ok(())
}

/// Read a judgement list, with or without the header row
pub fn read_judgement_list(path: &Path) -> Result<Vec<QuestionAnswerRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut records: Vec<QuestionAnswerRecord> = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row?;
        if index == 0 && is_header(&row) {
            continue;
        }
        // fields are matched by position
        records.push(row.deserialize(None)?);
    }

    debug!(path = %path.display(), records = records.len(), "Read judgement list");
    Ok(records)
}

fn is_header(row: &csv::StringRecord) -> bool {
    row.iter().map(str::trim).eq(JUDGEMENT_HEADER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RagError;

    fn record(document_id: &str, chunk_id: usize, question: &str) -> QuestionAnswerRecord {
        QuestionAnswerRecord {
            document_id: document_id.to_string(),
            chunk_id,
            text: "RAG combines retrieval, and generation.".to_string(),
            question: question.to_string(),
        }
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("judgement.csv");
        let records = vec![
            record("rag-talk", 0, "What does RAG combine?"),
            record("rag-talk", 1, "Who said \"RAG\"?"),
        ];

        write_judgement_list(&path, &records).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("document,chunk,text,question"));

        assert_eq!(read_judgement_list(&path).unwrap(), records);
    }

    #[test]
    fn test_empty_list_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_judgement_list(&path, &[]).unwrap();
        assert!(read_judgement_list(&path).unwrap().is_empty());
    }

    #[test]
    fn test_list_without_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-header.csv");
        fs::write(
            &path,
            "rag-talk,0,\"RAG combines retrieval, and generation.\",What does RAG combine?\n",
        )
        .unwrap();

        assert_eq!(
            read_judgement_list(&path).unwrap(),
            vec![record("rag-talk", 0, "What does RAG combine?")]
        );
    }

    #[test]
    fn test_header_only_skipped_on_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header-twice.csv");
        fs::write(
            &path,
            "document, chunk, text, question\ndocument,chunk,text,question\n",
        )
        .unwrap();

        // a second header row is data, and "chunk" is no chunk id
        assert!(matches!(read_judgement_list(&path), Err(RagError::CsvError(_))));
    }

    #[test]
    fn test_short_row_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.csv");
        fs::write(&path, "rag-talk,0,text\n").unwrap();

        assert!(read_judgement_list(&path).is_err());
    }

    #[test]
    fn test_invalid_chunk_id_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "document,chunk,text,question\nrag-talk,first,text,q\n").unwrap();

        assert!(matches!(read_judgement_list(&path), Err(RagError::CsvError(_))));
    }
}
