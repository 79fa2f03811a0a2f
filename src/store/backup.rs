//! On-disk backups of the content store
//!
//! A backup is two files: `{name}.json` with every chunk and its vector,
//! and `{name}-meta.json` describing how the vectors were produced.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::{RagError, Result};
use crate::indexing::Chunk;

/// Chunk together with its embedding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredChunk {
    pub chunk: Chunk,
    pub embedding: Vec<f32>,
}

/// Describes a backup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub name: String,
    pub embedder: String,
    pub dimension: usize,
    pub chunk_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Path of the data file for a backup
pub fn data_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

/// Path of the metadata file for a backup
pub fn metadata_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}-meta.json", name))
}

/// Write both backup files, returns the data file path
pub fn write_backup(
    dir: &Path,
    name: &str,
    embedder: &str,
    chunks: &[StoredChunk],
) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let metadata = BackupMetadata {
        name: name.to_string(),
        embedder: embedder.to_string(),
        dimension: chunks.first().map(|c| c.embedding.len()).unwrap_or(0),
        chunk_count: chunks.len(),
        created_at: Utc::now(),
    };

    let path = data_path(dir, name);
    let mut writer = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut writer, chunks)?;
    writer.flush()?;

    let mut writer = BufWriter::new(File::create(metadata_path(dir, name))?);
    serde_json::to_writer_pretty(&mut writer, &metadata)?;
    writer.flush()?;

    Ok(path)
}

/// Read and validate both backup files
pub fn read_backup(
    dir: &Path,
    name: &str,
    expected_embedder: &str,
) -> Result<(BackupMetadata, Vec<StoredChunk>)> {
    let reader = BufReader::new(File::open(metadata_path(dir, name))?);
    let metadata: BackupMetadata = serde_json::from_reader(reader)?;

    if metadata.embedder != expected_embedder {
        return Err(RagError::BackupMismatch {
            name: name.to_string(),
            expected: expected_embedder.to_string(),
            found: metadata.embedder,
        });
    }

    let reader = BufReader::new(File::open(data_path(dir, name))?);
    let chunks: Vec<StoredChunk> = serde_json::from_reader(reader)?;

    if chunks.len() != metadata.chunk_count {
        return Err(RagError::CorruptBackup {
            name: name.to_string(),
            reason: format!(
                "metadata lists {} chunks, data file holds {}",
                metadata.chunk_count,
                chunks.len()
            ),
        });
    }

    if let Some(bad) = chunks
        .iter()
        .find(|c| c.embedding.len() != metadata.dimension)
    {
        return Err(RagError::CorruptBackup {
            name: name.to_string(),
            reason: format!(
                "chunk {} has {} dimensions, expected {}",
                bad.chunk.key(),
                bad.embedding.len(),
                metadata.dimension
            ),
        });
    }

    Ok((metadata, chunks))
}
