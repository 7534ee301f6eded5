//! Filesystem-backed record repository.
//!
//! # Responsibility
//! - Serve the `filesystem` data source from a directory of JSON documents.
//!
//! # Invariants
//! - One document per record, named `<uuid>.json`.
//! - A document whose stored uuid disagrees with its file name is invalid.
//! - Entries without the `.json` extension are ignored.
//! - A document only appears under its final name once fully written; partial
//!   writes stay in a `.tmp` staging file that `find_all` skips.

use super::{RecordRepository, RepoError, RepoResult};
use crate::model::record::{sort_records, Record, RecordId};
use crate::select::DataSourceKind;
use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

const RECORD_FILE_EXTENSION: &str = "json";
const STAGING_FILE_EXTENSION: &str = "tmp";

/// Directory-of-JSON record repository.
#[derive(Debug, Clone)]
pub struct FilesystemRepository {
    data_dir: PathBuf,
}

impl FilesystemRepository {
    /// Opens the repository rooted at `data_dir`, creating the directory if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> RepoResult<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        debug!(
            "event=fs_open module=repo status=ok data_dir={}",
            data_dir.display()
        );
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn record_path(&self, id: RecordId) -> PathBuf {
        self.data_dir.join(format!("{id}.{RECORD_FILE_EXTENSION}"))
    }

    fn staging_path(&self, id: RecordId) -> PathBuf {
        let name = format!(".{id}.{RECORD_FILE_EXTENSION}.{STAGING_FILE_EXTENSION}");
        self.data_dir.join(name)
    }

    fn read_record(&self, path: &Path, expected: RecordId) -> RepoResult<Record> {
        let reader = BufReader::new(File::open(path)?);
        let record: Record = serde_json::from_reader(reader).map_err(|err| {
            RepoError::InvalidData(format!("unreadable record `{}`: {err}", path.display()))
        })?;

        if record.uuid != expected {
            return Err(RepoError::InvalidData(format!(
                "record `{}` stores mismatched uuid `{}`",
                path.display(),
                record.uuid
            )));
        }
        record.validate()?;
        Ok(record)
    }
}

impl RecordRepository for FilesystemRepository {
    fn kind(&self) -> DataSourceKind {
        DataSourceKind::Filesystem
    }

    fn find_all(&self) -> RepoResult<Vec<Record>> {
        let mut records = Vec::new();

        for entry in fs::read_dir(&self.data_dir)? {
            let path = entry?.path();
            if !path.is_file()
                || path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_FILE_EXTENSION)
            {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or_default();
            let id = Uuid::parse_str(stem).map_err(|_| {
                RepoError::InvalidData(format!(
                    "record file name `{}` is not a uuid",
                    path.display()
                ))
            })?;
            records.push(self.read_record(&path, id)?);
        }

        sort_records(&mut records);
        Ok(records)
    }

    fn find_by_id(&self, id: RecordId) -> RepoResult<Option<Record>> {
        let path = self.record_path(id);
        match self.read_record(&path, id) {
            Ok(record) => Ok(Some(record)),
            Err(RepoError::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn insert(&self, record: &Record) -> RepoResult<RecordId> {
        record.validate()?;

        let path = self.record_path(record.uuid);
        if path.exists() {
            return Err(RepoError::Duplicate(record.uuid));
        }

        let staging = self.staging_path(record.uuid);
        let result = write_document(&staging, record)
            .and_then(|()| publish_document(&staging, &path, record.uuid));
        let _ = fs::remove_file(&staging);

        result.map(|()| record.uuid)
    }
}

fn write_document(path: &Path, record: &Record) -> RepoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

// Hard link instead of rename: never replaces a document inserted concurrently.
fn publish_document(staging: &Path, path: &Path, id: RecordId) -> RepoResult<()> {
    match fs::hard_link(staging, path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => Err(RepoError::Duplicate(id)),
        Err(err) => Err(err.into()),
    }
}
