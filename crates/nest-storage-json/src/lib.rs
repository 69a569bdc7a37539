//! Filesystem JSON persistence for the dragon's progress and the nest book.

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use nest_core::{CoreError, NestStorage, ProgressStore};
use nest_domain::{NestBook, ProgressRecord};
use serde::{de::DeserializeOwned, Serialize};

const PROGRESS_FILE_NAME: &str = "progress.json";
const BOOK_FILE_NAME: &str = "nests.json";
const TMP_SUFFIX: &str = "tmp";

/// Stores `progress.json` and `nests.json` side by side in one directory.
/// Every write goes to a temporary file first and is renamed into place.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    data_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(data_dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn progress_path(&self) -> PathBuf {
        self.data_dir.join(PROGRESS_FILE_NAME)
    }

    pub fn book_path(&self) -> PathBuf {
        self.data_dir.join(BOOK_FILE_NAME)
    }
}

impl ProgressStore for JsonStorage {
    fn load(&self) -> Result<Option<ProgressRecord>, CoreError> {
        let path = self.progress_path();
        if !path.exists() {
            return Ok(None);
        }
        load_json(&path).map(Some)
    }

    fn save(&self, record: &ProgressRecord) -> Result<(), CoreError> {
        save_json(record, &self.progress_path())
    }
}

impl NestStorage for JsonStorage {
    fn load_book(&self) -> Result<NestBook, CoreError> {
        let path = self.book_path();
        if !path.exists() {
            return Ok(NestBook::new());
        }
        load_json(&path)
    }

    fn save_book(&self, book: &NestBook) -> Result<(), CoreError> {
        save_json(book, &self.book_path())
    }
}

/// Serializes `value` to `path`, replacing any previous file atomically.
pub fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<(), CoreError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|err| CoreError::Serde(err.to_string()))?;
    write_atomic(path, &json)?;
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

/// Writes `data` next to `path` under a `.tmp` extension, then renames it
/// over `path`. Readers see either the old file or the new one.
pub fn write_atomic(path: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)
}
