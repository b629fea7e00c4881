//! JSON file persistence for a whole library

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::{
    config::StorageConfig,
    error::{AppError, AppResult},
    models::library::Library,
};

/// Library document stored in a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    pretty: bool,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: false,
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            path: config.path.clone(),
            pretty: config.pretty,
        }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Overwrite the file with the library document
    pub fn save(&self, library: &Library) -> AppResult<()> {
        write_document(library, &self.path, self.pretty)
    }

    pub fn load(&self) -> AppResult<Library> {
        load(&self.path)
    }
}

/// Write `library` as compact JSON, replacing any existing file
pub fn save(library: &Library, path: impl AsRef<Path>) -> AppResult<()> {
    write_document(library, path.as_ref(), false)
}

/// Read a library back from a JSON file written by [`save`]
pub fn load(path: impl AsRef<Path>) -> AppResult<Library> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AppError::FileNotFound(path.to_path_buf()),
        _ => AppError::Io(e),
    })?;

    let document: Value = serde_json::from_str(&text)?;
    let library = Library::from_mapping(document)?;

    tracing::info!(
        "Loaded {} from {} ({} books, {} members)",
        library.name(),
        path.display(),
        library.book_count(),
        library.member_count()
    );
    Ok(library)
}

fn write_document(library: &Library, path: &Path, pretty: bool) -> AppResult<()> {
    let document = library.to_mapping()?;

    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, &document)?;
    } else {
        serde_json::to_writer(&mut writer, &document)?;
    }
    writer.flush()?;

    tracing::info!("Saved {} to {}", library.name(), path.display());
    Ok(())
}
