//! Espelho local em arquivo JSON-lines

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sono_core::error::StorageError;
use sono_core::traits::RecordStore;

/// Arquivo aberto em modo append; uma linha por registro
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlStore {
    /// Abre (ou cria) o arquivo
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for JsonlStore {
    fn append(&mut self, record: &str) -> Result<(), StorageError> {
        writeln!(self.writer, "{record}")?;
        self.writer.flush()?;
        Ok(())
    }
}
