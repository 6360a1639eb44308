//! Colaboradores falsos para testes
//!
//! Usados pelos testes dos crates `sono-*` e pelo benchmark de tick.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{SensorError, StorageError};
use crate::traits::{Component, RecordStore, SampleSource};
use crate::types::RawSample;

/// Fonte que entrega amostras roteirizadas em ordem
///
/// Quando o roteiro acaba, repete a última amostra (ou falha, se vazia).
/// Leituras marcadas como falha devolvem `SensorError::ReadFailed`.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Option<RawSample>>,
    last: Option<RawSample>,
    ready: bool,
    reads: u64,
}

impl ScriptedSource {
    pub fn new(samples: impl IntoIterator<Item = RawSample>) -> Self {
        Self {
            script: samples.into_iter().map(Some).collect(),
            last: None,
            ready: true,
            reads: 0,
        }
    }

    /// Fonte cujo hardware não foi encontrado
    pub fn absent() -> Self {
        Self {
            ready: false,
            ..Self::default()
        }
    }

    /// Enfileira uma amostra
    pub fn push(&mut self, sample: RawSample) {
        self.script.push_back(Some(sample));
    }

    /// Enfileira uma leitura falha
    pub fn push_failure(&mut self) {
        self.script.push_back(None);
    }

    /// Número de leituras realizadas
    pub fn reads(&self) -> u64 {
        self.reads
    }
}

impl Component for ScriptedSource {
    fn name(&self) -> &str {
        "ScriptedSource"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

impl SampleSource for ScriptedSource {
    fn read(&mut self) -> Result<RawSample, SensorError> {
        if !self.ready {
            return Err(SensorError::NotInitialized);
        }
        self.reads += 1;

        match self.script.pop_front() {
            Some(Some(sample)) => {
                self.last = Some(sample);
                Ok(sample)
            }
            Some(None) => Err(SensorError::ReadFailed("scripted failure".into())),
            None => self
                .last
                .ok_or_else(|| SensorError::ReadFailed("script exhausted".into())),
        }
    }
}

/// Armazenamento em memória; clones compartilham os registros
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Armazenamento que sempre falha
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Cópia dos registros gravados
    pub fn records(&self) -> Vec<String> {
        self.records.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

impl RecordStore for MemoryStore {
    fn append(&mut self, record: &str) -> Result<(), StorageError> {
        if self.fail {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        self.records
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
            .push(record.to_string());
        Ok(())
    }
}
