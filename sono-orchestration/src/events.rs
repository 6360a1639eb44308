//! Barramento de eventos de saída
//!
//! O controlador publica cada [`OutboundEvent`] aqui; o transporte (stdout,
//! socket, testes) se inscreve com um filtro.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sono_core::event::{EventKind, OutboundEvent};

use crate::error::OrchestrationResult;

/// Handler de eventos (callback)
pub type EventHandler = Arc<dyn Fn(&OutboundEvent) + Send + Sync>;

/// Filtro de eventos
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventFilter {
    /// Todos os eventos
    All,
    /// Eventos de um tipo
    Kind(EventKind),
    /// Eventos emitidos durante uma sessão de rastreamento
    Tracking,
    /// Eventos de uma sessão específica
    Session(String),
}

impl EventFilter {
    /// Verifica se um evento passa pelo filtro
    pub fn matches(&self, event: &OutboundEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Kind(kind) => event.kind() == *kind,
            EventFilter::Tracking => event.session.is_some(),
            EventFilter::Session(id) => event
                .session
                .as_ref()
                .is_some_and(|tag| &tag.session_id == id),
        }
    }
}

/// Bus de eventos
#[derive(Clone)]
pub struct EventBus {
    /// Handlers registrados por filtro
    handlers: Arc<Mutex<HashMap<EventFilter, Vec<EventHandler>>>>,
    /// Histórico de eventos (limitado)
    history: Arc<Mutex<Vec<OutboundEvent>>>,
    /// Tamanho máximo do histórico
    max_history: usize,
}

impl EventBus {
    /// Cria novo bus de eventos
    pub fn new() -> Self {
        Self::with_history(256)
    }

    /// Cria com tamanho de histórico customizado
    pub fn with_history(max_history: usize) -> Self {
        Self {
            handlers: Arc::new(Mutex::new(HashMap::new())),
            history: Arc::new(Mutex::new(Vec::new())),
            max_history,
        }
    }

    /// Registra handler para um filtro
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> OrchestrationResult<()>
    where
        F: Fn(&OutboundEvent) + Send + Sync + 'static,
    {
        let mut handlers = self.handlers.lock()?;
        handlers.entry(filter).or_default().push(Arc::new(handler));
        Ok(())
    }

    /// Emite um evento
    pub fn emit(&self, event: OutboundEvent) -> OrchestrationResult<()> {
        {
            let mut history = self.history.lock()?;
            history.push(event.clone());

            if history.len() > self.max_history {
                history.remove(0);
            }
        }

        // Handlers são copiados para não segurar o lock durante os callbacks
        let matching: Vec<EventHandler> = {
            let handlers = self.handlers.lock()?;
            handlers
                .iter()
                .filter(|(filter, _)| filter.matches(&event))
                .flat_map(|(_, list)| list.iter().cloned())
                .collect()
        };
        for handler in matching {
            handler(&event);
        }

        Ok(())
    }

    /// Retorna histórico de eventos
    pub fn history(&self) -> OrchestrationResult<Vec<OutboundEvent>> {
        let history = self.history.lock()?;
        Ok(history.clone())
    }

    /// Histórico filtrado por tipo
    pub fn history_of(&self, kind: EventKind) -> OrchestrationResult<Vec<OutboundEvent>> {
        let history = self.history.lock()?;
        Ok(history.iter().filter(|e| e.kind() == kind).cloned().collect())
    }

    /// Limpa histórico
    pub fn clear_history(&self) -> OrchestrationResult<()> {
        let mut history = self.history.lock()?;
        history.clear();
        Ok(())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("max_history", &self.max_history)
            .field("history_len", &self.history.lock().map(|h| h.len()).unwrap_or(0))
            .finish()
    }
}
