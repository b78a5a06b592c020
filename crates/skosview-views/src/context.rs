//! Per-execution context handed to translators and executors.

use std::sync::Arc;

use skosview_core::defaults::INTERFACE_LANGUAGE;
use skosview_core::{MessageLog, Messenger};

/// What a query needs from its surroundings: the active interface language
/// (for the language sentinel) and a place to post user-visible messages.
#[derive(Clone)]
pub struct ExecutionContext {
    pub interface_language: String,
    pub messenger: Arc<dyn Messenger>,
}

impl ExecutionContext {
    pub fn new(interface_language: impl Into<String>, messenger: Arc<dyn Messenger>) -> Self {
        Self {
            interface_language: interface_language.into(),
            messenger,
        }
    }

    /// Context with its own message log, returned alongside for inspection.
    pub fn with_log(interface_language: impl Into<String>) -> (Self, Arc<MessageLog>) {
        let log = Arc::new(MessageLog::new());
        (Self::new(interface_language, log.clone()), log)
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new(INTERFACE_LANGUAGE, Arc::new(MessageLog::new()))
    }
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("interface_language", &self.interface_language)
            .finish_non_exhaustive()
    }
}
