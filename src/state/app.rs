use std::sync::Arc;
use parking_lot::RwLock;
use crate::config::engine::EngineConfig;
use crate::engine::ProgressionEngine;
use crate::error::ProgressError;
use crate::persistence::{flush, FlushReport, ProgressSink};
use crate::persistence::store::SnapshotStore;

/// Host-side container for one learner session.
/// The engine stays single-writer: every mutation goes through `write`,
/// and no lock is held across an await.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<RwLock<ProgressionEngine>>,
    store: SnapshotStore,
    sink: Option<Arc<dyn ProgressSink>>,
}

impl AppState {
    pub fn new(engine: ProgressionEngine, store: SnapshotStore) -> Self {
        AppState {
            engine: Arc::new(RwLock::new(engine)),
            store,
            sink: None,
        }
    }

    /// Resume the saved session from the store, or start a fresh one
    pub async fn load_or_new(store: SnapshotStore, config: EngineConfig) -> Self {
        let engine = match store.load().await {
            Ok(Some(snapshot)) => ProgressionEngine::from_snapshot(snapshot, config),
            Ok(None) => ProgressionEngine::new(config),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load learner snapshot, starting fresh");
                ProgressionEngine::new(config)
            }
        };
        AppState::new(engine, store)
    }

    pub fn with_sink(mut self, sink: Arc<dyn ProgressSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Read-only access to the engine
    pub fn read<R>(&self, f: impl FnOnce(&ProgressionEngine) -> R) -> R {
        let engine = self.engine.read();
        f(&*engine)
    }

    /// Run one engine operation
    pub fn write<R>(&self, f: impl FnOnce(&mut ProgressionEngine) -> R) -> R {
        let mut engine = self.engine.write();
        f(&mut *engine)
    }

    /// Send queued writes to the sink. Without a sink the outbox is discarded.
    pub async fn flush(&self) -> FlushReport {
        let (events, metrics) = {
            let mut engine = self.engine.write();
            (engine.take_outbox(), engine.metrics().clone())
        };

        match &self.sink {
            Some(sink) => flush(sink.as_ref(), events, &metrics).await,
            None => {
                if !events.is_empty() {
                    tracing::debug!(dropped = events.len(), "No persistence sink configured");
                }
                FlushReport::default()
            }
        }
    }

    /// Write the current snapshot to the store
    pub async fn save_snapshot(&self) -> Result<(), ProgressError> {
        let snapshot = self.read(|engine| engine.snapshot());
        self.store.save(&snapshot).await
    }
}
