//! Transcription service with an explicit model registry.
//!
//! The registry maps model identifiers to loaded transcriber handles and
//! loads each model at most once, on first use. It is an ordinary value the
//! orchestrator owns and passes around; there is no process-wide singleton.

use crate::asr::catalog;
use crate::asr::transcriber::Transcriber;
use crate::error::{Result, SpeakscopeError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Loads a transcriber for a model identifier.
///
/// Implementations wrap whatever engine actually backs the model (an
/// in-process inference library, a subprocess, a remote call). Loading is
/// expected to be expensive; the service caches the result.
pub trait ModelLoader: Send + Sync {
    fn load(&self, model_id: &str) -> Result<Arc<dyn Transcriber>>;
}

impl<F> ModelLoader for F
where
    F: Fn(&str) -> Result<Arc<dyn Transcriber>> + Send + Sync,
{
    fn load(&self, model_id: &str) -> Result<Arc<dyn Transcriber>> {
        self(model_id)
    }
}

/// Manages loaded transcription models, one handle per model identifier.
pub struct TranscriptionService {
    loader: Box<dyn ModelLoader>,
    models: Mutex<HashMap<String, Arc<dyn Transcriber>>>,
}

impl TranscriptionService {
    /// Create a service backed by the given loader. No models are loaded yet.
    pub fn new(loader: impl ModelLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            models: Mutex::new(HashMap::new()),
        }
    }

    /// Return the transcriber for `model_id`, loading it on first use.
    ///
    /// Identifiers not present in the catalog are rejected before the loader
    /// is consulted.
    pub fn ensure_loaded(&self, model_id: &str) -> Result<Arc<dyn Transcriber>> {
        if catalog::get_model(model_id).is_none() {
            return Err(SpeakscopeError::UnknownModel {
                model: model_id.to_string(),
                available: catalog::available_names(),
            });
        }

        let mut models = self
            .models
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(handle) = models.get(model_id) {
            return Ok(handle.clone());
        }

        let handle = self.loader.load(model_id)?;
        models.insert(model_id.to_string(), handle.clone());
        Ok(handle)
    }

    /// Names of the models currently resident in the registry.
    pub fn loaded_models(&self) -> Vec<String> {
        let models = self
            .models
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut names: Vec<String> = models.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}
