//! Speech-to-text model metadata catalog.
//!
//! Lists the model identifiers the analysis pipeline accepts. Loading is the
//! `ModelLoader` collaborator's job; this catalog only answers "is this a
//! model we know, and what should callers expect from it".

/// Metadata for a supported model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// Model identifier (e.g., "base", "medium")
    pub name: &'static str,
    /// Rough relative speed, higher is faster
    pub speed_rank: u8,
    /// Human-readable accuracy note for UI surfaces
    pub accuracy: &'static str,
}

/// Catalog of supported models.
pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        name: "base",
        speed_rank: 2,
        accuracy: "good for everyday practice sessions",
    },
    ModelInfo {
        name: "medium",
        speed_rank: 1,
        accuracy: "higher accuracy, noticeably slower",
    },
];

/// Find a model by name.
pub fn get_model(name: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.name == name)
}

/// Get all supported models.
pub fn list_models() -> &'static [ModelInfo] {
    MODELS
}

/// Get the default model, a balance of speed and accuracy.
pub fn default_model() -> &'static ModelInfo {
    &MODELS[0]
}

/// Comma-separated model names, for error messages.
pub fn available_names() -> String {
    MODELS
        .iter()
        .map(|m| m.name)
        .collect::<Vec<_>>()
        .join(", ")
}
