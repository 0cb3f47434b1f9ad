use std::path::Path;
use tracing::{debug, info};

use crate::classify::DEFAULT_LANGUAGE;

/// Per-file settings for the transform. Built once before the first line and
/// never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    /// Annotation placed right after the opening fence.
    pub language_tag: String,
    /// File name linked from the footer.
    pub display_name: String,
}

impl TransformConfig {
    pub fn new(language_tag: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            language_tag: language_tag.into(),
            display_name: display_name.into(),
        }
    }

    /// Derives the config from a source path: the extension (without the dot)
    /// becomes the language tag, falling back to `default_language`, and the
    /// basename becomes the display name.
    pub fn for_path(path: &Path, default_language: &str) -> Self {
        let language_tag = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .filter(|ext| !ext.is_empty())
            .unwrap_or_else(|| default_language.to_string());
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let config = Self {
            language_tag,
            display_name,
        };
        config.trace_loaded();
        config
    }

    pub fn trace_loaded(&self) {
        info!(
            language_tag = %self.language_tag,
            display_name = %self.display_name,
            "Resolved transform config"
        );
        debug!(?self, "Transform config (full debug)");
    }
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, "")
    }
}
