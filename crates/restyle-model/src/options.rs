//! Feature toggles for the mapper and generator stages.

use serde::{Deserialize, Serialize};

use crate::palette::{AccentColor, Flavor};
use crate::theme::GeneratorVariant;

/// Per-kind mapper toggles and limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapperOptions {
    pub map_variables: bool,
    pub map_svgs: bool,
    pub map_selectors: bool,
    /// Consult the external classifier for each kind. The heuristic
    /// fallback still applies when the call fails.
    pub classify_variables: bool,
    pub classify_svgs: bool,
    pub classify_selectors: bool,
    /// Highest-frequency selectors beyond this count are left unmapped.
    pub selector_limit: Option<usize>,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            map_variables: true,
            map_svgs: true,
            map_selectors: true,
            classify_variables: true,
            classify_svgs: true,
            classify_selectors: true,
            selector_limit: None,
        }
    }
}

impl MapperOptions {
    /// All kinds mapped, classifier never consulted.
    #[must_use]
    pub fn heuristic_only() -> Self {
        Self {
            classify_variables: false,
            classify_svgs: false,
            classify_selectors: false,
            ..Self::default()
        }
    }
}

/// Generator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Target page URL; only the sanitized host is emitted.
    pub url: String,
    pub flavor: Flavor,
    pub accent: AccentColor,
    pub variant: GeneratorVariant,
    /// Emit per-rule provenance comments.
    pub verbose_comments: bool,
}

impl GeneratorOptions {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            flavor: Flavor::Mocha,
            accent: AccentColor::Blue,
            variant: GeneratorVariant::default(),
            verbose_comments: false,
        }
    }
}
