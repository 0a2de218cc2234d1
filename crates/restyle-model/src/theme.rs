//! The terminal artifact: a rendered theme document plus metadata.

use serde::{Deserialize, Serialize};

use crate::palette::{AccentColor, Flavor};
use crate::profile::DesignSystem;
use crate::snapshot::ColorScheme;

/// Emission strategy for the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorVariant {
    /// One fixed flavor and accent, resolved to literal palette references.
    Baked,
    /// User-editable flavor/accent variables with mode detection.
    #[default]
    Dynamic,
    /// Dynamic, with per-property accent-vs-fixed logic to avoid
    /// accent-on-accent contrast collisions.
    Refined,
}

impl GeneratorVariant {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorVariant::Baked => "baked",
            GeneratorVariant::Dynamic => "dynamic",
            GeneratorVariant::Refined => "refined",
        }
    }
}

/// Generation metadata recorded in the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeMetadata {
    pub source_url: String,
    /// RFC 3339 generation timestamp.
    pub generated_at: String,
    pub color_scheme: ColorScheme,
    pub design_system: DesignSystem,
    pub flavor: Flavor,
    pub accent: AccentColor,
    pub variant: GeneratorVariant,
    /// Generator version tag, e.g. `restyle/0.1.0`.
    pub generator: String,
}

/// The document text broken into its named sections, for inspection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeSections {
    pub variables: String,
    pub svgs: String,
    pub selectors: String,
    pub gradients: String,
    pub fallbacks: String,
}

/// Coverage percentage per fact kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub variables_pct: f64,
    pub svgs_pct: f64,
    pub selectors_pct: f64,
}

/// A generated theme document. Produced once; read-only thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTheme {
    /// The full rendered stylesheet text.
    pub text: String,
    pub metadata: ThemeMetadata,
    pub sections: ThemeSections,
    pub coverage: CoverageSummary,
}
