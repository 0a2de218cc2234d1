//! Design-system fingerprint produced by the detector stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Known CSS-framework conventions the detector can fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignSystem {
    Material,
    Bootstrap,
    Tailwind,
    Antd,
    Chakra,
    /// No known framework matched; a dominant custom prefix was found.
    Custom,
    Unknown,
}

impl DesignSystem {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DesignSystem::Material => "material",
            DesignSystem::Bootstrap => "bootstrap",
            DesignSystem::Tailwind => "tailwind",
            DesignSystem::Antd => "antd",
            DesignSystem::Chakra => "chakra",
            DesignSystem::Custom => "custom",
            DesignSystem::Unknown => "unknown",
        }
    }
}

/// Mechanism the page uses to switch between light and dark mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeToggle {
    /// A class toggled on a root element, e.g. `.dark`.
    Class { name: String },
    /// An attribute/value pair, e.g. `data-theme="dark"`.
    Attribute { name: String, value: String },
}

/// Page-level classification of the authoring framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSystemProfile {
    pub system: DesignSystem,
    /// Confidence in [0, 1].
    pub confidence: f64,
    /// Custom-property name prefixes observed for this system.
    pub prefixes: Vec<String>,
    /// Token-name to resolved-color map gathered during detection.
    pub tokens: BTreeMap<String, String>,
    pub theme_toggle: Option<ThemeToggle>,
}

impl DesignSystemProfile {
    /// The profile for a page with no usable signals.
    #[must_use]
    pub fn unknown() -> Self {
        Self {
            system: DesignSystem::Unknown,
            confidence: 0.0,
            prefixes: Vec::new(),
            tokens: BTreeMap::new(),
            theme_toggle: None,
        }
    }
}
