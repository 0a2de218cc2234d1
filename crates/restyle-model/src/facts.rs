//! Extracted color evidence: variables, SVG paints, and selector styles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Where a custom property was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    /// Declared on `:root` or `html`.
    Root,
    /// Declared inside a class selector.
    Class,
    /// Declared on any other selector or an inline `style` attribute.
    Element,
}

/// A custom-property declaration and its observed usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableFact {
    /// Property name including the leading `--`.
    pub name: String,
    /// Literal declared value, untouched.
    pub literal: String,
    /// Canonical `#RRGGBB` when the literal resolves to a concrete color.
    pub computed: Option<String>,
    pub scope: VariableScope,
    /// Selectors whose declarations reference this variable.
    pub usage: BTreeSet<String>,
    /// Number of `var()` references observed across CSS and markup.
    pub frequency: usize,
}

/// Which paint attribute an SVG color was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SvgPaint {
    Fill,
    Stroke,
    StopColor,
}

impl SvgPaint {
    #[must_use]
    pub fn attribute(&self) -> &'static str {
        match self {
            SvgPaint::Fill => "fill",
            SvgPaint::Stroke => "stroke",
            SvgPaint::StopColor => "stop-color",
        }
    }
}

/// A single color use inside one SVG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgColorFact {
    pub paint: SvgPaint,
    /// Canonical `#RRGGBB` value.
    pub color: String,
    /// The literal as it appeared in the markup, for substitution.
    pub literal: String,
}

/// How the SVG reached the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgLocation {
    /// An `<svg>` element embedded in the HTML.
    Inline,
    /// A `data:image/svg+xml` payload in a CSS background.
    Background,
}

/// Guessed role of an icon, from its owning selector's naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgPurpose {
    Logo,
    Icon,
    Nav,
    Social,
    Arrow,
    Other,
}

/// One discovered SVG with its extracted paint colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SvgInfo {
    pub location: SvgLocation,
    /// Best guess at the selector that owns this SVG.
    pub owner: Option<String>,
    pub purpose: SvgPurpose,
    /// The raw markup (decoded for background payloads).
    pub markup: String,
    pub colors: Vec<SvgColorFact>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Semantic category assigned to a selector.
///
/// Members form a closed set; assignment follows a fixed keyword precedence
/// (see the discovery engine), so the same selector always lands in the
/// same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorCategory {
    Button,
    Link,
    Card,
    Input,
    Navigation,
    Header,
    Footer,
    Sidebar,
    Modal,
    Alert,
    Badge,
    Tab,
    Switch,
    Dropdown,
    Code,
    Table,
    Icon,
    Text,
    Background,
    Border,
    Other,
}

impl SelectorCategory {
    pub const ALL: [SelectorCategory; 21] = [
        SelectorCategory::Button,
        SelectorCategory::Link,
        SelectorCategory::Card,
        SelectorCategory::Input,
        SelectorCategory::Navigation,
        SelectorCategory::Header,
        SelectorCategory::Footer,
        SelectorCategory::Sidebar,
        SelectorCategory::Modal,
        SelectorCategory::Alert,
        SelectorCategory::Badge,
        SelectorCategory::Tab,
        SelectorCategory::Switch,
        SelectorCategory::Dropdown,
        SelectorCategory::Code,
        SelectorCategory::Table,
        SelectorCategory::Icon,
        SelectorCategory::Text,
        SelectorCategory::Background,
        SelectorCategory::Border,
        SelectorCategory::Other,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorCategory::Button => "button",
            SelectorCategory::Link => "link",
            SelectorCategory::Card => "card",
            SelectorCategory::Input => "input",
            SelectorCategory::Navigation => "navigation",
            SelectorCategory::Header => "header",
            SelectorCategory::Footer => "footer",
            SelectorCategory::Sidebar => "sidebar",
            SelectorCategory::Modal => "modal",
            SelectorCategory::Alert => "alert",
            SelectorCategory::Badge => "badge",
            SelectorCategory::Tab => "tab",
            SelectorCategory::Switch => "switch",
            SelectorCategory::Dropdown => "dropdown",
            SelectorCategory::Code => "code",
            SelectorCategory::Table => "table",
            SelectorCategory::Icon => "icon",
            SelectorCategory::Text => "text",
            SelectorCategory::Background => "background",
            SelectorCategory::Border => "border",
            SelectorCategory::Other => "other",
        }
    }
}

/// The five color-bearing properties tracked per selector.
///
/// A closed record rather than an open map: the valid property set is
/// small and fixed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectorStyles {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub border_color: Option<String>,
    pub fill: Option<String>,
    pub stroke: Option<String>,
}

impl SelectorStyles {
    /// True when none of the five properties carry a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.color.is_none()
            && self.background_color.is_none()
            && self.border_color.is_none()
            && self.fill.is_none()
            && self.stroke.is_none()
    }

    /// Populated `(css-property, value)` pairs in emission order.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries = Vec::new();
        if let Some(value) = &self.color {
            entries.push(("color", value.as_str()));
        }
        if let Some(value) = &self.background_color {
            entries.push(("background-color", value.as_str()));
        }
        if let Some(value) = &self.border_color {
            entries.push(("border-color", value.as_str()));
        }
        if let Some(value) = &self.fill {
            entries.push(("fill", value.as_str()));
        }
        if let Some(value) = &self.stroke {
            entries.push(("stroke", value.as_str()));
        }
        entries
    }

    /// Merge another occurrence of the same selector; earlier values win.
    pub fn merge(&mut self, other: &SelectorStyles) {
        if self.color.is_none() {
            self.color = other.color.clone();
        }
        if self.background_color.is_none() {
            self.background_color = other.background_color.clone();
        }
        if self.border_color.is_none() {
            self.border_color = other.border_color.clone();
        }
        if self.fill.is_none() {
            self.fill = other.fill.clone();
        }
        if self.stroke.is_none() {
            self.stroke = other.stroke.clone();
        }
    }
}

/// A discovered selector with its current color styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorFact {
    pub selector: String,
    pub specificity: u32,
    pub category: SelectorCategory,
    /// Max of CSS occurrence count and the DOM occurrence estimate.
    pub frequency: usize,
    pub is_interactive: bool,
    pub has_visible_background: bool,
    pub has_border: bool,
    pub is_text_only: bool,
    /// The selector's rule block contains a gradient or image background.
    pub has_gradient_background: bool,
    pub styles: SelectorStyles,
}

/// Selectors grouped under one semantic category, sorted by descending
/// frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorGroup {
    pub category: SelectorCategory,
    pub selectors: Vec<SelectorFact>,
}
