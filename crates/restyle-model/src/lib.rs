pub mod color;
pub mod error;
pub mod facts;
pub mod mapping;
pub mod options;
pub mod palette;
pub mod profile;
pub mod report;
pub mod snapshot;
pub mod theme;

pub use error::{RestyleError, Result};
pub use facts::{
    SelectorCategory, SelectorFact, SelectorGroup, SelectorStyles, SvgColorFact, SvgInfo,
    SvgLocation, SvgPaint, SvgPurpose, VariableFact, VariableScope,
};
pub use mapping::{
    AccentRole, AccentUsage, HoverGradient, KindStats, MappingResult, MappingSource,
    SelectorMapping, SvgMapping, VariableMapping,
};
pub use options::{GeneratorOptions, MapperOptions};
pub use palette::{ACCENT_WHEEL, AccentColor, BI_ACCENT_STEP, Flavor, PaletteToken};
pub use profile::{DesignSystem, DesignSystemProfile, ThemeToggle};
pub use report::{IssueSeverity, ValidationIssue, ValidationReport};
pub use snapshot::{AnalysisSnapshot, ColorScheme, DiscoveryCounts};
pub use theme::{CoverageSummary, GeneratedTheme, GeneratorVariant, ThemeMetadata, ThemeSections};
