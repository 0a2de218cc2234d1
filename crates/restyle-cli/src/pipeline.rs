//! The programmatic pipeline entrypoint: analyze, map, render, validate.
//!
//! Stages run strictly forward; each consumes the previous stage's
//! immutable output. Extraction gaps and classifier unavailability are
//! absorbed inside their stages. Only validation errors surface, and
//! they arrive as enumerable reports rather than hidden state.

use tracing::info_span;

use restyle_analyze::{PageInput, analyze_page};
use restyle_map::{Classifier, MapperEngine};
use restyle_model::{
    AccentColor, AnalysisSnapshot, Flavor, GeneratedTheme, GeneratorOptions, GeneratorVariant,
    MapperOptions, MappingResult, RestyleError, ValidationReport,
};
use restyle_render::render_theme;
use restyle_validate::{MappingCheck, validate_mapping, validate_theme};

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct PipelineRequest {
    pub url: String,
    pub html: String,
    pub css: String,
    pub branding_colors: Vec<String>,
    pub flavor: Flavor,
    pub accent: AccentColor,
    pub mapper: MapperOptions,
    pub variant: GeneratorVariant,
    pub verbose_comments: bool,
}

/// The full output of one run, validation reports included.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub analysis: AnalysisSnapshot,
    pub mappings: MappingResult,
    pub theme: GeneratedTheme,
    pub mapping_check: MappingCheck,
    pub output_report: ValidationReport,
}

impl PipelineOutcome {
    /// True when neither validator recorded an error. Warnings never
    /// block artifact delivery.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.mapping_check.is_valid() && self.output_report.is_valid()
    }

    /// Strict view: discard the artifact when validation errored.
    pub fn into_result(self) -> Result<Self, RestyleError> {
        let mapping_errors = self.mapping_check.report.error_count();
        if mapping_errors > 0 {
            return Err(RestyleError::InvalidMapping(mapping_errors));
        }
        let output_errors = self.output_report.error_count();
        if output_errors > 0 {
            return Err(RestyleError::InvalidOutput(output_errors));
        }
        Ok(self)
    }
}

/// Run the whole pipeline over one fetched page.
#[must_use]
pub fn run_pipeline(
    request: &PipelineRequest,
    classifier: Option<&dyn Classifier>,
) -> PipelineOutcome {
    let analysis = info_span!("analyze", url = %request.url).in_scope(|| {
        analyze_page(&PageInput {
            url: request.url.clone(),
            html: request.html.clone(),
            css: request.css.clone(),
            branding_colors: request.branding_colors.clone(),
        })
    });

    let mappings = info_span!("map").in_scope(|| {
        let mut engine = MapperEngine::new(request.mapper.clone(), request.flavor, request.accent);
        if let Some(classifier) = classifier {
            engine = engine.with_classifier(classifier);
        }
        engine.map(&analysis)
    });
    let mapping_check = validate_mapping(&mappings);

    let theme = info_span!("render").in_scope(|| {
        let options = GeneratorOptions {
            url: request.url.clone(),
            flavor: request.flavor,
            accent: request.accent,
            variant: request.variant,
            verbose_comments: request.verbose_comments,
        };
        render_theme(&analysis, &mappings, &options)
    });
    let output_report = validate_theme(&theme);

    PipelineOutcome {
        analysis,
        mappings,
        theme,
        mapping_check,
        output_report,
    }
}
