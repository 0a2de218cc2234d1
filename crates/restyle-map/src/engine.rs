//! The mapping engine: classifier-or-fallback assignment per fact kind.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use restyle_model::{
    AccentColor, AccentRole, AccentUsage, AnalysisSnapshot, Flavor, KindStats, MapperOptions,
    MappingResult, MappingSource, PaletteToken, SelectorCategory, SelectorFact, SelectorMapping,
    SvgMapping, VariableMapping,
};

use crate::cascade::{AccentCascade, distribute_roles, retint_for_role};
use crate::classifier::{
    ClassifiedFact, Classifier, ClassifyFact, ClassifyRequest, FactKind, FewShotExample,
    validated_token,
};
use crate::heuristic::choose_token;

/// Specificity at which an original rule needs `!important` to be
/// overridden reliably.
const IMPORTANT_SPECIFICITY: u32 = 100;

/// Maps one analysis snapshot onto the target palette.
///
/// Per kind, the engine consults the external classifier when enabled and
/// falls back to the deterministic heuristic for every fact the
/// classifier does not cover. With mapping enabled for a kind, every fact
/// of that kind yields exactly one mapping.
pub struct MapperEngine<'a> {
    options: MapperOptions,
    flavor: Flavor,
    cascade: AccentCascade,
    classifier: Option<&'a dyn Classifier>,
}

impl<'a> MapperEngine<'a> {
    #[must_use]
    pub fn new(options: MapperOptions, flavor: Flavor, accent: AccentColor) -> Self {
        Self {
            options,
            flavor,
            cascade: AccentCascade::new(accent),
            classifier: None,
        }
    }

    /// Attach the external classifier collaborator.
    #[must_use]
    pub fn with_classifier(mut self, classifier: &'a dyn Classifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    #[must_use]
    pub fn cascade(&self) -> &AccentCascade {
        &self.cascade
    }

    /// Produce the full mapping result for a snapshot.
    #[must_use]
    pub fn map(&self, snapshot: &AnalysisSnapshot) -> MappingResult {
        let (variables, variable_stats) = self.map_variables(snapshot);
        let (svgs, svg_stats) = self.map_svgs(snapshot);
        let (selectors, selector_stats, accent_usage) = self.map_selectors(snapshot);
        debug!(
            variables = variable_stats.mapped,
            svgs = svg_stats.mapped,
            selectors = selector_stats.mapped,
            "mapping complete"
        );
        MappingResult {
            variables,
            svgs,
            selectors,
            variable_stats,
            svg_stats,
            selector_stats,
            accent_usage,
        }
    }

    fn map_variables(&self, snapshot: &AnalysisSnapshot) -> (Vec<VariableMapping>, KindStats) {
        let facts: Vec<_> = snapshot
            .variables
            .iter()
            .filter(|fact| fact.computed.is_some())
            .collect();
        let total = facts.len();
        if !self.options.map_variables {
            return (Vec::new(), KindStats { mapped: 0, total });
        }

        let responses = if self.options.classify_variables {
            let request = ClassifyRequest {
                kind: FactKind::Variables,
                context_summary: self.context_summary(snapshot),
                facts: facts
                    .iter()
                    .map(|fact| ClassifyFact {
                        id: format!("var:{}", fact.name),
                        summary: format!(
                            "{} = {} (used by {} selectors)",
                            fact.name,
                            fact.literal,
                            fact.usage.len()
                        ),
                        color: fact.computed.clone(),
                    })
                    .collect(),
                instructions: "Assign each custom property to one palette token.".to_string(),
                few_shot_examples: vec![
                    FewShotExample {
                        input: "--page-bg: #ffffff".to_string(),
                        token: PaletteToken::Base,
                    },
                    FewShotExample {
                        input: "--brand-primary: #3b82f6".to_string(),
                        token: self.cascade.main.token(),
                    },
                ],
            };
            self.call_classifier(&request)
        } else {
            BTreeMap::new()
        };

        let mut mappings = Vec::with_capacity(total);
        for fact in facts {
            let id = format!("var:{}", fact.name);
            let mapping = match responses.get(&id) {
                Some((token, justification)) => VariableMapping {
                    name: fact.name.clone(),
                    token: *token,
                    justification: justification.clone(),
                    source: MappingSource::Classifier,
                },
                None => {
                    let choice = choose_token(
                        fact.computed.as_deref(),
                        &fact.name,
                        snapshot.color_scheme,
                        self.cascade.main,
                        self.flavor,
                    );
                    VariableMapping {
                        name: fact.name.clone(),
                        token: choice.token,
                        justification: choice.justification,
                        source: MappingSource::Heuristic,
                    }
                }
            };
            mappings.push(mapping);
        }
        let mapped = mappings.len();
        (mappings, KindStats { mapped, total })
    }

    fn map_svgs(&self, snapshot: &AnalysisSnapshot) -> (Vec<SvgMapping>, KindStats) {
        let total: usize = snapshot.svgs.iter().map(|svg| svg.colors.len()).sum();
        if !self.options.map_svgs {
            return (Vec::new(), KindStats { mapped: 0, total });
        }

        let responses = if self.options.classify_svgs {
            let request = ClassifyRequest {
                kind: FactKind::Svgs,
                context_summary: self.context_summary(snapshot),
                facts: snapshot
                    .svgs
                    .iter()
                    .enumerate()
                    .flat_map(|(svg_index, svg)| {
                        svg.colors.iter().enumerate().map(move |(color_index, color)| {
                            ClassifyFact {
                                id: format!("svg:{svg_index}:{color_index}"),
                                summary: format!(
                                    "{:?} {} on {}",
                                    svg.purpose,
                                    color.paint.attribute(),
                                    svg.owner.as_deref().unwrap_or("(unknown owner)")
                                ),
                                color: Some(color.color.clone()),
                            }
                        })
                    })
                    .collect(),
                instructions: "Assign each icon paint color to one palette token.".to_string(),
                few_shot_examples: Vec::new(),
            };
            self.call_classifier(&request)
        } else {
            BTreeMap::new()
        };

        let mut mappings = Vec::with_capacity(total);
        for (svg_index, svg) in snapshot.svgs.iter().enumerate() {
            let hint = format!(
                "{} {:?}",
                svg.owner.as_deref().unwrap_or_default(),
                svg.purpose
            );
            for (color_index, color) in svg.colors.iter().enumerate() {
                let id = format!("svg:{svg_index}:{color_index}");
                let mapping = match responses.get(&id) {
                    Some((token, justification)) => SvgMapping {
                        svg_index,
                        paint: color.paint,
                        literal: color.literal.clone(),
                        token: *token,
                        justification: justification.clone(),
                        source: MappingSource::Classifier,
                    },
                    None => {
                        let choice = choose_token(
                            Some(&color.color),
                            &hint,
                            snapshot.color_scheme,
                            self.cascade.main,
                            self.flavor,
                        );
                        SvgMapping {
                            svg_index,
                            paint: color.paint,
                            literal: color.literal.clone(),
                            token: choice.token,
                            justification: choice.justification,
                            source: MappingSource::Heuristic,
                        }
                    }
                };
                mappings.push(mapping);
            }
        }
        let mapped = mappings.len();
        (mappings, KindStats { mapped, total })
    }

    fn map_selectors(
        &self,
        snapshot: &AnalysisSnapshot,
    ) -> (Vec<SelectorMapping>, KindStats, AccentUsage) {
        let mut facts: Vec<&SelectorFact> = snapshot
            .selectors()
            .filter(|fact| !fact.styles.is_empty())
            .collect();
        facts.sort_by(|a, b| {
            b.frequency
                .cmp(&a.frequency)
                .then(a.selector.cmp(&b.selector))
        });
        let total = facts.len();
        if !self.options.map_selectors {
            return (Vec::new(), KindStats { mapped: 0, total }, AccentUsage::default());
        }

        let capped: Vec<&SelectorFact> = match self.options.selector_limit {
            Some(limit) if facts.len() > limit => {
                warn!(
                    total,
                    limit, "selector cap active; lowest-frequency selectors left unmapped"
                );
                facts.into_iter().take(limit).collect()
            }
            _ => facts,
        };

        let responses = if self.options.classify_selectors {
            let request = ClassifyRequest {
                kind: FactKind::Selectors,
                context_summary: self.context_summary(snapshot),
                facts: capped
                    .iter()
                    .map(|fact| ClassifyFact {
                        id: format!("sel:{}", fact.selector),
                        summary: format!(
                            "{} [{}] styles: {:?}",
                            fact.selector,
                            fact.category.as_str(),
                            fact.styles.entries()
                        ),
                        color: fact
                            .styles
                            .background_color
                            .clone()
                            .or_else(|| fact.styles.color.clone()),
                    })
                    .collect(),
                instructions:
                    "Assign each selector's dominant color to one palette token.".to_string(),
                few_shot_examples: Vec::new(),
            };
            self.call_classifier(&request)
        } else {
            BTreeMap::new()
        };

        let mut mappings: Vec<(SelectorMapping, &SelectorFact)> = Vec::new();
        for fact in capped {
            let response = responses.get(&format!("sel:{}", fact.selector));
            mappings.push((self.map_selector(fact, snapshot, response), fact));
        }

        let usage = self.assign_accent_roles(&mut mappings);
        let mapped = mappings.len();
        (
            mappings.into_iter().map(|(mapping, _)| mapping).collect(),
            KindStats { mapped, total },
            usage,
        )
    }

    /// Map one selector's populated properties. A classifier response
    /// covers the dominant property; the rest stay heuristic.
    fn map_selector(
        &self,
        fact: &SelectorFact,
        snapshot: &AnalysisSnapshot,
        response: Option<&(PaletteToken, String)>,
    ) -> SelectorMapping {
        let hint = format!("{} {}", fact.selector, fact.category.as_str());
        let choose = |value: &Option<String>| {
            value.as_ref().map(|hex| {
                choose_token(
                    Some(hex),
                    &hint,
                    snapshot.color_scheme,
                    self.cascade.main,
                    self.flavor,
                )
                .token
            })
        };
        let mut color = choose(&fact.styles.color);
        let mut background_color = choose(&fact.styles.background_color);
        let border_color = choose(&fact.styles.border_color);
        let fill = choose(&fact.styles.fill);
        let stroke = choose(&fact.styles.stroke);

        let (source, justification) = match response {
            Some((token, justification)) => {
                // The classifier speaks for the dominant property.
                if fact.styles.background_color.is_some() {
                    background_color = Some(*token);
                } else if fact.styles.color.is_some() {
                    color = Some(*token);
                }
                (MappingSource::Classifier, justification.clone())
            }
            None => (
                MappingSource::Heuristic,
                format!(
                    "heuristic mapping for {} ({})",
                    fact.selector,
                    fact.category.as_str()
                ),
            ),
        };

        SelectorMapping {
            selector: fact.selector.clone(),
            color,
            background_color,
            border_color,
            fill,
            stroke,
            justification,
            source,
            accent_role: None,
            hover_gradient: None,
            important: fact.specificity >= IMPORTANT_SPECIFICITY || fact.is_interactive,
            original: fact.styles.clone(),
        }
    }

    /// Mark accent-bearing selectors, hand out roles in the 60/20/20
    /// target split, retint their accent tokens, and synthesize hover
    /// gradients for the interactive ones.
    fn assign_accent_roles(
        &self,
        mappings: &mut [(SelectorMapping, &SelectorFact)],
    ) -> AccentUsage {
        let bearing: Vec<usize> = mappings
            .iter()
            .enumerate()
            .filter(|(_, (mapping, fact))| self.is_accent_bearing(mapping, fact))
            .map(|(index, _)| index)
            .collect();
        let roles = distribute_roles(bearing.len());

        let mut usage = AccentUsage::default();
        for (index, role) in bearing.into_iter().zip(roles) {
            let (mapping, fact) = &mut mappings[index];
            mapping.accent_role = Some(role);
            match role {
                AccentRole::Main => usage.main += 1,
                AccentRole::Secondary => usage.secondary += 1,
                AccentRole::Tertiary => usage.tertiary += 1,
            }

            // Badges nested under a non-main context step one level
            // deeper on the wheel.
            let accent = if fact.category == SelectorCategory::Badge && role != AccentRole::Main {
                self.cascade.sub_accent_for_role(role)
            } else {
                self.cascade.accent_for_role(role)
            };
            let nested = AccentCascade::new(accent);
            let retint = |token: Option<PaletteToken>| {
                token.map(|t| retint_for_role(t, AccentRole::Main, &nested))
            };
            mapping.color = retint(mapping.color);
            mapping.background_color = retint(mapping.background_color);
            mapping.border_color = retint(mapping.border_color);
            mapping.fill = retint(mapping.fill);
            mapping.stroke = retint(mapping.stroke);

            if fact.is_interactive {
                mapping.hover_gradient = Some(self.cascade.hover_gradient(role));
            }
        }
        usage
    }

    fn is_accent_bearing(&self, mapping: &SelectorMapping, fact: &SelectorFact) -> bool {
        if mapping.tokens().iter().any(PaletteToken::is_accent) {
            return true;
        }
        fact.styles
            .entries()
            .iter()
            .any(|(_, hex)| self.cascade.matches_triad(hex, self.flavor))
    }

    fn call_classifier(
        &self,
        request: &ClassifyRequest,
    ) -> BTreeMap<String, (PaletteToken, String)> {
        let Some(classifier) = self.classifier else {
            return BTreeMap::new();
        };
        if request.facts.is_empty() {
            return BTreeMap::new();
        }
        match classifier.classify(request) {
            Ok(entries) => index_valid_entries(&entries, request.kind),
            Err(error) => {
                warn!(
                    kind = request.kind.as_str(),
                    %error,
                    "classifier unavailable; using heuristic fallback"
                );
                BTreeMap::new()
            }
        }
    }

    fn context_summary(&self, snapshot: &AnalysisSnapshot) -> String {
        format!(
            "url={} scheme={:?} design_system={} accent={}",
            snapshot.url,
            snapshot.color_scheme,
            snapshot.design_system.system.as_str(),
            self.cascade.main.as_str()
        )
    }
}

/// Keep only entries whose token survives palette validation; invalid
/// entries fall back to the heuristic individually.
fn index_valid_entries(
    entries: &[ClassifiedFact],
    kind: FactKind,
) -> BTreeMap<String, (PaletteToken, String)> {
    let mut indexed = BTreeMap::new();
    for entry in entries {
        match validated_token(entry) {
            Some(token) => {
                indexed.insert(entry.fact_id.clone(), (token, entry.justification.clone()));
            }
            None => {
                warn!(
                    kind = kind.as_str(),
                    fact = %entry.fact_id,
                    token = %entry.palette_token,
                    "classifier returned an invalid token; fact falls back to heuristic"
                );
            }
        }
    }
    indexed
}
