//! Mapping validation: closed-token membership and duplicate detection.

use std::collections::BTreeMap;

use serde::Serialize;

use restyle_model::{
    IssueSeverity, MappingResult, PaletteToken, ValidationIssue, ValidationReport,
};

/// Result of validating one [`MappingResult`].
#[derive(Debug, Clone, Serialize)]
pub struct MappingCheck {
    pub report: ValidationReport,
    pub variable_count: usize,
    pub svg_count: usize,
    pub selector_count: usize,
}

impl MappingCheck {
    /// False iff any error-severity issue was recorded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

/// Check every mapping in every kind against the closed palette set and
/// flag duplicate selector mappings. Never mutates its input.
#[must_use]
pub fn validate_mapping(result: &MappingResult) -> MappingCheck {
    let mut issues = Vec::new();

    for mapping in &result.variables {
        check_token(mapping.token, &mapping.name, &mut issues);
    }
    for mapping in &result.svgs {
        let subject = format!("svg #{} {}", mapping.svg_index, mapping.paint.attribute());
        check_token(mapping.token, &subject, &mut issues);
    }
    let mut selector_seen: BTreeMap<&str, u64> = BTreeMap::new();
    for mapping in &result.selectors {
        for token in mapping.tokens() {
            check_token(token, &mapping.selector, &mut issues);
        }
        *selector_seen.entry(mapping.selector.as_str()).or_insert(0) += 1;
    }

    // Later-writer-wins semantics make repeated selectors a latent bug,
    // but not an invalid mapping.
    for (selector, count) in selector_seen {
        if count > 1 {
            issues.push(ValidationIssue {
                code: "SELECTOR_DUPLICATE".to_string(),
                message: format!("selector mapped {count} times: {selector}"),
                severity: IssueSeverity::Warning,
                subject: Some(selector.to_string()),
                count: Some(count),
            });
        }
    }

    MappingCheck {
        report: ValidationReport { issues },
        variable_count: result.variables.len(),
        svg_count: result.svgs.len(),
        selector_count: result.selectors.len(),
    }
}

/// Membership check against the closed vocabulary. The type system makes
/// this unfailable for natively built results; it guards results that
/// crossed a serialization boundary.
fn check_token(token: PaletteToken, subject: &str, issues: &mut Vec<ValidationIssue>) {
    if PaletteToken::parse(token.as_str()).is_none() {
        issues.push(ValidationIssue {
            code: "TOKEN_UNKNOWN".to_string(),
            message: format!("'{}' is not a palette token (at {subject})", token.as_str()),
            severity: IssueSeverity::Error,
            subject: Some(subject.to_string()),
            count: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restyle_model::{
        KindStats, MappingSource, SelectorMapping, SelectorStyles, VariableMapping,
    };

    fn selector_mapping(selector: &str) -> SelectorMapping {
        SelectorMapping {
            selector: selector.to_string(),
            color: Some(PaletteToken::Text),
            background_color: None,
            border_color: None,
            fill: None,
            stroke: None,
            justification: "test".to_string(),
            source: MappingSource::Heuristic,
            accent_role: None,
            hover_gradient: None,
            important: false,
            original: SelectorStyles::default(),
        }
    }

    #[test]
    fn clean_result_is_valid() {
        let result = MappingResult {
            variables: vec![VariableMapping {
                name: "--bg".to_string(),
                token: PaletteToken::Base,
                justification: "background".to_string(),
                source: MappingSource::Heuristic,
            }],
            selectors: vec![selector_mapping(".a"), selector_mapping(".b")],
            selector_stats: KindStats {
                mapped: 2,
                total: 2,
            },
            ..MappingResult::default()
        };
        let check = validate_mapping(&result);
        assert!(check.is_valid());
        assert!(check.report.issues.is_empty());
        assert_eq!(check.selector_count, 2);
    }

    #[test]
    fn duplicate_selectors_warn_without_invalidating() {
        let result = MappingResult {
            selectors: vec![selector_mapping(".dup"), selector_mapping(".dup")],
            ..MappingResult::default()
        };
        let check = validate_mapping(&result);
        assert!(check.is_valid());
        assert_eq!(check.report.warning_count(), 1);
        assert_eq!(
            check.report.issues[0].subject.as_deref(),
            Some(".dup")
        );
    }

    #[test]
    fn validation_is_idempotent() {
        let result = MappingResult {
            selectors: vec![selector_mapping(".dup"), selector_mapping(".dup")],
            ..MappingResult::default()
        };
        let first = validate_mapping(&result);
        let second = validate_mapping(&result);
        assert_eq!(first.report, second.report);
    }
}
