//! The external color-classification collaborator, reduced to a trait.
//!
//! A classifier receives a structured prompt payload and returns one
//! token assignment per fact id. Absence, failure, or a malformed
//! response is never fatal: the engine falls back to the local heuristic
//! for every fact the response does not cover.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use restyle_model::PaletteToken;

/// Which fact kind a classification request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactKind {
    Variables,
    Svgs,
    Selectors,
}

impl FactKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FactKind::Variables => "variables",
            FactKind::Svgs => "svgs",
            FactKind::Selectors => "selectors",
        }
    }
}

/// One fact presented for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyFact {
    /// Stable id echoed back in the response, e.g. `var:--brand-accent`.
    pub id: String,
    /// Human-readable description of the fact.
    pub summary: String,
    /// Normalized source color, when one exists.
    pub color: Option<String>,
}

/// A worked example included in the prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FewShotExample {
    pub input: String,
    pub token: PaletteToken,
}

/// The structured prompt payload sent to the collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub kind: FactKind,
    /// Page context: url, detected scheme, design system.
    pub context_summary: String,
    pub facts: Vec<ClassifyFact>,
    pub instructions: String,
    pub few_shot_examples: Vec<FewShotExample>,
}

/// One assignment in the collaborator's response. The token arrives as
/// text and is validated against the palette before use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedFact {
    pub fact_id: String,
    pub palette_token: String,
    pub justification: String,
}

/// External classification interface.
pub trait Classifier {
    /// Classify a batch of facts. An `Err` means "unavailable" and is
    /// recovered by the caller, never propagated.
    fn classify(&self, request: &ClassifyRequest) -> Result<Vec<ClassifiedFact>>;
}

/// The always-unavailable classifier; forces heuristic mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullClassifier;

impl Classifier for NullClassifier {
    fn classify(&self, _request: &ClassifyRequest) -> Result<Vec<ClassifiedFact>> {
        Err(anyhow::anyhow!("no classifier configured"))
    }
}

/// Validate a response entry's token against the closed palette set.
#[must_use]
pub fn validated_token(entry: &ClassifiedFact) -> Option<PaletteToken> {
    PaletteToken::parse(&entry.palette_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_payload_round_trips_as_json() {
        let request = ClassifyRequest {
            kind: FactKind::Variables,
            context_summary: "https://acme.example, dark, bootstrap".to_string(),
            facts: vec![ClassifyFact {
                id: "var:--brand".to_string(),
                summary: "--brand used by .cta".to_string(),
                color: Some("#1A73E8".to_string()),
            }],
            instructions: "assign one palette token per fact".to_string(),
            few_shot_examples: vec![FewShotExample {
                input: "--page-bg: #ffffff".to_string(),
                token: PaletteToken::Base,
            }],
        };
        let json = serde_json::to_string(&request).expect("serialize request");
        assert!(json.contains("\"variables\""));
        let round: ClassifyRequest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(round.facts[0].id, "var:--brand");
    }

    #[test]
    fn malformed_tokens_fail_validation() {
        let entry = ClassifiedFact {
            fact_id: "x".to_string(),
            palette_token: "#ff0000".to_string(),
            justification: String::new(),
        };
        assert_eq!(validated_token(&entry), None);
        let entry = ClassifiedFact {
            palette_token: "blue".to_string(),
            ..entry
        };
        assert_eq!(validated_token(&entry), Some(PaletteToken::Blue));
    }

    #[test]
    fn null_classifier_is_unavailable() {
        let request = ClassifyRequest {
            kind: FactKind::Selectors,
            context_summary: String::new(),
            facts: Vec::new(),
            instructions: String::new(),
            few_shot_examples: Vec::new(),
        };
        assert!(NullClassifier.classify(&request).is_err());
    }
}
