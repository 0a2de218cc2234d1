//! Palette mapping: assigns every extracted color fact to a token from
//! the closed target vocabulary.

mod cascade;
mod classifier;
mod engine;
mod heuristic;

pub use cascade::{AccentCascade, distribute_roles, retint_for_role};
pub use classifier::{
    ClassifiedFact, Classifier, ClassifyFact, ClassifyRequest, FactKind, FewShotExample,
    NullClassifier, validated_token,
};
pub use engine::MapperEngine;
pub use heuristic::{HeuristicChoice, choose_token, nearest_accent};
