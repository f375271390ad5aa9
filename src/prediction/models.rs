//! The closed set of server-side prediction models and the user's selection.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Models the prediction service may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    LogisticRegression,
    RandomForest,
    GradientBoosting,
}

impl ModelId {
    /// All known models, in display order.
    pub const ALL: [ModelId; 3] = [
        ModelId::LogisticRegression,
        ModelId::RandomForest,
        ModelId::GradientBoosting,
    ];

    /// Identifier used on the wire (request list and response keys).
    pub fn wire_name(self) -> &'static str {
        match self {
            ModelId::LogisticRegression => "logistic_regression",
            ModelId::RandomForest => "random_forest",
            ModelId::GradientBoosting => "gradient_boosting",
        }
    }

    /// Resolve a wire identifier back to a known model.
    pub fn from_wire(name: &str) -> Option<ModelId> {
        ModelId::ALL
            .into_iter()
            .find(|model| model.wire_name() == name)
    }

    /// Human-readable name shown in the UI and exported reports.
    pub fn display_name(self) -> &'static str {
        match self {
            ModelId::LogisticRegression => "Logistic Regression",
            ModelId::RandomForest => "Random Forest",
            ModelId::GradientBoosting => "Gradient Boosting",
        }
    }
}

/// The user's model subset. An empty selection means "all models".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelSelection {
    selected: BTreeSet<ModelId>,
}

impl ModelSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the model if absent, remove it if present.
    pub fn toggle(&mut self, model: ModelId) {
        if !self.selected.remove(&model) {
            self.selected.insert(model);
        }
    }

    pub fn contains(&self, model: ModelId) -> bool {
        self.selected.contains(&model)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Models to request: the selection, or every known model when the
    /// selection is empty so the server applies its own default.
    pub fn effective(&self) -> Vec<ModelId> {
        if self.selected.is_empty() {
            ModelId::ALL.to_vec()
        } else {
            self.selected.iter().copied().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_is_an_involution() {
        let mut selection = ModelSelection::new();
        let before = selection.clone();
        selection.toggle(ModelId::RandomForest);
        assert!(selection.contains(ModelId::RandomForest));
        selection.toggle(ModelId::RandomForest);
        assert_eq!(selection, before);
    }

    #[test]
    fn empty_selection_expands_to_all_models() {
        let selection = ModelSelection::new();
        assert_eq!(selection.effective(), ModelId::ALL.to_vec());
    }

    #[test]
    fn non_empty_selection_is_sent_as_is() {
        let mut selection = ModelSelection::new();
        selection.toggle(ModelId::GradientBoosting);
        assert_eq!(selection.effective(), vec![ModelId::GradientBoosting]);
    }

    #[test]
    fn wire_names_round_trip() {
        for model in ModelId::ALL {
            assert_eq!(ModelId::from_wire(model.wire_name()), Some(model));
        }
        assert_eq!(ModelId::from_wire("Diagnosis prediction"), None);
    }
}
