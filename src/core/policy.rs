//! core::policy
//!
//! Field selection policy: effective state and choice building.
//!
//! # Precedence
//!
//! A field's effective state is derived from its attributes, first match
//! wins:
//!
//! 1. `inclusion == automatic` - selected and locked
//! 2. `selected-by-default == true` - selected, user may override
//! 3. `selected == true` - selected, user may override
//! 4. otherwise - unselected, user may override
//!
//! # Reverse Lookup
//!
//! Labels are not provably invertible for every breadcrumb shape, so the
//! lookup table recorded while choices are built is the single source of
//! truth for translating chosen labels back to breadcrumbs. A label with no
//! entry signals a wiring bug between choice building and translation, and
//! is surfaced as a fatal error rather than skipped.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::core::breadcrumb::Breadcrumb;
use crate::core::metadata::{Attributes, MetadataMap};
use crate::ui::prompts::{Choice, SELECT_ALL_LABEL};

/// Errors from label translation.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A chosen label has no reverse-lookup entry. This is a consistency
    /// bug, not a user mistake.
    #[error("chosen label matches no field: {0}")]
    UnknownLabel(String),
}

/// Effective selection state of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Always extracted; not user-togglable.
    Automatic,
    /// Selected because the producer marked it selected-by-default.
    DefaultSelected,
    /// Selected by an explicit user override.
    Selected,
    /// Not selected.
    Unselected,
}

impl FieldState {
    /// Derive the effective state from a field's attributes.
    pub fn of(attrs: &Attributes) -> Self {
        if attrs.is_automatic() {
            FieldState::Automatic
        } else if attrs.selected_by_default == Some(true) {
            FieldState::DefaultSelected
        } else if attrs.selected == Some(true) {
            FieldState::Selected
        } else {
            FieldState::Unselected
        }
    }

    /// Whether the field is currently selected.
    pub fn is_selected(&self) -> bool {
        !matches!(self, FieldState::Unselected)
    }

    /// Lock reason shown next to untogglable choices.
    pub fn lock_reason(&self) -> Option<&'static str> {
        match self {
            FieldState::Automatic => Some("automatic"),
            _ => None,
        }
    }
}

/// Field choices for one stream, with the label-to-breadcrumb reverse
/// lookup recorded while they were built.
#[derive(Debug)]
pub struct FieldChoices {
    choices: Vec<Choice>,
    lookup: HashMap<String, Breadcrumb>,
}

impl FieldChoices {
    /// Evaluate every non-root breadcrumb in the map and build its prompt
    /// choice.
    ///
    /// Iteration follows map (document) order, or breadcrumb-sorted order
    /// when `sort` is set. Each produced label is recorded in the reverse
    /// lookup.
    pub fn build(map: &MetadataMap, sort: bool) -> Self {
        let mut fields: Vec<(&Breadcrumb, &Attributes)> =
            map.iter().filter(|(b, _)| !b.is_root()).collect();
        if sort {
            fields.sort_by(|a, b| a.0.cmp(b.0));
        }

        let mut choices = Vec::with_capacity(fields.len());
        let mut lookup = HashMap::with_capacity(fields.len());
        for (breadcrumb, attrs) in fields {
            let state = FieldState::of(attrs);
            let label = breadcrumb.label();
            lookup.insert(label.clone(), breadcrumb.clone());
            choices.push(Choice {
                label,
                checked: state.is_selected(),
                disabled: state.lock_reason(),
            });
        }
        Self { choices, lookup }
    }

    /// The prompt choices, in display order.
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Translate chosen labels back to breadcrumbs.
    ///
    /// The synthetic select-all label is filtered out; any other label
    /// without a lookup entry is a fatal consistency error.
    pub fn resolve(&self, picked: &[String]) -> Result<HashSet<Breadcrumb>, PolicyError> {
        picked
            .iter()
            .filter(|label| label.as_str() != SELECT_ALL_LABEL)
            .map(|label| {
                self.lookup
                    .get(label)
                    .cloned()
                    .ok_or_else(|| PolicyError::UnknownLabel(label.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::Inclusion;
    use serde_json::json;

    fn attrs(value: serde_json::Value) -> Attributes {
        serde_json::from_value(value).unwrap()
    }

    mod field_state {
        use super::*;

        #[test]
        fn automatic_wins_over_everything() {
            let state = FieldState::of(&attrs(json!({
                "inclusion": "automatic",
                "selected-by-default": false,
                "selected": false,
            })));
            assert_eq!(state, FieldState::Automatic);
            assert!(state.is_selected());
            assert_eq!(state.lock_reason(), Some("automatic"));
        }

        #[test]
        fn default_beats_explicit_override() {
            let state = FieldState::of(&attrs(json!({
                "selected-by-default": true,
                "selected": false,
            })));
            assert_eq!(state, FieldState::DefaultSelected);
            assert!(state.is_selected());
            assert_eq!(state.lock_reason(), None);
        }

        #[test]
        fn explicit_selection() {
            let state = FieldState::of(&attrs(json!({ "selected": true })));
            assert_eq!(state, FieldState::Selected);
            assert!(state.is_selected());
        }

        #[test]
        fn nothing_set_is_unselected() {
            let state = FieldState::of(&attrs(json!({ "inclusion": "available" })));
            assert_eq!(state, FieldState::Unselected);
            assert!(!state.is_selected());
        }

        #[test]
        fn explicit_false_is_unselected() {
            let state = FieldState::of(&attrs(json!({ "selected": false })));
            assert_eq!(state, FieldState::Unselected);
        }

        #[test]
        fn unsupported_inclusion_is_not_locked() {
            let a = Attributes {
                inclusion: Some(Inclusion::Unsupported),
                ..Attributes::default()
            };
            assert_eq!(FieldState::of(&a), FieldState::Unselected);
            assert_eq!(FieldState::of(&a).lock_reason(), None);
        }
    }

    mod field_choices {
        use super::*;
        use crate::core::metadata::MetadataMap;

        fn sample_map() -> MetadataMap {
            let records = vec![
                json!({ "breadcrumb": [], "metadata": { "selected": true } }),
                json!({ "breadcrumb": ["properties", "zeta"], "metadata": {} }),
                json!({
                    "breadcrumb": ["properties", "id"],
                    "metadata": { "inclusion": "automatic" },
                }),
                json!({
                    "breadcrumb": ["properties", "name"],
                    "metadata": { "selected-by-default": true },
                }),
            ];
            MetadataMap::from_records(&records).unwrap()
        }

        #[test]
        fn skips_root_and_keeps_document_order() {
            let choices = FieldChoices::build(&sample_map(), false);
            let labels: Vec<&str> = choices.choices().iter().map(|c| c.label.as_str()).collect();
            assert_eq!(labels, vec!["zeta", "id", "name"]);
        }

        #[test]
        fn sorted_iteration_on_request() {
            let choices = FieldChoices::build(&sample_map(), true);
            let labels: Vec<&str> = choices.choices().iter().map(|c| c.label.as_str()).collect();
            assert_eq!(labels, vec!["id", "name", "zeta"]);
        }

        #[test]
        fn checked_and_locked_follow_state() {
            let choices = FieldChoices::build(&sample_map(), true);
            let by_label: HashMap<&str, &Choice> = choices
                .choices()
                .iter()
                .map(|c| (c.label.as_str(), c))
                .collect();
            assert!(by_label["id"].checked);
            assert_eq!(by_label["id"].disabled, Some("automatic"));
            assert!(by_label["name"].checked);
            assert_eq!(by_label["name"].disabled, None);
            assert!(!by_label["zeta"].checked);
        }

        #[test]
        fn resolve_round_trips_every_label() {
            let choices = FieldChoices::build(&sample_map(), false);
            let labels: Vec<String> =
                choices.choices().iter().map(|c| c.label.clone()).collect();
            let resolved = choices.resolve(&labels).unwrap();
            assert_eq!(resolved.len(), 3);
            assert!(resolved.contains(&Breadcrumb::new(["properties", "id"])));
        }

        #[test]
        fn resolve_filters_select_all() {
            let choices = FieldChoices::build(&sample_map(), false);
            let picked = vec![SELECT_ALL_LABEL.to_string(), "name".to_string()];
            let resolved = choices.resolve(&picked).unwrap();
            assert_eq!(resolved.len(), 1);
            assert!(resolved.contains(&Breadcrumb::new(["properties", "name"])));
        }

        #[test]
        fn unknown_label_is_fatal() {
            let choices = FieldChoices::build(&sample_map(), false);
            let picked = vec!["ghost".to_string()];
            let err = choices.resolve(&picked).unwrap_err();
            assert!(matches!(err, PolicyError::UnknownLabel(label) if label == "ghost"));
        }
    }
}
