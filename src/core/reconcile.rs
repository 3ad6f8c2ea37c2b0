//! core::reconcile
//!
//! Reconciles a user's chosen field set back into a stream's metadata.
//!
//! # Rules
//!
//! For every non-root breadcrumb, first match wins:
//!
//! 1. `inclusion == automatic`: any explicit `selected` is stale and is
//!    removed; nothing is ever written. Automatic fields never carry an
//!    override, whether or not they appeared in the chosen set.
//! 2. Chosen: `selected = true`.
//! 3. Previously selected by default, or carrying any prior explicit
//!    `selected` (even `false`): `selected = false`. An explicit
//!    deselection is only recorded where there is a default or an old
//!    override to negate.
//! 4. Otherwise: untouched. Fields that were never selected and are still
//!    not chosen stay free of selection keys.
//!
//! The root breadcrumb is not touched here; stream-level selection is
//! written by the orchestrator. Re-running with the same chosen set is a
//! no-op, and no breadcrumb is ever added or removed.

use std::collections::HashSet;

use crate::core::breadcrumb::Breadcrumb;
use crate::core::metadata::MetadataMap;

/// Rewrite `selected` attributes to reflect the chosen breadcrumb set.
pub fn reconcile(map: &mut MetadataMap, chosen: &HashSet<Breadcrumb>) {
    for (breadcrumb, attrs) in map.iter_mut() {
        if breadcrumb.is_root() {
            continue;
        }
        if attrs.is_automatic() {
            attrs.selected = None;
        } else if chosen.contains(breadcrumb) {
            attrs.selected = Some(true);
        } else if attrs.selected_by_default == Some(true) || attrs.selected.is_some() {
            attrs.selected = Some(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(records: Vec<serde_json::Value>) -> MetadataMap {
        MetadataMap::from_records(&records).unwrap()
    }

    fn field(segments: &[&str], metadata: serde_json::Value) -> serde_json::Value {
        json!({ "breadcrumb": segments, "metadata": metadata })
    }

    fn selected_of(map: &MetadataMap, segments: &[&str]) -> Option<bool> {
        map.get(&Breadcrumb::new(segments.iter().copied()))
            .and_then(|attrs| attrs.selected)
    }

    #[test]
    fn chosen_fields_are_selected() {
        let mut m = map(vec![field(&["properties", "a"], json!({}))]);
        let chosen = HashSet::from([Breadcrumb::new(["properties", "a"])]);
        reconcile(&mut m, &chosen);
        assert_eq!(selected_of(&m, &["properties", "a"]), Some(true));
    }

    #[test]
    fn stale_override_on_automatic_is_removed() {
        // A prior edit left selected=false on an automatic field.
        let mut m = map(vec![field(
            &["properties", "id"],
            json!({ "inclusion": "automatic", "selected": false }),
        )]);
        reconcile(&mut m, &HashSet::new());
        assert_eq!(selected_of(&m, &["properties", "id"]), None);
    }

    #[test]
    fn automatic_field_in_chosen_set_gets_no_override() {
        let mut m = map(vec![field(
            &["properties", "id"],
            json!({ "inclusion": "automatic", "selected": true }),
        )]);
        let chosen = HashSet::from([Breadcrumb::new(["properties", "id"])]);
        reconcile(&mut m, &chosen);
        assert_eq!(selected_of(&m, &["properties", "id"]), None);
    }

    #[test]
    fn dropped_default_records_explicit_deselection() {
        let mut m = map(vec![field(
            &["properties", "name"],
            json!({ "selected-by-default": true }),
        )]);
        reconcile(&mut m, &HashSet::new());
        assert_eq!(selected_of(&m, &["properties", "name"]), Some(false));
    }

    #[test]
    fn dropped_override_records_explicit_deselection() {
        let mut m = map(vec![field(
            &["properties", "email"],
            json!({ "selected": true }),
        )]);
        reconcile(&mut m, &HashSet::new());
        assert_eq!(selected_of(&m, &["properties", "email"]), Some(false));
    }

    #[test]
    fn prior_explicit_false_is_rewritten_false() {
        // A prior selected=false still counts as "had an explicit key" and
        // is written again, not cleared.
        let mut m = map(vec![field(
            &["properties", "email"],
            json!({ "selected": false }),
        )]);
        reconcile(&mut m, &HashSet::new());
        assert_eq!(selected_of(&m, &["properties", "email"]), Some(false));
    }

    #[test]
    fn untouched_fields_gain_no_keys() {
        let mut m = map(vec![field(
            &["properties", "notes"],
            json!({ "inclusion": "available" }),
        )]);
        reconcile(&mut m, &HashSet::new());
        assert_eq!(selected_of(&m, &["properties", "notes"]), None);
    }

    #[test]
    fn root_is_left_alone() {
        let mut m = map(vec![
            field(&[], json!({ "selected": true })),
            field(&["properties", "a"], json!({})),
        ]);
        reconcile(&mut m, &HashSet::new());
        assert_eq!(selected_of(&m, &[]), Some(true));
    }

    #[test]
    fn no_breadcrumbs_are_dropped() {
        let records = vec![
            field(&[], json!({ "selected": true })),
            field(&["properties", "id"], json!({ "inclusion": "automatic" })),
            field(&["properties", "name"], json!({ "selected-by-default": true })),
            field(&["properties", "notes"], json!({})),
        ];
        let mut m = map(records);
        let before: Vec<Breadcrumb> = m.iter().map(|(b, _)| b.clone()).collect();
        reconcile(&mut m, &HashSet::from([Breadcrumb::new(["properties", "notes"])]));
        let after: Vec<Breadcrumb> = m.iter().map(|(b, _)| b.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let records = vec![
            field(&["properties", "id"], json!({ "inclusion": "automatic", "selected": true })),
            field(&["properties", "name"], json!({ "selected-by-default": true })),
            field(&["properties", "email"], json!({ "selected": true })),
            field(&["properties", "notes"], json!({})),
        ];
        let chosen = HashSet::from([Breadcrumb::new(["properties", "email"])]);

        let mut once = map(records);
        reconcile(&mut once, &chosen);
        let mut twice = once.clone();
        reconcile(&mut twice, &chosen);

        assert_eq!(once, twice);
    }
}
