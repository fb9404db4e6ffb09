//! Reconciling shipped standard definitions with user definitions
//!
//! For every standard set:
//! - a name the user does not have is added;
//! - a name shared by a standard and a custom set moves the custom set to
//!   `"<name> (Custom)"` (suffix repeated until free) and the standard set
//!   takes the name;
//! - otherwise the higher version wins, the user's copy on a tie.
//!
//! No user set is ever dropped, and applying the same standard sets to an
//! already reconciled map changes nothing.

use serde::Serialize;

use super::DefinitionsMap;
use crate::constants::CUSTOM_SET_SUFFIX;

/// What a reconcile pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub added: Vec<String>,
    pub upgraded: Vec<VersionChange>,
    pub renamed: Vec<Rename>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionChange {
    pub name: String,
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

impl ReconcileReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.upgraded.is_empty() && self.renamed.is_empty()
    }
}

pub fn reconcile(standard: &DefinitionsMap, user: &DefinitionsMap) -> DefinitionsMap {
    reconcile_with_report(standard, user).0
}

pub fn reconcile_with_report(
    standard: &DefinitionsMap,
    user: &DefinitionsMap,
) -> (DefinitionsMap, ReconcileReport) {
    let mut dest = user.clone();
    let mut report = ReconcileReport::default();

    for (key, src) in standard {
        let Some(existing) = dest.remove(key) else {
            dest.insert(key.clone(), src.clone());
            report.added.push(key.clone());
            continue;
        };

        if existing.is_standard() != src.is_standard() {
            let (standard_set, custom_set) = if src.is_standard() {
                (src.clone(), existing)
            } else {
                (existing, src.clone())
            };
            let free_key = free_custom_key(&dest, key);
            dest.insert(free_key.clone(), custom_set.with_name(free_key.clone()));
            dest.insert(key.clone(), standard_set);
            report.renamed.push(Rename {
                from: key.clone(),
                to: free_key,
            });
        } else if existing.version() >= src.version() {
            dest.insert(key.clone(), existing);
        } else {
            report.upgraded.push(VersionChange {
                name: key.clone(),
                from: existing.version(),
                to: src.version(),
            });
            dest.insert(key.clone(), src.clone());
        }
    }

    (dest, report)
}

/// First of `key (Custom)`, `key (Custom) (Custom)`, ... not present in `dest`
fn free_custom_key(dest: &DefinitionsMap, key: &str) -> String {
    let mut candidate = format!("{}{}", key, CUSTOM_SET_SUFFIX);
    while dest.contains_key(&candidate) {
        candidate.push_str(CUSTOM_SET_SUFFIX);
    }
    candidate
}
