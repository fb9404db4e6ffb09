use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::selection::name_matches_any;

/// Which interesting files sets a job applies
///
/// Sets named in `disabled` are skipped. Every other set is applied,
/// including sets created after these settings were saved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSettings {
    #[serde(default)]
    enabled: BTreeSet<String>,
    #[serde(default)]
    disabled: BTreeSet<String>,
}

impl JobSettings {
    pub fn all_enabled() -> Self {
        Self::default()
    }

    pub fn new(
        enabled: impl IntoIterator<Item = String>,
        disabled: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
            disabled: disabled.into_iter().collect(),
        }
    }

    /// Enable the available sets matching any selection, disable the rest
    pub fn from_selection<'a>(selections: &[String], available: impl IntoIterator<Item = &'a str>) -> Self {
        let (enabled, disabled): (Vec<&str>, Vec<&str>) =
            available.into_iter().partition(|name| name_matches_any(name, selections));
        Self::new(
            enabled.into_iter().map(String::from),
            disabled.into_iter().map(String::from),
        )
    }

    pub fn is_enabled(&self, set_name: &str) -> bool {
        !self.disabled.contains(set_name)
    }

    pub fn enabled_names(&self) -> &BTreeSet<String> {
        &self.enabled
    }

    pub fn disabled_names(&self) -> &BTreeSet<String> {
        &self.disabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_enables_everything() {
        let settings = JobSettings::all_enabled();
        assert!(settings.is_enabled("Cloud Storage"));
        assert!(settings.is_enabled("Brand new set"));
    }

    #[test]
    fn test_disabled_wins() {
        let settings = JobSettings::new(vec!["A".to_string()], vec!["A".to_string(), "B".to_string()]);
        assert!(!settings.is_enabled("A"));
        assert!(!settings.is_enabled("B"));
        assert!(settings.is_enabled("C"));
    }

    #[test]
    fn test_from_selection() {
        let available = ["Cloud Storage", "Disk Images", "Encryption Programs"];
        let settings = JobSettings::from_selection(&["Cloud*".to_string()], available);
        assert!(settings.is_enabled("Cloud Storage"));
        assert!(!settings.is_enabled("Disk Images"));
        assert!(!settings.is_enabled("Encryption Programs"));
        assert_eq!(settings.enabled_names().len(), 1);
        assert_eq!(settings.disabled_names().len(), 2);
    }

    #[test]
    fn test_empty_selection_enables_all() {
        let settings = JobSettings::from_selection(&[], ["A", "B"]);
        assert!(settings.is_enabled("A") && settings.is_enabled("B"));
        assert!(settings.disabled_names().is_empty());
    }
}
