use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ConstructionError;
use super::file::{FileAttributes, KnownStatus};
use super::rule::Rule;

/// A named, versioned collection of rules
///
/// Values are immutable: every edit returns a new set, so a set that has
/// been handed to an ingest job never changes underneath it. Rules are
/// keyed and evaluated in rule-id order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FilesSetRepr", into = "FilesSetRepr")]
pub struct FilesSet {
    name: String,
    description: String,
    ignore_known_files: bool,
    ignore_unallocated_space: bool,
    rules: BTreeMap<String, Rule>,
    standard: bool,
    version: u32,
}

#[derive(Serialize, Deserialize)]
struct FilesSetRepr {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ignore_known_files: bool,
    #[serde(default)]
    ignore_unallocated_space: bool,
    #[serde(default)]
    standard: bool,
    #[serde(default)]
    version: u32,
    #[serde(rename = "rule", default)]
    rules: Vec<Rule>,
}

/// Builder for [`FilesSet`]
#[derive(Debug, Clone, Default)]
pub struct FilesSetBuilder {
    name: String,
    description: String,
    ignore_known_files: bool,
    ignore_unallocated_space: bool,
    rules: Vec<Rule>,
    standard: bool,
    version: u32,
}

impl FilesSetBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn ignore_known_files(mut self, ignore: bool) -> Self {
        self.ignore_known_files = ignore;
        self
    }

    pub fn ignore_unallocated_space(mut self, ignore: bool) -> Self {
        self.ignore_unallocated_space = ignore;
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn standard(mut self, standard: bool) -> Self {
        self.standard = standard;
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn build(self) -> Result<FilesSet, ConstructionError> {
        if self.name.trim().is_empty() {
            return Err(ConstructionError::EmptyName("Files set"));
        }

        let mut rules = BTreeMap::new();
        for rule in self.rules {
            let id = rule.id().to_string();
            if rules.contains_key(&id) {
                return Err(ConstructionError::DuplicateRuleId { set: self.name, id });
            }
            rules.insert(id, rule);
        }

        Ok(FilesSet {
            name: self.name,
            description: self.description,
            ignore_known_files: self.ignore_known_files,
            ignore_unallocated_space: self.ignore_unallocated_space,
            rules,
            standard: self.standard,
            version: self.version,
        })
    }
}

impl FilesSet {
    pub fn builder(name: impl Into<String>) -> FilesSetBuilder {
        FilesSetBuilder {
            name: name.into(),
            ..FilesSetBuilder::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn ignores_known_files(&self) -> bool {
        self.ignore_known_files
    }

    pub fn ignores_unallocated_space(&self) -> bool {
        self.ignore_unallocated_space
    }

    pub fn rules(&self) -> &BTreeMap<String, Rule> {
        &self.rules
    }

    pub fn is_standard(&self) -> bool {
        self.standard
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Copy with a rule added, replacing any rule with the same id
    pub fn with_rule(&self, rule: Rule) -> Self {
        let mut set = self.clone();
        set.rules.insert(rule.id().to_string(), rule);
        set
    }

    pub fn without_rule(&self, rule_id: &str) -> Self {
        let mut set = self.clone();
        set.rules.remove(rule_id);
        set
    }

    pub fn renamed(&self, name: impl Into<String>) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName("Files set"));
        }
        Ok(self.with_name(name))
    }

    /// Rename without validation; callers guarantee a non-empty name
    pub(crate) fn with_name(&self, name: String) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    pub fn with_version(&self, version: u32) -> Self {
        Self {
            version,
            ..self.clone()
        }
    }

    /// Copy flagged as a shipped (read-only) definition
    pub fn as_standard(&self) -> Self {
        Self {
            standard: true,
            ..self.clone()
        }
    }

    /// Name of the first rule the file satisfies, if the file is a member
    ///
    /// Known files are never members of a set that ignores them, and the
    /// same holds for slack and unallocated blocks when the set ignores
    /// unallocated space; both checks take precedence over the rules.
    pub fn first_satisfied_rule_name<F: FileAttributes + ?Sized>(&self, file: &F) -> Option<&str> {
        if self.ignore_known_files && file.known() == KnownStatus::Known {
            return None;
        }
        if self.ignore_unallocated_space && file.file_type().is_unallocated_space() {
            return None;
        }

        self.rules
            .values()
            .find(|rule| rule.is_satisfied(file))
            .map(Rule::name)
    }
}

/// Membership test exposed to collaborators
pub fn membership_rule_name<'a, F: FileAttributes + ?Sized>(
    set: &'a FilesSet,
    file: &F,
) -> Option<&'a str> {
    set.first_satisfied_rule_name(file)
}

impl TryFrom<FilesSetRepr> for FilesSet {
    type Error = ConstructionError;

    fn try_from(repr: FilesSetRepr) -> Result<Self, Self::Error> {
        FilesSet::builder(repr.name)
            .description(repr.description)
            .ignore_known_files(repr.ignore_known_files)
            .ignore_unallocated_space(repr.ignore_unallocated_space)
            .rules(repr.rules)
            .standard(repr.standard)
            .version(repr.version)
            .build()
    }
}

impl From<FilesSet> for FilesSetRepr {
    fn from(set: FilesSet) -> Self {
        Self {
            name: set.name,
            description: set.description,
            ignore_known_files: set.ignore_known_files,
            ignore_unallocated_space: set.ignore_unallocated_space,
            standard: set.standard,
            version: set.version,
            rules: set.rules.into_values().collect(),
        }
    }
}
