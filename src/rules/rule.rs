use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::condition::Condition;
use super::error::ConstructionError;
use super::file::FileAttributes;

/// A named conjunction of conditions
///
/// Conditions are kept sorted by kind so evaluation short-circuits in the
/// order name, meta type, parent path, MIME type, size, date. The
/// `exclusive` flag is carried for policy layers; it does not change
/// [`Rule::is_satisfied`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleRepr", into = "RuleRepr")]
pub struct Rule {
    id: String,
    name: String,
    conditions: Vec<Condition>,
    exclusive: bool,
}

#[derive(Serialize, Deserialize)]
struct RuleRepr {
    id: String,
    name: String,
    #[serde(default)]
    exclusive: bool,
    #[serde(rename = "condition", default)]
    conditions: Vec<Condition>,
}

impl Rule {
    /// Build a rule with a freshly generated id
    pub fn new(
        name: &str,
        conditions: impl IntoIterator<Item = Condition>,
    ) -> Result<Self, ConstructionError> {
        Self::with_id(&Uuid::new_v4().to_string(), name, conditions, false)
    }

    pub fn with_id(
        id: &str,
        name: &str,
        conditions: impl IntoIterator<Item = Condition>,
        exclusive: bool,
    ) -> Result<Self, ConstructionError> {
        if id.trim().is_empty() {
            return Err(ConstructionError::EmptyName("Rule id"));
        }
        if name.trim().is_empty() {
            return Err(ConstructionError::EmptyName("Rule"));
        }

        let mut conditions: Vec<Condition> = conditions.into_iter().collect();
        if conditions.is_empty() {
            return Err(ConstructionError::NoConditions(name.to_string()));
        }
        conditions.sort_by_key(Condition::kind);
        if let Some(pair) = conditions.windows(2).find(|pair| pair[0].kind() == pair[1].kind()) {
            return Err(ConstructionError::DuplicateCondition {
                rule: name.to_string(),
                kind: pair[0].kind().label(),
            });
        }

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            conditions,
            exclusive,
        })
    }

    /// Same rule with the given polarity
    pub fn exclusive(self, exclusive: bool) -> Self {
        Self { exclusive, ..self }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_exclusive(&self) -> bool {
        self.exclusive
    }

    pub fn is_satisfied<F: FileAttributes + ?Sized>(&self, file: &F) -> bool {
        self.is_satisfied_at(file, Utc::now())
    }

    pub fn is_satisfied_at<F: FileAttributes + ?Sized>(&self, file: &F, now: DateTime<Utc>) -> bool {
        self.conditions.iter().all(|condition| condition.passes_at(file, now))
    }
}

impl TryFrom<RuleRepr> for Rule {
    type Error = ConstructionError;

    fn try_from(repr: RuleRepr) -> Result<Self, Self::Error> {
        Self::with_id(&repr.id, &repr.name, repr.conditions, repr.exclusive)
    }
}

impl From<Rule> for RuleRepr {
    fn from(rule: Rule) -> Self {
        Self {
            id: rule.id,
            name: rule.name,
            exclusive: rule.exclusive,
            conditions: rule.conditions,
        }
    }
}
