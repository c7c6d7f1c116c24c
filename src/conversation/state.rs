//! Questionnaire state machine: the fixed field order and the current step.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A profile field collected from the user.
///
/// `Field::ALL` is the order in which the questions are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Profession,
    Experience,
    Goals,
    Skills,
    Preferences,
}

impl Field {
    /// Every field, in question order.
    pub const ALL: [Field; 5] = [
        Field::Profession,
        Field::Experience,
        Field::Goals,
        Field::Skills,
        Field::Preferences,
    ];

    /// The first question of the sequence.
    pub const FIRST: Field = Field::Profession;

    /// Position of this field in `Field::ALL`.
    pub fn index(self) -> usize {
        match self {
            Self::Profession => 0,
            Self::Experience => 1,
            Self::Goals => 2,
            Self::Skills => 3,
            Self::Preferences => 4,
        }
    }

    /// The field asked after this one, if any.
    pub fn next(self) -> Option<Field> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profession => "profession",
            Self::Experience => "experience",
            Self::Goals => "goals",
            Self::Skills => "skills",
            Self::Preferences => "preferences",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a session currently is in the questionnaire.
///
/// Progresses linearly: NotStarted → Awaiting(Profession) → … →
/// Awaiting(Preferences) → Complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    #[default]
    NotStarted,
    Awaiting(Field),
    Complete,
}

impl Step {
    /// Get the next step in the linear progression, if any.
    pub fn next(self) -> Option<Step> {
        match self {
            Self::NotStarted => Some(Self::Awaiting(Field::FIRST)),
            Self::Awaiting(field) => Some(field.next().map_or(Self::Complete, Self::Awaiting)),
            Self::Complete => None,
        }
    }

    /// Whether this step is terminal (all answers collected).
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete)
    }

    /// The field awaiting an answer, if the session is mid-questionnaire.
    pub fn field(self) -> Option<Field> {
        match self {
            Self::Awaiting(field) => Some(field),
            _ => None,
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not_started"),
            Self::Awaiting(field) => write!(f, "awaiting:{field}"),
            Self::Complete => f.write_str("complete"),
        }
    }
}

/// Collected answers, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<Field, String>);

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Answer for `field`, or `-` when it was never given.
    pub fn get_or_dash(&self, field: Field) -> &str {
        self.get(field).unwrap_or("-")
    }

    pub fn insert(&mut self, field: Field, value: impl Into<String>) {
        self.0.insert(field, value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every field in `Field::ALL` has an answer.
    pub fn is_complete(&self) -> bool {
        Field::ALL.iter().all(|f| self.0.contains_key(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(Field, S)> for Answers {
    fn from_iter<I: IntoIterator<Item = (Field, S)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(f, v)| (f, v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        let expected = [
            Step::Awaiting(Field::Profession),
            Step::Awaiting(Field::Experience),
            Step::Awaiting(Field::Goals),
            Step::Awaiting(Field::Skills),
            Step::Awaiting(Field::Preferences),
            Step::Complete,
        ];
        let mut current = Step::NotStarted;
        for expected_next in expected {
            let next = current.next().unwrap();
            assert_eq!(next, expected_next);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn field_index_matches_order_table() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(field.index(), i, "{field} is out of order");
        }
        assert_eq!(Field::Preferences.next(), None);
    }

    #[test]
    fn is_terminal() {
        assert!(Step::Complete.is_terminal());
        assert!(!Step::NotStarted.is_terminal());
        assert!(!Step::Awaiting(Field::Preferences).is_terminal());
    }

    #[test]
    fn display_names() {
        assert_eq!(Step::NotStarted.to_string(), "not_started");
        assert_eq!(Step::Awaiting(Field::Goals).to_string(), "awaiting:goals");
        assert_eq!(Step::Complete.to_string(), "complete");
    }

    #[test]
    fn field_display_matches_serde() {
        for field in Field::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(format!("\"{field}\""), json);
        }
    }

    #[test]
    fn answers_serialize_as_flat_map() {
        let answers: Answers = [(Field::Profession, "Engineer"), (Field::Goals, "Lead")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"profession": "Engineer", "goals": "Lead"})
        );
    }

    #[test]
    fn answers_missing_field_renders_dash() {
        let answers = Answers::new();
        assert_eq!(answers.get_or_dash(Field::Skills), "-");
        assert!(!answers.is_complete());
    }

    #[test]
    fn answers_complete_requires_all_fields() {
        let mut answers = Answers::new();
        for field in Field::ALL {
            assert!(!answers.is_complete());
            answers.insert(field, "x");
        }
        assert!(answers.is_complete());
        assert_eq!(answers.len(), 5);
    }
}
