//! Create-form input and field-level validation.

use crate::types::{Priority, Source, Tags, UserId};
use chrono::{DateTime, Utc};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Fields supplied when creating a todo.
///
/// ```
/// use quickstate_todo::{Priority, TodoDraft};
///
/// let draft = TodoDraft::new("Review report")
///     .description("Before Friday")
///     .priority(Priority::High)
///     .tag("work");
/// assert_eq!(draft.tags.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Setters)]
pub struct TodoDraft {
    /// Required; trimmed before use.
    #[setters(into)]
    pub title: String,
    /// Trimmed before use.
    #[setters(into)]
    pub description: String,
    /// Defaults to medium.
    pub priority: Priority,
    /// Optional due date; also seeds one reminder.
    #[setters(strip_option)]
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee; must name a known user.
    #[setters(strip_option)]
    pub assigned_to: Option<UserId>,
    /// Tags in insertion order.
    #[setters(skip)]
    pub tags: Tags,
    /// Defaults to web.
    pub source: Source,
}

impl TodoDraft {
    /// Creates a draft with a title and defaults for everything else.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Adds a tag (trimmed, de-duplicated).
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags.insert(tag);
        self
    }

    /// Checks the draft against the known users.
    ///
    /// # Errors
    ///
    /// Every failing field, in field order.
    #[instrument(skip(self, known_user), fields(title = %self.title))]
    pub fn validate(&self, known_user: impl Fn(&UserId) -> bool) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new(Field::Title, "Title is required"));
        }

        if let Some(assignee) = &self.assigned_to
            && !known_user(assignee)
        {
            errors.push(FieldError::new(
                Field::Assignee,
                format!("Unknown user {assignee}"),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(errors))
        }
    }
}

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    /// The title field.
    Title,
    /// The assignee field.
    Assignee,
}

/// One failing field and its message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{}: {}", field, message)]
pub struct FieldError {
    /// Which field failed.
    pub field: Field,
    /// Message for display next to the field.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All field errors from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// The error for `field`, if it failed.
    pub fn field(&self, field: Field) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// Iterates errors in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn anyone(_: &UserId) -> bool {
        true
    }

    #[test]
    fn test_blank_title_rejected() {
        let errors = TodoDraft::new("   ").validate(anyone).unwrap_err();
        let title = errors.field(Field::Title).unwrap();
        assert_eq!(title.to_string(), "title: Title is required");
    }

    #[test]
    fn test_unknown_assignee_rejected() {
        let draft = TodoDraft::new("Plan").assigned_to(UserId::from("ghost"));
        let errors = draft.validate(|_| false).unwrap_err();
        assert!(errors.field(Field::Title).is_none());
        assert!(errors.field(Field::Assignee).is_some());
    }

    #[test]
    fn test_all_failures_reported() {
        let draft = TodoDraft::new("").assigned_to(UserId::from("ghost"));
        let errors = draft.validate(|_| false).unwrap_err();
        assert_eq!(errors.iter().count(), 2);
        assert_eq!(
            errors.to_string(),
            "title: Title is required; assignee: Unknown user ghost"
        );
    }

    #[test]
    fn test_valid_draft() {
        assert!(TodoDraft::new("Plan").validate(anyone).is_ok());
    }
}
