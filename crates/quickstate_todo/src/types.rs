//! Core domain types for the todo store.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Unique todo identifier (`todo-<n>`).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TodoId(String);

impl TodoId {
    /// Id for the `n`th todo.
    pub fn numbered(n: u64) -> Self {
        Self(format!("todo-{n}"))
    }

    /// Numeric suffix of a `todo-<n>` id.
    pub fn number(&self) -> Option<u64> {
        self.0.strip_prefix("todo-")?.parse().ok()
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque user identifier.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A user that todos can be assigned to. Opaque to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct User {
    id: UserId,
    display_name: String,
}

/// Todo priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

/// Where a todo was created.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Source {
    /// Interactive creation.
    #[default]
    Web,
    /// Mobile client.
    Mobile,
    /// Programmatic creation.
    Api,
    /// Bulk import.
    Import,
}

/// Action recorded in a todo's history.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HistoryAction {
    /// The todo was created.
    Created,
    /// The todo was marked complete.
    Completed,
    /// The todo was marked incomplete.
    Uncompleted,
    /// The todo's fields were edited.
    Updated,
    /// Status changed outside a toggle (imported data).
    StatusChanged,
    /// The todo was (re)assigned (imported data).
    Assigned,
}

/// One audit entry: who did what, when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HistoryEntry {
    action: HistoryAction,
    timestamp: DateTime<Utc>,
    actor: UserId,
}

/// Ordered, de-duplicated tag set.
///
/// Tags keep insertion order. Inserting a tag already present, or one that
/// is blank after trimming, is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Tags(Vec<String>);

impl Tags {
    /// Creates an empty tag set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a trimmed tag. Returns `true` if it was added.
    pub fn insert(&mut self, tag: impl AsRef<str>) -> bool {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || self.contains(tag) {
            return false;
        }
        self.0.push(tag.to_string());
        true
    }

    /// Removes a tag. Returns `true` if it was present.
    pub fn remove(&mut self, tag: &str) -> bool {
        let before = self.0.len();
        self.0.retain(|t| t != tag);
        self.0.len() != before
    }

    /// Checks for an exact tag.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    /// Iterates tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Tags::new();
        for tag in iter {
            tags.insert(tag);
        }
        tags
    }
}

impl From<Vec<String>> for Tags {
    fn from(tags: Vec<String>) -> Self {
        tags.into_iter().collect()
    }
}

impl From<Tags> for Vec<String> {
    fn from(tags: Tags) -> Self {
        tags.0
    }
}

/// A task record with metadata and audit history.
///
/// Records are created by the store (or the seed generator). Callers edit
/// a clone through the `with_*` setters and hand it back to
/// [`TodoStore::edit`](crate::TodoStore::edit); id, creation time and
/// history are not settable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(from = "TodoRecord")]
#[setters(prefix = "with_")]
pub struct Todo {
    #[setters(skip)]
    id: TodoId,
    #[setters(into)]
    title: String,
    #[setters(into)]
    description: String,
    completed: bool,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<UserId>,
    tags: Tags,
    #[setters(skip)]
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    source: Source,
    reminders: Vec<DateTime<Utc>>,
    /// Newest first.
    #[setters(skip)]
    history: Vec<HistoryEntry>,
}

/// Wire form of [`Todo`]; deserialized records pass through
/// [`Todo::assemble`] so timestamps stay ordered.
#[derive(Deserialize)]
struct TodoRecord {
    id: TodoId,
    title: String,
    description: String,
    completed: bool,
    priority: Priority,
    due_date: Option<DateTime<Utc>>,
    assigned_to: Option<UserId>,
    tags: Tags,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    source: Source,
    reminders: Vec<DateTime<Utc>>,
    history: Vec<HistoryEntry>,
}

impl From<TodoRecord> for Todo {
    fn from(record: TodoRecord) -> Self {
        Todo::assemble(
            record.id,
            record.title,
            record.description,
            record.completed,
            record.priority,
            record.due_date,
            record.assigned_to,
            record.tags,
            record.created_at,
            record.updated_at,
            record.source,
            record.reminders,
            record.history,
        )
    }
}

impl Todo {
    /// Assembles a record. Crate-internal: only the store and seed
    /// generator mint ids and history.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn assemble(
        id: TodoId,
        title: String,
        description: String,
        completed: bool,
        priority: Priority,
        due_date: Option<DateTime<Utc>>,
        assigned_to: Option<UserId>,
        tags: Tags,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        source: Source,
        reminders: Vec<DateTime<Utc>>,
        history: Vec<HistoryEntry>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            completed,
            priority,
            due_date,
            assigned_to,
            tags,
            created_at,
            updated_at: updated_at.max(created_at),
            source,
            reminders,
            history,
        }
    }

    /// Prepends a history entry and bumps `updated_at` to its timestamp.
    pub(crate) fn record(&mut self, entry: HistoryEntry) {
        self.updated_at = (*entry.timestamp()).max(self.created_at);
        self.history.insert(0, entry);
    }

    /// Flips completion and records the matching history entry.
    pub(crate) fn toggle(&mut self, now: DateTime<Utc>, actor: UserId) {
        self.completed = !self.completed;
        let action = if self.completed {
            HistoryAction::Completed
        } else {
            HistoryAction::Uncompleted
        };
        self.record(HistoryEntry::new(action, now, actor));
    }

    /// Copies the editable fields of `edit` onto this record, keeping id,
    /// creation time and history.
    pub(crate) fn overwrite_from(&mut self, edit: Todo) {
        self.title = edit.title;
        self.description = edit.description;
        self.completed = edit.completed;
        self.priority = edit.priority;
        self.due_date = edit.due_date;
        self.assigned_to = edit.assigned_to;
        self.tags = edit.tags;
        self.updated_at = edit.updated_at.max(self.created_at);
        self.source = edit.source;
        self.reminders = edit.reminders;
    }

    /// Case-insensitive substring match against title, description or any
    /// tag. `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }
}
