//! Filter criteria and the pure filter over a todo list.

use crate::types::{Priority, Todo, UserId};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Completion-status filter.
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
pub enum StatusFilter {
    /// Every todo.
    #[default]
    All,
    /// Incomplete todos.
    Active,
    /// Completed todos.
    Completed,
}

impl StatusFilter {
    /// List heading for this filter.
    pub fn heading(self) -> &'static str {
        match self {
            StatusFilter::All => "All Todos",
            StatusFilter::Active => "Active Todos",
            StatusFilter::Completed => "Completed Todos",
        }
    }

    fn accepts(self, completed: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !completed,
            StatusFilter::Completed => completed,
        }
    }
}

/// Priority filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    /// Any priority.
    #[default]
    All,
    /// Exactly this priority.
    Only(Priority),
}

impl std::fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityFilter::All => write!(f, "all"),
            PriorityFilter::Only(priority) => write!(f, "{priority}"),
        }
    }
}

/// Assignee filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssigneeFilter {
    /// Assigned or not, to anyone.
    #[default]
    All,
    /// Assigned to exactly this user.
    User(UserId),
}

impl std::fmt::Display for AssigneeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssigneeFilter::All => write!(f, "all"),
            AssigneeFilter::User(id) => write!(f, "{id}"),
        }
    }
}

/// Error parsing a filter value.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Unknown {} filter {:?}", kind, value)]
pub struct FilterParseError {
    /// Which filter was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl std::error::Error for FilterParseError {}

impl FromStr for PriorityFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(PriorityFilter::All);
        }
        s.parse::<Priority>()
            .map(PriorityFilter::Only)
            .map_err(|_| FilterParseError {
                kind: "priority",
                value: s.to_string(),
            })
    }
}

/// `"all"` (any case) or a user id. Never fails.
impl FromStr for AssigneeFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            Ok(AssigneeFilter::All)
        } else {
            Ok(AssigneeFilter::User(UserId::from(s)))
        }
    }
}

/// The active filter predicate set.
///
/// [`FilterCriteria::default`] matches everything and is the "clear all"
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Completion filter.
    pub status: StatusFilter,
    /// Priority filter.
    pub priority: PriorityFilter,
    /// Assignee filter.
    pub assignee: AssigneeFilter,
    /// Case-insensitive substring over title, description and tags.
    /// Empty matches everything.
    pub search: String,
}

impl FilterCriteria {
    /// True if `todo` passes every predicate.
    pub fn matches(&self, todo: &Todo) -> bool {
        self.matches_with(todo, &self.search.to_lowercase())
    }

    fn matches_with(&self, todo: &Todo, needle: &str) -> bool {
        if !self.status.accepts(*todo.completed()) {
            return false;
        }

        if let PriorityFilter::Only(priority) = self.priority
            && *todo.priority() != priority
        {
            return false;
        }

        if let AssigneeFilter::User(user) = &self.assignee
            && todo.assigned_to().as_ref() != Some(user)
        {
            return false;
        }

        needle.is_empty() || todo.matches_lowercase(needle)
    }

    /// Number of predicates that differ from "all".
    pub fn active_filter_count(&self) -> usize {
        [
            self.status != StatusFilter::All,
            self.priority != PriorityFilter::All,
            self.assignee != AssigneeFilter::All,
            !self.search.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Returns the todos passing `criteria`, in their original relative order.
#[instrument(skip(todos), fields(total = todos.len()))]
pub fn apply_filter<'a>(todos: &'a [Todo], criteria: &FilterCriteria) -> Vec<&'a Todo> {
    let needle = criteria.search.to_lowercase();
    todos
        .iter()
        .filter(|todo| criteria.matches_with(todo, &needle))
        .collect()
}
