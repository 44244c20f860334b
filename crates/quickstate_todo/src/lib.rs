//! Quickstate todo - in-memory todo store.
//!
//! Holds a list of [`Todo`] records, the active [`FilterCriteria`] and a
//! page cursor. Every event (create, toggle, remove, edit, filter change,
//! page change) is a synchronous call on [`TodoStore`]; the view is
//! re-derived from the pure [`apply_filter`] and [`paginate`] functions.
//!
//! # Example
//!
//! ```
//! use quickstate_todo::{Seed, StoreSettings, TodoDraft, TodoStore};
//!
//! let mut store = TodoStore::new(Seed::default(), StoreSettings::default());
//! let todo = store.create(TodoDraft::new("Write report")).unwrap();
//! assert_eq!(todo.history().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod draft;
mod error;
mod filter;
mod page;
pub mod seed;
mod store;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use draft::{Field, FieldError, TodoDraft, ValidationErrors};
pub use error::TodoError;
pub use filter::{AssigneeFilter, FilterCriteria, FilterParseError, PriorityFilter, StatusFilter, apply_filter};
pub use page::{PageWindow, page_count, page_window, paginate};
pub use seed::Seed;
pub use store::{EditHistoryPolicy, Page, StoreSettings, TodoStore};
pub use types::{HistoryAction, HistoryEntry, Priority, Source, Tags, Todo, TodoId, User, UserId};
