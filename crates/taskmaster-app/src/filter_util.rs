//! Parsing of user-typed tokens (priorities, sort orders, ids) and filter building.

use taskmaster_core::priority::ParsePriorityError;
use taskmaster_core::sort::ParseSortOptionError;
use taskmaster_core::{Priority, SortOption, TaskFilter, TaskId};
use thiserror::Error;

/// Error type returned while turning user-facing tokens into typed values.
#[derive(Debug, Error)]
pub enum InputError {
    /// Token does not name a priority.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),
    /// Token does not name a sort order.
    #[error(transparent)]
    InvalidSortOption(#[from] ParseSortOptionError),
    /// Token is not a task id.
    #[error("invalid task id: {token}")]
    InvalidTaskId {
        /// Token as typed.
        token: String,
        /// Underlying integer parse failure.
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Result alias for input parsing helpers.
pub type InputResult<T> = Result<T, InputError>;

/// Builder that accepts user-facing strings and normalizes them into [`TaskFilter`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilterBuilder {
    hide_completed: bool,
    priority: Option<Priority>,
}

impl TaskFilterBuilder {
    /// Create a builder that lets every task through.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide completed tasks.
    #[must_use]
    pub const fn show_completed(mut self, show: bool) -> Self {
        self.hide_completed = !show;
        self
    }

    /// Restrict to a priority given as a typed value.
    #[must_use]
    pub const fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = priority;
        self
    }

    /// Restrict to a priority given as a token. Blank or `all` clears the restriction.
    ///
    /// # Errors
    /// Returns an error if the token does not name a priority.
    pub fn with_priority_token(mut self, token: Option<&str>) -> InputResult<Self> {
        self.priority = parse_optional_priority(token)?;
        Ok(self)
    }

    /// Build the final [`TaskFilter`].
    #[must_use]
    pub const fn build(self) -> TaskFilter {
        TaskFilter::new(!self.hide_completed, self.priority)
    }
}

/// Parse a priority token (`low`, `medium`, `high`, any case).
///
/// # Errors
/// Returns an error if the token does not name a priority.
pub fn parse_priority(token: &str) -> InputResult<Priority> {
    Ok(token.parse()?)
}

/// Parse an optional priority filter; `None`, blank, `all` and `any` mean "no restriction".
///
/// # Errors
/// Returns an error if a non-blank token does not name a priority.
pub fn parse_optional_priority(token: Option<&str>) -> InputResult<Option<Priority>> {
    let Some(raw) = token else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("any") {
        return Ok(None);
    }
    parse_priority(trimmed).map(Some)
}

/// Parse a sort token (`priority`, `due_date`/`due-date`, `title`, `completion`).
///
/// # Errors
/// Returns an error if the token does not name a sort option.
pub fn parse_sort_option(token: &str) -> InputResult<SortOption> {
    Ok(token.parse()?)
}

/// Parse a task id as typed by the user (`3` or `#3`).
///
/// # Errors
/// Returns an error if the token is not a non-negative integer.
pub fn parse_task_id(token: &str) -> InputResult<TaskId> {
    token.parse().map_err(|source| InputError::InvalidTaskId {
        token: token.to_owned(),
        source,
    })
}

impl InputError {
    /// Convert the error into a short hint suitable for end-users.
    #[must_use]
    pub fn describe_user_facing(&self) -> String {
        match self {
            Self::InvalidPriority(err) => {
                format!("'{}' is not a priority; use low, medium or high", err.token)
            }
            Self::InvalidSortOption(err) => format!(
                "'{}' is not a sort order; use priority, due_date, title or completion",
                err.token
            ),
            Self::InvalidTaskId { token, .. } => format!("'{token}' is not a task id"),
        }
    }
}
