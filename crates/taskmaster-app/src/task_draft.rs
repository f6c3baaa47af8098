//! Caller-side task input: form drafts, their validation, and partial edits.

use taskmaster_core::due_date::parse_date;
use taskmaster_core::{DueDate, Priority, Task, TaskFields};
use thiserror::Error;

/// Problems detected while validating a [`TaskDraft`].
#[derive(Debug, Error)]
pub enum DraftError {
    /// Title is empty or whitespace only.
    #[error("title must not be blank")]
    BlankTitle,
    /// Due date is not `YYYY-MM-DD` under a strict policy.
    #[error("invalid due date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDueDate {
        /// Due date as typed.
        value: String,
        /// Parse failure from `time`.
        #[source]
        source: time::error::Parse,
    },
}

/// How strictly drafts are checked before reaching the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftPolicy {
    /// Reject non-empty due dates that do not parse instead of storing them as-is.
    pub strict_due_dates: bool,
}

/// Task fields as typed into a form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Title text (must not be blank).
    pub title: String,
    /// Description text.
    pub description: String,
    /// Selected priority; medium unless chosen otherwise.
    pub priority: Priority,
    /// Due date text (`YYYY-MM-DD`, empty for none).
    pub due_date: String,
}

#[allow(clippy::missing_const_for_fn)]
impl TaskDraft {
    /// Draft with the given title and every other field at its default.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority.
    #[must_use]
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date text.
    #[must_use]
    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }

    /// Draft pre-filled from an existing task, as an edit form would be.
    #[must_use]
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: task.due_date.as_str().to_owned(),
        }
    }

    /// Check the draft and turn it into fields the store accepts.
    ///
    /// The title is trimmed and must not be blank. The due date is trimmed; under
    /// a strict policy a non-empty value must also be a valid calendar date.
    ///
    /// # Errors
    /// Returns [`DraftError`] describing the first problem found.
    pub fn validate(self, policy: DraftPolicy) -> Result<TaskFields, DraftError> {
        let Self {
            title,
            description,
            priority,
            due_date,
        } = self;

        let title = title.trim();
        if title.is_empty() {
            return Err(DraftError::BlankTitle);
        }

        let due_date = due_date.trim();
        if policy.strict_due_dates && !due_date.is_empty() {
            parse_date(due_date).map_err(|source| DraftError::InvalidDueDate {
                value: due_date.to_owned(),
                source,
            })?;
        }

        Ok(TaskFields {
            title: title.to_owned(),
            description,
            priority,
            due_date: DueDate::new(due_date),
        })
    }
}

/// Partial edit: fields left as `None` keep the task's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Replacement due date text (`Some("")` clears it).
    pub due_date: Option<String>,
}

impl TaskEdit {
    /// Returns true when the edit would not change any field.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }

    /// Merge the edit over `task`, yielding a complete draft to validate.
    #[must_use]
    pub fn merge_onto(self, task: &Task) -> TaskDraft {
        let current = TaskDraft::from_task(task);
        TaskDraft {
            title: self.title.unwrap_or(current.title),
            description: self.description.unwrap_or(current.description),
            priority: self.priority.unwrap_or(current.priority),
            due_date: self.due_date.unwrap_or(current.due_date),
        }
    }
}

/// Names of the editable fields that differ between two versions of a task.
#[must_use]
pub fn changed_fields(before: &Task, after: &Task) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if before.title != after.title {
        changed.push("title");
    }
    if before.description != after.description {
        changed.push("description");
    }
    if before.priority != after.priority {
        changed.push("priority");
    }
    if before.due_date != after.due_date {
        changed.push("due_date");
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskmaster_core::TaskId;

    fn existing() -> Task {
        Task::new(
            TaskId(5),
            TaskFields::new("Plan sprint", "Backlog grooming", Priority::Low, "2025-02-01"),
        )
    }

    #[test]
    fn new_draft_defaults_to_medium_priority() {
        let draft = TaskDraft::new("Buy milk");
        assert_eq!(draft.priority, Priority::Medium);
        assert!(draft.description.is_empty());
        assert!(draft.due_date.is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        for title in ["", "   ", "\t\n"] {
            let result = TaskDraft::new(title).validate(DraftPolicy::default());
            assert!(matches!(result, Err(DraftError::BlankTitle)), "{title:?}");
        }
    }

    #[test]
    fn validate_trims_title_and_due_date() {
        let fields = TaskDraft::new("  Ship it  ")
            .due_date(" 2025-05-05 ")
            .priority(Priority::High)
            .validate(DraftPolicy::default())
            .unwrap_or_else(|err| panic!("draft should validate: {err}"));
        assert_eq!(fields.title, "Ship it");
        assert_eq!(fields.due_date.as_str(), "2025-05-05");
        assert_eq!(fields.priority, Priority::High);
    }

    #[test]
    fn lenient_policy_keeps_unparsable_due_dates() {
        let fields = TaskDraft::new("Someday")
            .due_date("next month")
            .validate(DraftPolicy::default())
            .unwrap_or_else(|err| panic!("lenient draft should validate: {err}"));
        assert!(fields.due_date.is_malformed());
    }

    #[test]
    fn strict_policy_rejects_unparsable_due_dates() {
        let strict = DraftPolicy {
            strict_due_dates: true,
        };
        let Err(err) = TaskDraft::new("Someday").due_date("2025-02-30").validate(strict) else {
            panic!("invalid date should be rejected");
        };
        assert!(matches!(err, DraftError::InvalidDueDate { ref value, .. } if value == "2025-02-30"));
        assert!(TaskDraft::new("Undated").validate(strict).is_ok());
    }

    #[test]
    fn edit_merges_over_current_values() {
        let task = existing();
        let edit = TaskEdit {
            priority: Some(Priority::High),
            due_date: Some(String::new()),
            ..TaskEdit::default()
        };
        assert!(!edit.is_empty());
        let draft = edit.merge_onto(&task);
        assert_eq!(draft.title, "Plan sprint");
        assert_eq!(draft.description, "Backlog grooming");
        assert_eq!(draft.priority, Priority::High);
        assert!(draft.due_date.is_empty());
    }

    #[test]
    fn empty_edit_reproduces_task() {
        let task = existing();
        let edit = TaskEdit::default();
        assert!(edit.is_empty());
        let fields = edit
            .merge_onto(&task)
            .validate(DraftPolicy::default())
            .unwrap_or_else(|err| panic!("merged draft should validate: {err}"));
        assert_eq!(task.with_fields(fields), task);
    }

    #[test]
    fn changed_fields_lists_differences() {
        let before = existing();
        let after = before.with_fields(TaskFields::new("Plan sprint", "", Priority::High, "2025-02-01"));
        assert_eq!(changed_fields(&before, &after), vec!["description", "priority"]);
        assert!(changed_fields(&before, &before).is_empty());
    }
}
