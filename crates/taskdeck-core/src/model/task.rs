use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{optional, required};
use crate::error::CoreError;
use crate::id::EntityId;
use crate::serialize::{optional_date, optional_id, optional_text};

/// Task priority. Sorting by priority puts `High` first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Sort weight: high=3, medium=2, low=1.
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CoreError::validation(
                "priority",
                format!("must be low, medium or high (got '{other}')"),
            )),
        }
    }
}

/// A unit of work.
///
/// `category` names an entry of the category set and `project` the id of a
/// project. Both are plain references resolved at display time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    #[serde(default, with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, with = "optional_date", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, with = "optional_id", skip_serializing_if = "Option::is_none")]
    pub project: Option<EntityId>,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn is_due(&self) -> bool {
        self.due_date.is_some()
    }

    pub fn belongs_to(&self, project: &EntityId) -> bool {
        self.project.as_ref() == Some(project)
    }

    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercase.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Everything needed to create a task. The store assigns the id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category: Option<String>,
    pub project: Option<EntityId>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn project(mut self, project: EntityId) -> Self {
        self.project = Some(project);
        self
    }

    /// Normalize and validate into an open task carrying `id`.
    pub fn into_task(self, id: EntityId) -> Result<Task, CoreError> {
        Ok(Task {
            id,
            title: required("title", &self.title)?,
            description: optional(self.description),
            due_date: self.due_date,
            priority: self.priority,
            category: optional(self.category),
            project: self.project,
            completed: false,
        })
    }
}

/// A partial update. `None` leaves a field untouched; for nullable fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
    pub project: Option<Option<EntityId>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Replace every editable field with the draft's values, keeping the
    /// completion flag. This is what a full edit form submits.
    pub fn replace_all(draft: TaskDraft) -> Self {
        Self {
            title: Some(draft.title),
            description: Some(draft.description),
            due_date: Some(draft.due_date),
            priority: Some(draft.priority),
            category: Some(draft.category),
            project: Some(draft.project),
            completed: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `task`. Validation runs before any field is written, so an
    /// error leaves `task` unchanged.
    pub fn apply(self, task: &mut Task) -> Result<(), CoreError> {
        let title = self.title.as_deref().map(|t| required("title", t)).transpose()?;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = optional(description);
        }
        if let Some(due) = self.due_date {
            task.due_date = due;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = optional(category);
        }
        if let Some(project) = self.project {
            task.project = project;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        Ok(())
    }
}
