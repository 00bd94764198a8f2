use serde::{Deserialize, Serialize};

use super::{optional, required};
use super::task::Task;
use crate::error::CoreError;
use crate::id::EntityId;
use crate::serialize::optional_text;

/// A named grouping of tasks. Task counts are derived, see [`ProjectStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: EntityId,
    pub name: String,
    #[serde(default, with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Task counters for one project, computed from the task collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub tasks_count: usize,
    pub completed_tasks: usize,
}

impl ProjectStats {
    pub fn tally<'a>(project: &EntityId, tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        tasks
            .into_iter()
            .filter(|t| t.belongs_to(project))
            .fold(Self::default(), |mut acc, t| {
                acc.tasks_count += 1;
                if t.completed {
                    acc.completed_tasks += 1;
                }
                acc
            })
    }

    /// Completed share in whole percent; 0 for an empty project.
    pub fn percent_complete(&self) -> u8 {
        if self.tasks_count == 0 {
            return 0;
        }
        ((self.completed_tasks * 100) / self.tasks_count) as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub description: Option<String>,
}

impl ProjectDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn into_project(self, id: EntityId) -> Result<Project, CoreError> {
        Ok(Project {
            id,
            name: required("name", &self.name)?,
            description: optional(self.description),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn replace_all(draft: ProjectDraft) -> Self {
        Self {
            name: Some(draft.name),
            description: Some(draft.description),
        }
    }

    pub fn apply(self, project: &mut Project) -> Result<(), CoreError> {
        let name = self.name.as_deref().map(|n| required("name", n)).transpose()?;
        if let Some(name) = name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = optional(description);
        }
        Ok(())
    }
}
