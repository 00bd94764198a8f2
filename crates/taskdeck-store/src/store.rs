//! The domain store: sole owner of the task, project and category
//! collections.
//!
//! Every mutating operation validates first, then changes the in-memory
//! collections, then writes all three back through the backend. Project
//! counters are never stored in memory; [`TaskStore::project_stats`] derives
//! them from the task collection on each call.

use log::{info, warn};

use taskdeck_core::error::CoreError;
use taskdeck_core::id::EntityId;
use taskdeck_core::model::{
    CategorySet, Project, ProjectDraft, ProjectPatch, ProjectStats, Task, TaskDraft, TaskPatch,
};

use crate::backend::{self, Backend};
use crate::error::StoreError;

const TASK_KIND: &str = "task";
const PROJECT_KIND: &str = "project";

pub struct TaskStore<B: Backend> {
    backend: B,
    tasks: Vec<Task>,
    projects: Vec<Project>,
    categories: CategorySet,
    seq: u64,
}

impl<B: Backend> TaskStore<B> {
    /// Load all collections from `backend`.
    pub fn open(backend: B) -> Result<Self, StoreError> {
        let snapshot = backend::load_all(&backend)?;
        Ok(Self {
            backend,
            tasks: snapshot.tasks,
            projects: snapshot.projects,
            categories: snapshot.categories,
            seq: 0,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn task(&self, id: &EntityId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn project(&self, id: &EntityId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Display name of a referenced project.
    pub fn project_name(&self, id: &EntityId) -> Option<&str> {
        self.project(id).map(|p| p.name.as_str())
    }

    /// Write every collection back to the backend.
    pub fn save_all(&mut self) -> Result<(), StoreError> {
        backend::save_all(
            &mut self.backend,
            &self.tasks,
            &self.projects,
            &self.categories,
        )
    }

    // --- tasks ---

    pub fn create_task(&mut self, draft: TaskDraft) -> Result<Task, StoreError> {
        let id = self.fresh_id(TASK_KIND);
        let task = draft.into_task(id)?;
        self.check_references(&task)?;

        info!(
            "event=task_create id={} project={}",
            task.id,
            task.project.as_ref().map(EntityId::as_str).unwrap_or("-")
        );
        self.tasks.push(task.clone());
        self.save_all()?;
        Ok(task)
    }

    /// Merge `patch` into the task. Nothing is written when the id is unknown
    /// or the result fails validation.
    pub fn update_task(&mut self, id: &EntityId, patch: TaskPatch) -> Result<Task, StoreError> {
        let Some(index) = self.task_index(id) else {
            warn!("event=task_update status=not_found id={}", id);
            return Err(StoreError::TaskNotFound(id.to_string()));
        };

        let mut updated = self.tasks[index].clone();
        patch.apply(&mut updated)?;
        self.check_references(&updated)?;

        info!("event=task_update id={}", id);
        self.tasks[index] = updated.clone();
        self.save_all()?;
        Ok(updated)
    }

    /// Returns `false`, without writing, when the id is unknown.
    pub fn set_task_completion(
        &mut self,
        id: &EntityId,
        completed: bool,
    ) -> Result<bool, StoreError> {
        let Some(index) = self.task_index(id) else {
            warn!("event=task_complete status=not_found id={}", id);
            return Ok(false);
        };

        info!("event=task_complete id={} completed={}", id, completed);
        self.tasks[index].completed = completed;
        self.save_all()?;
        Ok(true)
    }

    /// Idempotent. Returns whether a task was removed.
    pub fn delete_task(&mut self, id: &EntityId) -> Result<bool, StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        let removed = self.tasks.len() != before;

        info!("event=task_delete id={} removed={}", id, removed);
        self.save_all()?;
        Ok(removed)
    }

    // --- projects ---

    pub fn create_project(&mut self, draft: ProjectDraft) -> Result<Project, StoreError> {
        let id = self.fresh_id(PROJECT_KIND);
        let project = draft.into_project(id)?;

        info!("event=project_create id={}", project.id);
        self.projects.push(project.clone());
        self.save_all()?;
        Ok(project)
    }

    /// `Ok(None)`, without writing, when the id is unknown.
    pub fn update_project(
        &mut self,
        id: &EntityId,
        patch: ProjectPatch,
    ) -> Result<Option<Project>, StoreError> {
        let Some(index) = self.projects.iter().position(|p| &p.id == id) else {
            warn!("event=project_update status=not_found id={}", id);
            return Ok(None);
        };

        let mut updated = self.projects[index].clone();
        patch.apply(&mut updated)?;

        info!("event=project_update id={}", id);
        self.projects[index] = updated.clone();
        self.save_all()?;
        Ok(Some(updated))
    }

    /// Remove the project and every task that belongs to it. Returns the
    /// number of tasks removed with it.
    pub fn delete_project(&mut self, id: &EntityId) -> Result<usize, StoreError> {
        self.projects.retain(|p| &p.id != id);
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.belongs_to(id));
        let cascaded = before - self.tasks.len();

        info!("event=project_delete id={} cascaded_tasks={}", id, cascaded);
        self.save_all()?;
        Ok(cascaded)
    }

    pub fn project_stats(&self, id: &EntityId) -> ProjectStats {
        ProjectStats::tally(id, &self.tasks)
    }

    pub fn projects_with_stats(&self) -> Vec<(&Project, ProjectStats)> {
        self.projects
            .iter()
            .map(|p| (p, self.project_stats(&p.id)))
            .collect()
    }

    // --- categories ---

    /// Add a category, returning the stored (trimmed) name.
    pub fn add_category(&mut self, name: &str) -> Result<String, StoreError> {
        let trimmed = name.trim().to_string();
        if !self.categories.insert(&trimmed)? {
            warn!("event=category_add status=duplicate name={}", trimmed);
            return Err(StoreError::DuplicateCategory(trimmed));
        }

        info!("event=category_add name={}", trimmed);
        self.save_all()?;
        Ok(trimmed)
    }

    /// Remove a category and clear it from every task that used it. Returns
    /// how many tasks were cleared.
    pub fn delete_category(&mut self, name: &str) -> Result<usize, StoreError> {
        let name = name.trim();
        self.categories.remove(name);
        let mut cleared = 0;
        for task in self
            .tasks
            .iter_mut()
            .filter(|t| t.category.as_deref() == Some(name))
        {
            task.category = None;
            cleared += 1;
        }

        info!("event=category_delete name={} cleared_tasks={}", name, cleared);
        self.save_all()?;
        Ok(cleared)
    }

    // --- lookup ---

    /// Find a task by exact id or unique id prefix.
    pub fn resolve_task(&self, reference: &str) -> Result<&Task, StoreError> {
        let reference = reference.trim();
        if let Some(task) = self.tasks.iter().find(|t| t.id.as_str() == reference) {
            return Ok(task);
        }
        if reference.is_empty() {
            return Err(StoreError::TaskNotFound(reference.to_string()));
        }
        let matches: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.id.starts_with(reference))
            .collect();
        match matches.as_slice() {
            [] => Err(StoreError::TaskNotFound(reference.to_string())),
            [task] => Ok(task),
            many => Err(StoreError::AmbiguousReference {
                reference: reference.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Find a project by exact id, or else by case-insensitive name.
    pub fn resolve_project(&self, reference: &str) -> Result<&Project, StoreError> {
        let reference = reference.trim();
        if let Some(project) = self.projects.iter().find(|p| p.id.as_str() == reference) {
            return Ok(project);
        }
        let wanted = reference.to_lowercase();
        let matches: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| p.name.to_lowercase() == wanted)
            .collect();
        match matches.as_slice() {
            [] => Err(StoreError::ProjectNotFound(reference.to_string())),
            [project] => Ok(project),
            many => Err(StoreError::AmbiguousReference {
                reference: reference.to_string(),
                count: many.len(),
            }),
        }
    }

    // --- internals ---

    fn task_index(&self, id: &EntityId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// A generated id not used by any task or project.
    fn fresh_id(&mut self, kind: &str) -> EntityId {
        loop {
            self.seq += 1;
            let id = EntityId::generate(kind, self.seq);
            let taken = self.tasks.iter().any(|t| t.id == id)
                || self.projects.iter().any(|p| p.id == id);
            if !taken {
                return id;
            }
        }
    }

    /// A task may only reference categories and projects that exist.
    fn check_references(&self, task: &Task) -> Result<(), StoreError> {
        if let Some(category) = task.category.as_deref() {
            if !self.categories.contains(category) {
                return Err(CoreError::validation(
                    "category",
                    format!("'{category}' does not exist"),
                )
                .into());
            }
        }
        if let Some(project) = task.project.as_ref() {
            if self.project(project).is_none() {
                return Err(CoreError::validation(
                    "project",
                    format!("'{project}' does not exist"),
                )
                .into());
            }
        }
        Ok(())
    }
}
