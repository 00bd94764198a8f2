use anyhow::{Context, Result};
use chrono::NaiveDate;
use taskdeck_core::calendar::parse_date;
use taskdeck_core::id::EntityId;
use taskdeck_core::model::{Priority, TaskDraft, TaskPatch};
use taskdeck_store::backend::Backend;
use taskdeck_store::query::{self, SortKey, StatusFilter, TaskQuery};
use taskdeck_store::store::TaskStore;

use super::render::{print_json, task_json, task_line, tasks_json};

/// Fields accepted by `task add`.
pub struct AddArgs {
    pub title: String,
    pub description: Option<String>,
    pub due: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub project: Option<String>,
}

/// Fields accepted by `task edit`. Unset fields are left as they are.
pub struct EditArgs {
    pub title: Option<String>,
    pub description: Option<String>,
    pub clear_description: bool,
    pub due: Option<String>,
    pub clear_due: bool,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub clear_category: bool,
    pub project: Option<String>,
    pub clear_project: bool,
}

pub fn add(args: AddArgs) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;

    let draft = TaskDraft {
        title: args.title,
        description: args.description,
        due_date: args.due.as_deref().map(parse_date).transpose()?,
        priority: args
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?
            .unwrap_or_default(),
        category: args.category,
        project: resolve_project(&store, args.project.as_deref())?,
    };

    let task = store.create_task(draft).context("failed to add task")?;
    println!("Added task {} {}", task.id, task.title);
    Ok(())
}

pub fn edit(reference: String, args: EditArgs) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;
    let id = store.resolve_task(&reference)?.id.clone();

    let patch = TaskPatch {
        title: args.title,
        description: clearable(args.description, args.clear_description),
        due_date: clearable(parse_optional_date(args.due)?, args.clear_due),
        priority: args.priority.as_deref().map(str::parse::<Priority>).transpose()?,
        category: clearable(args.category, args.clear_category),
        project: clearable(
            resolve_project(&store, args.project.as_deref())?,
            args.clear_project,
        ),
        completed: None,
    };
    if patch.is_empty() {
        anyhow::bail!("nothing to change; pass at least one field");
    }

    let task = store.update_task(&id, patch).context("failed to edit task")?;
    println!("Updated task {} {}", task.id, task.title);
    Ok(())
}

pub fn set_completed(reference: String, completed: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;
    let task = store.resolve_task(&reference)?;
    let (id, title) = (task.id.clone(), task.title.clone());

    store.set_task_completion(&id, completed)?;
    let verb = if completed { "Completed" } else { "Reopened" };
    println!("{} task {} {}", verb, id, title);
    Ok(())
}

pub fn delete(reference: String) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;
    let id = store.resolve_task(&reference)?.id.clone();

    store.delete_task(&id)?;
    println!("Deleted task {}", id);
    Ok(())
}

pub fn show(reference: String, json: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let store = ws.open_store()?;
    let task = store.resolve_task(&reference)?;

    if json {
        return print_json(&task_json(&store, task)?);
    }

    println!("task {}", task.id);
    println!("Title:    {}", task.title);
    println!(
        "Status:   {}",
        if task.completed { "completed" } else { "pending" }
    );
    println!("Priority: {}", task.priority);
    if let Some(due) = task.due_date {
        println!("Due:      {}", due);
    }
    if let Some(category) = &task.category {
        println!("Category: {}", category);
    }
    if let Some(project) = &task.project {
        println!(
            "Project:  {} ({})",
            store.project_name(project).unwrap_or("?"),
            project
        );
    }
    if let Some(description) = &task.description {
        println!();
        println!("    {}", description);
    }
    Ok(())
}

pub fn list(search: Option<String>, status: String, sort: String, json: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let store = ws.open_store()?;

    let query = TaskQuery {
        search: search.unwrap_or_default(),
        status: status.parse::<StatusFilter>()?,
        sort: sort.parse::<SortKey>()?,
    };
    let results = query::filter_and_sort(store.tasks(), &query);

    if json {
        return print_json(&tasks_json(&store, &results)?);
    }

    if results.is_empty() {
        println!("No tasks match.");
        return Ok(());
    }
    for task in results {
        println!("{}", task_line(&store, task));
    }
    Ok(())
}

fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

fn parse_optional_date(raw: Option<String>) -> Result<Option<NaiveDate>> {
    Ok(raw.as_deref().map(parse_date).transpose()?)
}

fn resolve_project<B: Backend>(
    store: &TaskStore<B>,
    reference: Option<&str>,
) -> Result<Option<EntityId>> {
    reference
        .map(|r| {
            store
                .resolve_project(r)
                .map(|p| p.id.clone())
                .with_context(|| format!("cannot resolve project '{}'", r))
        })
        .transpose()
}
