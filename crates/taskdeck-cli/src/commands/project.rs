use anyhow::{Context, Result};
use taskdeck_core::model::{ProjectDraft, ProjectPatch};

use super::render::print_json;

pub fn add(name: String, description: Option<String>) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;

    let project = store
        .create_project(ProjectDraft { name, description })
        .context("failed to add project")?;
    println!("Added project {} {}", project.id, project.name);
    Ok(())
}

pub fn edit(
    reference: String,
    name: Option<String>,
    description: Option<String>,
    clear_description: bool,
) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;
    let id = store.resolve_project(&reference)?.id.clone();

    let patch = ProjectPatch {
        name,
        description: if clear_description {
            Some(None)
        } else {
            description.map(Some)
        },
    };
    if patch == ProjectPatch::default() {
        anyhow::bail!("nothing to change; pass --name or --desc");
    }

    match store.update_project(&id, patch).context("failed to edit project")? {
        Some(project) => println!("Updated project {} {}", project.id, project.name),
        None => println!("Project {} no longer exists", id),
    }
    Ok(())
}

pub fn delete(reference: String) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;
    let project = store.resolve_project(&reference)?;
    let (id, name) = (project.id.clone(), project.name.clone());

    let cascaded = store.delete_project(&id)?;
    println!(
        "Deleted project {} {} ({} task{} removed)",
        id,
        name,
        cascaded,
        if cascaded == 1 { "" } else { "s" }
    );
    Ok(())
}

pub fn list(json: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let store = ws.open_store()?;
    let projects = store.projects_with_stats();

    if json {
        let entries: Vec<_> = projects
            .iter()
            .map(|(project, stats)| {
                serde_json::json!({
                    "id": project.id.as_str(),
                    "name": project.name,
                    "description": project.description,
                    "tasksCount": stats.tasks_count,
                    "completedTasks": stats.completed_tasks,
                })
            })
            .collect();
        return print_json(&serde_json::Value::Array(entries));
    }

    if projects.is_empty() {
        println!("No projects yet.");
        return Ok(());
    }
    for (i, (project, stats)) in projects.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("project {}", project.id);
        println!("Name:  {}", project.name);
        println!(
            "Tasks: {} ({} completed, {}%)",
            stats.tasks_count,
            stats.completed_tasks,
            stats.percent_complete()
        );
        if let Some(description) = &project.description {
            println!();
            println!("    {}", description);
        }
    }
    Ok(())
}
