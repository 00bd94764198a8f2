use anyhow::Result;
use serde_json::Value;
use taskdeck_core::calendar::format_date;
use taskdeck_core::model::Task;
use taskdeck_store::backend::Backend;
use taskdeck_store::store::TaskStore;

/// One-line summary: `[x] <id>  <title>  (due, priority, #category, @project)`.
pub fn task_line<B: Backend>(store: &TaskStore<B>, task: &Task) -> String {
    let mut meta = Vec::new();
    meta.push(match task.due_date {
        Some(d) => format!("due {}", format_date(d)),
        None => "no date".to_string(),
    });
    meta.push(task.priority.to_string());
    if let Some(category) = &task.category {
        meta.push(format!("#{}", category));
    }
    if let Some(project) = &task.project {
        meta.push(format!("@{}", store.project_name(project).unwrap_or("?")));
    }
    format!(
        "[{}] {}  {}  ({})",
        if task.completed { "x" } else { " " },
        task.id,
        task.title,
        meta.join(", ")
    )
}

/// The stored task record plus the resolved project name.
pub fn task_json<B: Backend>(store: &TaskStore<B>, task: &Task) -> Result<Value> {
    let mut value = serde_json::to_value(task)?;
    if let (Some(project), Value::Object(map)) = (&task.project, &mut value) {
        if let Some(name) = store.project_name(project) {
            map.insert("projectName".into(), Value::String(name.to_string()));
        }
    }
    Ok(value)
}

pub fn tasks_json<B: Backend>(store: &TaskStore<B>, tasks: &[&Task]) -> Result<Value> {
    Ok(Value::Array(
        tasks
            .iter()
            .map(|t| task_json(store, t))
            .collect::<Result<Vec<_>>>()?,
    ))
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
