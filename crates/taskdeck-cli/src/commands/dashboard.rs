use anyhow::Result;
use taskdeck_core::calendar;
use taskdeck_store::query;

use super::render::{print_json, task_line, tasks_json};

pub fn run(json: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let store = ws.open_store()?;
    let config = ws.config();
    let summary = query::dashboard(&store, calendar::today(), config);

    if json {
        return print_json(&serde_json::json!({
            "pending": summary.pending,
            "completed": summary.completed,
            "activeProjects": summary.active_projects,
            "notifications": summary.notifications,
            "upcoming": tasks_json(&store, &summary.upcoming)?,
        }));
    }

    println!("Pending:         {}", summary.pending);
    println!("Completed:       {}", summary.completed);
    println!("Active projects: {}", summary.active_projects);
    println!("Due soon:        {}", summary.notifications);
    println!();
    println!("Upcoming ({} days):", config.upcoming_window_days);
    if summary.upcoming.is_empty() {
        println!("  No upcoming tasks.");
    }
    for task in &summary.upcoming {
        println!("  {}", task_line(&store, task));
    }
    Ok(())
}
