use anyhow::Result;
use chrono::Datelike;
use taskdeck_core::calendar::{self, YearMonth};
use taskdeck_store::query::{self, DayCell};

use super::render::{print_json, tasks_json};

const WEEKDAYS: &str = " Mo  Tu  We  Th  Fr  Sa  Su";

pub fn run(month: Option<String>, json: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let store = ws.open_store()?;
    let today = calendar::today();
    let month = match month {
        Some(raw) => YearMonth::parse(&raw)?,
        None => YearMonth::of(today),
    };
    let grid = query::month_grid(store.tasks(), month, today);

    if json {
        let days = grid
            .iter()
            .filter_map(|cell| match cell {
                DayCell::Blank => None,
                DayCell::Day {
                    date,
                    tasks,
                    is_today,
                } => Some((date, tasks, is_today)),
            })
            .map(|(date, tasks, is_today)| {
                Ok(serde_json::json!({
                    "date": calendar::format_date(*date),
                    "isToday": is_today,
                    "tasks": tasks_json(&store, tasks)?,
                }))
            })
            .collect::<Result<Vec<_>>>()?;
        return print_json(&serde_json::json!({
            "month": month.to_string(),
            "leadingBlanks": month.leading_blanks(),
            "previous": month.pred().to_string(),
            "next": month.succ().to_string(),
            "days": days,
        }));
    }

    println!("{}", month.title());
    println!("{}", WEEKDAYS);
    // Each cell is 4 wide: day number, then '*' for today or '+' when tasks are due.
    for week in grid.chunks(7) {
        let line: String = week.iter().map(cell_text).collect();
        println!("{}", line.trim_end());
    }

    let mut any = false;
    for cell in &grid {
        if let DayCell::Day { date, tasks, .. } = cell {
            for task in tasks {
                if !any {
                    println!();
                    any = true;
                }
                let mark = if task.completed { "x" } else { " " };
                println!("{} [{}] {} ({})", date, mark, task.title, task.priority);
            }
        }
    }
    Ok(())
}

fn cell_text(cell: &DayCell<'_>) -> String {
    match cell {
        DayCell::Blank => "    ".to_string(),
        DayCell::Day {
            date,
            tasks,
            is_today,
        } => {
            let mark = if *is_today {
                '*'
            } else if !tasks.is_empty() {
                '+'
            } else {
                ' '
            };
            format!("{:>3}{}", date.day(), mark)
        }
    }
}
