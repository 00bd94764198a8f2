//! Read-only views over the task collection.
//!
//! Nothing here mutates or touches storage. Every date-dependent view takes
//! `today` explicitly so results are deterministic.

use chrono::NaiveDate;
use std::cmp::Reverse;
use std::str::FromStr;

use taskdeck_core::calendar::{within_days, YearMonth};
use taskdeck_core::error::CoreError;
use taskdeck_core::model::Task;

use crate::backend::Backend;
use crate::config::Config;
use crate::store::TaskStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn accepts(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.completed,
            Self::Pending => !task.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "completed" | "done" => Ok(Self::Completed),
            "pending" | "open" => Ok(Self::Pending),
            other => Err(CoreError::validation(
                "status",
                format!("must be all, completed or pending (got '{other}')"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep collection order.
    #[default]
    None,
    /// Ascending due date, undated tasks last.
    Date,
    /// High before medium before low; ties keep collection order.
    Priority,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "date" | "due" => Ok(Self::Date),
            "priority" => Ok(Self::Priority),
            other => Err(CoreError::validation(
                "sort",
                format!("must be none, date or priority (got '{other}')"),
            )),
        }
    }
}

/// Parameters of the full task list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Case-insensitive substring of title or description; empty matches all.
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
}

pub fn filter_and_sort<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    let needle = query.search.to_lowercase();
    let mut results: Vec<&Task> = tasks
        .iter()
        .filter(|t| query.status.accepts(t) && t.matches_lowercase(&needle))
        .collect();

    // `sort_by_key` is stable, which the priority ordering relies on.
    match query.sort {
        SortKey::None => {}
        SortKey::Date => results.sort_by_key(|t| (t.due_date.is_none(), t.due_date)),
        SortKey::Priority => results.sort_by_key(|t| Reverse(t.priority.weight())),
    }
    results
}

/// Open tasks due within `[today, today + window_days]`, soonest first, at
/// most `limit` of them.
pub fn upcoming(tasks: &[Task], today: NaiveDate, window_days: u32, limit: usize) -> Vec<&Task> {
    let mut results: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.completed)
        .filter(|t| t.due_date.is_some_and(|d| within_days(d, today, window_days)))
        .collect();
    results.sort_by_key(|t| t.due_date);
    results.truncate(limit);
    results
}

/// Open tasks that are overdue or due within `[today, today + soon_days]`.
pub fn overdue_or_due_soon_count(tasks: &[Task], today: NaiveDate, soon_days: u32) -> usize {
    tasks
        .iter()
        .filter(|t| !t.completed)
        .filter_map(|t| t.due_date)
        .filter(|&d| d < today || within_days(d, today, soon_days))
        .count()
}

pub fn tasks_on_date(tasks: &[Task], date: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.due_date == Some(date)).collect()
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub enum DayCell<'a> {
    /// Padding before the 1st so that weeks start on Monday.
    Blank,
    Day {
        date: NaiveDate,
        tasks: Vec<&'a Task>,
        is_today: bool,
    },
}

impl DayCell<'_> {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Blank => None,
            Self::Day { date, .. } => Some(*date),
        }
    }
}

/// Leading blanks followed by one cell per day of `month`.
pub fn month_grid(tasks: &[Task], month: YearMonth, today: NaiveDate) -> Vec<DayCell<'_>> {
    let blanks = month.leading_blanks() as usize;
    let days = month.days_in_month();
    let mut cells = Vec::with_capacity(blanks + days as usize);
    cells.extend(std::iter::repeat_with(|| DayCell::Blank).take(blanks));
    cells.extend((1..=days).filter_map(|day| month.day(day)).map(|date| DayCell::Day {
        date,
        tasks: tasks_on_date(tasks, date),
        is_today: date == today,
    }));
    cells
}

/// Dashboard summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard<'a> {
    pub pending: usize,
    pub completed: usize,
    pub active_projects: usize,
    pub upcoming: Vec<&'a Task>,
    /// Overdue or due-soon count, shown as the notification badge.
    pub notifications: usize,
}

pub fn dashboard<'a, B: Backend>(
    store: &'a TaskStore<B>,
    today: NaiveDate,
    config: &Config,
) -> Dashboard<'a> {
    let tasks = store.tasks();
    let completed = tasks.iter().filter(|t| t.completed).count();
    Dashboard {
        pending: tasks.len() - completed,
        completed,
        active_projects: store.projects().len(),
        upcoming: upcoming(
            tasks,
            today,
            config.upcoming_window_days,
            config.upcoming_limit,
        ),
        notifications: overdue_or_due_soon_count(tasks, today, config.due_soon_days),
    }
}
