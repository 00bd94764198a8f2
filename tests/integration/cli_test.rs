use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn taskdeck(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("taskdeck").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("TASKDECK_DIR")
        .env_remove("TASKDECK_LOG");
    cmd
}

fn init_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    taskdeck(&dir).arg("init").assert().success();
    dir
}

fn json_output(dir: &TempDir, args: &[&str]) -> Value {
    let output = taskdeck(dir).args(args).arg("--json").output().unwrap();
    assert!(output.status.success(), "{:?} failed: {:?}", args, output);
    serde_json::from_slice(&output.stdout).unwrap()
}

fn task_ids(dir: &TempDir) -> Vec<String> {
    json_output(dir, &["task", "list"])
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn init_creates_workspace_dir() {
    let dir = TempDir::new().unwrap();
    taskdeck(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains(".taskdeck"));

    assert!(dir.path().join(".taskdeck").is_dir());
    assert!(dir.path().join(".taskdeck/data").is_dir());
    assert!(dir.path().join(".taskdeck/config.json").is_file());
}

#[test]
fn init_twice_fails() {
    let dir = init_workspace();
    taskdeck(&dir)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn commands_outside_workspace_fail() {
    let dir = TempDir::new().unwrap();
    taskdeck(&dir)
        .args(["task", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a taskdeck workspace"));
}

#[test]
fn workspace_dir_env_overrides_cwd() {
    let workspace = init_workspace();
    let elsewhere = TempDir::new().unwrap();

    taskdeck(&elsewhere)
        .env("TASKDECK_DIR", workspace.path())
        .args(["task", "add", "From elsewhere"])
        .assert()
        .success();

    assert_eq!(task_ids(&workspace).len(), 1);
}

#[test]
fn add_then_list_task() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args([
            "task",
            "add",
            "Write report",
            "--due",
            "2025-03-10",
            "--priority",
            "high",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added task _"));

    taskdeck(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Write report"))
        .stdout(predicate::str::contains("due 2025-03-10"))
        .stdout(predicate::str::contains("high"));
}

#[test]
fn empty_list_says_so() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks match."));
}

#[test]
fn blank_title_is_rejected() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
    assert!(task_ids(&dir).is_empty());
}

#[test]
fn bad_due_date_is_rejected() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "add", "Bad date", "--due", "10/03/2025"])
        .assert()
        .failure();
    assert!(task_ids(&dir).is_empty());
}

#[test]
fn done_and_reopen_toggle_status() {
    let dir = init_workspace();
    taskdeck(&dir).args(["task", "add", "Toggle me"]).assert().success();
    let id = task_ids(&dir).remove(0);

    taskdeck(&dir)
        .args(["task", "done", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed task"));
    let completed = json_output(&dir, &["task", "list", "--status", "completed"]);
    assert_eq!(completed.as_array().unwrap().len(), 1);

    taskdeck(&dir)
        .args(["task", "reopen", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reopened task"));
    let pending = json_output(&dir, &["task", "list", "--status", "pending"]);
    assert_eq!(pending.as_array().unwrap().len(), 1);
}

#[test]
fn edit_updates_and_clears_fields() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "add", "Draft", "--desc", "first pass", "--due", "2025-04-01"])
        .assert()
        .success();
    let id = task_ids(&dir).remove(0);

    taskdeck(&dir)
        .args(["task", "edit", &id, "--title", "Final", "--clear-due"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task"));

    let task = json_output(&dir, &["task", "show", &id]);
    assert_eq!(task["title"], "Final");
    assert_eq!(task["description"], "first pass");
    assert!(task["dueDate"].is_null());
}

#[test]
fn edit_without_fields_fails() {
    let dir = init_workspace();
    taskdeck(&dir).args(["task", "add", "Untouched"]).assert().success();
    let id = task_ids(&dir).remove(0);

    taskdeck(&dir)
        .args(["task", "edit", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to change"));
}

#[test]
fn delete_task_removes_it() {
    let dir = init_workspace();
    taskdeck(&dir).args(["task", "add", "Short lived"]).assert().success();
    let id = task_ids(&dir).remove(0);

    taskdeck(&dir)
        .args(["task", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task"));
    assert!(task_ids(&dir).is_empty());
}

#[test]
fn unknown_task_reference_fails() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "done", "_nothere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("task not found"));
}

#[test]
fn search_and_priority_sort() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "add", "Buy milk", "--priority", "low"])
        .assert()
        .success();
    taskdeck(&dir)
        .args(["task", "add", "Call mom", "--desc", "about MILK order", "--priority", "high"])
        .assert()
        .success();
    taskdeck(&dir).args(["task", "add", "Walk dog"]).assert().success();

    let found = json_output(&dir, &["task", "list", "--search", "milk", "--sort", "priority"]);
    let titles: Vec<_> = found
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Call mom", "Buy milk"]);
}

#[test]
fn invalid_status_filter_fails() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "list", "--status", "sometimes"])
        .assert()
        .failure();
}

#[test]
fn project_delete_cascades_to_tasks() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["project", "add", "Website", "--desc", "Relaunch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added project _"));
    taskdeck(&dir)
        .args(["task", "add", "Design", "--project", "website"])
        .assert()
        .success();
    taskdeck(&dir)
        .args(["task", "add", "Build", "--project", "Website"])
        .assert()
        .success();
    taskdeck(&dir).args(["task", "add", "Unrelated"]).assert().success();

    let projects = json_output(&dir, &["project", "list"]);
    assert_eq!(projects[0]["name"], "Website");
    assert_eq!(projects[0]["tasksCount"], 2);
    assert_eq!(projects[0]["completedTasks"], 0);

    taskdeck(&dir)
        .args(["project", "delete", "Website"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 tasks removed"));

    let remaining = json_output(&dir, &["task", "list"]);
    assert_eq!(remaining.as_array().unwrap().len(), 1);
    assert_eq!(remaining[0]["title"], "Unrelated");
}

#[test]
fn task_with_unknown_project_fails() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "add", "Orphan", "--project", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nowhere"));
    assert!(task_ids(&dir).is_empty());
}

#[test]
fn project_edit_renames() {
    let dir = init_workspace();
    taskdeck(&dir).args(["project", "add", "Old name"]).assert().success();
    taskdeck(&dir)
        .args(["project", "edit", "Old name", "--name", "New name"])
        .assert()
        .success();

    taskdeck(&dir)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("New name"))
        .stdout(predicate::str::contains("Old name").not());
}

#[test]
fn duplicate_category_fails() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["category", "add", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added category 'Work'"));
    taskdeck(&dir)
        .args(["category", "add", "Work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let categories = json_output(&dir, &["category", "list"]);
    assert_eq!(categories, serde_json::json!(["Work"]));
}

#[test]
fn category_delete_clears_tasks() {
    let dir = init_workspace();
    taskdeck(&dir).args(["category", "add", "Errands"]).assert().success();
    taskdeck(&dir)
        .args(["task", "add", "Post office", "--category", "Errands"])
        .assert()
        .success();

    taskdeck(&dir)
        .args(["category", "delete", "Errands"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleared from 1 tasks"));

    let tasks = json_output(&dir, &["task", "list"]);
    assert!(tasks[0]["category"].is_null());
    assert_eq!(json_output(&dir, &["category", "list"]), serde_json::json!([]));
}

#[test]
fn dashboard_counts_tasks_and_projects() {
    let dir = init_workspace();
    taskdeck(&dir).args(["project", "add", "Home"]).assert().success();
    taskdeck(&dir)
        .args(["task", "add", "Fix sink", "--project", "Home"])
        .assert()
        .success();
    taskdeck(&dir).args(["task", "add", "Read book"]).assert().success();
    let id = task_ids(&dir).remove(1);
    taskdeck(&dir).args(["task", "done", &id]).assert().success();

    let summary = json_output(&dir, &["dashboard"]);
    assert_eq!(summary["pending"], 1);
    assert_eq!(summary["completed"], 1);
    assert_eq!(summary["activeProjects"], 1);
    assert!(summary["upcoming"].is_array());

    taskdeck(&dir)
        .arg("dashboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pending:"))
        .stdout(predicate::str::contains("Upcoming (7 days):"));
}

#[test]
fn calendar_shows_requested_month() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "add", "Taxes", "--due", "2025-03-10"])
        .assert()
        .success();

    taskdeck(&dir)
        .args(["calendar", "--month", "2025-03"])
        .assert()
        .success()
        .stdout(predicate::str::contains("March 2025"))
        .stdout(predicate::str::contains(" 10+"))
        .stdout(predicate::str::contains("2025-03-10 [ ] Taxes (medium)"));

    let month = json_output(&dir, &["calendar", "--month", "2025-03"]);
    assert_eq!(month["month"], "2025-03");
    assert_eq!(month["leadingBlanks"], 5);
    assert_eq!(month["previous"], "2025-02");
    assert_eq!(month["next"], "2025-04");
    let days = month["days"].as_array().unwrap();
    assert_eq!(days.len(), 31);
    assert_eq!(days[9]["date"], "2025-03-10");
    assert_eq!(days[9]["tasks"][0]["title"], "Taxes");
}

#[test]
fn calendar_rejects_bad_month() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["calendar", "--month", "2025-13"])
        .assert()
        .failure();
}

#[test]
fn notify_counts_overdue_tasks() {
    let dir = init_workspace();
    taskdeck(&dir)
        .args(["task", "add", "Long overdue", "--due", "2000-01-01"])
        .assert()
        .success();
    taskdeck(&dir)
        .args(["task", "add", "Far future", "--due", "2999-01-01"])
        .assert()
        .success();

    let notify = json_output(&dir, &["notify"]);
    assert_eq!(notify["count"], 1);
    assert_eq!(notify["dueSoonDays"], 2);

    taskdeck(&dir)
        .arg("notify")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 task overdue"));
}

#[test]
fn data_files_use_camel_case_keys() {
    let dir = init_workspace();
    taskdeck(&dir).args(["project", "add", "Site"]).assert().success();
    taskdeck(&dir)
        .args(["task", "add", "Ship", "--due", "2025-05-01", "--project", "Site"])
        .assert()
        .success();

    let data = dir.path().join(".taskdeck/data");
    let tasks: Value =
        serde_json::from_str(&std::fs::read_to_string(data.join("tasks.json")).unwrap()).unwrap();
    assert_eq!(tasks[0]["dueDate"], "2025-05-01");

    let projects: Value =
        serde_json::from_str(&std::fs::read_to_string(data.join("projects.json")).unwrap())
            .unwrap();
    assert_eq!(projects[0]["tasksCount"], 1);
    assert_eq!(projects[0]["completedTasks"], 0);
}
