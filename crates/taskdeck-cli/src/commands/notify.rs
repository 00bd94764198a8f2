use anyhow::Result;
use taskdeck_core::calendar;
use taskdeck_store::query;

/// Print the overdue/due-soon count, the value behind the notification badge.
pub fn run(json: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let store = ws.open_store()?;
    let soon = ws.config().due_soon_days;
    let count = query::overdue_or_due_soon_count(store.tasks(), calendar::today(), soon);

    if json {
        println!("{}", serde_json::json!({ "count": count, "dueSoonDays": soon }));
    } else if count == 0 {
        println!("Nothing overdue or due in the next {} days.", soon);
    } else {
        println!(
            "{} task{} overdue or due in the next {} days.",
            count,
            if count == 1 { "" } else { "s" },
            soon
        );
    }
    Ok(())
}
