use anyhow::Result;

use super::render::print_json;

pub fn add(name: String) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;
    let name = store.add_category(&name)?;
    println!("Added category '{}'", name);
    Ok(())
}

pub fn delete(name: String) -> Result<()> {
    let ws = super::open_workspace()?;
    let mut store = ws.open_store()?;
    let cleared = store.delete_category(&name)?;
    println!("Deleted category '{}' (cleared from {} tasks)", name, cleared);
    Ok(())
}

pub fn list(json: bool) -> Result<()> {
    let ws = super::open_workspace()?;
    let store = ws.open_store()?;

    if json {
        return print_json(&serde_json::to_value(store.categories())?);
    }

    if store.categories().is_empty() {
        println!("No categories yet.");
        return Ok(());
    }
    for name in store.categories().iter() {
        let used = store
            .tasks()
            .iter()
            .filter(|t| t.category.as_deref() == Some(name))
            .count();
        println!("{}  ({} tasks)", name, used);
    }
    Ok(())
}
