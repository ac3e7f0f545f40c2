//! Console entry point.

use dishstock_app::{actions, config, console, watcher};
use dishstock_store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dishstock_observability::init();

    let db_path = config::database_path()?;
    let store = Store::open(&db_path).await?;

    println!("DishStock - dishware stock management");
    println!("Database: {}", db_path.display());

    let user = match actions::login(&store).await {
        Ok(user) => user,
        Err(err) if err.is::<console::InputClosed>() => return Ok(()),
        Err(err) => return Err(err),
    };
    println!("Welcome, {} ({}).", user.username, user.role);

    watcher::spawn(store.clone());

    match actions::main_menu(&store, &user).await {
        Ok(()) => {}
        Err(err) if err.is::<console::InputClosed>() => {}
        Err(err) => return Err(err),
    }
    println!("Bye.");
    Ok(())
}
