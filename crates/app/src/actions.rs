//! Interactive menu flows.
//!
//! Store errors surface as printed messages and the menus carry on; only
//! I/O failures and a closed stdin abort a flow.

use std::path::PathBuf;

use chrono::{Days, Utc};

use dishstock_auth::{NewUser, Role, User};
use dishstock_core::ArticleId;
use dishstock_inventory::{
    Article, ArticleDraft, CATEGORIES, DEFAULT_UNIT, EXIT_REASONS, EntryDraft, ExitDraft,
    MovementKind, UNITS,
};
use dishstock_reports::ReportKind;
use dishstock_store::Store;

use crate::console;

/// Prompt for credentials until a pair checks out.
pub async fn login(store: &Store) -> anyhow::Result<User> {
    loop {
        let username = console::read_line("Username: ")?;
        let password = console::read_line("Password: ")?;
        match store.authenticate(&username, &password).await? {
            Some(user) => {
                tracing::info!(username = %user.username, "login");
                return Ok(user);
            }
            None => println!("Invalid credentials, try again."),
        }
    }
}

/// The top-level menu. Returns when the user quits.
pub async fn main_menu(store: &Store, user: &User) -> anyhow::Result<()> {
    loop {
        println!();
        println!("==== DishStock ({}) ====", user.username);
        println!(" 1) Articles");
        println!(" 2) Record stock entry");
        println!(" 3) Record stock exit");
        println!(" 4) Movement history");
        println!(" 5) Dashboard");
        println!(" 6) Generate report");
        println!(" 7) Users");
        println!(" q) Quit");

        match console::read_line("> ")?.as_str() {
            "1" => articles_menu(store).await?,
            "2" => record_entry(store).await?,
            "3" => record_exit(store, user).await?,
            "4" => movement_history(store).await?,
            "5" => dashboard(store).await?,
            "6" => generate_report(store).await?,
            "7" => users_menu(store).await?,
            "q" | "Q" => return Ok(()),
            "" => {}
            other => println!("Unknown choice: {other}"),
        }
    }
}

async fn articles_menu(store: &Store) -> anyhow::Result<()> {
    loop {
        println!();
        println!("-- Articles --");
        println!(" 1) List all");
        println!(" 2) List by category");
        println!(" 3) Add");
        println!(" 4) Edit");
        println!(" 5) Delete");
        println!(" 0) Back");

        match console::read_line("> ")?.as_str() {
            "1" => print_articles(&store.list_articles().await?),
            "2" => list_by_category(store).await?,
            "3" => add_article(store).await?,
            "4" => edit_article(store).await?,
            "5" => delete_article(store).await?,
            "0" => return Ok(()),
            "" => {}
            other => println!("Unknown choice: {other}"),
        }
    }
}

fn print_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles.");
        return;
    }
    println!(
        "{:>4}  {:<28} {:<10} {:>7} {:<6} {:>10} {:>5}  {}",
        "ID", "Name", "Category", "Qty", "Unit", "Price", "Min", "Status"
    );
    for article in articles {
        println!(
            "{:>4}  {:<28} {:<10} {:>7} {:<6} {:>10.2} {:>5}  {}",
            article.id.as_i64(),
            clip(&article.name, 28),
            clip(&article.category, 10),
            article.quantity,
            clip(&article.unit, 6),
            article.unit_price,
            article.min_threshold,
            article.stock_level(),
        );
    }
}

async fn list_by_category(store: &Store) -> anyhow::Result<()> {
    let categories = store.list_categories().await?;
    if categories.is_empty() {
        println!("No articles.");
        return Ok(());
    }
    println!("Categories: {}", categories.join(", "));
    let filter = console::read_line("Category (empty for all): ")?;

    let articles = store.list_articles_by_category().await?;
    let filtered: Vec<Article> = if filter.is_empty() {
        articles
    } else {
        articles
            .into_iter()
            .filter(|a| a.category.eq_ignore_ascii_case(&filter))
            .collect()
    };
    print_articles(&filtered);
    Ok(())
}

async fn add_article(store: &Store) -> anyhow::Result<()> {
    println!();
    println!("-- Add article --");
    let name = console::read_required("Name: ")?;
    println!("Categories: {}", CATEGORIES.join(", "));
    let category = console::read_string_or("Category [Other]: ", "Other")?;
    let quantity = console::read_i64_or("Starting quantity [0]: ", 0)?;
    println!("Units: {}", UNITS.join(", "));
    let unit = console::read_string_or(&format!("Unit [{DEFAULT_UNIT}]: "), DEFAULT_UNIT)?;
    let unit_price = console::read_f64_or("Unit price [0.00]: ", 0.0)?;
    let min_threshold = console::read_i64_or("Low-stock threshold [10]: ", 10)?;

    match store
        .insert_article(ArticleDraft {
            name,
            category,
            quantity,
            unit,
            unit_price,
            min_threshold,
        })
        .await
    {
        Ok(article) => println!("Created article {} ({}).", article.id, article.name),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn edit_article(store: &Store) -> anyhow::Result<()> {
    let id = ArticleId::new(console::read_i64("Article ID: ")?);
    let Some(current) = store.get_article(id).await? else {
        println!("No article with ID {id}.");
        return Ok(());
    };

    println!(
        "Editing '{}'. Empty input keeps the current value.",
        current.name
    );
    let name = console::read_string_or(&format!("Name [{}]: ", current.name), &current.name)?;
    let category = console::read_string_or(
        &format!("Category [{}]: ", current.category),
        &current.category,
    )?;
    let quantity = console::read_i64_or(
        &format!("Quantity [{}]: ", current.quantity),
        current.quantity,
    )?;
    let unit = console::read_string_or(&format!("Unit [{}]: ", current.unit), &current.unit)?;
    let unit_price = console::read_f64_or(
        &format!("Unit price [{:.2}]: ", current.unit_price),
        current.unit_price,
    )?;
    let min_threshold = console::read_i64_or(
        &format!("Low-stock threshold [{}]: ", current.min_threshold),
        current.min_threshold,
    )?;

    match store
        .update_article(
            id,
            ArticleDraft {
                name,
                category,
                quantity,
                unit,
                unit_price,
                min_threshold,
            },
        )
        .await
    {
        Ok(article) => println!("Updated article {}.", article.id),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn delete_article(store: &Store) -> anyhow::Result<()> {
    let id = ArticleId::new(console::read_i64("Article ID: ")?);
    let Some(article) = store.get_article(id).await? else {
        println!("No article with ID {id}.");
        return Ok(());
    };

    let armed = console::confirm(&format!(
        "Delete '{}' and its whole movement history? [y/N] ",
        article.name
    ))?;
    if !armed {
        println!("Kept.");
        return Ok(());
    }

    match store.delete_article(id).await {
        Ok(()) => println!("Deleted '{}'.", article.name),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

/// List the articles and prompt for one. `None` means the pick was abandoned.
async fn pick_article(store: &Store) -> anyhow::Result<Option<Article>> {
    let articles = store.list_articles().await?;
    if articles.is_empty() {
        println!("No articles yet; add one first.");
        return Ok(None);
    }
    for article in &articles {
        println!(
            "{:>4}  {:<28} on hand: {}",
            article.id.as_i64(),
            clip(&article.name, 28),
            article.quantity
        );
    }
    let id = ArticleId::new(console::read_i64("Article ID: ")?);
    match store.get_article(id).await? {
        Some(article) => Ok(Some(article)),
        None => {
            println!("No article with ID {id}.");
            Ok(None)
        }
    }
}

async fn record_entry(store: &Store) -> anyhow::Result<()> {
    println!();
    println!("-- Record stock entry --");
    let Some(article) = pick_article(store).await? else {
        return Ok(());
    };

    let today = Utc::now().date_naive();
    let quantity = console::read_i64("Quantity received: ")?;
    let date = console::read_date_or(&format!("Date [{today}]: "), today)?;
    let supplier = console::read_optional("Supplier (optional): ")?;
    let total_price = console::read_f64_or("Total price [0.00]: ", 0.0)?;
    let comment = console::read_optional("Comment (optional): ")?;

    match store
        .record_entry(EntryDraft {
            article_id: article.id,
            quantity,
            date,
            supplier,
            total_price,
            comment,
        })
        .await
    {
        Ok(entry) => println!(
            "Recorded entry of {} x '{}'; on hand: {}.",
            entry.quantity,
            article.name,
            article.quantity + entry.quantity
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn record_exit(store: &Store, user: &User) -> anyhow::Result<()> {
    println!();
    println!("-- Record stock exit --");
    let Some(article) = pick_article(store).await? else {
        return Ok(());
    };

    let today = Utc::now().date_naive();
    let quantity = console::read_i64("Quantity taken: ")?;
    let date = console::read_date_or(&format!("Date [{today}]: "), today)?;
    println!("Reasons: {}", EXIT_REASONS.join(", "));
    let reason = console::read_string_or(
        &format!("Reason [{}]: ", EXIT_REASONS[0]),
        EXIT_REASONS[0],
    )?;
    let actor =
        console::read_string_or(&format!("Taken by [{}]: ", user.username), &user.username)?;
    let comment = console::read_optional("Comment (optional): ")?;

    match store
        .record_exit(ExitDraft {
            article_id: article.id,
            quantity,
            date,
            reason,
            actor: Some(actor),
            comment,
        })
        .await
    {
        Ok(exit) => println!(
            "Recorded exit of {} x '{}'; on hand: {}.",
            exit.quantity,
            article.name,
            article.quantity - exit.quantity
        ),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn movement_history(store: &Store) -> anyhow::Result<()> {
    println!();
    println!("-- Movement history --");
    let today = Utc::now().date_naive();
    let default_from = today - Days::new(30);
    let from = console::read_date_or(&format!("From [{default_from}]: "), default_from)?;
    let to = console::read_date_or(&format!("To [{today}]: "), today)?;

    let entries = store.list_entries_between(from, to).await?;
    let exits = store.list_exits_between(from, to).await?;

    println!();
    println!("Entries ({}):", entries.len());
    for entry in &entries {
        println!(
            "  {}  {:<28} +{:<6} {:<20} {:>10.2}",
            entry.date,
            clip(&entry.article_name, 28),
            entry.quantity,
            clip(entry.supplier.as_deref().unwrap_or("-"), 20),
            entry.total_price,
        );
    }
    println!();
    println!("Exits ({}):", exits.len());
    for exit in &exits {
        println!(
            "  {}  {:<28} -{:<6} {:<12} {}",
            exit.date,
            clip(&exit.article_name, 28),
            exit.quantity,
            clip(&exit.reason, 12),
            exit.actor.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}

async fn dashboard(store: &Store) -> anyhow::Result<()> {
    let today = Utc::now().date_naive();
    let stats = store.dashboard_stats(today).await?;

    println!();
    println!("-- Dashboard --");
    println!("Articles:          {}", stats.article_count);
    println!("Low stock:         {}", stats.low_stock_count);
    println!("Exhausted:         {}", stats.exhausted_count);
    println!("Total stock value: {:.2}", stats.total_stock_value);
    println!("Sales today:       {:.2}", stats.sales_today);

    let low = store.list_low_stock().await?;
    if !low.is_empty() {
        println!();
        println!("Alerts:");
        for article in &low {
            println!(
                "  {:<28} {} / threshold {} ({})",
                clip(&article.name, 28),
                article.quantity,
                article.min_threshold,
                article.stock_level(),
            );
        }
    }

    let feed = store.recent_movements(10).await?;
    if !feed.is_empty() {
        println!();
        println!("Recent movements:");
        for movement in &feed {
            let (tag, sign) = match movement.kind {
                MovementKind::Entry => ("IN ", '+'),
                MovementKind::Exit => ("OUT", '-'),
            };
            println!(
                "  {}  {}  {:<28} {}{}",
                movement.date,
                tag,
                clip(&movement.article_name, 28),
                sign,
                movement.quantity,
            );
        }
    }
    Ok(())
}

async fn generate_report(store: &Store) -> anyhow::Result<()> {
    println!();
    println!("-- Generate report --");
    println!(" 1) Inventory");
    println!(" 2) Movements");
    println!(" 3) Low stock");
    println!(" 0) Back");

    let kind = match console::read_line("> ")?.as_str() {
        "1" => ReportKind::Inventory,
        "2" => ReportKind::Movements,
        "3" => ReportKind::LowStock,
        _ => return Ok(()),
    };

    let default_name = dishstock_reports::default_file_name(Utc::now());
    let path = PathBuf::from(console::read_string_or(
        &format!("Output file [{default_name}]: "),
        &default_name,
    )?);

    match dishstock_reports::generate(store, kind, &path).await {
        Ok(()) => println!("Report written to {}.", path.display()),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

async fn users_menu(store: &Store) -> anyhow::Result<()> {
    loop {
        println!();
        println!("-- Users --");
        println!(" 1) List");
        println!(" 2) Add");
        println!(" 0) Back");

        match console::read_line("> ")?.as_str() {
            "1" => {
                for user in store.list_users().await? {
                    println!(
                        "{:>4}  {:<20} {}",
                        user.id.as_i64(),
                        clip(&user.username, 20),
                        user.role
                    );
                }
            }
            "2" => add_user(store).await?,
            "0" => return Ok(()),
            "" => {}
            other => println!("Unknown choice: {other}"),
        }
    }
}

async fn add_user(store: &Store) -> anyhow::Result<()> {
    let username = console::read_required("Username: ")?;
    let password = console::read_required("Password: ")?;
    let role = match console::read_string_or("Role (admin/standard) [standard]: ", "standard")?
        .as_str()
    {
        "admin" => Role::Admin,
        _ => Role::Standard,
    };

    match store
        .create_user(NewUser {
            username,
            password,
            role,
        })
        .await
    {
        Ok(user) => println!("Created user '{}' ({}).", user.username, user.role),
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_keeps_short_text_and_trims_long() {
        assert_eq!(clip("Plate", 10), "Plate");
        assert_eq!(clip("A very long article name", 10), "A very ...");
        assert_eq!(clip("exactly ten", 11), "exactly ten");
    }
}
