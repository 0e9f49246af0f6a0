//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::api::categories::Category;
use crate::api::reviews::ReviewStats;
use crate::api::workers::Worker;
use crate::auth::User;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Spinner shown while a request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        // Compile-time constant template, panicking here means a typo in this file
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Invalid spinner template - this is a bug in the codebase"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print a table of categories
pub fn print_category_table(categories: &[Category]) {
    if categories.is_empty() {
        info("No categories found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Id").fg(Color::Cyan),
            Cell::new("Category").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
        ]);

    for category in categories {
        table.add_row(vec![
            Cell::new(category.id),
            Cell::new(&category.name).fg(Color::Green),
            Cell::new(category.description.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{table}");
}

/// Print a table of workers, with review aggregates when available
pub fn print_worker_table(workers: &[(Worker, Option<ReviewStats>)], with_stats: bool) {
    if workers.is_empty() {
        info("No workers found in this category. Try again later or pick a different one.");
        return;
    }

    let mut header = vec![
        Cell::new("Id").fg(Color::Cyan),
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("City").fg(Color::Cyan),
        Cell::new("Experience").fg(Color::Cyan),
        Cell::new("Summary").fg(Color::Cyan),
    ];
    if with_stats {
        header.push(Cell::new("Rating").fg(Color::Cyan));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for (worker, stats) in workers {
        let experience = worker
            .experience
            .map(|years| format!("{} years", years))
            .unwrap_or_else(|| "-".to_string());

        let mut row = vec![
            Cell::new(worker.worker_id),
            Cell::new(&worker.full_name).fg(Color::Green),
            Cell::new(worker.city.as_deref().unwrap_or("-")),
            Cell::new(experience),
            Cell::new(worker.summary.as_deref().unwrap_or("-")),
        ];
        if with_stats {
            row.push(Cell::new(format_stats(stats.as_ref())));
        }

        table.add_row(row);
    }

    println!("{table}");
}

/// Format review aggregates as e.g. "4.5 ★ (12)"
pub fn format_stats(stats: Option<&ReviewStats>) -> String {
    match stats {
        Some(stats) => format!("{:.1} ★ ({})", stats.average_rating, stats.total_reviews),
        None => "-".to_string(),
    }
}

/// Print a pagination footer
pub fn print_page_footer(page: u32, total_pages: u64) {
    if total_pages > 1 {
        println!(
            "  {} {} of {}",
            "Page".bold(),
            page + 1,
            total_pages
        );
    }
}

/// Print the signed-in user's details
pub fn print_user_detail(user: &User) {
    success(&format!("Signed in as {}", user.name));
    println!("  {} {}", "Id:".bold(), user.id);
    if let Some(email) = &user.email {
        println!("  {} {}", "Email:".bold(), email);
    }
    if let Some(role) = &user.role {
        println!("  {} {}", "Role:".bold(), role);
    }
}

/// Confirm an action with the user
pub fn confirm(message: &str) -> bool {
    use std::io::{self, Write};

    print!("{} [y/N] ", message);
    io::stdout().flush().unwrap();

    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();

    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}
