//! CLI command implementations

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Input, Password};
use std::fs;
use std::path::PathBuf;

use crate::api::workers::WorkerRegistration;
use crate::api::{self, reviews::NewReview, ApiClient};
use crate::auth::{
    validate_password, Credentials, Registration, Route, SessionManager, TokenStore,
};
use crate::cli::{
    confirm, error, info, print_category_table, print_page_footer, print_user_detail,
    print_worker_table, spinner, success, warn, OutputFormat, WorkerAction,
};
use crate::config::{self, Config};
use crate::error::Error;

/// Initialize a new finder.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("finder.toml");

    if config_path.exists() {
        warn("finder.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created finder.toml");
    info("Point api.base_url at your Finder API, then sign in with 'finder login'");

    Ok(())
}

/// Sign in and persist the session
pub async fn login(email: Option<String>) -> Result<()> {
    let config = config::load_config()?;
    let manager = build_session(&config)?;
    let theme = ColorfulTheme::default();

    let email = match email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    let credentials = Credentials { email, password };

    let pb = spinner("Signing in...");
    let result = manager.sign_in(&credentials).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            let session = manager.snapshot();
            let name = session
                .user()
                .map(|user| user.name.clone())
                .unwrap_or_default();
            success(&format!("Signed in as {}", name));
            info("Browse categories with 'finder categories'");
            Ok(())
        }
        Err(e) if e.is_auth_rejected() => {
            error("Incorrect email or password");
            Err(e.into())
        }
        Err(e) => {
            error(&format!("Sign-in failed: {}", e));
            Err(e.into())
        }
    }
}

/// Sign out and discard the persisted session
pub async fn logout() -> Result<()> {
    let config = config::load_config()?;
    let manager = build_session(&config)?;

    manager.sign_out().await;
    success("Signed out");

    Ok(())
}

/// Create a new account
pub async fn register() -> Result<()> {
    let config = config::load_config()?;
    let manager = build_session(&config)?;
    let theme = ColorfulTheme::default();

    let name: String = Input::with_theme(&theme)
        .with_prompt("Name")
        .interact_text()?;
    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()?;
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;
    let confirmation = Password::with_theme(&theme)
        .with_prompt("Confirm password")
        .interact()?;

    if let Err(e) = validate_password(&password, &confirmation) {
        error(&e.to_string());
        return Err(e.into());
    }

    let mut routes = manager.routes();
    let registration = Registration {
        name,
        email,
        password,
    };

    let pb = spinner("Creating account...");
    manager.sign_up(&registration).await;
    pb.finish_and_clear();

    // sign_up reports nothing back; the login cue is how success shows up
    match routes.try_recv() {
        Ok(Route::Login) => {
            success("Account created!");
            info("Sign in with 'finder login'");
        }
        _ => warn("Registration did not complete; check the log for details"),
    }

    Ok(())
}

/// Show the currently signed-in user
pub async fn whoami() -> Result<()> {
    let config = config::load_config()?;
    let manager = restore_session(&config).await?;

    match manager.snapshot().user() {
        Some(user) => print_user_detail(user),
        None => info("Not signed in. Use 'finder login'."),
    }

    Ok(())
}

/// Browse service categories
pub async fn categories(page: u32, size: Option<u32>, format: OutputFormat) -> Result<()> {
    let config = config::load_config()?;
    let manager = restore_session(&config).await?;
    let size = size.unwrap_or(config.browse.page_size);

    let pb = spinner("Fetching categories...");
    let result = api::categories::find_all(manager.client(), page, size).await;
    pb.finish_and_clear();

    let listing = match result {
        Ok(listing) => listing,
        Err(e) => {
            error(&format!("Failed to fetch categories: {}", e));
            return Err(e.into());
        }
    };

    match format {
        OutputFormat::Table => {
            print_category_table(&listing.content);
            print_page_footer(page, listing.total_pages(size));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing.content)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&listing.content)?);
        }
    }

    Ok(())
}

/// Browse workers within a category
pub async fn workers(
    category: &str,
    page: u32,
    size: Option<u32>,
    with_stats: bool,
    format: OutputFormat,
) -> Result<()> {
    let config = config::load_config()?;
    let manager = restore_session(&config).await?;
    let size = size.unwrap_or(config.browse.page_size);

    let pb = spinner(&format!("Searching {} workers...", category));
    let result = api::workers::find_by_category(manager.client(), category, page, size).await;
    pb.finish_and_clear();

    let listing = match result {
        Ok(listing) => listing,
        Err(e) => {
            error(&format!("Failed to fetch workers: {}", e));
            return Err(e.into());
        }
    };

    match format {
        OutputFormat::Table => {
            let mut rows = Vec::with_capacity(listing.content.len());
            for worker in &listing.content {
                let stats = if with_stats {
                    match api::reviews::stats(manager.client(), worker.worker_id).await {
                        Ok(stats) => Some(stats),
                        Err(e) => {
                            tracing::warn!("No review stats for worker {}: {}", worker.worker_id, e);
                            None
                        }
                    }
                } else {
                    None
                };
                rows.push((worker.clone(), stats));
            }

            print_worker_table(&rows, with_stats);
            print_page_footer(page, listing.total_pages(size));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&listing.content)?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&listing.content)?);
        }
    }

    Ok(())
}

/// Rate a worker
pub async fn rate(worker_id: i64, rating: u8, comment: Option<String>) -> Result<()> {
    let config = config::load_config()?;
    let manager = restore_session(&config).await?;

    let session = manager.snapshot();
    let Some(user) = session.user() else {
        error("You must be signed in to rate a worker");
        info("Sign in with 'finder login'");
        return Err(Error::Validation("not signed in".to_string()).into());
    };

    let review = NewReview {
        user: user.id,
        worker: worker_id,
        rating,
        comment: comment.unwrap_or_default(),
    };

    let pb = spinner("Submitting review...");
    let result = api::reviews::submit(manager.client(), &review).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success("Thanks for your review!");
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to submit review: {}", e));
            Err(e.into())
        }
    }
}

/// Register yourself as a worker
pub async fn join() -> Result<()> {
    let config = config::load_config()?;
    let manager = restore_session(&config).await?;
    let theme = ColorfulTheme::default();

    // The category has to exist server-side, so pick from the live list
    let pb = spinner("Fetching categories...");
    let result = api::categories::find_all(manager.client(), 0, 100).await;
    pb.finish_and_clear();

    let categories = match result {
        Ok(listing) => listing.content,
        Err(e) => {
            error(&format!("Failed to fetch categories: {}", e));
            return Err(e.into());
        }
    };

    if categories.is_empty() {
        warn("No categories are open for registration right now");
        return Ok(());
    }

    let names: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
    let picked = FuzzySelect::with_theme(&theme)
        .with_prompt("Category")
        .items(&names)
        .default(0)
        .interact()?;

    let full_name: String = Input::with_theme(&theme)
        .with_prompt("Full name")
        .interact_text()?;
    let cpf: String = Input::with_theme(&theme)
        .with_prompt("CPF")
        .interact_text()?;
    let birth_date: String = Input::with_theme(&theme)
        .with_prompt("Birth date (YYYY-MM-DD)")
        .interact_text()?;
    let phone: String = Input::with_theme(&theme)
        .with_prompt("Phone")
        .interact_text()?;
    let email: String = Input::with_theme(&theme)
        .with_prompt("Email")
        .interact_text()?;
    let city: String = Input::with_theme(&theme)
        .with_prompt("City")
        .interact_text()?;
    let summary: String = Input::with_theme(&theme)
        .with_prompt("Short summary of your services")
        .interact_text()?;
    let experience: String = Input::with_theme(&theme)
        .with_prompt("Years of experience")
        .interact_text()?;
    let photo: String = Input::with_theme(&theme)
        .with_prompt("Photo file path")
        .interact_text()?;

    let photo = PathBuf::from(photo);
    if !photo.exists() {
        error("Photo file not found");
        return Err(Error::Validation("photo file not found".to_string()).into());
    }

    let registration = WorkerRegistration {
        full_name,
        cpf,
        birth_date,
        category_name: categories[picked].name.clone(),
        phone,
        email,
        city,
        summary,
        experience,
        photo,
    };

    let pb = spinner("Submitting registration...");
    let result = api::workers::register(manager.client(), &registration).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success("Welcome to the team! Your registration has been submitted.");
            Ok(())
        }
        Err(e) => {
            error(&format!("Registration failed: {}", e));
            Err(e.into())
        }
    }
}

/// Moderate worker registrations
pub async fn worker(action: WorkerAction) -> Result<()> {
    let config = config::load_config()?;
    let manager = restore_session(&config).await?;

    match action {
        WorkerAction::Accept { worker_id } => {
            let pb = spinner("Accepting worker...");
            let result = api::workers::accept(manager.client(), worker_id).await;
            pb.finish_and_clear();

            match result {
                Ok(()) => {
                    success(&format!("Accepted worker {}", worker_id));
                    Ok(())
                }
                Err(e) => {
                    error(&format!("Failed to accept worker: {}", e));
                    Err(e.into())
                }
            }
        }
        WorkerAction::Delete { worker_id, force } => {
            if !force {
                let message = format!("Delete worker {} from the directory?", worker_id);
                if !confirm(&message) {
                    info("Aborted");
                    return Ok(());
                }
            }

            let pb = spinner("Deleting worker...");
            let result = api::workers::remove(manager.client(), worker_id).await;
            pb.finish_and_clear();

            match result {
                Ok(()) => {
                    success(&format!("Deleted worker {}", worker_id));
                    Ok(())
                }
                Err(e) => {
                    error(&format!("Failed to delete worker: {}", e));
                    Err(e.into())
                }
            }
        }
    }
}

/// Wire up the session stack from configuration
fn build_session(config: &Config) -> Result<SessionManager> {
    let store = TokenStore::new(&config.session.token_file);
    let client = ApiClient::new(&config.api, &store)?;
    Ok(SessionManager::new(client, store))
}

/// Build the session stack and restore the persisted session, once, before
/// anything renders session-dependent state
async fn restore_session(config: &Config) -> Result<SessionManager> {
    let manager = build_session(config)?;
    manager.restore().await;
    Ok(manager)
}
