//! Contact form and session token handlers.

use melo_client::{CatalogClient, ContactMessage, TokenStore};
use melo_core::AppConfig;

/// Send a contact form message.
///
/// # Errors
///
/// Returns an error if a required field is blank or the backend rejects the
/// message.
pub(crate) async fn run_contact(config: &AppConfig, message: ContactMessage) -> anyhow::Result<()> {
    if let Some(field) = message.missing_field() {
        anyhow::bail!("--{field} must not be empty");
    }
    let client = CatalogClient::new(config)?;
    client.send_contact_message(&message).await?;
    println!("message sent, we will get back to you at {}", message.email);
    Ok(())
}

/// Log in and persist the token pair.
///
/// # Errors
///
/// Returns an error if the credentials are rejected or the token file cannot
/// be written.
pub(crate) async fn run_login(
    config: &AppConfig,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let client = CatalogClient::new(config)?;
    let store = TokenStore::new(&config.token_path);
    let stored = client.login(&store, username, password).await?;
    println!(
        "logged in as {username}; tokens saved to {} at {}",
        store.path().display(),
        stored.saved_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    Ok(())
}

/// Remove the stored token pair.
///
/// # Errors
///
/// Returns an error if the token file exists but cannot be removed.
pub(crate) fn run_logout(config: &AppConfig) -> anyhow::Result<()> {
    TokenStore::new(&config.token_path).clear()?;
    println!("logged out");
    Ok(())
}
