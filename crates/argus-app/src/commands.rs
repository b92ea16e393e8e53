//! One-shot subcommands.

use std::io::Write;

use argus_ai::Session;
use argus_common::Result;
use argus_router::{KeyValueStore, Navigation, Router, IS_LOGGED_IN_KEY};
use tracing::info;

/// Print a streamed fragment immediately.
pub(crate) fn print_chunk(chunk: &str) {
    print!("{chunk}");
    let _ = std::io::stdout().flush();
}

pub async fn ask(mut session: Session, message: &str, stream: bool) -> Result<()> {
    if stream {
        let result = session.send_streaming(message, print_chunk).await;
        println!();
        result?;
    } else {
        println!("{}", session.send(message).await?);
    }
    Ok(())
}

pub async fn status(session: &Session) -> Result<()> {
    let available = session.check_status().await;
    println!(
        "model: {}\nAI service: {}",
        display_model(&session.config().model),
        if available { "available" } else { "unavailable" }
    );
    Ok(())
}

pub fn navigate(router: &Router, path: &str) -> Result<()> {
    let navigation = router.navigate(path)?;
    println!("{}", describe(&navigation));
    Ok(())
}

pub fn login(store: &impl KeyValueStore) -> Result<()> {
    store.set_item(IS_LOGGED_IN_KEY, "true")?;
    info!("login flag set");
    println!("logged in");
    Ok(())
}

pub fn logout(store: &impl KeyValueStore) -> Result<()> {
    store.remove_item(IS_LOGGED_IN_KEY)?;
    info!("login flag cleared");
    println!("logged out");
    Ok(())
}

pub(crate) fn display_model(model: &str) -> &str {
    if model.is_empty() {
        "<unset>"
    } else {
        model
    }
}

fn describe(navigation: &Navigation) -> String {
    let route = if navigation.was_redirected() {
        format!("{} -> {}", navigation.requested, navigation.path)
    } else {
        navigation.path.clone()
    };
    match navigation.page() {
        Some(page) => format!("{route} (view: {})", page.view.unwrap_or("-")),
        None => format!("{route} (not found)"),
    }
}
