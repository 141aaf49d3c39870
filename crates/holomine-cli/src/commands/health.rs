use crate::GlobalArgs;
use crate::context::AppContext;
use anyhow::{Context, Result, bail};
use colored::Colorize;

pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let context = AppContext::load(global)?;
    let base_url = context.client.base_url().to_string();

    let health = context
        .client
        .health()
        .await
        .with_context(|| format!("Backend at {base_url} is unreachable"))?;

    if !health.is_running() {
        bail!("Backend at {base_url} reported status '{}'", health.status);
    }

    println!("{} {}", "✅ Backend is running at".green(), base_url);
    if let Some(encryption) = &health.encryption {
        println!("  {:<12} {}", "Encryption:".bold(), encryption);
    }
    if !health.algorithms.is_empty() {
        println!("  {:<12} {}", "Algorithms:".bold(), health.algorithms.join(", "));
    }
    if let Some(timestamp) = &health.timestamp {
        println!("  {:<12} {}", "Checked at:".bold(), timestamp);
    }
    Ok(())
}
