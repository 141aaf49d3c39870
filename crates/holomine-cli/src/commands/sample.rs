use anyhow::{Context, Result};
use colored::Colorize;
use holomine_infrastructure::export_sample_dataset;
use std::path::Path;

pub async fn execute(out: &Path) -> Result<()> {
    export_sample_dataset(out)
        .await
        .with_context(|| format!("Failed to write sample dataset to {}", out.display()))?;
    println!("{} {}", "✅ Sample dataset written to".green(), out.display());
    Ok(())
}
