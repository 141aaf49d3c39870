use crate::context::{AppContext, read_dataset};
use crate::display;
use crate::{DatasetArgs, GlobalArgs};
use anyhow::{Context, Result};
use holomine_core::MiningAlgorithm;

pub async fn execute(global: &GlobalArgs, dataset: &DatasetArgs, algorithm: &str) -> Result<()> {
    // Reject a bad identifier before uploading anything.
    MiningAlgorithm::parse(algorithm)?;

    let context = AppContext::load(global)?;
    let input = read_dataset(dataset).await?;
    let workflow = context.workflow();

    display::print_input(&input);
    workflow.select_input(input).await;

    let encrypted = workflow
        .encrypt()
        .await?
        .applied()
        .context("Encryption response was superseded")?;
    display::print_encryption(&encrypted);

    let mined = workflow
        .mine(algorithm)
        .await?
        .applied()
        .context("Mining response was superseded")?;
    display::print_mining(&mined);
    display::print_trust_notice(context.client.base_url());

    tracing::debug!(
        "[run] Finished in stage {}",
        workflow.snapshot().await.stage()
    );
    Ok(())
}
