use crate::context::{AppContext, read_dataset};
use crate::display;
use crate::{DatasetArgs, GlobalArgs};
use anyhow::{Result, bail};
use holomine_application::Completion;

pub async fn execute(global: &GlobalArgs, dataset: &DatasetArgs) -> Result<()> {
    let context = AppContext::load(global)?;
    let input = read_dataset(dataset).await?;
    let workflow = context.workflow();

    display::print_input(&input);
    workflow.select_input(input).await;

    match workflow.encrypt().await? {
        Completion::Applied(result) => display::print_encryption(&result),
        Completion::Superseded => bail!("Encryption response was superseded"),
    }
    Ok(())
}
