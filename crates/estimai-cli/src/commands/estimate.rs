//! Estimate command implementation.

use crate::cli::EstimateArgs;
use crate::commands::{read_request, wait_for};
use crate::error::Result;
use crate::output::Formatter;
use estimai_client::{export_to, ClientConfig, EstimationFlow};
use std::path::Path;
use std::sync::Arc;

/// Execute the estimate command.
pub async fn execute_estimate(args: EstimateArgs, config: &ClientConfig, formatter: &Formatter) -> Result<()> {
    let request = read_request(args.input)?;
    let flow = Arc::new(EstimationFlow::from_config(config)?);

    if !config.is_remote() {
        eprintln!("{}", formatter.info("No service configured; running in simulated mode"));
    }

    let estimation = wait_for(flow.spawn(request.clone()), formatter).await?;

    println!("{}", formatter.format_estimation(&estimation, Some(&request))?);

    if let Some(dir) = args.export {
        let path = export_to(Path::new(&dir), &estimation)?;
        eprintln!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }

    Ok(())
}
