//! Poll command implementation.

use crate::cli::PollArgs;
use crate::commands::wait_for;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use estimai_client::{export_to, ClientConfig, EstimationFlow};
use estimai_domain::CorrelationId;
use std::path::Path;
use std::sync::Arc;

/// Execute the poll command.
pub async fn execute_poll(args: PollArgs, config: &ClientConfig, formatter: &Formatter) -> Result<()> {
    let id = CorrelationId::parse(&args.id).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    let flow = Arc::new(EstimationFlow::from_config(config)?);
    let estimation = wait_for(flow.spawn_poll(id), formatter).await?;

    println!("{}", formatter.format_estimation(&estimation, None)?);

    if let Some(dir) = args.export {
        let path = export_to(Path::new(&dir), &estimation)?;
        eprintln!("{}", formatter.success(&format!("Exported to {}", path.display())));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[tokio::test]
    async fn test_unsafe_id_rejected_before_polling() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        for id in ["../etc/passwd", "job?x=1", "job#top", ""] {
            let args = PollArgs { id: id.to_string(), export: None };
            let result = execute_poll(args, &ClientConfig::default(), &formatter).await;
            assert!(matches!(result, Err(CliError::InvalidInput(_))), "accepted {:?}", id);
        }
    }
}
