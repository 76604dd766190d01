//! Submit command implementation.

use crate::cli::SubmitArgs;
use crate::commands::read_request;
use crate::error::Result;
use crate::output::Formatter;
use estimai_client::{ClientConfig, SubmissionClient};
use tracing::debug;

/// Execute the submit command.
pub async fn execute_submit(args: SubmitArgs, config: &ClientConfig, formatter: &Formatter) -> Result<()> {
    let request = read_request(args.input)?;
    let client = SubmissionClient::from_config(config)?;
    debug!("Submitting via {} transport", client.transport_name());

    let id = client.submit_request(&request).await?;

    println!("{}", formatter.submitted(&id));
    Ok(())
}
