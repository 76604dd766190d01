//! Share command implementation.

use crate::cli::ShareArgs;
use crate::config::Profile;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use estimai_client::share_url;
use estimai_domain::CorrelationId;

/// Execute the share command.
pub fn execute_share(args: ShareArgs, profile: &Profile, formatter: &Formatter) -> Result<()> {
    let url = link_for(&args, profile)?;
    println!("{}", formatter.share_link(&url));
    Ok(())
}

fn link_for(args: &ShareArgs, profile: &Profile) -> Result<String> {
    let id = CorrelationId::parse(&args.id).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    let origin = args.origin.as_deref().unwrap_or_else(|| profile.share_origin());
    Ok(share_url(origin, &id))
}
