//! Command implementations.

pub mod estimate;
pub mod poll;
pub mod profile;
pub mod share;
pub mod submit;

pub use self::estimate::execute_estimate;
pub use self::poll::execute_poll;
pub use self::profile::execute_profile;
pub use self::share::execute_share;
pub use self::submit::execute_submit;

use crate::cli::RequirementsInput;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use estimai_client::{Estimation, FlowHandle};
use estimai_domain::EstimationRequest;
use std::fs;
use std::io::{self, Read};

/// Build a request from the argument, a file or stdin.
pub(crate) fn read_request(input: RequirementsInput) -> Result<EstimationRequest> {
    let requirements = if input.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(file_path) = input.file {
        fs::read_to_string(file_path)?
    } else if let Some(text) = input.requirements {
        text
    } else {
        return Err(CliError::InvalidInput(
            "Provide requirements as an argument, --file or --stdin".to_string(),
        ));
    };

    EstimationRequest::new(&requirements, &input.info).map_err(|e| CliError::InvalidInput(e.to_string()))
}

/// Wait for a spawned flow, printing progress to stderr.
///
/// Ctrl+C drops the handle, which aborts the flow before its next fetch.
pub(crate) async fn wait_for(handle: FlowHandle, formatter: &Formatter) -> Result<Estimation> {
    let mut progress = handle.progress();
    let mut progress_open = true;
    let join = handle.join();
    tokio::pin!(join);

    loop {
        tokio::select! {
            outcome = &mut join => return Ok(outcome?),
            changed = progress.changed(), if progress_open => {
                if changed.is_err() {
                    progress_open = false;
                    continue;
                }
                let line = formatter.progress(&progress.borrow_and_update());
                eprintln!("{}", line);
            }
            _ = tokio::signal::ctrl_c() => {
                eprintln!("{}", formatter.warning("Estimation cancelled"));
                return Err(CliError::Cancelled);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(requirements: Option<&str>, info: &str) -> RequirementsInput {
        RequirementsInput {
            requirements: requirements.map(str::to_string),
            file: None,
            stdin: false,
            info: info.to_string(),
        }
    }

    #[test]
    fn test_request_from_argument() {
        let request = read_request(input(Some("  CRM  "), " 2 devs ")).unwrap();
        assert_eq!(request.requirements(), "CRM");
        assert_eq!(request.additional_info(), "2 devs");
    }

    #[test]
    fn test_request_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reqs.txt");
        fs::write(&path, "Sistema de reservas\n").unwrap();

        let mut args = input(None, "");
        args.file = Some(path.to_string_lossy().into_owned());

        assert_eq!(read_request(args).unwrap().requirements(), "Sistema de reservas");
    }

    #[test]
    fn test_missing_or_blank_requirements() {
        assert!(matches!(read_request(input(None, "")), Err(CliError::InvalidInput(_))));
        assert!(matches!(read_request(input(Some("   "), "x")), Err(CliError::InvalidInput(_))));
    }
}
