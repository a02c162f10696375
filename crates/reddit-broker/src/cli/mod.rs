//! Operator command line for inspecting and exercising the provider

mod args;
mod handlers;

pub use args::{Args, Commands};

use crate::error::BrokerError;
use std::process::ExitCode;

/// Default log filter when neither `-v` nor `RUST_LOG` is given
pub const DEFAULT_LOG_FILTER: &str = "reddit_broker=warn";

/// Exit status for a policy rejection, kept apart from generic failures
pub const EXIT_ACCESS_DENIED: u8 = 3;

/// Map a command failure to the process exit status
pub fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<BrokerError>() {
        Some(BrokerError::AccessDenied) => ExitCode::from(EXIT_ACCESS_DENIED),
        _ => ExitCode::FAILURE,
    }
}
