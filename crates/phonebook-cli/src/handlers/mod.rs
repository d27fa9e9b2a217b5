//! Command handlers that delegate to AppCore.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, command) -> Result<(), CliError>`
//! - Thin wrappers that call AppCore and format the result for the terminal
//!
//! Handlers should NOT access repositories directly or contain business
//! logic; validation and hierarchy rules live in the core services.

pub mod contact;
pub mod dept;
pub mod paths;
