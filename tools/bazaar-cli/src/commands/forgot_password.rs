//! Password reset request.

use std::time::Duration;

use anyhow::Result;
use bazaar_auth::PasswordResetRequest;

use super::vendor::rejected;
use super::ForgotPasswordArgs;
use crate::context::Context;

/// Run the forgot-password command.
///
/// No email is actually sent; the confirmation arrives after the configured
/// delay.
pub async fn run(args: ForgotPasswordArgs, ctx: &Context) -> Result<()> {
    let request = PasswordResetRequest::new(args.email);
    if let Err(errors) = request.validate() {
        return rejected(errors, ctx);
    }

    let delay = Duration::from_millis(ctx.config.auth.password_reset_delay_ms);
    let spinner = ctx.output.spinner("Sending reset link...");
    tokio::time::sleep(delay).await;
    spinner.finish_and_clear();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "sent": true, "email": request.email }));
    } else {
        ctx.output
            .success(&format!("Reset link sent to {}", request.email));
        ctx.output.info("Check your inbox and follow the link to choose a new password.");
    }
    Ok(())
}
