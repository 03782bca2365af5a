use anyhow::Context;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::OutputFormat;
use crate::config::ServiceConfig;

pub fn handle(
    config: &ServiceConfig,
    subject: &str,
    admin: bool,
    hours: i64,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let secret = config
        .jwt_secret
        .as_deref()
        .context("JWT_SECRET must be set to mint tokens")?;

    let claims = Claims::new(subject, admin, hours);
    let token = generate_jwt(&claims, secret)?;

    match output_format {
        OutputFormat::Json => {
            let body = json!({
                "success": true,
                "data": { "token": token, "subject": subject, "admin": admin, "expires_at": claims.exp }
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
