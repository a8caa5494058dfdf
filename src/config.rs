//! Environment configuration.

use anyhow::Context;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    /// User id granted catalog-management access. Unset means no admin.
    pub admin_user: Option<Uuid>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .map(|p| p.parse())
            .transpose()
            .context("PORT must be a port number")?
            .unwrap_or(3000);
        let admin_user = std::env::var("ADMIN_USER_ID")
            .ok()
            .map(|v| Uuid::parse_str(&v))
            .transpose()
            .context("ADMIN_USER_ID must be a UUID")?;
        Ok(Self { port, admin_user })
    }
}
