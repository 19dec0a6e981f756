//! Provider settings lookup.
//!
//! Server parameters are resolved from a JSON list of provider entries,
//! keyed by mail domain. The entry supplies host, port, socket type, and a
//! login-name template in which `%EMAILADDRESS%` stands for the full
//! address.

use std::path::Path;

use mailpane_imap::Security;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Placeholder in the login-name template.
const EMAIL_PLACEHOLDER: &str = "%EMAILADDRESS%";

/// One provider entry from the settings file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderSettings {
    /// Mail domains this entry covers.
    pub domains: Vec<String>,
    /// IMAP server hostname.
    pub hostname: String,
    /// IMAP server port.
    pub port: u16,
    /// Socket type, e.g. "SSL" or "plain".
    pub socket_type: String,
    /// Login-name template, usually `%EMAILADDRESS%`.
    pub user_name: String,
}

/// Connection parameters resolved for one address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAccount {
    /// IMAP server hostname.
    pub host: String,
    /// IMAP server port.
    pub port: u16,
    /// Transport security.
    pub security: Security,
    /// The name to log in with.
    pub login_name: String,
}

/// Resolves mail addresses to provider settings.
#[derive(Debug, Clone, Default)]
pub struct SettingsResolver {
    providers: Vec<ProviderSettings>,
}

impl SettingsResolver {
    /// Creates a resolver from provider entries.
    #[must_use]
    pub fn new(providers: Vec<ProviderSettings>) -> Self {
        Self { providers }
    }

    /// Loads a resolver from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        let providers: Vec<ProviderSettings> = serde_json::from_str(json)?;
        Ok(Self::new(providers))
    }

    /// Loads a resolver from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Resolves connection parameters for a mail address.
    ///
    /// Domain matching is case-insensitive. An address without an `@` has
    /// no domain and therefore cannot resolve.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigNotFound`] if no entry covers the address's
    /// domain, and [`Error::Config`] if the matching entry has a socket
    /// type the engine does not speak.
    pub fn resolve(&self, email: &str) -> Result<ResolvedAccount> {
        let domain = email
            .rsplit_once('@')
            .map(|(_, d)| d.trim())
            .filter(|d| !d.is_empty())
            .ok_or_else(|| Error::ConfigNotFound(email.to_string()))?;

        let provider = self
            .providers
            .iter()
            .find(|p| p.domains.iter().any(|d| d.eq_ignore_ascii_case(domain)))
            .ok_or_else(|| Error::ConfigNotFound(domain.to_string()))?;

        let security = parse_socket_type(&provider.socket_type)?;
        let login_name = provider.user_name.replace(EMAIL_PLACEHOLDER, email);

        Ok(ResolvedAccount {
            host: provider.hostname.clone(),
            port: provider.port,
            security,
            login_name,
        })
    }
}

fn parse_socket_type(socket_type: &str) -> Result<Security> {
    match socket_type.trim().to_ascii_uppercase().as_str() {
        "SSL" | "TLS" => Ok(Security::Tls),
        "PLAIN" | "NONE" => Ok(Security::Plain),
        other => Err(Error::Config(format!("unsupported socket type: {other}"))),
    }
}
