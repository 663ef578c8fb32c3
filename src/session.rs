//! Transport session derived from the settings

use std::{
    fmt::{self, Debug, Display, Formatter},
    time::Duration,
};

use lettre::transport::smtp::authentication::Credentials;

use crate::{
    config::{self, Settings},
    error::Error,
};

/// Default host when `mail.smtp.host` is not set
pub const DEFAULT_HOST: &str = "localhost";
/// Default port for plain and opportunistic connections
pub const SMTP_PORT: u16 = 25;
/// Default port for connections requiring STARTTLS
pub const SUBMISSION_PORT: u16 = 587;
/// Default port for implicit TLS connections
pub const SUBMISSIONS_PORT: u16 = 465;

/// User name and password handed to the SMTP server
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct CredentialProvider {
    username: String,
    password: String,
}

impl CredentialProvider {
    /// Create a `CredentialProvider` from username and password
    pub fn new<U: Into<String>, P: Into<String>>(username: U, password: P) -> CredentialProvider {
        CredentialProvider {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Debug for CredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialProvider")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl From<&CredentialProvider> for Credentials {
    fn from(provider: &CredentialProvider) -> Self {
        Credentials::new(provider.username.clone(), provider.password.clone())
    }
}

/// How the connection to the SMTP server is secured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Security {
    /// Plain text connection
    None,
    /// Upgrade with STARTTLS if the server offers it
    Opportunistic,
    /// Upgrade with STARTTLS, fail if the server does not offer it
    StartTls,
    /// Implicit TLS from the first byte
    Tls,
}

impl Security {
    fn from_settings(settings: &Settings) -> Security {
        if settings.get_bool(config::SMTP_SSL_ENABLE) {
            Security::Tls
        } else if settings.get_bool(config::SMTP_STARTTLS_REQUIRED) {
            Security::StartTls
        } else if settings.get_bool(config::SMTP_STARTTLS_ENABLE) {
            Security::Opportunistic
        } else {
            Security::None
        }
    }

    /// Port used when none is configured
    pub fn default_port(self) -> u16 {
        match self {
            Security::None | Security::Opportunistic => SMTP_PORT,
            Security::StartTls => SUBMISSION_PORT,
            Security::Tls => SUBMISSIONS_PORT,
        }
    }
}

impl Display for Security {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Security::None => "none",
            Security::Opportunistic => "opportunistic STARTTLS",
            Security::StartTls => "STARTTLS",
            Security::Tls => "TLS",
        })
    }
}

/// Everything a transport needs to reach the SMTP server
///
/// The descriptor is either anonymous or authenticated depending only on
/// `mail.smtp.auth`; transports apply [`SessionDescriptor::credentials`]
/// as they find it.
///
/// # Examples
///
/// ```
/// use attachment_mailer::{SessionDescriptor, Settings};
///
/// # fn main() -> Result<(), attachment_mailer::Error> {
/// let settings: Settings = [
///     ("mail.smtp.host", "smtp.example.com"),
///     ("mail.smtp.auth", "true"),
///     ("mail.auth.username", "user"),
///     ("mail.auth.password", "secret"),
/// ]
/// .into_iter()
/// .collect();
///
/// let session = SessionDescriptor::build(&settings)?;
/// assert_eq!(session.host(), "smtp.example.com");
/// assert_eq!(session.credentials().map(|c| c.username()), Some("user"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    host: String,
    port: u16,
    security: Security,
    timeout: Option<Duration>,
    credentials: Option<CredentialProvider>,
}

impl SessionDescriptor {
    /// Derives the session from `settings`
    ///
    /// Fails if authentication is enabled without both a user name and a
    /// password, or if the port or timeout is not a number.
    pub fn build(settings: &Settings) -> Result<SessionDescriptor, Error> {
        let credentials = if settings.get_bool(config::SMTP_AUTH) {
            Some(CredentialProvider::new(
                settings.require(config::AUTH_USERNAME)?,
                settings.require(config::AUTH_PASSWORD)?,
            ))
        } else {
            None
        };

        let security = Security::from_settings(settings);
        let port = settings
            .get_parsed(config::SMTP_PORT)?
            .unwrap_or_else(|| security.default_port());
        let timeout = settings
            .get_parsed(config::SMTP_TIMEOUT)?
            .map(Duration::from_millis);

        Ok(SessionDescriptor {
            host: settings
                .get(config::SMTP_HOST)
                .unwrap_or(DEFAULT_HOST)
                .to_owned(),
            port,
            security,
            timeout,
            credentials,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn security(&self) -> Security {
        self.security
    }

    /// Socket timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Credentials to authenticate with, `None` for anonymous sessions
    pub fn credentials(&self) -> Option<&CredentialProvider> {
        self.credentials.as_ref()
    }
}
