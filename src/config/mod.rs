//! Settings read from a `key=value` properties file.
//!
//! The format is the one of `java.util.Properties`. Each line holds one
//! entry. `=`, `:` or plain whitespace separates the key from the value,
//! whitespace around the key is ignored and lines starting with `#` or `!`
//! are comments. A line ending in `\` continues on the next one, and
//! `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\`-quoted characters are unescaped
//! in keys and values:
//!
//! ```text
//! # sender
//! mail.message.from=Sender <sender@example.com>
//! mail.message.text=Please find the report attached.\n\
//!     Regards
//!
//! mail.smtp.host=smtp.example.com
//! mail.smtp.starttls.required=true
//! mail.smtp.auth=true
//! mail.auth.username=sender
//! mail.auth.password=secret
//! ```
//!
//! Files are read as UTF-8. Input that is not valid UTF-8 is decoded as
//! ISO 8859-1, the encoding `Properties::load` assumes.

use std::{
    collections::BTreeMap,
    fmt::Display,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};

use chumsky::Parser;

use crate::error::{self, Error};

mod parsers;

/// Sender address of every message
pub const MESSAGE_FROM: &str = "mail.message.from";
/// Plain text body of every message
pub const MESSAGE_TEXT: &str = "mail.message.text";
/// Whether the SMTP server requires authentication
pub const SMTP_AUTH: &str = "mail.smtp.auth";
/// Authentication user name, required when [`SMTP_AUTH`] is enabled
pub const AUTH_USERNAME: &str = "mail.auth.username";
/// Authentication password, required when [`SMTP_AUTH`] is enabled
pub const AUTH_PASSWORD: &str = "mail.auth.password";
/// SMTP server host name
pub const SMTP_HOST: &str = "mail.smtp.host";
/// SMTP server port
pub const SMTP_PORT: &str = "mail.smtp.port";
/// Upgrade the connection with STARTTLS when the server offers it
pub const SMTP_STARTTLS_ENABLE: &str = "mail.smtp.starttls.enable";
/// Refuse to send unless the connection is upgraded with STARTTLS
pub const SMTP_STARTTLS_REQUIRED: &str = "mail.smtp.starttls.required";
/// Connect with implicit TLS
pub const SMTP_SSL_ENABLE: &str = "mail.smtp.ssl.enable";
/// Socket timeout, in milliseconds
pub const SMTP_TIMEOUT: &str = "mail.smtp.timeout";

/// An immutable set of named settings
///
/// Missing keys are never given an invented value: [`Settings::require`]
/// fails with a configuration error naming the key, and only boolean flags
/// fall back to `false`.
///
/// # Examples
///
/// ```
/// use attachment_mailer::Settings;
///
/// # fn main() -> Result<(), attachment_mailer::Error> {
/// let settings = Settings::parse("mail.smtp.auth = TRUE\nmail.message.from=a@x.com\n")?;
/// assert!(settings.get_bool("mail.smtp.auth"));
/// assert_eq!(settings.require("mail.message.from")?, "a@x.com");
/// assert!(settings.require("mail.message.text").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Reads the settings file at `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| error::config(format!("cannot open {}: {e}", path.display())))?;
        Settings::from_reader(file)
    }

    /// Reads settings from any source of `key=value` text
    ///
    /// The text is decoded as UTF-8, or as ISO 8859-1 if it is not valid
    /// UTF-8.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Settings, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(error::config)?;

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            // every byte is the code point of the same value in ISO 8859-1
            Err(e) => e.into_bytes().into_iter().map(char::from).collect(),
        };
        Settings::parse(&text)
    }

    /// Parses `key=value` text
    pub fn parse(text: &str) -> Result<Settings, Error> {
        let mut values = BTreeMap::new();

        for (number, line) in parsers::logical_lines(text) {
            let entry = parsers::line().parse(line.as_str()).map_err(|errs| {
                let detail = errs
                    .first()
                    .map(parsers::describe)
                    .unwrap_or_else(|| "expected `key=value`".to_owned());
                error::config(format!("line {number}, {detail}"))
            })?;

            if let Some((key, value)) = entry {
                values.insert(key, value);
            }
        }

        Ok(Settings { values })
    }

    /// Returns the value of `key`, if set
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value of `key`, failing if it is not set
    pub fn require(&self, key: &str) -> Result<&str, Error> {
        self.get(key)
            .ok_or_else(|| error::config_key(key, "missing required key"))
    }

    /// Returns `true` only if `key` is set to `true`, ignoring case
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Parses the value of `key`, if set
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>, Error>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(key)
            .map(|value| {
                value.trim().parse::<T>().map_err(|e| {
                    error::config_key(key, format!("invalid value '{value}': {e}"))
                })
            })
            .transpose()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no entry is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Settings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Settings {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Where a sender reads its settings from on each send
#[derive(Debug, Clone)]
pub enum SettingsSource {
    /// A properties file, read again on every send
    File(PathBuf),
    /// Settings provided by the caller
    Static(Settings),
}

impl SettingsSource {
    /// Produces a fresh copy of the settings
    pub fn load(&self) -> Result<Settings, Error> {
        match self {
            SettingsSource::File(path) => Settings::load(path),
            SettingsSource::Static(settings) => Ok(settings.clone()),
        }
    }
}

impl From<PathBuf> for SettingsSource {
    fn from(path: PathBuf) -> Self {
        SettingsSource::File(path)
    }
}

impl From<&Path> for SettingsSource {
    fn from(path: &Path) -> Self {
        SettingsSource::File(path.to_owned())
    }
}

impl From<Settings> for SettingsSource {
    fn from(settings: Settings) -> Self {
        SettingsSource::Static(settings)
    }
}
