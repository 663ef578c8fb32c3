//! Send a preconfigured email with a single attachment.
//!
//! A send is a straight line: the settings are loaded, a session is derived
//! from them, a two part message (plain text, then the attachment) is
//! composed, and the message is handed to a transport. SMTP, TLS and the MIME
//! encoding itself are provided by [lettre](https://lettre.rs).
//!
//! ## Settings
//!
//! Settings are read from a `key=value` file (see [`config`]):
//!
//! ```text
//! mail.message.from=sender@example.com
//! mail.message.text=Please find the report attached.
//! mail.smtp.host=smtp.example.com
//! mail.smtp.starttls.required=true
//! mail.smtp.auth=true
//! mail.auth.username=sender
//! mail.auth.password=secret
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::fs::File;
//!
//! use attachment_mailer::MailSender;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sender = MailSender::new("mail.properties");
//!
//! let mut report = File::open("report.pdf")?;
//! sender.send_mail_with_attachment(
//!     "receiver@example.com",
//!     "Monthly report",
//!     "report.pdf",
//!     &mut report,
//! )?;
//! # Ok(())
//! # }
//! ```
//!
//! Each step can be used on its own: [`Settings`] loads the configuration,
//! [`SessionDescriptor::build`] derives the server and credentials,
//! [`MessageComposer::compose`] validates and assembles the message and any
//! [`Transport`] delivers it.

#![forbid(unsafe_code)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod message;
mod sender;
pub mod session;
pub mod transport;

pub use crate::{
    config::{Settings, SettingsSource},
    error::Error,
    message::{AttachmentPayload, ComposedMessage, MessageComposer, Part},
    sender::MailSender,
    session::{CredentialProvider, Security, SessionDescriptor},
    transport::Transport,
};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;
