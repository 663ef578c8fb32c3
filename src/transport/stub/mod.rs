//! The stub transport keeps the messages it is handed instead of sending them. It can be
//! useful for testing purposes.
//!
//! # Examples
//!
//! ```
//! use attachment_mailer::{
//!     transport::stub::StubTransport, MailSender, Settings, SettingsSource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings: Settings = [
//!     ("mail.message.from", "a@x.com"),
//!     ("mail.message.text", "hello"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let transport = StubTransport::new_ok();
//! let sender = MailSender::with_transport(SettingsSource::Static(settings), &transport);
//!
//! let mut pdf: &[u8] = b"%PDF";
//! sender.send_mail_with_attachment("b@y.com", "Subj", "file.pdf", &mut pdf)?;
//! assert_eq!(transport.messages().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::{
    error::Error as StdError,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use crate::{transport::Transport, ComposedMessage};

/// An error returned by the stub transport
#[non_exhaustive]
#[derive(Debug, Copy, Clone)]
pub struct Error;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("stub error")
    }
}

impl StdError for Error {}

/// This transport records the messages and returns the given response
#[derive(Debug, Clone)]
pub struct StubTransport {
    response: Result<(), Error>,
    message_log: Arc<Mutex<Vec<ComposedMessage>>>,
}

impl StubTransport {
    /// Creates a new transport that always returns the given response
    pub fn new(response: Result<(), Error>) -> StubTransport {
        StubTransport {
            response,
            message_log: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Creates a new transport that always returns a success response
    pub fn new_ok() -> StubTransport {
        Self::new(Ok(()))
    }

    /// Creates a new transport that always returns an error
    pub fn new_error() -> StubTransport {
        Self::new(Err(Error))
    }

    /// Return all the messages sent so far, failed sends included
    pub fn messages(&self) -> Vec<ComposedMessage> {
        self.message_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Transport for StubTransport {
    type Ok = ();
    type Error = Error;

    fn send(&self, message: &ComposedMessage) -> Result<Self::Ok, Self::Error> {
        tracing::debug!(to = %message.to(), subject = message.subject(), "stub transport");

        self.message_log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());
        self.response
    }
}
