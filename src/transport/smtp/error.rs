//! Error and result type for the SMTP transport

use self::Error::*;
use std::{
    error::Error as StdError,
    fmt::{self, Display, Formatter},
};

/// An enum of all error kinds.
#[derive(Debug)]
pub enum Error {
    /// The message could not be turned into a MIME message
    Message(lettre::error::Error),
    /// Connection, TLS, authentication or delivery failure
    Smtp(lettre::transport::smtp::Error),
}

impl Error {
    /// Returns true if the server rejected the message or the connection
    /// with a permanent (5xx) reply
    pub fn is_permanent(&self) -> bool {
        matches!(self, Smtp(err) if err.is_permanent())
    }

    /// Returns true if the server replied with a transient (4xx) error
    pub fn is_transient(&self) -> bool {
        matches!(self, Smtp(err) if err.is_transient())
    }
}

impl Display for Error {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Message(ref err) => write!(fmt, "cannot build message: {err}"),
            Smtp(ref err) => err.fmt(fmt),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match *self {
            Message(ref err) => Some(err),
            Smtp(ref err) => Some(err),
        }
    }
}

impl From<lettre::error::Error> for Error {
    fn from(err: lettre::error::Error) -> Error {
        Message(err)
    }
}

impl From<lettre::transport::smtp::Error> for Error {
    fn from(err: lettre::transport::smtp::Error) -> Error {
        Smtp(err)
    }
}
