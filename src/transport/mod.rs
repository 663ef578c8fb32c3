//! ### Sending Messages
//!
//! A [`ComposedMessage`] is delivered by a [`Transport`]. The following
//! transports are available:
//!
//! * The [`SmtpTransport`](smtp::SmtpTransport) opens an SMTP connection described by the
//!   message's session and delivers the message over it.
//! * The [`StubTransport`](stub::StubTransport) keeps every message it is handed and returns a
//!   fixed result. It is useful for testing.

use crate::ComposedMessage;

pub mod smtp;
pub mod stub;

/// Blocking Transport method for composed messages
pub trait Transport {
    /// Response produced by the Transport
    type Ok;
    /// Error produced by the Transport
    type Error;

    /// Sends the message
    fn send(&self, message: &ComposedMessage) -> Result<Self::Ok, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Ok = T::Ok;
    type Error = T::Error;

    fn send(&self, message: &ComposedMessage) -> Result<Self::Ok, Self::Error> {
        (**self).send(message)
    }
}
