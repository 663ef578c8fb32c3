//! Error and result type for sending a mail with an attachment

use std::{error::Error as StdError, fmt};

use crate::BoxError;

/// The errors that may occur while loading settings, composing or sending a mail
///
/// Every step of [`MailSender::send_mail_with_attachment`](crate::MailSender::send_mail_with_attachment)
/// fails with exactly one kind of error, which can be inspected with the `is_*` methods.
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
            }),
        }
    }

    /// Returns true if the settings could not be read or are incomplete
    pub fn is_config(&self) -> bool {
        matches!(self.inner.kind, Kind::Config(_))
    }

    /// Returns true if the sender or recipient is not a valid email address
    pub fn is_address(&self) -> bool {
        matches!(self.inner.kind, Kind::Address(_))
    }

    /// Returns true if the attachment could not be read
    pub fn is_attachment_read(&self) -> bool {
        matches!(self.inner.kind, Kind::AttachmentRead)
    }

    /// Returns true if the transport failed to deliver the message
    pub fn is_transport(&self) -> bool {
        matches!(self.inner.kind, Kind::Transport)
    }

    /// Returns the settings key at fault, if the error is about a single key
    pub fn key(&self) -> Option<&str> {
        match self.inner.kind {
            Kind::Config(Some(ref key)) => Some(key),
            _ => None,
        }
    }

    /// Returns the rejected input, if the error is an address error
    pub fn address(&self) -> Option<&str> {
        match self.inner.kind {
            Kind::Address(ref address) => Some(address),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    /// Unreadable settings source, or a missing or invalid key
    Config(Option<String>),
    /// Malformed `From` or `To` address
    Address(String),
    /// I/O failure or empty input while buffering the attachment
    AttachmentRead,
    /// Delivery failure reported by the transport
    Transport,
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("attachment_mailer::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::Config(None) => f.write_str("configuration error")?,
            Kind::Config(Some(ref key)) => write!(f, "configuration error for key `{key}`")?,
            Kind::Address(ref address) => write!(f, "invalid email address '{address}'")?,
            Kind::AttachmentRead => f.write_str("could not read attachment")?,
            Kind::Transport => f.write_str("transport error")?,
        };

        if let Some(ref e) = self.inner.source {
            write!(f, ": {e}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| {
            let r: &(dyn std::error::Error + 'static) = &**e;
            r
        })
    }
}

pub(crate) fn config<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Config(None), Some(e))
}

pub(crate) fn config_key<K: Into<String>, E: Into<BoxError>>(key: K, e: E) -> Error {
    Error::new(Kind::Config(Some(key.into())), Some(e))
}

pub(crate) fn address<A: Into<String>, E: Into<BoxError>>(address: A, e: E) -> Error {
    Error::new(Kind::Address(address.into()), Some(e))
}

pub(crate) fn attachment_read<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::AttachmentRead, Some(e))
}

pub(crate) fn transport<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Transport, Some(e))
}

#[cfg(test)]
mod test {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_names_the_key() {
        let err = config_key("mail.message.from", "missing required key");
        assert!(err.is_config());
        assert_eq!(err.key(), Some("mail.message.from"));
        assert_eq!(
            err.to_string(),
            "configuration error for key `mail.message.from`: missing required key"
        );
    }

    #[test]
    fn display_names_the_address() {
        let err = address("not-an-address", "missing @");
        assert!(err.is_address());
        assert!(!err.is_config());
        assert_eq!(err.address(), Some("not-an-address"));
        assert_eq!(err.key(), None);
        assert_eq!(
            err.to_string(),
            "invalid email address 'not-an-address': missing @"
        );
    }

    #[test]
    fn source_is_kept() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stream closed");
        let err = attachment_read(io);
        assert!(err.is_attachment_read());

        let source = err.source().unwrap();
        let io = source.downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
