//! The SMTP transport delivers a composed message to the relay server named by its session.
//!
//! The connection is opened for a single message: host, port, TLS mode,
//! timeout and credentials are all read from the [`SessionDescriptor`] the
//! message was composed with. The SMTP dialogue itself, STARTTLS and
//! authentication are handled by lettre.
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use attachment_mailer::{transport::smtp::SmtpTransport, MailSender};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let sender = MailSender::with_transport(Path::new("mail.properties"), SmtpTransport::new());
//! let mut pdf = std::fs::File::open("report.pdf")?;
//! sender.send_mail_with_attachment("receiver@example.com", "Report", "report.pdf", &mut pdf)?;
//! # Ok(())
//! # }
//! ```

use lettre::{
    transport::smtp::{
        client::{Tls, TlsParameters},
        response::Response,
    },
    Message, Transport as _,
};

pub use self::error::Error;
use crate::{
    session::{Security, SessionDescriptor},
    transport::Transport,
    ComposedMessage,
};

mod error;

/// Sends messages over SMTP with lettre
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpTransport;

impl SmtpTransport {
    pub fn new() -> SmtpTransport {
        SmtpTransport
    }

    /// Builds the lettre transport for `session`
    pub fn connect(&self, session: &SessionDescriptor) -> Result<lettre::SmtpTransport, Error> {
        let host = session.host();
        let mut builder = lettre::SmtpTransport::builder_dangerous(host).port(session.port());

        let tls = |host: &str| TlsParameters::new(host.to_owned());
        builder = match session.security() {
            Security::None => builder,
            Security::Opportunistic => builder.tls(Tls::Opportunistic(tls(host)?)),
            Security::StartTls => builder.tls(Tls::Required(tls(host)?)),
            Security::Tls => builder.tls(Tls::Wrapper(tls(host)?)),
        };

        if let Some(timeout) = session.timeout() {
            builder = builder.timeout(Some(timeout));
        }

        if let Some(credentials) = session.credentials() {
            builder = builder.credentials(credentials.into());
        }

        Ok(builder.build())
    }
}

impl Transport for SmtpTransport {
    type Ok = Response;
    type Error = Error;

    fn send(&self, message: &ComposedMessage) -> Result<Self::Ok, Self::Error> {
        let session = message.session();
        tracing::debug!(
            host = session.host(),
            port = session.port(),
            security = %session.security(),
            authenticated = session.credentials().is_some(),
            "connecting to SMTP server"
        );

        let email = Message::try_from(message)?;
        let response = self.connect(session)?.send(&email)?;

        tracing::debug!(code = %response.code(), "message accepted");
        Ok(response)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{MessageComposer, Settings};

    fn message(settings: &[(&str, &str)]) -> ComposedMessage {
        let settings: Settings = settings.iter().copied().collect();
        let session = SessionDescriptor::build(&settings).unwrap();
        let mut pdf: &[u8] = b"%PDF";
        MessageComposer::new()
            .compose(&session, "a@x.com", "Subj", "b@y.com", "hello", "file.pdf", &mut pdf)
            .unwrap()
    }

    #[test]
    fn unreachable_server() {
        let message = message(&[
            ("mail.smtp.host", "127.0.0.1"),
            ("mail.smtp.port", "1"),
            ("mail.smtp.timeout", "500"),
        ]);

        let err = SmtpTransport::new().send(&message).unwrap_err();
        assert!(matches!(err, Error::Smtp(_)), "{err:?}");
        assert!(!err.is_permanent());
    }

    #[test]
    fn connect_with_tls_modes() {
        for flag in [
            "mail.smtp.starttls.enable",
            "mail.smtp.starttls.required",
            "mail.smtp.ssl.enable",
        ] {
            let message = message(&[("mail.smtp.host", "smtp.example.com"), (flag, "true")]);
            assert!(SmtpTransport::new().connect(message.session()).is_ok(), "{flag}");
        }
    }
}
