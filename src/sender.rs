//! Send orchestration: settings, session, composition and delivery in one call

use std::{io::Read, path::PathBuf};

use crate::{
    config::{self, SettingsSource},
    error::{self, Error},
    message::MessageComposer,
    session::SessionDescriptor,
    transport::{smtp::SmtpTransport, Transport},
    BoxError,
};

/// Sends a preconfigured mail with one attachment
///
/// The sender address, the body text and the server settings all come from
/// the [`SettingsSource`], which is read again on every send. Nothing is
/// kept between two sends, so a `MailSender` can be shared between threads
/// as long as its transport can.
#[derive(Debug, Clone)]
pub struct MailSender<T = SmtpTransport> {
    source: SettingsSource,
    composer: MessageComposer,
    transport: T,
}

impl MailSender<SmtpTransport> {
    /// Creates a sender reading its settings from the file at `path`
    /// and delivering over SMTP
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self::with_transport(SettingsSource::File(path.into()), SmtpTransport::new())
    }
}

impl<T> MailSender<T>
where
    T: Transport,
    T::Error: Into<BoxError>,
{
    /// Creates a sender delivering with `transport`
    pub fn with_transport<S: Into<SettingsSource>>(source: S, transport: T) -> Self {
        Self {
            source: source.into(),
            composer: MessageComposer::new(),
            transport,
        }
    }

    /// Replaces the composer, to change the attachment content type
    pub fn composer(mut self, composer: MessageComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends the configured text to `to` with `attachment` attached as `filename`
    ///
    /// The transport is called exactly once, and only if the settings are
    /// complete, both addresses are valid and the attachment could be read.
    /// `attachment` is read to its end but stays owned by the caller, who
    /// closes it whatever the outcome.
    pub fn send_mail_with_attachment<R: Read + ?Sized>(
        &self,
        to: &str,
        subject: &str,
        filename: &str,
        attachment: &mut R,
    ) -> Result<(), Error> {
        let settings = self.source.load()?;
        tracing::trace!(entries = settings.len(), "settings loaded");

        let session = SessionDescriptor::build(&settings)?;
        let from = settings.require(config::MESSAGE_FROM)?;
        let text = settings.require(config::MESSAGE_TEXT)?;

        let message = self
            .composer
            .compose(&session, from, subject, to, text, filename, attachment)?;
        tracing::debug!(
            from = %message.from(),
            to = %message.to(),
            filename,
            size = message.attachment().content().len(),
            "message composed"
        );

        self.transport.send(&message).map_err(error::transport)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{transport::stub::StubTransport, Settings};

    #[test]
    fn missing_body_text() {
        let settings: Settings = [("mail.message.from", "a@x.com"), ("mail.smtp.auth", "false")]
            .into_iter()
            .collect();
        let transport = StubTransport::new_ok();
        let sender = MailSender::with_transport(settings, &transport);

        let mut pdf: &[u8] = b"%PDF";
        let err = sender
            .send_mail_with_attachment("b@y.com", "Subj", "file.pdf", &mut pdf)
            .unwrap_err();
        assert_eq!(err.key(), Some(config::MESSAGE_TEXT));
        assert!(transport.messages().is_empty());
    }

    #[test]
    fn session_errors_come_first() {
        let settings: Settings = [("mail.smtp.auth", "true")].into_iter().collect();
        let transport = StubTransport::new_ok();
        let sender = MailSender::with_transport(settings, &transport);

        let mut pdf: &[u8] = b"%PDF";
        let err = sender
            .send_mail_with_attachment("b@y.com", "Subj", "file.pdf", &mut pdf)
            .unwrap_err();
        assert_eq!(err.key(), Some(config::AUTH_USERNAME));
        assert!(transport.messages().is_empty());
    }

    #[test]
    fn custom_composer() {
        let settings: Settings = [("mail.message.from", "a@x.com"), ("mail.message.text", "hi")]
            .into_iter()
            .collect();
        let transport = StubTransport::new_ok();
        let sender = MailSender::with_transport(settings, &transport)
            .composer(MessageComposer::new().content_type(mime::IMAGE_PNG));

        let mut png: &[u8] = b"\x89PNG";
        sender
            .send_mail_with_attachment("b@y.com", "Logo", "logo.png", &mut png)
            .unwrap();
        assert_eq!(
            sender.transport().messages()[0].attachment().mime(),
            &mime::IMAGE_PNG
        );
    }
}
