use std::io::Read;

use lettre::message::Mailbox;
use mime::Mime;

use super::{AttachmentPayload, ComposedMessage};
use crate::{
    error::{self, Error},
    session::SessionDescriptor,
};

/// Builds [`ComposedMessage`]s with a text part and one attachment
///
/// Attachments are tagged `application/pdf` unless another content type is
/// configured.
///
/// # Examples
///
/// ```
/// use attachment_mailer::{MessageComposer, SessionDescriptor, Settings};
///
/// # fn main() -> Result<(), attachment_mailer::Error> {
/// let session = SessionDescriptor::build(&Settings::default())?;
/// let mut pdf: &[u8] = b"%PDF";
///
/// let message = MessageComposer::new().compose(
///     &session,
///     "a@x.com",
///     "Subj",
///     "b@y.com",
///     "hello",
///     "file.pdf",
///     &mut pdf,
/// )?;
/// assert_eq!(message.attachment().content(), b"%PDF");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MessageComposer {
    content_type: Mime,
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageComposer {
    pub fn new() -> Self {
        Self {
            content_type: mime::APPLICATION_PDF,
        }
    }

    /// Content type given to attachments
    pub fn content_type(mut self, content_type: Mime) -> Self {
        self.content_type = content_type;
        self
    }

    /// Composes a message from `from` to `to`
    ///
    /// Both addresses are validated before the attachment is read. They may
    /// carry a display name, as in `Sender <sender@example.com>`. The
    /// attachment reader is drained but neither consumed nor closed.
    #[allow(clippy::too_many_arguments)]
    pub fn compose<R: Read + ?Sized>(
        &self,
        session: &SessionDescriptor,
        from: &str,
        subject: &str,
        to: &str,
        body_text: &str,
        filename: &str,
        attachment: &mut R,
    ) -> Result<ComposedMessage, Error> {
        let from = parse_address(from)?;
        let to = parse_address(to)?;
        let attachment = AttachmentPayload::read(filename, self.content_type.clone(), attachment)?;

        Ok(ComposedMessage {
            session: session.clone(),
            from,
            to,
            subject: subject.to_owned(),
            text: body_text.to_owned(),
            attachment,
        })
    }
}

fn parse_address(address: &str) -> Result<Mailbox, Error> {
    address
        .trim()
        .parse()
        .map_err(|e| error::address(address, e))
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{message::Part, Settings};

    fn session() -> SessionDescriptor {
        SessionDescriptor::build(&Settings::default()).unwrap()
    }

    #[test]
    fn compose_parts_in_order() {
        let mut pdf: &[u8] = &[0x25, 0x50, 0x44, 0x46];
        let message = MessageComposer::new()
            .compose(
                &session(),
                "a@x.com",
                "Subj",
                "b@y.com",
                "hello",
                "file.pdf",
                &mut pdf,
            )
            .unwrap();

        assert_eq!(message.from().to_string(), "a@x.com");
        assert_eq!(message.to().to_string(), "b@y.com");
        assert_eq!(message.subject(), "Subj");

        let parts = message.parts();
        assert_eq!(parts[0], Part::Text("hello"));
        match parts[1] {
            Part::Attachment(attachment) => {
                assert_eq!(attachment.filename(), "file.pdf");
                assert_eq!(attachment.mime(), &mime::APPLICATION_PDF);
                assert_eq!(attachment.content(), &[0x25, 0x50, 0x44, 0x46]);
            }
            Part::Text(_) => panic!("second part must be the attachment"),
        }
    }

    #[test]
    fn custom_content_type() {
        let mut csv: &[u8] = b"a,b\n1,2\n";
        let message = MessageComposer::new()
            .content_type(mime::TEXT_CSV)
            .compose(
                &session(),
                "a@x.com",
                "Export",
                "b@y.com",
                "see attachment",
                "export.csv",
                &mut csv,
            )
            .unwrap();
        assert_eq!(message.attachment().mime(), &mime::TEXT_CSV);
    }

    #[test]
    fn malformed_addresses() {
        let composer = MessageComposer::new();
        for (from, to) in [("not-an-address", "b@y.com"), ("a@x.com", "not-an-address")] {
            let mut pdf: &[u8] = b"%PDF";
            let err = composer
                .compose(&session(), from, "Subj", to, "hello", "file.pdf", &mut pdf)
                .unwrap_err();
            assert!(err.is_address());
            assert_eq!(err.address(), Some("not-an-address"));
        }
    }

    #[test]
    fn address_checked_before_reading() {
        let mut pdf: &[u8] = b"%PDF";
        let _ = MessageComposer::new().compose(
            &session(),
            "a@x.com",
            "Subj",
            "b@",
            "hello",
            "file.pdf",
            &mut pdf,
        );
        assert_eq!(pdf, b"%PDF");
    }

    #[test]
    fn display_names() {
        let mut pdf: &[u8] = b"%PDF";
        let message = MessageComposer::new()
            .compose(
                &session(),
                "Sender <a@x.com>",
                "Subj",
                "\"Doe, Jane\" <b@y.com>",
                "hello",
                "file.pdf",
                &mut pdf,
            )
            .unwrap();

        assert_eq!(message.from().name.as_deref(), Some("Sender"));
        assert_eq!(message.from().email.to_string(), "a@x.com");
        assert_eq!(message.to().name.as_deref(), Some("Doe, Jane"));
        assert_eq!(message.to().email.to_string(), "b@y.com");
    }

    #[test]
    fn session_is_attached() {
        let settings: Settings = [("mail.smtp.host", "mx.example.com")].into_iter().collect();
        let session = SessionDescriptor::build(&settings).unwrap();
        let mut pdf: &[u8] = b"%PDF";
        let message = MessageComposer::new()
            .compose(&session, "a@x.com", "Subj", "b@y.com", "hello", "f.pdf", &mut pdf)
            .unwrap();
        assert_eq!(message.session(), &session);
    }
}
