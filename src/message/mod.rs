//! Composition of a two part message: a plain text body followed by one attachment.
//!
//! [`MessageComposer`] validates the addresses and buffers the attachment, then
//! produces a [`ComposedMessage`]. A composed message is complete and immutable;
//! the MIME encoding is left to lettre when the message reaches a transport.

use lettre::{
    message::{Mailbox, MultiPart, SinglePart},
    Message,
};

pub use self::{attachment::AttachmentPayload, composer::MessageComposer};
use crate::session::SessionDescriptor;

mod attachment;
mod composer;

/// A part of a [`ComposedMessage`] body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part<'a> {
    /// The plain text body
    Text(&'a str),
    /// The binary attachment
    Attachment(&'a AttachmentPayload),
}

/// A message ready to be handed to a [`Transport`](crate::Transport)
///
/// Carries the session it must be sent with, like a MIME message bound to
/// its mail session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    session: SessionDescriptor,
    from: Mailbox,
    to: Mailbox,
    subject: String,
    text: String,
    attachment: AttachmentPayload,
}

impl ComposedMessage {
    pub fn session(&self) -> &SessionDescriptor {
        &self.session
    }

    pub fn from(&self) -> &Mailbox {
        &self.from
    }

    /// The single recipient
    pub fn to(&self) -> &Mailbox {
        &self.to
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attachment(&self) -> &AttachmentPayload {
        &self.attachment
    }

    /// The body parts, text first
    pub fn parts(&self) -> [Part<'_>; 2] {
        [Part::Text(&self.text), Part::Attachment(&self.attachment)]
    }
}

impl TryFrom<&ComposedMessage> for Message {
    type Error = lettre::error::Error;

    fn try_from(message: &ComposedMessage) -> Result<Self, Self::Error> {
        Message::builder()
            .from(message.from.clone())
            .to(message.to.clone())
            .subject(message.subject.as_str())
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(message.text.clone()))
                    .singlepart(message.attachment.to_part()),
            )
    }
}
