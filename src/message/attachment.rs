use std::io::Read;

use lettre::message::{header::ContentType, Attachment, SinglePart};
use mime::Mime;

use crate::error::{self, Error};

/// Binary content attached to a message, fully buffered in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentPayload {
    filename: String,
    content_type: Mime,
    content: Vec<u8>,
}

impl AttachmentPayload {
    /// Reads `reader` to its end
    ///
    /// The reader is only borrowed; closing it stays with the caller.
    /// Fails if reading fails or yields no bytes.
    pub fn read<F, R>(filename: F, content_type: Mime, reader: &mut R) -> Result<Self, Error>
    where
        F: Into<String>,
        R: Read + ?Sized,
    {
        let filename = filename.into();
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .map_err(error::attachment_read)?;

        if content.is_empty() {
            return Err(error::attachment_read(format!(
                "attachment '{filename}' is empty"
            )));
        }

        Ok(Self {
            filename,
            content_type,
            content,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn mime(&self) -> &Mime {
        &self.content_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Build the attachment part
    pub(crate) fn to_part(&self) -> SinglePart {
        Attachment::new(self.filename.clone()).body(
            self.content.clone(),
            ContentType::from(self.content_type.clone()),
        )
    }
}

#[cfg(test)]
mod test {
    use std::io;

    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn read_payload() {
        let mut reader: &[u8] = b"%PDF-1.4";
        let payload =
            AttachmentPayload::read("report.pdf", mime::APPLICATION_PDF, &mut reader).unwrap();
        assert_eq!(payload.filename(), "report.pdf");
        assert_eq!(payload.mime(), &mime::APPLICATION_PDF);
        assert_eq!(payload.content(), b"%PDF-1.4");
    }

    #[test]
    fn reader_failure() {
        let err = AttachmentPayload::read("report.pdf", mime::APPLICATION_PDF, &mut FailingReader)
            .unwrap_err();
        assert!(err.is_attachment_read());
    }

    #[test]
    fn empty_reader() {
        let mut reader = io::empty();
        let err =
            AttachmentPayload::read("report.pdf", mime::APPLICATION_PDF, &mut reader).unwrap_err();
        assert!(err.is_attachment_read());
        assert!(err.to_string().contains("report.pdf"));
    }

    #[test]
    fn attachment_part() {
        let mut reader: &[u8] = b"Hello world!";
        let part = AttachmentPayload::read("test.txt", mime::TEXT_PLAIN, &mut reader)
            .unwrap()
            .to_part();
        let formatted = String::from_utf8(part.formatted()).unwrap();
        assert!(formatted.starts_with(concat!(
            "Content-Disposition: attachment; filename=\"test.txt\"\r\n",
            "Content-Type: text/plain\r\n",
        )));
        assert!(formatted.ends_with("\r\n"));
    }
}
