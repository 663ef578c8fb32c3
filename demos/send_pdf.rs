use std::{env, fs::File, process::ExitCode};

use attachment_mailer::MailSender;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut args = env::args().skip(1);
    let settings = args
        .next()
        .unwrap_or_else(|| "demos/mail.properties".to_owned());
    let to = args
        .next()
        .unwrap_or_else(|| "receiver@email.address".to_owned());
    let path = args
        .next()
        .unwrap_or_else(|| "demos/some_attachment.pdf".to_owned());

    let mut attachment = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Could not open {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let sender = MailSender::new(settings);
    let result = sender.send_mail_with_attachment(
        &to,
        "Test message with a PDF attachment",
        "attachment.pdf",
        &mut attachment,
    );
    drop(attachment);

    match result {
        Ok(()) => {
            println!("Email sent");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Could not send email: {e}");
            ExitCode::FAILURE
        }
    }
}
