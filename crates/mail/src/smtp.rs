//! SMTP-Versand via lettre (STARTTLS)

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::error::MailResult;
use crate::MailVersand;

/// Konfiguration fuer den SMTP-Versand
#[derive(Debug, Clone)]
pub struct SmtpKonfig {
    /// SMTP-Server-Hostname (z.B. smtp.gmail.com)
    pub host: String,
    /// SMTP-Port (ueblich: 587 fuer STARTTLS)
    pub port: u16,
    /// Benutzername fuer die SMTP-Anmeldung
    pub benutzer: String,
    /// Passwort bzw. App-Passwort
    pub passwort: String,
    /// Absender-Adresse
    pub absender: String,
}

/// SMTP-Versand ueber einen STARTTLS-Relay
pub struct SmtpVersand {
    transport: SmtpTransport,
    absender: String,
}

impl SmtpVersand {
    /// Baut den Transport aus der Konfiguration auf.
    ///
    /// Die Verbindung wird erst beim ersten Versand aufgebaut.
    pub fn neu(konfig: &SmtpKonfig) -> MailResult<Self> {
        let transport = SmtpTransport::starttls_relay(&konfig.host)?
            .port(konfig.port)
            .credentials(Credentials::new(
                konfig.benutzer.clone(),
                konfig.passwort.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            absender: konfig.absender.clone(),
        })
    }
}

impl MailVersand for SmtpVersand {
    fn senden(&self, empfaenger: &str, betreff: &str, text: &str) -> MailResult<()> {
        let nachricht = Message::builder()
            .from(self.absender.parse()?)
            .to(empfaenger.parse()?)
            .subject(betreff)
            .header(ContentType::TEXT_PLAIN)
            .body(text.to_string())?;

        self.transport.send(&nachricht)?;

        tracing::debug!(empfaenger = %empfaenger, "Mail versendet");
        Ok(())
    }
}
