//! pfoertner-mail – E-Mail-Versand
//!
//! Stellt den [`MailVersand`]-Trait bereit, gegen den der Auth-Workflow
//! arbeitet. Die SMTP-Implementierung versendet blockierend (der Aufrufer
//! verlagert den Versand auf einen Blocking-Task); [`NoopVersand`] loggt
//! nur und wird im Entwicklungsbetrieb und in Tests verwendet.

pub mod error;
pub mod smtp;
pub mod vorlagen;

pub use error::{MailError, MailResult};
pub use smtp::{SmtpKonfig, SmtpVersand};

/// Versendet E-Mails an Kontoinhaber.
///
/// Der Trait ist bewusst synchron: `lettre`s `SmtpTransport` blockiert,
/// und der Workflow ruft `senden` ausschliesslich feuer-und-vergiss auf
/// einem Blocking-Task auf.
pub trait MailVersand: Send + Sync {
    fn senden(&self, empfaenger: &str, betreff: &str, text: &str) -> MailResult<()>;
}

/// Mail-Versand der nichts versendet, nur loggt.
///
/// Aktiv wenn in der Konfiguration kein SMTP-Server hinterlegt ist.
#[derive(Debug, Default)]
pub struct NoopVersand;

impl MailVersand for NoopVersand {
    fn senden(&self, empfaenger: &str, betreff: &str, _text: &str) -> MailResult<()> {
        tracing::info!(
            empfaenger = %empfaenger,
            betreff = %betreff,
            "Mail-Versand deaktiviert, Nachricht wird verworfen"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_versand_meldet_erfolg() {
        let versand = NoopVersand;
        let ergebnis = versand.senden("wer@example.com", "Betreff", "Text");
        assert!(ergebnis.is_ok());
    }
}
