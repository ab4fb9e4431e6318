//! Fehlertypen fuer den Mail-Versand

use thiserror::Error;

/// Alle moeglichen Fehler beim E-Mail-Versand
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Ungueltige Mail-Adresse: {0}")]
    Adresse(#[from] lettre::address::AddressError),

    #[error("Mail konnte nicht gebaut werden: {0}")]
    Aufbau(#[from] lettre::error::Error),

    #[error("SMTP-Fehler: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Result-Alias fuer den Mail-Versand
pub type MailResult<T> = Result<T, MailError>;
