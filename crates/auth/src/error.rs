//! Fehlertypen fuer den Auth-Workflow

use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Workflow
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Authentifizierung ---
    /// Bewusst derselbe Fehler fuer unbekannte E-Mail und falsches
    /// Passwort, damit Kontoexistenz nicht abfragbar ist
    #[error("E-Mail oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    #[error("Konto nicht verifiziert")]
    NichtVerifiziert,

    // --- Session-Token ---
    #[error("Token ungueltig")]
    TokenUngueltig,

    #[error("Token abgelaufen")]
    TokenAbgelaufen,

    // --- Verifizierung ---
    /// Deckt falschen Code, abgelaufenen Code und bereits eingeloesten
    /// Code ab, ohne den Grund zu verraten
    #[error("Verifizierungscode ungueltig oder abgelaufen")]
    CodeUngueltig,

    // --- Kontoverwaltung ---
    #[error("E-Mail bereits vergeben: {0}")]
    EmailVergeben(String),

    #[error("Konto nicht gefunden: {0}")]
    KontoNichtGefunden(String),

    #[error("Zugriff verweigert: Admin-Rechte erforderlich")]
    KeinAdmin,

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Datenbank(#[from] pfoertner_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

/// Result-Alias fuer den Auth-Workflow
pub type AuthResult<T> = Result<T, AuthError>;
