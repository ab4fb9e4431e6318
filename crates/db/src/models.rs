//! Datenbankmodelle fuer Pfoertner
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den Domain-Typen getrennt und dienen als reine Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Konten
// ---------------------------------------------------------------------------

/// Konto-Datensatz aus der Datenbank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KontoRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub is_verified: bool,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Kontos
#[derive(Debug, Clone)]
pub struct NeuesKonto<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_verified: bool,
    pub is_admin: bool,
}

/// Daten zum Aktualisieren eines Kontos
#[derive(Debug, Clone, Default)]
pub struct KontoUpdate {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub is_verified: Option<bool>,
}

// ---------------------------------------------------------------------------
// Verifizierungscodes
// ---------------------------------------------------------------------------

/// Verifizierungscode-Datensatz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeRecord {
    pub id: Uuid,
    /// Konto zu dem dieser Code gehoert
    pub account_id: Uuid,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Verifizierungscodes
#[derive(Debug, Clone)]
pub struct NeuerCode<'a> {
    pub account_id: Uuid,
    pub code: &'a str,
    pub expires_at: DateTime<Utc>,
}
