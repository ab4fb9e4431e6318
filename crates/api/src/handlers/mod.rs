//! REST-Handler, gruppiert nach Teilflaeche

pub mod admin;
pub mod auth;
pub mod profil;

use pfoertner_db::models::KontoRecord;
use serde_json::{json, Value};

/// Maske fuer Passwort-Felder in Antworten; der Hash verlaesst den Server nie
pub const PASSWORT_MASKE: &str = "**********";

/// Konto-Darstellung fuer API-Antworten (ohne Passwort-Hash)
pub fn konto_json(konto: &KontoRecord) -> Value {
    json!({
        "id": konto.id,
        "email": konto.email,
        "verifiziert": konto.is_verified,
        "admin": konto.is_admin,
        "erstellt_am": konto.created_at.to_rfc3339(),
    })
}
