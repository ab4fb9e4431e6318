//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die SQLite-Implementierungen liegen unter
//! `sqlite/`; die Auth-Services arbeiten nur gegen diese Traits.

use uuid::Uuid;

use crate::error::DbError;
use crate::models::{CodeRecord, KontoRecord, KontoUpdate, NeuerCode, NeuesKonto};

/// Result-Alias fuer alle Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://pfoertner.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://pfoertner.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer Konto-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait AccountRepository: Send + Sync {
    /// Legt ein neues Konto an. Die E-Mail-Eindeutigkeit wird durch den
    /// UNIQUE-Constraint der Datenbank erzwungen, nicht nur anwendungsseitig.
    async fn create(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord>;

    /// Laedt ein Konto anhand seiner ID
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KontoRecord>>;

    /// Laedt ein Konto anhand seiner E-Mail
    async fn get_by_email(&self, email: &str) -> DbResult<Option<KontoRecord>>;

    /// Aktualisiert ein Konto (nur gesetzte Felder)
    async fn update(&self, id: Uuid, data: KontoUpdate) -> DbResult<KontoRecord>;

    /// Loescht ein Konto endgueltig. Zugehoerige Verifizierungscodes
    /// werden per Fremdschluessel-Kaskade mitgeloescht.
    async fn delete(&self, id: Uuid) -> DbResult<bool>;

    /// Listet alle Konten auf (sortiert nach E-Mail)
    async fn list(&self) -> DbResult<Vec<KontoRecord>>;

    /// Loescht alle Konten ohne Admin-Flag und gibt die Anzahl zurueck
    async fn delete_non_admins(&self) -> DbResult<u64>;
}

/// Repository fuer Verifizierungscode-Datenzugriffe
#[allow(async_fn_in_trait)]
pub trait VerificationCodeRepository: Send + Sync {
    /// Persistiert einen neuen Code fuer ein Konto und loescht dabei alle
    /// aelteren Codes desselben Kontos (es gibt pro Konto hoechstens einen
    /// lebenden Code).
    async fn replace_for_account(&self, data: NeuerCode<'_>) -> DbResult<CodeRecord>;

    /// Loest einen Code ein: loescht den Datensatz der zu Konto und Code
    /// passt und noch nicht abgelaufen ist. Gibt `true` zurueck wenn genau
    /// ein Datensatz geloescht wurde. Die Pruefung und das Loeschen sind ein
    /// einzelnes bedingtes DELETE, damit von konkurrierenden Einloesungen
    /// hoechstens eine erfolgreich ist.
    async fn consume(&self, account_id: Uuid, code: &str) -> DbResult<bool>;

    /// Loescht alle abgelaufenen Codes und gibt die Anzahl zurueck
    async fn purge_expired(&self) -> DbResult<u64>;
}
