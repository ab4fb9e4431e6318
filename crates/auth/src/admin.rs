//! Admin-Operationen auf Kontobestand
//!
//! Massgeblich fuer die Berechtigung ist ueberall das `is_admin`-Flag des
//! aufgeloesten Kontos; die Konfiguration liefert nur das Saatkorn fuer
//! das erste Admin-Konto beim Serverstart.

use std::sync::Arc;

use pfoertner_db::{
    models::{KontoRecord, NeuesKonto},
    repository::AccountRepository,
};

use crate::{
    error::{AuthError, AuthResult},
    password::passwort_hashen,
};

/// Admin-Service – Kontoverwaltung fuer Admin-Konten
pub struct AdminService<K: AccountRepository> {
    konto_repo: Arc<K>,
}

impl<K: AccountRepository> AdminService<K> {
    pub fn neu(konto_repo: Arc<K>) -> Self {
        Self { konto_repo }
    }

    /// Listet alle Konten auf
    pub async fn konten_auflisten(&self) -> AuthResult<Vec<KontoRecord>> {
        Ok(self.konto_repo.list().await?)
    }

    /// Laedt ein einzelnes Konto anhand der E-Mail
    pub async fn konto_laden(&self, email: &str) -> AuthResult<KontoRecord> {
        self.konto_repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| AuthError::KontoNichtGefunden(email.to_string()))
    }

    /// Loescht ein Konto endgueltig
    pub async fn konto_loeschen(&self, email: &str) -> AuthResult<()> {
        let konto = self
            .konto_repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| AuthError::KontoNichtGefunden(email.to_string()))?;

        let geloescht = self.konto_repo.delete(konto.id).await?;
        if !geloescht {
            return Err(AuthError::KontoNichtGefunden(email.to_string()));
        }

        tracing::info!(konto_id = %konto.id, email = %email, "Konto geloescht");
        Ok(())
    }

    /// Loescht alle Konten ohne Admin-Flag
    ///
    /// Gibt die Anzahl der geloeschten Konten zurueck; null ist kein Fehler.
    pub async fn nicht_admins_loeschen(&self) -> AuthResult<u64> {
        let anzahl = self.konto_repo.delete_non_admins().await?;
        tracing::info!(anzahl = anzahl, "Nicht-Admin-Konten geloescht");
        Ok(anzahl)
    }

    /// Legt ein Konto im Auftrag eines Admins an
    ///
    /// Das Konto entsteht ohne Admin-Flag und direkt verifiziert – auf
    /// dem Admin-Weg wird keine Verifizierungs-Mail verschickt.
    pub async fn konto_anlegen(&self, email: &str, passwort: &str) -> AuthResult<KontoRecord> {
        if self.konto_repo.get_by_email(email).await?.is_some() {
            return Err(AuthError::EmailVergeben(email.to_string()));
        }

        let passwort_hash = passwort_hashen(passwort)?;

        let konto = match self
            .konto_repo
            .create(NeuesKonto {
                email,
                password_hash: &passwort_hash,
                is_verified: true,
                is_admin: false,
            })
            .await
        {
            Ok(konto) => konto,
            Err(e) if e.ist_eindeutigkeit() => {
                return Err(AuthError::EmailVergeben(email.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(konto_id = %konto.id, email = %email, "Konto durch Admin angelegt");
        Ok(konto)
    }

    /// Stellt beim Serverstart sicher dass das konfigurierte Admin-Konto existiert
    ///
    /// Idempotent: ein vorhandenes Admin-Konto bleibt unangetastet. Ein
    /// vorhandenes Konto ohne Admin-Flag wird NICHT befoerdert, nur
    /// gemeldet.
    pub async fn admin_sicherstellen(&self, email: &str, passwort: &str) -> AuthResult<KontoRecord> {
        if let Some(bestehend) = self.konto_repo.get_by_email(email).await? {
            if bestehend.is_admin {
                tracing::debug!(email = %email, "Admin-Konto existiert bereits");
            } else {
                tracing::warn!(
                    email = %email,
                    "Konfigurierte Admin-E-Mail gehoert zu einem Konto ohne Admin-Flag"
                );
            }
            return Ok(bestehend);
        }

        let passwort_hash = passwort_hashen(passwort)?;

        let konto = self
            .konto_repo
            .create(NeuesKonto {
                email,
                password_hash: &passwort_hash,
                is_verified: true,
                is_admin: true,
            })
            .await?;

        tracing::info!(konto_id = %konto.id, email = %email, "Admin-Konto angelegt");
        Ok(konto)
    }
}
