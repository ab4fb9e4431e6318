//! Verifizierungscodes fuer E-Mail-Bestaetigung und Passwort-Reset
//!
//! Codes sind einmalig verwendbar und zeitlich begrenzt. Pro Konto lebt
//! hoechstens ein Code: ein neu ausgestellter Code verdraengt den alten.

use std::sync::Arc;

use chrono::Utc;
use rand::RngCore;
use uuid::Uuid;

use pfoertner_db::{
    models::{CodeRecord, NeuerCode},
    repository::VerificationCodeRepository,
};

use crate::error::{AuthError, AuthResult};

/// Anzahl Zufallsbytes pro Code; hex-kodiert ergibt das 6 Zeichen
const CODE_BYTES: usize = 3;

/// Verwaltung der Verifizierungscodes
pub struct VerifizierungsService<C: VerificationCodeRepository> {
    code_repo: Arc<C>,
    gueltigkeit_minuten: i64,
}

impl<C: VerificationCodeRepository> VerifizierungsService<C> {
    pub fn neu(code_repo: Arc<C>, gueltigkeit_minuten: i64) -> Self {
        Self {
            code_repo,
            gueltigkeit_minuten,
        }
    }

    /// Konfigurierte Code-Laufzeit in Minuten
    pub fn gueltigkeit_minuten(&self) -> i64 {
        self.gueltigkeit_minuten
    }

    /// Stellt einen frischen Code fuer das Konto aus
    ///
    /// Ein eventuell vorhandener aelterer Code wird dabei verworfen.
    pub async fn ausstellen(&self, konto_id: Uuid) -> AuthResult<CodeRecord> {
        let code = code_generieren();
        let record = self
            .code_repo
            .replace_for_account(NeuerCode {
                account_id: konto_id,
                code: &code,
                expires_at: Utc::now() + chrono::Duration::minutes(self.gueltigkeit_minuten),
            })
            .await?;

        tracing::debug!(konto_id = %konto_id, "Verifizierungscode ausgestellt");
        Ok(record)
    }

    /// Loest einen Code ein
    ///
    /// Falscher Code, abgelaufener Code und bereits eingeloester Code
    /// melden denselben Fehler. Die Einloesung ist atomar, von
    /// konkurrierenden Versuchen gewinnt hoechstens einer.
    pub async fn einloesen(&self, konto_id: Uuid, code: &str) -> AuthResult<()> {
        let eingeloest = self.code_repo.consume(konto_id, code).await?;
        if !eingeloest {
            tracing::debug!(konto_id = %konto_id, "Einloesung abgelehnt");
            return Err(AuthError::CodeUngueltig);
        }

        tracing::debug!(konto_id = %konto_id, "Verifizierungscode eingeloest");
        Ok(())
    }

    /// Raeumt abgelaufene Codes weg und gibt die Anzahl zurueck
    pub async fn abgelaufene_bereinigen(&self) -> AuthResult<u64> {
        Ok(self.code_repo.purge_expired().await?)
    }
}

/// Generiert einen kryptografisch zufaelligen Code (6 Hex-Zeichen)
fn code_generieren() -> String {
    let mut bytes = [0u8; CODE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration};
    use pfoertner_db::DbResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct TestCodeRepo {
        codes: Mutex<Vec<CodeRecord>>,
    }

    impl VerificationCodeRepository for TestCodeRepo {
        async fn replace_for_account(&self, data: NeuerCode<'_>) -> DbResult<CodeRecord> {
            let mut codes = self.codes.lock().unwrap();
            codes.retain(|c| c.account_id != data.account_id);
            let record = CodeRecord {
                id: Uuid::new_v4(),
                account_id: data.account_id,
                code: data.code.to_string(),
                expires_at: data.expires_at,
                created_at: Utc::now(),
            };
            codes.push(record.clone());
            Ok(record)
        }

        async fn consume(&self, account_id: Uuid, code: &str) -> DbResult<bool> {
            let mut codes = self.codes.lock().unwrap();
            let jetzt = Utc::now();
            let vorher = codes.len();
            codes.retain(|c| {
                !(c.account_id == account_id && c.code == code && c.expires_at > jetzt)
            });
            Ok(codes.len() < vorher)
        }

        async fn purge_expired(&self) -> DbResult<u64> {
            let mut codes = self.codes.lock().unwrap();
            let jetzt = Utc::now();
            let vorher = codes.len();
            codes.retain(|c| c.expires_at > jetzt);
            Ok((vorher - codes.len()) as u64)
        }
    }

    impl TestCodeRepo {
        fn ablauf_setzen(&self, konto_id: Uuid, ablauf: DateTime<Utc>) {
            let mut codes = self.codes.lock().unwrap();
            for c in codes.iter_mut().filter(|c| c.account_id == konto_id) {
                c.expires_at = ablauf;
            }
        }
    }

    fn test_service() -> (VerifizierungsService<TestCodeRepo>, Arc<TestCodeRepo>) {
        let repo = Arc::new(TestCodeRepo::default());
        (VerifizierungsService::neu(Arc::clone(&repo), 15), repo)
    }

    #[tokio::test]
    async fn ausstellen_und_einloesen() {
        let (service, _) = test_service();
        let konto_id = Uuid::new_v4();

        let record = service.ausstellen(konto_id).await.expect("Ausstellen fehlgeschlagen");
        assert_eq!(record.code.len(), 6);
        assert!(record.code.chars().all(|c| c.is_ascii_hexdigit()));

        service
            .einloesen(konto_id, &record.code)
            .await
            .expect("Einloesen fehlgeschlagen");
    }

    #[tokio::test]
    async fn code_nur_einmal_einloesbar() {
        let (service, _) = test_service();
        let konto_id = Uuid::new_v4();

        let record = service.ausstellen(konto_id).await.unwrap();
        service.einloesen(konto_id, &record.code).await.unwrap();

        let zweiter = service.einloesen(konto_id, &record.code).await;
        assert!(matches!(zweiter, Err(AuthError::CodeUngueltig)));
    }

    #[tokio::test]
    async fn abgelaufener_code_abgelehnt() {
        let (service, repo) = test_service();
        let konto_id = Uuid::new_v4();

        let record = service.ausstellen(konto_id).await.unwrap();
        repo.ablauf_setzen(konto_id, Utc::now() - Duration::seconds(1));

        let ergebnis = service.einloesen(konto_id, &record.code).await;
        assert!(matches!(ergebnis, Err(AuthError::CodeUngueltig)));
    }

    #[tokio::test]
    async fn falscher_code_abgelehnt() {
        let (service, _) = test_service();
        let konto_id = Uuid::new_v4();

        service.ausstellen(konto_id).await.unwrap();

        let ergebnis = service.einloesen(konto_id, "ffffff").await;
        assert!(matches!(ergebnis, Err(AuthError::CodeUngueltig)));
    }

    #[tokio::test]
    async fn neuer_code_verdraengt_alten() {
        let (service, _) = test_service();
        let konto_id = Uuid::new_v4();

        let erster = service.ausstellen(konto_id).await.unwrap();
        let zweiter = service.ausstellen(konto_id).await.unwrap();
        assert_ne!(erster.code, zweiter.code);

        let alt = service.einloesen(konto_id, &erster.code).await;
        assert!(matches!(alt, Err(AuthError::CodeUngueltig)));

        service.einloesen(konto_id, &zweiter.code).await.unwrap();
    }

    #[tokio::test]
    async fn bereinigung_zaehlt_abgelaufene() {
        let (service, repo) = test_service();
        let abgelaufen = Uuid::new_v4();
        let frisch = Uuid::new_v4();

        service.ausstellen(abgelaufen).await.unwrap();
        service.ausstellen(frisch).await.unwrap();
        repo.ablauf_setzen(abgelaufen, Utc::now() - Duration::minutes(1));

        let anzahl = service.abgelaufene_bereinigen().await.unwrap();
        assert_eq!(anzahl, 1);
    }

    #[test]
    fn code_format() {
        let code = code_generieren();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }
}
