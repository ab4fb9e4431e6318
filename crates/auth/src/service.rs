//! Konto-Workflow fuer Pfoertner
//!
//! Zentraler Service fuer Registrierung, Verifizierung, Login,
//! Profilpflege und Passwort-Reset. Orchestriert Repositories,
//! Passwort-Hashing, Token-Ausstellung und Mail-Versand.
//!
//! Zustandsfolge pro Konto: unregistriert -> wartet auf Verifizierung ->
//! verifiziert. Admin-Konten entstehen direkt verifiziert (siehe
//! [`crate::admin`]).

use std::sync::Arc;

use uuid::Uuid;

use pfoertner_db::{
    models::{KontoRecord, KontoUpdate, NeuesKonto},
    repository::{AccountRepository, VerificationCodeRepository},
};
use pfoertner_mail::{vorlagen, MailVersand};

use crate::{
    error::{AuthError, AuthResult},
    password::{passwort_hashen, passwort_verifizieren},
    token::TokenService,
    verification::VerifizierungsService,
};

/// Verhaltens-Konfiguration des Workflows
#[derive(Debug, Clone, Default)]
pub struct WorkflowKonfig {
    /// Ob ein Konto verifiziert sein muss um sich anzumelden.
    /// Standard: aus.
    pub verifizierung_fuer_login: bool,
}

/// Konto-Service – Einstiegspunkt fuer alle Kontovorgaenge
pub struct KontoService<K, C>
where
    K: AccountRepository,
    C: VerificationCodeRepository,
{
    konto_repo: Arc<K>,
    verifizierung: Arc<VerifizierungsService<C>>,
    tokens: Arc<TokenService>,
    mailer: Arc<dyn MailVersand>,
    konfig: WorkflowKonfig,
}

impl<K, C> KontoService<K, C>
where
    K: AccountRepository,
    C: VerificationCodeRepository,
{
    pub fn neu(
        konto_repo: Arc<K>,
        verifizierung: Arc<VerifizierungsService<C>>,
        tokens: Arc<TokenService>,
        mailer: Arc<dyn MailVersand>,
        konfig: WorkflowKonfig,
    ) -> Self {
        Self {
            konto_repo,
            verifizierung,
            tokens,
            mailer,
            konfig,
        }
    }

    /// Registriert ein neues Konto und verschickt den Verifizierungscode
    ///
    /// Die Registrierung gilt mit dem Anlegen des Kontos als
    /// abgeschlossen; ein fehlgeschlagener Mail-Versand wird geloggt und
    /// macht sie nicht rueckgaengig. Es wird kein Token zurueckgegeben.
    pub async fn registrieren(&self, email: &str, passwort: &str) -> AuthResult<KontoRecord> {
        if self.konto_repo.get_by_email(email).await?.is_some() {
            return Err(AuthError::EmailVergeben(email.to_string()));
        }

        let passwort_hash = passwort_hashen(passwort)?;

        // Der UNIQUE-Constraint faengt das Rennen zweier gleichzeitiger
        // Registrierungen, die Vorpruefung oben ist nur der schnelle Weg
        let konto = match self
            .konto_repo
            .create(NeuesKonto {
                email,
                password_hash: &passwort_hash,
                is_verified: false,
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

        let code = self.verifizierung.ausstellen(konto.id).await?;
        let (betreff, text) =
            vorlagen::verifizierungs_mail(&code.code, self.verifizierung.gueltigkeit_minuten());
        self.mail_versenden(konto.email.clone(), betreff, text);

        tracing::info!(
            konto_id = %konto.id,
            email = %konto.email,
            "Neues Konto registriert"
        );

        Ok(konto)
    }

    /// Loest einen Verifizierungscode ein und gibt ein Session-Token zurueck
    pub async fn code_einloesen(&self, email: &str, code: &str) -> AuthResult<String> {
        let konto = self
            .konto_repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| AuthError::KontoNichtGefunden(email.to_string()))?;

        self.verifizierung.einloesen(konto.id, code).await?;

        self.konto_repo
            .update(
                konto.id,
                KontoUpdate {
                    is_verified: Some(true),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(konto_id = %konto.id, "Konto verifiziert");

        self.tokens.ausstellen(&konto.email)
    }

    /// Meldet ein Konto an und gibt ein Session-Token zurueck
    ///
    /// Unbekannte E-Mail und falsches Passwort melden denselben Fehler.
    pub async fn anmelden(&self, email: &str, passwort: &str) -> AuthResult<String> {
        let konto = self
            .konto_repo
            .get_by_email(email)
            .await?
            .ok_or(AuthError::UngueltigeAnmeldedaten)?;

        let korrekt = passwort_verifizieren(passwort, &konto.password_hash)?;
        if !korrekt {
            tracing::warn!(email = %email, "Fehlgeschlagener Login-Versuch");
            return Err(AuthError::UngueltigeAnmeldedaten);
        }

        if self.konfig.verifizierung_fuer_login && !konto.is_verified {
            return Err(AuthError::NichtVerifiziert);
        }

        tracing::info!(konto_id = %konto.id, "Konto angemeldet");

        self.tokens.ausstellen(&konto.email)
    }

    /// Prueft ein Bearer-Token und loest das zugehoerige Konto auf
    ///
    /// Ist das Konto seit Ausstellung verschwunden (geloescht oder
    /// E-Mail geaendert), ist das Ergebnis `KontoNichtGefunden`.
    pub async fn konto_zum_token(&self, token: &str) -> AuthResult<KontoRecord> {
        let subjekt = self.tokens.pruefen(token)?;

        self.konto_repo
            .get_by_email(&subjekt)
            .await?
            .ok_or(AuthError::KontoNichtGefunden(subjekt))
    }

    /// Aktualisiert E-Mail und/oder Passwort eines Kontos
    pub async fn profil_aendern(
        &self,
        konto_id: Uuid,
        neue_email: Option<&str>,
        neues_passwort: Option<&str>,
    ) -> AuthResult<KontoRecord> {
        let konto = self
            .konto_repo
            .get_by_id(konto_id)
            .await?
            .ok_or_else(|| AuthError::KontoNichtGefunden(konto_id.to_string()))?;

        let mut update = KontoUpdate::default();

        if let Some(email) = neue_email {
            if let Some(bestehend) = self.konto_repo.get_by_email(email).await? {
                if bestehend.id != konto.id {
                    return Err(AuthError::EmailVergeben(email.to_string()));
                }
            }
            update.email = Some(email.to_string());
        }

        if let Some(passwort) = neues_passwort {
            update.password_hash = Some(passwort_hashen(passwort)?);
        }

        let aktualisiert = match self.konto_repo.update(konto.id, update).await {
            Ok(k) => k,
            Err(e) if e.ist_eindeutigkeit() => {
                return Err(AuthError::EmailVergeben(
                    neue_email.unwrap_or_default().to_string(),
                ))
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            konto_id = %konto_id,
            email_geaendert = neue_email.is_some(),
            passwort_geaendert = neues_passwort.is_some(),
            "Profil aktualisiert"
        );

        Ok(aktualisiert)
    }

    /// Fordert einen Passwort-Reset-Code an
    ///
    /// Antwortet immer gleich, ob das Konto existiert oder nicht, damit
    /// Kontoexistenz nicht abfragbar ist.
    pub async fn passwort_vergessen(&self, email: &str) -> AuthResult<()> {
        match self.konto_repo.get_by_email(email).await? {
            None => {
                tracing::debug!(email = %email, "Reset fuer unbekannte E-Mail angefordert");
            }
            Some(konto) => {
                let code = self.verifizierung.ausstellen(konto.id).await?;
                let (betreff, text) = vorlagen::passwort_reset_mail(
                    &code.code,
                    self.verifizierung.gueltigkeit_minuten(),
                );
                self.mail_versenden(konto.email.clone(), betreff, text);
                tracing::info!(konto_id = %konto.id, "Passwort-Reset-Code ausgestellt");
            }
        }

        Ok(())
    }

    /// Setzt das Passwort gegen einen gueltigen Reset-Code neu
    pub async fn passwort_zuruecksetzen(
        &self,
        email: &str,
        code: &str,
        neues_passwort: &str,
    ) -> AuthResult<()> {
        let konto = self
            .konto_repo
            .get_by_email(email)
            .await?
            .ok_or_else(|| AuthError::KontoNichtGefunden(email.to_string()))?;

        self.verifizierung.einloesen(konto.id, code).await?;

        let passwort_hash = passwort_hashen(neues_passwort)?;
        self.konto_repo
            .update(
                konto.id,
                KontoUpdate {
                    password_hash: Some(passwort_hash),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!(konto_id = %konto.id, "Passwort zurueckgesetzt");
        Ok(())
    }

    /// Raeumt abgelaufene Verifizierungscodes weg
    pub async fn codes_bereinigen(&self) -> AuthResult<u64> {
        self.verifizierung.abgelaufene_bereinigen().await
    }

    /// Verschickt eine Mail feuer-und-vergiss auf einem Blocking-Task
    fn mail_versenden(&self, empfaenger: String, betreff: String, text: String) {
        let mailer = Arc::clone(&self.mailer);
        tokio::task::spawn_blocking(move || {
            if let Err(e) = mailer.senden(&empfaenger, &betreff, &text) {
                tracing::warn!(
                    empfaenger = %empfaenger,
                    fehler = %e,
                    "Mail-Versand fehlgeschlagen"
                );
            }
        });
    }
}
