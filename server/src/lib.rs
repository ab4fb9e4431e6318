//! pfoertner-server – Bibliotheks-Root
//!
//! Deklariert die Server-Module und komponiert beim Start alle
//! Subsysteme: Datenbank-Pool, Auth-Services, Mail-Versand und REST-API.
//! Alle Abhaengigkeiten werden explizit injiziert, es gibt keinen
//! globalen Zustand.

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use pfoertner_api::{AppState, RestServer, RestServerKonfig};
use pfoertner_auth::{
    AdminService, KontoService, TokenService, VerifizierungsService, WorkflowKonfig,
};
use pfoertner_db::{DatabaseConfig, SqliteDb};
use pfoertner_mail::{MailVersand, NoopVersand, SmtpKonfig, SmtpVersand};

use config::ServerConfig;

/// Intervall fuer die Bereinigung abgelaufener Verifizierungscodes
const CLEANUP_INTERVALL: Duration = Duration::from_secs(15 * 60);

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
}

impl Server {
    /// Erstellt einen neuen Server aus der gegebenen Konfiguration
    pub fn neu(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen (inkl. Migrationen)
    /// 2. Services aufbauen
    /// 3. Admin-Konto aus der Konfiguration sicherstellen
    /// 4. Bereinigungs-Task starten
    /// 5. REST-API starten, auf Ctrl-C / SIGTERM warten
    pub async fn starten(self) -> Result<()> {
        let cfg = self.config;

        // Fehlende Pflicht-Konfiguration ist ein harter Startfehler
        if cfg.token.geheimnis.is_empty() {
            anyhow::bail!("token.geheimnis fehlt in der Konfiguration");
        }

        tracing::info!(
            server_name = %cfg.server.name,
            api = %cfg.api_bind_adresse(),
            "Server startet"
        );

        let db = Arc::new(
            SqliteDb::oeffnen(&DatabaseConfig {
                url: cfg.datenbank.url.clone(),
                max_verbindungen: cfg.datenbank.max_verbindungen,
                sqlite_wal: cfg.datenbank.wal,
            })
            .await?,
        );

        let tokens = Arc::new(TokenService::neu(
            &cfg.token.geheimnis,
            cfg.token.gueltigkeit_minuten,
        ));

        let verifizierung = Arc::new(VerifizierungsService::neu(
            Arc::clone(&db),
            cfg.verifizierung.code_gueltigkeit_minuten,
        ));

        let mailer: Arc<dyn MailVersand> = if cfg.mail.aktiviert {
            Arc::new(SmtpVersand::neu(&SmtpKonfig {
                host: cfg.mail.host.clone(),
                port: cfg.mail.port,
                benutzer: cfg.mail.benutzer.clone(),
                passwort: cfg.mail.passwort.clone(),
                absender: cfg.mail.absender.clone(),
            })?)
        } else {
            tracing::warn!("Mail-Versand deaktiviert, ausgehende Mails werden verworfen");
            Arc::new(NoopVersand)
        };

        let konten = Arc::new(KontoService::neu(
            Arc::clone(&db),
            verifizierung,
            tokens,
            mailer,
            WorkflowKonfig {
                verifizierung_fuer_login: cfg.verifizierung.fuer_login_erforderlich,
            },
        ));

        let admin = Arc::new(AdminService::neu(Arc::clone(&db)));

        // Erstes Admin-Konto aus der Konfiguration (idempotent)
        if let (Some(email), Some(passwort)) = (&cfg.admin.email, &cfg.admin.passwort) {
            admin.admin_sicherstellen(email, passwort).await?;
        }

        // Abgelaufene Codes periodisch wegraeumen
        let bereinigung = Arc::clone(&konten);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(CLEANUP_INTERVALL).await;
                match bereinigung.codes_bereinigen().await {
                    Ok(anzahl) if anzahl > 0 => {
                        tracing::debug!(anzahl = anzahl, "Abgelaufene Codes bereinigt");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(fehler = %e, "Code-Bereinigung fehlgeschlagen");
                    }
                }
            }
        });

        let state = AppState::neu(konten, admin);
        let rest = RestServer::neu(RestServerKonfig {
            bind_addr: cfg.api_bind_adresse().parse()?,
            cors_origins: cfg.netzwerk.cors_origins.clone(),
        });

        tokio::select! {
            ergebnis = rest.starten(state) => ergebnis?,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown-Signal empfangen, Server wird beendet");
            }
        }

        Ok(())
    }
}
