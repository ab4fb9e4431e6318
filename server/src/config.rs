//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist – mit einer Ausnahme: das Token-Geheimnis muss gesetzt
//! sein, sonst bricht der Start ab.

use serde::{Deserialize, Serialize};

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Allgemeine Server-Einstellungen
    pub server: ServerEinstellungen,
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Session-Token-Einstellungen
    pub token: TokenEinstellungen,
    /// Verifizierungscode-Einstellungen
    pub verifizierung: VerifizierungsEinstellungen,
    /// SMTP-Einstellungen
    pub mail: MailEinstellungen,
    /// Bootstrap des ersten Admin-Kontos
    pub admin: AdminEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Allgemeine Server-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerEinstellungen {
    /// Anzeigename des Servers
    pub name: String,
}

impl Default for ServerEinstellungen {
    fn default() -> Self {
        Self {
            name: "Pfoertner".into(),
        }
    }
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    /// Bind-Adresse fuer die REST-API
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub api_port: u16,
    /// CORS-Origins fuer REST (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            api_port: 8080,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://pfoertner.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// Session-Token-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenEinstellungen {
    /// Signier-Geheimnis (HS256). MUSS gesetzt sein; ein Wechsel
    /// invalidiert alle umlaufenden Tokens.
    pub geheimnis: String,
    /// Token-Laufzeit in Minuten
    pub gueltigkeit_minuten: i64,
}

impl Default for TokenEinstellungen {
    fn default() -> Self {
        Self {
            geheimnis: String::new(),
            gueltigkeit_minuten: 30,
        }
    }
}

/// Verifizierungscode-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifizierungsEinstellungen {
    /// Code-Laufzeit in Minuten
    pub code_gueltigkeit_minuten: i64,
    /// Ob ein Konto verifiziert sein muss um sich anzumelden
    pub fuer_login_erforderlich: bool,
}

impl Default for VerifizierungsEinstellungen {
    fn default() -> Self {
        Self {
            code_gueltigkeit_minuten: 15,
            fuer_login_erforderlich: false,
        }
    }
}

/// SMTP-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MailEinstellungen {
    /// Aktiviert den SMTP-Versand. Aus = Mails werden nur geloggt.
    pub aktiviert: bool,
    /// SMTP-Server-Hostname
    pub host: String,
    /// SMTP-Port (STARTTLS)
    pub port: u16,
    /// Benutzername fuer die SMTP-Anmeldung
    pub benutzer: String,
    /// Passwort bzw. App-Passwort
    pub passwort: String,
    /// Absender-Adresse
    pub absender: String,
}

impl Default for MailEinstellungen {
    fn default() -> Self {
        Self {
            aktiviert: false,
            host: String::new(),
            port: 587,
            benutzer: String::new(),
            passwort: String::new(),
            absender: String::new(),
        }
    }
}

/// Bootstrap des ersten Admin-Kontos
///
/// Massgeblich fuer Berechtigungen ist das `is_admin`-Flag der Konten;
/// diese Einstellungen legen nur beim Start das erste Admin-Konto an.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminEinstellungen {
    pub email: Option<String>,
    pub passwort: Option<String>,
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Gibt die vollstaendige Bind-Adresse fuer die REST-API zurueck
    pub fn api_bind_adresse(&self) -> String {
        format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.api_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_config_ist_valide() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.netzwerk.api_port, 8080);
        assert_eq!(cfg.datenbank.url, "sqlite://pfoertner.db");
        assert_eq!(cfg.token.gueltigkeit_minuten, 30);
        assert_eq!(cfg.verifizierung.code_gueltigkeit_minuten, 15);
        assert!(!cfg.verifizierung.fuer_login_erforderlich);
        assert!(!cfg.mail.aktiviert);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn geheimnis_hat_keinen_standardwert() {
        // Das Token-Geheimnis darf nie einen eingebauten Wert haben
        let cfg = ServerConfig::default();
        assert!(cfg.token.geheimnis.is_empty());
    }

    #[test]
    fn bind_adresse() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.api_bind_adresse(), "0.0.0.0:8080");
    }

    #[test]
    fn config_aus_toml_string() {
        let toml = r#"
            [netzwerk]
            api_port = 9000

            [token]
            geheimnis = "super-geheim"
            gueltigkeit_minuten = 60

            [verifizierung]
            fuer_login_erforderlich = true

            [admin]
            email = "admin@example.com"
            passwort = "bootstrap"
        "#;
        let cfg: ServerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.netzwerk.api_port, 9000);
        assert_eq!(cfg.token.geheimnis, "super-geheim");
        assert_eq!(cfg.token.gueltigkeit_minuten, 60);
        assert!(cfg.verifizierung.fuer_login_erforderlich);
        assert_eq!(cfg.admin.email.as_deref(), Some("admin@example.com"));
        // Nicht angegebene Felder behalten Standardwerte
        assert_eq!(cfg.datenbank.max_verbindungen, 5);
        assert_eq!(cfg.verifizierung.code_gueltigkeit_minuten, 15);
    }
}
