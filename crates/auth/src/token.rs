//! Session-Tokens als signierte JWTs
//!
//! Tokens sind zustandslos: Gueltigkeit ergibt sich ausschliesslich aus
//! Signatur und `exp`-Claim, serverseitig wird nichts gespeichert.
//! Schluessel und Laufzeit sind Prozess-Konfiguration; ein Wechsel des
//! Schluessels invalidiert alle umlaufenden Tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Claims eines Session-Tokens
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subjekt: die E-Mail des Kontos
    sub: String,
    /// Absoluter Ablauf in Sekunden seit Epoche
    exp: i64,
}

/// Stellt Session-Tokens aus und prueft sie (HS256)
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    gueltigkeit_minuten: i64,
}

impl TokenService {
    pub fn neu(geheimnis: &str, gueltigkeit_minuten: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(geheimnis.as_bytes()),
            decoding: DecodingKey::from_secret(geheimnis.as_bytes()),
            gueltigkeit_minuten,
        }
    }

    /// Stellt ein signiertes Token fuer das Subjekt aus
    ///
    /// Der Ablauf ist absolut: jetzt + konfigurierte Laufzeit.
    pub fn ausstellen(&self, subjekt: &str) -> AuthResult<String> {
        let ablauf = Utc::now() + chrono::Duration::minutes(self.gueltigkeit_minuten);
        let claims = Claims {
            sub: subjekt.to_string(),
            exp: ablauf.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AuthError::intern(format!("Token-Erstellung fehlgeschlagen: {e}")))
    }

    /// Prueft ein Token und gibt das Subjekt zurueck
    ///
    /// Abgelaufene Tokens melden `TokenAbgelaufen`; falsche Signatur oder
    /// fehlende Claims melden `TokenUngueltig`.
    pub fn pruefen(&self, token: &str) -> AuthResult<String> {
        let mut validation = Validation::default();
        validation.leeway = 0; // kein Toleranzfenster beim Ablauf

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|daten| daten.claims.sub)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenAbgelaufen,
                _ => AuthError::TokenUngueltig,
            })
    }
}
