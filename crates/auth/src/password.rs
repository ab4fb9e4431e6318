//! Passwort-Hashing mit Argon2id
//!
//! Das Salt steckt im PHC-String, die Verifikation ist damit
//! selbsttragend. Klartext-Passwoerter werden weder geloggt noch
//! zurueckgegeben.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AuthError;

/// Hasht ein Passwort mit Argon2id und einem zufaelligen Salt
///
/// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
pub fn passwort_hashen(passwort: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(passwort.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswortHashing(e.to_string()))
}

/// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
///
/// Gibt `true` zurueck wenn das Passwort korrekt ist. Ein nicht parsbarer
/// gespeicherter Hash zaehlt als fehlgeschlagene Verifikation, nicht als
/// Fehler.
pub fn passwort_verifizieren(passwort: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!(fehler = %e, "Gespeicherter Passwort-Hash nicht parsbar");
            return Ok(false);
        }
    };

    match Argon2::default().verify_password(passwort.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashen_und_verifizieren() {
        let passwort = "sehr_geheim_123!";
        let hash = passwort_hashen(passwort).expect("Hashing fehlgeschlagen");

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains(passwort), "Hash darf den Klartext nicht enthalten");

        let korrekt = passwort_verifizieren(passwort, &hash).expect("Verifikation fehlgeschlagen");
        assert!(korrekt);
    }

    #[test]
    fn falsches_passwort_wird_abgelehnt() {
        let hash = passwort_hashen("richtig").expect("Hashing fehlgeschlagen");

        let korrekt = passwort_verifizieren("falsch", &hash).expect("Verifikation fehlgeschlagen");
        assert!(!korrekt);
    }

    #[test]
    fn gleiche_passwoerter_unterschiedliche_hashes() {
        let hash1 = passwort_hashen("gleich").unwrap();
        let hash2 = passwort_hashen("gleich").unwrap();

        // Zufaelliges Salt: identische Eingaben ergeben verschiedene Hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn kaputter_hash_zaehlt_als_fehlschlag() {
        let ergebnis = passwort_verifizieren("passwort", "kein_phc_string");
        assert_eq!(ergebnis.unwrap(), false);
    }
}
