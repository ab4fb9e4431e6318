//! Mail-Vorlagen (reiner Text)

/// Betreff und Text fuer die Verifizierungs-Mail nach der Registrierung
pub fn verifizierungs_mail(code: &str, gueltigkeit_minuten: i64) -> (String, String) {
    (
        "Dein Verifizierungscode".to_string(),
        format!(
            "Willkommen!\n\n\
             Dein Verifizierungscode lautet: {code}\n\n\
             Der Code ist {gueltigkeit_minuten} Minuten gueltig und kann nur einmal verwendet werden."
        ),
    )
}

/// Betreff und Text fuer die Passwort-Zuruecksetzen-Mail
pub fn passwort_reset_mail(code: &str, gueltigkeit_minuten: i64) -> (String, String) {
    (
        "Passwort zuruecksetzen".to_string(),
        format!(
            "Fuer dein Konto wurde das Zuruecksetzen des Passworts angefordert.\n\n\
             Dein Code lautet: {code}\n\n\
             Der Code ist {gueltigkeit_minuten} Minuten gueltig. \
             Falls du die Anfrage nicht gestellt hast, kannst du diese Mail ignorieren."
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifizierungs_mail_enthaelt_code() {
        let (betreff, text) = verifizierungs_mail("a1b2c3", 15);
        assert!(!betreff.is_empty());
        assert!(text.contains("a1b2c3"));
        assert!(text.contains("15 Minuten"));
    }

    #[test]
    fn reset_mail_enthaelt_code() {
        let (_, text) = passwort_reset_mail("00ff11", 15);
        assert!(text.contains("00ff11"));
    }
}
