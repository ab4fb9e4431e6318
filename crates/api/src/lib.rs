//! pfoertner-api – REST-Schnittstelle
//!
//! Duenne HTTP-Schicht ueber dem Auth-Workflow: Routen, Bearer-Token-
//! Extraktion, Fehler-auf-Status-Abbildung. Domaenenfehler gehen mit
//! stabilem Statuscode und generischer Nachricht an den Client, interne
//! Fehler werden geloggt und als generischer 500 gemeldet.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;

use std::sync::Arc;

use axum::{
    http::{HeaderMap, StatusCode},
    response::Response,
};

use pfoertner_auth::{AdminService, AuthError, KontoService};
use pfoertner_db::{models::KontoRecord, SqliteDb};

use crate::middleware::{bearer_token, fehler_antwort};

/// Konkrete Service-Typen des laufenden Servers
pub type Konten = KontoService<SqliteDb, SqliteDb>;
pub type Admin = AdminService<SqliteDb>;

/// Axum-State fuer den REST-Server
#[derive(Clone)]
pub struct AppState {
    pub konten: Arc<Konten>,
    pub admin: Arc<Admin>,
}

impl AppState {
    pub fn neu(konten: Arc<Konten>, admin: Arc<Admin>) -> Self {
        Self { konten, admin }
    }
}

/// HTTP-Status fuer einen Workflow-Fehler
pub fn http_status(fehler: &AuthError) -> StatusCode {
    match fehler {
        AuthError::EmailVergeben(_) | AuthError::CodeUngueltig => StatusCode::BAD_REQUEST,
        AuthError::KontoNichtGefunden(_) => StatusCode::NOT_FOUND,
        AuthError::UngueltigeAnmeldedaten
        | AuthError::NichtVerifiziert
        | AuthError::TokenUngueltig
        | AuthError::TokenAbgelaufen
        | AuthError::KeinAdmin => StatusCode::UNAUTHORIZED,
        AuthError::PasswortHashing(_) | AuthError::Datenbank(_) | AuthError::Intern(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Baut die Fehlerantwort fuer einen Workflow-Fehler
///
/// Interne Fehler verlassen den Prozess nur als generische Meldung;
/// der volle Kontext landet im Log.
pub fn auth_fehler_antwort(fehler: &AuthError) -> Response {
    let status = http_status(fehler);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(fehler = %fehler, "Interner Fehler im Auth-Workflow");
        return fehler_antwort(status, "Interner Fehler");
    }
    fehler_antwort(status, &fehler.to_string())
}

/// Loest das Konto zum Bearer-Token des Requests auf
pub async fn konto_aus_headers(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<KontoRecord, Response> {
    let token = bearer_token(headers).ok_or_else(|| {
        fehler_antwort(StatusCode::UNAUTHORIZED, "Authorization-Header fehlt")
    })?;

    state
        .konten
        .konto_zum_token(token)
        .await
        .map_err(|e| auth_fehler_antwort(&e))
}

/// Wie [`konto_aus_headers`], verlangt zusaetzlich das Admin-Flag
pub async fn admin_aus_headers(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<KontoRecord, Response> {
    let konto = konto_aus_headers(headers, state).await?;
    if !konto.is_admin {
        tracing::warn!(email = %konto.email, "Admin-Route ohne Admin-Flag aufgerufen");
        return Err(auth_fehler_antwort(&AuthError::KeinAdmin));
    }
    Ok(konto)
}

pub use server::{RestServer, RestServerKonfig};
