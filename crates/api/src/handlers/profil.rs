//! REST-Handler fuer das eigene Profil

use axum::{extract::State, http::{HeaderMap, StatusCode}, response::{IntoResponse, Json, Response}};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::PASSWORT_MASKE;
use crate::{auth_fehler_antwort, konto_aus_headers, AppState};

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let konto = match konto_aus_headers(&headers, &state).await { Ok(k) => k, Err(r) => return r };
    (StatusCode::OK, Json(json!({ "email": konto.email }))).into_response()
}

pub async fn get_profil(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let konto = match konto_aus_headers(&headers, &state).await { Ok(k) => k, Err(r) => return r };
    (StatusCode::OK, Json(json!({
        "email": konto.email,
        "passwort": PASSWORT_MASKE,
        "verifiziert": konto.is_verified,
    }))).into_response()
}

#[derive(Debug, Deserialize)]
pub struct ProfilUpdateBody {
    pub email: Option<String>,
    pub passwort: Option<String>,
}

pub async fn put_profil(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<ProfilUpdateBody>,
) -> Response {
    let konto = match konto_aus_headers(&headers, &state).await { Ok(k) => k, Err(r) => return r };

    match state
        .konten
        .profil_aendern(konto.id, body.email.as_deref(), body.passwort.as_deref())
        .await
    {
        Ok(aktualisiert) => (StatusCode::OK, Json(json!({
            "nachricht": "Profil aktualisiert.",
            "konto": { "email": aktualisiert.email, "passwort": PASSWORT_MASKE },
        }))).into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}
