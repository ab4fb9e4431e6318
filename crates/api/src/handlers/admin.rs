//! REST-Handler fuer Admin-Endpunkte
//!
//! Jeder Handler loest zuerst das Bearer-Token auf und prueft das
//! Admin-Flag des aufgeloesten Kontos.

use axum::{extract::{Path, State}, http::{HeaderMap, StatusCode}, response::{IntoResponse, Json, Response}};
use serde::Deserialize;
use serde_json::json;

use crate::handlers::konto_json;
use crate::{admin_aus_headers, auth_fehler_antwort, AppState};

pub async fn list_users(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(r) = admin_aus_headers(&headers, &state).await { return r; }
    match state.admin.konten_auflisten().await {
        Ok(konten) => {
            let liste: Vec<_> = konten.iter().map(konto_json).collect();
            (StatusCode::OK, Json(json!({ "konten": liste }))).into_response()
        }
        Err(e) => auth_fehler_antwort(&e),
    }
}

pub async fn get_user(State(state): State<AppState>, Path(email): Path<String>, headers: HeaderMap) -> Response {
    if let Err(r) = admin_aus_headers(&headers, &state).await { return r; }
    match state.admin.konto_laden(&email).await {
        Ok(konto) => (StatusCode::OK, Json(konto_json(&konto))).into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

pub async fn delete_user(State(state): State<AppState>, Path(email): Path<String>, headers: HeaderMap) -> Response {
    if let Err(r) = admin_aus_headers(&headers, &state).await { return r; }
    match state.admin.konto_loeschen(&email).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

pub async fn purge_users(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(r) = admin_aus_headers(&headers, &state).await { return r; }
    match state.admin.nicht_admins_loeschen().await {
        Ok(anzahl) => (StatusCode::OK, Json(json!({ "geloescht": anzahl }))).into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

#[derive(Debug, Deserialize)]
pub struct NeuesKontoBody { pub email: String, pub passwort: String }

pub async fn create_user(State(state): State<AppState>, headers: HeaderMap, Json(body): Json<NeuesKontoBody>) -> Response {
    if let Err(r) = admin_aus_headers(&headers, &state).await { return r; }
    match state.admin.konto_anlegen(&body.email, &body.passwort).await {
        Ok(konto) => (StatusCode::CREATED, Json(konto_json(&konto))).into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}
