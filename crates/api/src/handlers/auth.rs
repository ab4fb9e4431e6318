//! REST-Handler fuer Registrierung, Verifizierung und Login

use axum::{extract::State, http::StatusCode, response::{IntoResponse, Json, Response}};
use serde::Deserialize;
use serde_json::json;

use crate::{auth_fehler_antwort, AppState};

#[derive(Debug, Deserialize)]
pub struct AnmeldedatenBody { pub email: String, pub passwort: String }

#[derive(Debug, Deserialize)]
pub struct VerifyCodeBody { pub email: String, pub code: String }

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordBody { pub email: String }

#[derive(Debug, Deserialize)]
pub struct ResetPasswordBody { pub email: String, pub code: String, pub passwort: String }

/// Antwortkoerper fuer ausgestellte Session-Tokens
fn token_antwort(token: String) -> Response {
    (StatusCode::OK, Json(json!({ "access_token": token, "token_type": "bearer" }))).into_response()
}

pub async fn register(State(state): State<AppState>, Json(body): Json<AnmeldedatenBody>) -> Response {
    match state.konten.registrieren(&body.email, &body.passwort).await {
        Ok(_) => (StatusCode::OK, Json(json!({
            "nachricht": "Konto registriert. Der Verifizierungscode wurde per E-Mail verschickt."
        }))).into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

pub async fn verify_code(State(state): State<AppState>, Json(body): Json<VerifyCodeBody>) -> Response {
    match state.konten.code_einloesen(&body.email, &body.code).await {
        Ok(token) => token_antwort(token),
        Err(e) => auth_fehler_antwort(&e),
    }
}

pub async fn login(State(state): State<AppState>, Json(body): Json<AnmeldedatenBody>) -> Response {
    match state.konten.anmelden(&body.email, &body.passwort).await {
        Ok(token) => token_antwort(token),
        Err(e) => auth_fehler_antwort(&e),
    }
}

pub async fn forgot_password(State(state): State<AppState>, Json(body): Json<ForgotPasswordBody>) -> Response {
    match state.konten.passwort_vergessen(&body.email).await {
        // Immer dieselbe Antwort, ob das Konto existiert oder nicht
        Ok(()) => (StatusCode::OK, Json(json!({
            "nachricht": "Falls ein Konto existiert, wurde ein Code per E-Mail verschickt."
        }))).into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}

pub async fn reset_password(State(state): State<AppState>, Json(body): Json<ResetPasswordBody>) -> Response {
    match state.konten.passwort_zuruecksetzen(&body.email, &body.code, &body.passwort).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "nachricht": "Passwort zurueckgesetzt." }))).into_response(),
        Err(e) => auth_fehler_antwort(&e),
    }
}
