//! pfoertner-auth – Auth- und Verifizierungs-Workflow
//!
//! Kernlogik des Dienstes: Passwort-Hashing, zustandslose Session-Tokens,
//! einmalige Verifizierungscodes und die darauf aufbauenden Konto- und
//! Admin-Workflows. Die HTTP-Schicht (pfoertner-api) ruft ausschliesslich
//! in dieses Crate hinein.

pub mod admin;
pub mod error;
pub mod password;
pub mod service;
pub mod token;
pub mod verification;

pub use admin::AdminService;
pub use error::{AuthError, AuthResult};
pub use service::{KontoService, WorkflowKonfig};
pub use token::TokenService;
pub use verification::VerifizierungsService;
