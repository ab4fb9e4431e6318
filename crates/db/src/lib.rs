//! pfoertner-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit: die Auth-Services
//! arbeiten gegen die Traits in [`repository`], die konkrete
//! SQLite-Implementierung liegt unter [`sqlite`].

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use repository::{
    AccountRepository, DatabaseConfig, DbResult, VerificationCodeRepository,
};
pub use sqlite::SqliteDb;
