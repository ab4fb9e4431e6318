//! SQLite-Implementierung des VerificationCodeRepository
//!
//! Das Einloesen ist ein einzelnes bedingtes DELETE: Konto, Code und
//! Ablaufzeit werden in der WHERE-Klausel geprueft, sodass von mehreren
//! gleichzeitigen Einloesungsversuchen hoechstens einer Erfolg hat.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{CodeRecord, NeuerCode};
use crate::repository::{DbResult, VerificationCodeRepository};
use crate::sqlite::pool::SqliteDb;

impl VerificationCodeRepository for SqliteDb {
    async fn replace_for_account(&self, data: NeuerCode<'_>) -> DbResult<CodeRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        // Alte Codes desselben Kontos werden in derselben Transaktion
        // verworfen: pro Konto lebt hoechstens ein Code
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM verification_codes WHERE account_id = ?")
            .bind(data.account_id.to_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO verification_codes (id, account_id, code, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.account_id.to_string())
        .bind(data.code)
        .bind(data.expires_at.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(CodeRecord {
            id,
            account_id: data.account_id,
            code: data.code.to_string(),
            expires_at: data.expires_at,
            created_at: now,
        })
    }

    async fn consume(&self, account_id: Uuid, code: &str) -> DbResult<bool> {
        let affected = sqlx::query(
            "DELETE FROM verification_codes
             WHERE account_id = ? AND code = ? AND expires_at > ?",
        )
        .bind(account_id.to_string())
        .bind(code)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn purge_expired(&self) -> DbResult<u64> {
        let affected = sqlx::query("DELETE FROM verification_codes WHERE expires_at <= ?")
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected)
    }
}
