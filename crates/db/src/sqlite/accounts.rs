//! SQLite-Implementierung des AccountRepository

use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::{KontoRecord, KontoUpdate, NeuesKonto};
use crate::repository::{AccountRepository, DbResult};
use crate::sqlite::pool::SqliteDb;

impl AccountRepository for SqliteDb {
    async fn create(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();
        let now = Utc::now();
        let now_str = now.to_rfc3339();

        sqlx::query(
            "INSERT INTO accounts (id, email, password_hash, is_verified, is_admin, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id_str)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(data.is_verified as i64)
        .bind(data.is_admin as i64)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit(format!("E-Mail '{}' bereits vergeben", data.email))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(KontoRecord {
            id,
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            is_verified: data.is_verified,
            is_admin: data.is_admin,
            created_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KontoRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, is_verified, is_admin, created_at
             FROM accounts WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn get_by_email(&self, email: &str) -> DbResult<Option<KontoRecord>> {
        let row = sqlx::query(
            "SELECT id, email, password_hash, is_verified, is_admin, created_at
             FROM accounts WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn update(&self, id: Uuid, data: KontoUpdate) -> DbResult<KontoRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.email.is_some() {
            sets.push("email = ?");
        }
        if data.password_hash.is_some() {
            sets.push("password_hash = ?");
        }
        if data.is_verified.is_some() {
            sets.push("is_verified = ?");
        }

        if sets.is_empty() {
            return self
                .get_by_id(id)
                .await?
                .ok_or_else(|| DbError::nicht_gefunden(format!("Konto {id}")));
        }

        let sql = format!("UPDATE accounts SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.email {
            q = q.bind(v);
        }
        if let Some(ref v) = data.password_hash {
            q = q.bind(v);
        }
        if let Some(v) = data.is_verified {
            q = q.bind(v as i64);
        }
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await.map_err(|e| {
            let msg = e.to_string();
            if msg.contains("UNIQUE") || msg.contains("unique") {
                DbError::Eindeutigkeit("E-Mail bereits vergeben".into())
            } else {
                DbError::Sqlx(e)
            }
        })?
        .rows_affected();

        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Konto {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Konto nach Update nicht gefunden"))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }

    async fn list(&self) -> DbResult<Vec<KontoRecord>> {
        let rows = sqlx::query(
            "SELECT id, email, password_hash, is_verified, is_admin, created_at
             FROM accounts ORDER BY email",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_konto).collect()
    }

    async fn delete_non_admins(&self) -> DbResult<u64> {
        let affected = sqlx::query("DELETE FROM accounts WHERE is_admin = 0")
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected)
    }
}

fn row_to_konto(row: &sqlx::sqlite::SqliteRow) -> DbResult<KontoRecord> {
    let id_str: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id_str)
        .map_err(|e| DbError::intern(format!("Ungueltige UUID '{id_str}': {e}")))?;

    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    let is_verified: i64 = row.try_get("is_verified")?;
    let is_admin: i64 = row.try_get("is_admin")?;

    Ok(KontoRecord {
        id,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        is_verified: is_verified != 0,
        is_admin: is_admin != 0,
        created_at,
    })
}
