//! Integration-Tests fuer VerificationCodeRepository (In-Memory SQLite)

use chrono::{Duration, Utc};
use pfoertner_db::{
    models::{NeuerCode, NeuesKonto},
    AccountRepository, SqliteDb, VerificationCodeRepository,
};
use uuid::Uuid;

async fn db_mit_konto() -> (SqliteDb, Uuid) {
    let db = SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden");

    let konto = AccountRepository::create(
        &db,
        NeuesKonto {
            email: "code@example.com",
            password_hash: "hash",
            is_verified: false,
            is_admin: false,
        },
    )
    .await
    .expect("Konto erstellen fehlgeschlagen");

    (db, konto.id)
}

#[tokio::test]
async fn code_ausstellen_und_einloesen() {
    let (db, konto_id) = db_mit_konto().await;

    let code = db
        .replace_for_account(NeuerCode {
            account_id: konto_id,
            code: "a1b2c3",
            expires_at: Utc::now() + Duration::minutes(15),
        })
        .await
        .expect("Code erstellen fehlgeschlagen");

    assert_eq!(code.code, "a1b2c3");
    assert_eq!(code.account_id, konto_id);

    let eingeloest = db.consume(konto_id, "a1b2c3").await.unwrap();
    assert!(eingeloest);
}

#[tokio::test]
async fn code_ist_nur_einmal_einloesbar() {
    let (db, konto_id) = db_mit_konto().await;

    db.replace_for_account(NeuerCode {
        account_id: konto_id,
        code: "deadbe",
        expires_at: Utc::now() + Duration::minutes(15),
    })
    .await
    .unwrap();

    assert!(db.consume(konto_id, "deadbe").await.unwrap());
    // Der zweite Versuch mit demselben Code schlaegt fehl
    assert!(!db.consume(konto_id, "deadbe").await.unwrap());
}

#[tokio::test]
async fn abgelaufener_code_wird_abgelehnt() {
    let (db, konto_id) = db_mit_konto().await;

    db.replace_for_account(NeuerCode {
        account_id: konto_id,
        code: "cafe00",
        expires_at: Utc::now() - Duration::seconds(1),
    })
    .await
    .unwrap();

    assert!(!db.consume(konto_id, "cafe00").await.unwrap());
}

#[tokio::test]
async fn falscher_code_wird_abgelehnt() {
    let (db, konto_id) = db_mit_konto().await;

    db.replace_for_account(NeuerCode {
        account_id: konto_id,
        code: "112233",
        expires_at: Utc::now() + Duration::minutes(15),
    })
    .await
    .unwrap();

    assert!(!db.consume(konto_id, "998877").await.unwrap());
    // Der richtige Code bleibt dabei einloesbar
    assert!(db.consume(konto_id, "112233").await.unwrap());
}

#[tokio::test]
async fn neuer_code_verdraengt_alten() {
    let (db, konto_id) = db_mit_konto().await;

    db.replace_for_account(NeuerCode {
        account_id: konto_id,
        code: "erster",
        expires_at: Utc::now() + Duration::minutes(15),
    })
    .await
    .unwrap();

    db.replace_for_account(NeuerCode {
        account_id: konto_id,
        code: "zweite",
        expires_at: Utc::now() + Duration::minutes(15),
    })
    .await
    .unwrap();

    // Der alte Code ist verworfen, auch wenn er zeitlich noch gueltig waere
    assert!(!db.consume(konto_id, "erster").await.unwrap());
    assert!(db.consume(konto_id, "zweite").await.unwrap());
}

#[tokio::test]
async fn abgelaufene_codes_bereinigen() {
    let (db, konto_id) = db_mit_konto().await;

    let zweites_konto = AccountRepository::create(
        &db,
        NeuesKonto {
            email: "zwei@example.com",
            password_hash: "hash",
            is_verified: false,
            is_admin: false,
        },
    )
    .await
    .unwrap();

    db.replace_for_account(NeuerCode {
        account_id: konto_id,
        code: "alt001",
        expires_at: Utc::now() - Duration::minutes(1),
    })
    .await
    .unwrap();

    db.replace_for_account(NeuerCode {
        account_id: zweites_konto.id,
        code: "frisch",
        expires_at: Utc::now() + Duration::minutes(15),
    })
    .await
    .unwrap();

    let bereinigt = db.purge_expired().await.unwrap();
    assert_eq!(bereinigt, 1);

    // Der frische Code ueberlebt die Bereinigung
    assert!(db.consume(zweites_konto.id, "frisch").await.unwrap());
}

#[tokio::test]
async fn konto_loeschen_entfernt_codes() {
    let (db, konto_id) = db_mit_konto().await;

    db.replace_for_account(NeuerCode {
        account_id: konto_id,
        code: "kaskad",
        expires_at: Utc::now() + Duration::minutes(15),
    })
    .await
    .unwrap();

    AccountRepository::delete(&db, konto_id).await.unwrap();

    // Der Code haengt am Konto und ist mitgeloescht
    assert!(!db.consume(konto_id, "kaskad").await.unwrap());
}
