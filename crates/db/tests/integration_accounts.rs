//! Integration-Tests fuer AccountRepository (In-Memory SQLite)

use pfoertner_db::{
    models::{KontoUpdate, NeuesKonto},
    AccountRepository, SqliteDb,
};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

fn neues_konto(email: &str) -> NeuesKonto<'_> {
    NeuesKonto {
        email,
        password_hash: "hash",
        is_verified: false,
        is_admin: false,
    }
}

#[tokio::test]
async fn konto_erstellen_und_laden() {
    let db = db().await;

    let konto = AccountRepository::create(&db, neues_konto("alice@example.com"))
        .await
        .expect("Konto erstellen fehlgeschlagen");

    assert_eq!(konto.email, "alice@example.com");
    assert!(!konto.is_verified);
    assert!(!konto.is_admin);

    let geladen = AccountRepository::get_by_id(&db, konto.id)
        .await
        .expect("get_by_id fehlgeschlagen")
        .expect("Konto sollte gefunden werden");

    assert_eq!(geladen.id, konto.id);
    assert_eq!(geladen.email, "alice@example.com");
}

#[tokio::test]
async fn konto_nach_email_laden() {
    let db = db().await;

    AccountRepository::create(&db, neues_konto("bob@example.com"))
        .await
        .unwrap();

    let gefunden = AccountRepository::get_by_email(&db, "bob@example.com")
        .await
        .unwrap()
        .expect("Konto 'bob' sollte gefunden werden");

    assert_eq!(gefunden.email, "bob@example.com");

    let nicht_gefunden = AccountRepository::get_by_email(&db, "unbekannt@example.com")
        .await
        .unwrap();
    assert!(nicht_gefunden.is_none());
}

#[tokio::test]
async fn konto_email_unique() {
    let db = db().await;

    AccountRepository::create(&db, neues_konto("charlie@example.com"))
        .await
        .unwrap();

    let err = AccountRepository::create(&db, neues_konto("charlie@example.com")).await;

    assert!(err.is_err());
    assert!(err.unwrap_err().ist_eindeutigkeit());
}

#[tokio::test]
async fn konto_aktualisieren() {
    let db = db().await;

    let konto = AccountRepository::create(&db, neues_konto("dave@example.com"))
        .await
        .unwrap();

    let aktualisiert = AccountRepository::update(
        &db,
        konto.id,
        KontoUpdate {
            password_hash: Some("neues_hash".into()),
            is_verified: Some(true),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(aktualisiert.password_hash, "neues_hash");
    assert!(aktualisiert.is_verified);
    assert_eq!(aktualisiert.email, "dave@example.com");
}

#[tokio::test]
async fn email_wechsel_auf_vergebene_email_schlaegt_fehl() {
    let db = db().await;

    let eva = AccountRepository::create(&db, neues_konto("eva@example.com"))
        .await
        .unwrap();
    AccountRepository::create(&db, neues_konto("frank@example.com"))
        .await
        .unwrap();

    let err = AccountRepository::update(
        &db,
        eva.id,
        KontoUpdate {
            email: Some("frank@example.com".into()),
            ..Default::default()
        },
    )
    .await;

    assert!(err.is_err());
    assert!(err.unwrap_err().ist_eindeutigkeit());

    // Beide Konten bleiben unveraendert
    let eva_danach = AccountRepository::get_by_id(&db, eva.id).await.unwrap().unwrap();
    assert_eq!(eva_danach.email, "eva@example.com");
    let frank_danach = AccountRepository::get_by_email(&db, "frank@example.com")
        .await
        .unwrap();
    assert!(frank_danach.is_some());
}

#[tokio::test]
async fn konto_loeschen() {
    let db = db().await;

    let konto = AccountRepository::create(&db, neues_konto("gina@example.com"))
        .await
        .unwrap();

    let geloescht = AccountRepository::delete(&db, konto.id).await.unwrap();
    assert!(geloescht);

    let geladen = AccountRepository::get_by_id(&db, konto.id).await.unwrap();
    assert!(geladen.is_none());

    // Zweites Loeschen findet nichts mehr
    let nochmal = AccountRepository::delete(&db, konto.id).await.unwrap();
    assert!(!nochmal);
}

#[tokio::test]
async fn nicht_admins_loeschen_verschont_admins() {
    let db = db().await;

    AccountRepository::create(
        &db,
        NeuesKonto {
            email: "admin@example.com",
            password_hash: "hash",
            is_verified: true,
            is_admin: true,
        },
    )
    .await
    .unwrap();
    AccountRepository::create(&db, neues_konto("a@example.com")).await.unwrap();
    AccountRepository::create(&db, neues_konto("b@example.com")).await.unwrap();

    let anzahl = AccountRepository::delete_non_admins(&db).await.unwrap();
    assert_eq!(anzahl, 2);

    let rest = AccountRepository::list(&db).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].email, "admin@example.com");
    assert!(rest[0].is_admin);

    // Ohne Nicht-Admins ist die Anzahl null, kein Fehler
    let nochmal = AccountRepository::delete_non_admins(&db).await.unwrap();
    assert_eq!(nochmal, 0);
}

#[tokio::test]
async fn konten_auflisten_sortiert() {
    let db = db().await;

    for email in &["zeta@example.com", "alpha@example.com", "mitte@example.com"] {
        AccountRepository::create(&db, neues_konto(email)).await.unwrap();
    }

    let alle = AccountRepository::list(&db).await.unwrap();
    assert_eq!(alle.len(), 3);
    assert_eq!(alle[0].email, "alpha@example.com");
    assert_eq!(alle[2].email, "zeta@example.com");
}
