use std::sync::Arc;

use console::session::Session;
use models::{ClaimStatus, ItemKind, ItemStatus};
use service::ids::IdGenerator;
use service::storage::{mock::MemoryStorage, Collection, JsonFileStorage};
use service::RecordStore;
use uuid::Uuid;

const USERS: &str = r#"[
    {"id": 1, "name": "Admin", "email": "admin@dlfs.com", "password": "admin123", "role": "admin"},
    {"id": 2, "name": "Rita", "email": "rita@campus.edu", "password": "s3cret", "role": "user"}
]"#;

async fn store_with_users() -> anyhow::Result<RecordStore<MemoryStorage>> {
    let storage = Arc::new(MemoryStorage::default());
    storage.put_raw(Collection::Users, USERS)?;
    Ok(RecordStore::open(storage, IdGenerator::default()).await?)
}

/// Run one session over `script` and return everything it printed.
async fn drive<S: service::storage::CollectionStorage>(store: &mut RecordStore<S>, script: &str) -> anyhow::Result<String> {
    let mut out: Vec<u8> = Vec::new();
    Session::new(store, script.as_bytes(), &mut out).run().await?;
    Ok(String::from_utf8(out)?)
}

#[tokio::test]
async fn bad_login_then_exit() -> anyhow::Result<()> {
    let mut store = store_with_users().await?;
    let out = drive(&mut store, "9\n1\nnobody@x.io\nnope\n2\n").await?;
    assert!(out.contains("--- DLFS Main Menu ---"));
    assert!(out.contains("Invalid option."));
    assert_eq!(out.matches("--- DLFS Main Menu ---").count(), 3);
    assert!(out.contains("Invalid credentials."));
    assert!(!out.contains("--- User Menu ---"));
    Ok(())
}

#[tokio::test]
async fn user_reports_searches_and_claims() -> anyhow::Result<()> {
    let mut store = store_with_users().await?;
    let script = "\
1
rita@campus.edu
s3cret
1
Black Umbrella
folding
North Gate
2
Water Bottle
steel
Gym
3
2
umbrella
3
4
1
5
2
";
    let out = drive(&mut store, script).await?;
    assert!(out.contains("--- User Menu ---"));
    assert!(out.contains("Lost item reported. Item ID: ITEM-"));
    assert!(out.contains("Found item reported. Item ID: ITEM-"));
    assert!(out.contains("--- Search Results ---"));
    assert!(out.contains("Name: Black Umbrella, Location: North Gate, Type: lost, Status: reported"));
    assert!(out.contains("--- Lost Items ---"));
    assert!(!out.contains("Name: Water Bottle, Location: Gym, Status"));

    assert_eq!(store.items().len(), 2);
    assert_eq!(store.items()[0].item_type, ItemKind::Lost);
    assert_eq!(store.items()[1].item_type, ItemKind::Found);
    Ok(())
}

#[tokio::test]
async fn claim_then_admin_approval() -> anyhow::Result<()> {
    let mut store = store_with_users().await?;

    let out = drive(&mut store, "1\nrita@campus.edu\ns3cret\n2\nKeys\nred lanyard\nCafe\n5\n2\n").await?;
    assert!(out.contains("Found item reported."));
    let item_id = store.items()[0].item_id.clone();

    let out = drive(&mut store, &format!("1\nrita@campus.edu\ns3cret\n4\n{item_id}\n5\n2\n")).await?;
    assert!(out.contains("Claim submitted. Claim ID: CLM-"));
    let claim = store.claims()[0].clone();
    assert_eq!(claim.user_id, 2);
    assert_eq!(claim.item_id, item_id);

    let script = format!("1\nadmin@dlfs.com\nadmin123\n2\n1\nCLM-0\n1\n{}\n3\n2\n", claim.claim_id);
    let out = drive(&mut store, &script).await?;
    assert!(out.contains("--- Admin Menu ---"));
    assert!(out.contains(&format!("Claim ID: {}, User ID: 2, Item ID: {item_id}, Status: pending", claim.claim_id)));
    assert!(out.contains("Claim not found."));
    assert!(out.contains("Claim approved."));

    assert_eq!(store.claims()[0].status, ClaimStatus::Approved);
    assert_eq!(store.items()[0].status, ItemStatus::Claimed);
    Ok(())
}

#[tokio::test]
async fn empty_catalog_messages() -> anyhow::Result<()> {
    let mut store = store_with_users().await?;
    let script = "1\nrita@campus.edu\ns3cret\n3\n1\n3\n2\nanything\n3\n3\nLibrary\n3\n4\n2\n5\n2\n";
    let out = drive(&mut store, script).await?;
    assert!(out.contains("No items in the system."));
    assert!(out.contains("No items found with that keyword."));
    assert!(out.contains("No items found in that location."));
    assert!(out.contains("No found items found."));
    Ok(())
}

#[tokio::test]
async fn end_of_input_ends_session_anywhere() -> anyhow::Result<()> {
    let mut store = store_with_users().await?;
    // input stops in the middle of a report
    let out = drive(&mut store, "1\nrita@campus.edu\ns3cret\n1\nHalf a report\n").await?;
    assert!(out.ends_with("Description: "));
    assert!(store.items().is_empty());

    let out = drive(&mut store, "").await?;
    assert!(out.ends_with("Choose an option: "));
    Ok(())
}

#[tokio::test]
async fn storage_failure_is_reported_and_session_continues() -> anyhow::Result<()> {
    let storage = Arc::new(MemoryStorage::default());
    storage.put_raw(Collection::Users, USERS)?;
    let mut store = RecordStore::open(Arc::clone(&storage), IdGenerator::default()).await?;

    storage.fail_saves(true);
    let out = drive(&mut store, "1\nrita@campus.edu\ns3cret\n4\nITEM-1234\n5\n2\n").await?;
    assert!(out.contains("Operation failed: storage error"));
    assert!(out.contains("--- User Menu ---"));
    assert!(store.claims().is_empty());
    Ok(())
}

#[tokio::test]
async fn damaged_items_file_blocks_reports_but_not_claims() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("dlfs_console_{}", Uuid::new_v4()));
    tokio::fs::create_dir_all(&dir).await?;
    // second entry has a numeric name
    let items = r#"[
    {"item_id": "ITEM-1001", "name": "Scarf", "description": "", "location": "Hall", "item_type": "lost", "status": "reported"},
    {"item_id": "ITEM-1002", "name": 7, "description": "", "location": "Hall", "item_type": "lost", "status": "reported"}
]"#;
    tokio::fs::write(dir.join("items.json"), items).await?;
    tokio::fs::write(dir.join("users.json"), USERS).await?;

    let storage = Arc::new(JsonFileStorage::new(&dir).await?);
    let mut store = RecordStore::open(storage, IdGenerator::default()).await?;
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.partly_loaded(), &[Collection::Items]);

    let out = drive(&mut store, "1\nrita@campus.edu\ns3cret\n1\nPen\nblue\nDesk\n4\nITEM-1001\n5\n2\n").await?;
    assert!(out.contains("Operation failed: collection items was only partly loaded"));
    assert!(out.contains("Claim submitted. Claim ID: CLM-"));

    assert_eq!(tokio::fs::read_to_string(dir.join("items.json")).await?, items);
    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}

#[tokio::test]
async fn file_backed_state_survives_restart() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("dlfs_console_{}", Uuid::new_v4()));

    {
        let storage = Arc::new(JsonFileStorage::new(&dir).await?);
        let mut store = RecordStore::open(storage, IdGenerator::default()).await?;
        // fresh directory: only the default admin exists
        assert_eq!(store.users().len(), 1);
        store
            .report_item(models::ItemReport::new("Glasses", "tortoiseshell", "Bus stop", ItemKind::Found), 1)
            .await?;
    }

    let storage = Arc::new(JsonFileStorage::new(&dir).await?);
    let mut store = RecordStore::open(storage, IdGenerator::default()).await?;
    let out = drive(&mut store, "1\nadmin@dlfs.com\nadmin123\n3\n2\n").await?;
    assert!(out.contains("--- Admin Menu ---"));
    assert_eq!(store.items().len(), 1);
    assert_eq!(store.items()[0].name, "Glasses");

    let _ = tokio::fs::remove_dir_all(&dir).await;
    Ok(())
}
