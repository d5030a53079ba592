use anyhow::Result;
use podabot::db;
use podabot::localization::Language;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn setup_test_db() -> Result<SqlitePool> {
    // One connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    db::init_schema(&pool).await?;
    Ok(pool)
}

#[tokio::test]
async fn test_cattle_record_round_trip() -> Result<()> {
    let pool = setup_test_db().await?;

    db::upsert_cattle(&pool, 42, "Brown cow").await?;
    assert_eq!(db::get_cattle(&pool, 42).await?.as_deref(), Some("Brown cow"));
    assert_eq!(db::get_cattle(&pool, 43).await?, None);

    Ok(())
}

/// Re-adding an existing id replaces the description but keeps the photos
/// already stored for it. This mirrors the registry's historical behavior
/// and is relied upon by the add workflow; changing it needs a product
/// decision, not a code fix.
#[tokio::test]
async fn test_overwrite_keeps_existing_photos() -> Result<()> {
    let pool = setup_test_db().await?;

    db::upsert_cattle(&pool, 7, "first description").await?;
    db::append_cattle_photo(&pool, 7, "photo-old-1").await?;
    db::append_cattle_photo(&pool, 7, "photo-old-2").await?;

    db::upsert_cattle(&pool, 7, "second description").await?;
    db::append_cattle_photo(&pool, 7, "photo-new").await?;

    assert_eq!(
        db::get_cattle(&pool, 7).await?.as_deref(),
        Some("second description")
    );
    assert_eq!(
        db::list_cattle_photos(&pool, 7).await?,
        vec!["photo-old-1", "photo-old-2", "photo-new"]
    );

    Ok(())
}

#[tokio::test]
async fn test_photo_order_is_submission_order() -> Result<()> {
    let pool = setup_test_db().await?;

    db::upsert_cattle(&pool, 1, "ordered").await?;
    for file_id in ["a", "b", "c"] {
        db::append_cattle_photo(&pool, 1, file_id).await?;
    }

    assert_eq!(db::list_cattle_photos(&pool, 1).await?, vec!["a", "b", "c"]);
    assert!(db::list_cattle_photos(&pool, 2).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_delete_removes_record_and_photos() -> Result<()> {
    let pool = setup_test_db().await?;

    db::upsert_cattle(&pool, 5, "to be deleted").await?;
    db::append_cattle_photo(&pool, 5, "photo-1").await?;

    assert!(db::delete_cattle(&pool, 5).await?);
    assert_eq!(db::get_cattle(&pool, 5).await?, None);
    assert!(db::list_cattle_photos(&pool, 5).await?.is_empty());

    // Second delete reports a miss.
    assert!(!db::delete_cattle(&pool, 5).await?);

    Ok(())
}

#[tokio::test]
async fn test_delete_never_created_id() -> Result<()> {
    let pool = setup_test_db().await?;
    assert!(!db::delete_cattle(&pool, 999).await?);
    Ok(())
}

#[tokio::test]
async fn test_user_profile_lifecycle() -> Result<()> {
    let pool = setup_test_db().await?;

    assert_eq!(db::get_user(&pool, 100).await?, None);

    // First interaction creates the row lazily.
    db::set_user_language(&pool, 100, Language::Latin).await?;
    let user = db::get_user(&pool, 100).await?.unwrap();
    assert_eq!(user.language, Some(Language::Latin));
    assert_eq!(user.phone_number, None);
    assert!(!user.phone_verified());

    // Setting the phone preserves the language.
    db::set_user_phone(&pool, 100, "+998901234567").await?;
    let user = db::get_user(&pool, 100).await?.unwrap();
    assert_eq!(user.language, Some(Language::Latin));
    assert_eq!(user.phone_number.as_deref(), Some("+998901234567"));
    assert!(user.phone_verified());

    // Changing the language preserves the phone.
    db::set_user_language(&pool, 100, Language::Cyrillic).await?;
    let user = db::get_user(&pool, 100).await?.unwrap();
    assert_eq!(user.language, Some(Language::Cyrillic));
    assert_eq!(user.phone_number.as_deref(), Some("+998901234567"));

    Ok(())
}

#[tokio::test]
async fn test_phone_row_created_before_language() -> Result<()> {
    let pool = setup_test_db().await?;

    // Contact share can arrive before any language choice.
    db::set_user_phone(&pool, 200, "+998900000000").await?;
    let user = db::get_user(&pool, 200).await?.unwrap();
    assert_eq!(user.language, None);
    assert!(user.phone_verified());

    Ok(())
}
