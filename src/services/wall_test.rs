use super::*;
use canvas::consts::{DEFAULT_ITEM_WIDTH, GRID_GAP};

#[test]
fn new_wall_defaults() {
    let new = NewWall::from_parts(None, None, None, None).unwrap();
    assert_eq!(new.name, "Untitled Wall");
    assert!((new.width - 3000.0).abs() < f64::EPSILON);
    assert!((new.height - 2000.0).abs() < f64::EPSILON);
    assert_eq!(new.background_color, "#f5f5f4");
}

#[test]
fn new_wall_blank_name_falls_back_to_default() {
    let new = NewWall::from_parts(Some("   "), None, None, None).unwrap();
    assert_eq!(new.name, DEFAULT_WALL_NAME);
}

#[test]
fn new_wall_trims_name_and_lowercases_color() {
    let new = NewWall::from_parts(Some("  Trip  "), Some(1200.0), Some(800.0), Some("#ABCDEF")).unwrap();
    assert_eq!(new.name, "Trip");
    assert!((new.width - 1200.0).abs() < f64::EPSILON);
    assert_eq!(new.background_color, "#abcdef");
}

#[test]
fn new_wall_rejects_bad_dimensions() {
    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY, MAX_WALL_DIMENSION + 1.0] {
        assert!(
            matches!(NewWall::from_parts(None, Some(bad), None, None), Err(WallError::InvalidInput(_))),
            "width {bad} should be rejected"
        );
    }
}

#[test]
fn color_formats() {
    for ok in ["#fff", "#FFFFFF", "#11223344", " #abc "] {
        assert!(normalize_color(ok).is_ok(), "{ok} should be accepted");
    }
    for bad in ["fff", "#ffff", "#gggggg", "red", "", "#"] {
        assert!(normalize_color(bad).is_err(), "{bad} should be rejected");
    }
}

#[test]
fn name_length_is_capped_in_characters() {
    let at_cap = "é".repeat(MAX_NAME_LEN);
    assert!(normalize_name(&at_cap).is_ok());
    let over = "é".repeat(MAX_NAME_LEN + 1);
    assert!(matches!(normalize_name(&over), Err(WallError::InvalidInput(_))));
}

#[test]
fn patch_requires_a_field() {
    assert!(matches!(WallPatch::default().validated(), Err(WallError::InvalidInput(_))));
}

#[test]
fn patch_rejects_blank_name() {
    let patch = WallPatch { name: Some("  ".into()), background_color: None };
    assert!(matches!(patch.validated(), Err(WallError::InvalidInput(_))));
}

#[test]
fn patch_normalizes_fields() {
    let patch = WallPatch { name: Some(" Kitchen ".into()), background_color: Some("#000".into()) }
        .validated()
        .unwrap();
    assert_eq!(patch.name.as_deref(), Some("Kitchen"));
    assert_eq!(patch.background_color.as_deref(), Some("#000"));
}

#[test]
fn initial_items_single_photo_is_centered() {
    let wall_id = Uuid::new_v4();
    let photo = Uuid::new_v4();
    let items = initial_items(wall_id, &[photo], 3000.0, 2000.0);
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.wall_id, wall_id);
    assert_eq!(item.photo_id, photo);
    assert!((item.x - 1350.0).abs() < 1e-9);
    assert!((item.y - 887.5).abs() < 1e-9);
    assert!((item.width - DEFAULT_ITEM_WIDTH).abs() < f64::EPSILON);
}

#[test]
fn initial_items_grid_and_increasing_z() {
    let photos: Vec<Uuid> = (0..5).map(|_| Uuid::new_v4()).collect();
    let items = initial_items(Uuid::new_v4(), &photos, 3000.0, 2000.0);
    assert_eq!(items.len(), 5);
    // 5 photos -> 3 columns, 2 rows.
    assert!((items[1].x - items[0].x - (DEFAULT_ITEM_WIDTH + GRID_GAP)).abs() < 1e-9);
    assert!((items[3].x - items[0].x).abs() < 1e-9);
    assert!(items[3].y > items[0].y);
    for pair in items.windows(2) {
        assert!(pair[1].z_index > pair[0].z_index);
    }
    let ids: Vec<Uuid> = items.iter().map(|i| i.photo_id).collect();
    assert_eq!(ids, photos);
}

#[test]
fn four_photos_make_a_two_by_two_grid_with_z_one_to_four() {
    let photos: Vec<Uuid> = (0..4).map(|_| Uuid::new_v4()).collect();
    let items = initial_items(Uuid::new_v4(), &photos, 3000.0, 2000.0);
    let z: Vec<i64> = items.iter().map(|i| i.z_index).collect();
    assert_eq!(z, vec![1, 2, 3, 4]);
    assert!((items[0].y - items[1].y).abs() < 1e-9);
    assert!((items[2].y - items[3].y).abs() < 1e-9);
    assert!((items[0].x - items[2].x).abs() < 1e-9);
    assert!(items[2].y > items[0].y);
    assert!(items.iter().all(|i| (i.width - 300.0).abs() < f64::EPSILON));
}

#[test]
fn initial_items_empty() {
    assert!(initial_items(Uuid::new_v4(), &[], 3000.0, 2000.0).is_empty());
}

#[test]
fn wall_from_row_maps_every_column() {
    let id = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let wall = wall_from_row((id, "A".into(), owner, 10.0, 20.0, "#fff".into(), Some("t".into()), 1, 2));
    assert_eq!(wall.id, id);
    assert_eq!(wall.owner_id, owner);
    assert_eq!(wall.share_token.as_deref(), Some("t"));
    assert_eq!((wall.created_at, wall.updated_at), (1, 2));
}

// =============================================================================
// LIVE DATABASE
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::state::test_helpers::{integration_pool, seed_photo};

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn create_list_update_delete_round_trip() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();

        let wall = create_wall(&pool, owner, &NewWall::default(), &[]).await.unwrap();
        assert_eq!(wall.name, "Untitled Wall");
        assert!(wall.share_token.is_none());

        let patch = WallPatch { name: Some("Renamed".into()), background_color: None };
        let updated = update_wall(&pool, wall.id, owner, &patch).await.unwrap();
        assert_eq!(updated.name, "Renamed");
        assert!(updated.updated_at >= wall.updated_at);

        let listed = list_walls(&pool, owner).await.unwrap();
        assert_eq!(listed.len(), 1);

        delete_wall(&pool, wall.id, owner).await.unwrap();
        assert!(matches!(get_wall(&pool, wall.id, owner).await, Err(WallError::NotFound(_))));
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn other_owners_cannot_see_wall() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();
        let wall = create_wall(&pool, owner, &NewWall::default(), &[]).await.unwrap();

        let stranger = Uuid::new_v4();
        assert!(matches!(get_wall(&pool, wall.id, stranger).await, Err(WallError::NotFound(_))));
        assert!(matches!(delete_wall(&pool, wall.id, stranger).await, Err(WallError::NotFound(_))));
        assert!(list_walls(&pool, stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn create_with_photos_places_only_owned_photos() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();
        let mine = seed_photo(&pool, owner, "mine").await;
        let theirs = seed_photo(&pool, Uuid::new_v4(), "theirs").await;

        let wall = create_wall(&pool, owner, &NewWall::default(), &[mine, theirs, mine]).await.unwrap();
        let items = item::list_items(&pool, wall.id, owner).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].photo_id, mine);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn wall_and_items_are_written_in_one_transaction() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();
        let photos = [seed_photo(&pool, owner, "a").await, seed_photo(&pool, owner, "b").await];

        let mut tx = pool.begin().await.unwrap();
        let (wall, placed) = insert_wall(tx.as_mut(), owner, &NewWall::default(), &photos).await.unwrap();
        assert_eq!(placed, 2);
        tx.rollback().await.unwrap();

        let walls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM walls WHERE id = $1")
            .bind(wall.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        let items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wall_items WHERE wall_id = $1")
            .bind(wall.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!((walls, items), (0, 0), "rolled back together");

        let wall = create_wall(&pool, owner, &NewWall::default(), &photos).await.unwrap();
        assert_eq!(item::list_items(&pool, wall.id, owner).await.unwrap().len(), 2);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn delete_wall_cascades_items() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();
        let photo = seed_photo(&pool, owner, "p").await;
        let wall = create_wall(&pool, owner, &NewWall::default(), &[photo]).await.unwrap();

        delete_wall(&pool, wall.id, owner).await.unwrap();
        let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wall_items WHERE wall_id = $1")
            .bind(wall.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        let photos: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM photos WHERE id = $1")
            .bind(photo)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(photos, 1);
    }
}
