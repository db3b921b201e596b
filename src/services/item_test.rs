use super::*;

fn item_on(wall_id: WallId) -> WallItem {
    WallItem { id: Uuid::new_v4(), wall_id, photo_id: Uuid::new_v4(), x: 10.0, y: 20.0, width: 300.0, z_index: 1 }
}

#[test]
fn validate_item_clamps_width() {
    let wall_id = Uuid::new_v4();
    let item = WallItem { width: 12.0, ..item_on(wall_id) };
    let validated = validate_item(item, wall_id).unwrap();
    assert!((validated.width - MIN_ITEM_WIDTH).abs() < f64::EPSILON);
}

#[test]
fn validate_item_rejects_wrong_wall() {
    let item = item_on(Uuid::new_v4());
    assert!(matches!(validate_item(item, Uuid::new_v4()), Err(WallError::InvalidInput(_))));
}

#[test]
fn validate_item_rejects_non_finite_geometry() {
    let wall_id = Uuid::new_v4();
    for item in [
        WallItem { x: f64::NAN, ..item_on(wall_id) },
        WallItem { y: f64::INFINITY, ..item_on(wall_id) },
        WallItem { width: f64::NEG_INFINITY, ..item_on(wall_id) },
    ] {
        assert!(matches!(validate_item(item, wall_id), Err(WallError::InvalidInput(_))));
    }
}

#[test]
fn validate_patch_rejects_empty() {
    assert!(matches!(validate_patch(&PartialWallItem::default()), Err(WallError::InvalidInput(_))));
}

#[test]
fn validate_patch_accepts_z_only() {
    let fields = PartialWallItem { z_index: Some(7), ..PartialWallItem::default() };
    assert!(validate_patch(&fields).is_ok());
}

#[test]
fn validate_patch_rejects_nan() {
    let fields = PartialWallItem { x: Some(f64::NAN), ..PartialWallItem::default() };
    assert!(matches!(validate_patch(&fields), Err(WallError::InvalidInput(_))));
}

#[test]
fn item_from_row_maps_columns() {
    let (id, wall_id, photo_id) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let item = item_from_row((id, wall_id, photo_id, 1.0, 2.0, 300.0, 9));
    assert_eq!(item, WallItem { id, wall_id, photo_id, x: 1.0, y: 2.0, width: 300.0, z_index: 9 });
}

#[tokio::test]
async fn oversized_batch_is_rejected_before_touching_the_database() {
    let state = crate::state::test_helpers::test_app_state();
    let wall_id = Uuid::new_v4();
    let items: Vec<WallItem> = (0..=MAX_INSERT_BATCH).map(|_| item_on(wall_id)).collect();
    let result = insert_items(&state.pool, wall_id, Uuid::new_v4(), items).await;
    assert!(matches!(result, Err(WallError::InvalidInput(_))));
}

#[tokio::test]
async fn empty_patch_is_rejected_before_touching_the_database() {
    let state = crate::state::test_helpers::test_app_state();
    let result = update_item(&state.pool, Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), &PartialWallItem::default()).await;
    assert!(matches!(result, Err(WallError::InvalidInput(_))));
}

// =============================================================================
// LIVE DATABASE
// =============================================================================

#[cfg(feature = "live-db-tests")]
mod live {
    use super::*;
    use crate::services::wall::{NewWall, create_wall};
    use crate::state::test_helpers::integration_pool;

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn insert_is_idempotent_and_list_is_z_ascending() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();
        let wall = create_wall(&pool, owner, &NewWall::default(), &[]).await.unwrap();

        let high = WallItem { z_index: 5, ..item_on(wall.id) };
        let low = WallItem { z_index: 2, ..item_on(wall.id) };
        let written = insert_items(&pool, wall.id, owner, vec![high.clone(), low.clone()]).await.unwrap();
        assert_eq!(written, 2);
        let again = insert_items(&pool, wall.id, owner, vec![high.clone()]).await.unwrap();
        assert_eq!(again, 0);

        let items = list_items(&pool, wall.id, owner).await.unwrap();
        let ids: Vec<Uuid> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![low.id, high.id]);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn update_applies_only_given_fields_and_clamps_width() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();
        let wall = create_wall(&pool, owner, &NewWall::default(), &[]).await.unwrap();
        let item = item_on(wall.id);
        insert_items(&pool, wall.id, owner, vec![item.clone()]).await.unwrap();

        let fields = PartialWallItem { width: Some(10.0), ..PartialWallItem::default() };
        let updated = update_item(&pool, wall.id, item.id, owner, &fields).await.unwrap();
        assert!((updated.width - MIN_ITEM_WIDTH).abs() < f64::EPSILON);
        assert!((updated.x - item.x).abs() < f64::EPSILON);
        assert_eq!(updated.z_index, item.z_index);
    }

    #[tokio::test]
    #[ignore = "requires TEST_DATABASE_URL/live Postgres"]
    async fn strangers_cannot_touch_items() {
        let pool = integration_pool().await;
        let owner = Uuid::new_v4();
        let wall = create_wall(&pool, owner, &NewWall::default(), &[]).await.unwrap();
        let item = item_on(wall.id);
        insert_items(&pool, wall.id, owner, vec![item.clone()]).await.unwrap();

        let stranger = Uuid::new_v4();
        let fields = PartialWallItem { x: Some(0.0), ..PartialWallItem::default() };
        assert!(matches!(
            update_item(&pool, wall.id, item.id, stranger, &fields).await,
            Err(WallError::ItemNotFound(_))
        ));
        assert!(matches!(delete_item(&pool, wall.id, item.id, stranger).await, Err(WallError::ItemNotFound(_))));
        assert!(matches!(list_items(&pool, wall.id, stranger).await, Err(WallError::NotFound(_))));

        delete_item(&pool, wall.id, item.id, owner).await.unwrap();
        assert!(list_items(&pool, wall.id, owner).await.unwrap().is_empty());
    }
}
