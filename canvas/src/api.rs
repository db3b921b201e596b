//! REST calls to the wall service via `gloo-net`.
//!
//! Every call returns `Result<_, String>`; callers log failures and keep
//! their local state, so a failed write never rolls back the canvas.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::doc::{ItemId, PartialWallItem, PhotoId, PhotoRef, SharedWall, Wall, WallId, WallItem};

async fn expect_success(resp: Response) -> Result<Response, String> {
    let status = resp.status();
    if (200..300).contains(&status) {
        Ok(resp)
    } else {
        let body = resp.text().await.unwrap_or_default();
        Err(format!("{} {}: {status} {body}", resp.url(), resp.status_text()))
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, String> {
    expect_success(resp).await?.json::<T>().await.map_err(|e| e.to_string())
}

/// `GET /api/walls/{id}`
pub async fn fetch_wall(wall_id: WallId) -> Result<Wall, String> {
    let resp = Request::get(&format!("/api/walls/{wall_id}")).send().await.map_err(|e| e.to_string())?;
    read_json(resp).await
}

/// `GET /api/walls/{id}/items`, ascending z.
pub async fn fetch_items(wall_id: WallId) -> Result<Vec<WallItem>, String> {
    let resp = Request::get(&format!("/api/walls/{wall_id}/items")).send().await.map_err(|e| e.to_string())?;
    read_json(resp).await
}

/// `POST /api/photos/resolve`. Unknown ids are simply absent from the result.
pub async fn resolve_photos(photo_ids: &[PhotoId]) -> Result<Vec<PhotoRef>, String> {
    if photo_ids.is_empty() {
        return Ok(Vec::new());
    }
    let resp = Request::post("/api/photos/resolve")
        .json(&json!({ "photo_ids": photo_ids }))
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    read_json(resp).await
}

/// `POST /api/walls/{id}/items`
pub async fn insert_items(wall_id: WallId, items: &[WallItem]) -> Result<(), String> {
    let resp = Request::post(&format!("/api/walls/{wall_id}/items"))
        .json(items)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    expect_success(resp).await.map(|_| ())
}

/// `PATCH /api/walls/{id}/items/{item_id}`
pub async fn update_item(wall_id: WallId, item_id: ItemId, fields: &PartialWallItem) -> Result<(), String> {
    let resp = Request::patch(&format!("/api/walls/{wall_id}/items/{item_id}"))
        .json(fields)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;
    expect_success(resp).await.map(|_| ())
}

/// `DELETE /api/walls/{id}/items/{item_id}`
pub async fn delete_item(wall_id: WallId, item_id: ItemId) -> Result<(), String> {
    let resp = Request::delete(&format!("/api/walls/{wall_id}/items/{item_id}"))
        .send()
        .await
        .map_err(|e| e.to_string())?;
    expect_success(resp).await.map(|_| ())
}

/// `GET /api/share/{token}`
pub async fn fetch_shared(token: &str) -> Result<SharedWall, String> {
    let resp = Request::get(&format!("/api/share/{token}")).send().await.map_err(|e| e.to_string())?;
    read_json(resp).await
}
