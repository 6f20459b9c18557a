use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use super::{issuer, issuer_is_manager};
use crate::models::inventory_item::{
    InventoryItem, InventoryItemQuery, InventoryItemRequest, InventoryQuantityRequest,
};

#[get("/inventory")]
pub async fn get_inventory_items(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: InventoryItemQuery = InventoryItemQuery {
        _id: None,
        status: None,
        limit: None,
    };

    match InventoryItem::find_many(&query).await {
        Ok(items) => HttpResponse::Ok().json(items),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/inventory")]
pub async fn create_inventory_item(
    payload: web::Json<InventoryItemRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let payload: InventoryItemRequest = payload.into_inner();
    let mut item: InventoryItem = InventoryItem {
        _id: None,
        name: payload.name,
        quantity: payload.quantity,
        unit: payload.unit,
        price: payload.price,
        // Classified from quantity on save.
        status: InventoryItem::status_for(payload.quantity),
        last_updated: payload.last_updated,
    };

    match item.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/inventory/{item_id}/quantity")]
pub async fn update_inventory_quantity(
    item_id: web::Path<String>,
    payload: web::Json<InventoryQuantityRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let item_id = match item_id.parse() {
        Ok(item_id) => item_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut item)) = InventoryItem::find_by_id(&item_id).await {
        let payload: InventoryQuantityRequest = payload.into_inner();
        match item.set_quantity(payload.quantity, &payload.last_updated).await {
            Ok(item_id) => HttpResponse::Ok().body(item_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("INVENTORY_ITEM_NOT_FOUND")
    }
}
#[delete("/inventory/{item_id}")]
pub async fn delete_inventory_item(item_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let item_id = match item_id.parse() {
        Ok(item_id) => item_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match InventoryItem::delete_by_id(&item_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} inventory item")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
