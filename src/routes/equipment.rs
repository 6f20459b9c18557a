use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use super::{issuer, issuer_is_manager};
use crate::models::equipment::{
    Equipment, EquipmentQuery, EquipmentRequest, EquipmentStatusRequest,
};

#[get("/equipment")]
pub async fn get_equipment(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: EquipmentQuery = EquipmentQuery {
        _id: None,
        status: None,
        limit: None,
    };

    match Equipment::find_many(&query).await {
        Ok(equipment) => HttpResponse::Ok().json(equipment),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/equipment")]
pub async fn create_equipment(
    payload: web::Json<EquipmentRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };

    let payload: EquipmentRequest = payload.into_inner();
    let mut equipment: Equipment = Equipment {
        _id: None,
        name: payload.name,
        kind: payload.kind,
        serial_number: payload.serial_number,
        status: payload.status,
        condition: payload.condition,
        assigned_to: payload.assigned_to,
        purchase_date: payload.purchase_date,
        notes: payload.notes,
        added_by: Some(issuer.name.clone()),
    };

    match equipment.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/equipment/{equipment_id}/status")]
pub async fn update_equipment_status(
    equipment_id: web::Path<String>,
    payload: web::Json<EquipmentStatusRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let equipment_id = match equipment_id.parse() {
        Ok(equipment_id) => equipment_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut equipment)) = Equipment::find_by_id(&equipment_id).await {
        match equipment.update_status(payload.into_inner().status).await {
            Ok(equipment_id) => HttpResponse::Ok().body(equipment_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("EQUIPMENT_NOT_FOUND")
    }
}
#[delete("/equipment/{equipment_id}")]
pub async fn delete_equipment(equipment_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let equipment_id = match equipment_id.parse() {
        Ok(equipment_id) => equipment_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match Equipment::delete_by_id(&equipment_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} equipment")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
