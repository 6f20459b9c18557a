use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use super::{issuer, issuer_is_manager};
use crate::models::maintenance_request::{
    MaintenanceRequest, MaintenanceRequestQuery, MaintenanceRequestRequest,
    MaintenanceStatusKind, MaintenanceStatusRequest,
};

#[get("/maintenance-requests")]
pub async fn get_maintenance_requests(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: MaintenanceRequestQuery = MaintenanceRequestQuery {
        _id: None,
        status: None,
        limit: None,
    };

    match MaintenanceRequest::find_many(&query).await {
        Ok(requests) => HttpResponse::Ok().json(requests),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/maintenance-requests")]
pub async fn create_maintenance_request(
    payload: web::Json<MaintenanceRequestRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };

    let payload: MaintenanceRequestRequest = payload.into_inner();
    let mut request: MaintenanceRequest = MaintenanceRequest {
        _id: None,
        kind: payload.kind,
        item_id: payload.item_id,
        item_name: payload.item_name,
        description: payload.description,
        priority: payload.priority,
        requester_name: issuer.name.clone(),
        date: payload.date,
        status: MaintenanceStatusKind::Pending,
    };

    match request.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/maintenance-requests/{request_id}/status")]
pub async fn update_maintenance_status(
    request_id: web::Path<String>,
    payload: web::Json<MaintenanceStatusRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let request_id = match request_id.parse() {
        Ok(request_id) => request_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut request)) = MaintenanceRequest::find_by_id(&request_id).await {
        match request.update_status(payload.into_inner().status).await {
            Ok(request_id) => HttpResponse::Ok().body(request_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("MAINTENANCE_REQUEST_NOT_FOUND")
    }
}
#[delete("/maintenance-requests/{request_id}")]
pub async fn delete_maintenance_request(
    request_id: web::Path<String>,
    req: HttpRequest,
) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let request_id = match request_id.parse() {
        Ok(request_id) => request_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match MaintenanceRequest::delete_by_id(&request_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} maintenance request")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
