use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use super::{issuer, issuer_is_manager};
use crate::models::worker::{Worker, WorkerQuery, WorkerRequest, WorkerStatusRequest};

#[get("/workers")]
pub async fn get_workers(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: WorkerQuery = WorkerQuery {
        _id: None,
        kind: None,
        limit: None,
    };

    match Worker::find_many(&query).await {
        Ok(workers) => HttpResponse::Ok().json(workers),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/workers")]
pub async fn create_worker(payload: web::Json<WorkerRequest>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let payload: WorkerRequest = payload.into_inner();
    let mut worker: Worker = Worker {
        _id: None,
        name: payload.name,
        role: payload.role,
        status: payload.status,
        phone: payload.phone,
        join_date: payload.join_date,
        identity_number: payload.identity_number,
        kind: payload.kind,
        wage: payload.wage,
        base_rate: payload.base_rate,
    };

    match worker.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/workers/{worker_id}/status")]
pub async fn update_worker_status(
    worker_id: web::Path<String>,
    payload: web::Json<WorkerStatusRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let worker_id = match worker_id.parse() {
        Ok(worker_id) => worker_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut worker)) = Worker::find_by_id(&worker_id).await {
        worker.status = payload.into_inner().status;
        match worker.update().await {
            Ok(worker_id) => HttpResponse::Ok().body(worker_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("WORKER_NOT_FOUND")
    }
}
#[delete("/workers/{worker_id}")]
pub async fn delete_worker(worker_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let worker_id = match worker_id.parse() {
        Ok(worker_id) => worker_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match Worker::delete_by_id(&worker_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} worker")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
