use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};

use super::{issuer, issuer_is_manager};
use crate::models::site::{Site, SiteQuery, SiteRequest};

#[get("/sites")]
pub async fn get_sites(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: SiteQuery = SiteQuery {
        _id: None,
        limit: None,
    };

    match Site::find_many(&query).await {
        Ok(sites) => HttpResponse::Ok().json(sites),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/sites")]
pub async fn create_site(payload: web::Json<SiteRequest>, req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let payload: SiteRequest = payload.into_inner();
    let mut site: Site = Site {
        _id: None,
        name: payload.name,
        address: payload.address,
        client_name: payload.client_name,
        status: payload.status,
        assigned_workers: payload.assigned_workers,
    };

    match site.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/sites/{site_id}")]
pub async fn update_site(
    site_id: web::Path<String>,
    payload: web::Json<SiteRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let site_id = match site_id.parse() {
        Ok(site_id) => site_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(_)) = Site::find_by_id(&site_id).await {
        let payload: SiteRequest = payload.into_inner();
        let site: Site = Site {
            _id: Some(site_id),
            name: payload.name,
            address: payload.address,
            client_name: payload.client_name,
            status: payload.status,
            assigned_workers: payload.assigned_workers,
        };
        match site.update().await {
            Ok(site_id) => HttpResponse::Ok().body(site_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("SITE_NOT_FOUND")
    }
}
#[delete("/sites/{site_id}")]
pub async fn delete_site(site_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let site_id = match site_id.parse() {
        Ok(site_id) => site_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match Site::delete_by_id(&site_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} site")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
