use actix_web::{get, HttpRequest, HttpResponse};

use super::issuer_is_manager;
use crate::analytics;
use crate::models::{inquiry::Inquiry, report::Report, site::Site, worker::Worker};

// Each endpoint reads whole-collection snapshots and hands them to the
// pure engine. Nothing here is cached or persisted; the views are
// recomputed per request.

#[get("/analytics/projects")]
pub async fn get_project_summaries(req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let sites = match Site::find_all().await {
        Ok(sites) => sites,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    let reports = match Report::find_all().await {
        Ok(reports) => reports,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    let workers = match Worker::find_all().await {
        Ok(workers) => workers,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };

    HttpResponse::Ok().json(analytics::project::aggregate(&sites, &reports, &workers))
}
#[get("/analytics/payroll")]
pub async fn get_payroll(req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let workers = match Worker::find_all().await {
        Ok(workers) => workers,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    let reports = match Report::find_all().await {
        Ok(reports) => reports,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };

    HttpResponse::Ok().json(analytics::payroll::aggregate(&workers, &reports))
}
#[get("/analytics/dashboard")]
pub async fn get_dashboard(req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let workers = match Worker::find_all().await {
        Ok(workers) => workers,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    let reports = match Report::find_all().await {
        Ok(reports) => reports,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    let sites = match Site::find_all().await {
        Ok(sites) => sites,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    let inquiries = match Inquiry::find_all().await {
        Ok(inquiries) => inquiries,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };

    HttpResponse::Ok().json(analytics::derive(&workers, &reports, &sites, &inquiries))
}
#[get("/analytics/customers")]
pub async fn get_customers(req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let reports = match Report::find_all().await {
        Ok(reports) => reports,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    let inquiries = match Inquiry::find_all().await {
        Ok(inquiries) => inquiries,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };

    HttpResponse::Ok().json(analytics::customer::aggregate(&reports, &inquiries))
}
