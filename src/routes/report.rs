use std::{
    fs::{create_dir_all, rename},
    path::PathBuf,
};

use actix_multipart::form::MultipartForm;
use actix_web::{get, post, put, web, HttpRequest, HttpResponse};
use mime_guess::get_mime_extensions_str;
use mongodb::bson::oid::ObjectId;

use super::{issuer, issuer_is_manager};
use crate::models::report::{
    Report, ReportImage, ReportImageMultipartRequest, ReportQuery, ReportRequest,
    ReportStatusKind, ReportStatusRequest,
};

#[get("/reports")]
pub async fn get_reports(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: ReportQuery = ReportQuery {
        _id: None,
        status: None,
        limit: None,
    };

    match Report::find_many(&query).await {
        Ok(reports) => HttpResponse::Ok().json(reports),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[get("/reports/{report_id}")]
pub async fn get_report(report_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let report_id: ObjectId = match report_id.parse() {
        Ok(report_id) => report_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    let query: ReportQuery = ReportQuery {
        _id: Some(report_id),
        status: None,
        limit: Some(1),
    };

    match Report::find_many(&query).await {
        Ok(mut reports) if !reports.is_empty() => HttpResponse::Ok().json(reports.remove(0)),
        Ok(_) => HttpResponse::NotFound().body("REPORT_NOT_FOUND"),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[post("/reports")]
pub async fn create_report(payload: web::Json<ReportRequest>, req: HttpRequest) -> HttpResponse {
    // The authoring supervisor is whoever holds the bearer token, never a
    // field of the payload.
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };

    let payload: ReportRequest = payload.into_inner();
    let mut report: Report = Report {
        _id: None,
        date: payload.date,
        site_location: payload.site_location,
        client_name: payload.client_name,
        client_phone: payload.client_phone,
        car_number: payload.car_number,
        start_time: payload.start_time,
        end_time: payload.end_time,
        work_description: payload.work_description,
        worker_details: payload.worker_details,
        consumed_materials: payload.consumed_materials,
        cash_expenses: payload.cash_expenses,
        cost: payload.cost,
        payment_method: payload.payment_method,
        image_before: None,
        image_after: None,
        notes: payload.notes,
        status: ReportStatusKind::Pending,
        supervisor_name: issuer.name.clone(),
        supervisor_id: issuer._id,
    };

    match report.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/reports/{report_id}/status")]
pub async fn update_report_status(
    report_id: web::Path<String>,
    payload: web::Json<ReportStatusRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let report_id = match report_id.parse() {
        Ok(report_id) => report_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut report)) = Report::find_by_id(&report_id).await {
        match report.update_status(payload.into_inner().status).await {
            Ok(report_id) => HttpResponse::Ok().body(report_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("REPORT_NOT_FOUND")
    }
}
#[put("/reports/{report_id}/image/{position}")]
pub async fn update_report_image(
    path: web::Path<(String, String)>,
    form: MultipartForm<ReportImageMultipartRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let (report_id, position) = path.into_inner();
    let report_id: ObjectId = match report_id.parse() {
        Ok(report_id) => report_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };
    if position != "before" && position != "after" {
        return HttpResponse::BadRequest().body("REPORT_IMAGE_INVALID_POSITION");
    }

    if let Ok(Some(mut report)) = Report::find_by_id(&report_id).await {
        let mime = match &form.file.content_type {
            Some(mime) => mime.essence_str().to_string(),
            None => return HttpResponse::BadRequest().body("REPORT_IMAGE_INVALID_MIME"),
        };
        let ext = match get_mime_extensions_str(&mime) {
            Some(ext) => *ext.first().unwrap(),
            None => return HttpResponse::BadRequest().body("REPORT_IMAGE_INVALID_MIME"),
        };

        let save_dir = format!("./files/reports/{}/", report_id);
        if create_dir_all(&save_dir).is_err() {
            return HttpResponse::InternalServerError().body("DIRECTORY_CREATION_FAILED");
        }

        let image = ReportImage {
            _id: ObjectId::new(),
            extension: ext.to_string(),
        };
        let file_path_temp = form.file.file.path();
        let file_path = PathBuf::from(save_dir + &image._id.to_string() + "." + ext);
        if rename(file_path_temp, &file_path).is_err() {
            return HttpResponse::InternalServerError().body("REPORT_IMAGE_RENAME_FAILED");
        }

        let (image_before, image_after) = if position == "before" {
            (Some(image), None)
        } else {
            (None, Some(image))
        };

        match report.set_image(image_before, image_after).await {
            Ok(report_id) => HttpResponse::Ok().body(report_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("REPORT_NOT_FOUND")
    }
}
