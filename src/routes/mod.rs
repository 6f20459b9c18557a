use actix_web::{get, web, HttpMessage, HttpRequest, HttpResponse};
use mime_guess::from_path;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::models::user::{UserAuthentication, UserRoleKind};

// Identity resolved by the bearer-token middleware, if any.
pub fn issuer(req: &HttpRequest) -> Option<UserAuthentication> {
    req.extensions().get::<UserAuthentication>().cloned()
}

pub fn issuer_is_manager(req: &HttpRequest) -> bool {
    matches!(issuer(req), Some(issuer) if issuer.role == UserRoleKind::Manager)
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    ReportImage,
}

#[derive(Deserialize)]
pub struct FileQueryParams {
    pub kind: FileKind,
    pub name: String,
}

pub mod analytics;
pub mod appointment;
pub mod assigned_task;
pub mod equipment;
pub mod inquiry;
pub mod inventory_item;
pub mod maintenance_request;
pub mod report;
pub mod site;
pub mod user;
pub mod vehicle;
pub mod worker;

#[get("/files")]
pub async fn get_file(query: web::Query<FileQueryParams>) -> HttpResponse {
    let path = match query.kind {
        FileKind::ReportImage => format!("./files/reports/{}", query.name),
    };
    if let Ok(file) = fs::read(path.clone()) {
        let mime = from_path(path).first_or_octet_stream();
        HttpResponse::Ok().content_type(mime).body(file)
    } else {
        HttpResponse::NotFound().body("CONTENT_NOT_FOUND")
    }
}
