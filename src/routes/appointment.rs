use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use chrono::Utc;

use super::{issuer, issuer_is_manager};
use crate::models::appointment::{
    Appointment, AppointmentActionKind, AppointmentLog, AppointmentRequest,
    AppointmentStatusKind, AppointmentStatusRequest,
};

#[get("/appointments")]
pub async fn get_appointments(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    match Appointment::find_all().await {
        Ok(appointments) => HttpResponse::Ok().json(appointments),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/appointments")]
pub async fn create_appointment(
    payload: web::Json<AppointmentRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };

    let payload: AppointmentRequest = payload.into_inner();

    let existing = match Appointment::find_all().await {
        Ok(existing) => existing,
        Err(error) => return HttpResponse::InternalServerError().body(error),
    };
    if Appointment::slot_taken(&existing, &payload.date, &payload.time) {
        return HttpResponse::Conflict().body("APPOINTMENT_SLOT_TAKEN");
    }

    let mut appointment: Appointment = Appointment {
        _id: None,
        client_name: payload.client_name,
        time: payload.time,
        day: payload.day,
        date: payload.date,
        service_type: payload.service_type,
        location: payload.location,
        created_by: issuer.name.clone(),
        status: AppointmentStatusKind::Scheduled,
        history: vec![AppointmentLog {
            action: AppointmentActionKind::Created,
            by: issuer.name.clone(),
            timestamp: Utc::now().to_rfc3339(),
        }],
    };

    match appointment.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/appointments/{appointment_id}/status")]
pub async fn update_appointment_status(
    appointment_id: web::Path<String>,
    payload: web::Json<AppointmentStatusRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };

    let appointment_id = match appointment_id.parse() {
        Ok(appointment_id) => appointment_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut appointment)) = Appointment::find_by_id(&appointment_id).await {
        let timestamp = Utc::now().to_rfc3339();
        match appointment
            .update_status(payload.into_inner().status, &issuer.name, &timestamp)
            .await
        {
            Ok(appointment_id) => HttpResponse::Ok().body(appointment_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("APPOINTMENT_NOT_FOUND")
    }
}
#[delete("/appointments/{appointment_id}")]
pub async fn delete_appointment(
    appointment_id: web::Path<String>,
    req: HttpRequest,
) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let appointment_id = match appointment_id.parse() {
        Ok(appointment_id) => appointment_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match Appointment::delete_by_id(&appointment_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} appointment")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
