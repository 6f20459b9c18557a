use actix_web::{get, post, put, web, HttpRequest, HttpResponse};

use super::issuer;
use crate::models::inquiry::{
    Inquiry, InquiryQuery, InquiryRequest, InquiryStatusKind,
};

#[get("/inquiries")]
pub async fn get_inquiries(req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: InquiryQuery = InquiryQuery {
        _id: None,
        status: None,
        limit: None,
    };

    match Inquiry::find_many(&query).await {
        Ok(inquiries) => HttpResponse::Ok().json(inquiries),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/inquiries")]
pub async fn create_inquiry(payload: web::Json<InquiryRequest>, req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let payload: InquiryRequest = payload.into_inner();
    let mut inquiry: Inquiry = Inquiry {
        _id: None,
        customer_name: payload.customer_name,
        phone: payload.phone,
        channel: payload.channel,
        kind: payload.kind,
        notes: payload.notes,
        date: payload.date,
        status: InquiryStatusKind::New,
    };

    match inquiry.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/inquiries/{inquiry_id}/follow-up")]
pub async fn follow_up_inquiry(inquiry_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if issuer(&req).is_none() {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let inquiry_id = match inquiry_id.parse() {
        Ok(inquiry_id) => inquiry_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut inquiry)) = Inquiry::find_by_id(&inquiry_id).await {
        match inquiry.update_status(InquiryStatusKind::FollowedUp).await {
            Ok(inquiry_id) => HttpResponse::Ok().body(inquiry_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("INQUIRY_NOT_FOUND")
    }
}
