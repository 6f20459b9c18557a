use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use chrono::Utc;
use mongodb::bson::{doc, to_bson};
use regex::Regex;

use super::issuer_is_manager;
use crate::models::{
    user::{
        User, UserApprovalRequest, UserCredential, UserQuery, UserRequest, UserResponse,
        UserRoleKind, UserStatusKind,
    },
    worker::{WageKind, Worker, WorkerKind, WorkerStatusKind},
};

#[post("/users")]
pub async fn create_user(payload: web::Json<UserRequest>) -> HttpResponse {
    let payload: UserRequest = payload.into_inner();
    let email_regex: Regex = Regex::new(
        r"^([a-z0-9_+]([a-z0-9_+.]*[a-z0-9_+])?)@([a-z0-9]+([\-\.]{1}[a-z0-9]+)*\.[a-z]{2,6})",
    )
    .unwrap();

    if payload.password.len() < 8 {
        return HttpResponse::BadRequest().body("USER_MUST_HAVE_VALID_PASSWORD");
    }
    if !email_regex.is_match(&payload.email) {
        return HttpResponse::BadRequest().body("USER_MUST_HAVE_VALID_EMAIL");
    }

    // Managers are live immediately; supervisors wait for manager approval.
    let status = match payload.role {
        UserRoleKind::Manager => UserStatusKind::Active,
        UserRoleKind::Supervisor => UserStatusKind::Pending,
    };

    let mut user: User = User {
        _id: None,
        name: payload.name,
        email: payload.email,
        password: payload.password,
        role: payload.role,
        status,
    };

    if let Ok(Some(_)) = User::find_by_email(&user.email).await {
        HttpResponse::BadRequest().body("USER_ALREADY_EXIST")
    } else {
        match user.save().await {
            Ok(id) => HttpResponse::Created().body(id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    }
}
#[post("/users/login")]
pub async fn login(payload: web::Json<UserCredential>) -> HttpResponse {
    let payload: UserCredential = payload.into_inner();

    match payload.authenticate().await {
        Ok((token, user)) => HttpResponse::Ok().json(doc! {
            "token": to_bson::<String>(&token).unwrap(),
            "user": to_bson::<UserResponse>(&user).unwrap()
        }),
        Err(error) => HttpResponse::Unauthorized().body(error),
    }
}
#[get("/users/pending")]
pub async fn get_pending_users(req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let query: UserQuery = UserQuery {
        _id: None,
        status: Some(UserStatusKind::Pending),
        limit: None,
    };

    match User::find_many(&query).await {
        Ok(users) => HttpResponse::Ok().json(users),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[put("/users/{user_id}/approve")]
pub async fn approve_user(
    user_id: web::Path<String>,
    payload: web::Json<UserApprovalRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let user_id = match user_id.parse() {
        Ok(user_id) => user_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut user)) = User::find_by_id(&user_id).await {
        if user.status != UserStatusKind::Pending {
            return HttpResponse::BadRequest().body("USER_ALREADY_APPROVED");
        }
        if let Err(error) = user.set_status(UserStatusKind::Active).await {
            return HttpResponse::InternalServerError().body(error);
        }

        // The approved supervisor joins the roster as a salaried company
        // worker, sharing the user id so report supervisor costs resolve.
        let mut worker: Worker = Worker {
            _id: Some(user_id),
            name: user.name,
            role: "Supervisor".to_string(),
            status: WorkerStatusKind::Active,
            phone: None,
            join_date: Utc::now().format("%Y-%m-%d").to_string(),
            identity_number: None,
            kind: Some(WorkerKind::Company),
            wage: Some(WageKind::Monthly),
            base_rate: Some(payload.salary),
        };

        match worker.save().await {
            Ok(_) => HttpResponse::Ok().body(user_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("USER_NOT_FOUND")
    }
}
#[delete("/users/{user_id}")]
pub async fn delete_user(user_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let user_id = match user_id.parse() {
        Ok(user_id) => user_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match User::delete_by_id(&user_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} user")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
