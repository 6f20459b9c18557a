use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use chrono::Utc;

use super::{issuer, issuer_is_manager};
use crate::models::{
    assigned_task::{
        AssignedTask, AssignedTaskQuery, AssignedTaskRequest, TaskStatusKind, TaskStatusRequest,
    },
    user::UserRoleKind,
};

#[get("/tasks")]
pub async fn get_tasks(req: HttpRequest) -> HttpResponse {
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };

    // Managers see the whole board; supervisors only their own tasks.
    let query: AssignedTaskQuery = AssignedTaskQuery {
        _id: None,
        assigned_to_id: match issuer.role {
            UserRoleKind::Manager => None,
            UserRoleKind::Supervisor => issuer._id,
        },
        status: None,
        limit: None,
    };

    match AssignedTask::find_many(&query).await {
        Ok(tasks) => HttpResponse::Ok().json(tasks),
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/tasks")]
pub async fn create_task(payload: web::Json<AssignedTaskRequest>, req: HttpRequest) -> HttpResponse {
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };
    if issuer.role != UserRoleKind::Manager {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let payload: AssignedTaskRequest = payload.into_inner();
    let mut task: AssignedTask = AssignedTask {
        _id: None,
        title: payload.title,
        description: payload.description,
        assigned_to_id: payload.assigned_to_id,
        assigned_to_name: payload.assigned_to_name,
        assigned_by: issuer.name.clone(),
        priority: payload.priority,
        status: TaskStatusKind::Pending,
        due_date: payload.due_date,
        created_at: Utc::now().format("%Y-%m-%d").to_string(),
    };

    match task.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/tasks/{task_id}/status")]
pub async fn update_task_status(
    task_id: web::Path<String>,
    payload: web::Json<TaskStatusRequest>,
    req: HttpRequest,
) -> HttpResponse {
    let issuer = match issuer(&req) {
        Some(issuer) => issuer,
        None => return HttpResponse::Unauthorized().body("UNAUTHORIZED"),
    };

    let task_id = match task_id.parse() {
        Ok(task_id) => task_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut task)) = AssignedTask::find_by_id(&task_id).await {
        // Only the assignee or a manager may move a task along.
        if issuer.role != UserRoleKind::Manager && issuer._id != Some(task.assigned_to_id) {
            return HttpResponse::Unauthorized().body("UNAUTHORIZED");
        }
        match task.update_status(payload.into_inner().status).await {
            Ok(task_id) => HttpResponse::Ok().body(task_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("TASK_NOT_FOUND")
    }
}
#[delete("/tasks/{task_id}")]
pub async fn delete_task(task_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let task_id = match task_id.parse() {
        Ok(task_id) => task_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match AssignedTask::delete_by_id(&task_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} task")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
