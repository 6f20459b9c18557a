use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use chrono::Utc;

use super::issuer_is_manager;
use crate::models::vehicle::{
    Vehicle, VehicleMileageRequest, VehicleRequest, VehicleResponse, VehicleStatusRequest,
};

#[get("/vehicles")]
pub async fn get_vehicles(req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    match Vehicle::find_all().await {
        Ok(vehicles) => {
            // Alerts are computed against today, never stored.
            let today = Utc::now().format("%Y-%m-%d").to_string();
            let vehicles: Vec<VehicleResponse> = vehicles
                .into_iter()
                .map(|vehicle| vehicle.into_response(&today))
                .collect();
            HttpResponse::Ok().json(vehicles)
        }
        Err(error) => HttpResponse::BadRequest().body(error),
    }
}
#[post("/vehicles")]
pub async fn create_vehicle(payload: web::Json<VehicleRequest>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let payload: VehicleRequest = payload.into_inner();
    let mut vehicle: Vehicle = Vehicle {
        _id: None,
        plate_number: payload.plate_number,
        make: payload.make,
        model: payload.model,
        year: payload.year,
        status: payload.status,
        current_mileage: payload.current_mileage,
        last_oil_change_mileage: payload.last_oil_change_mileage,
        next_oil_change_mileage: payload.next_oil_change_mileage,
        insurance_expiry_date: payload.insurance_expiry_date,
        license_expiry_date: payload.license_expiry_date,
        assigned_driver: payload.assigned_driver,
    };

    match vehicle.save().await {
        Ok(id) => HttpResponse::Created().body(id.to_string()),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
#[put("/vehicles/{vehicle_id}/mileage")]
pub async fn update_vehicle_mileage(
    vehicle_id: web::Path<String>,
    payload: web::Json<VehicleMileageRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let vehicle_id = match vehicle_id.parse() {
        Ok(vehicle_id) => vehicle_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut vehicle)) = Vehicle::find_by_id(&vehicle_id).await {
        match vehicle.set_mileage(payload.current_mileage).await {
            Ok(vehicle_id) => HttpResponse::Ok().body(vehicle_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("VEHICLE_NOT_FOUND")
    }
}
#[put("/vehicles/{vehicle_id}/status")]
pub async fn update_vehicle_status(
    vehicle_id: web::Path<String>,
    payload: web::Json<VehicleStatusRequest>,
    req: HttpRequest,
) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let vehicle_id = match vehicle_id.parse() {
        Ok(vehicle_id) => vehicle_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    if let Ok(Some(mut vehicle)) = Vehicle::find_by_id(&vehicle_id).await {
        match vehicle.set_status(payload.into_inner().status).await {
            Ok(vehicle_id) => HttpResponse::Ok().body(vehicle_id.to_string()),
            Err(error) => HttpResponse::InternalServerError().body(error),
        }
    } else {
        HttpResponse::NotFound().body("VEHICLE_NOT_FOUND")
    }
}
#[delete("/vehicles/{vehicle_id}")]
pub async fn delete_vehicle(vehicle_id: web::Path<String>, req: HttpRequest) -> HttpResponse {
    if !issuer_is_manager(&req) {
        return HttpResponse::Unauthorized().body("UNAUTHORIZED");
    }

    let vehicle_id = match vehicle_id.parse() {
        Ok(vehicle_id) => vehicle_id,
        Err(_) => return HttpResponse::BadRequest().body("INVALID_ID"),
    };

    match Vehicle::delete_by_id(&vehicle_id).await {
        Ok(count) => HttpResponse::Ok().body(format!("Deleted {count} vehicle")),
        Err(error) => HttpResponse::InternalServerError().body(error),
    }
}
