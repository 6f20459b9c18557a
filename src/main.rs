use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use std::io;

mod analytics;
mod database;
mod models;
mod routes;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let db_uri: String =
        std::env::var("MONGODB_URI").unwrap_or_else(|_| String::from("mongodb://localhost:27017"));

    models::user::load_keys();
    database::connect(db_uri).await;

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .wrap(models::user::UserAuthenticationMiddlewareFactory)
            .service(routes::user::create_user)
            .service(routes::user::login)
            .service(routes::user::get_pending_users)
            .service(routes::user::approve_user)
            .service(routes::user::delete_user)
            .service(routes::worker::get_workers)
            .service(routes::worker::create_worker)
            .service(routes::worker::update_worker_status)
            .service(routes::worker::delete_worker)
            .service(routes::report::get_reports)
            .service(routes::report::get_report)
            .service(routes::report::create_report)
            .service(routes::report::update_report_status)
            .service(routes::report::update_report_image)
            .service(routes::site::get_sites)
            .service(routes::site::create_site)
            .service(routes::site::update_site)
            .service(routes::site::delete_site)
            .service(routes::inquiry::get_inquiries)
            .service(routes::inquiry::create_inquiry)
            .service(routes::inquiry::follow_up_inquiry)
            .service(routes::inventory_item::get_inventory_items)
            .service(routes::inventory_item::create_inventory_item)
            .service(routes::inventory_item::update_inventory_quantity)
            .service(routes::inventory_item::delete_inventory_item)
            .service(routes::equipment::get_equipment)
            .service(routes::equipment::create_equipment)
            .service(routes::equipment::update_equipment_status)
            .service(routes::equipment::delete_equipment)
            .service(routes::vehicle::get_vehicles)
            .service(routes::vehicle::create_vehicle)
            .service(routes::vehicle::update_vehicle_mileage)
            .service(routes::vehicle::update_vehicle_status)
            .service(routes::vehicle::delete_vehicle)
            .service(routes::maintenance_request::get_maintenance_requests)
            .service(routes::maintenance_request::create_maintenance_request)
            .service(routes::maintenance_request::update_maintenance_status)
            .service(routes::maintenance_request::delete_maintenance_request)
            .service(routes::appointment::get_appointments)
            .service(routes::appointment::create_appointment)
            .service(routes::appointment::update_appointment_status)
            .service(routes::appointment::delete_appointment)
            .service(routes::assigned_task::get_tasks)
            .service(routes::assigned_task::create_task)
            .service(routes::assigned_task::update_task_status)
            .service(routes::assigned_task::delete_task)
            .service(routes::analytics::get_project_summaries)
            .service(routes::analytics::get_payroll)
            .service(routes::analytics::get_customers)
            .service(routes::analytics::get_dashboard)
            .service(routes::get_file)
    })
    .bind(("127.0.0.1", 8000))?
    .run()
    .await
}
