use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

const OIL_CHANGE_MARGIN_KM: i64 = 500;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatusKind {
    Active,
    Maintenance,
    OutOfService,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VehicleAlertKind {
    OilChangeDue,
    InsuranceExpired,
    LicenseExpired,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Vehicle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub status: VehicleStatusKind,
    pub current_mileage: i64,
    pub last_oil_change_mileage: i64,
    pub next_oil_change_mileage: i64,
    // ISO dates, blank when the paperwork is not on file.
    pub insurance_expiry_date: String,
    pub license_expiry_date: String,
    pub assigned_driver: Option<String>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct VehicleRequest {
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub status: VehicleStatusKind,
    pub current_mileage: i64,
    pub last_oil_change_mileage: i64,
    pub next_oil_change_mileage: i64,
    pub insurance_expiry_date: String,
    pub license_expiry_date: String,
    pub assigned_driver: Option<String>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct VehicleMileageRequest {
    pub current_mileage: i64,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct VehicleStatusRequest {
    pub status: VehicleStatusKind,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct VehicleResponse {
    pub _id: String,
    pub plate_number: String,
    pub make: String,
    pub model: String,
    pub year: String,
    pub status: VehicleStatusKind,
    pub current_mileage: i64,
    pub last_oil_change_mileage: i64,
    pub next_oil_change_mileage: i64,
    pub insurance_expiry_date: String,
    pub license_expiry_date: String,
    pub assigned_driver: Option<String>,
    pub alerts: Vec<VehicleAlertKind>,
}

impl Vehicle {
    // Upkeep alerts: oil change flagged 500 km ahead of the target mileage,
    // expiry dates flagged once today passes them (lexical ISO comparison).
    pub fn alerts(&self, today: &str) -> Vec<VehicleAlertKind> {
        let mut alerts: Vec<VehicleAlertKind> = Vec::new();

        if self.current_mileage >= self.next_oil_change_mileage - OIL_CHANGE_MARGIN_KM {
            alerts.push(VehicleAlertKind::OilChangeDue);
        }
        if !self.insurance_expiry_date.is_empty() && self.insurance_expiry_date.as_str() <= today {
            alerts.push(VehicleAlertKind::InsuranceExpired);
        }
        if !self.license_expiry_date.is_empty() && self.license_expiry_date.as_str() <= today {
            alerts.push(VehicleAlertKind::LicenseExpired);
        }

        alerts
    }
    pub fn into_response(self, today: &str) -> VehicleResponse {
        let alerts = self.alerts(today);
        VehicleResponse {
            _id: self._id.map(|_id| _id.to_string()).unwrap_or_default(),
            plate_number: self.plate_number,
            make: self.make,
            model: self.model,
            year: self.year,
            status: self.status,
            current_mileage: self.current_mileage,
            last_oil_change_mileage: self.last_oil_change_mileage,
            next_oil_change_mileage: self.next_oil_change_mileage,
            insurance_expiry_date: self.insurance_expiry_date,
            license_expiry_date: self.license_expiry_date,
            assigned_driver: self.assigned_driver,
            alerts,
        }
    }
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Vehicle> = db.collection::<Vehicle>("vehicles");

        self._id = Some(ObjectId::new());

        collection
            .insert_one(&*self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn set_mileage(&mut self, current_mileage: i64) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Vehicle> = db.collection::<Vehicle>("vehicles");

        self.current_mileage = current_mileage;

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": { "current_mileage": self.current_mileage } },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn set_status(&mut self, status: VehicleStatusKind) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Vehicle> = db.collection::<Vehicle>("vehicles");

        self.status = status;

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": { "status": to_bson::<VehicleStatusKind>(&self.status).unwrap() } },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_all() -> Result<Vec<Vehicle>, String> {
        let db: Database = get_db();
        let collection: Collection<Vehicle> = db.collection::<Vehicle>("vehicles");

        let mut vehicles: Vec<Vehicle> = Vec::new();

        if let Ok(mut cursor) = collection.find(doc! {}, None).await {
            while let Some(Ok(vehicle)) = cursor.next().await {
                vehicles.push(vehicle);
            }
            Ok(vehicles)
        } else {
            Err("VEHICLE_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<Vehicle>, String> {
        let db: Database = get_db();
        let collection: Collection<Vehicle> = db.collection::<Vehicle>("vehicles");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "VEHICLE_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<Vehicle> = db.collection::<Vehicle>("vehicles");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "VEHICLE_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle() -> Vehicle {
        Vehicle {
            _id: None,
            plate_number: "A 12345".to_string(),
            make: "Toyota".to_string(),
            model: "Hiace".to_string(),
            year: "2021".to_string(),
            status: VehicleStatusKind::Active,
            current_mileage: 0,
            last_oil_change_mileage: 0,
            next_oil_change_mileage: 5000,
            insurance_expiry_date: String::new(),
            license_expiry_date: String::new(),
            assigned_driver: None,
        }
    }

    #[test]
    fn oil_change_flagged_within_margin() {
        let mut v = vehicle();
        v.current_mileage = 4500;
        assert_eq!(v.alerts("2026-08-04"), vec![VehicleAlertKind::OilChangeDue]);
    }

    #[test]
    fn oil_change_not_flagged_below_margin() {
        let mut v = vehicle();
        v.current_mileage = 4499;
        assert!(v.alerts("2026-08-04").is_empty());
    }

    #[test]
    fn expired_documents_flagged() {
        let mut v = vehicle();
        v.insurance_expiry_date = "2026-08-04".to_string();
        v.license_expiry_date = "2025-12-31".to_string();
        assert_eq!(
            v.alerts("2026-08-04"),
            vec![
                VehicleAlertKind::InsuranceExpired,
                VehicleAlertKind::LicenseExpired
            ]
        );
    }

    #[test]
    fn blank_expiry_dates_ignored() {
        let mut v = vehicle();
        v.insurance_expiry_date = String::new();
        v.license_expiry_date = String::new();
        assert!(v.alerts("2026-08-04").is_empty());
    }
}
