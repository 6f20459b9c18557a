use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatusKind {
    Scheduled,
    Completed,
    Cancelled,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentActionKind {
    Created,
    Updated,
    Cancelled,
    Completed,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AppointmentLog {
    pub action: AppointmentActionKind,
    pub by: String,
    pub timestamp: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Appointment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub client_name: String,
    pub time: String,
    pub day: String,
    pub date: String,
    pub service_type: String,
    pub location: String,
    pub created_by: String,
    pub status: AppointmentStatusKind,
    pub history: Vec<AppointmentLog>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct AppointmentRequest {
    pub client_name: String,
    pub time: String,
    pub day: String,
    pub date: String,
    pub service_type: String,
    pub location: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct AppointmentStatusRequest {
    pub status: AppointmentStatusKind,
}

impl Appointment {
    // A slot is taken when a non-cancelled appointment already holds the
    // same date and time.
    pub fn slot_taken(appointments: &[Appointment], date: &str, time: &str) -> bool {
        appointments.iter().any(|appointment| {
            appointment.date == date
                && appointment.time == time
                && appointment.status != AppointmentStatusKind::Cancelled
        })
    }
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Appointment> = db.collection::<Appointment>("appointments");

        self._id = Some(ObjectId::new());

        collection
            .insert_one(&*self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn update_status(
        &mut self,
        status: AppointmentStatusKind,
        by: &str,
        timestamp: &str,
    ) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Appointment> = db.collection::<Appointment>("appointments");

        let action = match status {
            AppointmentStatusKind::Completed => AppointmentActionKind::Completed,
            AppointmentStatusKind::Cancelled => AppointmentActionKind::Cancelled,
            AppointmentStatusKind::Scheduled => AppointmentActionKind::Updated,
        };

        self.status = status;
        self.history.push(AppointmentLog {
            action,
            by: by.to_string(),
            timestamp: timestamp.to_string(),
        });

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": to_bson::<Appointment>(self).unwrap() },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_all() -> Result<Vec<Appointment>, String> {
        let db: Database = get_db();
        let collection: Collection<Appointment> = db.collection::<Appointment>("appointments");

        let mut appointments: Vec<Appointment> = Vec::new();

        if let Ok(mut cursor) = collection.find(doc! {}, None).await {
            while let Some(Ok(appointment)) = cursor.next().await {
                appointments.push(appointment);
            }
            Ok(appointments)
        } else {
            Err("APPOINTMENT_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<Appointment>, String> {
        let db: Database = get_db();
        let collection: Collection<Appointment> = db.collection::<Appointment>("appointments");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "APPOINTMENT_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<Appointment> = db.collection::<Appointment>("appointments");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "APPOINTMENT_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(date: &str, time: &str, status: AppointmentStatusKind) -> Appointment {
        Appointment {
            _id: None,
            client_name: "Huda".to_string(),
            time: time.to_string(),
            day: "Tuesday".to_string(),
            date: date.to_string(),
            service_type: "Deep cleaning".to_string(),
            location: "Marina Tower".to_string(),
            created_by: "Salem".to_string(),
            status,
            history: Vec::new(),
        }
    }

    #[test]
    fn same_date_and_time_is_taken() {
        let existing = vec![appointment("2026-08-10", "10:00", AppointmentStatusKind::Scheduled)];
        assert!(Appointment::slot_taken(&existing, "2026-08-10", "10:00"));
    }

    #[test]
    fn different_time_is_free() {
        let existing = vec![appointment("2026-08-10", "10:00", AppointmentStatusKind::Scheduled)];
        assert!(!Appointment::slot_taken(&existing, "2026-08-10", "12:00"));
        assert!(!Appointment::slot_taken(&existing, "2026-08-11", "10:00"));
    }

    #[test]
    fn cancelled_appointment_frees_the_slot() {
        let existing = vec![appointment("2026-08-10", "10:00", AppointmentStatusKind::Cancelled)];
        assert!(!Appointment::slot_taken(&existing, "2026-08-10", "10:00"));
    }
}
