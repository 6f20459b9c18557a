use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatusKind {
    Available,
    InUse,
    Maintenance,
    Broken,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentConditionKind {
    New,
    Good,
    Fair,
    Poor,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Equipment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub kind: String,
    pub serial_number: Option<String>,
    pub status: EquipmentStatusKind,
    pub condition: EquipmentConditionKind,
    pub assigned_to: Option<String>,
    pub purchase_date: String,
    pub notes: Option<String>,
    pub added_by: Option<String>,
}
#[derive(Debug)]
pub struct EquipmentQuery {
    pub _id: Option<ObjectId>,
    pub status: Option<EquipmentStatusKind>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct EquipmentRequest {
    pub name: String,
    pub kind: String,
    pub serial_number: Option<String>,
    pub status: EquipmentStatusKind,
    pub condition: EquipmentConditionKind,
    pub assigned_to: Option<String>,
    pub purchase_date: String,
    pub notes: Option<String>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct EquipmentStatusRequest {
    pub status: EquipmentStatusKind,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct EquipmentResponse {
    pub _id: String,
    pub name: String,
    pub kind: String,
    pub serial_number: Option<String>,
    pub status: EquipmentStatusKind,
    pub condition: EquipmentConditionKind,
    pub assigned_to: Option<String>,
    pub purchase_date: String,
    pub notes: Option<String>,
    pub added_by: Option<String>,
}

impl Equipment {
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Equipment> = db.collection::<Equipment>("equipment");

        self._id = Some(ObjectId::new());

        collection
            .insert_one(self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn update_status(&mut self, status: EquipmentStatusKind) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Equipment> = db.collection::<Equipment>("equipment");

        self.status = status;

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": { "status": to_bson::<EquipmentStatusKind>(&self.status).unwrap() } },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_many(query: &EquipmentQuery) -> Result<Vec<EquipmentResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<Equipment> = db.collection::<Equipment>("equipment");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut equipment: Vec<EquipmentResponse> = Vec::new();

        if let Some(status) = &query.status {
            pipeline.push(doc! {
                "$match": {
                    "status": to_bson::<EquipmentStatusKind>(status).unwrap()
                }
            });
        }
        if let Some(limit) = query.limit {
            pipeline.push(doc! {
                "$limit": to_bson::<usize>(&limit).unwrap()
            });
        }

        pipeline.push(doc! {
            "$project": {
                "_id": { "$toString": "$_id" },
                "name": "$name",
                "kind": "$kind",
                "serial_number": "$serial_number",
                "status": "$status",
                "condition": "$condition",
                "assigned_to": "$assigned_to",
                "purchase_date": "$purchase_date",
                "notes": "$notes",
                "added_by": "$added_by",
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let item: EquipmentResponse = from_document::<EquipmentResponse>(doc).unwrap();
                equipment.push(item);
            }
            Ok(equipment)
        } else {
            Err("EQUIPMENT_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<Equipment>, String> {
        let db: Database = get_db();
        let collection: Collection<Equipment> = db.collection::<Equipment>("equipment");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "EQUIPMENT_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<Equipment> = db.collection::<Equipment>("equipment");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "EQUIPMENT_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}
