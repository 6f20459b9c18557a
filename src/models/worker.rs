use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatusKind {
    Active,
    Inactive,
    OnLeave,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkerKind {
    Company,
    External,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WageKind {
    Monthly,
    Daily,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Worker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub role: String,
    pub status: WorkerStatusKind,
    pub phone: Option<String>,
    pub join_date: String,
    pub identity_number: Option<String>,
    // Partially-filled rosters are accepted; a missing kind reads as Company.
    #[serde(default)]
    pub kind: Option<WorkerKind>,
    #[serde(default)]
    pub wage: Option<WageKind>,
    #[serde(default)]
    pub base_rate: Option<f64>,
}
#[derive(Debug)]
pub struct WorkerQuery {
    pub _id: Option<ObjectId>,
    pub kind: Option<WorkerKind>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct WorkerRequest {
    pub name: String,
    pub role: String,
    pub status: WorkerStatusKind,
    pub phone: Option<String>,
    pub join_date: String,
    pub identity_number: Option<String>,
    pub kind: Option<WorkerKind>,
    pub wage: Option<WageKind>,
    pub base_rate: Option<f64>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct WorkerStatusRequest {
    pub status: WorkerStatusKind,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct WorkerResponse {
    pub _id: String,
    pub name: String,
    pub role: String,
    pub status: WorkerStatusKind,
    pub phone: Option<String>,
    pub join_date: String,
    pub identity_number: Option<String>,
    pub kind: Option<WorkerKind>,
    pub wage: Option<WageKind>,
    pub base_rate: Option<f64>,
}

impl Worker {
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Worker> = db.collection::<Worker>("workers");

        if self._id.is_none() {
            self._id = Some(ObjectId::new());
        }

        collection
            .insert_one(&*self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn update(&self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Worker> = db.collection::<Worker>("workers");

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": to_bson::<Worker>(self).unwrap() },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_many(query: &WorkerQuery) -> Result<Vec<WorkerResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<Worker> = db.collection::<Worker>("workers");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut workers: Vec<WorkerResponse> = Vec::new();

        if let Some(kind) = &query.kind {
            pipeline.push(doc! {
                "$match": {
                    "kind": to_bson::<WorkerKind>(kind).unwrap()
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
                "role": "$role",
                "status": "$status",
                "phone": "$phone",
                "join_date": "$join_date",
                "identity_number": "$identity_number",
                "kind": "$kind",
                "wage": "$wage",
                "base_rate": "$base_rate",
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let worker: WorkerResponse = from_document::<WorkerResponse>(doc).unwrap();
                workers.push(worker);
            }
            Ok(workers)
        } else {
            Err("WORKER_NOT_FOUND".to_string())
        }
    }
    pub async fn find_all() -> Result<Vec<Worker>, String> {
        let db: Database = get_db();
        let collection: Collection<Worker> = db.collection::<Worker>("workers");

        let mut workers: Vec<Worker> = Vec::new();

        if let Ok(mut cursor) = collection.find(doc! {}, None).await {
            while let Some(Ok(worker)) = cursor.next().await {
                workers.push(worker);
            }
            Ok(workers)
        } else {
            Err("WORKER_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<Worker>, String> {
        let db: Database = get_db();
        let collection: Collection<Worker> = db.collection::<Worker>("workers");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "WORKER_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<Worker> = db.collection::<Worker>("workers");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "WORKER_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}
