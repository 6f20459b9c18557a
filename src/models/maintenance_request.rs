use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceRequestKind {
    Repair,
    Purchase,
    SparePart,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaintenancePriorityKind {
    Low,
    Medium,
    High,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatusKind {
    Pending,
    Approved,
    Completed,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MaintenanceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub kind: MaintenanceRequestKind,
    pub item_id: Option<ObjectId>,
    pub item_name: String,
    pub description: String,
    pub priority: MaintenancePriorityKind,
    pub requester_name: String,
    pub date: String,
    pub status: MaintenanceStatusKind,
}
#[derive(Debug)]
pub struct MaintenanceRequestQuery {
    pub _id: Option<ObjectId>,
    pub status: Option<MaintenanceStatusKind>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct MaintenanceRequestRequest {
    pub kind: MaintenanceRequestKind,
    pub item_id: Option<ObjectId>,
    pub item_name: String,
    pub description: String,
    pub priority: MaintenancePriorityKind,
    pub date: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct MaintenanceStatusRequest {
    pub status: MaintenanceStatusKind,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct MaintenanceRequestResponse {
    pub _id: String,
    pub kind: MaintenanceRequestKind,
    pub item_id: Option<String>,
    pub item_name: String,
    pub description: String,
    pub priority: MaintenancePriorityKind,
    pub requester_name: String,
    pub date: String,
    pub status: MaintenanceStatusKind,
}

impl MaintenanceRequest {
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<MaintenanceRequest> =
            db.collection::<MaintenanceRequest>("maintenance_requests");

        self._id = Some(ObjectId::new());

        collection
            .insert_one(&*self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn update_status(
        &mut self,
        status: MaintenanceStatusKind,
    ) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<MaintenanceRequest> =
            db.collection::<MaintenanceRequest>("maintenance_requests");

        self.status = status;

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": { "status": to_bson::<MaintenanceStatusKind>(&self.status).unwrap() } },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_many(
        query: &MaintenanceRequestQuery,
    ) -> Result<Vec<MaintenanceRequestResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<MaintenanceRequest> =
            db.collection::<MaintenanceRequest>("maintenance_requests");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut requests: Vec<MaintenanceRequestResponse> = Vec::new();

        if let Some(status) = &query.status {
            pipeline.push(doc! {
                "$match": {
                    "status": to_bson::<MaintenanceStatusKind>(status).unwrap()
                }
            });
        }

        pipeline.push(doc! {
            "$sort": { "date": -1 }
        });

        if let Some(limit) = query.limit {
            pipeline.push(doc! {
                "$limit": to_bson::<usize>(&limit).unwrap()
            });
        }

        pipeline.push(doc! {
            "$project": {
                "_id": { "$toString": "$_id" },
                "kind": "$kind",
                "item_id": {
                    "$cond": [
                        "$item_id",
                        { "$toString": "$item_id" },
                        to_bson::<Option<String>>(&None).unwrap()
                    ]
                },
                "item_name": "$item_name",
                "description": "$description",
                "priority": "$priority",
                "requester_name": "$requester_name",
                "date": "$date",
                "status": "$status",
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let request: MaintenanceRequestResponse =
                    from_document::<MaintenanceRequestResponse>(doc).unwrap();
                requests.push(request);
            }
            Ok(requests)
        } else {
            Err("MAINTENANCE_REQUEST_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<MaintenanceRequest>, String> {
        let db: Database = get_db();
        let collection: Collection<MaintenanceRequest> =
            db.collection::<MaintenanceRequest>("maintenance_requests");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "MAINTENANCE_REQUEST_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<MaintenanceRequest> =
            db.collection::<MaintenanceRequest>("maintenance_requests");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "MAINTENANCE_REQUEST_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}
