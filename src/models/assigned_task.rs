use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriorityKind {
    Low,
    Medium,
    High,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatusKind {
    Pending,
    InProgress,
    Completed,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AssignedTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    pub assigned_to_id: ObjectId,
    pub assigned_to_name: String,
    pub assigned_by: String,
    pub priority: TaskPriorityKind,
    pub status: TaskStatusKind,
    pub due_date: String,
    pub created_at: String,
}
#[derive(Debug)]
pub struct AssignedTaskQuery {
    pub _id: Option<ObjectId>,
    pub assigned_to_id: Option<ObjectId>,
    pub status: Option<TaskStatusKind>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct AssignedTaskRequest {
    pub title: String,
    pub description: String,
    pub assigned_to_id: ObjectId,
    pub assigned_to_name: String,
    pub priority: TaskPriorityKind,
    pub due_date: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct TaskStatusRequest {
    pub status: TaskStatusKind,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct AssignedTaskResponse {
    pub _id: String,
    pub title: String,
    pub description: String,
    pub assigned_to_id: String,
    pub assigned_to_name: String,
    pub assigned_by: String,
    pub priority: TaskPriorityKind,
    pub status: TaskStatusKind,
    pub due_date: String,
    pub created_at: String,
}

impl AssignedTask {
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<AssignedTask> = db.collection::<AssignedTask>("assigned_tasks");

        self._id = Some(ObjectId::new());

        collection
            .insert_one(&*self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn update_status(&mut self, status: TaskStatusKind) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<AssignedTask> = db.collection::<AssignedTask>("assigned_tasks");

        self.status = status;

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": { "status": to_bson::<TaskStatusKind>(&self.status).unwrap() } },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_many(query: &AssignedTaskQuery) -> Result<Vec<AssignedTaskResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<AssignedTask> = db.collection::<AssignedTask>("assigned_tasks");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut tasks: Vec<AssignedTaskResponse> = Vec::new();

        if let Some(assigned_to_id) = &query.assigned_to_id {
            pipeline.push(doc! {
                "$match": {
                    "assigned_to_id": assigned_to_id
                }
            });
        }
        if let Some(status) = &query.status {
            pipeline.push(doc! {
                "$match": {
                    "status": to_bson::<TaskStatusKind>(status).unwrap()
                }
            });
        }

        pipeline.push(doc! {
            "$sort": { "due_date": 1 }
        });

        if let Some(limit) = query.limit {
            pipeline.push(doc! {
                "$limit": to_bson::<usize>(&limit).unwrap()
            });
        }

        pipeline.push(doc! {
            "$project": {
                "_id": { "$toString": "$_id" },
                "title": "$title",
                "description": "$description",
                "assigned_to_id": { "$toString": "$assigned_to_id" },
                "assigned_to_name": "$assigned_to_name",
                "assigned_by": "$assigned_by",
                "priority": "$priority",
                "status": "$status",
                "due_date": "$due_date",
                "created_at": "$created_at",
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let task: AssignedTaskResponse =
                    from_document::<AssignedTaskResponse>(doc).unwrap();
                tasks.push(task);
            }
            Ok(tasks)
        } else {
            Err("TASK_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<AssignedTask>, String> {
        let db: Database = get_db();
        let collection: Collection<AssignedTask> = db.collection::<AssignedTask>("assigned_tasks");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "TASK_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<AssignedTask> = db.collection::<AssignedTask>("assigned_tasks");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "TASK_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}
