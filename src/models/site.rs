use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatusKind {
    Active,
    Completed,
    Pending,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Site {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub address: String,
    pub client_name: String,
    pub status: SiteStatusKind,
    pub assigned_workers: i32,
}
#[derive(Debug)]
pub struct SiteQuery {
    pub _id: Option<ObjectId>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct SiteRequest {
    pub name: String,
    pub address: String,
    pub client_name: String,
    pub status: SiteStatusKind,
    pub assigned_workers: i32,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct SiteResponse {
    pub _id: String,
    pub name: String,
    pub address: String,
    pub client_name: String,
    pub status: SiteStatusKind,
    pub assigned_workers: i32,
}

impl Site {
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Site> = db.collection::<Site>("sites");

        self._id = Some(ObjectId::new());

        collection
            .insert_one(self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn update(&self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Site> = db.collection::<Site>("sites");

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": to_bson::<Site>(self).unwrap() },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_many(query: &SiteQuery) -> Result<Vec<SiteResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<Site> = db.collection::<Site>("sites");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut sites: Vec<SiteResponse> = Vec::new();

        if let Some(limit) = query.limit {
            pipeline.push(doc! {
                "$limit": to_bson::<usize>(&limit).unwrap()
            });
        }

        pipeline.push(doc! {
            "$project": {
                "_id": { "$toString": "$_id" },
                "name": "$name",
                "address": "$address",
                "client_name": "$client_name",
                "status": "$status",
                "assigned_workers": "$assigned_workers",
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let site: SiteResponse = from_document::<SiteResponse>(doc).unwrap();
                sites.push(site);
            }
            Ok(sites)
        } else {
            Err("SITE_NOT_FOUND".to_string())
        }
    }
    pub async fn find_all() -> Result<Vec<Site>, String> {
        let db: Database = get_db();
        let collection: Collection<Site> = db.collection::<Site>("sites");

        let mut sites: Vec<Site> = Vec::new();

        if let Ok(mut cursor) = collection.find(doc! {}, None).await {
            while let Some(Ok(site)) = cursor.next().await {
                sites.push(site);
            }
            Ok(sites)
        } else {
            Err("SITE_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<Site>, String> {
        let db: Database = get_db();
        let collection: Collection<Site> = db.collection::<Site>("sites");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "SITE_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<Site> = db.collection::<Site>("sites");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "SITE_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}
