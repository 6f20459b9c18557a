use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InquiryChannelKind {
    WhatsApp,
    Call,
    Other,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InquiryKind {
    Price,
    Service,
    Complaint,
    General,
}
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatusKind {
    New,
    FollowedUp,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Inquiry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub customer_name: String,
    pub phone: Option<String>,
    pub channel: InquiryChannelKind,
    pub kind: InquiryKind,
    pub notes: String,
    pub date: String,
    pub status: InquiryStatusKind,
}
#[derive(Debug)]
pub struct InquiryQuery {
    pub _id: Option<ObjectId>,
    pub status: Option<InquiryStatusKind>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct InquiryRequest {
    pub customer_name: String,
    pub phone: Option<String>,
    pub channel: InquiryChannelKind,
    pub kind: InquiryKind,
    pub notes: String,
    pub date: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct InquiryResponse {
    pub _id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    pub channel: InquiryChannelKind,
    pub kind: InquiryKind,
    pub notes: String,
    pub date: String,
    pub status: InquiryStatusKind,
}

impl Inquiry {
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Inquiry> = db.collection::<Inquiry>("inquiries");

        self._id = Some(ObjectId::new());

        collection
            .insert_one(self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn update_status(&mut self, status: InquiryStatusKind) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Inquiry> = db.collection::<Inquiry>("inquiries");

        self.status = status;

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": { "status": to_bson::<InquiryStatusKind>(&self.status).unwrap() } },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_many(query: &InquiryQuery) -> Result<Vec<InquiryResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<Inquiry> = db.collection::<Inquiry>("inquiries");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut inquiries: Vec<InquiryResponse> = Vec::new();

        if let Some(status) = &query.status {
            pipeline.push(doc! {
                "$match": {
                    "status": to_bson::<InquiryStatusKind>(status).unwrap()
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
                "customer_name": "$customer_name",
                "phone": "$phone",
                "channel": "$channel",
                "kind": "$kind",
                "notes": "$notes",
                "date": "$date",
                "status": "$status",
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let inquiry: InquiryResponse = from_document::<InquiryResponse>(doc).unwrap();
                inquiries.push(inquiry);
            }
            Ok(inquiries)
        } else {
            Err("INQUIRY_NOT_FOUND".to_string())
        }
    }
    pub async fn find_all() -> Result<Vec<Inquiry>, String> {
        let db: Database = get_db();
        let collection: Collection<Inquiry> = db.collection::<Inquiry>("inquiries");

        let mut inquiries: Vec<Inquiry> = Vec::new();

        if let Ok(mut cursor) = collection.find(doc! {}, None).await {
            while let Some(Ok(inquiry)) = cursor.next().await {
                inquiries.push(inquiry);
            }
            Ok(inquiries)
        } else {
            Err("INQUIRY_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<Inquiry>, String> {
        let db: Database = get_db();
        let collection: Collection<Inquiry> = db.collection::<Inquiry>("inquiries");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "INQUIRY_NOT_FOUND".to_string())
    }
}
