use crate::database::get_db;
use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

use super::{
    inventory_item::InventoryItem,
    worker::WorkerKind,
};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatusKind {
    Pending,
    Approved,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct WorkerCostDetail {
    pub worker_id: ObjectId,
    pub worker_name: String,
    pub kind: WorkerKind,
    // Cash cost for external workers only; company workers carry 0 here
    // and are priced by salary allocation afterwards.
    pub cost: f64,
}
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ConsumedMaterial {
    pub item_id: ObjectId,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    // Unit price x quantity, frozen at write time.
    pub cost_at_time: f64,
}
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CashExpense {
    pub description: String,
    pub amount: f64,
}
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReportImage {
    pub _id: ObjectId,
    pub extension: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub date: String,
    pub site_location: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub car_number: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub work_description: String,
    pub worker_details: Vec<WorkerCostDetail>,
    #[serde(default)]
    pub consumed_materials: Option<Vec<ConsumedMaterial>>,
    #[serde(default)]
    pub cash_expenses: Option<Vec<CashExpense>>,
    // Client-paid amount as entered, possibly blank or malformed.
    pub cost: Option<String>,
    pub payment_method: Option<String>,
    pub image_before: Option<ReportImage>,
    pub image_after: Option<ReportImage>,
    pub notes: Option<String>,
    pub status: ReportStatusKind,
    pub supervisor_name: String,
    pub supervisor_id: Option<ObjectId>,
}
#[derive(Debug)]
pub struct ReportQuery {
    pub _id: Option<ObjectId>,
    pub status: Option<ReportStatusKind>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportRequest {
    pub date: String,
    pub site_location: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub car_number: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub work_description: String,
    pub worker_details: Vec<WorkerCostDetail>,
    pub consumed_materials: Option<Vec<ConsumedMaterial>>,
    pub cash_expenses: Option<Vec<CashExpense>>,
    pub cost: Option<String>,
    pub payment_method: Option<String>,
    pub notes: Option<String>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportStatusRequest {
    pub status: ReportStatusKind,
}
#[derive(Debug, MultipartForm)]
pub struct ReportImageMultipartRequest {
    #[multipart(rename = "file")]
    pub file: TempFile,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct WorkerCostDetailResponse {
    pub worker_id: String,
    pub worker_name: String,
    pub kind: WorkerKind,
    pub cost: f64,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct ConsumedMaterialResponse {
    pub item_id: String,
    pub item_name: String,
    pub quantity: f64,
    pub unit: String,
    pub cost_at_time: f64,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportImageResponse {
    pub _id: String,
    pub extension: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportResponse {
    pub _id: String,
    pub date: String,
    pub site_location: String,
    pub client_name: String,
    pub client_phone: Option<String>,
    pub car_number: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub work_description: String,
    pub worker_details: Vec<WorkerCostDetailResponse>,
    pub consumed_materials: Option<Vec<ConsumedMaterialResponse>>,
    pub cash_expenses: Option<Vec<CashExpense>>,
    pub cost: Option<String>,
    pub payment_method: Option<String>,
    pub image_before: Option<ReportImageResponse>,
    pub image_after: Option<ReportImageResponse>,
    pub notes: Option<String>,
    pub status: ReportStatusKind,
    pub supervisor_name: String,
    pub supervisor_id: Option<String>,
}

impl Report {
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Report> = db.collection::<Report>("reports");

        self._id = Some(ObjectId::new());

        let result = collection
            .insert_one(&*self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())?;

        if let Some(consumed) = &self.consumed_materials {
            for material in consumed.iter() {
                if InventoryItem::consume(&material.item_id, material.quantity, &self.date)
                    .await
                    .is_err()
                {
                    log::warn!(
                        "inventory deduction failed for item {} on report {}",
                        material.item_id,
                        result
                    );
                }
            }
        }

        Ok(result)
    }
    pub async fn update_status(&mut self, status: ReportStatusKind) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Report> = db.collection::<Report>("reports");

        self.status = status;

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": { "status": to_bson::<ReportStatusKind>(&self.status).unwrap() } },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn set_image(
        &mut self,
        image_before: Option<ReportImage>,
        image_after: Option<ReportImage>,
    ) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<Report> = db.collection::<Report>("reports");

        if image_before.is_some() {
            self.image_before = image_before;
        }
        if image_after.is_some() {
            self.image_after = image_after;
        }

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": to_bson::<Report>(self).unwrap() },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn find_many(query: &ReportQuery) -> Result<Vec<ReportResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<Report> = db.collection::<Report>("reports");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut reports: Vec<ReportResponse> = Vec::new();

        if let Some(_id) = &query._id {
            pipeline.push(doc! {
                "$match": {
                    "_id": _id
                }
            });
        }
        if let Some(status) = &query.status {
            pipeline.push(doc! {
                "$match": {
                    "status": to_bson::<ReportStatusKind>(status).unwrap()
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
                "date": "$date",
                "site_location": "$site_location",
                "client_name": "$client_name",
                "client_phone": "$client_phone",
                "car_number": "$car_number",
                "start_time": "$start_time",
                "end_time": "$end_time",
                "work_description": "$work_description",
                "worker_details": {
                    "$map": {
                        "input": "$worker_details",
                        "in": {
                            "worker_id": { "$toString": "$$this.worker_id" },
                            "worker_name": "$$this.worker_name",
                            "kind": "$$this.kind",
                            "cost": "$$this.cost",
                        }
                    }
                },
                "consumed_materials": {
                    "$cond": [
                        "$consumed_materials",
                        {
                            "$map": {
                                "input": "$consumed_materials",
                                "in": {
                                    "item_id": { "$toString": "$$this.item_id" },
                                    "item_name": "$$this.item_name",
                                    "quantity": "$$this.quantity",
                                    "unit": "$$this.unit",
                                    "cost_at_time": "$$this.cost_at_time",
                                }
                            }
                        },
                        to_bson::<Option<Vec<ConsumedMaterialResponse>>>(&None).unwrap()
                    ]
                },
                "cash_expenses": "$cash_expenses",
                "cost": "$cost",
                "payment_method": "$payment_method",
                "image_before": {
                    "$cond": [
                        "$image_before",
                        {
                            "_id": { "$toString": "$image_before._id" },
                            "extension": "$image_before.extension"
                        },
                        to_bson::<Option<ReportImageResponse>>(&None).unwrap()
                    ]
                },
                "image_after": {
                    "$cond": [
                        "$image_after",
                        {
                            "_id": { "$toString": "$image_after._id" },
                            "extension": "$image_after.extension"
                        },
                        to_bson::<Option<ReportImageResponse>>(&None).unwrap()
                    ]
                },
                "notes": "$notes",
                "status": "$status",
                "supervisor_name": "$supervisor_name",
                "supervisor_id": {
                    "$cond": [
                        "$supervisor_id",
                        { "$toString": "$supervisor_id" },
                        to_bson::<Option<String>>(&None).unwrap()
                    ]
                },
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let report: ReportResponse = from_document::<ReportResponse>(doc).unwrap();
                reports.push(report);
            }
            Ok(reports)
        } else {
            Err("REPORT_NOT_FOUND".to_string())
        }
    }
    pub async fn find_all() -> Result<Vec<Report>, String> {
        let db: Database = get_db();
        let collection: Collection<Report> = db.collection::<Report>("reports");

        let mut reports: Vec<Report> = Vec::new();

        if let Ok(mut cursor) = collection.find(doc! {}, None).await {
            while let Some(Ok(report)) = cursor.next().await {
                reports.push(report);
            }
            Ok(reports)
        } else {
            Err("REPORT_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<Report>, String> {
        let db: Database = get_db();
        let collection: Collection<Report> = db.collection::<Report>("reports");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "REPORT_NOT_FOUND".to_string())
    }
}
