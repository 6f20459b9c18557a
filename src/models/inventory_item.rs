use crate::database::get_db;
use futures::stream::StreamExt;
use mongodb::{
    bson::{doc, from_document, oid::ObjectId, to_bson},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

const LOW_QUANTITY_THRESHOLD: f64 = 5.0;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InventoryStatusKind {
    Good,
    Low,
    Critical,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InventoryItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub status: InventoryStatusKind,
    pub last_updated: String,
}
#[derive(Debug)]
pub struct InventoryItemQuery {
    pub _id: Option<ObjectId>,
    pub status: Option<InventoryStatusKind>,
    pub limit: Option<usize>,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct InventoryItemRequest {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub last_updated: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct InventoryQuantityRequest {
    pub quantity: f64,
    pub last_updated: String,
}
#[derive(Debug, Deserialize, Serialize)]
pub struct InventoryItemResponse {
    pub _id: String,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub status: InventoryStatusKind,
    pub last_updated: String,
}

impl InventoryItem {
    // Stock level classification: empty is critical, under 5 units is low.
    pub fn status_for(quantity: f64) -> InventoryStatusKind {
        if quantity <= 0.0 {
            InventoryStatusKind::Critical
        } else if quantity < LOW_QUANTITY_THRESHOLD {
            InventoryStatusKind::Low
        } else {
            InventoryStatusKind::Good
        }
    }
    pub async fn save(&mut self) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<InventoryItem> = db.collection::<InventoryItem>("inventory");

        self._id = Some(ObjectId::new());
        self.status = Self::status_for(self.quantity);

        collection
            .insert_one(self, None)
            .await
            .map_err(|_| "INSERTING_FAILED".to_string())
            .map(|result| result.inserted_id.as_object_id().unwrap())
    }
    pub async fn set_quantity(&mut self, quantity: f64, date: &str) -> Result<ObjectId, String> {
        let db: Database = get_db();
        let collection: Collection<InventoryItem> = db.collection::<InventoryItem>("inventory");

        self.quantity = if quantity < 0.0 { 0.0 } else { quantity };
        self.status = Self::status_for(self.quantity);
        self.last_updated = date.to_string();

        collection
            .update_one(
                doc! { "_id": self._id.unwrap() },
                doc! { "$set": to_bson::<InventoryItem>(self).unwrap() },
                None,
            )
            .await
            .map_err(|_| "UPDATE_FAILED".to_string())
            .map(|_| self._id.unwrap())
    }
    pub async fn consume(_id: &ObjectId, quantity: f64, date: &str) -> Result<ObjectId, String> {
        if let Ok(Some(mut item)) = Self::find_by_id(_id).await {
            let remaining = item.quantity - quantity;
            item.set_quantity(remaining, date).await
        } else {
            Err("INVENTORY_ITEM_NOT_FOUND".to_string())
        }
    }
    pub async fn find_many(query: &InventoryItemQuery) -> Result<Vec<InventoryItemResponse>, String> {
        let db: Database = get_db();
        let collection: Collection<InventoryItem> = db.collection::<InventoryItem>("inventory");

        let mut pipeline: Vec<mongodb::bson::Document> = Vec::new();
        let mut items: Vec<InventoryItemResponse> = Vec::new();

        if let Some(status) = &query.status {
            pipeline.push(doc! {
                "$match": {
                    "status": to_bson::<InventoryStatusKind>(status).unwrap()
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
                "quantity": "$quantity",
                "unit": "$unit",
                "price": "$price",
                "status": "$status",
                "last_updated": "$last_updated",
            }
        });

        if let Ok(mut cursor) = collection.aggregate(pipeline, None).await {
            while let Some(Ok(doc)) = cursor.next().await {
                let item: InventoryItemResponse = from_document::<InventoryItemResponse>(doc).unwrap();
                items.push(item);
            }
            Ok(items)
        } else {
            Err("INVENTORY_ITEM_NOT_FOUND".to_string())
        }
    }
    pub async fn find_by_id(_id: &ObjectId) -> Result<Option<InventoryItem>, String> {
        let db: Database = get_db();
        let collection: Collection<InventoryItem> = db.collection::<InventoryItem>("inventory");

        collection
            .find_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "INVENTORY_ITEM_NOT_FOUND".to_string())
    }
    pub async fn delete_by_id(_id: &ObjectId) -> Result<u64, String> {
        let db: Database = get_db();
        let collection: Collection<InventoryItem> = db.collection::<InventoryItem>("inventory");

        collection
            .delete_one(doc! { "_id": _id }, None)
            .await
            .map_err(|_| "INVENTORY_ITEM_NOT_FOUND".to_string())
            .map(|result| result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stock_is_critical() {
        assert_eq!(InventoryItem::status_for(0.0), InventoryStatusKind::Critical);
        assert_eq!(InventoryItem::status_for(-2.0), InventoryStatusKind::Critical);
    }

    #[test]
    fn under_five_units_is_low() {
        assert_eq!(InventoryItem::status_for(0.5), InventoryStatusKind::Low);
        assert_eq!(InventoryItem::status_for(4.9), InventoryStatusKind::Low);
    }

    #[test]
    fn five_units_and_up_is_good() {
        assert_eq!(InventoryItem::status_for(5.0), InventoryStatusKind::Good);
        assert_eq!(InventoryItem::status_for(120.0), InventoryStatusKind::Good);
    }
}
