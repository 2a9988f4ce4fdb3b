//! Product Document Mapper
//!
//! Converts between product data and the documents persisted in the store.
//! Prices are written as stored decimals and timestamps as RFC 3339 strings.

use jiff::Timestamp;
use serde::{Deserialize, Serialize, de::Error as _};
use serde_json::Value;

use crate::{
    documents::{Document, StoredDecimal},
    domain::products::{
        data::{NewProduct, ProductUpdate},
        records::{ProductRecord, ProductUuid},
    },
};

/// Document written when a product is created.
#[derive(Debug, Serialize)]
struct NewProductDocument<'a> {
    name: &'a str,
    quantity: i64,
    price: StoredDecimal,
    status: bool,
}

/// Partial document written when a product is updated.
#[derive(Debug, Serialize)]
struct ProductUpdateDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<StoredDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<bool>,
}

/// Product document as read back from the store. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: ProductUuid,
    name: String,
    quantity: i64,
    price: StoredDecimal,
    status: bool,
    #[serde(default)]
    created_at: Option<Timestamp>,
    #[serde(default)]
    updated_at: Option<Timestamp>,
}

/// Map a new product to its document. Timestamps are left to the caller.
///
/// # Errors
///
/// Returns an error when the document cannot be serialized.
pub fn new_product_document(product: &NewProduct) -> Result<Document, serde_json::Error> {
    to_document(&NewProductDocument {
        name: &product.name,
        quantity: product.quantity,
        price: product.price.into(),
        status: product.status,
    })
}

/// Map a partial update to the set of fields it changes. Absent fields are
/// omitted, never nulled.
///
/// # Errors
///
/// Returns an error when the document cannot be serialized.
pub fn product_update_document(update: &ProductUpdate) -> Result<Document, serde_json::Error> {
    to_document(&ProductUpdateDocument {
        name: update.name.as_deref(),
        quantity: update.quantity,
        price: update.price.map(StoredDecimal::from),
        status: update.status,
    })
}

/// Stamp `created_at` and `updated_at` on a new document.
pub fn stamp_created(document: &mut Document, now: Timestamp) {
    let now = Value::String(now.to_string());

    document.insert("created_at".to_string(), now.clone());
    document.insert("updated_at".to_string(), now);
}

/// Stamp `updated_at` on an update set.
pub fn stamp_updated(document: &mut Document, now: Timestamp) {
    document.insert("updated_at".to_string(), Value::String(now.to_string()));
}

/// Map a stored document back to a product record. Missing timestamps are
/// filled with the current time.
///
/// # Errors
///
/// Returns an error when a required field is missing or has the wrong type.
pub fn product_from_document(document: Document) -> Result<ProductRecord, serde_json::Error> {
    let doc: ProductDocument = serde_json::from_value(Value::Object(document))?;
    let now = Timestamp::now();

    Ok(ProductRecord {
        id: doc.id,
        name: doc.name,
        quantity: doc.quantity,
        price: doc.price.into_inner(),
        status: doc.status,
        created_at: doc.created_at.unwrap_or(now),
        updated_at: doc.updated_at.unwrap_or(now),
    })
}

fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(serde_json::Error::custom(format!(
            "expected a document object, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[test]
    fn new_product_document_stores_decimal_price() -> TestResult {
        let doc = new_product_document(&NewProduct {
            name: "Desk".to_string(),
            quantity: 3,
            price: dec!(99.99),
            status: true,
        })?;

        assert_eq!(
            Value::Object(doc),
            json!({
                "name": "Desk",
                "quantity": 3,
                "price": { "$numberDecimal": "99.99" },
                "status": true,
            })
        );

        Ok(())
    }

    #[test]
    fn update_document_only_contains_present_fields() -> TestResult {
        let doc = product_update_document(&ProductUpdate {
            quantity: Some(7),
            status: Some(false),
            ..ProductUpdate::default()
        })?;

        assert_eq!(Value::Object(doc), json!({ "quantity": 7, "status": false }));

        Ok(())
    }

    #[test]
    fn empty_update_document_is_empty() -> TestResult {
        let doc = product_update_document(&ProductUpdate::default())?;

        assert!(doc.is_empty());

        Ok(())
    }

    #[test]
    fn stamps_timestamps_as_rfc3339() -> TestResult {
        let now: Timestamp = "2024-05-01T12:30:00Z".parse()?;
        let mut doc = Document::new();

        stamp_created(&mut doc, now);

        assert_eq!(doc.get("created_at"), Some(&json!("2024-05-01T12:30:00Z")));
        assert_eq!(doc.get("updated_at"), Some(&json!("2024-05-01T12:30:00Z")));

        Ok(())
    }

    #[test]
    fn from_document_maps_id_and_price() -> TestResult {
        let id = Uuid::now_v7();

        let product = product_from_document(document(json!({
            "_id": id.to_string(),
            "name": "Desk",
            "quantity": 3,
            "price": { "$numberDecimal": "1234.5600" },
            "status": false,
            "created_at": "2024-05-01T12:30:00Z",
            "updated_at": "2024-05-02T08:00:00Z",
        })))?;

        assert_eq!(product.id.into_uuid(), id);
        assert_eq!(product.price, dec!(1234.5600));
        assert_eq!(product.price.to_string(), "1234.5600");
        assert!(!product.status);
        assert_eq!(product.created_at.to_string(), "2024-05-01T12:30:00Z");
        assert_eq!(product.updated_at.to_string(), "2024-05-02T08:00:00Z");

        Ok(())
    }

    #[test]
    fn from_document_defaults_missing_timestamps() -> TestResult {
        let before = Timestamp::now();

        let product = product_from_document(document(json!({
            "_id": Uuid::now_v7().to_string(),
            "name": "Desk",
            "quantity": 3,
            "price": 10,
            "status": true,
        })))?;

        assert!(product.created_at >= before);
        assert!(product.updated_at >= before);

        Ok(())
    }

    #[test]
    fn from_document_ignores_unknown_fields() -> TestResult {
        let product = product_from_document(document(json!({
            "_id": Uuid::now_v7().to_string(),
            "name": "Desk",
            "quantity": 3,
            "price": "5.00",
            "status": true,
            "colour": "oak",
        })))?;

        assert_eq!(product.price, dec!(5.00));

        Ok(())
    }

    #[test]
    fn from_document_rejects_missing_required_fields() {
        let result = product_from_document(document(json!({
            "_id": Uuid::now_v7().to_string(),
            "name": "Desk",
            "price": "5.00",
            "status": true,
        })));

        assert!(result.is_err(), "quantity is required");
    }
}
