//! [`OrderStore`] on redb
//!
//! Orders are persisted with `orderItems` as JSON text, the format the
//! register has always written. Records imported from older exports may
//! carry a plain array instead; both decode on the way out.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{
    ORDER_STATE_PENDING, Order, OrderCreate, OrderLine, OrderUpdate, decode_order_items,
    encode_order_items,
};
use shared::report::parse_order_time;

use super::OrderStore;
use super::storage::{FesStorage, ORDERS_TABLE, StorageError, StorageResult};
use crate::utils::validation::{validate_circle_id, validate_order_create, validate_order_update};
use crate::utils::{AppError, AppResult};

/// Stored order row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRecord {
    pub id: String,
    #[serde(default)]
    pub circle_id: String,
    #[serde(default)]
    pub order_id: String,
    /// Text (current) or array (legacy)
    #[serde(default)]
    pub order_items: Value,
    pub total_price: i64,
    pub people_count: u32,
    pub time: String,
    #[serde(default)]
    pub cashier: String,
    #[serde(default)]
    pub order_state: String,
    #[serde(default)]
    pub archived: bool,
}

impl OrderRecord {
    fn from_order(order: &Order, archived: bool) -> StorageResult<Self> {
        Ok(Self {
            id: order.id.clone(),
            circle_id: order.circle_id.clone(),
            order_id: order.order_id.clone(),
            order_items: Value::String(encode_order_items(&order.order_items)?),
            total_price: order.total_price,
            people_count: order.people_count,
            time: order.time.clone(),
            cashier: order.cashier.clone(),
            order_state: order.order_state.clone(),
            archived,
        })
    }

    /// Undecodable `orderItems` become an empty line list
    fn into_order(self) -> Order {
        let order_items = decode_lines(&self.id, self.order_items);
        Order {
            id: self.id,
            circle_id: self.circle_id,
            order_id: self.order_id,
            order_items,
            total_price: self.total_price,
            people_count: self.people_count,
            time: self.time,
            cashier: self.cashier,
            order_state: self.order_state,
        }
    }
}

fn decode_lines(id: &str, raw: Value) -> Vec<OrderLine> {
    let decoded = match raw {
        Value::String(text) => decode_order_items(&text),
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other),
    };
    decoded.unwrap_or_else(|e| {
        tracing::warn!(order_id = %id, error = %e, "Undecodable orderItems, treating as empty");
        Vec::new()
    })
}

/// Instant first (unparsable last), then raw time text, then id
///
/// Naive times carry no zone here and are read as UTC.
fn listing_key(order: &Order) -> (bool, Option<DateTime<Utc>>, String, String) {
    let instant = parse_order_time(&order.time, Tz::UTC)
        .ok()
        .map(|t| t.with_timezone(&Utc));
    (instant.is_none(), instant, order.time.clone(), order.id.clone())
}

impl FesStorage {
    /// Load a live order inside a write transaction
    fn load_active_order(
        txn: &redb::WriteTransaction,
        circle_id: &str,
        id: &str,
    ) -> AppResult<OrderRecord> {
        match Self::get_in::<OrderRecord>(txn, ORDERS_TABLE, circle_id, id)? {
            Some(record) if !record.archived => Ok(record),
            _ => Err(AppError::order_not_found(id)),
        }
    }
}

impl OrderStore for FesStorage {
    fn list_orders(&self, circle_id: &str) -> AppResult<Vec<Order>> {
        validate_circle_id(circle_id)?;

        let records: Vec<OrderRecord> = self.scan_prefix(ORDERS_TABLE, circle_id)?;
        let mut orders: Vec<Order> = records
            .into_iter()
            .filter(|r| !r.archived)
            .map(OrderRecord::into_order)
            .collect();
        orders.sort_by_cached_key(listing_key);
        Ok(orders)
    }

    fn create_order(&self, circle_id: &str, payload: OrderCreate) -> AppResult<Order> {
        validate_circle_id(circle_id)?;
        validate_order_create(&payload)?;

        let txn = self.begin_write()?;
        let order_id = match payload.order_id.filter(|s| !s.trim().is_empty()) {
            Some(order_id) => order_id,
            None => Self::next_order_number(&txn, circle_id)?.to_string(),
        };

        let order = Order {
            id: uuid::Uuid::new_v4().to_string(),
            circle_id: circle_id.to_string(),
            order_id,
            order_items: payload.order_items,
            total_price: payload.total_price,
            people_count: payload.people_count,
            time: payload
                .time
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            cashier: payload.cashier,
            order_state: payload
                .order_state
                .unwrap_or_else(|| ORDER_STATE_PENDING.to_string()),
        };

        let record = OrderRecord::from_order(&order, false)?;
        Self::put_in(&txn, ORDERS_TABLE, circle_id, &order.id, &record)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(
            circle_id = %circle_id,
            id = %order.id,
            order_id = %order.order_id,
            total_price = order.total_price,
            "Order created"
        );
        Ok(order)
    }

    fn update_order(&self, circle_id: &str, id: &str, payload: OrderUpdate) -> AppResult<Order> {
        validate_circle_id(circle_id)?;
        validate_order_update(&payload)?;

        let txn = self.begin_write()?;
        let mut order = Self::load_active_order(&txn, circle_id, id)?.into_order();

        if let Some(order_id) = payload.order_id {
            order.order_id = order_id;
        }
        if let Some(order_items) = payload.order_items {
            order.order_items = order_items;
        }
        if let Some(total_price) = payload.total_price {
            order.total_price = total_price;
        }
        if let Some(people_count) = payload.people_count {
            order.people_count = people_count;
        }
        if let Some(time) = payload.time {
            order.time = time;
        }
        if let Some(cashier) = payload.cashier {
            order.cashier = cashier;
        }
        if let Some(order_state) = payload.order_state {
            order.order_state = order_state;
        }

        let record = OrderRecord::from_order(&order, false)?;
        Self::put_in(&txn, ORDERS_TABLE, circle_id, id, &record)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::debug!(circle_id = %circle_id, id = %id, state = %order.order_state, "Order updated");
        Ok(order)
    }

    fn archive_order(&self, circle_id: &str, id: &str) -> AppResult<()> {
        validate_circle_id(circle_id)?;

        let txn = self.begin_write()?;
        let mut record = Self::load_active_order(&txn, circle_id, id)?;
        record.archived = true;
        Self::put_in(&txn, ORDERS_TABLE, circle_id, id, &record)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(circle_id = %circle_id, id = %id, "Order archived");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ErrorCode;

    fn payload(time: &str) -> OrderCreate {
        OrderCreate {
            order_id: None,
            order_items: vec![OrderLine::new("m1", 2).with_toppings(["t1"])],
            total_price: 700,
            people_count: 2,
            time: Some(time.to_string()),
            cashier: "Aoi".to_string(),
            order_state: None,
        }
    }

    fn put_raw(storage: &FesStorage, circle_id: &str, id: &str, json: &str) {
        let txn = storage.begin_write().unwrap();
        {
            let mut table = txn.open_table(ORDERS_TABLE).unwrap();
            table.insert((circle_id, id), json.as_bytes()).unwrap();
        }
        txn.commit().unwrap();
    }

    #[test]
    fn test_order_lifecycle() {
        let storage = FesStorage::open_in_memory().unwrap();

        let created = storage
            .create_order("c1", payload("2024-08-01T10:00:00Z"))
            .unwrap();
        assert_eq!(created.order_state, ORDER_STATE_PENDING);
        assert_eq!(created.order_id, "1");
        assert_eq!(created.circle_id, "c1");

        let listed = storage.list_orders("c1").unwrap();
        assert_eq!(listed, vec![created.clone()]);

        let updated = storage
            .update_order(
                "c1",
                &created.id,
                OrderUpdate {
                    order_state: Some("Served".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.order_state, "Served");
        assert_eq!(updated.total_price, 700);
        assert_eq!(storage.list_orders("c1").unwrap()[0].order_state, "Served");

        storage.archive_order("c1", &created.id).unwrap();
        assert!(storage.list_orders("c1").unwrap().is_empty());

        let err = storage
            .update_order("c1", &created.id, OrderUpdate::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        let err = storage.archive_order("c1", &created.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_create_defaults_and_numbering() {
        let storage = FesStorage::open_in_memory().unwrap();
        let mut first = payload("2024-08-01T10:00:00Z");
        first.time = None;
        let first = storage.create_order("c1", first).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&first.time).is_ok());

        let second = storage
            .create_order("c1", payload("2024-08-01T10:00:00Z"))
            .unwrap();
        assert_eq!(second.order_id, "2");

        let mut named = payload("2024-08-01T10:00:00Z");
        named.order_id = Some("A-7".to_string());
        assert_eq!(storage.create_order("c1", named).unwrap().order_id, "A-7");

        let other = storage
            .create_order("c2", payload("2024-08-01T10:00:00Z"))
            .unwrap();
        assert_eq!(other.order_id, "1");
    }

    #[test]
    fn test_list_sorted_by_time_then_id() {
        let storage = FesStorage::open_in_memory().unwrap();
        let late = storage
            .create_order("c1", payload("2024-08-01T12:00:00Z"))
            .unwrap();
        let early = storage
            .create_order("c1", payload("2024-08-01T09:00:00Z"))
            .unwrap();
        storage
            .create_order("c2", payload("2024-08-01T08:00:00Z"))
            .unwrap();

        let ids: Vec<String> = storage
            .list_orders("c1")
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![early.id, late.id]);
    }

    #[test]
    fn test_invalid_create_rejected() {
        let storage = FesStorage::open_in_memory().unwrap();
        let mut bad = payload("2024-08-01T10:00:00Z");
        bad.order_items.clear();
        assert_eq!(
            storage.create_order("c1", bad).unwrap_err().code,
            ErrorCode::OrderEmpty
        );
        assert!(storage.list_orders("c1").unwrap().is_empty());
    }

    #[test]
    fn test_missing_order_not_found() {
        let storage = FesStorage::open_in_memory().unwrap();
        let err = storage
            .update_order("c1", "nope", OrderUpdate::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[test]
    fn test_legacy_text_order_items_decoded() {
        let storage = FesStorage::open_in_memory().unwrap();
        put_raw(
            &storage,
            "c1",
            "legacy",
            r#"{"id":"legacy","orderItems":"[{\"menuItemId\":\"m1\",\"quantity\":3,\"toppingIds\":[\"t1\"]}]","totalPrice":900,"peopleCount":1,"time":"2024-08-01T10:00:00Z","cashier":"Ren","orderState":"Pending"}"#,
        );
        put_raw(
            &storage,
            "c1",
            "array",
            r#"{"id":"array","orderItems":[{"menuItemId":"m2","quantity":1}],"totalPrice":200,"peopleCount":1,"time":"2024-08-01T11:00:00Z","cashier":"Ren","orderState":"Pending"}"#,
        );
        put_raw(
            &storage,
            "c1",
            "broken",
            r#"{"id":"broken","orderItems":"{not json","totalPrice":500,"peopleCount":1,"time":"2024-08-01T12:00:00Z","cashier":"Ren","orderState":"Pending"}"#,
        );

        let orders = storage.list_orders("c1").unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(
            orders[0].order_items,
            vec![OrderLine::new("m1", 3).with_toppings(["t1"])]
        );
        assert_eq!(orders[1].order_items, vec![OrderLine::new("m2", 1)]);
        assert!(orders[2].order_items.is_empty());
        assert_eq!(orders[2].total_price, 500);
    }

    #[test]
    fn test_list_sorted_by_instant_across_offsets() {
        let storage = FesStorage::open_in_memory().unwrap();
        // 10:00+09:00 is 01:00Z, earlier than 02:00Z despite sorting later as text
        let tokyo = storage
            .create_order("c1", payload("2024-08-01T10:00:00+09:00"))
            .unwrap();
        let utc = storage
            .create_order("c1", payload("2024-08-01T02:00:00Z"))
            .unwrap();
        put_raw(
            &storage,
            "c1",
            "bad",
            r#"{"id":"bad","orderItems":"[]","totalPrice":0,"peopleCount":1,"time":"someday","cashier":"Ren","orderState":"Pending"}"#,
        );

        let ids: Vec<String> = storage
            .list_orders("c1")
            .unwrap()
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec![tokyo.id, utc.id, "bad".to_string()]);
    }
}
