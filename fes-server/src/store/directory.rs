//! [`DirectoryStore`] on redb
//!
//! Circles live in their own table keyed by id. Event participation is a
//! `(event_name, circle_id)` row; circle names are resolved when an event
//! is read, so renaming a circle shows up everywhere at once.

use redb::{ReadableTable, WriteTransaction};
use serde::{Deserialize, Serialize};
use shared::models::{Circle, CircleCreate, CircleUpdate, EventEntry};

use super::DirectoryStore;
use super::storage::{
    Archivable, CIRCLES_TABLE, EVENT_ENTRIES_TABLE, FesStorage, StorageError, StorageResult,
};
use crate::utils::validation::{
    validate_circle_create, validate_circle_id, validate_circle_update, validate_event_name,
};
use crate::utils::{AppError, AppResult};

/// Stored event participation row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EventRecord {
    pub event_name: String,
    pub circle_id: String,
}

impl FesStorage {
    fn circle_rows(&self) -> StorageResult<Vec<Archivable<Circle>>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(CIRCLES_TABLE)?;

        let mut rows = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            rows.push(serde_json::from_slice(value.value())?);
        }
        Ok(rows)
    }

    fn read_circle(&self, id: &str) -> StorageResult<Option<Circle>> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(CIRCLES_TABLE)?;
        let row: Option<Archivable<Circle>> = match table.get(id)? {
            Some(guard) => Some(serde_json::from_slice(guard.value())?),
            None => None,
        };
        Ok(row.and_then(Archivable::into_live))
    }

    fn load_circle(txn: &WriteTransaction, id: &str) -> StorageResult<Option<Circle>> {
        let table = txn.open_table(CIRCLES_TABLE)?;
        let bytes = table.get(id)?.map(|guard| guard.value().to_vec());
        let Some(bytes) = bytes else {
            return Ok(None);
        };
        let row: Archivable<Circle> = serde_json::from_slice(&bytes)?;
        Ok(row.into_live())
    }

    fn store_circle(
        txn: &WriteTransaction,
        id: &str,
        row: &Archivable<&Circle>,
    ) -> StorageResult<()> {
        let bytes = serde_json::to_vec(row)?;
        let mut table = txn.open_table(CIRCLES_TABLE)?;
        table.insert(id, bytes.as_slice())?;
        Ok(())
    }
}

impl DirectoryStore for FesStorage {
    fn list_circles(&self) -> AppResult<Vec<Circle>> {
        let mut circles: Vec<Circle> = self
            .circle_rows()?
            .into_iter()
            .filter_map(Archivable::into_live)
            .collect();
        circles.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(circles)
    }

    fn get_circle(&self, id: &str) -> AppResult<Circle> {
        validate_circle_id(id)?;
        self.read_circle(id)?
            .ok_or_else(|| AppError::circle_not_found(id))
    }

    fn create_circle(&self, payload: CircleCreate) -> AppResult<Circle> {
        validate_circle_create(&payload)?;

        let circle = Circle {
            id: uuid::Uuid::new_v4().to_string(),
            name: payload.name.trim().to_string(),
            description: payload.description.unwrap_or_default(),
            icon_image_path: payload.icon_image_path.unwrap_or_default(),
            background_image_path: payload.background_image_path.unwrap_or_default(),
        };

        let txn = self.begin_write()?;
        Self::store_circle(&txn, &circle.id, &Archivable::live(&circle))?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(id = %circle.id, name = %circle.name, "Circle created");
        Ok(circle)
    }

    fn update_circle(&self, id: &str, payload: CircleUpdate) -> AppResult<Circle> {
        validate_circle_id(id)?;
        validate_circle_update(&payload)?;

        let txn = self.begin_write()?;
        let mut circle =
            Self::load_circle(&txn, id)?.ok_or_else(|| AppError::circle_not_found(id))?;

        if let Some(name) = payload.name {
            circle.name = name.trim().to_string();
        }
        if let Some(description) = payload.description {
            circle.description = description;
        }
        if let Some(icon_image_path) = payload.icon_image_path {
            circle.icon_image_path = icon_image_path;
        }
        if let Some(background_image_path) = payload.background_image_path {
            circle.background_image_path = background_image_path;
        }

        Self::store_circle(&txn, id, &Archivable::live(&circle))?;
        txn.commit().map_err(StorageError::from)?;

        tracing::debug!(id = %id, name = %circle.name, "Circle updated");
        Ok(circle)
    }

    fn archive_circle(&self, id: &str) -> AppResult<()> {
        validate_circle_id(id)?;

        let txn = self.begin_write()?;
        let circle =
            Self::load_circle(&txn, id)?.ok_or_else(|| AppError::circle_not_found(id))?;
        Self::store_circle(&txn, id, &Archivable::archived(&circle))?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(id = %id, "Circle archived");
        Ok(())
    }

    fn join_event(&self, event_name: &str, circle_id: &str) -> AppResult<EventEntry> {
        validate_event_name(event_name)?;
        validate_circle_id(circle_id)?;

        let txn = self.begin_write()?;
        let circle = Self::load_circle(&txn, circle_id)?
            .ok_or_else(|| AppError::circle_not_found(circle_id))?;
        let record = EventRecord {
            event_name: event_name.to_string(),
            circle_id: circle_id.to_string(),
        };
        Self::put_in(&txn, EVENT_ENTRIES_TABLE, event_name, circle_id, &record)?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(event = %event_name, circle_id = %circle_id, "Circle joined event");
        Ok(EventEntry {
            event_name: record.event_name,
            circle_id: record.circle_id,
            circle_name: circle.name,
        })
    }

    fn event_circles(
        &self,
        event_name: &str,
        circle_name: Option<&str>,
    ) -> AppResult<Vec<EventEntry>> {
        validate_event_name(event_name)?;

        let records: Vec<EventRecord> = self.scan_prefix(EVENT_ENTRIES_TABLE, event_name)?;
        let circles: std::collections::HashMap<String, Circle> = self
            .circle_rows()?
            .into_iter()
            .filter_map(Archivable::into_live)
            .map(|c| (c.id.clone(), c))
            .collect();

        let mut entries: Vec<EventEntry> = records
            .into_iter()
            .filter_map(|record| {
                // Archived circles drop out of their events
                let circle = circles.get(&record.circle_id)?;
                Some(EventEntry {
                    event_name: record.event_name,
                    circle_id: record.circle_id,
                    circle_name: circle.name.clone(),
                })
            })
            .filter(|entry| circle_name.is_none_or(|name| entry.circle_name == name))
            .collect();
        entries.sort_by(|a, b| {
            a.circle_name
                .cmp(&b.circle_name)
                .then_with(|| a.circle_id.cmp(&b.circle_id))
        });
        Ok(entries)
    }
}
