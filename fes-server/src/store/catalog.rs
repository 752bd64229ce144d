//! [`CatalogStore`] on redb
//!
//! Entries are stored as [`Archivable`]: the item plus an `archived`
//! flag. Archived entries leave the listings but stay in the catalog maps,
//! so orders placed before the archive still resolve in the sales report.

use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, Topping, ToppingCreate, ToppingUpdate,
};
use shared::report::{MenuCatalog, ToppingCatalog};

use super::CatalogStore;
use super::storage::{
    Archivable, FesStorage, MENU_ITEMS_TABLE, ScopedTable, StorageError, StorageResult,
    TOPPINGS_TABLE,
};
use crate::utils::validation::{
    validate_circle_id, validate_menu_item_create, validate_menu_item_update,
    validate_topping_create, validate_topping_update,
};
use crate::utils::{AppError, AppResult};

impl FesStorage {
    /// Every entry of a circle, archived ones included
    fn catalog_entries<T: DeserializeOwned>(
        &self,
        table: ScopedTable,
        circle_id: &str,
    ) -> StorageResult<Vec<T>> {
        let records: Vec<Archivable<T>> = self.scan_prefix(table, circle_id)?;
        Ok(records.into_iter().map(|r| r.item).collect())
    }

    fn live_entries<T: DeserializeOwned>(
        &self,
        table: ScopedTable,
        circle_id: &str,
    ) -> StorageResult<Vec<T>> {
        let records: Vec<Archivable<T>> = self.scan_prefix(table, circle_id)?;
        Ok(records.into_iter().filter_map(Archivable::into_live).collect())
    }

    /// A live entry inside a write transaction; archived counts as missing
    fn load_live_entry<T: DeserializeOwned>(
        txn: &redb::WriteTransaction,
        table: ScopedTable,
        circle_id: &str,
        id: &str,
    ) -> StorageResult<Option<T>> {
        let record = Self::get_in::<Archivable<T>>(txn, table, circle_id, id)?;
        Ok(record.and_then(Archivable::into_live))
    }

    /// Flag a live entry as archived; `false` when there was none
    fn archive_entry<T: Serialize + DeserializeOwned>(
        &self,
        table: ScopedTable,
        circle_id: &str,
        id: &str,
    ) -> StorageResult<bool> {
        let txn = self.begin_write()?;
        let Some(item) = Self::load_live_entry::<T>(&txn, table, circle_id, id)? else {
            return Ok(false);
        };
        Self::put_in(&txn, table, circle_id, id, &Archivable::archived(item))?;
        txn.commit()?;
        Ok(true)
    }
}

impl CatalogStore for FesStorage {
    fn list_menu_items(&self, circle_id: &str) -> AppResult<Vec<MenuItem>> {
        validate_circle_id(circle_id)?;
        let mut items: Vec<MenuItem> = self.live_entries(MENU_ITEMS_TABLE, circle_id)?;
        items.sort_by(|a, b| a.menu_name.cmp(&b.menu_name).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    fn create_menu_item(&self, circle_id: &str, payload: MenuItemCreate) -> AppResult<MenuItem> {
        validate_circle_id(circle_id)?;
        validate_menu_item_create(&payload)?;

        let item = MenuItem {
            id: uuid::Uuid::new_v4().to_string(),
            circle_id: circle_id.to_string(),
            menu_name: payload.menu_name.trim().to_string(),
            price: payload.price,
            image_path: payload.image_path.unwrap_or_default(),
            description: payload.description.unwrap_or_default(),
            toppings: payload.toppings.unwrap_or_default(),
            additional_info: payload.additional_info.unwrap_or_default(),
            sold_out: payload.sold_out.unwrap_or(false),
        };

        let txn = self.begin_write()?;
        Self::put_in(&txn, MENU_ITEMS_TABLE, circle_id, &item.id, &Archivable::live(&item))?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(circle_id = %circle_id, id = %item.id, name = %item.menu_name, "Menu item created");
        Ok(item)
    }

    fn update_menu_item(
        &self,
        circle_id: &str,
        id: &str,
        payload: MenuItemUpdate,
    ) -> AppResult<MenuItem> {
        validate_circle_id(circle_id)?;
        validate_menu_item_update(&payload)?;

        let txn = self.begin_write()?;
        let mut item: MenuItem = Self::load_live_entry(&txn, MENU_ITEMS_TABLE, circle_id, id)?
            .ok_or_else(|| AppError::menu_item_not_found(id))?;

        if let Some(name) = payload.menu_name {
            item.menu_name = name.trim().to_string();
        }
        if let Some(price) = payload.price {
            item.price = price;
        }
        if let Some(image_path) = payload.image_path {
            item.image_path = image_path;
        }
        if let Some(description) = payload.description {
            item.description = description;
        }
        if let Some(toppings) = payload.toppings {
            item.toppings = toppings;
        }
        if let Some(additional_info) = payload.additional_info {
            item.additional_info = additional_info;
        }
        if let Some(sold_out) = payload.sold_out {
            item.sold_out = sold_out;
        }

        Self::put_in(&txn, MENU_ITEMS_TABLE, circle_id, id, &Archivable::live(&item))?;
        txn.commit().map_err(StorageError::from)?;

        tracing::debug!(circle_id = %circle_id, id = %id, sold_out = item.sold_out, "Menu item updated");
        Ok(item)
    }

    fn archive_menu_item(&self, circle_id: &str, id: &str) -> AppResult<()> {
        validate_circle_id(circle_id)?;
        if !self.archive_entry::<MenuItem>(MENU_ITEMS_TABLE, circle_id, id)? {
            return Err(AppError::menu_item_not_found(id));
        }
        tracing::info!(circle_id = %circle_id, id = %id, "Menu item archived");
        Ok(())
    }

    fn list_toppings(&self, circle_id: &str) -> AppResult<Vec<Topping>> {
        validate_circle_id(circle_id)?;
        let mut toppings: Vec<Topping> = self.live_entries(TOPPINGS_TABLE, circle_id)?;
        toppings.sort_by(|a, b| {
            a.topping_name
                .cmp(&b.topping_name)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(toppings)
    }

    fn create_topping(&self, circle_id: &str, payload: ToppingCreate) -> AppResult<Topping> {
        validate_circle_id(circle_id)?;
        validate_topping_create(&payload)?;

        let topping = Topping {
            id: uuid::Uuid::new_v4().to_string(),
            circle_id: circle_id.to_string(),
            topping_name: payload.topping_name.trim().to_string(),
            price: payload.price,
            description: payload.description.unwrap_or_default(),
            sold_out: payload.sold_out.unwrap_or(false),
        };

        let txn = self.begin_write()?;
        Self::put_in(&txn, TOPPINGS_TABLE, circle_id, &topping.id, &Archivable::live(&topping))?;
        txn.commit().map_err(StorageError::from)?;

        tracing::info!(circle_id = %circle_id, id = %topping.id, name = %topping.topping_name, "Topping created");
        Ok(topping)
    }

    fn update_topping(
        &self,
        circle_id: &str,
        id: &str,
        payload: ToppingUpdate,
    ) -> AppResult<Topping> {
        validate_circle_id(circle_id)?;
        validate_topping_update(&payload)?;

        let txn = self.begin_write()?;
        let mut topping: Topping = Self::load_live_entry(&txn, TOPPINGS_TABLE, circle_id, id)?
            .ok_or_else(|| AppError::topping_not_found(id))?;

        if let Some(name) = payload.topping_name {
            topping.topping_name = name.trim().to_string();
        }
        if let Some(price) = payload.price {
            topping.price = price;
        }
        if let Some(description) = payload.description {
            topping.description = description;
        }
        if let Some(sold_out) = payload.sold_out {
            topping.sold_out = sold_out;
        }

        Self::put_in(&txn, TOPPINGS_TABLE, circle_id, id, &Archivable::live(&topping))?;
        txn.commit().map_err(StorageError::from)?;

        tracing::debug!(circle_id = %circle_id, id = %id, "Topping updated");
        Ok(topping)
    }

    fn archive_topping(&self, circle_id: &str, id: &str) -> AppResult<()> {
        validate_circle_id(circle_id)?;
        if !self.archive_entry::<Topping>(TOPPINGS_TABLE, circle_id, id)? {
            return Err(AppError::topping_not_found(id));
        }
        tracing::info!(circle_id = %circle_id, id = %id, "Topping archived");
        Ok(())
    }

    fn menu_catalog(&self, circle_id: &str) -> AppResult<MenuCatalog> {
        validate_circle_id(circle_id)?;
        let items: Vec<MenuItem> = self.catalog_entries(MENU_ITEMS_TABLE, circle_id)?;
        Ok(shared::report::menu_catalog(items))
    }

    fn topping_catalog(&self, circle_id: &str) -> AppResult<ToppingCatalog> {
        validate_circle_id(circle_id)?;
        let toppings: Vec<Topping> = self.catalog_entries(TOPPINGS_TABLE, circle_id)?;
        Ok(shared::report::topping_catalog(toppings))
    }
}
