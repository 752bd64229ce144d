//! Persistence for orders, the per-circle catalog and the circle directory
//!
//! Handlers only see the [`OrderStore`], [`CatalogStore`] and
//! [`DirectoryStore`] traits; [`FesStorage`] implements all three on top of
//! redb.

mod catalog;
mod directory;
mod orders;
mod storage;

pub use storage::{FesStorage, StorageError, StorageResult};

use shared::models::{
    Circle, CircleCreate, CircleUpdate, EventEntry, MenuItem, MenuItemCreate, MenuItemUpdate, Order, OrderCreate, OrderUpdate, Topping,
    ToppingCreate, ToppingUpdate,
};
use shared::report::{MenuCatalog, ToppingCatalog};

use crate::utils::AppResult;

/// Order persistence
pub trait OrderStore: Send + Sync {
    /// Active orders of a circle, oldest first; unparsable times last
    fn list_orders(&self, circle_id: &str) -> AppResult<Vec<Order>>;

    fn create_order(&self, circle_id: &str, payload: OrderCreate) -> AppResult<Order>;

    /// Partial update; archived orders count as missing
    fn update_order(&self, circle_id: &str, id: &str, payload: OrderUpdate) -> AppResult<Order>;

    /// Hide an order from listings and reports
    fn archive_order(&self, circle_id: &str, id: &str) -> AppResult<()>;
}

/// Menu item and topping persistence
pub trait CatalogStore: Send + Sync {
    fn list_menu_items(&self, circle_id: &str) -> AppResult<Vec<MenuItem>>;

    fn create_menu_item(&self, circle_id: &str, payload: MenuItemCreate) -> AppResult<MenuItem>;

    fn update_menu_item(
        &self,
        circle_id: &str,
        id: &str,
        payload: MenuItemUpdate,
    ) -> AppResult<MenuItem>;

    /// Hide a menu item from listings; archived items count as missing
    fn archive_menu_item(&self, circle_id: &str, id: &str) -> AppResult<()>;

    fn list_toppings(&self, circle_id: &str) -> AppResult<Vec<Topping>>;

    fn create_topping(&self, circle_id: &str, payload: ToppingCreate) -> AppResult<Topping>;

    fn update_topping(
        &self,
        circle_id: &str,
        id: &str,
        payload: ToppingUpdate,
    ) -> AppResult<Topping>;

    fn archive_topping(&self, circle_id: &str, id: &str) -> AppResult<()>;

    /// Menu items keyed by id, archived ones included, for the sales aggregator
    fn menu_catalog(&self, circle_id: &str) -> AppResult<MenuCatalog>;

    /// Toppings keyed by id, archived ones included
    fn topping_catalog(&self, circle_id: &str) -> AppResult<ToppingCatalog>;
}

/// Circle directory and event participation
pub trait DirectoryStore: Send + Sync {
    /// Live circles, by name
    fn list_circles(&self) -> AppResult<Vec<Circle>>;

    fn get_circle(&self, id: &str) -> AppResult<Circle>;

    fn create_circle(&self, payload: CircleCreate) -> AppResult<Circle>;

    fn update_circle(&self, id: &str, payload: CircleUpdate) -> AppResult<Circle>;

    /// Hide a circle from the directory and from every event it joined
    fn archive_circle(&self, id: &str) -> AppResult<()>;

    /// Register a live circle for an event; joining again is a no-op
    fn join_event(&self, event_name: &str, circle_id: &str) -> AppResult<EventEntry>;

    /// Circles taking part in an event, optionally narrowed to an exact name
    fn event_circles(&self, event_name: &str, circle_name: Option<&str>)
    -> AppResult<Vec<EventEntry>>;
}
