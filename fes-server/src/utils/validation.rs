//! Input validation helpers
//!
//! Centralized text length constants and payload checks used by the store
//! before anything is written.

use chrono_tz::Tz;
use shared::models::{
    CircleCreate, CircleUpdate, MenuItemCreate, MenuItemUpdate, OrderCreate, OrderLine,
    OrderUpdate, ToppingCreate, ToppingUpdate,
};
use shared::report::parse_order_time;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Circle, menu item and topping names, cashier names
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, additional info
pub const MAX_NOTE_LEN: usize = 500;

/// Order numbers, order states, circle ids, event names
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Amount limits ───────────────────────────────────────────────────

/// Upper bound for prices and order totals (JPY)
pub const MAX_PRICE: i64 = 100_000_000;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    validate_text_len(value, field, max_len)
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_text_len(v, field, max_len),
        None => Ok(()),
    }
}

fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

pub fn validate_circle_id(circle_id: &str) -> Result<(), AppError> {
    if circle_id.trim().is_empty() {
        return Err(AppError::new(ErrorCode::CircleIdRequired));
    }
    validate_text_len(circle_id, "circleId", MAX_SHORT_TEXT_LEN)
}

// ── Circles and events ──────────────────────────────────────────────

pub fn validate_event_name(event_name: &str) -> Result<(), AppError> {
    validate_required_text(event_name, "eventName", MAX_SHORT_TEXT_LEN)
}

pub fn validate_circle_create(payload: &CircleCreate) -> Result<(), AppError> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.icon_image_path, "iconImagePath", MAX_URL_LEN)?;
    validate_optional_text(
        &payload.background_image_path,
        "backgroundImagePath",
        MAX_URL_LEN,
    )?;
    Ok(())
}

pub fn validate_circle_update(payload: &CircleUpdate) -> Result<(), AppError> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.icon_image_path, "iconImagePath", MAX_URL_LEN)?;
    validate_optional_text(
        &payload.background_image_path,
        "backgroundImagePath",
        MAX_URL_LEN,
    )?;
    Ok(())
}

// ── Orders ──────────────────────────────────────────────────────────

fn validate_order_lines(lines: &[OrderLine]) -> Result<(), AppError> {
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    for line in lines {
        validate_required_text(&line.menu_item_id, "menuItemId", MAX_SHORT_TEXT_LEN)?;
        if line.quantity == 0 {
            return Err(AppError::new(ErrorCode::OrderInvalidQuantity)
                .with_detail("menuItemId", line.menu_item_id.as_str()));
        }
    }
    Ok(())
}

fn validate_total_price(total_price: i64) -> Result<(), AppError> {
    if !(0..=MAX_PRICE).contains(&total_price) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("totalPrice must be between 0 and {MAX_PRICE}, got {total_price}"),
        )
        .with_detail("field", "totalPrice"));
    }
    Ok(())
}

fn validate_people_count(people_count: u32) -> Result<(), AppError> {
    if people_count == 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "peopleCount must be at least 1",
        ));
    }
    Ok(())
}

/// New order times must be readable by the sales report.
fn validate_order_time(time: &str) -> Result<(), AppError> {
    parse_order_time(time, Tz::UTC)
        .map(|_| ())
        .map_err(AppError::from)
}

pub fn validate_order_create(payload: &OrderCreate) -> Result<(), AppError> {
    validate_order_lines(&payload.order_items)?;
    validate_total_price(payload.total_price)?;
    validate_people_count(payload.people_count)?;
    validate_optional_text(&payload.order_id, "orderId", MAX_SHORT_TEXT_LEN)?;
    validate_text_len(&payload.cashier, "cashier", MAX_NAME_LEN)?;
    validate_optional_text(&payload.order_state, "orderState", MAX_SHORT_TEXT_LEN)?;
    if let Some(time) = &payload.time {
        validate_order_time(time)?;
    }
    Ok(())
}

pub fn validate_order_update(payload: &OrderUpdate) -> Result<(), AppError> {
    if let Some(lines) = &payload.order_items {
        validate_order_lines(lines)?;
    }
    if let Some(total_price) = payload.total_price {
        validate_total_price(total_price)?;
    }
    if let Some(people_count) = payload.people_count {
        validate_people_count(people_count)?;
    }
    if let Some(time) = &payload.time {
        validate_order_time(time)?;
    }
    if let Some(state) = &payload.order_state {
        validate_required_text(state, "orderState", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.order_id, "orderId", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.cashier, "cashier", MAX_NAME_LEN)?;
    Ok(())
}

// ── Catalog ─────────────────────────────────────────────────────────

fn validate_price(price: i64, code: ErrorCode) -> Result<(), AppError> {
    if !(0..=MAX_PRICE).contains(&price) {
        return Err(AppError::new(code).with_detail("price", price));
    }
    Ok(())
}

pub fn validate_menu_item_create(payload: &MenuItemCreate) -> Result<(), AppError> {
    validate_required_text(&payload.menu_name, "menuName", MAX_NAME_LEN)?;
    validate_price(payload.price, ErrorCode::MenuItemInvalidPrice)?;
    validate_optional_text(&payload.image_path, "imagePath", MAX_URL_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.additional_info, "additionalInfo", MAX_NOTE_LEN)?;
    Ok(())
}

pub fn validate_menu_item_update(payload: &MenuItemUpdate) -> Result<(), AppError> {
    if let Some(name) = &payload.menu_name {
        validate_required_text(name, "menuName", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, ErrorCode::MenuItemInvalidPrice)?;
    }
    validate_optional_text(&payload.image_path, "imagePath", MAX_URL_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(&payload.additional_info, "additionalInfo", MAX_NOTE_LEN)?;
    Ok(())
}

pub fn validate_topping_create(payload: &ToppingCreate) -> Result<(), AppError> {
    validate_required_text(&payload.topping_name, "toppingName", MAX_NAME_LEN)?;
    validate_price(payload.price, ErrorCode::ToppingInvalidPrice)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    Ok(())
}

pub fn validate_topping_update(payload: &ToppingUpdate) -> Result<(), AppError> {
    if let Some(name) = &payload.topping_name {
        validate_required_text(name, "toppingName", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, ErrorCode::ToppingInvalidPrice)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    Ok(())
}
