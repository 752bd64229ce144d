//! Circle and event directory models

use serde::{Deserialize, Serialize};

/// A club running a stall; every order and catalog entry belongs to one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon_image_path: String,
    #[serde(default)]
    pub background_image_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleCreate {
    pub name: String,
    pub description: Option<String>,
    pub icon_image_path: Option<String>,
    pub background_image_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon_image_path: Option<String>,
    pub background_image_path: Option<String>,
}

/// One circle taking part in an event
///
/// Looking up `(eventName, circleName)` is how the register finds the
/// `circleId` every other endpoint is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEntry {
    pub event_name: String,
    pub circle_id: String,
    pub circle_name: String,
}

/// Join payload for `POST /api/events/{event_name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventJoin {
    pub circle_id: String,
}
