//! Push Notification Payload
//!
//! The message body the dispatcher hands to the push gateway. Field names follow
//! the gateway's JSON format (`deepLink` inside `data`).

use serde::{Deserialize, Serialize};

/// Extra data delivered alongside a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    /// In-app destination opened when the notification is tapped
    pub deep_link: String,
}

/// A single push notification addressed to one device token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushNotification {
    /// Recipient push token
    pub to: String,
    pub title: String,
    pub body: String,
    pub data: NotificationData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
}

impl PushNotification {
    /// Build a notification with the default sound
    pub fn new(
        to: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        deep_link: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            title: title.into(),
            body: body.into(),
            data: NotificationData {
                deep_link: deep_link.into(),
            },
            sound: Some("default".to_string()),
        }
    }
}
