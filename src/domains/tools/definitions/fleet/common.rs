//! Pieces shared by the subscriber listing tools.

use serde_json::Value;

use crate::domains::tools::{
    shaping::{lookup, lookup_str},
    table::Column,
    upstream::UpstreamRequest,
};

/// Key holding the record array in `/view/subscribers` responses.
pub const SUBSCRIBERS_KEY: &str = "users";

/// Output columns for subscriber tables. `devices` stays an array and is
/// rendered as inline JSON.
pub const SUBSCRIBER_COLUMNS: &[Column] = &[
    Column::new("id", "id"),
    Column::new("name", "fullName"),
    Column::new("email", "email"),
    Column::new("plan", "plan.name"),
    Column::new("status", "status"),
    Column::new("devices", "devices"),
];

/// The full subscriber listing.
pub fn subscribers_request() -> UpstreamRequest {
    UpstreamRequest::get(["view", "subscribers"])
}

/// Whether any of the subscriber's devices has this serial.
///
/// Subscribers without a `devices` array own no device.
pub fn owns_device(subscriber: &Value, serial: &str) -> bool {
    lookup(subscriber, "devices")
        .and_then(Value::as_array)
        .is_some_and(|devices| {
            devices
                .iter()
                .any(|device| lookup_str(device, "serial") == Some(serial))
        })
}
