//! Subscriber service tools.
//!
//! The service authenticates with a `token` header and exposes three
//! surfaces:
//! - `/api/v2/...`: filtered API queries (`subscription`)
//! - `/view/...`: full listings (`subscribers_table`, `subscriber_by_device`)
//! - `/admin/...`: single records by id (`device`)

pub mod common;
pub mod device;
pub mod subscriber_by_device;
pub mod subscribers_table;
pub mod subscription;

pub use device::{GetDeviceParams, GetDeviceTool};
pub use subscriber_by_device::{
    FindSubscriberByDeviceSerialParams, FindSubscriberByDeviceSerialTool,
};
pub use subscribers_table::ListSubscribersTableTool;
pub use subscription::{FindSubscriptionByEmailParams, FindSubscriptionByEmailTool};
