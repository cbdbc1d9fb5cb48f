//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file, grouped by upstream provider.

pub mod customers;
pub mod fleet;

pub use customers::{
    FindCustomerByFirstNameParams, FindCustomerByFirstNameTool, ListUsersTableTool, ListUsersTool,
};
pub use fleet::{
    FindSubscriberByDeviceSerialParams, FindSubscriberByDeviceSerialTool,
    FindSubscriptionByEmailParams, FindSubscriptionByEmailTool, GetDeviceParams, GetDeviceTool,
    ListSubscribersTableTool,
};
