pub mod activities;
pub mod models;

pub use models::{Need, NeedFilter, NeedStatus, ServiceType};
