pub mod need;

pub use need::{Need, NeedFilter, NeedStatus, ServiceType};
