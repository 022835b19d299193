mod cancel_need;
mod create_need;
mod queries;
mod update_need;

pub use cancel_need::{cancel_need, force_cancel_need};
pub use create_need::{create_need, CreateNeed};
pub use queries::{get_need, list_my_needs, list_needs};
pub use update_need::{update_need, UpdateNeed};
