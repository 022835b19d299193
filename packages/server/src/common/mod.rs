pub mod acting_user;
pub mod entity_ids;
pub mod error;
pub mod id;
pub mod pagination;

pub use acting_user::{ActingUser, Role};
pub use entity_ids::{MatchId, NeedId, RegionId, ResponseId, UserId};
pub use error::AppError;
pub use id::Id;
pub use pagination::{Page, PageParams};
