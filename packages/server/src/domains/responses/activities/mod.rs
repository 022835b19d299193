mod create_response;
mod queries;
mod update_response;
mod withdraw_response;

pub use create_response::{create_response, CreateResponse};
pub use queries::{get_response, list_my_responses, list_responses_for_need};
pub use update_response::{update_response, UpdateResponse};
pub use withdraw_response::withdraw_response;
