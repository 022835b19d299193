pub mod health;
pub mod matching;
pub mod needs;
pub mod responses;
pub mod stats;
