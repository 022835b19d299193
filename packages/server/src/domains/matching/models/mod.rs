pub mod accepted_match;

pub use accepted_match::AcceptedMatch;
