pub mod application;
pub mod conversation;
pub mod job;
pub mod saved_candidate;
pub mod saved_job;
pub mod user;
