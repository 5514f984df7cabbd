pub mod application_service;
pub mod auth_service;
pub mod job_service;
pub mod message_service;
pub mod saved_candidate_service;
pub mod saved_job_service;
pub mod user_service;
