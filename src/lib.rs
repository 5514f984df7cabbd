pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, auth_service::AuthService, job_service::JobService,
    message_service::MessageService, saved_candidate_service::SavedCandidateService,
    saved_job_service::SavedJobService, user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub auth_service: AuthService,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub saved_candidate_service: SavedCandidateService,
    pub saved_job_service: SavedJobService,
    pub message_service: MessageService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let auth_service = AuthService::new(pool.clone());
        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let saved_candidate_service = SavedCandidateService::new(pool.clone());
        let saved_job_service = SavedJobService::new(pool.clone());
        let message_service = MessageService::new(pool.clone());

        Self {
            pool,
            auth_service,
            user_service,
            job_service,
            application_service,
            saved_candidate_service,
            saved_job_service,
            message_service,
        }
    }
}
