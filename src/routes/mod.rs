pub mod applications;
pub mod auth;
pub mod conversations;
pub mod health;
pub mod jobs;
pub mod profile;
pub mod saved_candidates;
pub mod saved_jobs;
pub mod users;

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};

use crate::middleware::auth::require_auth;
use crate::AppState;

/// The full REST surface. Public endpoints are listings and lookups; every
/// mutation and anything caller-scoped sits behind the bearer-token layer.
pub fn api_router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/users/seekers", get(users::list_seekers))
        .route("/api/users/employers", get(users::list_employers))
        .route("/api/users/:id", get(users::get_user))
        .route("/api/jobs", get(jobs::list_jobs))
        .route("/api/jobs/recent", get(jobs::recent_jobs))
        .route("/api/jobs/by_employer", get(jobs::by_employer))
        .route("/api/jobs/:id", get(jobs::get_job));

    let protected_api = Router::new()
        .route("/api/users", get(users::list_users))
        .route(
            "/api/users/me",
            get(users::get_me).put(users::update_me).patch(users::update_me),
        )
        .route(
            "/api/users/:id",
            patch(users::update_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/api/profile/me",
            get(profile::get_profile)
                .put(profile::update_profile)
                .patch(profile::update_profile),
        )
        .route("/api/profile/skills", patch(profile::update_skills))
        .route("/api/profile/company", patch(profile::update_company))
        .route("/api/profile/avatar", post(profile::upload_avatar))
        .route("/api/jobs", post(jobs::create_job))
        .route("/api/jobs/my_jobs", get(jobs::my_jobs))
        .route(
            "/api/jobs/:id",
            patch(jobs::update_job).put(jobs::update_job).delete(jobs::delete_job),
        )
        .route(
            "/api/applications",
            get(applications::list_applications).post(applications::apply),
        )
        .route(
            "/api/applications/my-applications",
            get(applications::my_applications),
        )
        .route("/api/applications/for-job/:job_id", get(applications::for_job))
        .route("/api/applications/check/:job_id", get(applications::check_applied))
        .route(
            "/api/applications/:id",
            get(applications::get_application).delete(applications::delete_application),
        )
        .route("/api/applications/:id/status", patch(applications::update_status))
        .route(
            "/api/saved-candidates",
            get(saved_candidates::list_saved).post(saved_candidates::save_candidate),
        )
        .route("/api/saved-candidates/:id", delete(saved_candidates::remove_saved))
        .route(
            "/api/saved-candidates/by-candidate/:candidate_id",
            delete(saved_candidates::remove_by_candidate),
        )
        .route(
            "/api/saved-candidates/check/:candidate_id",
            get(saved_candidates::check_saved),
        )
        .route(
            "/api/saved-candidates/notes/:candidate_id",
            patch(saved_candidates::update_notes),
        )
        .route(
            "/api/saved-jobs",
            get(saved_jobs::list_saved).post(saved_jobs::save_job),
        )
        .route("/api/saved-jobs/:job_id", delete(saved_jobs::unsave_job))
        .route("/api/saved-jobs/check/:job_id", get(saved_jobs::check_saved))
        .route("/api/conversations", get(conversations::list_conversations))
        .route("/api/conversations/unread-count", get(conversations::unread_count))
        .route(
            "/api/conversations/with-user/:user_id",
            get(conversations::with_user),
        )
        .route("/api/conversations/send", post(conversations::send_message))
        .route("/api/conversations/:id", get(conversations::get_conversation))
        .route("/api/conversations/:id/reply", post(conversations::reply))
        .route("/api/conversations/:id/mark-read", post(conversations::mark_read))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    public_api.merge(protected_api).with_state(state)
}
