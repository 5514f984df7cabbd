use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::message_dto::{
    ConversationDetailResponse, ConversationResponse, LastMessageResponse, MessageResponse,
    ParticipantResponse, ReplyPayload, SendMessagePayload, SendMessageResponse,
    UnreadCountResponse,
};
use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::user::User;
use crate::services::message_service::ConversationDetail;
use crate::AppState;

fn detail_response(detail: ConversationDetail, caller: &User) -> ConversationDetailResponse {
    let other = if detail.conversation.employer_id == caller.id {
        &detail.seeker
    } else {
        &detail.employer
    };
    let messages = detail
        .messages
        .iter()
        .map(|m| {
            let sender = if m.sender_id == detail.employer.id {
                &detail.employer
            } else {
                &detail.seeker
            };
            MessageResponse::from_parts(m, sender)
        })
        .collect();
    ConversationDetailResponse {
        id: Some(detail.conversation.id),
        participant: ParticipantResponse::from(other),
        messages,
        created_at: Some(detail.conversation.created_at),
        updated_at: Some(detail.conversation.updated_at),
    }
}

pub async fn list_conversations(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<Vec<ConversationResponse>>> {
    let items = state.message_service.list(&caller).await?;
    let conversations = items
        .into_iter()
        .map(|item| {
            let participant = if item.conversation.employer_id == caller.id {
                &item.seeker
            } else {
                &item.employer
            };
            ConversationResponse {
                id: item.conversation.id,
                participant: ParticipantResponse::from(participant),
                employer_details: ParticipantResponse::from(&item.employer),
                seeker_details: ParticipantResponse::from(&item.seeker),
                last_message: item.last_message.as_ref().map(|m| LastMessageResponse {
                    content: m.content.clone(),
                    created_at: m.created_at,
                    sender_id: m.sender_id,
                }),
                unread_count: item.unread_count,
                created_at: item.conversation.created_at,
                updated_at: item.conversation.updated_at,
            }
        })
        .collect();
    Ok(Json(conversations))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationDetailResponse>> {
    let detail = state.message_service.detail(&caller, id).await?;
    Ok(Json(detail_response(detail, &caller)))
}

/// Resolves the conversation with another user, or answers with a null-id
/// placeholder so clients can open a thread before the first message.
pub async fn with_user(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<ConversationDetailResponse>> {
    let other = state.user_service.get_active(user_id).await?;
    match state.message_service.find_with_user(&caller, &other).await? {
        Some(conversation) => {
            let detail = state.message_service.detail(&caller, conversation.id).await?;
            Ok(Json(detail_response(detail, &caller)))
        }
        None => Ok(Json(ConversationDetailResponse {
            id: None,
            participant: ParticipantResponse::from(&other),
            messages: Vec::new(),
            created_at: None,
            updated_at: None,
        })),
    }
}

pub async fn send_message(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Json(payload): Json<SendMessagePayload>,
) -> Result<(StatusCode, Json<SendMessageResponse>)> {
    let (message, conversation) = state
        .message_service
        .send(&caller, payload.recipient_id, &payload.content)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SendMessageResponse {
            message: MessageResponse::from_parts(&message, &caller),
            conversation_id: conversation.id,
        }),
    ))
}

pub async fn reply(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReplyPayload>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let message = state
        .message_service
        .reply(&caller, id, &payload.content)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::from_parts(&message, &caller)),
    ))
}

pub async fn mark_read(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.message_service.mark_read(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unread_count(
    State(state): State<AppState>,
    Extension(AuthUser(caller)): Extension<AuthUser>,
) -> Result<Json<UnreadCountResponse>> {
    let unread_count = state.message_service.unread_total(caller.id).await?;
    Ok(Json(UnreadCountResponse { unread_count }))
}
