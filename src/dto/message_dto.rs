use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user_dto::absolute_media_url;
use crate::models::conversation::Message;
use crate::models::user::User;

#[derive(Debug, Clone, Deserialize)]
pub struct SendMessagePayload {
    pub recipient_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplyPayload {
    pub content: String,
}

/// Compact participant card shown in conversation lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub role: String,
    pub company: Option<String>,
    pub bio: Option<String>,
}

impl From<&User> for ParticipantResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: absolute_media_url(user.avatar.as_deref()),
            role: user.role.clone(),
            company: user.company.clone(),
            bio: user.bio.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub sender_name: String,
    pub sender_avatar: Option<String>,
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl MessageResponse {
    pub fn from_parts(message: &Message, sender: &User) -> Self {
        Self {
            id: message.id,
            sender_id: message.sender_id,
            sender_name: sender.name.clone(),
            sender_avatar: absolute_media_url(sender.avatar.as_deref()),
            content: message.content.clone(),
            is_read: message.is_read,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastMessageResponse {
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub participant: ParticipantResponse,
    pub employer_details: ParticipantResponse,
    pub seeker_details: ParticipantResponse,
    pub last_message: Option<LastMessageResponse>,
    pub unread_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `id` is null when no conversation exists yet between the two users; the
/// first message sent will create one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationDetailResponse {
    pub id: Option<Uuid>,
    pub participant: ParticipantResponse,
    pub messages: Vec<MessageResponse>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub message: MessageResponse,
    pub conversation_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCountResponse {
    pub unread_count: i64,
}
