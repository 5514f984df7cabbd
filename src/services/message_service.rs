use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::conversation::{Conversation, Message};
use crate::models::user::User;

/// Everything the conversation-list projection needs, loaded up front.
#[derive(Debug, Clone)]
pub struct ConversationListItem {
    pub conversation: Conversation,
    pub employer: User,
    pub seeker: User,
    pub last_message: Option<Message>,
    pub unread_count: i64,
}

/// A conversation opened by one participant, with messages and both user
/// rows.
#[derive(Debug, Clone)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    pub employer: User,
    pub seeker: User,
    pub messages: Vec<Message>,
}

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Sends to a user, resolving or creating the employer/seeker
    /// conversation on first contact.
    pub async fn send(
        &self,
        caller: &User,
        recipient_id: Uuid,
        content: &str,
    ) -> Result<(Message, Conversation)> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::BadRequest(
                "Message content cannot be empty".to_string(),
            ));
        }
        let recipient = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND is_active = TRUE",
        )
        .bind(recipient_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Recipient not found".to_string()))?;

        let (employer_id, seeker_id) = pair_for(caller, &recipient)?;

        // Upsert keeps concurrent first messages from racing to two rows;
        // the no-op update lets RETURNING always yield the row.
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (employer_id, seeker_id)
            VALUES ($1, $2)
            ON CONFLICT (employer_id, seeker_id)
            DO UPDATE SET updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(employer_id)
        .bind(seeker_id)
        .fetch_one(&self.pool)
        .await?;

        let message = self.insert_message(conversation.id, caller.id, content).await?;
        Ok((message, conversation))
    }

    pub async fn reply(
        &self,
        caller: &User,
        conversation_id: Uuid,
        content: &str,
    ) -> Result<Message> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::BadRequest(
                "Message content cannot be empty".to_string(),
            ));
        }
        let conversation = self.get(conversation_id).await?;
        if !conversation.has_participant(caller.id) {
            return Err(Error::Forbidden(
                "You are not part of this conversation".to_string(),
            ));
        }
        self.insert_message(conversation.id, caller.id, content).await
    }

    pub async fn list(&self, caller: &User) -> Result<Vec<ConversationListItem>> {
        let conversations = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT * FROM conversations
            WHERE employer_id = $1 OR seeker_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(caller.id)
        .fetch_all(&self.pool)
        .await?;
        if conversations.is_empty() {
            return Ok(Vec::new());
        }

        let conversation_ids: Vec<Uuid> = conversations.iter().map(|c| c.id).collect();
        let mut user_ids: Vec<Uuid> = conversations
            .iter()
            .flat_map(|c| [c.employer_id, c.seeker_id])
            .collect();
        user_ids.sort();
        user_ids.dedup();

        let users: HashMap<Uuid, User> =
            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ANY($1)")
                .bind(&user_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|u| (u.id, u))
                .collect();

        let last_messages: HashMap<Uuid, Message> = sqlx::query_as::<_, Message>(
            r#"
            SELECT DISTINCT ON (conversation_id) *
            FROM messages
            WHERE conversation_id = ANY($1)
            ORDER BY conversation_id, created_at DESC
            "#,
        )
        .bind(&conversation_ids)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|m| (m.conversation_id, m))
        .collect();

        let unread: HashMap<Uuid, i64> = sqlx::query_as::<_, (Uuid, i64)>(
            r#"
            SELECT conversation_id, COUNT(*)
            FROM messages
            WHERE conversation_id = ANY($1) AND sender_id <> $2 AND is_read = FALSE
            GROUP BY conversation_id
            "#,
        )
        .bind(&conversation_ids)
        .bind(caller.id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .collect();

        let mut items = Vec::with_capacity(conversations.len());
        for conversation in conversations {
            let (Some(employer), Some(seeker)) = (
                users.get(&conversation.employer_id),
                users.get(&conversation.seeker_id),
            ) else {
                continue;
            };
            items.push(ConversationListItem {
                unread_count: unread.get(&conversation.id).copied().unwrap_or(0),
                last_message: last_messages.get(&conversation.id).cloned(),
                employer: employer.clone(),
                seeker: seeker.clone(),
                conversation,
            });
        }
        Ok(items)
    }

    pub async fn detail(&self, caller: &User, conversation_id: Uuid) -> Result<ConversationDetail> {
        let conversation = self.get(conversation_id).await?;
        if !conversation.has_participant(caller.id) {
            return Err(Error::Forbidden(
                "You are not part of this conversation".to_string(),
            ));
        }
        let employer = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(conversation.employer_id)
            .fetch_one(&self.pool)
            .await?;
        let seeker = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(conversation.seeker_id)
            .fetch_one(&self.pool)
            .await?;
        let messages = sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE conversation_id = $1 ORDER BY created_at ASC",
        )
        .bind(conversation.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ConversationDetail {
            conversation,
            employer,
            seeker,
            messages,
        })
    }

    /// The existing conversation between the caller and `other`, if any.
    pub async fn find_with_user(&self, caller: &User, other: &User) -> Result<Option<Conversation>> {
        let (employer_id, seeker_id) = pair_for(caller, other)?;
        let conversation = sqlx::query_as::<_, Conversation>(
            "SELECT * FROM conversations WHERE employer_id = $1 AND seeker_id = $2",
        )
        .bind(employer_id)
        .bind(seeker_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(conversation)
    }

    /// Marks everything the caller has received in this thread as read.
    pub async fn mark_read(&self, caller: &User, conversation_id: Uuid) -> Result<u64> {
        let conversation = self.get(conversation_id).await?;
        if !conversation.has_participant(caller.id) {
            return Err(Error::Forbidden(
                "You are not part of this conversation".to_string(),
            ));
        }
        let result = sqlx::query(
            r#"
            UPDATE messages SET is_read = TRUE
            WHERE conversation_id = $1 AND sender_id <> $2 AND is_read = FALSE
            "#,
        )
        .bind(conversation_id)
        .bind(caller.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_total(&self, caller_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*)
            FROM messages m
            JOIN conversations c ON c.id = m.conversation_id
            WHERE (c.employer_id = $1 OR c.seeker_id = $1)
              AND m.sender_id <> $1
              AND m.is_read = FALSE
            "#,
        )
        .bind(caller_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }

    async fn get(&self, id: Uuid) -> Result<Conversation> {
        sqlx::query_as::<_, Conversation>("SELECT * FROM conversations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Conversation not found".to_string()))
    }

    async fn insert_message(
        &self,
        conversation_id: Uuid,
        sender_id: Uuid,
        content: &str,
    ) -> Result<Message> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (conversation_id, sender_id, content)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(conversation_id)
        .bind(sender_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        sqlx::query("UPDATE conversations SET updated_at = NOW() WHERE id = $1")
            .bind(conversation_id)
            .execute(&self.pool)
            .await?;
        Ok(message)
    }
}

/// Orients two users into the (employer, seeker) key of a conversation.
/// Same-role pairs cannot message each other.
fn pair_for(a: &User, b: &User) -> Result<(Uuid, Uuid)> {
    if a.is_employer() && b.is_seeker() {
        Ok((a.id, b.id))
    } else if a.is_seeker() && b.is_employer() {
        Ok((b.id, a.id))
    } else {
        Err(Error::BadRequest(
            "Messaging is only available between employers and seekers".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sqlx::types::Json;

    fn user(role: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: format!("{}@example.com", role),
            username: role.to_string(),
            name: String::new(),
            role: role.to_string(),
            password_hash: String::new(),
            avatar: None,
            bio: None,
            location: None,
            phone: None,
            website: None,
            skills: Json(Vec::new()),
            experience: None,
            education: None,
            linkedin: None,
            github: None,
            portfolio: None,
            company: None,
            company_size: None,
            industry: None,
            founded: None,
            is_staff: false,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn pair_orientation_is_employer_then_seeker() {
        let employer = user("employer");
        let seeker = user("seeker");
        assert_eq!(
            pair_for(&employer, &seeker).unwrap(),
            (employer.id, seeker.id)
        );
        assert_eq!(
            pair_for(&seeker, &employer).unwrap(),
            (employer.id, seeker.id)
        );
    }

    #[test]
    fn same_role_pairs_are_rejected() {
        assert!(pair_for(&user("employer"), &user("employer")).is_err());
        assert!(pair_for(&user("seeker"), &user("seeker")).is_err());
    }
}
