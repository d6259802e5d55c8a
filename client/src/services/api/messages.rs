//! # Direct Message Endpoints
//!
//! Conversations are fetched and mutated over REST only; live delivery is
//! outside this client.

use std::sync::Arc;

use shared::{
    Conversation, CreateConversationRequest, Message, PaginatedResponse, PaginationParams,
    SendMessageRequest,
};

use super::client::ApiClient;
use super::segment;
use crate::core::{ApiError, Result};

#[derive(Clone)]
pub struct MessageService {
    client: Arc<ApiClient>,
}

impl MessageService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_conversations(
        &self,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Conversation>> {
        self.client.get_page("/messages/conversations", params).await
    }

    pub async fn get_conversation(&self, conversation_id: &str) -> Result<Conversation> {
        self.client
            .get(&format!("/messages/conversations/{}", segment(conversation_id)))
            .await
    }

    /// Open (or reuse) a conversation with the given users.
    pub async fn create_conversation(&self, participant_ids: Vec<String>) -> Result<Conversation> {
        if participant_ids.is_empty() {
            return Err(ApiError::Validation(
                "A conversation needs at least one participant".to_string(),
            ));
        }
        let body = CreateConversationRequest { participant_ids };
        self.client.post("/messages/conversations", &body).await
    }

    pub async fn get_messages(
        &self,
        conversation_id: &str,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Message>> {
        self.client
            .get_page(
                &format!("/messages/conversations/{}/messages", segment(conversation_id)),
                params,
            )
            .await
    }

    pub async fn send_message(&self, conversation_id: &str, message: &SendMessageRequest) -> Result<Message> {
        self.client
            .post(
                &format!("/messages/conversations/{}/messages", segment(conversation_id)),
                message,
            )
            .await
    }

    pub async fn mark_read(&self, conversation_id: &str) -> Result<()> {
        self.client
            .put_unit(&format!("/messages/conversations/{}/read", segment(conversation_id)))
            .await
    }

    pub async fn delete_message(&self, message_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/messages/{}", segment(message_id)))
            .await
    }
}
