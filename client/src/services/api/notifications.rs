//! # Notification Endpoints

use std::sync::Arc;

use shared::{Notification, PaginatedResponse, PaginationParams, UnreadCount};

use super::client::ApiClient;
use super::segment;
use crate::core::Result;

#[derive(Clone)]
pub struct NotificationService {
    client: Arc<ApiClient>,
}

impl NotificationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn get_notifications(
        &self,
        params: Option<&PaginationParams>,
    ) -> Result<PaginatedResponse<Notification>> {
        self.client.get_page("/notifications", params).await
    }

    /// Badge count. Any failure reads as zero.
    pub async fn get_unread_count(&self) -> u64 {
        match self.client.get::<UnreadCount>("/notifications/unread-count").await {
            Ok(unread) => unread.count,
            Err(e) => {
                tracing::debug!(error = %e, "Unread count unavailable, showing 0");
                0
            }
        }
    }

    pub async fn mark_read(&self, notification_id: &str) -> Result<()> {
        self.client
            .put_unit(&format!("/notifications/{}/read", segment(notification_id)))
            .await
    }

    pub async fn mark_all_read(&self) -> Result<()> {
        self.client.put_unit("/notifications/read-all").await
    }

    pub async fn delete_notification(&self, notification_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/notifications/{}", segment(notification_id)))
            .await
    }
}
