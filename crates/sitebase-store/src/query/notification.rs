//! Notification repository for emitted notification records.

use std::future::Future;

use jiff::Timestamp;
use uuid::Uuid;

use crate::model::AssignmentNotification;
use crate::{MemStore, StoreError, StoreResult};

/// Repository for notification records.
///
/// Records are produced by write-path triggers; this repository only reads
/// them back and tracks read state for the delivery channel.
pub trait NotificationRepository {
    /// Lists notifications addressed to an account, newest last.
    fn list_account_notifications(
        &self,
        account_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<AssignmentNotification>>> + Send;

    /// Counts unread notifications for an account.
    fn count_unread_notifications(
        &self,
        account_id: Uuid,
    ) -> impl Future<Output = StoreResult<usize>> + Send;

    /// Marks a notification as read.
    fn mark_notification_read(
        &self,
        notification_id: Uuid,
    ) -> impl Future<Output = StoreResult<()>> + Send;
}

impl NotificationRepository for MemStore {
    async fn list_account_notifications(
        &self,
        account_id: Uuid,
    ) -> StoreResult<Vec<AssignmentNotification>> {
        let tables = self.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| n.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn count_unread_notifications(&self, account_id: Uuid) -> StoreResult<usize> {
        let tables = self.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| n.account_id == account_id && n.is_unread())
            .count())
    }

    async fn mark_notification_read(&self, notification_id: Uuid) -> StoreResult<()> {
        let mut tables = self.write().await;
        let row = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or(StoreError::NotFound("notifications"))?;
        if !row.is_read {
            row.is_read = true;
            row.read_at = Some(Timestamp::now());
        }
        Ok(())
    }
}
