use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::entities::notification::{self, Column as NotifCol, Entity as NotifEntity};
use crate::error::{Result, StorageError};
use crate::store::Store;
use formhub_common::types::NewNotification;

/// Default row cap for notification listings.
pub const DEFAULT_LIST_LIMIT: usize = 50;

/// 通知数据行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRow {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub related_meeting_id: Option<String>,
    pub related_project_id: Option<String>,
    pub related_order_id: Option<String>,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// 通知列表过滤条件
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub unread_only: bool,
}

/// Result of an ownership-checked mark-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkReadOutcome {
    Marked,
    /// The row exists but belongs to another user; nothing was updated.
    NotOwner,
}

fn model_to_row(m: notification::Model) -> NotificationRow {
    NotificationRow {
        id: m.id,
        user_id: m.user_id,
        kind: m.kind,
        title: m.title,
        message: m.message,
        related_meeting_id: m.related_meeting_id,
        related_project_id: m.related_project_id,
        related_order_id: m.related_order_id,
        action_url: m.action_url,
        is_read: m.is_read,
        read_at: m.read_at.map(|t| t.with_timezone(&Utc)),
        created_at: m.created_at.with_timezone(&Utc),
    }
}

impl Store {
    /// Inserts one notification row. The typed `related` reference is
    /// flattened to the three nullable `related_*` columns here, at the
    /// persistence boundary.
    pub async fn insert_notification(&self, new: &NewNotification) -> Result<NotificationRow> {
        let id = formhub_common::id::next_id();
        let now = Utc::now().fixed_offset();
        let am = notification::ActiveModel {
            id: Set(id),
            user_id: Set(new.user_id.clone()),
            kind: Set(new.kind.to_string()),
            title: Set(new.title.clone()),
            message: Set(new.message.clone()),
            related_meeting_id: Set(new.related.meeting_id().map(str::to_owned)),
            related_project_id: Set(new.related.project_id().map(str::to_owned)),
            related_order_id: Set(new.related.order_id().map(str::to_owned)),
            action_url: Set(new.action_url.clone()),
            is_read: Set(false),
            read_at: Set(None),
            created_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(model_to_row(model))
    }

    pub async fn get_notification_by_id(&self, id: &str) -> Result<Option<NotificationRow>> {
        let model = NotifEntity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(model_to_row))
    }

    /// Lists a user's notifications, newest first. `limit` defaults to
    /// [`DEFAULT_LIST_LIMIT`].
    pub async fn list_notifications(
        &self,
        user_id: &str,
        filter: &NotificationFilter,
        limit: Option<usize>,
    ) -> Result<Vec<NotificationRow>> {
        let mut q = NotifEntity::find().filter(NotifCol::UserId.eq(user_id));
        if filter.unread_only {
            q = q.filter(NotifCol::IsRead.eq(false));
        }
        let rows = q
            .order_by(NotifCol::CreatedAt, Order::Desc)
            .limit(limit.unwrap_or(DEFAULT_LIST_LIMIT) as u64)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(model_to_row).collect())
    }

    pub async fn count_unread_notifications(&self, user_id: &str) -> Result<u64> {
        Ok(NotifEntity::find()
            .filter(NotifCol::UserId.eq(user_id))
            .filter(NotifCol::IsRead.eq(false))
            .count(self.db())
            .await?)
    }

    /// Marks one notification read, verifying ownership first.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] when no row has this id.
    pub async fn mark_notification_read(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<MarkReadOutcome> {
        let model = NotifEntity::find_by_id(id).one(self.db()).await?;
        let Some(m) = model else {
            return Err(StorageError::NotFound {
                entity: "notification",
                id: id.to_string(),
            });
        };
        if m.user_id != user_id {
            return Ok(MarkReadOutcome::NotOwner);
        }
        let now = Utc::now().fixed_offset();
        let mut am: notification::ActiveModel = m.into();
        am.is_read = Set(true);
        am.read_at = Set(Some(now));
        am.update(self.db()).await?;
        Ok(MarkReadOutcome::Marked)
    }

    /// Marks all of a user's unread notifications read. Returns the number
    /// of rows updated.
    pub async fn mark_all_notifications_read(&self, user_id: &str) -> Result<u64> {
        let now = Utc::now().fixed_offset();
        let res = NotifEntity::update_many()
            .col_expr(NotifCol::IsRead, Expr::value(true))
            .col_expr(NotifCol::ReadAt, Expr::value(now))
            .filter(NotifCol::UserId.eq(user_id))
            .filter(NotifCol::IsRead.eq(false))
            .exec(self.db())
            .await?;
        Ok(res.rows_affected)
    }
}
