use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, Order, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};

use crate::entities::meeting::{self, Column as MeetingCol, Entity as MeetingEntity};
use crate::error::Result;
use crate::store::Store;
use formhub_common::types::Meeting;

/// 新建会议请求（咨询预约流程）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMeeting {
    pub client_id: String,
    pub consultant_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339
    pub start_time: String,
    pub end_time: String,
}

fn model_to_meeting(m: meeting::Model) -> Meeting {
    Meeting {
        id: m.id,
        client_id: m.client_id,
        consultant_id: m.consultant_id,
        title: m.title,
        description: m.description,
        start_time: m.start_time,
        end_time: m.end_time,
        status: m.status,
        meeting_type: m.meeting_type,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

impl Store {
    /// Inserts a consultation booking in `scheduled` status.
    pub async fn insert_meeting(&self, new: &NewMeeting) -> Result<Meeting> {
        let id = formhub_common::id::next_id();
        let now = Utc::now().fixed_offset();
        let am = meeting::ActiveModel {
            id: Set(id),
            client_id: Set(new.client_id.clone()),
            consultant_id: Set(new.consultant_id.clone()),
            title: Set(new.title.clone()),
            description: Set(new.description.clone()),
            start_time: Set(new.start_time.clone()),
            end_time: Set(new.end_time.clone()),
            status: Set("scheduled".to_string()),
            meeting_type: Set("consultation".to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let model = am.insert(self.db()).await?;
        Ok(model_to_meeting(model))
    }

    pub async fn get_meeting_by_id(&self, id: &str) -> Result<Option<Meeting>> {
        let model = MeetingEntity::find_by_id(id).one(self.db()).await?;
        Ok(model.map(model_to_meeting))
    }

    /// Scheduled meetings whose `start_time` is on or before `cutoff`,
    /// soonest first — the rows a periodic reminder sweep re-evaluates.
    /// The cutoff comparison is textual; writers store UTC-offset RFC 3339.
    pub async fn list_meetings_starting_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Meeting>> {
        let rows = MeetingEntity::find()
            .filter(MeetingCol::Status.eq("scheduled"))
            .filter(MeetingCol::StartTime.lte(cutoff.to_rfc3339()))
            .order_by(MeetingCol::StartTime, Order::Asc)
            .all(self.db())
            .await?;
        Ok(rows.into_iter().map(model_to_meeting).collect())
    }
}
