use crate::model::{
    event::{CreateEvent, DeleteEvent, Event, UpdateEvent},
    id::EventId,
    list::{ListOptions, PaginatedList},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EventRepository: Send + Sync {
    // 部屋単位のイベントは予約と同じ要領で 1 時間の窓の重複を検査する
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    async fn find_active_all(&self, options: ListOptions) -> AppResult<PaginatedList<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
}
