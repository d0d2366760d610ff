use crate::model::{
    id::{HotelId, RoomId},
    list::{ListOptions, PaginatedList},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId>;
    async fn find_all(
        &self,
        options: ListOptions,
        hotel_id: Option<HotelId>,
    ) -> AppResult<PaginatedList<Room>>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    // 部屋は削除しない。状態遷移も update で扱う
    async fn update(&self, event: UpdateRoom) -> AppResult<()>;
}
