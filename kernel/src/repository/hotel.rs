use crate::model::{
    hotel::{
        event::{CreateHotel, DeleteHotel, UpdateHotel},
        Hotel, HotelReservationRanking,
    },
    id::HotelId,
    list::{ListOptions, PaginatedList},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait HotelRepository: Send + Sync {
    async fn create(&self, event: CreateHotel) -> AppResult<HotelId>;
    // 有効なホテルだけをページングして返す
    async fn find_active_all(&self, options: ListOptions) -> AppResult<PaginatedList<Hotel>>;
    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<Hotel>>;
    async fn update(&self, event: UpdateHotel) -> AppResult<()>;
    // 論理削除。レコード自体は残す
    async fn delete(&self, event: DeleteHotel) -> AppResult<()>;
    // 有効な予約数の多い順にホテルを並べる
    async fn top_reserved(&self, limit: i64) -> AppResult<Vec<HotelReservationRanking>>;
}
