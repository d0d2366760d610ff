use crate::model::id::HotelId;

pub mod event;

#[derive(Debug)]
pub struct Hotel {
    pub hotel_id: HotelId,
    pub name: String,
    pub address: String,
    pub category: i32,
    pub is_active: bool,
}

// 予約数ランキングの 1 行分
#[derive(Debug, PartialEq, Eq)]
pub struct HotelReservationRanking {
    pub hotel_id: HotelId,
    pub name: String,
    pub reservation_count: i64,
}
