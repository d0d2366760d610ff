use crate::model::id::{HotelId, RoomId};
use rust_decimal::Decimal;

pub mod event;

// 部屋は物理削除しない。運用上の状態だけをこのフラグで切り替える
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "room_state", rename_all = "UPPERCASE")]
pub enum RoomState {
    Available,
    Occupied,
    Maintenance,
}

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_number: String,
    pub capacity: i32,
    pub price_per_night: Decimal,
    pub state: RoomState,
}
