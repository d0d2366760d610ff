use kernel::model::{
    id::{HotelId, RoomId},
    room::{Room, RoomState},
};
use rust_decimal::Decimal;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_number: String,
    pub capacity: i32,
    pub price_per_night: Decimal,
    pub state: RoomState,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            hotel_id,
            room_number,
            capacity,
            price_per_night,
            state,
        } = value;
        Room {
            room_id,
            hotel_id,
            room_number,
            capacity,
            price_per_night,
            state,
        }
    }
}
