use crate::model::{
    id::{HotelId, RoomId},
    room::RoomState,
};
use derive_new::new;
use rust_decimal::Decimal;

#[derive(Debug, new)]
pub struct CreateRoom {
    pub hotel_id: HotelId,
    pub room_number: String,
    pub capacity: i32,
    pub price_per_night: Decimal,
    pub state: RoomState,
}

#[derive(Debug, new)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub room_number: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_night: Option<Decimal>,
    pub state: Option<RoomState>,
}
