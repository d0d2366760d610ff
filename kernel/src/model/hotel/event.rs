use crate::model::id::HotelId;
use derive_new::new;

#[derive(Debug, new)]
pub struct CreateHotel {
    pub name: String,
    pub address: String,
    pub category: i32,
}

#[derive(Debug, new)]
pub struct UpdateHotel {
    pub hotel_id: HotelId,
    pub name: Option<String>,
    pub address: Option<String>,
    pub category: Option<i32>,
}

#[derive(Debug, new)]
pub struct DeleteHotel {
    pub hotel_id: HotelId,
}
