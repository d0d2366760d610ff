use kernel::model::{
    hotel::{Hotel, HotelReservationRanking},
    id::HotelId,
};

#[derive(sqlx::FromRow)]
pub struct HotelRow {
    pub hotel_id: HotelId,
    pub name: String,
    pub address: String,
    pub category: i32,
    pub is_active: bool,
}

impl From<HotelRow> for Hotel {
    fn from(value: HotelRow) -> Self {
        let HotelRow {
            hotel_id,
            name,
            address,
            category,
            is_active,
        } = value;
        Hotel {
            hotel_id,
            name,
            address,
            category,
            is_active,
        }
    }
}

// 予約数ランキングの集計行
#[derive(sqlx::FromRow)]
pub struct HotelRankingRow {
    pub hotel_id: HotelId,
    pub name: String,
    pub reservation_count: i64,
}

impl From<HotelRankingRow> for HotelReservationRanking {
    fn from(value: HotelRankingRow) -> Self {
        let HotelRankingRow {
            hotel_id,
            name,
            reservation_count,
        } = value;
        HotelReservationRanking {
            hotel_id,
            name,
            reservation_count,
        }
    }
}
