use derive_new::new;
use garde::Validate;
use kernel::model::{
    hotel::{
        event::{CreateHotel, UpdateHotel},
        Hotel, HotelReservationRanking,
    },
    id::HotelId,
    list::PaginatedList,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateHotelRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(length(min = 1))]
    pub address: String,
    // 星の数で 1〜5
    #[garde(range(min = 1, max = 5))]
    pub category: i32,
}

impl From<CreateHotelRequest> for CreateHotel {
    fn from(value: CreateHotelRequest) -> Self {
        let CreateHotelRequest {
            name,
            address,
            category,
        } = value;
        CreateHotel {
            name,
            address,
            category,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHotelRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(inner(length(min = 1)))]
    pub address: Option<String>,
    #[garde(inner(range(min = 1, max = 5)))]
    pub category: Option<i32>,
}

#[derive(new)]
pub struct UpdateHotelRequestWithId(HotelId, UpdateHotelRequest);

impl From<UpdateHotelRequestWithId> for UpdateHotel {
    fn from(value: UpdateHotelRequestWithId) -> Self {
        let UpdateHotelRequestWithId(
            hotel_id,
            UpdateHotelRequest {
                name,
                address,
                category,
            },
        ) = value;
        UpdateHotel {
            hotel_id,
            name,
            address,
            category,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelResponse {
    pub hotel_id: HotelId,
    pub name: String,
    pub address: String,
    pub category: i32,
    pub is_active: bool,
}

impl From<Hotel> for HotelResponse {
    fn from(value: Hotel) -> Self {
        let Hotel {
            hotel_id,
            name,
            address,
            category,
            is_active,
        } = value;
        Self {
            hotel_id,
            name,
            address,
            category,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelCreatedResponse {
    pub success: bool,
    pub msg: String,
    pub hotel: HotelResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelsResponse {
    pub success: bool,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub hotels: Vec<HotelResponse>,
}

impl From<PaginatedList<Hotel>> for HotelsResponse {
    fn from(value: PaginatedList<Hotel>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            success: true,
            total,
            limit,
            offset,
            hotels: items.into_iter().map(HotelResponse::from).collect(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TopReservedQuery {
    #[garde(range(min = 1))]
    #[serde(default = "default_top_limit")]
    pub limit: i64,
}

const fn default_top_limit() -> i64 {
    5
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRankingResponse {
    pub hotel_id: HotelId,
    pub name: String,
    pub reservation_count: i64,
}

impl From<HotelReservationRanking> for HotelRankingResponse {
    fn from(value: HotelReservationRanking) -> Self {
        let HotelReservationRanking {
            hotel_id,
            name,
            reservation_count,
        } = value;
        Self {
            hotel_id,
            name,
            reservation_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopReservedHotelsResponse {
    pub success: bool,
    pub hotels: Vec<HotelRankingResponse>,
}
