use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{HotelId, RoomId},
    list::PaginatedList,
    room::{
        event::{CreateRoom, UpdateRoom},
        Room, RoomState,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RoomStateName {
    Available,
    Occupied,
    Maintenance,
}

impl From<RoomState> for RoomStateName {
    fn from(value: RoomState) -> Self {
        match value {
            RoomState::Available => Self::Available,
            RoomState::Occupied => Self::Occupied,
            RoomState::Maintenance => Self::Maintenance,
        }
    }
}

impl From<RoomStateName> for RoomState {
    fn from(value: RoomStateName) -> Self {
        match value {
            RoomStateName::Available => Self::Available,
            RoomStateName::Occupied => Self::Occupied,
            RoomStateName::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(skip)]
    pub hotel_id: HotelId,
    #[garde(length(min = 1))]
    pub room_number: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    pub price_per_night: Decimal,
    #[garde(skip)]
    #[serde(default = "default_state")]
    pub state: RoomStateName,
}

const fn default_state() -> RoomStateName {
    RoomStateName::Available
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            hotel_id,
            room_number,
            capacity,
            price_per_night,
            state,
        } = value;
        CreateRoom {
            hotel_id,
            room_number,
            capacity,
            price_per_night,
            state: state.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(inner(length(min = 1)))]
    pub room_number: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub price_per_night: Option<Decimal>,
    #[garde(skip)]
    pub state: Option<RoomStateName>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithId(RoomId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithId> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithId) -> Self {
        let UpdateRoomRequestWithId(
            room_id,
            UpdateRoomRequest {
                room_number,
                capacity,
                price_per_night,
                state,
            },
        ) = value;
        UpdateRoom {
            room_id,
            room_number,
            capacity,
            price_per_night,
            state: state.map(Into::into),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoomListQuery {
    #[garde(range(min = 1))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
    #[garde(skip)]
    pub hotel_id: Option<HotelId>,
}

const fn default_limit() -> i64 {
    10
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_number: String,
    pub capacity: i32,
    pub price_per_night: Decimal,
    pub state: RoomStateName,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            room_id,
            hotel_id,
            room_number,
            capacity,
            price_per_night,
            state,
        } = value;
        Self {
            room_id,
            hotel_id,
            room_number,
            capacity,
            price_per_night,
            state: state.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreatedResponse {
    pub success: bool,
    pub msg: String,
    pub room: RoomResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub success: bool,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub rooms: Vec<RoomResponse>,
}

impl From<PaginatedList<Room>> for RoomsResponse {
    fn from(value: PaginatedList<Room>) -> Self {
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
            rooms: items.into_iter().map(RoomResponse::from).collect(),
        }
    }
}
