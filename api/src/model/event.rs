use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{Event, EventVenue, UpdateEvent},
    id::{EventId, HotelId, RoomId},
    list::PaginatedList,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    // 開催場所は部屋かホテルのどちらか一方だけ指定する
    #[garde(skip)]
    pub room_id: Option<RoomId>,
    #[garde(skip)]
    pub hotel_id: Option<HotelId>,
    #[garde(skip)]
    pub starts_at: DateTime<Utc>,
    #[garde(length(min = 1))]
    pub description: String,
}

impl CreateEventRequest {
    pub fn try_venue(&self) -> AppResult<EventVenue> {
        match (self.room_id, self.hotel_id) {
            (Some(room_id), None) => Ok(EventVenue::Room(room_id)),
            (None, Some(hotel_id)) => Ok(EventVenue::Hotel(hotel_id)),
            _ => Err(AppError::UnprocessableEntity(
                "exactly one of roomId or hotelId must be provided".into(),
            )),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(skip)]
    pub starts_at: Option<DateTime<Utc>>,
    #[garde(inner(length(min = 1)))]
    pub description: Option<String>,
}

#[derive(new)]
pub struct UpdateEventRequestWithId(EventId, UpdateEventRequest);

impl From<UpdateEventRequestWithId> for UpdateEvent {
    fn from(value: UpdateEventRequestWithId) -> Self {
        let UpdateEventRequestWithId(
            event_id,
            UpdateEventRequest {
                starts_at,
                description,
            },
        ) = value;
        UpdateEvent {
            event_id,
            starts_at,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub event_id: EventId,
    pub room_id: Option<RoomId>,
    pub hotel_id: Option<HotelId>,
    pub venue_name: String,
    pub starts_at: DateTime<Utc>,
    pub description: String,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            event_id,
            venue,
            venue_name,
            starts_at,
            description,
            is_active: _,
        } = value;
        let (room_id, hotel_id) = match venue {
            EventVenue::Room(room_id) => (Some(room_id), None),
            EventVenue::Hotel(hotel_id) => (None, Some(hotel_id)),
        };
        Self {
            event_id,
            room_id,
            hotel_id,
            venue_name,
            starts_at,
            description,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreatedResponse {
    pub success: bool,
    pub msg: String,
    pub event: EventResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub success: bool,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub events: Vec<EventResponse>,
}

impl From<PaginatedList<Event>> for EventsResponse {
    fn from(value: PaginatedList<Event>) -> Self {
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
            events: items.into_iter().map(EventResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request(room_id: Option<RoomId>, hotel_id: Option<HotelId>) -> CreateEventRequest {
        CreateEventRequest {
            room_id,
            hotel_id,
            starts_at: Utc.with_ymd_and_hms(2030, 6, 1, 18, 0, 0).unwrap(),
            description: "wine tasting".into(),
        }
    }

    #[test]
    fn the_venue_must_be_exactly_one_of_room_or_hotel() {
        assert!(request(Some(RoomId::new()), None).try_venue().is_ok());
        assert!(request(None, Some(HotelId::new())).try_venue().is_ok());
        assert!(request(None, None).try_venue().is_err());
        assert!(request(Some(RoomId::new()), Some(HotelId::new()))
            .try_venue()
            .is_err());
    }
}
