use chrono::{DateTime, Utc};
use kernel::model::{
    event::{Event, EventVenue},
    id::EventId,
};
use shared::error::AppError;
use uuid::Uuid;

// room_id と hotel_id は排他。CHECK 制約で片方だけが入る
#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub room_id: Option<Uuid>,
    pub hotel_id: Option<Uuid>,
    pub venue_name: String,
    pub starts_at: DateTime<Utc>,
    pub description: String,
    pub is_active: bool,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(value: EventRow) -> Result<Self, Self::Error> {
        let EventRow {
            event_id,
            room_id,
            hotel_id,
            venue_name,
            starts_at,
            description,
            is_active,
        } = value;
        let venue = match (room_id, hotel_id) {
            (Some(room_id), None) => EventVenue::Room(room_id.into()),
            (None, Some(hotel_id)) => EventVenue::Hotel(hotel_id.into()),
            _ => {
                return Err(AppError::ConversionEntityError(format!(
                    "event ({}) must reference exactly one of room or hotel",
                    event_id
                )))
            }
        };
        Ok(Event {
            event_id,
            venue,
            venue_name,
            starts_at,
            description,
            is_active,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn row(room_id: Option<Uuid>, hotel_id: Option<Uuid>) -> EventRow {
        EventRow {
            event_id: EventId::new(),
            room_id,
            hotel_id,
            venue_name: "Grand Lobby".into(),
            starts_at: Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap(),
            description: "wine tasting".into(),
            is_active: true,
        }
    }

    #[test]
    fn a_room_event_resolves_to_the_room_variant() {
        let room_id = Uuid::new_v4();
        let event = Event::try_from(row(Some(room_id), None)).unwrap();
        assert_eq!(event.venue, EventVenue::Room(room_id.into()));
    }

    #[test]
    fn ambiguous_venue_references_are_rejected() {
        assert!(Event::try_from(row(Some(Uuid::new_v4()), Some(Uuid::new_v4()))).is_err());
        assert!(Event::try_from(row(None, None)).is_err());
    }
}
