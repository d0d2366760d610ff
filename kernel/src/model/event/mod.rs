use crate::model::id::{EventId, HotelId, RoomId};
use chrono::{DateTime, Duration, Utc};
use derive_new::new;

// イベントは部屋単位かホテル単位のどちらかで開催される。
// 履歴上どちらの形のレコードも存在するため、タグ付きで明示する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventVenue {
    Room(RoomId),
    Hotel(HotelId),
}

#[derive(Debug)]
pub struct Event {
    pub event_id: EventId,
    pub venue: EventVenue,
    // 表示用に解決したホテル名または部屋番号
    pub venue_name: String,
    pub starts_at: DateTime<Utc>,
    pub description: String,
    pub is_active: bool,
}

// 部屋イベントが占有する固定 1 時間の窓の終端
pub fn window_end(starts_at: DateTime<Utc>) -> DateTime<Utc> {
    starts_at + Duration::hours(1)
}

#[derive(Debug, new)]
pub struct CreateEvent {
    pub venue: EventVenue,
    pub starts_at: DateTime<Utc>,
    pub description: String,
}

#[derive(Debug, new)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub starts_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, new)]
pub struct DeleteEvent {
    pub event_id: EventId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn an_event_occupies_exactly_one_hour() {
        let starts_at = Utc.with_ymd_and_hms(2025, 6, 1, 18, 30, 0).unwrap();
        assert_eq!(
            window_end(starts_at),
            Utc.with_ymd_and_hms(2025, 6, 1, 19, 30, 0).unwrap()
        );
    }
}
