use crate::database::{model::event::EventRow, ConnectionPool};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    event::{window_end, CreateEvent, DeleteEvent, Event, EventVenue, UpdateEvent},
    id::{EventId, RoomId},
    list::{ListOptions, PaginatedList},
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let (room_id, hotel_id): (Option<Uuid>, Option<Uuid>) = match event.venue {
            EventVenue::Room(room_id) => {
                let exists = sqlx::query_scalar::<_, bool>(
                    r#"SELECT EXISTS (SELECT 1 FROM rooms WHERE room_id = $1)"#,
                )
                .bind(room_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
                if !exists {
                    return Err(AppError::EntityNotFound(format!(
                        "room ({}) not found",
                        room_id
                    )));
                }
                // 部屋イベントは 1 時間の窓で予約と同じ重複検査を受ける
                self.ensure_window_is_free(&mut tx, room_id, event.starts_at, None)
                    .await?;
                (Some(room_id.raw()), None)
            }
            EventVenue::Hotel(hotel_id) => {
                let exists = sqlx::query_scalar::<_, bool>(
                    r#"SELECT EXISTS (SELECT 1 FROM hotels WHERE hotel_id = $1 AND is_active)"#,
                )
                .bind(hotel_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
                if !exists {
                    return Err(AppError::EntityNotFound(format!(
                        "hotel ({}) not found",
                        hotel_id
                    )));
                }
                (None, Some(hotel_id.raw()))
            }
        };

        let event_id = EventId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO events (event_id, room_id, hotel_id, starts_at, description)
                VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(event_id)
        .bind(room_id)
        .bind(hotel_id)
        .bind(event.starts_at)
        .bind(&event.description)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(event_id)
    }

    async fn find_active_all(&self, options: ListOptions) -> AppResult<PaginatedList<Event>> {
        let ListOptions { limit, offset } = options;

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM events WHERE is_active"#,
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let rows = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    e.event_id,
                    e.room_id,
                    e.hotel_id,
                    COALESCE(h.name, rm.room_number, '') AS venue_name,
                    e.starts_at,
                    e.description,
                    e.is_active
                FROM events AS e
                LEFT JOIN hotels AS h ON e.hotel_id = h.hotel_id
                LEFT JOIN rooms AS rm ON e.room_id = rm.room_id
                WHERE e.is_active
                ORDER BY e.starts_at ASC
                LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let items = rows
            .into_iter()
            .map(Event::try_from)
            .collect::<AppResult<Vec<Event>>>()?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
                SELECT
                    e.event_id,
                    e.room_id,
                    e.hotel_id,
                    COALESCE(h.name, rm.room_number, '') AS venue_name,
                    e.starts_at,
                    e.description,
                    e.is_active
                FROM events AS e
                LEFT JOIN hotels AS h ON e.hotel_id = h.hotel_id
                LEFT JOIN rooms AS rm ON e.room_id = rm.room_id
                WHERE e.event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Event::try_from).transpose()
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let current = sqlx::query_as::<_, EventStateRow>(
            r#"SELECT room_id, is_active FROM events WHERE event_id = $1"#,
        )
        .bind(event.event_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(current) = current else {
            return Err(AppError::EntityNotFound(format!(
                "event ({}) not found",
                event.event_id
            )));
        };
        if !current.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "event ({}) has been cancelled",
                event.event_id
            )));
        }

        // 開催時刻が動く部屋イベントだけ窓の重複を取り直す
        if let (Some(starts_at), Some(room_id)) = (event.starts_at, current.room_id) {
            self.ensure_window_is_free(&mut tx, room_id.into(), starts_at, Some(event.event_id))
                .await?;
        }

        let res = sqlx::query(
            r#"
                UPDATE events
                SET starts_at = COALESCE($2, starts_at),
                    description = COALESCE($3, description)
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(event.starts_at)
        .bind(event.description)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let res = sqlx::query(r#"UPDATE events SET is_active = FALSE WHERE event_id = $1"#)
            .bind(event.event_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "event ({}) not found",
                event.event_id
            )));
        }

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct EventStateRow {
    room_id: Option<Uuid>,
    is_active: bool,
}

impl EventRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // イベント開始から 1 時間の窓が予約・他イベントと重ならないか
    async fn ensure_window_is_free(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room_id: RoomId,
        starts_at: DateTime<Utc>,
        exclude: Option<EventId>,
    ) -> AppResult<()> {
        let until = window_end(starts_at);

        let reservation_conflict = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM reservations
                    WHERE room_id = $1
                      AND is_active
                      AND starts_at < $3
                      AND ends_at > $2
                )
            "#,
        )
        .bind(room_id)
        .bind(starts_at)
        .bind(until)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if reservation_conflict {
            return Err(AppError::ResourceConflict(format!(
                "room ({}) is reserved in the requested window",
                room_id
            )));
        }

        let event_conflict = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM events
                    WHERE room_id = $1
                      AND is_active
                      AND starts_at < $3
                      AND starts_at + INTERVAL '1 hour' > $2
                      AND ($4::uuid IS NULL OR event_id <> $4)
                )
            "#,
        )
        .bind(room_id)
        .bind(starts_at)
        .bind(until)
        .bind(exclude.map(|id| id.raw()))
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if event_conflict {
            return Err(AppError::ResourceConflict(format!(
                "room ({}) already hosts an event in the requested window",
                room_id
            )));
        }

        Ok(())
    }
}
