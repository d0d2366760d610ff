use crate::database::{model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{HotelId, RoomId},
    list::{ListOptions, PaginatedList},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn create(&self, event: CreateRoom) -> AppResult<RoomId> {
        // 所属ホテルの存在を確認してから登録する
        let hotel_exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM hotels WHERE hotel_id = $1 AND is_active)"#,
        )
        .bind(event.hotel_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if !hotel_exists {
            return Err(AppError::EntityNotFound(format!(
                "hotel ({}) not found",
                event.hotel_id
            )));
        }

        let room_id = RoomId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO rooms (room_id, hotel_id, room_number, capacity, price_per_night, state)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(room_id)
        .bind(event.hotel_id)
        .bind(&event.room_number)
        .bind(event.capacity)
        .bind(event.price_per_night)
        .bind(event.state)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been created".into(),
            ));
        }

        Ok(room_id)
    }

    async fn find_all(
        &self,
        options: ListOptions,
        hotel_id: Option<HotelId>,
    ) -> AppResult<PaginatedList<Room>> {
        let ListOptions { limit, offset } = options;
        let hotel_filter: Option<Uuid> = hotel_id.map(Into::into);

        let total = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM rooms
                WHERE ($1::uuid IS NULL OR hotel_id = $1)
            "#,
        )
        .bind(hotel_filter)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT room_id, hotel_id, room_number, capacity, price_per_night, state
                FROM rooms
                WHERE ($1::uuid IS NULL OR hotel_id = $1)
                ORDER BY room_number ASC
                LIMIT $2 OFFSET $3
            "#,
        )
        .bind(hotel_filter)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items: rows.into_iter().map(Room::from).collect(),
        })
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT room_id, hotel_id, room_number, capacity, price_per_night, state
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET room_number = COALESCE($2, room_number),
                    capacity = COALESCE($3, capacity),
                    price_per_night = COALESCE($4, price_per_night),
                    state = COALESCE($5, state)
                WHERE room_id = $1
            "#,
        )
        .bind(event.room_id)
        .bind(event.room_number)
        .bind(event.capacity)
        .bind(event.price_per_night)
        .bind(event.state)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "room ({}) not found",
                event.room_id
            )));
        }

        Ok(())
    }
}
