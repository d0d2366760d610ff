use crate::database::{
    model::hotel::{HotelRankingRow, HotelRow},
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    hotel::{
        event::{CreateHotel, DeleteHotel, UpdateHotel},
        Hotel, HotelReservationRanking,
    },
    id::HotelId,
    list::{ListOptions, PaginatedList},
};
use kernel::repository::hotel::HotelRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct HotelRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HotelRepository for HotelRepositoryImpl {
    async fn create(&self, event: CreateHotel) -> AppResult<HotelId> {
        let hotel_id = HotelId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO hotels (hotel_id, name, address, category)
                VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(hotel_id)
        .bind(&event.name)
        .bind(&event.address)
        .bind(event.category)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No hotel record has been created".into(),
            ));
        }

        Ok(hotel_id)
    }

    async fn find_active_all(&self, options: ListOptions) -> AppResult<PaginatedList<Hotel>> {
        let ListOptions { limit, offset } = options;

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM hotels WHERE is_active"#,
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let rows = sqlx::query_as::<_, HotelRow>(
            r#"
                SELECT hotel_id, name, address, category, is_active
                FROM hotels
                WHERE is_active
                ORDER BY created_at DESC
                LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items: rows.into_iter().map(Hotel::from).collect(),
        })
    }

    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<Hotel>> {
        let row = sqlx::query_as::<_, HotelRow>(
            r#"
                SELECT hotel_id, name, address, category, is_active
                FROM hotels
                WHERE hotel_id = $1 AND is_active
            "#,
        )
        .bind(hotel_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Hotel::from))
    }

    async fn update(&self, event: UpdateHotel) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE hotels
                SET name = COALESCE($2, name),
                    address = COALESCE($3, address),
                    category = COALESCE($4, category)
                WHERE hotel_id = $1 AND is_active
            "#,
        )
        .bind(event.hotel_id)
        .bind(event.name)
        .bind(event.address)
        .bind(event.category)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "hotel ({}) not found",
                event.hotel_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteHotel) -> AppResult<()> {
        let res = sqlx::query(
            r#"UPDATE hotels SET is_active = FALSE WHERE hotel_id = $1"#,
        )
        .bind(event.hotel_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "hotel ({}) not found",
                event.hotel_id
            )));
        }

        Ok(())
    }

    // 有効な予約を部屋経由でホテルに紐付けて数える。
    // 同数のときはホテル名の昇順で順序を固定する
    async fn top_reserved(&self, limit: i64) -> AppResult<Vec<HotelReservationRanking>> {
        let rows = sqlx::query_as::<_, HotelRankingRow>(
            r#"
                SELECT h.hotel_id, h.name, COUNT(*) AS reservation_count
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                INNER JOIN hotels AS h ON rm.hotel_id = h.hotel_id
                WHERE r.is_active AND h.is_active
                GROUP BY h.hotel_id, h.name
                ORDER BY reservation_count DESC, h.name ASC
                LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(HotelReservationRanking::from).collect())
    }
}
