use crate::database::{
    model::reservation::{MonthlyCountRow, ReservationRow, ReservationStateRow},
    model::service::ServicePricingRow,
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use derive_new::new;
use kernel::model::{
    id::{ReservationId, RoomId, ServiceId, UserId},
    list::{ListOptions, PaginatedList},
    report::{fill_monthly_slots, year_range},
    reservation::{
        event::{CancelReservation, CreateReservation, UpdateReservation},
        Reservation, ReservationPeriod, ReservationService,
    },
    room::RoomState,
};
use kernel::repository::reservation::ReservationRepository;
use shared::error::{AppError, AppResult};
use sqlx::{Postgres, Transaction};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(new)]
pub struct ReservationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    // 予約操作を行う
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId> {
        let mut tx = self.db.begin().await?;

        // 空き確認と INSERT を同じ直列化可能トランザクションに入れる。
        // 同時に同じ部屋・同じ窓を取りにきた場合は片方が失敗する
        self.set_transaction_serializable(&mut tx).await?;

        self.ensure_room_is_operational(&mut tx, event.room_id)
            .await?;
        self.ensure_user_exists(&mut tx, event.user_id).await?;
        self.ensure_services_exist(&mut tx, &event.service_ids)
            .await?;
        self.ensure_room_is_free(&mut tx, event.room_id, &event.period, None)
            .await?;

        let reservation_id = ReservationId::new();
        let service_ids: Vec<Uuid> = event.service_ids.iter().map(|id| id.raw()).collect();
        let res = sqlx::query(
            r#"
                INSERT INTO reservations
                (reservation_id, room_id, user_id, service_ids, starts_at, ends_at)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(reservation_id)
        .bind(event.room_id)
        .bind(event.user_id)
        .bind(&service_ids)
        .bind(event.period.starts_at())
        .bind(event.period.ends_at())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(reservation_id)
    }

    async fn update(&self, event: UpdateReservation) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let current = sqlx::query_as::<_, ReservationStateRow>(
            r#"
                SELECT room_id, user_id, service_ids, starts_at, ends_at, is_active
                FROM reservations
                WHERE reservation_id = $1
            "#,
        )
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(current) = current else {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({}) not found",
                event.reservation_id
            )));
        };
        if !current.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "reservation ({}) has been cancelled",
                event.reservation_id
            )));
        }

        // 差し替えられた参照だけを検査し直す
        if let Some(room_id) = event.room_id {
            self.ensure_room_is_operational(&mut tx, room_id).await?;
        }
        if let Some(user_id) = event.user_id {
            self.ensure_user_exists(&mut tx, user_id).await?;
        }
        if let Some(service_ids) = &event.service_ids {
            self.ensure_services_exist(&mut tx, service_ids).await?;
        }

        let room_id = event.room_id.unwrap_or(current.room_id);
        let user_id = event.user_id.unwrap_or(current.user_id);
        let period = match event.period {
            Some(period) => period,
            None => {
                ReservationPeriod::new(current.starts_at, current.ends_at).map_err(|_| {
                    AppError::ConversionEntityError(format!(
                        "reservation ({}) has an inverted period",
                        event.reservation_id
                    ))
                })?
            }
        };

        // 部屋か期間が変わるときだけ空き状況を取り直す。自分自身は除外
        if event.room_id.is_some() || event.period.is_some() {
            self.ensure_room_is_free(&mut tx, room_id, &period, Some(event.reservation_id))
                .await?;
        }

        let service_ids: Vec<Uuid> = event
            .service_ids
            .map(|ids| ids.iter().map(|id| id.raw()).collect())
            .unwrap_or(current.service_ids);

        let res = sqlx::query(
            r#"
                UPDATE reservations
                SET room_id = $2,
                    user_id = $3,
                    service_ids = $4,
                    starts_at = $5,
                    ends_at = $6
                WHERE reservation_id = $1
            "#,
        )
        .bind(event.reservation_id)
        .bind(room_id)
        .bind(user_id)
        .bind(&service_ids)
        .bind(period.starts_at())
        .bind(period.ends_at())
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No reservation record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn cancel(&self, event: CancelReservation) -> AppResult<()> {
        // 既にキャンセル済みでも同じ終端状態に落ちるだけなので、
        // 行が存在する限り成功として扱う
        let res = sqlx::query(
            r#"UPDATE reservations SET is_active = FALSE WHERE reservation_id = $1"#,
        )
        .bind(event.reservation_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({}) not found",
                event.reservation_id
            )));
        }

        Ok(())
    }

    async fn find_active_all(
        &self,
        options: ListOptions,
    ) -> AppResult<PaginatedList<Reservation>> {
        let ListOptions { limit, offset } = options;

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM reservations WHERE is_active"#,
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let rows = sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT
                    r.reservation_id,
                    r.starts_at,
                    r.ends_at,
                    r.is_active,
                    r.created_at,
                    r.service_ids,
                    rm.room_id,
                    rm.room_number,
                    rm.price_per_night,
                    u.user_id,
                    u.user_name,
                    u.email
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.is_active
                ORDER BY r.created_at DESC
                LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let items = self.attach_services(rows).await?;

        Ok(PaginatedList {
            total,
            limit,
            offset,
            items,
        })
    }

    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>> {
        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
                SELECT
                    r.reservation_id,
                    r.starts_at,
                    r.ends_at,
                    r.is_active,
                    r.created_at,
                    r.service_ids,
                    rm.room_id,
                    rm.room_number,
                    rm.price_per_night,
                    u.user_id,
                    u.user_name,
                    u.email
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                INNER JOIN users AS u ON r.user_id = u.user_id
                WHERE r.reservation_id = $1
            "#,
        )
        .bind(reservation_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        match row {
            None => Ok(None),
            Some(row) => {
                let mut items = self.attach_services(vec![row]).await?;
                Ok(items.pop())
            }
        }
    }

    async fn count_created_in(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM reservations
                WHERE is_active AND created_at >= $1 AND created_at < $2
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn monthly_created_counts(&self, year: i32) -> AppResult<[i64; 12]> {
        let (from, until) = year_range(year);
        let rows = sqlx::query_as::<_, MonthlyCountRow>(
            r#"
                SELECT CAST(EXTRACT(MONTH FROM created_at) AS INT4) AS month,
                       COUNT(*) AS total
                FROM reservations
                WHERE is_active AND created_at >= $1 AND created_at < $2
                GROUP BY 1
                ORDER BY 1
            "#,
        )
        .bind(from)
        .bind(until)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(fill_monthly_slots(
            rows.into_iter().map(|row| (row.month, row.total)),
        ))
    }
}

impl ReservationRepositoryImpl {
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

    // 部屋が存在し、予約を受けられる状態かを確認する。
    // メンテナンス中の部屋は期間に関係なく受け付けない
    async fn ensure_room_is_operational(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room_id: RoomId,
    ) -> AppResult<()> {
        let state = sqlx::query_scalar::<_, RoomState>(
            r#"SELECT state FROM rooms WHERE room_id = $1"#,
        )
        .bind(room_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        match state {
            None => Err(AppError::EntityNotFound(format!(
                "room ({}) not found",
                room_id
            ))),
            Some(RoomState::Maintenance) => Err(AppError::UnprocessableEntity(format!(
                "room ({}) is under maintenance",
                room_id
            ))),
            Some(_) => Ok(()),
        }
    }

    async fn ensure_user_exists(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: UserId,
    ) -> AppResult<()> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1 AND is_active)"#,
        )
        .bind(user_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if !exists {
            return Err(AppError::EntityNotFound(format!(
                "user ({}) not found",
                user_id
            )));
        }
        Ok(())
    }

    // 指定されたサービスがすべて有効なことを確認する。
    // 1 件でも欠けていれば全体を拒否する
    async fn ensure_services_exist(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service_ids: &[ServiceId],
    ) -> AppResult<()> {
        if service_ids.is_empty() {
            return Ok(());
        }

        let ids: Vec<Uuid> = service_ids.iter().map(|id| id.raw()).collect();
        let found = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM services WHERE service_id = ANY($1) AND is_active"#,
        )
        .bind(&ids)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 同じサービスの重複指定は許容するので distinct で比べる
        let distinct = ids.iter().collect::<HashSet<_>>().len() as i64;
        if found < distinct {
            return Err(AppError::EntityNotFound(
                "one or more services not found".into(),
            ));
        }
        Ok(())
    }

    // 半開区間 [starts_at, ends_at) の重複判定。
    // 境界で接する予約同士は衝突にしない
    async fn ensure_room_is_free(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        room_id: RoomId,
        period: &ReservationPeriod,
        exclude: Option<ReservationId>,
    ) -> AppResult<()> {
        let reservation_conflict = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM reservations
                    WHERE room_id = $1
                      AND is_active
                      AND starts_at < $3
                      AND ends_at > $2
                      AND ($4::uuid IS NULL OR reservation_id <> $4)
                )
            "#,
        )
        .bind(room_id)
        .bind(period.starts_at())
        .bind(period.ends_at())
        .bind(exclude.map(|id| id.raw()))
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if reservation_conflict {
            return Err(AppError::ResourceConflict(format!(
                "room ({}) is already reserved in the requested window",
                room_id
            )));
        }

        // 部屋単位のイベントは開始から 1 時間の窓を占有する
        let event_conflict = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM events
                    WHERE room_id = $1
                      AND is_active
                      AND starts_at < $3
                      AND starts_at + INTERVAL '1 hour' > $2
                )
            "#,
        )
        .bind(room_id)
        .bind(period.starts_at())
        .bind(period.ends_at())
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if event_conflict {
            return Err(AppError::ResourceConflict(format!(
                "room ({}) hosts an event in the requested window",
                room_id
            )));
        }

        Ok(())
    }

    // 各予約の service_ids を表示用の名前・価格に展開する
    async fn attach_services(&self, rows: Vec<ReservationRow>) -> AppResult<Vec<Reservation>> {
        let mut wanted: Vec<Uuid> = rows
            .iter()
            .flat_map(|row| row.service_ids.iter().copied())
            .collect();
        wanted.sort_unstable();
        wanted.dedup();

        let pricing: HashMap<Uuid, ReservationService> = if wanted.is_empty() {
            HashMap::new()
        } else {
            sqlx::query_as::<_, ServicePricingRow>(
                r#"SELECT service_id, name, price FROM services WHERE service_id = ANY($1)"#,
            )
            .bind(&wanted)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(|row| {
                (
                    row.service_id.raw(),
                    ReservationService {
                        service_id: row.service_id,
                        name: row.name,
                        price: row.price,
                    },
                )
            })
            .collect()
        };

        rows.into_iter()
            .map(|row| {
                let services = row
                    .service_ids
                    .iter()
                    .filter_map(|id| pricing.get(id).cloned())
                    .collect();
                row.into_reservation(services)
            })
            .collect()
    }
}
