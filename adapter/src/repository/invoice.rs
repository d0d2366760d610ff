use crate::database::{
    model::invoice::{InvoicePaymentStateRow, InvoiceRow, InvoiceSourceRow, MonthlyIncomeRow},
    model::service::ServicePricingRow,
    ConnectionPool,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::InvoiceId,
    invoice::{
        billed_total,
        event::{GenerateInvoice, PayInvoice},
        Invoice, InvoiceListOptions, InvoiceStatus,
    },
    report::{fill_monthly_slots, year_range},
    reservation::ReservationPeriod,
};
use kernel::repository::invoice::InvoiceRepository;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};
use sqlx::{Postgres, Transaction};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(new)]
pub struct InvoiceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl InvoiceRepository for InvoiceRepositoryImpl {
    // 予約から請求書を発行する
    async fn create(&self, event: GenerateInvoice) -> AppResult<InvoiceId> {
        let mut tx = self.db.begin().await?;

        // 二重発行チェックと INSERT を同じ直列化可能トランザクションで行う
        self.set_transaction_serializable(&mut tx).await?;

        let source = sqlx::query_as::<_, InvoiceSourceRow>(
            r#"
                SELECT
                    r.reservation_id,
                    r.user_id,
                    r.service_ids,
                    r.starts_at,
                    r.ends_at,
                    r.is_active,
                    rm.room_id,
                    rm.hotel_id,
                    rm.price_per_night
                FROM reservations AS r
                INNER JOIN rooms AS rm ON r.room_id = rm.room_id
                WHERE r.reservation_id = $1
            "#,
        )
        .bind(event.reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(source) = source else {
            return Err(AppError::EntityNotFound(format!(
                "reservation ({}) not found",
                event.reservation_id
            )));
        };
        if !source.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "reservation ({}) has been cancelled",
                event.reservation_id
            )));
        }

        // 予約 1 件につき請求書は 1 枚まで
        let already_invoiced = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS (SELECT 1 FROM invoices WHERE reservation_id = $1)"#,
        )
        .bind(event.reservation_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if already_invoiced {
            return Err(AppError::ResourceConflict(format!(
                "an invoice already exists for reservation ({})",
                event.reservation_id
            )));
        }

        let period =
            ReservationPeriod::new(source.starts_at, source.ends_at).map_err(|_| {
                AppError::ConversionEntityError(format!(
                    "reservation ({}) has an inverted period",
                    event.reservation_id
                ))
            })?;

        // サービスは発行時点の価格で、指定された回数分だけ課金する
        let service_prices = self
            .resolve_service_prices(&mut tx, &source.service_ids)
            .await?;
        let total = billed_total(
            source.price_per_night,
            period.billable_days(),
            &service_prices,
        );

        let invoice_id = InvoiceId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO invoices
                (invoice_id, reservation_id, user_id, hotel_id, room_id, service_ids, total, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, 'PENDING')
            "#,
        )
        .bind(invoice_id)
        .bind(source.reservation_id)
        .bind(source.user_id)
        .bind(source.hotel_id)
        .bind(source.room_id)
        .bind(&source.service_ids)
        .bind(total)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No invoice record has been created".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(invoice_id)
    }

    async fn mark_paid(&self, event: PayInvoice) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.set_transaction_serializable(&mut tx).await?;

        let state = sqlx::query_as::<_, InvoicePaymentStateRow>(
            r#"SELECT status, is_active FROM invoices WHERE invoice_id = $1"#,
        )
        .bind(event.invoice_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let Some(state) = state else {
            return Err(AppError::EntityNotFound(format!(
                "invoice ({}) not found",
                event.invoice_id
            )));
        };
        if !state.is_active {
            return Err(AppError::UnprocessableEntity(format!(
                "invoice ({}) is inactive",
                event.invoice_id
            )));
        }
        // PAID からの遷移は存在しない
        if state.status == InvoiceStatus::Paid {
            return Err(AppError::UnprocessableEntity(format!(
                "invoice ({}) has already been paid",
                event.invoice_id
            )));
        }

        let res = sqlx::query(
            r#"UPDATE invoices SET status = 'PAID' WHERE invoice_id = $1"#,
        )
        .bind(event.invoice_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No invoice record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }

    async fn find_all(&self, options: InvoiceListOptions) -> AppResult<Vec<Invoice>> {
        let user_filter: Option<Uuid> = options.user_id.map(Into::into);

        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
                SELECT
                    i.invoice_id,
                    i.reservation_id,
                    r.starts_at,
                    r.ends_at,
                    i.user_id,
                    u.user_name,
                    u.email,
                    i.hotel_id,
                    h.name AS hotel_name,
                    i.room_id,
                    rm.room_number,
                    rm.price_per_night,
                    i.service_ids,
                    i.total,
                    i.status,
                    i.is_active,
                    i.created_at
                FROM invoices AS i
                INNER JOIN reservations AS r ON i.reservation_id = r.reservation_id
                INNER JOIN users AS u ON i.user_id = u.user_id
                INNER JOIN hotels AS h ON i.hotel_id = h.hotel_id
                INNER JOIN rooms AS rm ON i.room_id = rm.room_id
                WHERE i.is_active
                  AND ($1::uuid IS NULL OR i.user_id = $1)
                  AND ($2::invoice_status IS NULL OR i.status = $2)
                ORDER BY i.created_at DESC
            "#,
        )
        .bind(user_filter)
        .bind(options.status)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Invoice::from).collect())
    }

    async fn find_by_id(&self, invoice_id: InvoiceId) -> AppResult<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
                SELECT
                    i.invoice_id,
                    i.reservation_id,
                    r.starts_at,
                    r.ends_at,
                    i.user_id,
                    u.user_name,
                    u.email,
                    i.hotel_id,
                    h.name AS hotel_name,
                    i.room_id,
                    rm.room_number,
                    rm.price_per_night,
                    i.service_ids,
                    i.total,
                    i.status,
                    i.is_active,
                    i.created_at
                FROM invoices AS i
                INNER JOIN reservations AS r ON i.reservation_id = r.reservation_id
                INNER JOIN users AS u ON i.user_id = u.user_id
                INNER JOIN hotels AS h ON i.hotel_id = h.hotel_id
                INNER JOIN rooms AS rm ON i.room_id = rm.room_id
                WHERE i.invoice_id = $1
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Invoice::from))
    }

    async fn total_income(&self) -> AppResult<Decimal> {
        sqlx::query_scalar::<_, Decimal>(
            r#"
                SELECT COALESCE(SUM(total), 0)
                FROM invoices
                WHERE is_active AND status = 'PAID'
            "#,
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn monthly_income(&self, year: i32) -> AppResult<[Decimal; 12]> {
        let (from, until) = year_range(year);
        let rows = sqlx::query_as::<_, MonthlyIncomeRow>(
            r#"
                SELECT CAST(EXTRACT(MONTH FROM created_at) AS INT4) AS month,
                       SUM(total) AS income
                FROM invoices
                WHERE is_active AND status = 'PAID'
                  AND created_at >= $1 AND created_at < $2
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
            rows.into_iter().map(|row| (row.month, row.income)),
        ))
    }
}

impl InvoiceRepositoryImpl {
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

    // 予約に載っているサービス参照を現在価格の列に展開する。
    // 同じ ID が 2 回あれば価格も 2 回分になる
    async fn resolve_service_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        service_ids: &[Uuid],
    ) -> AppResult<Vec<Decimal>> {
        if service_ids.is_empty() {
            return Ok(Vec::new());
        }

        let prices: HashMap<Uuid, Decimal> = sqlx::query_as::<_, ServicePricingRow>(
            r#"SELECT service_id, name, price FROM services WHERE service_id = ANY($1)"#,
        )
        .bind(service_ids)
        .fetch_all(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(|row| (row.service_id.raw(), row.price))
        .collect();

        service_ids
            .iter()
            .map(|id| {
                prices.get(id).copied().ok_or_else(|| {
                    AppError::EntityNotFound("one or more services not found".into())
                })
            })
            .collect()
    }
}
