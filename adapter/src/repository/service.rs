use crate::database::{model::service::ServiceRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::ServiceId,
    list::{ListOptions, PaginatedList},
    service::{
        event::{CreateService, DeleteService, UpdateService},
        Service,
    },
};
use kernel::repository::service::ServiceRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct ServiceRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl ServiceRepository for ServiceRepositoryImpl {
    async fn create(&self, event: CreateService) -> AppResult<ServiceId> {
        let service_id = ServiceId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO services (service_id, name, price)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(service_id)
        .bind(&event.name)
        .bind(event.price)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No service record has been created".into(),
            ));
        }

        Ok(service_id)
    }

    async fn find_active_all(&self, options: ListOptions) -> AppResult<PaginatedList<Service>> {
        let ListOptions { limit, offset } = options;

        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM services WHERE is_active"#,
        )
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let rows = sqlx::query_as::<_, ServiceRow>(
            r#"
                SELECT service_id, name, price, is_active
                FROM services
                WHERE is_active
                ORDER BY name ASC
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
            items: rows.into_iter().map(Service::from).collect(),
        })
    }

    async fn find_by_id(&self, service_id: ServiceId) -> AppResult<Option<Service>> {
        let row = sqlx::query_as::<_, ServiceRow>(
            r#"
                SELECT service_id, name, price, is_active
                FROM services
                WHERE service_id = $1 AND is_active
            "#,
        )
        .bind(service_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Service::from))
    }

    async fn update(&self, event: UpdateService) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE services
                SET name = COALESCE($2, name),
                    price = COALESCE($3, price)
                WHERE service_id = $1 AND is_active
            "#,
        )
        .bind(event.service_id)
        .bind(event.name)
        .bind(event.price)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "service ({}) not found",
                event.service_id
            )));
        }

        Ok(())
    }

    async fn delete(&self, event: DeleteService) -> AppResult<()> {
        let res = sqlx::query(
            r#"UPDATE services SET is_active = FALSE WHERE service_id = $1"#,
        )
        .bind(event.service_id)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "service ({}) not found",
                event.service_id
            )));
        }

        Ok(())
    }
}
