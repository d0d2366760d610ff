use crate::model::{
    id::ServiceId,
    list::{ListOptions, PaginatedList},
    service::{
        event::{CreateService, DeleteService, UpdateService},
        Service,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, event: CreateService) -> AppResult<ServiceId>;
    async fn find_active_all(&self, options: ListOptions) -> AppResult<PaginatedList<Service>>;
    async fn find_by_id(&self, service_id: ServiceId) -> AppResult<Option<Service>>;
    async fn update(&self, event: UpdateService) -> AppResult<()>;
    async fn delete(&self, event: DeleteService) -> AppResult<()>;
}
