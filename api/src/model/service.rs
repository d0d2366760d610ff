use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::ServiceId,
    list::PaginatedList,
    service::{
        event::{CreateService, UpdateService},
        Service,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub price: Decimal,
}

impl From<CreateServiceRequest> for CreateService {
    fn from(value: CreateServiceRequest) -> Self {
        let CreateServiceRequest { name, price } = value;
        CreateService { name, price }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub price: Option<Decimal>,
}

#[derive(new)]
pub struct UpdateServiceRequestWithId(ServiceId, UpdateServiceRequest);

impl From<UpdateServiceRequestWithId> for UpdateService {
    fn from(value: UpdateServiceRequestWithId) -> Self {
        let UpdateServiceRequestWithId(service_id, UpdateServiceRequest { name, price }) = value;
        UpdateService {
            service_id,
            name,
            price,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse {
    pub service_id: ServiceId,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}

impl From<Service> for ServiceResponse {
    fn from(value: Service) -> Self {
        let Service {
            service_id,
            name,
            price,
            is_active,
        } = value;
        Self {
            service_id,
            name,
            price,
            is_active,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCreatedResponse {
    pub success: bool,
    pub msg: String,
    pub service: ServiceResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicesResponse {
    pub success: bool,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub services: Vec<ServiceResponse>,
}

impl From<PaginatedList<Service>> for ServicesResponse {
    fn from(value: PaginatedList<Service>) -> Self {
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
            services: items.into_iter().map(ServiceResponse::from).collect(),
        }
    }
}
