use crate::model::id::ServiceId;
use derive_new::new;
use rust_decimal::Decimal;

#[derive(Debug, new)]
pub struct CreateService {
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, new)]
pub struct UpdateService {
    pub service_id: ServiceId,
    pub name: Option<String>,
    pub price: Option<Decimal>,
}

#[derive(Debug, new)]
pub struct DeleteService {
    pub service_id: ServiceId,
}
