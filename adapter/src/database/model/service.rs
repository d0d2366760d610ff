use kernel::model::{id::ServiceId, service::Service};
use rust_decimal::Decimal;

#[derive(sqlx::FromRow)]
pub struct ServiceRow {
    pub service_id: ServiceId,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}

// 予約・請求の表示/価格解決用。論理削除済みのサービスも
// 過去の予約から参照され続けるため is_active では絞らない
#[derive(sqlx::FromRow)]
pub struct ServicePricingRow {
    pub service_id: ServiceId,
    pub name: String,
    pub price: Decimal,
}

impl From<ServiceRow> for Service {
    fn from(value: ServiceRow) -> Self {
        let ServiceRow {
            service_id,
            name,
            price,
            is_active,
        } = value;
        Service {
            service_id,
            name,
            price,
            is_active,
        }
    }
}
