use crate::model::{
    id::InvoiceId,
    invoice::{
        event::{GenerateInvoice, PayInvoice},
        Invoice, InvoiceListOptions,
    },
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::error::AppResult;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    // 予約から請求書を発行する。予約 1 件につき 1 枚まで
    async fn create(&self, event: GenerateInvoice) -> AppResult<InvoiceId>;
    // PENDING -> PAID の一方向遷移のみ許可する
    async fn mark_paid(&self, event: PayInvoice) -> AppResult<()>;
    async fn find_all(&self, options: InvoiceListOptions) -> AppResult<Vec<Invoice>>;
    async fn find_by_id(&self, invoice_id: InvoiceId) -> AppResult<Option<Invoice>>;
    // 支払い済み請求書の合計額
    async fn total_income(&self) -> AppResult<Decimal>;
    // 指定した年の月別収入。1 月始まりの 12 要素
    async fn monthly_income(&self, year: i32) -> AppResult<[Decimal; 12]>;
}
