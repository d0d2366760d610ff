use crate::model::{
    id::ReservationId,
    list::{ListOptions, PaginatedList},
    reservation::{
        event::{CancelReservation, CreateReservation, UpdateReservation},
        Reservation,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::error::AppResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    // 予約操作を行う。参照整合性と空き状況の検査はここで一括して行う
    async fn create(&self, event: CreateReservation) -> AppResult<ReservationId>;
    // 部分更新。部屋または期間が変わるときだけ空き状況を再検査する
    async fn update(&self, event: UpdateReservation) -> AppResult<()>;
    // 論理削除。二重キャンセルは成功として扱う
    async fn cancel(&self, event: CancelReservation) -> AppResult<()>;
    // 有効な予約の一覧。表示に使う項目だけを展開して返す
    async fn find_active_all(&self, options: ListOptions)
        -> AppResult<PaginatedList<Reservation>>;
    async fn find_by_id(&self, reservation_id: ReservationId) -> AppResult<Option<Reservation>>;
    // 期間内に作成された有効な予約の件数
    async fn count_created_in(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> AppResult<i64>;
    // 指定した年の月別予約作成数。1 月始まりの 12 要素
    async fn monthly_created_counts(&self, year: i32) -> AppResult<[i64; 12]>;
}
