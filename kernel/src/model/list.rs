use derive_new::new;

// 一覧系の操作で共通に使うページネーション指定
#[derive(Debug, Clone, Copy, new)]
pub struct ListOptions {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug)]
pub struct PaginatedList<T> {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<T>,
}
