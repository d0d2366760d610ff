pub mod event;

// Redis に保持するアクセストークン。Authorization ヘッダの Bearer 値
#[derive(Debug, Clone)]
pub struct AccessToken(pub String);
