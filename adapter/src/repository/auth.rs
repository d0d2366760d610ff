use crate::{
    database::{model::user::UserCredentialRow, ConnectionPool},
    redis::RedisClient,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::{str::FromStr, sync::Arc};
use uuid::Uuid;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let Some(value) = self.kv.get(&token_key(access_token)).await? else {
            return Ok(None);
        };
        let user_id = UserId::from_str(&value).map_err(|e| {
            AppError::ConversionEntityError(format!("stored token maps to an invalid id: {e}"))
        })?;
        Ok(Some(user_id))
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let credential = sqlx::query_as::<_, UserCredentialRow>(
            r#"SELECT user_id, password_hash FROM users WHERE email = $1 AND is_active"#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 存在しないメールアドレスも認証失敗として同じ応答にする
        let Some(credential) = credential else {
            return Err(AppError::UnauthenticatedError);
        };

        let valid = bcrypt::verify(password, &credential.password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(credential.user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        let access_token = AccessToken(Uuid::new_v4().simple().to_string());
        self.kv
            .set_ex(
                &token_key(&access_token),
                &event.user_id.to_string(),
                self.ttl,
            )
            .await?;
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: &AccessToken) -> AppResult<()> {
        self.kv.delete(&token_key(access_token)).await
    }
}

fn token_key(token: &AccessToken) -> String {
    format!("auth:{}", token.0)
}
