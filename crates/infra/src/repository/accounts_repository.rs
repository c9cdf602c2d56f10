//! # AccountsRepository
//!
//! ネイティブ認証で使用するアカウントの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **auth スキーマ**: accounts テーブルは auth スキーマに配置
//! - **ユーザー名一意**: username には一意制約があり、検索キーとして使用する
//! - **認証成功の記録**: 最終ログイン日時を更新する（失敗時は更新しない）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// アカウントエンティティ
///
/// `password_hash` は Argon2id の PHC 文字列。平文は保持しない。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub is_application_admin: bool,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// アカウントリポジトリトレイト
///
/// アカウントの永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ネイティブ認証ストラテジから利用する。
#[async_trait]
pub trait AccountsRepository: Send + Sync {
    /// ユーザー名でアカウントを取得する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(account))`: アカウントが見つかった場合
    /// - `Ok(None)`: アカウントが見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, InfraError>;

    /// 最終ログイン日時を更新する
    ///
    /// 認証成功時に呼び出される。
    async fn record_login(&self, id: Uuid) -> Result<(), InfraError>;
}

/// PostgreSQL 実装の AccountsRepository
#[derive(Debug, Clone)]
pub struct PostgresAccountsRepository {
    pool: PgPool,
}

impl PostgresAccountsRepository {
    /// 新しいリポジトリインスタンスを作成する
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountsRepository for PostgresAccountsRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, InfraError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                is_application_admin,
                is_active,
                last_login_at,
                created_at,
                updated_at
            FROM auth.accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn record_login(&self, id: Uuid) -> Result<(), InfraError> {
        sqlx::query(
            r#"
            UPDATE auth.accounts
            SET last_login_at = NOW(), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
