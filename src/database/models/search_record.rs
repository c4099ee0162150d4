use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One search run from a chat, kept for the `/settings` overview.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SearchRecord {
    pub id: String,
    pub chat_id: i64,
    pub user_id: i64,
    pub query_text: String,
    pub query_count: i64,
    pub result_count: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSearchStats {
    pub total_searches: i64,
    pub total_results: i64,
    pub last_search_at: Option<String>,
}

impl SearchRecord {
    pub async fn create(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        user_id: i64,
        query_text: String,
        query_count: i64,
        result_count: i64,
    ) -> Result<Self, sqlx::Error> {
        let id = Uuid::new_v4().to_string();
        let created_at = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO searches (id, chat_id, user_id, query_text, query_count, result_count, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(chat_id)
        .bind(user_id)
        .bind(&query_text)
        .bind(query_count)
        .bind(result_count)
        .bind(&created_at)
        .execute(pool)
        .await?;

        Ok(SearchRecord {
            id,
            chat_id,
            user_id,
            query_text,
            query_count,
            result_count,
            created_at,
        })
    }

    pub async fn find_recent_by_chat(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, SearchRecord>(
            "SELECT id, chat_id, user_id, query_text, query_count, result_count, created_at
             FROM searches
             WHERE chat_id = ?
             ORDER BY created_at DESC
             LIMIT ?"
        )
        .bind(chat_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn stats_for_chat(
        pool: &sqlx::SqlitePool,
        chat_id: i64,
    ) -> Result<ChatSearchStats, sqlx::Error> {
        let (total_searches, total_results, last_search_at) =
            sqlx::query_as::<_, (i64, i64, Option<String>)>(
                "SELECT COUNT(*), COALESCE(SUM(result_count), 0), MAX(created_at)
                 FROM searches
                 WHERE chat_id = ?"
            )
            .bind(chat_id)
            .fetch_one(pool)
            .await?;

        Ok(ChatSearchStats {
            total_searches,
            total_results,
            last_search_at,
        })
    }
}
