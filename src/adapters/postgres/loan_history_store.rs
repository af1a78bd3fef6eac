use crate::domain::{LoanHistory, LoanHistoryId, LoanStatus};
use crate::ports::loan_history_store::{
    LoanHistoryStore as LoanHistoryStoreTrait, LoanHistoryStoreError, Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

fn invalid_data(message: String) -> LoanHistoryStoreError {
    LoanHistoryStoreError::Storage(Box::new(std::io::Error::new(
        std::io::ErrorKind::InvalidData,
        message,
    )))
}

/// PostgreSQLの行データをLoanHistoryに変換する
fn map_row_to_loan_history(row: &PgRow) -> Result<LoanHistory> {
    let status_str: &str = row.get("status");
    let status = LoanStatus::from_str(status_str).map_err(invalid_data)?;

    Ok(LoanHistory::restore(
        LoanHistoryId::from_i64(row.get("id")),
        row.get("borrower_name"),
        row.get("book_name"),
        status,
    ))
}

/// 書き込み時のエラーを変換する
///
/// 貸出中の書籍名に対する部分ユニークインデックス違反は二重貸出として扱う。
fn map_write_error(err: sqlx::Error, book_name: &str) -> LoanHistoryStoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            LoanHistoryStoreError::AlreadyLoaned(book_name.to_string())
        }
        _ => err.into(),
    }
}

/// LoanHistoryStoreのPostgreSQL実装
pub struct LoanHistoryStore {
    pool: PgPool,
}

impl LoanHistoryStore {
    /// PostgreSQLコネクションプールから新しいLoanHistoryStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanHistoryStoreTrait for LoanHistoryStore {
    async fn save(&self, history: LoanHistory) -> Result<LoanHistory> {
        history.validate()?;

        match history.id() {
            None => {
                let row = sqlx::query(
                    r#"
                    INSERT INTO loan_histories (borrower_name, book_name, status)
                    VALUES ($1, $2, $3)
                    RETURNING id
                    "#,
                )
                .bind(history.borrower_name())
                .bind(history.book_name())
                .bind(history.status().as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_write_error(e, history.book_name()))?;

                let id = LoanHistoryId::from_i64(row.get("id"));
                tracing::debug!(loan_history_id = %id, "inserted loan history");
                Ok(history.with_id(id))
            }
            Some(id) => {
                let row = sqlx::query(
                    r#"
                    UPDATE loan_histories
                    SET borrower_name = $2,
                        book_name = $3,
                        status = $4,
                        updated_at = NOW()
                    WHERE id = $1
                    RETURNING id
                    "#,
                )
                .bind(id.value())
                .bind(history.borrower_name())
                .bind(history.book_name())
                .bind(history.status().as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_write_error(e, history.book_name()))?;

                if row.is_none() {
                    return Err(LoanHistoryStoreError::UnknownIdentity(id));
                }
                tracing::debug!(loan_history_id = %id, "updated loan history");
                Ok(history)
            }
        }
    }

    async fn exists_by_book_name_and_status(
        &self,
        book_name: &str,
        status: LoanStatus,
    ) -> Result<bool> {
        let row = sqlx::query(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM loan_histories
                WHERE book_name = $1 AND status = $2
            ) AS present
            "#,
        )
        .bind(book_name)
        .bind(status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("present"))
    }

    async fn find_loaned(
        &self,
        borrower_name: &str,
        book_name: &str,
    ) -> Result<Option<LoanHistory>> {
        let row = sqlx::query(
            r#"
            SELECT id, borrower_name, book_name, status
            FROM loan_histories
            WHERE borrower_name = $1 AND book_name = $2 AND status = 'LOANED'
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(borrower_name)
        .bind(book_name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_loan_history).transpose()
    }

    async fn count_by_status(&self, status: LoanStatus) -> Result<usize> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM loan_histories WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.get("count");
        usize::try_from(count).map_err(|_| invalid_data(format!("count out of range: {}", count)))
    }

    async fn find_all(&self) -> Result<Vec<LoanHistory>> {
        let rows = sqlx::query(
            r#"
            SELECT id, borrower_name, book_name, status
            FROM loan_histories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_loan_history).collect()
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM loan_histories")
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
