use crate::domain::{Book, BookId, BookType};
use crate::ports::book_store::{BookStore as BookStoreTrait, BookStoreError, Result};
use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// PostgreSQLの行データをBookに変換する
///
/// book_typeの文字列が未知の値だった場合はストレージ障害として扱う。
fn map_row_to_book(row: &PgRow) -> Result<Book> {
    let book_type_str: &str = row.get("book_type");
    let book_type = BookType::from_str(book_type_str).map_err(|e| {
        BookStoreError::Storage(Box::new(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e,
        )))
    })?;

    Ok(Book::restore(
        BookId::from_i64(row.get("id")),
        row.get("name"),
        book_type,
    ))
}

/// BookStoreのPostgreSQL実装
///
/// 接続管理・トランザクション境界はsqlxのコネクションプールに委ねる。
/// 同時書き込みの制御もPostgreSQL側に任せ、独自のロックは持たない。
pub struct BookStore {
    pool: PgPool,
}

impl BookStore {
    /// PostgreSQLコネクションプールから新しいBookStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStoreTrait for BookStore {
    /// 書籍を保存（IDなしはINSERT、IDありはUPDATE）
    ///
    /// idはGENERATED ALWAYS AS IDENTITYのため、呼び出し側がIDを指定して
    /// 挿入することはできない。該当行がないUPDATEはUnknownIdentityになる。
    async fn save(&self, book: Book) -> Result<Book> {
        book.validate()?;

        match book.id() {
            None => {
                let row = sqlx::query(
                    r#"
                    INSERT INTO books (name, book_type)
                    VALUES ($1, $2)
                    RETURNING id
                    "#,
                )
                .bind(book.name())
                .bind(book.book_type().as_str())
                .fetch_one(&self.pool)
                .await?;

                let id = BookId::from_i64(row.get("id"));
                tracing::debug!(book_id = %id, "inserted book");
                Ok(book.with_id(id))
            }
            Some(id) => {
                let row = sqlx::query(
                    r#"
                    UPDATE books
                    SET name = $2,
                        book_type = $3,
                        updated_at = NOW()
                    WHERE id = $1
                    RETURNING id
                    "#,
                )
                .bind(id.value())
                .bind(book.name())
                .bind(book.book_type().as_str())
                .fetch_optional(&self.pool)
                .await?;

                if row.is_none() {
                    return Err(BookStoreError::UnknownIdentity(id));
                }
                tracing::debug!(book_id = %id, "updated book");
                Ok(book)
            }
        }
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, book_type
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    /// 名前で書籍を取得（同名が複数ある場合はID最小）
    ///
    /// (name, id)のインデックスでORDER BY ... LIMIT 1を解決する。
    async fn find_by_name(&self, name: &str) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, book_type
            FROM books
            WHERE name = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_book).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, book_type
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_book).collect()
    }

    async fn delete_by_id(&self, id: BookId) -> Result<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        tracing::debug!(book_id = %id, deleted = result.rows_affected(), "deleted book");
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        sqlx::query("DELETE FROM books")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    fn stream_all(&self) -> BoxStream<'_, Result<Book>> {
        let stream = sqlx::query(
            r#"
            SELECT id, name, book_type
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch(&self.pool)
        .map(|row_result| {
            let row = row_result?;
            map_row_to_book(&row)
        });

        Box::pin(stream)
    }
}
