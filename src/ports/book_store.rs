use crate::domain::{Book, BookId, BookValidationError};
use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;

/// 書籍ストアのエラー
///
/// 読み取り時の「見つからない」はエラーではなく`Ok(None)`で表す。
#[derive(Debug, Error)]
pub enum BookStoreError {
    /// I/Oの前に検出された不正な書籍
    #[error("Invalid book: {0}")]
    Validation(#[from] BookValidationError),

    /// 保存しようとした書籍のIDに対応する行が存在しない
    ///
    /// IDはストアが採番するため、未知のIDでの保存は挿入として扱わない。
    #[error("No stored book has id {0}")]
    UnknownIdentity(BookId),

    /// 接続断・タイムアウト・制約違反など、バッキングストアの障害
    #[error("Book store failure")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<sqlx::Error> for BookStoreError {
    fn from(err: sqlx::Error) -> Self {
        BookStoreError::Storage(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, BookStoreError>;

/// 書籍ストアポート
///
/// 永続化された書籍コレクションへの型付きの窓口。
/// 実装は呼び出し間で状態を持たず、内部でリトライもしない。
/// すべての障害はそのまま呼び出し元に伝播する。
#[async_trait]
pub trait BookStore: Send + Sync {
    /// 書籍を保存する
    ///
    /// IDがなければ挿入して採番済みの書籍を返し、
    /// IDがあれば該当する行を更新する（重複挿入はしない）。
    /// バリデーションはI/Oより先に行う。
    async fn save(&self, book: Book) -> Result<Book>;

    /// IDで書籍を取得する
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>>;

    /// 名前が完全一致する書籍を1冊取得する
    ///
    /// 同名の書籍が複数ある場合はIDが最小のものを返す。
    async fn find_by_name(&self, name: &str) -> Result<Option<Book>>;

    /// すべての書籍をID昇順で取得する
    async fn find_all(&self) -> Result<Vec<Book>>;

    /// IDで書籍を削除する
    ///
    /// 存在しない場合は何もしない。
    async fn delete_by_id(&self, id: BookId) -> Result<()>;

    /// すべての書籍を削除する
    async fn delete_all(&self) -> Result<()>;

    /// すべての書籍をID昇順でストリーム配信する
    fn stream_all(&self) -> BoxStream<'_, Result<Book>>;
}
