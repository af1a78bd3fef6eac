use crate::domain::{Book, BookId, BookType, commands::*};
use crate::ports::{BookStore, LoanHistoryStore};
use futures::TryStreamExt;
use std::collections::HashMap;
use std::sync::Arc;

use super::errors::{BookApplicationError, Result};

/// サービスの依存関係
///
/// 振る舞いは持たず、ユースケース関数に依存関係を渡すためのデータ構造。
/// ストアはコンストラクタ注入されたハンドルとして受け取り、
/// グローバルな永続化コンテキストには依存しない。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub book_store: Arc<dyn BookStore>,
    pub loan_history_store: Arc<dyn LoanHistoryStore>,
}

/// 分野ごとの書籍数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookStatistic {
    pub book_type: BookType,
    pub count: usize,
}

/// 書籍を登録する
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 登録コマンド
///
/// # 戻り値
/// 採番済みのIDを持つ書籍
///
/// # エラー
/// - InvalidBook: 書籍名が不正
/// - BookStoreError: 永続化失敗
pub async fn register_book(deps: &ServiceDependencies, cmd: RegisterBook) -> Result<Book> {
    let book = Book::new(cmd.name, cmd.book_type)
        .map_err(|e| BookApplicationError::InvalidBook(e.to_string()))?;

    let saved = deps.book_store.save(book).await?;

    tracing::info!(book_id = ?saved.id(), name = saved.name(), "registered book");
    Ok(saved)
}

/// IDで書籍を取得する
pub async fn get_book(deps: &ServiceDependencies, book_id: BookId) -> Result<Book> {
    deps.book_store
        .find_by_id(book_id)
        .await?
        .ok_or(BookApplicationError::BookNotFound)
}

/// 名前で書籍を取得する
///
/// 同名の書籍が複数ある場合はストアの規則（ID最小）に従う。
pub async fn find_book_by_name(deps: &ServiceDependencies, name: &str) -> Result<Book> {
    deps.book_store
        .find_by_name(name)
        .await?
        .ok_or(BookApplicationError::BookNotFound)
}

/// すべての書籍を取得する
pub async fn list_books(deps: &ServiceDependencies) -> Result<Vec<Book>> {
    Ok(deps.book_store.find_all().await?)
}

/// 書籍名を変更する
///
/// 既存の書籍を読み込み、名前を変更してから同じIDで保存する（upsert）。
pub async fn rename_book(deps: &ServiceDependencies, cmd: RenameBook) -> Result<Book> {
    let mut book = get_book(deps, cmd.book_id).await?;

    book.rename(cmd.name)
        .map_err(|e| BookApplicationError::InvalidBook(e.to_string()))?;

    let saved = deps.book_store.save(book).await?;

    tracing::info!(book_id = %cmd.book_id, name = saved.name(), "renamed book");
    Ok(saved)
}

/// 書籍を削除する
///
/// 存在しない書籍の削除はエラーにしない（冪等）。
pub async fn delete_book(deps: &ServiceDependencies, book_id: BookId) -> Result<()> {
    deps.book_store.delete_by_id(book_id).await?;

    tracing::info!(book_id = %book_id, "deleted book");
    Ok(())
}

/// 分野ごとの書籍数を集計する
///
/// 1冊以上ある分野のみを、分野の宣言順で返す。
/// 蔵書全体をメモリに載せないよう、ストリームで数える。
pub async fn book_statistics(deps: &ServiceDependencies) -> Result<Vec<BookStatistic>> {
    let counts: HashMap<BookType, usize> = deps
        .book_store
        .stream_all()
        .try_fold(HashMap::new(), |mut counts, book| async move {
            *counts.entry(book.book_type()).or_default() += 1;
            Ok(counts)
        })
        .await?;

    let statistics = BookType::ALL
        .into_iter()
        .filter_map(|book_type| {
            counts
                .get(&book_type)
                .map(|&count| BookStatistic { book_type, count })
        })
        .collect();

    tracing::debug!(types = counts.len(), "computed book statistics");
    Ok(statistics)
}
