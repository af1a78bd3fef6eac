use crate::domain::{LoanHistory, LoanStatus, ReturnLoanError, commands::*};

use super::book_service::ServiceDependencies;
use super::errors::{BookApplicationError, Result};

/// 書籍を貸し出す
///
/// ビジネスルール：
/// - 書籍名で書籍が見つかること
/// - 同じ書籍名が貸出中でないこと
///
/// 事前確認の後に別の貸出が割り込んだ場合も、
/// ストアの一意性制約によりBookAlreadyLoanedになる。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `cmd` - 貸出コマンド
///
/// # 戻り値
/// 作成された貸出履歴
pub async fn loan_book(deps: &ServiceDependencies, cmd: LoanBook) -> Result<LoanHistory> {
    // 1. 書籍の存在確認
    let book = deps
        .book_store
        .find_by_name(&cmd.book_name)
        .await?
        .ok_or(BookApplicationError::BookNotFound)?;

    // 2. 貸出中かどうかの確認
    let already_loaned = deps
        .loan_history_store
        .exists_by_book_name_and_status(book.name(), LoanStatus::Loaned)
        .await?;

    if already_loaned {
        return Err(BookApplicationError::BookAlreadyLoaned);
    }

    // 3. 履歴を作成して保存
    let history = LoanHistory::loan(cmd.borrower_name, book.name())
        .map_err(|e| BookApplicationError::InvalidLoan(e.to_string()))?;

    let saved = deps.loan_history_store.save(history).await?;

    tracing::info!(
        loan_history_id = ?saved.id(),
        borrower = saved.borrower_name(),
        book = saved.book_name(),
        "loaned book"
    );
    Ok(saved)
}

/// 書籍を返却する
///
/// 貸出者・書籍名が一致する貸出中の履歴を返却済みにする。
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<LoanHistory> {
    let mut history = deps
        .loan_history_store
        .find_loaned(&cmd.borrower_name, &cmd.book_name)
        .await?
        .ok_or(BookApplicationError::LoanNotFound)?;

    history.return_book().map_err(|e| match e {
        ReturnLoanError::AlreadyReturned => BookApplicationError::LoanNotFound,
    })?;

    let saved = deps.loan_history_store.save(history).await?;

    tracing::info!(
        loan_history_id = ?saved.id(),
        borrower = saved.borrower_name(),
        book = saved.book_name(),
        "returned book"
    );
    Ok(saved)
}

/// 貸出中の書籍数を数える
pub async fn count_loaned_books(deps: &ServiceDependencies) -> Result<usize> {
    Ok(deps
        .loan_history_store
        .count_by_status(LoanStatus::Loaned)
        .await?)
}
