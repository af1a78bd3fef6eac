use super::book::validate_name;
use super::errors::BookValidationError;
use serde::{Deserialize, Serialize};

/// 貸出履歴ID - 永続化時にストアが採番する
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoanHistoryId(i64);

impl LoanHistoryId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for LoanHistoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 貸出ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// 貸出中
    Loaned,
    /// 返却済み
    Returned,
}

impl LoanStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Loaned => "LOANED",
            LoanStatus::Returned => "RETURNED",
        }
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOANED" => Ok(LoanStatus::Loaned),
            "RETURNED" => Ok(LoanStatus::Returned),
            _ => Err(format!("Invalid loan status: {}", s)),
        }
    }
}

/// 返却のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnLoanError {
    /// 既に返却済み
    AlreadyReturned,
}

/// 貸出履歴
///
/// 貸出者は名前で、書籍は貸出時点の書籍名で記録する。
/// 同じ書籍名で貸出中の履歴は同時に1件までしか存在できない（ストアが保証する）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanHistory {
    id: Option<LoanHistoryId>,
    borrower_name: String,
    book_name: String,
    status: LoanStatus,
}

impl LoanHistory {
    /// 貸出中の新しい履歴を作成する
    ///
    /// # エラー
    /// 貸出者名または書籍名が不正な場合は`BookValidationError`を返す
    pub fn loan(
        borrower_name: impl Into<String>,
        book_name: impl Into<String>,
    ) -> Result<Self, BookValidationError> {
        let borrower_name = borrower_name.into();
        let book_name = book_name.into();
        validate_name(&borrower_name)?;
        validate_name(&book_name)?;
        Ok(Self {
            id: None,
            borrower_name,
            book_name,
            status: LoanStatus::Loaned,
        })
    }

    /// 永続化済みの状態から履歴を復元する
    pub fn restore(
        id: LoanHistoryId,
        borrower_name: String,
        book_name: String,
        status: LoanStatus,
    ) -> Self {
        Self {
            id: Some(id),
            borrower_name,
            book_name,
            status,
        }
    }

    pub fn id(&self) -> Option<LoanHistoryId> {
        self.id
    }

    pub fn borrower_name(&self) -> &str {
        &self.borrower_name
    }

    pub fn book_name(&self) -> &str {
        &self.book_name
    }

    pub fn status(&self) -> LoanStatus {
        self.status
    }

    pub fn is_returned(&self) -> bool {
        self.status == LoanStatus::Returned
    }

    /// 採番されたIDを付与したコピーを返す
    pub fn with_id(self, id: LoanHistoryId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// 返却する
    ///
    /// # エラー
    /// 既に返却済みの場合は`ReturnLoanError::AlreadyReturned`を返す
    pub fn return_book(&mut self) -> Result<(), ReturnLoanError> {
        if self.is_returned() {
            return Err(ReturnLoanError::AlreadyReturned);
        }
        self.status = LoanStatus::Returned;
        Ok(())
    }

    /// 不変条件を検証する
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_name(&self.borrower_name)?;
        validate_name(&self.book_name)
    }
}
