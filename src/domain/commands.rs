use super::value_objects::{BookId, BookType};

/// 書籍登録コマンド
#[derive(Debug, Clone)]
pub struct RegisterBook {
    pub name: String,
    pub book_type: BookType,
}

/// 書籍名変更コマンド
#[derive(Debug, Clone)]
pub struct RenameBook {
    pub book_id: BookId,
    pub name: String,
}

/// 貸出コマンド
#[derive(Debug, Clone)]
pub struct LoanBook {
    pub borrower_name: String,
    pub book_name: String,
}

/// 返却コマンド
#[derive(Debug, Clone)]
pub struct ReturnBook {
    pub borrower_name: String,
    pub book_name: String,
}
