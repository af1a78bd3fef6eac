use super::errors::BookValidationError;
use super::value_objects::{BookId, BookType};

/// 書籍名の最大文字数（books.name の VARCHAR(255) に対応）
pub const MAX_NAME_LENGTH: usize = 255;

/// 書籍エンティティ
///
/// 不変条件：
/// - 名前は空にできない（空白のみも不可）
/// - 名前に制御文字を含められない（PostgreSQLはNULを格納できない）
/// - 永続化済みの書籍は生存期間中ずっと同じIDを持つ
///
/// IDは最初の保存時にストアが採番するため、新規作成時は`None`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: Option<BookId>,
    name: String,
    book_type: BookType,
}

impl Book {
    /// 未保存の書籍を作成する
    ///
    /// # エラー
    /// 名前が空、または長すぎる場合は`BookValidationError`を返す
    pub fn new(name: impl Into<String>, book_type: BookType) -> Result<Self, BookValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            id: None,
            name,
            book_type,
        })
    }

    /// 永続化済みの状態から書籍を復元する
    ///
    /// ストアのアダプターが行データから組み立てる際に使用する。
    pub fn restore(id: BookId, name: String, book_type: BookType) -> Self {
        Self {
            id: Some(id),
            name,
            book_type,
        }
    }

    pub fn id(&self) -> Option<BookId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn book_type(&self) -> BookType {
        self.book_type
    }

    /// 採番されたIDを付与したコピーを返す
    pub fn with_id(self, id: BookId) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    /// 書籍名を変更する
    ///
    /// # エラー
    /// 新しい名前が不正な場合は変更せずにエラーを返す
    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), BookValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// 不変条件を検証する
    ///
    /// `restore`経由で作られた値もストアに渡る前にここを通る。
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_name(&self.name)
    }
}

/// 名前の不変条件を検証する
///
/// 貸出履歴の貸出者名にも同じ規則を使う。
pub fn validate_name(name: &str) -> Result<(), BookValidationError> {
    if name.trim().is_empty() {
        return Err(BookValidationError::BlankName);
    }
    if name.chars().any(char::is_control) {
        return Err(BookValidationError::ControlCharacter);
    }
    let actual = name.chars().count();
    if actual > MAX_NAME_LENGTH {
        return Err(BookValidationError::NameTooLong {
            max: MAX_NAME_LENGTH,
            actual,
        });
    }
    Ok(())
}
