use thiserror::Error;

/// 名前のバリデーションエラー
///
/// 書籍名と貸出者名の両方に同じ規則を適用する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookValidationError {
    /// 名前が空（空白のみを含む）
    #[error("Name must not be blank")]
    BlankName,

    /// 名前が長すぎる
    #[error("Name is too long ({actual} > {max} characters)")]
    NameTooLong { max: usize, actual: usize },

    /// 名前に制御文字（NULなど）が含まれる
    #[error("Name must not contain control characters")]
    ControlCharacter,
}
