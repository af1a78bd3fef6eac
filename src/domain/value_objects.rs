use serde::{Deserialize, Serialize};

/// 書籍ID - 永続化時にストアが採番する識別子
///
/// 一度採番されたIDは書籍の生存期間中変わらず、再利用されない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(i64);

impl BookId {
    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 書籍の分野
///
/// 宣言順は統計の並び順としても使われる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookType {
    Computer,
    Economy,
    Society,
    Language,
    Science,
}

impl BookType {
    /// すべての分野（宣言順）
    pub const ALL: [BookType; 5] = [
        BookType::Computer,
        BookType::Economy,
        BookType::Society,
        BookType::Language,
        BookType::Science,
    ];

    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookType::Computer => "COMPUTER",
            BookType::Economy => "ECONOMY",
            BookType::Society => "SOCIETY",
            BookType::Language => "LANGUAGE",
            BookType::Science => "SCIENCE",
        }
    }
}

impl std::str::FromStr for BookType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPUTER" => Ok(BookType::Computer),
            "ECONOMY" => Ok(BookType::Economy),
            "SOCIETY" => Ok(BookType::Society),
            "LANGUAGE" => Ok(BookType::Language),
            "SCIENCE" => Ok(BookType::Science),
            _ => Err(format!("Invalid book type: {}", s)),
        }
    }
}
