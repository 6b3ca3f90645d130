//! Column Classifier Module
//!
//! 列名から質問・カテゴリ・セクションの各ロールを担う列を判定するモジュール。
//! スプレッドシートライブラリに依存しない純粋関数として実装しています。

/// 質問列を示すキーワード
const QUESTION_KEYWORD: &str = "question";

/// カテゴリ列を示すキーワード
const CATEGORY_KEYWORD: &str = "category";

/// セクション列を示すキーワード
const SECTION_KEYWORD: &str = "section";

/// シートごとの列ロール割り当て
///
/// 各フィールドは列インデックス（`Sheet::columns`内の位置）を保持します。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnRoles {
    /// 質問列
    pub question: Option<usize>,

    /// カテゴリ列
    pub category: Option<usize>,

    /// セクション列
    pub section: Option<usize>,
}

impl ColumnRoles {
    /// 指定された列がいずれかのロールに割り当てられているか
    pub fn is_role(&self, index: usize) -> bool {
        [self.question, self.category, self.section].contains(&Some(index))
    }

    /// ログ出力用に各ロールの列名を整形する
    pub fn describe(&self, columns: &[String]) -> String {
        let name = |role: Option<usize>| {
            role.and_then(|idx| columns.get(idx))
                .map(String::as_str)
                .unwrap_or("None")
        };
        format!(
            "Question: {}, Category: {}, Section: {}",
            name(self.question),
            name(self.category),
            name(self.section)
        )
    }
}

/// 列名のリストからロールを判定する
///
/// 列を元の順序で1回だけ走査し、小文字化した列名に対して部分一致で判定します。
/// 1つの列は`question` → `category` → `section`の優先順で最初に一致した
/// ロールにのみ割り当てられ、各ロールは最初に一致した列で確定します。
///
/// 質問列が見つからず、列が1つ以上ある場合は先頭列を質問列とします。
///
/// # 使用例
///
/// ```rust
/// use xlsxkb::classify;
///
/// let columns = vec!["Question Category".to_string(), "Category".to_string()];
/// let roles = classify(&columns);
/// assert_eq!(roles.question, Some(0));
/// assert_eq!(roles.category, Some(1));
/// assert_eq!(roles.section, None);
/// ```
pub fn classify(columns: &[String]) -> ColumnRoles {
    let mut roles = ColumnRoles::default();

    for (idx, column) in columns.iter().enumerate() {
        let lower = column.to_lowercase();
        if lower.contains(QUESTION_KEYWORD) && roles.question.is_none() {
            roles.question = Some(idx);
        } else if lower.contains(CATEGORY_KEYWORD) && roles.category.is_none() {
            roles.category = Some(idx);
        } else if lower.contains(SECTION_KEYWORD) && roles.section.is_none() {
            roles.section = Some(idx);
        }
    }

    // キーワードに一致しない場合は先頭列
    if roles.question.is_none() && !columns.is_empty() {
        roles.question = Some(0);
    }

    roles
}
