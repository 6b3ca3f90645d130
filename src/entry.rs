//! Entry Builder Module
//!
//! シートの各行からナレッジベースのエントリを構築するモジュール。

use tracing::{debug, info};

use crate::classifier::{classify, ColumnRoles};
use crate::slug::slugify;
use crate::types::{Entry, ExtraFields, Row, Sheet};

/// エントリ種別
pub const ENTRY_TYPE: &str = "knowledge";

/// エントリの重要度
pub const IMPORTANCE: f64 = 0.85;

/// ナレッジベース上のカテゴリ（エントリ自身のカテゴリとは別）
pub const KB_CATEGORY: &str = "tmc-rfp-questions";

/// セクション列がない場合のセクション名
pub const DEFAULT_SECTION: &str = "General";

/// エントリIDの接頭辞
pub const ID_PREFIX: &str = "tmc-question";

/// タイトルの接頭辞
const TITLE_PREFIX: &str = "TMC Question";

/// 全エントリに付与される固定タグ
const BASE_TAGS: [&str; 2] = ["tmc", "rfp-questions"];

/// セルが空とみなされるかを判定する
///
/// 以下のいずれかに該当する場合に`true`を返します。
///
/// - セルが存在しない、または空セル
/// - 前後の空白を除くと空文字列
/// - 前後の空白を除くと`nan`
///
/// 質問行のスキップ判定、カテゴリ・セクションのフォールバック判定、
/// 追加メタデータの採用判定のすべてでこの関数を使用します。
pub fn is_blank_cell(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(text) => {
            let trimmed = text.trim();
            trimmed.is_empty() || trimmed == "nan"
        }
    }
}

/// ロール列のセル値を取得（空セルは`None`）
fn role_value(row: &Row, role: Option<usize>) -> Option<&str> {
    role.and_then(|idx| row.get(idx))
        .filter(|value| !is_blank_cell(Some(*value)))
}

/// 1シート分のエントリを構築する
///
/// 質問セルが空の行はスキップされますが、行番号は元の位置（1始まり）を
/// 維持するため、後続行の`row_num`はずれません。
///
/// # 引数
///
/// * `sheet` - 対象シート
/// * `roles` - `classify`で判定した列ロール
///
/// # 戻り値
///
/// 行順に並んだエントリのリスト
pub fn build_entries(sheet: &Sheet, roles: &ColumnRoles) -> Vec<Entry> {
    let sheet_slug = slugify(&sheet.name);

    sheet
        .rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let row_num = idx + 1;
            let entry = build_entry(sheet, &sheet_slug, roles, row, row_num);
            if entry.is_none() {
                debug!(sheet = %sheet.name, row = row_num, "Skipping row with blank question");
            }
            entry
        })
        .collect()
}

fn build_entry(
    sheet: &Sheet,
    sheet_slug: &str,
    roles: &ColumnRoles,
    row: &Row,
    row_num: usize,
) -> Option<Entry> {
    // 質問列がない（列が0個の）シートでは常に空
    let question = role_value(row, roles.question)?.to_string();

    let category = role_value(row, roles.category)
        .unwrap_or(sheet.name.as_str())
        .to_string();
    let section = role_value(row, roles.section)
        .unwrap_or(DEFAULT_SECTION)
        .to_string();

    let title = if category != sheet.name {
        format!("{}: {} - {}", TITLE_PREFIX, section, category)
    } else {
        format!("{}: {}", TITLE_PREFIX, section)
    };

    let mut tags: Vec<String> = BASE_TAGS.iter().map(|tag| tag.to_string()).collect();
    tags.push(slugify(&category));
    tags.push(sheet_slug.to_string());

    let mut extra = ExtraFields::new();
    for (idx, column) in sheet.columns.iter().enumerate() {
        if roles.is_role(idx) {
            continue;
        }
        if let Some(value) = row.get(idx).filter(|v| !is_blank_cell(Some(*v))) {
            extra.insert(slugify(column), value.trim().to_string());
        }
    }

    Some(Entry {
        id: format!("{}-{}-{}", ID_PREFIX, sheet_slug, row_num),
        title,
        question,
        category,
        section,
        sheet: sheet.name.clone(),
        row_num,
        entry_type: ENTRY_TYPE.to_string(),
        importance: IMPORTANCE,
        tags,
        extra,
    })
}

/// すべてのシートからエントリを抽出する
///
/// シートごとに列ロールを判定し、シート順・行順にエントリを連結します。
pub fn extract_entries(sheets: &[Sheet]) -> Vec<Entry> {
    let mut entries = Vec::new();

    for sheet in sheets {
        let roles = classify(&sheet.columns);
        info!("  Detected - {}", roles.describe(&sheet.columns));

        let sheet_entries = build_entries(sheet, &roles);
        info!(
            "  Extracted {} entries from sheet: {}",
            sheet_entries.len(),
            sheet.name
        );
        entries.extend(sheet_entries);
    }

    entries
}
