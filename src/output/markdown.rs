//! Markdown Renderer
//!
//! ヘッダーブロック、シートごとのグループ見出し、エントリごとのセクション
//! （JSONメタデータブロックを含む）を出力します。

use std::io::Write;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::entry::KB_CATEGORY;
use crate::error::KbError;
use crate::slug::humanize_key;
use crate::types::Entry;

/// ドキュメントのタイトル
const DOCUMENT_TITLE: &str = "TMC Tender Agent Knowledge Base";

/// ヘッダーの説明文
const DESCRIPTION_LINES: [&str; 2] = [
    "This knowledge base contains TMC RFP questions and evaluation criteria extracted from the Master RFP Question List.",
    "Access these via `search_memories()` using the knowledge IDs listed below.",
];

/// 生成日時の出力形式
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// エントリに埋め込むJSONメタデータ
///
/// フィールドの宣言順がそのままJSONのキー順になります。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryMetadata<'a> {
    pub knowledge_id: &'a str,
    /// 常に`tmc-rfp-questions`（エントリ自身のカテゴリではない）
    pub category: &'a str,
    pub section: &'a str,
    pub sheet: &'a str,
    pub importance: f64,
    pub tags: &'a [String],
}

impl<'a> From<&'a Entry> for EntryMetadata<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            knowledge_id: &entry.id,
            category: KB_CATEGORY,
            section: &entry.section,
            sheet: &entry.sheet,
            importance: entry.importance,
            tags: &entry.tags,
        }
    }
}

/// エントリをシートごとにグループ化する
///
/// グループは最初に出現した順、グループ内のエントリは入力順に並びます。
pub fn group_by_sheet(entries: &[Entry]) -> Vec<(&str, Vec<&Entry>)> {
    let mut groups: Vec<(&str, Vec<&Entry>)> = Vec::new();

    for entry in entries {
        match groups.iter_mut().find(|(sheet, _)| *sheet == entry.sheet) {
            Some((_, group)) => group.push(entry),
            None => groups.push((entry.sheet.as_str(), vec![entry])),
        }
    }

    groups
}

/// ナレッジベースMarkdownのレンダラー
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    /// ヘッダーに出力する生成日時
    generated_at: NaiveDateTime,
}

impl MarkdownRenderer {
    /// 生成日時を指定してレンダラーを生成
    pub fn new(generated_at: NaiveDateTime) -> Self {
        Self { generated_at }
    }

    /// エントリのリストをMarkdownとして書き出す
    ///
    /// # 引数
    ///
    /// * `entries` - シート順・行順に並んだエントリ
    /// * `writer` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(KbError)` - 書き込みまたはJSONシリアライズに失敗した場合
    pub fn render<W: Write>(&self, entries: &[Entry], writer: &mut W) -> Result<(), KbError> {
        self.write_header(entries.len(), writer)?;

        for (sheet, group) in group_by_sheet(entries) {
            writeln!(writer, "# {} Questions\n", sheet)?;
            for entry in group {
                self.write_entry(entry, writer)?;
            }
        }

        Ok(())
    }

    /// エントリのリストをMarkdown文字列に変換
    pub fn render_to_string(&self, entries: &[Entry]) -> Result<String, KbError> {
        let mut buffer = Vec::new();
        self.render(entries, &mut buffer)?;

        String::from_utf8(buffer)
            .map_err(|e| KbError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    fn write_header<W: Write>(&self, total: usize, writer: &mut W) -> Result<(), KbError> {
        writeln!(writer, "# {}\n", DOCUMENT_TITLE)?;
        writeln!(writer, "{}", DESCRIPTION_LINES[0])?;
        writeln!(writer, "{}\n", DESCRIPTION_LINES[1])?;
        writeln!(
            writer,
            "**Generated:** {}",
            self.generated_at.format(TIMESTAMP_FORMAT)
        )?;
        writeln!(writer, "**Total Entries:** {}\n", total)?;
        writeln!(writer, "---\n")?;
        Ok(())
    }

    fn write_entry<W: Write>(&self, entry: &Entry, writer: &mut W) -> Result<(), KbError> {
        writeln!(writer, "## {}\n", entry.title)?;
        writeln!(writer, "### ID: {}", entry.id)?;
        writeln!(writer, "### Type: {}", entry.entry_type)?;
        writeln!(writer, "### Importance: {}", entry.importance)?;
        writeln!(writer, "### Category: {}\n", KB_CATEGORY)?;

        writeln!(writer, "**Content:**\n")?;
        writeln!(writer, "**Question:** {}\n", entry.question)?;

        if entry.category != entry.sheet {
            writeln!(writer, "**Category:** {}\n", entry.category)?;
        }
        writeln!(writer, "**Section:** {}\n", entry.section)?;

        if !entry.extra.is_empty() {
            writeln!(writer, "**Additional Information:**\n")?;
            for (key, value) in entry.extra.iter() {
                writeln!(writer, "- **{}:** {}", humanize_key(key), value)?;
            }
            writeln!(writer)?;
        }

        let metadata = serde_json::to_string_pretty(&EntryMetadata::from(entry))?;
        writeln!(writer, "**Metadata:**")?;
        writeln!(writer, "```json")?;
        writeln!(writer, "{}", metadata)?;
        writeln!(writer, "```\n")?;

        writeln!(writer, "---\n")?;
        Ok(())
    }
}
