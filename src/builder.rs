//! Builder Module
//!
//! Fluent Builder APIを提供し、`KnowledgeBaseConverter`インスタンスを段階的に構築する。

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::api::SheetSelector;
use crate::entry::extract_entries;
use crate::error::KbError;
use crate::output::{group_by_sheet, MarkdownRenderer};
use crate::parser::WorkbookParser;
use crate::types::Entry;

/// 変換処理の設定を保持する内部構造体
#[derive(Debug, Clone, Default)]
pub(crate) struct KnowledgeBaseConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// ヘッダーに出力する生成日時（Noneの場合は変換時の現在時刻）
    pub generated_at: Option<NaiveDateTime>,
}

/// 変換結果の概要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    /// 出力したエントリ数
    pub entries: usize,

    /// エントリを含むシート数
    pub sheets: usize,

    /// 出力先ファイル（ライターへの出力時は`None`）
    pub output: Option<PathBuf>,
}

/// Fluent Builder APIを提供する構造体
///
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxkb::{KnowledgeBaseBuilder, SheetSelector};
///
/// # fn main() -> Result<(), xlsxkb::KbError> {
/// let converter = KnowledgeBaseBuilder::new()
///     .with_sheet_selector(SheetSelector::Name("Pricing".to_string()))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    /// 内部設定（構築中）
    config: KnowledgeBaseConfig,
}

impl KnowledgeBaseBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - 生成日時: 変換時の現在時刻
    pub fn new() -> Self {
        Self::default()
    }

    /// 処理対象のシートを選択する
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// ヘッダーに出力する生成日時を固定する
    ///
    /// 出力を再現可能にしたい場合（テストなど）に使用します。
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use xlsxkb::KnowledgeBaseBuilder;
    ///
    /// let generated_at = NaiveDate::from_ymd_opt(2025, 1, 1)
    ///     .and_then(|d| d.and_hms_opt(0, 0, 0))
    ///     .unwrap();
    /// let builder = KnowledgeBaseBuilder::new().with_generated_at(generated_at);
    /// ```
    pub fn with_generated_at(mut self, generated_at: NaiveDateTime) -> Self {
        self.config.generated_at = Some(generated_at);
        self
    }

    /// 設定を検証し、`KnowledgeBaseConverter`インスタンスを構築する
    ///
    /// # 戻り値
    ///
    /// * `Ok(KnowledgeBaseConverter)` - 設定が有効な場合
    /// * `Err(KbError::Config)` - 複数指定のシート選択が空の場合
    pub fn build(self) -> Result<KnowledgeBaseConverter, KbError> {
        match &self.config.sheet_selector {
            SheetSelector::Indices(indices) if indices.is_empty() => {
                return Err(KbError::Config(
                    "Sheet selection by indices must not be empty".to_string(),
                ));
            }
            SheetSelector::Names(names) if names.is_empty() => {
                return Err(KbError::Config(
                    "Sheet selection by names must not be empty".to_string(),
                ));
            }
            _ => {}
        }

        Ok(KnowledgeBaseConverter::new(self.config))
    }
}

/// 変換処理のファサード
///
/// スプレッドシートを読み込み、エントリを抽出してMarkdownナレッジベースを出力します。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxkb::KnowledgeBaseBuilder;
///
/// # fn main() -> Result<(), xlsxkb::KbError> {
/// let converter = KnowledgeBaseBuilder::new().build()?;
/// let summary = converter.convert_file(
///     "questions.xlsx",
///     "Agent Instructions/TMC Tender Agent-knowledge-base.md",
/// )?;
/// println!("Total entries: {}", summary.entries);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct KnowledgeBaseConverter {
    /// 変換設定
    config: KnowledgeBaseConfig,
}

impl KnowledgeBaseConverter {
    pub(crate) fn new(config: KnowledgeBaseConfig) -> Self {
        Self { config }
    }

    /// スプレッドシートからエントリを抽出する
    ///
    /// # 処理フロー
    ///
    /// 1. 入力をメモリに読み込み、ワークブックを開く
    /// 2. シート選択
    /// 3. 各シートについて列ロールを判定し、エントリを構築
    pub fn extract<R: Read>(&self, input: R) -> Result<Vec<Entry>, KbError> {
        let mut parser = WorkbookParser::from_reader(input)?;
        let sheets = parser.read_sheets(&self.config.sheet_selector)?;
        Ok(extract_entries(&sheets))
    }

    /// スプレッドシートをMarkdownに変換してライターに書き出す
    ///
    /// エントリが1件も抽出できなかった場合は何も書き込まずに
    /// `KbError::NoEntries`を返します。
    pub fn convert<R: Read, W: Write>(
        &self,
        input: R,
        mut output: W,
    ) -> Result<ConversionSummary, KbError> {
        let (markdown, summary) = self.render(input)?;
        output.write_all(markdown.as_bytes())?;
        output.flush()?;
        Ok(summary)
    }

    /// スプレッドシートをMarkdown文字列に変換
    pub fn convert_to_string<R: Read>(&self, input: R) -> Result<String, KbError> {
        let (markdown, _) = self.render(input)?;
        Ok(markdown)
    }

    /// ファイルからファイルへ変換する
    ///
    /// ドキュメント全体をメモリ上で生成してから出力ファイルを作成するため、
    /// 失敗時に既存の出力ファイルが切り詰められることはありません。
    /// 出力先ディレクトリは事前に存在している必要があります。
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<ConversionSummary, KbError> {
        let input = input.as_ref();
        let output = output.as_ref();

        if !input.exists() {
            return Err(KbError::InputNotFound(input.to_path_buf()));
        }
        info!("Processing Excel file: {}", input.display());

        let (markdown, mut summary) = self.render(File::open(input)?)?;
        fs::write(output, markdown)?;

        info!("Generated markdown knowledge base: {}", output.display());
        summary.output = Some(output.to_path_buf());
        Ok(summary)
    }

    fn render<R: Read>(&self, input: R) -> Result<(String, ConversionSummary), KbError> {
        let entries = self.extract(input)?;
        if entries.is_empty() {
            return Err(KbError::NoEntries);
        }

        let generated_at = self
            .config
            .generated_at
            .unwrap_or_else(|| Local::now().naive_local());
        let markdown = MarkdownRenderer::new(generated_at).render_to_string(&entries)?;

        let summary = ConversionSummary {
            entries: entries.len(),
            sheets: group_by_sheet(&entries).len(),
            output: None,
        };
        Ok((markdown, summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_builder_defaults() {
        let builder = KnowledgeBaseBuilder::new();
        assert_eq!(builder.config.sheet_selector, SheetSelector::All);
        assert!(builder.config.generated_at.is_none());
    }

    #[test]
    fn test_with_sheet_selector() {
        let builder =
            KnowledgeBaseBuilder::new().with_sheet_selector(SheetSelector::Index(1));
        assert_eq!(builder.config.sheet_selector, SheetSelector::Index(1));
    }

    #[test]
    fn test_build_success() {
        assert!(KnowledgeBaseBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_with_empty_indices() {
        let result = KnowledgeBaseBuilder::new()
            .with_sheet_selector(SheetSelector::Indices(vec![]))
            .build();
        assert!(matches!(result, Err(KbError::Config(_))));
    }

    #[test]
    fn test_build_with_empty_names() {
        let result = KnowledgeBaseBuilder::new()
            .with_sheet_selector(SheetSelector::Names(vec![]))
            .build();
        assert!(matches!(result, Err(KbError::Config(_))));
    }

    #[test]
    fn test_convert_invalid_input() {
        let converter = KnowledgeBaseBuilder::new().build().unwrap();
        let result = converter.convert_to_string(Cursor::new(b"not a spreadsheet".to_vec()));
        assert!(matches!(result, Err(KbError::Parse(_))));
    }

    #[test]
    fn test_convert_file_missing_input() {
        let converter = KnowledgeBaseBuilder::new().build().unwrap();
        let result = converter.convert_file("definitely/missing.xlsx", "out.md");
        assert!(matches!(result, Err(KbError::InputNotFound(_))));
    }
}
