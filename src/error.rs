//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use std::path::PathBuf;

use thiserror::Error;

/// xlsxkbクレート全体で使用するエラー型
///
/// スプレッドシートの読み込み、エントリ抽出、Markdown出力中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー（出力ファイルの書き込み失敗など）
/// - `Parse`: スプレッドシートの解析中に発生したエラー（calamine由来）
/// - `Json`: メタデータブロックのシリアライズに失敗したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `InputNotFound`: 入力ファイルが存在しない
/// - `SheetNotFound`: 指定されたシートがワークブックに存在しない
/// - `NoEntries`: どのシートからもエントリが抽出できなかった
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxkb::KbError;
/// use std::fs::File;
///
/// fn open_input(path: &str) -> Result<File, KbError> {
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     Ok(file)
/// }
/// ```
#[derive(Error, Debug)]
pub enum KbError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// ファイル形式が不正、破損したファイル、サポートされていない形式などが
    /// 原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// JSONメタデータのシリアライズエラー
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `KnowledgeBaseBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力ファイルが見つからない
    #[error("File not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 指定されたシートが見つからない
    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    /// 抽出されたエントリが0件
    #[error("No entries found in spreadsheet")]
    NoEntries,
}
