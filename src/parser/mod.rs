//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込みの実装。
//! 各シートをヘッダー行（列名）とデータ行のリストとして取り出します。

mod workbook;

pub use workbook::load_workbook;
pub(crate) use workbook::WorkbookParser;
