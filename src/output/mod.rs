//! Output Module
//!
//! エントリのリストをナレッジベース形式のMarkdownとして出力するモジュール。

mod markdown;

pub use markdown::{group_by_sheet, EntryMetadata, MarkdownRenderer};
