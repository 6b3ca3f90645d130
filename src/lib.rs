//! xlsxkb - RFP question spreadsheets to Markdown knowledge base
//!
//! This crate reads a multi-sheet spreadsheet of RFP (Request for Proposal)
//! questions and converts it into a single Markdown knowledge-base document,
//! one entry per row, ready for a downstream ingestion pipeline.
//!
//! Each sheet's columns are classified into `question` / `category` / `section`
//! roles by keyword, every non-blank row becomes an [`Entry`] with a slugified
//! ID and tags, and all entries are rendered grouped by sheet with an embedded
//! JSON metadata block.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use xlsxkb::KnowledgeBaseBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = KnowledgeBaseBuilder::new().build()?;
//!
//!     let summary = converter.convert_file(
//!         "Resources/Master_RFP_Question_List.xlsx",
//!         "Agent Instructions/TMC Tender Agent-knowledge-base.md",
//!     )?;
//!     println!("{} entries from {} sheets", summary.entries, summary.sheets);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Working with entries directly
//!
//! ```rust
//! use xlsxkb::{build_entries, classify, Row, Sheet};
//!
//! let sheet = Sheet::new(
//!     "Pricing",
//!     vec!["Question".to_string(), "Category".to_string()],
//!     vec![vec![Some("What is your rate card?"), Some("Cost")].into_iter().collect::<Row>()],
//! );
//! let roles = classify(&sheet.columns);
//! let entries = build_entries(&sheet, &roles);
//!
//! assert_eq!(entries[0].id, "tmc-question-pricing-1");
//! assert_eq!(entries[0].title, "TMC Question: General - Cost");
//! ```

mod api;
mod builder;
mod classifier;
mod entry;
mod error;
mod formatter;
mod output;
mod parser;
mod slug;
mod types;

// 公開API
pub use api::SheetSelector;
pub use builder::{ConversionSummary, KnowledgeBaseBuilder, KnowledgeBaseConverter};
pub use classifier::{classify, ColumnRoles};
pub use entry::{
    build_entries, extract_entries, is_blank_cell, DEFAULT_SECTION, ENTRY_TYPE, ID_PREFIX,
    IMPORTANCE, KB_CATEGORY,
};
pub use error::KbError;
pub use output::{group_by_sheet, EntryMetadata, MarkdownRenderer};
pub use parser::load_workbook;
pub use slug::{humanize_key, slugify};
pub use types::{Entry, ExtraFields, Row, Sheet};
