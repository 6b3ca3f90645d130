//! Formatter Module
//!
//! セル値を文字列に変換する処理を提供するモジュール。
//! ヘッダーセルとデータセルの両方で同じ変換規則を使用します。

use chrono::{NaiveDateTime, Timelike};

use crate::types::CellValue;

/// 日時の出力形式
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 日付のみ（時刻が0:00:00）の出力形式
const DATE_FORMAT: &str = "%Y-%m-%d";

/// セルフォーマッター
///
/// セル値の文字列化のファサードとして機能します。
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct CellFormatter;

impl CellFormatter {
    /// 新しいCellFormatterインスタンスを生成
    pub fn new() -> Self {
        Self
    }

    /// セル値をフォーマット
    ///
    /// # 戻り値
    ///
    /// * `Some(String)` - フォーマット済み文字列
    /// * `None` - 空セルの場合
    pub fn format(&self, value: &CellValue) -> Option<String> {
        match value {
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Number(n) => Some(self.format_number(*n)),
            CellValue::String(s) => Some(s.clone()),
            CellValue::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
            CellValue::DateTime(dt) => Some(self.format_datetime(dt)),
            CellValue::Error(e) => Some(e.clone()),
            CellValue::Empty => None,
        }
    }

    /// 数値をフォーマット
    ///
    /// 整数値の場合は小数点以下を出力しません（`2.0` → `2`）。
    fn format_number(&self, value: f64) -> String {
        if value.is_nan() {
            return "nan".to_string();
        }
        value.to_string()
    }

    fn format_datetime(&self, value: &NaiveDateTime) -> String {
        if value.num_seconds_from_midnight() == 0 {
            value.format(DATE_FORMAT).to_string()
        } else {
            value.format(DATETIME_FORMAT).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_format_empty() {
        let formatter = CellFormatter::new();
        assert_eq!(formatter.format(&CellValue::Empty), None);
    }

    #[test]
    fn test_format_string_untouched() {
        let formatter = CellFormatter::new();
        assert_eq!(
            formatter.format(&CellValue::String("  padded  ".to_string())),
            Some("  padded  ".to_string())
        );
    }

    #[test]
    fn test_format_numbers() {
        let formatter = CellFormatter::new();
        assert_eq!(formatter.format(&CellValue::Int(42)), Some("42".to_string()));
        assert_eq!(
            formatter.format(&CellValue::Number(2.0)),
            Some("2".to_string())
        );
        assert_eq!(
            formatter.format(&CellValue::Number(0.85)),
            Some("0.85".to_string())
        );
        assert_eq!(
            formatter.format(&CellValue::Number(f64::NAN)),
            Some("nan".to_string())
        );
    }

    #[test]
    fn test_format_bool() {
        let formatter = CellFormatter::new();
        assert_eq!(
            formatter.format(&CellValue::Bool(true)),
            Some("TRUE".to_string())
        );
        assert_eq!(
            formatter.format(&CellValue::Bool(false)),
            Some("FALSE".to_string())
        );
    }

    #[test]
    fn test_format_datetime() {
        let formatter = CellFormatter::new();
        assert_eq!(
            formatter.format(&CellValue::DateTime(datetime(2025, 3, 14, 0, 0, 0))),
            Some("2025-03-14".to_string())
        );
        assert_eq!(
            formatter.format(&CellValue::DateTime(datetime(2025, 3, 14, 9, 30, 5))),
            Some("2025-03-14 09:30:05".to_string())
        );
    }

    #[test]
    fn test_format_error_value() {
        let formatter = CellFormatter::new();
        assert_eq!(
            formatter.format(&CellValue::Error("#DIV/0!".to_string())),
            Some("#DIV/0!".to_string())
        );
    }
}
