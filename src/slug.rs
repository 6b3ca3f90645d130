//! Slug Module
//!
//! ID・タグ・追加メタデータのキーに使用するスラッグ生成と、
//! スラッグを見出し用の表記に戻すユーティリティ。

use std::sync::LazyLock;

use regex::Regex;

/// 英数字・アンダースコア・空白・ハイフン以外の文字
static DISALLOWED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-z0-9_\s-]").expect("static slug pattern must compile")
});

/// 空白・アンダースコア・ハイフンの連続
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("static slug pattern must compile"));

/// 任意の文字列をスラッグに変換する
///
/// 1. 小文字化
/// 2. 英数字・空白・ハイフン以外を削除
/// 3. 空白・アンダースコア・ハイフンの連続を1つのハイフンに置換
/// 4. 先頭・末尾のハイフンを除去
///
/// 結果は`[a-z0-9-]`のみで構成され、空文字列を含むすべての入力に対して
/// 失敗しません。`slugify(slugify(x)) == slugify(x)`が成り立ちます。
///
/// # 使用例
///
/// ```rust
/// use xlsxkb::slugify;
///
/// assert_eq!(slugify("Travel Policy & Compliance"), "travel-policy-compliance");
/// assert_eq!(slugify("  Cost_Center  "), "cost-center");
/// assert_eq!(slugify(""), "");
/// ```
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = DISALLOWED.replace_all(&lowered, "");
    let collapsed = SEPARATORS.replace_all(&stripped, "-");
    collapsed.trim_matches('-').to_string()
}

/// スラッグ化されたキーを見出し用の表記に変換する
///
/// ハイフンを空白に置き換え、各単語の先頭文字を大文字、それ以外を小文字にします。
/// 英字以外の文字の直後の英字は単語の先頭として扱います（`1st` → `1St`）。
pub fn humanize_key(key: &str) -> String {
    let mut result = String::with_capacity(key.len());
    let mut prev_cased = false;

    for ch in key.chars() {
        let ch = if ch == '-' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_cased {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            prev_cased = true;
        } else {
            result.push(ch);
            prev_cased = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Pricing"), "pricing");
        assert_eq!(slugify("Cost"), "cost");
        assert_eq!(slugify("Account Management"), "account-management");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Q&A (Round 1)"), "qa-round-1");
        assert_eq!(slugify("Duty of Care / Safety"), "duty-of-care-safety");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a__b--c  d"), "a-b-c-d");
        assert_eq!(slugify("-leading and trailing-"), "leading-and-trailing");
        assert_eq!(slugify("tab\tseparated\nvalue"), "tab-separated-value");
    }

    #[test]
    fn test_slugify_empty_and_symbols_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(" - _ "), "");
    }

    #[test]
    fn test_slugify_drops_non_ascii_letters() {
        assert_eq!(slugify("Café Menu"), "caf-menu");
        assert_eq!(slugify("出張 Policy"), "policy");
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("vendor-response"), "Vendor Response");
        assert_eq!(humanize_key("notes"), "Notes");
        assert_eq!(humanize_key("score-weight-pct"), "Score Weight Pct");
    }

    #[test]
    fn test_humanize_key_after_digits() {
        assert_eq!(humanize_key("1st-round"), "1St Round");
        assert_eq!(humanize_key("q2"), "Q2");
    }

    proptest! {
        #[test]
        fn prop_slugify_idempotent(text in ".*") {
            let once = slugify(&text);
            prop_assert_eq!(slugify(&once), once);
        }

        #[test]
        fn prop_slugify_alphabet(text in ".*") {
            let slug = slugify(&text);
            prop_assert!(!slug.starts_with('-'));
            prop_assert!(!slug.ends_with('-'));
            prop_assert!(!slug.contains("--"));
            prop_assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}
