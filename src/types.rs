//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveDateTime;

/// セルの値を表す列挙型
///
/// calamineの`Data`から変換され、`CellFormatter`で文字列化されます。
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellValue {
    /// 整数
    Int(i64),

    /// 数値（f64）
    Number(f64),

    /// 文字列
    String(String),

    /// 論理値
    Bool(bool),

    /// 日時
    DateTime(NaiveDateTime),

    /// エラー値（例: #DIV/0!）
    Error(String),

    /// 空セル
    Empty,
}

/// 1行分のセル値
///
/// セルは列順に並び、空セルは`None`として保持します。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: Vec<Option<String>>,
}

impl Row {
    /// セル値のリストから行を生成
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// 列インデックスでセル値を取得（範囲外・空セルは`None`）
    pub fn get(&self, col: usize) -> Option<&str> {
        self.cells.get(col).and_then(|cell| cell.as_deref())
    }

    /// セル数
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// セルが1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<S: Into<String>> FromIterator<Option<S>> for Row {
    fn from_iter<I: IntoIterator<Item = Option<S>>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|cell| cell.map(Into::into)).collect())
    }
}

/// ワークブック内の1シート
///
/// ヘッダー行を列名として、それ以降の行をデータ行として保持します。
/// `rows`の並びは元のシートの行順で、空行も含みます。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    /// シート名
    pub name: String,

    /// 列名（シート内で一意）
    pub columns: Vec<String>,

    /// データ行（ヘッダー行を除く）
    pub rows: Vec<Row>,
}

impl Sheet {
    /// 新しいシートを生成
    pub fn new(name: impl Into<String>, columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }
}

/// ロールに割り当てられなかった列の値
///
/// キーはスラッグ化された列名。挿入順を保持し、同じキーへの再挿入は
/// 元の位置のまま値を上書きします。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraFields {
    fields: Vec<(String, String)>,
}

impl ExtraFields {
    /// 空のフィールド集合を生成
    pub fn new() -> Self {
        Self::default()
    }

    /// フィールドを追加（既存キーの場合は値を上書き）
    pub fn insert(&mut self, key: String, value: String) {
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((key, value)),
        }
    }

    /// キーで値を取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 挿入順にイテレート
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// ナレッジベースの1エントリ（スプレッドシートの1行に対応）
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// 実行全体で一意なID（`tmc-question-<sheet>-<row>`）
    pub id: String,

    /// 見出しに使用するタイトル
    pub title: String,

    /// 質問本文（トリムしない）
    pub question: String,

    /// カテゴリ（カテゴリ列がない場合はシート名）
    pub category: String,

    /// セクション（セクション列がない場合は`General`）
    pub section: String,

    /// 所属シート名
    pub sheet: String,

    /// 元のシート内での行番号（1始まり、スキップされた行も数える）
    pub row_num: usize,

    /// エントリ種別（常に`knowledge`）
    pub entry_type: String,

    /// 重要度（常に0.85）
    pub importance: f64,

    /// タグ
    pub tags: Vec<String>,

    /// 追加メタデータ
    pub extra: ExtraFields,
}
