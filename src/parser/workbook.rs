//! Workbook Parser
//!
//! calamineのラッパーとして、ワークブックレベルの操作を提供します。

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader, Sheets};
use tracing::{info, warn};

use crate::api::SheetSelector;
use crate::error::KbError;
use crate::formatter::CellFormatter;
use crate::types::{CellValue, Row, Sheet};

/// ワークブックパーサー
///
/// calamineの自動判別でxlsx/xlsm/xlsb/xls/odsのいずれも開けます。
pub(crate) struct WorkbookParser<RS: Read + Seek + Clone> {
    /// calamineのワークブック
    workbook: Sheets<RS>,
    /// セル値の文字列化
    formatter: CellFormatter,
}

impl WorkbookParser<Cursor<Vec<u8>>> {
    /// リーダーの内容をすべてメモリに読み込んでからワークブックを開く
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(WorkbookParser)` - ワークブックの読み込みに成功した場合
    /// * `Err(KbError)` - 読み込みまたは形式判別に失敗した場合
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, KbError> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Self::open(Cursor::new(buffer))
    }
}

impl<RS: Read + Seek + Clone> WorkbookParser<RS> {
    /// ワークブックを開く
    pub fn open(reader: RS) -> Result<Self, KbError> {
        let workbook = open_workbook_auto_from_rs(reader).map_err(KbError::Parse)?;
        Ok(Self {
            workbook,
            formatter: CellFormatter::new(),
        })
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// シート選択方式に基づいてシートを選択
    ///
    /// # 戻り値
    ///
    /// * `Ok(Vec<String>)` - 選択されたシート名のリスト
    /// * `Err(KbError::SheetNotFound)` - 指定されたシート名が存在しない場合
    /// * `Err(KbError::Config)` - インデックスが範囲外の場合
    pub fn select_sheets(&self, selector: &SheetSelector) -> Result<Vec<String>, KbError> {
        let all_sheet_names = self.sheet_names();

        let by_index = |index: usize| -> Result<String, KbError> {
            all_sheet_names.get(index).cloned().ok_or_else(|| {
                KbError::Config(format!(
                    "Sheet index {} is out of range (total: {})",
                    index,
                    all_sheet_names.len()
                ))
            })
        };
        let by_name = |name: &String| -> Result<String, KbError> {
            if all_sheet_names.contains(name) {
                Ok(name.clone())
            } else {
                Err(KbError::SheetNotFound(name.clone()))
            }
        };

        match selector {
            SheetSelector::All => Ok(all_sheet_names.clone()),
            SheetSelector::Index(index) => Ok(vec![by_index(*index)?]),
            SheetSelector::Name(name) => Ok(vec![by_name(name)?]),
            SheetSelector::Indices(indices) => indices.iter().map(|&i| by_index(i)).collect(),
            SheetSelector::Names(names) => names.iter().map(by_name).collect(),
        }
    }

    /// 選択されたシートをすべて読み込む
    pub fn read_sheets(&mut self, selector: &SheetSelector) -> Result<Vec<Sheet>, KbError> {
        let sheet_names = self.select_sheets(selector)?;

        info!("Found {} sheets", sheet_names.len());
        for name in &sheet_names {
            info!("  - {}", name);
        }

        sheet_names
            .iter()
            .map(|name| self.read_sheet(name))
            .collect()
    }

    /// シートを読み込み、先頭行をヘッダーとして`Sheet`を構築する
    ///
    /// 使用範囲の先頭行が列名になり、それ以降の行は空行も含めてデータ行として
    /// 保持されます。空のシートは列・行ともに空の`Sheet`になります。
    pub fn read_sheet(&mut self, sheet_name: &str) -> Result<Sheet, KbError> {
        let range = self
            .workbook
            .worksheet_range(sheet_name)
            .map_err(KbError::Parse)?;

        let mut rows_iter = range.rows();
        let columns = match rows_iter.next() {
            Some(header) => self.column_names(header),
            None => {
                warn!(sheet = sheet_name, "Sheet is empty, skipping");
                return Ok(Sheet::new(sheet_name, Vec::new(), Vec::new()));
            }
        };

        let rows: Vec<Row> = rows_iter
            .map(|row| {
                row.iter()
                    .map(|cell| self.formatter.format(&to_cell_value(cell)))
                    .collect::<Row>()
            })
            .collect();

        info!("Processing sheet: {}", sheet_name);
        info!("  Columns: {:?}", columns);
        info!("  Rows: {}", rows.len());

        Ok(Sheet::new(sheet_name, columns, rows))
    }

    /// ヘッダー行から一意な列名のリストを生成
    ///
    /// 空のヘッダーは`Unnamed: <index>`、重複する名前には`.1`, `.2`, ...を付与します。
    fn column_names(&self, header: &[Data]) -> Vec<String> {
        let raw: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                self.formatter
                    .format(&to_cell_value(cell))
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| format!("Unnamed: {}", idx))
            })
            .collect();

        dedupe_column_names(raw)
    }
}

/// ファイルパスからワークブックを開き、すべてのシートを読み込む
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxkb::load_workbook;
///
/// # fn main() -> Result<(), xlsxkb::KbError> {
/// let sheets = load_workbook("questions.xlsx")?;
/// for sheet in &sheets {
///     println!("{}: {} rows", sheet.name, sheet.rows.len());
/// }
/// # Ok(())
/// # }
/// ```
pub fn load_workbook<P: AsRef<Path>>(path: P) -> Result<Vec<Sheet>, KbError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(KbError::InputNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut parser = WorkbookParser::from_reader(file)?;
    parser.read_sheets(&SheetSelector::All)
}

/// calamineのセルデータを内部表現に変換
fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => CellValue::DateTime(datetime),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
        _ => CellValue::Empty,
    }
}

/// 重複する列名に連番サフィックスを付与して一意にする
fn dedupe_column_names(names: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(names.len());

    for name in names {
        let mut candidate = name.clone();
        while used.contains(&candidate) {
            let counter = counters.entry(name.clone()).or_insert(0);
            *counter += 1;
            candidate = format!("{}.{}", name, counter);
        }
        used.insert(candidate.clone());
        result.push(candidate);
    }

    result
}


// ワークブック全体を通したテストは統合テスト（tests/）で実装します。
