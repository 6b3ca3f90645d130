//! パフォーマンスベンチマーク
//!
//! 実装するベンチマーク:
//! - ワークブック全体の変換（読み込み → エントリ抽出 → Markdown出力）
//! - メモリ上のシートからのエントリ構築のみ

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_xlsxwriter::{Workbook, XlsxError};
use std::io::Cursor;
use xlsxkb::{build_entries, classify, KnowledgeBaseBuilder, Row, Sheet};

const SHEETS: usize = 5;
const ROWS_PER_SHEET: u32 = 1_000;

/// ベンチマーク用のワークブックを生成
fn generate_workbook() -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();

    for sheet_idx in 0..SHEETS {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&format!("Section {}", sheet_idx + 1))?;
        worksheet.write_string(0, 0, "Category")?;
        worksheet.write_string(0, 1, "Question")?;
        worksheet.write_string(0, 2, "Weight")?;
        worksheet.write_string(0, 3, "Notes")?;

        for row in 1..=ROWS_PER_SHEET {
            worksheet.write_string(row, 0, &format!("Category {}", row % 7))?;
            worksheet.write_string(row, 1, &format!("Describe capability number {}?", row))?;
            worksheet.write_number(row, 2, f64::from(row % 10))?;
            if row % 3 == 0 {
                worksheet.write_string(row, 3, "Mandatory")?;
            }
        }
    }

    workbook.save_to_buffer()
}

/// メモリ上のシートを生成
fn generate_sheet() -> Sheet {
    let columns = vec![
        "Category".to_string(),
        "Question".to_string(),
        "Weight".to_string(),
        "Notes".to_string(),
    ];
    let rows = (1..=ROWS_PER_SHEET)
        .map(|row| {
            vec![
                Some(format!("Category {}", row % 7)),
                Some(format!("Describe capability number {}?", row)),
                Some((row % 10).to_string()),
                (row % 3 == 0).then(|| "Mandatory".to_string()),
            ]
            .into_iter()
            .collect::<Row>()
        })
        .collect();
    Sheet::new("Section 1", columns, rows)
}

fn benchmark_convert_workbook(c: &mut Criterion) {
    let data = generate_workbook().expect("failed to generate benchmark workbook");
    let converter = KnowledgeBaseBuilder::new().build().unwrap();

    let mut group = c.benchmark_group("convert_workbook");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    group.bench_function("convert_5x1000_rows", |b| {
        b.iter(|| {
            let input = Cursor::new(black_box(&data));
            let mut output = Vec::new();
            converter
                .convert(black_box(input), black_box(&mut output))
                .unwrap();
            black_box(output)
        });
    });

    group.finish();
}

fn benchmark_build_entries(c: &mut Criterion) {
    let sheet = generate_sheet();
    let roles = classify(&sheet.columns);

    let mut group = c.benchmark_group("build_entries");
    group.throughput(Throughput::Elements(u64::from(ROWS_PER_SHEET)));

    group.bench_function("build_1000_entries", |b| {
        b.iter(|| black_box(build_entries(black_box(&sheet), black_box(&roles))));
    });

    group.finish();
}

criterion_group!(benches, benchmark_convert_workbook, benchmark_build_entries);
criterion_main!(benches);
