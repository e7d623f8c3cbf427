use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use invoice_core::{
    calculator::compute_preview, DiscountSpec, ExportGate, FormEditor, FormState, LineItem,
};

fn build_sample_form(row_count: usize) -> FormState {
    let mut form = FormState::with_customer("Benchmark Customer", "555-0100");
    for idx in 0..row_count {
        if idx % 4 == 0 {
            form.push(LineItem::charge(
                format!("Charge {idx}"),
                (10 + idx % 90).to_string(),
            ));
        } else {
            // Every seventh row carries an invalid rate.
            let rate = if idx % 7 == 0 {
                "0".to_string()
            } else {
                (100 + idx % 500).to_string()
            };
            form.push(LineItem::item(
                format!("Item {idx}"),
                (1 + idx % 12).to_string(),
                rate,
            ));
        }
    }
    form.discount = DiscountSpec::percent("15");
    form
}

fn bench_preview(c: &mut Criterion) {
    let form = build_sample_form(black_box(1_000));
    let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

    c.bench_function("preview_1k_rows", |b| {
        b.iter(|| {
            let preview = compute_preview(&form, date);
            black_box(preview);
        })
    });

    let gate = ExportGate::default();
    c.bench_function("export_gate_1k_rows", |b| {
        b.iter(|| {
            let plan = gate.prepare(&form, date).expect("export plan");
            black_box(plan);
        })
    });
}

fn bench_editing(c: &mut Criterion) {
    c.bench_function("editor_fill_100_rows", |b| {
        b.iter(|| {
            let mut editor = FormEditor::new();
            for idx in 0..100 {
                let id = editor.add_item();
                editor.set_description(id, "widget").expect("row");
                editor
                    .set_numeric(id, invoice_core::form::NumericField::Rate, &idx.to_string())
                    .expect("row");
            }
            black_box(editor.into_form());
        })
    });
}

criterion_group!(benches, bench_preview, bench_editing);
criterion_main!(benches);
