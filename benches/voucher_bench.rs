use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use khata::core::*;
use khata::settlement::*;

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn build_voucher(lines: usize, party_state: &str) -> SalesVoucher {
    let mut builder = VoucherBuilder::new(test_date(), StateCode::new("27").unwrap())
        .number("SAL/2024-25/0001")
        .party("CUST-001", StateCode::new(party_state).unwrap())
        .round_to_nearest_rupee();

    let rates = [dec!(5), dec!(12), dec!(18), dec!(28)];
    for i in 1..=lines {
        builder = builder.add_line(
            LineBuilder::new(format!("SKU-{i}"), dec!(3), Money::from_minor(9_999))
                .discount_percent(dec!(2.5))
                .tax_rate_percent(rates[i % rates.len()])
                .build_sales(),
        );
    }

    builder.build().unwrap()
}

fn build_draft(invoices: usize) -> SettlementDraft {
    let outstanding = (1..=invoices)
        .map(|n| {
            OutstandingInvoice::new(
                format!("SAL/2024-25/{n:04}"),
                Money::from_rupees(1_000),
                Money::from_rupees(250),
            )
        })
        .collect();
    let tendered = Money::from_rupees(750 * invoices as i64);
    SettlementDraft::new(SettlementKind::Receipt, "CUST-001", tendered, outstanding).unwrap()
}

fn bench_calculate_line(c: &mut Criterion) {
    let line = LineBuilder::new("SKU", dec!(2), Money::from_rupees(590))
        .discount_percent(dec!(10))
        .tax_rate_percent(dec!(18))
        .build_sales();
    c.bench_function("calculate_line_exclusive", |b| {
        b.iter(|| black_box(calculate_line(black_box(&line), false)));
    });
    c.bench_function("calculate_line_inclusive", |b| {
        b.iter(|| black_box(calculate_line(black_box(&line), true)));
    });
}

fn bench_compute_voucher(c: &mut Criterion) {
    let intrastate = build_voucher(10, "27");
    c.bench_function("compute_voucher_10_lines", |b| {
        b.iter(|| black_box(black_box(&intrastate).compute()));
    });

    let interstate = build_voucher(1000, "29");
    c.bench_function("compute_voucher_1000_lines", |b| {
        b.iter(|| black_box(black_box(&interstate).compute()));
    });
}

fn bench_validate_voucher(c: &mut Criterion) {
    let voucher = build_voucher(100, "27");
    c.bench_function("validate_voucher_100_lines", |b| {
        b.iter(|| black_box(validate_voucher(black_box(&voucher))));
    });
}

fn bench_settlement_commit(c: &mut Criterion) {
    c.bench_function("settlement_select_commit_100_invoices", |b| {
        b.iter_with_setup(
            || build_draft(100),
            |mut draft| {
                for n in 1..=100 {
                    draft.toggle(&format!("SAL/2024-25/{n:04}")).unwrap();
                }
                black_box(draft.commit())
            },
        );
    });
}

criterion_group!(
    benches,
    bench_calculate_line,
    bench_compute_voucher,
    bench_validate_voucher,
    bench_settlement_commit,
);
criterion_main!(benches);
