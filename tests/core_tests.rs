use chrono::NaiveDate;
use khata::core::*;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn maharashtra() -> StateCode {
    StateCode::new("27").unwrap()
}

fn karnataka() -> StateCode {
    StateCode::new("29").unwrap()
}

fn scenario_line(rate_rupees: i64) -> SalesLine {
    LineBuilder::new("SKU-100", dec!(2), Money::from_rupees(rate_rupees))
        .description("Steel water bottle")
        .discount_percent(dec!(10))
        .tax_rate_percent(dec!(18))
        .build_sales()
}

// --- Line calculator ---

#[test]
fn exclusive_line_scenario() {
    let amounts = calculate_line(&scenario_line(500), false).unwrap();
    assert_eq!(amounts.net.to_major(), dec!(900.00));
    assert_eq!(amounts.tax.to_major(), dec!(162.00));
    assert_eq!(amounts.gross.to_major(), dec!(1062.00));
}

#[test]
fn inclusive_line_scenario() {
    // 590.00 inclusive per unit: 2 x 590 less 10% = 1062.00 gross
    let amounts = calculate_line(&scenario_line(590), true).unwrap();
    assert!((amounts.net.minor() - 90_000).abs() <= 1);
    assert_eq!(amounts.tax.to_major(), dec!(162.00));
    assert_eq!(amounts.gross.to_major(), dec!(1062.00));
}

// --- Tax split ---

#[test]
fn intrastate_split_scenario() {
    let split = resolve_tax_split(Money::from_minor(10_100), &maharashtra(), &maharashtra()).unwrap();
    assert_eq!(split.cgst.to_major(), dec!(50.50));
    assert_eq!(split.sgst.to_major(), dec!(50.50));

    let odd = resolve_tax_split(Money::from_minor(10_101), &maharashtra(), &maharashtra()).unwrap();
    assert_eq!(odd.cgst, Money::from_minor(5050));
    assert_eq!(odd.sgst, Money::from_minor(5051));
}

// --- Vouchers ---

#[test]
fn sales_voucher_intrastate() {
    let voucher = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
        .number("SAL/2024-25/0001")
        .party("CUST-001", maharashtra())
        .add_line(scenario_line(500))
        .add_line(
            LineBuilder::new("SKU-200", dec!(1), Money::from_minor(24_950))
                .tax_rate_percent(dec!(5))
                .build_sales(),
        )
        .other_charges(Money::from_rupees(40))
        .round_off(Money::from_minor(2))
        .build()
        .unwrap();

    let computed = voucher.compute().unwrap();
    let totals = &computed.totals;

    assert_eq!(computed.kind, VoucherKind::Sales);
    assert_eq!(computed.locality, Locality::Intrastate);
    // 900.00 + 249.50
    assert_eq!(totals.subtotal, Money::from_minor(114_950));
    // 162.00 + 12.475 -> 12.48
    assert_eq!(totals.total_tax, Money::from_minor(17_448));
    assert_eq!(totals.tax_split.cgst, Money::from_minor(8_724));
    assert_eq!(totals.tax_split.sgst, Money::from_minor(8_724));
    assert_eq!(totals.tax_split.igst, Money::ZERO);
    // 1149.50 + 174.48 + 40.00 + 0.02
    assert_eq!(totals.grand_total, Money::from_rupees(1_364));
    assert_eq!(totals.breakdown.len(), 2);
}

#[test]
fn purchase_voucher_interstate_uses_supplier_as_seller() {
    let voucher = VoucherBuilder::new(date(2024, 9, 1), maharashtra())
        .party("SUP-042", karnataka())
        .add_line(
            LineBuilder::new("RAW-7", dec!(100), Money::from_minor(1_250))
                .tax_rate_percent(dec!(12))
                .build_purchase(),
        )
        .build()
        .unwrap();

    assert_eq!(voucher.seller_state(), &karnataka());
    assert_eq!(voucher.buyer_state(), &maharashtra());

    let totals = voucher.compute().unwrap().totals;
    assert_eq!(totals.subtotal, Money::from_rupees(1_250));
    assert_eq!(totals.tax_split.igst, Money::from_rupees(150));
    assert_eq!(totals.tax_split.cgst, Money::ZERO);
    assert_eq!(totals.grand_total, Money::from_rupees(1_400));
}

#[test]
fn purchase_and_sales_share_one_calculation() {
    let build = |inclusive: bool| {
        let purchase = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
            .party("P", maharashtra())
            .tax_inclusive(inclusive)
            .add_line(
                LineBuilder::new("X", dec!(3.5), Money::from_minor(7_777))
                    .discount_percent(dec!(7.5))
                    .tax_rate_percent(dec!(28))
                    .build_purchase(),
            )
            .build()
            .unwrap();
        let sales = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
            .party("P", maharashtra())
            .tax_inclusive(inclusive)
            .add_line(
                LineBuilder::new("X", dec!(3.5), Money::from_minor(7_777))
                    .discount_percent(dec!(7.5))
                    .tax_rate_percent(dec!(28))
                    .build_sales(),
            )
            .build()
            .unwrap();
        (purchase.compute().unwrap(), sales.compute().unwrap())
    };

    for inclusive in [false, true] {
        let (p, s) = build(inclusive);
        assert_eq!(p.totals, s.totals);
        assert_eq!(p.lines, s.lines);
    }
}

#[test]
fn recompute_is_idempotent() {
    let voucher = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
        .party("C", karnataka())
        .add_line(scenario_line(333))
        .round_to_nearest_rupee()
        .build()
        .unwrap();
    assert_eq!(voucher.compute().unwrap(), voucher.compute().unwrap());
}

#[test]
fn nearest_rupee_round_off() {
    let voucher = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
        .party("C", maharashtra())
        .add_line(
            LineBuilder::new("A", dec!(1), Money::from_minor(10_099))
                .tax_rate_percent(dec!(18))
                .build_sales(),
        )
        .round_to_nearest_rupee()
        .build()
        .unwrap();
    let totals = voucher.compute().unwrap().totals;
    // 100.99 + 18.18 = 119.17 -> 119.00
    assert_eq!(totals.round_off, Money::from_minor(-17));
    assert_eq!(totals.grand_total, Money::from_rupees(119));
}

#[test]
fn empty_voucher_scenario() {
    let voucher = VoucherBuilder::<SalesLine>::new(date(2024, 6, 15), maharashtra())
        .party("C", maharashtra())
        .build_unchecked()
        .unwrap();
    assert_eq!(voucher.compute().unwrap_err(), KhataError::EmptyVoucher);
}

#[test]
fn bad_line_reports_position() {
    let voucher = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
        .party("C", maharashtra())
        .add_line(scenario_line(500))
        .add_line(
            LineBuilder::new("B", dec!(1), Money::from_rupees(10))
                .tax_rate_percent(dec!(-1))
                .build_sales(),
        )
        .build_unchecked()
        .unwrap();
    match voucher.compute() {
        Err(KhataError::InvalidLineInput { line, field, .. }) => {
            assert_eq!(line, Some(1));
            assert_eq!(field, LineField::TaxRatePercent);
        }
        other => panic!("expected line error, got {other:?}"),
    }
}

#[test]
fn totals_snapshot() {
    let voucher = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
        .party("C", maharashtra())
        .add_line(
            LineBuilder::new("A", dec!(1), Money::from_minor(56_117))
                .tax_rate_percent(dec!(18))
                .build_sales(),
        )
        .build()
        .unwrap();
    let split = voucher.compute().unwrap().totals.tax_split;
    // 561.17 * 18% = 101.0106 -> 101.01
    insta::assert_debug_snapshot!(split, @r"
    TaxSplit {
        cgst: Money(
            5050,
        ),
        sgst: Money(
            5051,
        ),
        igst: Money(
            0,
        ),
    }
    ");
}

#[test]
fn computed_voucher_serializes_for_api_client() {
    let voucher = VoucherBuilder::new(date(2024, 6, 15), maharashtra())
        .party("C", karnataka())
        .add_line(scenario_line(500))
        .build()
        .unwrap();
    let json = serde_json::to_value(voucher.compute().unwrap()).unwrap();
    assert_eq!(json["kind"], "Sales");
    assert_eq!(json["locality"], "Interstate");
    assert_eq!(json["totals"]["grand_total"], 106_200);
    assert_eq!(json["totals"]["tax_split"]["igst"], 16_200);
    assert_eq!(json["lines"][0]["amounts"]["net"], 90_000);
}
