use chrono::NaiveDate;
use khata::core::*;
use rust_decimal_macros::dec;

fn main() {
    let settings = company_settings();
    let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let mut numbers = settings.sequence_for(VoucherKind::Purchase, date);

    // Goods bought from a Karnataka supplier by a Maharashtra company
    let supplier_state = StateCode::new("29").unwrap();
    let voucher = VoucherBuilder::from_settings(&settings, date)
        .number(numbers.next_number())
        .party("SUP-042", supplier_state)
        .add_line(
            LineBuilder::new("RAW-7", dec!(100), Money::from_minor(1_250))
                .description("Copper wire, 1.5mm")
                .tax_rate_percent(dec!(18))
                .build_purchase(),
        )
        .add_line(
            LineBuilder::new("PKG-2", dec!(40), Money::from_minor(899))
                .description("Cartons")
                .discount_percent(dec!(5))
                .tax_rate_percent(dec!(12))
                .build_purchase(),
        )
        .other_charges(Money::from_rupees(150))
        .build()
        .expect("voucher should be valid");

    let computed = voucher.compute().expect("totals should compute");
    let totals = &computed.totals;

    println!("Voucher:  {}", voucher.number.as_deref().unwrap_or("-"));
    println!("Date:     {}", voucher.date);
    println!(
        "Supplier: {} ({})",
        voucher.party_ref,
        voucher.party_state.name()
    );
    println!("Supply:   {:?}", computed.locality);
    println!("---");
    for (line, computed_line) in voucher.lines.iter().zip(&computed.lines) {
        let amounts = &computed_line.amounts;
        println!(
            "  {} x {} @ {} less {} = {} + {} tax = {}",
            line.quantity,
            line.description,
            line.purchase_rate,
            amounts.discount,
            amounts.net,
            amounts.tax,
            amounts.gross
        );
    }
    println!("---");
    for rate in &totals.breakdown {
        println!(
            "  {}%: taxable {} tax {}",
            rate.tax_rate_percent, rate.taxable_amount, rate.tax_amount
        );
    }
    println!("Subtotal: {}", totals.subtotal);
    println!("CGST:     {}", totals.tax_split.cgst);
    println!("SGST:     {}", totals.tax_split.sgst);
    println!("IGST:     {}", totals.tax_split.igst);
    println!("Charges:  {}", totals.other_charges);
    println!("Round:    {}", totals.round_off);
    println!("Total:    {}", totals.grand_total);
}

fn company_settings() -> VoucherSettings {
    let mut settings = VoucherSettings::new(StateCode::new("27").unwrap());
    settings.auto_round_off = true;
    settings
}
