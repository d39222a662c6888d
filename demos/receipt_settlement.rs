use chrono::NaiveDate;
use khata::core::Money;
use khata::display::format_inr;
use khata::settlement::*;

fn main() {
    let invoices = vec![
        OutstandingInvoice::new("SAL/2024-25/0007", Money::from_rupees(300), Money::ZERO)
            .with_date(NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()),
        OutstandingInvoice::new(
            "SAL/2024-25/0009",
            Money::from_rupees(350),
            Money::from_rupees(150),
        )
        .with_date(NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()),
        OutstandingInvoice::new("SAL/2024-25/0012", Money::from_minor(84_950), Money::ZERO),
    ];

    let mut draft = SettlementDraft::new(
        SettlementKind::Receipt,
        "CUST-001",
        Money::from_rupees(500),
        invoices,
    )
    .expect("outstanding invoices should be consistent");

    draft.toggle("SAL/2024-25/0007").unwrap();
    draft.toggle("SAL/2024-25/0009").unwrap();
    draft
        .set_adjusted_amount("SAL/2024-25/0009", Money::from_rupees(150))
        .unwrap();

    print_draft(&draft);
    match draft.commit() {
        Ok(_) => println!("committed"),
        Err(err) => println!("not committed: {err}"),
    }

    // Put the remaining 50.00 against the second invoice
    draft
        .set_adjusted_amount("SAL/2024-25/0009", Money::from_rupees(200))
        .unwrap();
    print_draft(&draft);

    let batch = draft.commit().expect("allocation should balance");
    println!("---");
    println!(
        "Receipt of {} from {}",
        format_inr(batch.tendered_amount()),
        batch.party_ref()
    );
    for adj in batch.adjustments() {
        println!(
            "  {:<18} {:>12} of {:>12}",
            adj.invoice_ref,
            format_inr(adj.adjusted_amount),
            format_inr(adj.invoice_amount)
        );
    }
}

fn print_draft(draft: &SettlementDraft) {
    println!("---");
    for (invoice, selection) in draft.candidates() {
        let applied = match selection {
            Selection::Selected { adjusted } => format_inr(adjusted),
            Selection::NotSelected => "-".into(),
        };
        println!(
            "  {:<18} balance {:>12}  applied {:>12}",
            invoice.invoice_ref,
            format_inr(invoice.balance_amount),
            applied
        );
    }
    if let Ok(left) = draft.unallocated() {
        println!("  unallocated {}", format_inr(left));
    }
}
