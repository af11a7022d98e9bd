//! Command-line front end for the invoice store.
//!
//! This is the "external caller" of the core: it reads and mutates the
//! file-backed collection and renders derived totals. Rounding to two
//! decimals happens here, at display time, never in the engine.

use anyhow::{bail, Context, Result};

use billcraft_invoicing::{compute_totals, Invoice, InvoiceId};
use billcraft_store::{FileSubstrate, InvoiceStore};

fn main() -> Result<()> {
    billcraft_observability::init();

    // Data directory override for tests/portable setups.
    let substrate = match std::env::var("BILLCRAFT_DATA_DIR") {
        Ok(dir) => FileSubstrate::new(dir),
        Err(_) => FileSubstrate::in_app_data()
            .context("failed to resolve the billcraft data directory")?,
    };
    tracing::debug!(dir = %substrate.dir().display(), "using data directory");
    let mut store = InvoiceStore::new(substrate);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("list") => cmd_list(&store),
        Some("show") => cmd_show(&store, args.get(1).map(String::as_str)),
        Some("next-number") => {
            println!("{}", store.next_invoice_number());
            Ok(())
        }
        Some("delete") => cmd_delete(&mut store, args.get(1).map(String::as_str)),
        Some("clear") => {
            store.clear_all().context("clear failed")?;
            Ok(())
        }
        Some(other) => {
            print_usage();
            bail!("unknown command: {other}");
        }
        None => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    eprintln!("billcraft — local invoice store");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  billcraft list           list stored invoices, newest first");
    eprintln!("  billcraft show <id>      print one invoice with its totals");
    eprintln!("  billcraft next-number    print the next free invoice number");
    eprintln!("  billcraft delete <id>    remove one invoice");
    eprintln!("  billcraft clear          remove all invoices");
}

fn cmd_list(store: &InvoiceStore<FileSubstrate>) -> Result<()> {
    let invoices = store.list_all();
    if invoices.is_empty() {
        println!("no invoices saved yet");
        return Ok(());
    }

    for invoice in &invoices {
        let totals = compute_totals(invoice);
        println!(
            "{}  {}  {}  {}{:.2}  ({})",
            invoice.id,
            invoice.invoice_number,
            invoice.issue_date,
            invoice.currency_symbol,
            totals.total,
            if invoice.to_company.is_empty() {
                "unnamed"
            } else {
                invoice.to_company.as_str()
            },
        );
    }
    Ok(())
}

fn cmd_show(store: &InvoiceStore<FileSubstrate>, id: Option<&str>) -> Result<()> {
    let Some(id) = id else {
        bail!("show requires an invoice id");
    };
    let Some(invoice) = store.get_by_id(&InvoiceId::from(id)) else {
        bail!("no invoice with id {id}");
    };

    print_invoice(&invoice);
    Ok(())
}

fn cmd_delete(store: &mut InvoiceStore<FileSubstrate>, id: Option<&str>) -> Result<()> {
    let Some(id) = id else {
        bail!("delete requires an invoice id");
    };
    store
        .delete_by_id(&InvoiceId::from(id))
        .context("delete failed")?;
    Ok(())
}

fn print_invoice(invoice: &Invoice) {
    let totals = compute_totals(invoice);
    let symbol = &invoice.currency_symbol;

    println!("{}  ({})", invoice.invoice_number, invoice.id);
    println!("issued {}  due {}", invoice.issue_date, invoice.due_date);
    println!("from:  {}", invoice.from_company);
    println!("to:    {}", invoice.to_company);
    println!();
    for item in &invoice.items {
        println!(
            "  {:<40} {:>8} x {}{:<10.2} = {}{:.2}",
            item.description, item.quantity, symbol, item.rate, symbol, item.amount
        );
    }
    println!();
    println!("  subtotal:  {}{:.2}", symbol, totals.subtotal);
    println!("  tax ({}%): {}{:.2}", invoice.tax_rate, symbol, totals.tax_amount);
    println!(
        "  discount ({}%): -{}{:.2}",
        invoice.discount_rate, symbol, totals.discount_amount
    );
    println!("  shipping:  {}{:.2}", symbol, totals.shipping_fee);
    println!("  total:     {}{:.2}", symbol, totals.total);
    if !invoice.notes.is_empty() {
        println!();
        println!("  notes: {}", invoice.notes);
    }
    if !invoice.payment_methods.is_empty() {
        println!();
        println!("  payment: {}", invoice.payment_methods.join(", "));
    }
}
