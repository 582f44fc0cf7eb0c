use std::time::Duration;

use ustid::{build_check_vat_envelope, check_vat, split_vat_id};

#[tokio::main]
async fn main() {
    // VAT ID format validation (no network required)
    println!("=== VAT ID Format Validation ===\n");

    let test_ids = [
        "DE123456789",
        "ATU12345678",
        "EL123456789",
        "XI123456789",
        "DE1",          // number part too short
        "GR123456789",  // Greece is EL in VIES
        "XX999999999",  // unknown country
        "DEabc4567890", // lowercase
    ];

    for id in &test_ids {
        match split_vat_id(id) {
            Ok((cc, num)) => println!("  {id} => ok (country={cc}, number={num})"),
            Err(e) => println!("  {id} => INVALID: {e}"),
        }
    }

    // The SOAP envelope a lookup would send
    println!("\n=== checkVat Request Envelope ===\n");
    println!("{}", build_check_vat_envelope("DE", "123456789"));

    // Live lookup for IDs passed on the command line:
    //   cargo run --example vat_check -- DE123456789
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("\n(pass a VAT ID to run a live VIES lookup)");
        return;
    }

    println!("\n=== Live VIES Lookup ===\n");
    for id in &args {
        match check_vat(id, Some(Duration::from_secs(15))).await {
            Ok(check) => {
                println!("  {id}:");
                println!("    valid            = {}", check.valid);
                println!("    server_validated = {}", check.server_validated);
                println!("    name             = {}", check.name);
                println!("    address          = {}", check.address);
            }
            Err(e) => println!("  {id} => FAILED: {e}"),
        }
    }
}
