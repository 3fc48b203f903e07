//! Demonstration of the fair-value method registry
//!
//! Lists the four methods, then values a sample snapshot with each of them.
//!
//! Run with: cargo run --example method_registry_demo -p fairval-valuation

use fairval_valuation::{
    FundamentalInputs, ValuationConfig, WeightSet, available_methods, combine,
    compute_all_estimates,
};

fn main() {
    println!("Fair-Value Methods");
    println!("==================\n");

    for info in available_methods() {
        println!("  {:10} {:?}", info.name, info.kind);
        println!("    {}", info.description);
        println!("    inputs: {}\n", info.required_inputs.join(", "));
    }

    let inputs = FundamentalInputs {
        eps: 6.1,
        book_value_per_share: 4.4,
        pe_ratio_hint: 29.0,
        enterprise_value: Some(3_100_000_000_000.0),
        ebitda: Some(130_000_000_000.0),
        shares_outstanding: Some(15_200_000_000.0),
        current_price: Some(190.0),
    };

    let estimates = compute_all_estimates(&inputs, &ValuationConfig::default());
    for estimate in estimates.iter() {
        match estimate.value {
            Some(v) => println!("  {:8} {:>10.2}", estimate.method, v),
            None => println!("  {:8} {:>10}", estimate.method, "N/A"),
        }
    }

    match combine(&estimates, &WeightSet::default()) {
        Some(v) => println!("  {:8} {:>10.2}", "Combined", v),
        None => println!("  Combined value unavailable"),
    }
}
