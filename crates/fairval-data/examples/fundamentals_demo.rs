//! Fetch a fundamentals snapshot and three years of history from Yahoo Finance.
//!
//! Run with: cargo run --example fundamentals_demo -p fairval-data -- INFY.NS

use fairval_data::{Lookback, MarketDataSource, YahooSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let symbol = std::env::args().nth(1).unwrap_or_else(|| "AAPL".to_string());
    let source = YahooSource::new()?;

    let data = source.fetch_fundamentals(&symbol).await?;
    println!("{:#?}", data);

    let history = source.fetch_history(&symbol, Lookback::BAND).await?;
    println!("{} daily bars", history.len());
    if let (Some(high), Some(low)) = (history.max_high(), history.min_low()) {
        println!("3y high {:.2}, 3y low {:.2}", high, low);
    }

    Ok(())
}
