//! Built-in datasets served when live acquisition yields nothing.
//!
//! Figures are indicative snapshots, not quotes. The Cyprus set carries no
//! leverage or growth ratios because the source never published them for
//! that venue.

use crate::{Market, StockRecord};

struct Seed {
    ticker: &'static str,
    name: &'static str,
    pe: Option<f64>,
    pb: Option<f64>,
    de: Option<f64>,
    dy: Option<f64>,
    peg: Option<f64>,
}

const fn seed(
    ticker: &'static str,
    name: &'static str,
    pe: Option<f64>,
    pb: Option<f64>,
    de: Option<f64>,
    dy: Option<f64>,
    peg: Option<f64>,
) -> Seed {
    Seed {
        ticker,
        name,
        pe,
        pb,
        de,
        dy,
        peg,
    }
}

const fn cy(ticker: &'static str, name: &'static str, pe: f64, pb: f64, dy: Option<f64>) -> Seed {
    seed(ticker, name, Some(pe), Some(pb), None, dy, None)
}

const CY_SEEDS: &[Seed] = &[
    // Banking
    cy("BOC", "Bank of Cyprus Holdings", 8.5, 0.75, Some(2.1)),
    cy("HB", "Hellenic Bank", 12.3, 0.9, Some(1.8)),
    cy("CCB", "Cyprus Cooperative Bank", 6.8, 0.45, Some(3.2)),
    cy("ANC", "Ancoria Bank", 14.2, 1.1, Some(1.5)),
    // Real estate
    cy("ARISTO", "Aristo Developers", 15.2, 1.2, Some(0.5)),
    cy("KYPROS", "Kypros Development", 11.9, 0.95, Some(3.1)),
    cy("PAPHOS", "Paphos Development", 18.7, 1.8, Some(1.9)),
    cy("LARNACA", "Larnaca Development", 16.4, 1.4, Some(2.3)),
    cy("LIMASSOL", "Limassol Marina", 22.1, 2.6, Some(0.8)),
    // Holdings
    cy("DEMETRA", "Demetra Holdings", 14.7, 1.5, Some(2.5)),
    cy("CYPRUS", "Cyprus Investment Holdings", 13.8, 1.3, Some(2.8)),
    cy("EUROBANK", "Eurobank Cyprus", 9.2, 0.8, Some(2.9)),
    // Industrials and materials
    cy("VASSILIKO", "Vassiliko Cement Works", 13.2, 1.1, Some(2.8)),
    cy("ASTRO", "Astromeritis Mines", 22.1, 1.8, Some(1.2)),
    cy("CLARIDGE", "Claridge Public Limited", 18.4, 2.1, Some(0.8)),
    cy("CEMENT", "Cyprus Cement", 12.6, 1.0, Some(3.4)),
    cy("MARBLE", "Cyprus Marble", 19.3, 2.3, Some(1.1)),
    // Technology
    cy("LOGICOM", "Logicom Public Ltd", 19.8, 2.4, Some(1.6)),
    cy("ELMA", "Elma Electronics", 26.3, 3.2, None),
    cy("CYTA", "Cyprus Telecommunications Authority", 11.4, 1.6, Some(4.2)),
    cy("CYBER", "Cyprus Cyber Security", 28.7, 4.1, None),
    // Tourism
    cy("HOTELS", "Cyprus Hotels Group", 16.9, 1.7, Some(2.7)),
    cy("RESORT", "Aphrodite Resort", 24.5, 2.9, Some(1.3)),
    cy("CRUISE", "Cyprus Cruise Lines", 21.3, 2.2, Some(1.8)),
    // Shipping
    cy("SHIPPING", "Cyprus Shipping", 8.9, 0.7, Some(5.1)),
    cy("MARITIME", "Maritime Cyprus", 15.6, 1.9, Some(2.4)),
    cy("PORTS", "Cyprus Ports Authority", 12.8, 1.2, Some(3.6)),
    // Energy
    cy("EAC", "Electricity Authority of Cyprus", 10.7, 0.9, Some(4.8)),
    cy("SOLAR", "Cyprus Solar Energy", 31.2, 3.8, Some(0.6)),
    cy("WIND", "Cyprus Wind Power", 18.9, 2.1, Some(2.2)),
    // Food and beverages
    cy("WINERY", "Cyprus Winery", 14.3, 1.4, Some(2.9)),
    cy("DAIRY", "Cyprus Dairy Products", 17.6, 2.0, Some(2.1)),
    cy("OLIVE", "Cyprus Olive Oil", 20.4, 2.5, Some(1.7)),
    // Healthcare
    cy("PHARMA", "Cyprus Pharmaceuticals", 25.8, 3.4, Some(1.4)),
    cy("MEDICAL", "Cyprus Medical Devices", 29.1, 4.2, Some(0.9)),
    cy("HOSPITAL", "Cyprus General Hospital", 13.5, 1.6, Some(3.3)),
    // Insurance
    cy("INSURANCE", "Cyprus Insurance Group", 11.8, 1.3, Some(3.7)),
    cy("PENSION", "Cyprus Pension Fund", 9.6, 0.8, Some(4.1)),
    cy("INVESTMENT", "Cyprus Investment Fund", 16.2, 1.8, Some(2.6)),
    // Education and media
    cy("UNIVERSITY", "Cyprus University", 22.7, 2.8, Some(1.2)),
    cy("MEDIA", "Cyprus Broadcasting Corporation", 15.1, 1.7, Some(2.8)),
    cy("NEWSPAPER", "Cyprus Daily News", 18.3, 2.2, Some(2.0)),
    // Construction
    cy("CONSTRUCTION", "Cyprus Construction", 12.4, 1.1, Some(3.0)),
    cy("ENGINEERING", "Cyprus Engineering", 19.6, 2.4, Some(1.8)),
    cy("ARCHITECTURE", "Cyprus Architecture", 23.8, 3.1, Some(1.1)),
];

const US_SEEDS: &[Seed] = &[
    // Technology
    seed("AAPL", "Apple Inc.", Some(28.5), Some(45.2), Some(1.8), Some(0.6), Some(2.9)),
    seed("MSFT", "Microsoft Corp.", Some(35.1), Some(12.8), Some(0.3), Some(0.8), Some(2.3)),
    seed("GOOGL", "Alphabet Inc.", Some(25.3), Some(7.1), Some(0.1), None, Some(1.4)),
    seed("NVDA", "NVIDIA Corp.", Some(75.8), Some(60.3), Some(0.2), Some(0.03), Some(1.1)),
    seed("TSLA", "Tesla Inc.", Some(58.2), Some(15.4), Some(0.1), None, Some(4.6)),
    seed("META", "Meta Platforms Inc.", Some(22.7), Some(6.8), Some(0.3), Some(0.4), Some(1.2)),
    seed("AMZN", "Amazon.com Inc.", Some(42.3), Some(8.1), Some(0.6), None, Some(1.9)),
    seed("NFLX", "Netflix Inc.", Some(35.9), Some(5.2), Some(0.7), None, Some(1.6)),
    // Financials
    seed("JPM", "JPMorgan Chase & Co.", Some(11.2), Some(1.6), Some(1.3), Some(2.8), Some(1.9)),
    seed("BAC", "Bank of America Corp.", Some(13.4), Some(1.2), Some(1.1), Some(3.1), Some(1.7)),
    seed("WFC", "Wells Fargo & Company", Some(12.8), Some(1.1), Some(1.2), Some(2.9), Some(1.5)),
    seed("GS", "Goldman Sachs Group Inc.", Some(10.5), Some(1.0), Some(2.4), Some(2.4), Some(1.3)),
    // Healthcare
    seed("JNJ", "Johnson & Johnson", Some(15.6), Some(5.8), Some(0.5), Some(3.0), Some(2.6)),
    seed("PFE", "Pfizer Inc.", Some(13.2), Some(1.9), Some(0.7), Some(4.1), Some(3.1)),
    seed("ABBV", "AbbVie Inc.", Some(14.8), Some(4.3), Some(4.9), Some(3.8), Some(1.8)),
    seed("MRK", "Merck & Co. Inc.", Some(16.1), Some(6.2), Some(0.8), Some(2.7), Some(1.2)),
    // Consumer staples
    seed("KO", "Coca-Cola Company", Some(25.4), Some(9.8), Some(1.6), Some(3.2), Some(3.8)),
    seed("PEP", "PepsiCo Inc.", Some(26.7), Some(12.1), Some(2.4), Some(2.9), Some(3.2)),
    seed("PG", "Procter & Gamble Co.", Some(24.3), Some(7.9), Some(0.7), Some(2.5), Some(3.5)),
    seed("WMT", "Walmart Inc.", Some(27.8), Some(5.1), Some(0.6), Some(1.5), Some(3.0)),
    // Energy
    seed("XOM", "Exxon Mobil Corp.", Some(14.2), Some(1.8), Some(0.2), Some(5.9), Some(2.2)),
    seed("CVX", "Chevron Corp.", Some(15.3), Some(1.9), Some(0.2), Some(3.4), Some(2.0)),
    // Industrials
    seed("BA", "Boeing Company", None, Some(8.2), None, None, None),
    seed("CAT", "Caterpillar Inc.", Some(16.8), Some(5.4), Some(2.0), Some(2.1), Some(1.6)),
    seed("GE", "General Electric Co.", Some(18.9), Some(2.3), Some(0.9), Some(0.4), Some(1.4)),
    // Telecommunications
    seed("VZ", "Verizon Communications", Some(8.9), Some(1.9), Some(1.7), Some(6.8), Some(3.4)),
    seed("T", "AT&T Inc.", Some(7.2), Some(1.1), Some(1.3), Some(7.1), Some(2.8)),
    // Utilities
    seed("NEE", "NextEra Energy Inc.", Some(21.4), Some(2.8), Some(1.5), Some(3.1), Some(2.5)),
    seed("DUK", "Duke Energy Corp.", Some(18.6), Some(1.4), Some(1.6), Some(4.2), Some(3.3)),
    // Retail and entertainment
    seed("HD", "Home Depot Inc.", Some(24.1), Some(13.2), Some(9.8), Some(2.4), Some(2.7)),
    seed("DIS", "Walt Disney Company", Some(39.7), Some(1.5), Some(0.4), Some(0.0), Some(1.8)),
];

/// Static dataset for a market.
pub fn fallback_for(market: Market) -> Vec<StockRecord> {
    let seeds = match market {
        Market::Us => US_SEEDS,
        Market::Cy => CY_SEEDS,
    };

    seeds
        .iter()
        .map(|seed| StockRecord {
            ticker: seed.ticker.to_owned(),
            name: seed.name.to_owned(),
            price_to_earnings: seed.pe,
            price_to_book: seed.pb,
            debt_to_equity: seed.de,
            dividend_yield_percent: seed.dy,
            price_earnings_to_growth: seed.peg,
        })
        .collect()
}

/// Static dataset for a raw market code; unknown codes get the default market's list.
pub fn fallback(market_code: &str) -> Vec<StockRecord> {
    fallback_for(Market::resolve(market_code))
}
