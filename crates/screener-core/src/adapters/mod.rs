mod finnhub;

pub use finnhub::{FinnhubAdapter, DEFAULT_BASE_URL};
