pub mod analyzer;
pub mod fallback;
pub mod response;

pub use analyzer::EmotionAnalyzer;
pub use fallback::{analyze_by_keywords, hour_bucket};
pub use response::parse_classification;
