pub mod algorithm;
pub mod clock;
pub mod collector;
pub mod config;
pub mod dedupe;
pub mod extract;
pub mod role;
pub mod scoring;

pub use algorithm::{build_context, prepare_records};
pub use clock::{Clock, FixedClock, SystemClock};
pub use collector::Collector;
pub use config::{AnalysisConfig, KeywordCategory, KeywordTable};
pub use dedupe::dedupe;
pub use extract::important_events;
pub use role::classify_role;
