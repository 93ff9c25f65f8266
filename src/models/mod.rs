mod collected;
mod diary;
mod emotion;
mod source;

pub use collected::{CollectedData, RoleActivity, RoleCategory};
pub use diary::{Activity, DiaryEntry, EntryKind, EntryMetadata, Learning};
pub use emotion::{Emotion, EmotionAnalysis, TimelineEntry};
pub use source::{Origin, RecordMetadata, SourceRecord, VcsItemKind};
