use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use log::warn;

use crate::collection::{
    algorithm::{build_context, prepare_records},
    clock::{Clock, SystemClock},
    config::AnalysisConfig,
    extract::important_events,
    role::classify_role,
};
use crate::emotion::EmotionAnalyzer;
use crate::llm::TextModel;
use crate::models::{CollectedData, SourceRecord};
use crate::settings::Settings;
use crate::sources::{build_readers, SourceReader};
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

/// Runs the collection pipeline: read, dedupe, filter, score, then extract
/// events, classify roles and analyze emotions over the scored set.
pub struct Collector {
    readers: Vec<Arc<dyn SourceReader>>,
    config: Arc<AnalysisConfig>,
    analyzer: EmotionAnalyzer,
    clock: Arc<dyn Clock>,
}

impl Collector {
    /// Readers for every enabled source, system clock.
    pub fn new(settings: &Settings, config: Arc<AnalysisConfig>, model: Arc<dyn TextModel>) -> Self {
        let model_name = settings
            .generation
            .classifier_model_name(std::env::var("AI_MODEL").ok());
        Self::with_parts(
            build_readers(&settings.sources),
            config.clone(),
            EmotionAnalyzer::new(model, model_name, config),
            Arc::new(SystemClock),
        )
    }

    pub fn with_parts(
        readers: Vec<Arc<dyn SourceReader>>,
        config: Arc<AnalysisConfig>,
        analyzer: EmotionAnalyzer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            readers,
            config,
            analyzer,
            clock,
        }
    }

    pub fn config(&self) -> &Arc<AnalysisConfig> {
        &self.config
    }

    pub async fn collect(&self, date: NaiveDate) -> CollectedData {
        self.collect_range(date, date).await
    }

    /// One pipeline pass over every day in `start..=end`.
    pub async fn collect_range(&self, start: NaiveDate, end: NaiveDate) -> CollectedData {
        let raw = self.read_all(start, end).await;
        log_info!("Collected {} raw records for {}..={}", raw.len(), start, end);

        let records = prepare_records(raw, &self.config, self.clock.now());
        let important = important_events(&records, self.config.importance_cutoff());
        let secretary_role = classify_role(&records);
        let emotions = self.analyzer.analyze(&records).await;
        let context = build_context(&records, &emotions);

        log_info!(
            "Pipeline done: {} records, {} important, {} role activities, primary emotion {}",
            records.len(),
            important.len(),
            secretary_role.activities.len(),
            emotions.primary
        );

        CollectedData {
            date: start,
            sources: records,
            important_events: important,
            emotions,
            context,
            secretary_role,
        }
    }

    /// Fan out every (day, reader) read and wait for all of them. A failed
    /// read contributes nothing.
    async fn read_all(&self, start: NaiveDate, end: NaiveDate) -> Vec<SourceRecord> {
        let reads = start
            .iter_days()
            .take_while(|day| *day <= end)
            .flat_map(|day| self.readers.iter().map(move |reader| (day, reader.clone())))
            .map(|(day, reader)| async move {
                let result = reader.read(day).await;
                (reader.origin(), day, result)
            });

        let mut records = Vec::new();
        for (origin, day, result) in join_all(reads).await {
            match result {
                Ok(batch) => {
                    log_debug!("{}: {} records for {}", origin.source_name(), batch.len(), day);
                    records.extend(batch);
                }
                Err(err) => {
                    warn!("Failed to read {} for {}: {:#}", origin.source_name(), day, err);
                }
            }
        }
        records
    }
}
