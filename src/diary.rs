use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};
use log::{info, warn};

use crate::collection::{AnalysisConfig, Collector};
use crate::generator::DiaryGenerator;
use crate::llm::TextModel;
use crate::models::DiaryEntry;
use crate::settings::Settings;
use crate::writer::{DiaryOwner, DiaryStats, DiaryWriter};

/// Calendar month, `YYYY-MM` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// First and last day of the month.
    pub fn bounds(self) -> Result<(NaiveDate, NaiveDate)> {
        let invalid = || anyhow!("invalid month {:04}-{:02}", self.year, self.month);
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(invalid)?;
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        }
        .ok_or_else(invalid)?;
        Ok((first, next - Duration::days(1)))
    }
}

impl std::str::FromStr for YearMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || format!("expected YYYY-MM, got '{s}'");
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

/// Sunday through Saturday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    (start, start + Duration::days(6))
}

fn yesterday() -> NaiveDate {
    Local::now().date_naive() - Duration::days(1)
}

/// Collect, generate and write diaries; read back what was written.
pub struct DiaryApp {
    collector: Collector,
    generator: DiaryGenerator,
    writer: DiaryWriter,
}

impl DiaryApp {
    pub fn new(settings: &Settings, owner: DiaryOwner, model: Arc<dyn TextModel>) -> Result<Self> {
        let config = Arc::new(
            AnalysisConfig::from_settings(&settings.analysis).context("Invalid analysis settings")?,
        );
        let collector = Collector::new(settings, config.clone(), model.clone());
        let generator =
            DiaryGenerator::new(settings, config, model).context("Invalid persona settings")?;
        let writer = DiaryWriter::new(settings, owner)?;
        Ok(Self::with_parts(collector, generator, writer))
    }

    pub fn with_parts(collector: Collector, generator: DiaryGenerator, writer: DiaryWriter) -> Self {
        Self {
            collector,
            generator,
            writer,
        }
    }

    /// Daily entry for `date` (default yesterday). `None` when nothing was
    /// collected.
    pub async fn generate(&self, date: Option<NaiveDate>) -> Result<Option<DiaryEntry>> {
        let date = date.unwrap_or_else(yesterday);
        info!("Generating diary for {date}");

        let data = self.collector.collect(date).await;
        if data.sources.is_empty() {
            warn!("No records collected for {date}, skipping diary");
            return Ok(None);
        }

        let entry = self.generator.generate(&data).await?;
        self.persist(&entry).await?;
        Ok(Some(entry))
    }

    /// Weekly reflection for the Sunday..Saturday week containing `date`
    /// (default yesterday).
    pub async fn weekly(&self, date: Option<NaiveDate>) -> Result<Option<DiaryEntry>> {
        let (start, end) = week_bounds(date.unwrap_or_else(yesterday));
        info!("Generating weekly reflection for {start}..={end}");

        let data = self.collector.collect_range(start, end).await;
        if data.sources.is_empty() {
            warn!("No records collected for week of {start}, skipping reflection");
            return Ok(None);
        }

        let entry = self.generator.generate_weekly(&data, start, end).await?;
        self.persist(&entry).await?;
        Ok(Some(entry))
    }

    /// Monthly reflection (default previous month).
    pub async fn monthly(&self, month: Option<YearMonth>) -> Result<Option<DiaryEntry>> {
        let month = month.unwrap_or_else(|| YearMonth::of(Local::now().date_naive()).previous());
        let (start, end) = month.bounds()?;
        info!("Generating monthly reflection for {:04}-{:02}", month.year, month.month);

        let data = self.collector.collect_range(start, end).await;
        if data.sources.is_empty() {
            warn!("No records collected for {:04}-{:02}, skipping reflection", month.year, month.month);
            return Ok(None);
        }

        let entry = self.generator.generate_monthly(&data, start, end).await?;
        self.persist(&entry).await?;
        Ok(Some(entry))
    }

    async fn persist(&self, entry: &DiaryEntry) -> Result<Option<PathBuf>> {
        let saved = self.writer.write(entry).await?;
        match &saved {
            Some(path) => info!("Wrote '{}' to {}", entry.title, path.display()),
            None => info!("Generated '{}' (file output disabled)", entry.title),
        }
        Ok(saved)
    }

    pub fn show(&self, date: NaiveDate) -> Result<Option<DiaryEntry>> {
        self.writer.read(date)
    }

    pub fn search(&self, keyword: &str) -> Result<Vec<DiaryEntry>> {
        self.writer.search(keyword)
    }

    pub fn stats(&self) -> Result<DiaryStats> {
        self.writer.stats()
    }

    pub fn writer(&self) -> &DiaryWriter {
        &self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_runs_sunday_to_saturday() {
        // 2025-03-12 is a Wednesday
        assert_eq!(week_bounds(day(2025, 3, 12)), (day(2025, 3, 9), day(2025, 3, 15)));
        assert_eq!(week_bounds(day(2025, 3, 9)), (day(2025, 3, 9), day(2025, 3, 15)));
        assert_eq!(week_bounds(day(2025, 3, 15)), (day(2025, 3, 9), day(2025, 3, 15)));
    }

    #[test]
    fn month_bounds_handle_lengths_and_year_end() {
        let feb: YearMonth = "2024-02".parse().unwrap();
        assert_eq!(feb.bounds().unwrap(), (day(2024, 2, 1), day(2024, 2, 29)));
        let dec = YearMonth { year: 2025, month: 12 };
        assert_eq!(dec.bounds().unwrap(), (day(2025, 12, 1), day(2025, 12, 31)));
        assert_eq!(YearMonth { year: 2025, month: 1 }.previous(), YearMonth { year: 2024, month: 12 });
    }

    fn offline_model() -> Arc<dyn TextModel> {
        Arc::new(crate::llm::OpenAiCompatibleClient::new("http://127.0.0.1:9", None).unwrap())
    }

    #[test]
    fn collector_and_generator_share_one_config() {
        let app = DiaryApp::new(&Settings::default(), DiaryOwner::Persona, offline_model()).unwrap();
        assert!(Arc::ptr_eq(app.collector.config(), app.generator.config()));
    }

    #[test]
    fn invalid_analysis_settings_stop_app_construction() {
        let mut settings = Settings::default();
        settings.analysis.importance_threshold = 1.5;
        assert!(DiaryApp::new(&settings, DiaryOwner::Persona, offline_model()).is_err());

        let mut settings = Settings::default();
        settings.analysis.emotion_keywords = None;
        assert!(DiaryApp::new(&settings, DiaryOwner::Persona, offline_model()).is_err());
    }

    #[test]
    fn year_month_rejects_garbage() {
        assert!("2025-13".parse::<YearMonth>().is_err());
        assert!("2025/03".parse::<YearMonth>().is_err());
        assert!("March".parse::<YearMonth>().is_err());
    }
}
