use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

use crate::error::ConfigError;
use crate::settings::AnalysisSettings;

/// One emotion category and the keywords that signal it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordCategory {
    pub name: String,
    pub keywords: Vec<String>,
}

impl KeywordCategory {
    /// Number of distinct keywords of this category present in `content`.
    pub fn hits(&self, content: &str) -> usize {
        self.keywords
            .iter()
            .filter(|keyword| content.contains(keyword.as_str()))
            .count()
    }
}

/// Emotion keyword table. Category order is the order the categories appear in
/// the settings file and is significant for tie-breaking.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordTable {
    categories: Vec<KeywordCategory>,
}

impl KeywordTable {
    pub fn new(categories: Vec<KeywordCategory>) -> Self {
        Self { categories }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self::new(
            pairs
                .into_iter()
                .map(|(name, keywords)| KeywordCategory {
                    name: name.into(),
                    keywords: keywords.into_iter().map(Into::into).collect(),
                })
                .collect(),
        )
    }

    pub fn categories(&self) -> &[KeywordCategory] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, name: &str) -> Option<&KeywordCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Per-category hit counts for `content`, in configured order.
    pub fn hits_by_category<'a>(
        &'a self,
        content: &'a str,
    ) -> impl Iterator<Item = (&'a KeywordCategory, usize)> + 'a {
        self.categories
            .iter()
            .map(move |category| (category, category.hits(content)))
    }

    /// Total keyword hits across all categories, each keyword counted once.
    pub fn total_hits(&self, content: &str) -> usize {
        self.hits_by_category(content).map(|(_, hits)| hits).sum()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::from_pairs([
            ("happy", vec!["楽しい", "嬉しい", "うれしい", "面白い", "素晴らしい"]),
            ("sad", vec!["悲しい", "辛い", "寂しい", "残念"]),
            ("surprised", vec!["驚いた", "びっくり", "すごい", "えー"]),
            ("angry", vec!["怒った", "腹立つ", "イライラ"]),
            ("learning", vec!["学んだ", "気づいた", "分かった", "発見"]),
            ("anxious", vec!["不安", "心配", "怖い"]),
            ("relieved", vec!["安心", "ホッとする"]),
            ("grateful", vec!["ありがとう", "感謝"]),
        ])
    }
}

impl Serialize for KeywordTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.keywords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeywordTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = KeywordTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of emotion category to keyword list")
            }

            // Map entries arrive in document order, which is the configured order.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories = Vec::new();
                while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
                    categories.push(KeywordCategory { name, keywords });
                }
                Ok(KeywordTable::new(categories))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Validated analysis configuration shared by every pipeline stage.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Emotion categories and keywords, in configured order
    emotion_keywords: KeywordTable,

    /// Fraction in [0, 1]; events scoring at least `threshold * 100` are important
    importance_threshold: f64,
}

impl AnalysisConfig {
    pub fn new(emotion_keywords: KeywordTable, importance_threshold: f64) -> Result<Self, ConfigError> {
        if emotion_keywords.is_empty() {
            return Err(ConfigError::MissingKeywordTable);
        }
        if let Some(empty) = emotion_keywords
            .categories()
            .iter()
            .find(|category| category.keywords.is_empty())
        {
            return Err(ConfigError::EmptyKeywordCategory(empty.name.clone()));
        }
        // A blank keyword matches every record.
        if let Some(blank) = emotion_keywords
            .categories()
            .iter()
            .find(|category| category.keywords.iter().any(|k| k.trim().is_empty()))
        {
            return Err(ConfigError::BlankKeyword(blank.name.clone()));
        }
        if !importance_threshold.is_finite() || !(0.0..=1.0).contains(&importance_threshold) {
            return Err(ConfigError::InvalidThreshold(importance_threshold));
        }

        Ok(Self {
            emotion_keywords,
            importance_threshold,
        })
    }

    pub fn from_settings(settings: &AnalysisSettings) -> Result<Self, ConfigError> {
        let keywords = settings
            .emotion_keywords
            .clone()
            .ok_or(ConfigError::MissingKeywordTable)?;
        Self::new(keywords, settings.importance_threshold)
    }

    pub fn emotion_keywords(&self) -> &KeywordTable {
        &self.emotion_keywords
    }

    pub fn importance_threshold(&self) -> f64 {
        self.importance_threshold
    }

    /// Threshold on the 0..100 importance scale.
    pub fn importance_cutoff(&self) -> f64 {
        self.importance_threshold * 100.0
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            emotion_keywords: KeywordTable::default(),
            importance_threshold: 0.6,
        }
    }
}
