use serde::{Deserialize, Serialize};

/// Closed set of emotions the pipeline can emit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Sad,
    Surprised,
    Angry,
    Learning,
    Anxious,
    Relieved,
    Grateful,
}

impl Emotion {
    pub const ALL: [Emotion; 8] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Angry,
        Emotion::Learning,
        Emotion::Anxious,
        Emotion::Relieved,
        Emotion::Grateful,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
            Emotion::Angry => "angry",
            Emotion::Learning => "learning",
            Emotion::Anxious => "anxious",
            Emotion::Relieved => "relieved",
            Emotion::Grateful => "grateful",
        }
    }

    /// Map any label onto the closed set. Known names pass through, a few common
    /// synonyms are remapped, everything else lands on `Learning`.
    pub fn coerce(label: &str) -> Emotion {
        let normalized = label.trim().to_lowercase();
        if let Some(emotion) = Emotion::ALL
            .iter()
            .find(|emotion| emotion.as_str() == normalized)
        {
            return *emotion;
        }

        match normalized.as_str() {
            "neutral" => Emotion::Learning,
            "joy" | "fun" => Emotion::Happy,
            "fear" => Emotion::Anxious,
            "calm" => Emotion::Relieved,
            "thanks" => Emotion::Grateful,
            _ => Emotion::Learning,
        }
    }

    /// Fixed valence in [-1, 1].
    pub fn valence(&self) -> f64 {
        match self {
            Emotion::Happy => 0.8,
            Emotion::Grateful => 0.7,
            Emotion::Relieved => 0.5,
            Emotion::Learning => 0.3,
            Emotion::Surprised => 0.1,
            Emotion::Anxious => -0.3,
            Emotion::Angry => -0.6,
            Emotion::Sad => -0.8,
        }
    }

    pub fn label_ja(&self) -> &'static str {
        match self {
            Emotion::Happy => "喜び",
            Emotion::Sad => "悲しみ",
            Emotion::Surprised => "興奮",
            Emotion::Angry => "イライラ",
            Emotion::Learning => "学び",
            Emotion::Anxious => "不安",
            Emotion::Relieved => "安らぎ",
            Emotion::Grateful => "感謝",
        }
    }

    pub fn mood_emoji(&self) -> &'static str {
        match self {
            Emotion::Happy => "😊",
            Emotion::Sad => "😢",
            Emotion::Surprised => "😲",
            Emotion::Angry => "😠",
            Emotion::Learning => "🧠",
            Emotion::Anxious => "😰",
            Emotion::Relieved => "😌",
            Emotion::Grateful => "🙏",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEntry {
    /// Hour bucket, `HH:00`.
    pub time: String,
    pub emotion: Emotion,
}

impl TimelineEntry {
    pub fn new(time: impl Into<String>, emotion: Emotion) -> Self {
        Self {
            time: time.into(),
            emotion,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmotionAnalysis {
    pub primary: Emotion,
    pub secondary: Option<Emotion>,
    pub confidence: f64,
    pub timeline: Vec<TimelineEntry>,
}

impl EmotionAnalysis {
    /// Result used when there is nothing to analyze.
    pub fn neutral() -> Self {
        Self {
            primary: Emotion::Learning,
            secondary: None,
            confidence: 0.3,
            timeline: Vec::new(),
        }
    }

    /// Confidence-weighted valence in [-1, 1].
    pub fn weighted_score(&self) -> f64 {
        let primary = self.primary.valence();
        let secondary = self.secondary.map(|e| e.valence()).unwrap_or(0.0);
        ((primary * 0.7 + secondary * 0.3) * self.confidence).clamp(-1.0, 1.0)
    }

    pub fn category_label(&self) -> &'static str {
        self.primary.label_ja()
    }
}
