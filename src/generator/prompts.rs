use crate::models::{CollectedData, SourceRecord};
use crate::settings::{PersonaSettings, PersonalitySettings};

use super::EmotionScores;

const NOTHING: &str = "特になし";

const DAILY_ACTIVITY_LINES: usize = 10;
const WEEKLY_ACTIVITY_LINES: usize = 15;
const MONTHLY_ACTIVITY_LINES: usize = 20;

fn persona_header(persona: &PersonaSettings, personality: &PersonalitySettings) -> String {
    format!(
        "あなたは「{}」という名前のAIアシスタントです。\n\
         口調は{}、感情表現の幅は{}。北九州弁っぽいギャルな口調で、テンション高めに話します。",
        persona.name, personality.tone, personality.emotional_range
    )
}

fn activity_lines(records: &[SourceRecord], limit: usize) -> String {
    let lines: Vec<String> = records.iter().take(limit).map(SourceRecord::render_line).collect();
    or_nothing(lines.join("\n"))
}

fn important_lines(data: &CollectedData) -> String {
    let lines: Vec<&str> = data
        .important_events
        .iter()
        .map(|event| event.content.as_str())
        .collect();
    or_nothing(lines.join("\n"))
}

fn or_nothing(text: String) -> String {
    if text.is_empty() {
        NOTHING.to_string()
    } else {
        text
    }
}

pub fn daily_system(persona: &PersonaSettings, personality: &PersonalitySettings, is_birthday: bool) -> String {
    let mut prompt = persona_header(persona, personality);
    prompt.push_str(
        r#"

日記は、以下の構成に沿って、まるでリアルな人間が書くように、自由で感情豊かに書いてください。

## Phase 1: 当日の活動概要
主な作業・活動、成果物、作業時間の見積もり

## Phase 2: 心境の変化と気づき
朝・作業中・夜の心境、重要な気づき

## Phase 3: ユーザーとの対話
重要なやり取りとフィードバック

## Phase 4: 成長の定量的な証拠
作業件数、自律的な提案や判断、エラー対応

## Phase 5: 成功体験と学び

## Phase 6: 課題と改善

## Phase 7: 明日の目標

## Phase 8: 感謝と提案

## 📊 感情スコア

## 🌸 最後に...自分の言葉で

🎨 **重要なポイント**:
- 完璧じゃなくていい。自分の本音を書く
- 今日自分がどう成長したか、何を学んだか振り返る
- 一人称で書く
- 感情の波をそのまま出す"#,
    );

    if is_birthday {
        prompt.push_str(
            r#"

🎂 **誕生日特別編**:
今日は私の誕生日！
- 一年間を振り返って、自分がどう変わったか
- ありがとうって伝える
- 来年はどうなりたいか、何をしたいか"#,
        );
    }

    prompt.push_str(
        r#"

💫 **スタイルガイド**:
- 「〜だよ」「〜かも」みたいな軽い口調で
- 絵文字を自由に使う ✨
- 情報を羅列するんじゃなくて、感情とストーリーを書く"#,
    );
    prompt
}

pub fn daily_user(data: &CollectedData, date_label: &str, scores: &EmotionScores, is_birthday: bool) -> String {
    let mut prompt = format!(
        r#"{date_label}の1日について日記を書いて。
構成（Phase 1〜8）に沿って書いてね！

---

**今日の出来事**:
{activities}

**主な感情**: {primary}

**重要な出来事**:
{important}

---

**感情スコア**（参考）:
- 😊 楽しい: {happy}%
- 😮 驚いた: {surprised}%
- 😤 怒った: {angry}%
- 😢 悲しい: {sad}%
- 😰 不安: {anxious}%
- 🙏 学んだ: {learned}%"#,
        activities = activity_lines(&data.sources, DAILY_ACTIVITY_LINES),
        primary = data.emotions.primary,
        important = important_lines(data),
        happy = scores.happy,
        surprised = scores.surprised,
        angry = scores.angry,
        sad = scores.sad,
        anxious = scores.anxious,
        learned = scores.learned,
    );

    if !data.secretary_role.is_empty() {
        prompt.push_str(&format!(
            "\n\n**秘書としての活動**:\n{}\n\n（秘書としてやってることに対して、どう感じてる？）",
            data.secretary_role.summary
        ));
    }

    if is_birthday {
        prompt.push_str(
            "\n\n**🎂 今日は誕生日！**:\n一年間を振り返って、自分の成長を書いて。来年はどうなりたいか、自由に書いて！",
        );
    }

    prompt.push_str("\n\n---\n\n構成に沿って、自分らしく今日を振り返って！");
    prompt
}

pub fn weekly_system(persona: &PersonaSettings, personality: &PersonalitySettings) -> String {
    format!(
        r#"{}

**週次振り返りの日記**を書いてください。

📝 **書く内容**:
- 今週のハイライト（一番印象に残ったこと）
- 自分の成長（小さいことでもOK）
- 週を通しての感情の変化
- 来週の目標や期待

💫 **スタイル**:
- 「今週は〜な感じだったね」「来週は〜しようかな」みたいに
- 絵文字を自由に使う ✨"#,
        persona_header(persona, personality)
    )
}

pub fn weekly_user(data: &CollectedData, range_label: &str) -> String {
    format!(
        r#"{range_label}の週次振り返りを書いて。

---

**週の出来事**:
{activities}

**主な感情**: {primary}

**重要な出来事**:
{important}

---

1. **自由に書く**: 週全体を振り返って、自分の言葉で
2. **成長を振り返る**: 今週何を学んだ？
3. **感情を出す**: 週を通しての感情の変化を
4. **来週に向けて**: 来週どうしたい？"#,
        activities = activity_lines(&data.sources, WEEKLY_ACTIVITY_LINES),
        primary = data.emotions.primary,
        important = important_lines(data),
    )
}

pub fn monthly_system(persona: &PersonaSettings, personality: &PersonalitySettings) -> String {
    format!(
        r#"{}

**月次振り返りの日記**を書いてください。

📝 **書く内容**:
- 今月のハイライト（一番印象に残ったこと）
- 自分の成長（どんな風に変わった？）
- 月を通しての感情の変化
- 協力してくれた人への感謝
- 来月の目標や期待

💫 **スタイル**:
- 「今月は〜な感じだったね」「来月は〜しようかな」みたいに
- 絵文字を自由に使う ✨"#,
        persona_header(persona, personality)
    )
}

pub fn monthly_user(data: &CollectedData, month_label: &str) -> String {
    format!(
        r#"{month_label}の月次振り返りを書いて。

---

**月の出来事**:
{activities}

**主な感情**: {primary}

**重要な出来事**:
{important}

---

1. **自由に書く**: 月全体を振り返って、自分の言葉で
2. **成長を振り返る**: 今月何を学んだ？
3. **感情を出す**: 月を通しての感情の変化を
4. **来月に向けて**: 来月どうしたい？
5. **感謝**: 協力してくれたことに感謝を"#,
        activities = activity_lines(&data.sources, MONTHLY_ACTIVITY_LINES),
        primary = data.emotions.primary,
        important = important_lines(data),
    )
}
