//! 画面表示用の固定文言
//!
//! 生成中に順番に表示する進行メッセージとアプリの見出し。

/// アプリ名
pub const APP_NAME: &str = "ScholarPulse AI";

pub const APP_TAGLINE: &str = "Bridging the gap between complex research and meaningful communication. \
Upload your paper and let AI explain your impact to the world.";

/// アップロード欄の案内
pub const UPLOAD_GUIDANCE: &str = "Maximum file size: 20MB • PDF format only";

/// 未選択時の特徴紹介（見出し, 説明）
pub const FEATURE_BLURBS: [(&str, &str); 3] = [
    (
        "Clear Communication",
        "Translate technical findings for everyone from grandma to fellow PhDs.",
    ),
    (
        "Impact Discovery",
        "Uncover potential real-world applications and future research avenues.",
    ),
    (
        "Social Ready",
        "Get instant tweet-length summaries to share your findings with the world.",
    ),
];

/// 生成中の進行メッセージ
pub const LOADING_MESSAGES: [&str; 7] = [
    "Parsing theoretical frameworks...",
    "Simplifying technical jargon for non-experts...",
    "Synthesizing core findings...",
    "Identifying cross-disciplinary applications...",
    "Generating academic context for colleagues...",
    "Drafting social media summaries...",
    "Almost ready for prime time...",
];

/// メッセージの切替間隔（ミリ秒）
pub const LOADING_MESSAGE_INTERVAL_MS: u64 = 2500;

/// 経過ミリ秒から表示すべき進行メッセージを返す
pub fn loading_message(elapsed_ms: u128) -> &'static str {
    let index = (elapsed_ms / LOADING_MESSAGE_INTERVAL_MS as u128) as usize % LOADING_MESSAGES.len();
    LOADING_MESSAGES[index]
}
