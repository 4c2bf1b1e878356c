use serde::Deserialize;

/// Stats save payload. All values are computed client-side and persisted
/// verbatim; the server does not recompute streaks or cross-check the
/// distribution against `played`. Known trust boundary, kept deliberately.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveStatsRequest {
    pub user_id: String,
    pub played: i64,
    pub wins: i64,
    pub current_streak: i64,
    pub max_streak: i64,
    /// Score histogram keyed "0".."5", stored as an opaque JSON document.
    pub distribution: serde_json::Value,
    pub last_played_date: String,
}
