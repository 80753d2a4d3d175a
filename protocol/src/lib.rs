use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoResult {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail: String,
    /// Similarity to the query, expected in `[0, 1]`.
    pub score: f64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    // Absent and `null` both mean no hits; neither is an error.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub results: Vec<VideoResult>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<VideoResult>, D::Error>
where
    D: Deserializer<'de>,
{
    let results: Option<Vec<VideoResult>> = Option::deserialize(deserializer)?;
    Ok(results.unwrap_or_default())
}
