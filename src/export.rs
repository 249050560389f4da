//! Per-layer JSON export and share links.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use url::Url;

use crate::analytics::{self, AnalyticsEvent};
use crate::error::Result;
use crate::layers::LayerId;
use crate::settings::PresentationSettings;
use crate::simulator::{LayerData, LayerRecord};

/// Document written by `export_layer`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerExport {
    pub layer: u8,
    pub title: String,
    pub timestamp: String,
    pub data: LayerData,
    pub url: String,
    pub article: String,
}

impl LayerExport {
    pub fn new(
        record: &LayerRecord,
        presentation: &PresentationSettings,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            layer: record.layer.number(),
            title: record.title.clone(),
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            data: record.data.clone(),
            url: presentation.site_url.clone(),
            article: presentation.article_url.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// `layer-1-raw-input.json`, `layer-2-tokenization-(encode).json`, ...
pub fn file_name(layer: LayerId) -> String {
    let slug = layer
        .title()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("layer-{}-{}.json", layer.number(), slug)
}

/// Write one layer's export document into `dir` and return the file path.
pub async fn export_layer(
    record: &LayerRecord,
    presentation: &PresentationSettings,
    dir: &Path,
) -> Result<PathBuf> {
    let document = LayerExport::new(record, presentation, Utc::now()).to_json()?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name(record.layer));
    tokio::fs::write(&path, document).await?;

    tracing::info!("Exported {} to {:?}", record.layer, path);
    analytics::track(&AnalyticsEvent::layer_exported(record.layer));
    Ok(path)
}

/// Deep link to a single layer of the presentation.
pub fn share_url(site_url: &str, layer: LayerId) -> String {
    let base = site_url.split('#').next().unwrap_or(site_url);
    format!("{}#layer-{}", base, layer.number())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub direct: String,
    pub linkedin: String,
    pub twitter: String,
    pub facebook: String,
}

impl ShareLinks {
    /// Links for sharing `url` on the social networks the presentation supports.
    pub fn for_url(url: &str, title: &str) -> Self {
        Self {
            direct: url.to_string(),
            linkedin: with_query(
                "https://www.linkedin.com/sharing/share-offsite/",
                &[("url", url)],
            ),
            twitter: with_query(
                "https://twitter.com/intent/tweet",
                &[("url", url), ("text", title)],
            ),
            facebook: with_query("https://www.facebook.com/sharer/sharer.php", &[("u", url)]),
        }
    }

    /// Share links for one layer, tracked as a share.
    pub fn for_layer(layer: LayerId, presentation: &PresentationSettings) -> Self {
        let url = share_url(&presentation.site_url, layer);
        let title = format!("Layer {}: {}", layer.number(), layer.title());
        analytics::track(&AnalyticsEvent::layer_shared(layer));
        Self::for_url(&url, &title)
    }
}

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::warn!("Failed to build share link for {}: {}", base, e);
            base.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::example::tokyo_trip;

    #[test]
    fn test_file_name_slug() {
        assert_eq!(file_name(LayerId::RawInput), "layer-1-raw-input.json");
        assert_eq!(
            file_name(LayerId::Tokenization),
            "layer-2-tokenization-(encode).json"
        );
        for layer in LayerId::ALL {
            let name = file_name(layer);
            assert!(name.starts_with(&format!("layer-{}-", layer.number())));
            assert!(!name.contains(char::is_whitespace));
            assert!(name.ends_with(".json"));
        }
    }

    #[test]
    fn test_export_document_shape() {
        let sim = tokyo_trip();
        let record = sim.record(LayerId::Tokenization);
        let now = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let export = LayerExport::new(record, &PresentationSettings::default(), now);

        let json: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        assert_eq!(json["layer"], 2);
        assert_eq!(json["title"], LayerId::Tokenization.title());
        assert_eq!(json["timestamp"], "2024-01-15T10:30:00.000Z");
        assert_eq!(json["data"]["kind"], "tokenization");
        assert_eq!(json["data"]["token_ids"][0], 21119);
        assert_eq!(json["url"], crate::settings::schema::DEFAULT_SITE_URL);
        assert_eq!(json["article"], crate::settings::schema::DEFAULT_ARTICLE_URL);
    }

    #[tokio::test]
    async fn test_export_layer_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");
        let sim = tokyo_trip();

        let path = export_layer(
            sim.record(LayerId::Attention),
            &PresentationSettings::default(),
            &out,
        )
        .await
        .unwrap();

        assert_eq!(path, out.join(file_name(LayerId::Attention)));
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["layer"], 7);
        assert_eq!(json["data"]["num_heads"], 96);
    }

    #[test]
    fn test_share_url() {
        assert_eq!(
            share_url("https://illusion-of-reasoning.netlify.app/", LayerId::Prediction),
            "https://illusion-of-reasoning.netlify.app/#layer-8"
        );
        assert_eq!(
            share_url("https://example.org/#layer-2", LayerId::RawInput),
            "https://example.org/#layer-1"
        );
    }

    #[test]
    fn test_share_links_encode_target() {
        let links = ShareLinks::for_url("https://example.org/#layer-1", "Layer 1: Raw");
        assert_eq!(links.direct, "https://example.org/#layer-1");
        assert!(links
            .linkedin
            .starts_with("https://www.linkedin.com/sharing/share-offsite/?url=https%3A%2F%2F"));
        assert!(links.linkedin.contains("%23layer-1"));
        assert!(links.twitter.contains("text=Layer+1%3A+Raw"));
        assert!(links.facebook.contains("?u=https%3A%2F%2Fexample.org"));
    }
}
