//! JSON configuration and result files

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::analysis::{MarkParams, ScanResults};
use crate::error::{MotifMarkError, Result};

/// Load parameters from a JSON file; absent fields keep their defaults
pub fn load_params(path: impl AsRef<Path>) -> Result<MarkParams> {
    let params: MarkParams = read_json(path.as_ref())?;
    debug!(?params, "loaded configuration");
    Ok(params)
}

pub fn save_params(path: impl AsRef<Path>, params: &MarkParams) -> Result<()> {
    write_json(path.as_ref(), params)
}

pub fn save_results(path: impl AsRef<Path>, results: &ScanResults) -> Result<()> {
    write_json(path.as_ref(), results)
}

pub fn load_results(path: impl AsRef<Path>) -> Result<ScanResults> {
    read_json(path.as_ref())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path).map_err(|e| MotifMarkError::io(path, e))?;
    Ok(serde_json::from_str(&json)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).map_err(|e| MotifMarkError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{
        ExonRegion, MotifHits, Occurrence, OccurrenceMap, ScanParams, SequenceScan, ThreadCount,
    };

    #[test]
    fn test_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(
            &path,
            r#"{"scan": {"thread_count": {"Fixed": 2}, "u_matches_t": true}}"#,
        )
        .unwrap();
        let params = load_params(&path).unwrap();
        assert_eq!(params.scan.thread_count, ThreadCount::Fixed(2));
        assert!(params.scan.u_matches_t);
        assert_eq!(params.render.width, 1200.0);

        save_params(&path, &params).unwrap();
        assert_eq!(load_params(&path).unwrap(), params);
    }

    #[test]
    fn test_saved_settings_keep_viewer_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motif_mark.json");
        let mut params = MarkParams::default();
        params.scan.u_matches_t = true;
        params.render.pixels_per_base = 2.5;
        params.render.motif_opacity = 0.8;

        save_params(&path, &params).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"u_matches_t\": true"));
        let loaded = load_params(&path).unwrap();
        assert!(loaded.scan.u_matches_t);
        assert_eq!(loaded.render.pixels_per_base, 2.5);
        assert_eq!(loaded, params);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_params(&path), Err(MotifMarkError::Json(_))));
    }

    #[test]
    fn test_results_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");
        let mut results = ScanResults::new(ScanParams::default(), vec!["CATAG".to_string()]);
        results.scans.push(SequenceScan {
            name: "gene".to_string(),
            length: 11,
            exon: ExonRegion { start: 3, end: 8 },
            occurrences: OccurrenceMap {
                entries: vec![MotifHits {
                    motif: "CATAG".to_string(),
                    occurrences: vec![Occurrence::new(3, 8)],
                }],
            },
        });

        save_results(&path, &results).unwrap();
        assert_eq!(load_results(&path).unwrap(), results);
    }
}
