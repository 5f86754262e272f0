use std::fs;
use std::path::{Path, PathBuf};

use sgp4::{Constants, Elements};

use crate::predict::error::PredictError;
use crate::predict::types::SatelliteInfo;

pub struct TleEntry {
    pub info: SatelliteInfo,
    pub elements: Elements,
    pub constants: Constants,
}

pub struct TleLoader {
    tle_file: PathBuf,
}

impl TleLoader {
    pub fn new(tle_file: PathBuf) -> Self {
        Self { tle_file }
    }

    /// Load the entry for `norad_id`, or the first entry in the file
    pub fn load(&self, norad_id: Option<u32>) -> Result<TleEntry, PredictError> {
        let source = file_label(&self.tle_file);
        let content = fs::read_to_string(&self.tle_file)?;
        let entries = parse_tle_entries(&content, &source)?;
        log::debug!("Parsed {} TLE entries from {}", entries.len(), source);
        select_entry(entries, norad_id, &source)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Parse every TLE block in `content` with sgp4
pub fn parse_tle_entries(content: &str, source: &str) -> Result<Vec<TleEntry>, PredictError> {
    let invalid = |message: String| PredictError::InvalidTle {
        file: source.to_string(),
        message,
    };

    parse_multi_tle(content)
        .into_iter()
        .map(|(name, line1, line2)| {
            let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())
                .map_err(|e| invalid(e.to_string()))?;
            let constants =
                Constants::from_elements(&elements).map_err(|e| invalid(e.to_string()))?;
            let sat_name = name.unwrap_or_else(|| format!("NORAD {}", elements.norad_id));

            Ok(TleEntry {
                info: SatelliteInfo {
                    name: sat_name,
                    norad_id: elements.norad_id as u32,
                },
                elements,
                constants,
            })
        })
        .collect()
}

fn select_entry(
    entries: Vec<TleEntry>,
    norad_id: Option<u32>,
    source: &str,
) -> Result<TleEntry, PredictError> {
    let mut entries = entries.into_iter();
    match norad_id {
        Some(id) => entries
            .find(|e| e.info.norad_id == id)
            .ok_or_else(|| PredictError::SatelliteNotFound {
                file: source.to_string(),
                norad_id: id,
            }),
        None => entries
            .next()
            .ok_or_else(|| PredictError::NoSatellites(source.to_string())),
    }
}

/// Parse multi-satellite TLE content
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE (with name)
            result.push((
                Some(lines[i].to_string()),
                lines[i + 1].to_string(),
                lines[i + 2].to_string(),
            ));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}
