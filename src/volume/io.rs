//! I/O helpers for 8-bit scalar volumes and JSON.
//!
//! - `load_raw_volume`: read a flat binary file of u8 samples.
//! - `load_volume_header`: read a detached NRRD-style header and its raw file.
//! - `load_volume`: pick one of the two by file extension.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::VolumeU8;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Owned 8-bit scalar volume with borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayVolumeU8 {
    resolution: Option<[usize; 3]>,
    data: Vec<u8>,
}

impl GrayVolumeU8 {
    /// Wrap a flat buffer of unknown shape.
    pub fn from_raw(data: Vec<u8>) -> Self {
        Self {
            resolution: None,
            data,
        }
    }

    /// Wrap a buffer laid out on an `x * y * z` grid.
    pub fn with_resolution(resolution: [usize; 3], data: Vec<u8>) -> Result<Self, String> {
        let expected = resolution.iter().product::<usize>();
        if expected != data.len() {
            return Err(format!(
                "Volume size mismatch: {} samples for resolution {:?} (expected {expected})",
                data.len(),
                resolution
            ));
        }
        Ok(Self {
            resolution: Some(resolution),
            data,
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn resolution(&self) -> Option<[usize; 3]> {
        self.resolution
    }

    /// Borrow as a read-only `VolumeU8` view
    pub fn as_view(&self) -> VolumeU8<'_> {
        VolumeU8 {
            resolution: self.resolution,
            data: &self.data,
        }
    }
}

/// Load a volume, treating `.nhdr` files as detached headers and anything
/// else as a flat raw dump.
pub fn load_volume(path: &Path) -> Result<GrayVolumeU8, String> {
    let is_header = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("nhdr"));
    if is_header {
        load_volume_header(path)
    } else {
        load_raw_volume(path)
    }
}

/// Read a flat binary file of unsigned 8-bit samples.
pub fn load_raw_volume(path: &Path) -> Result<GrayVolumeU8, String> {
    let data = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    debug!("loaded {} raw samples from {}", data.len(), path.display());
    Ok(GrayVolumeU8::from_raw(data))
}

/// Fields recovered from a detached volume header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VolumeHeader {
    pub resolution: [usize; 3],
    pub data_file: PathBuf,
}

/// Parse the `sizes:` and `data file:` lines of a detached header.
pub fn parse_volume_header(text: &str) -> Result<VolumeHeader, String> {
    let mut resolution = None;
    let mut data_file = None;
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("sizes:") {
            let dims = rest
                .split_whitespace()
                .map(|tok| tok.parse::<usize>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| format!("Failed to parse volume sizes '{}': {e}", rest.trim()))?;
            if dims.len() != 3 {
                return Err(format!(
                    "Expected three volume sizes, found {}",
                    dims.len()
                ));
            }
            resolution = Some([dims[0], dims[1], dims[2]]);
        } else if let Some(rest) = line.strip_prefix("data file:") {
            let trimmed = rest.trim();
            if !trimmed.is_empty() {
                data_file = Some(PathBuf::from(trimmed));
            }
        }
    }

    let resolution = resolution
        .filter(|r| r.iter().all(|&d| d > 0))
        .ok_or_else(|| "Failed to parse volume resolution".to_string())?;
    let data_file =
        data_file.ok_or_else(|| "Failed to parse data file path from header".to_string())?;
    Ok(VolumeHeader {
        resolution,
        data_file,
    })
}

/// Load a volume described by a detached header; the data file path is
/// resolved relative to the header's directory.
pub fn load_volume_header(path: &Path) -> Result<GrayVolumeU8, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to open header {}: {e}", path.display()))?;
    let header = parse_volume_header(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    let raw_path = path
        .parent()
        .map(|dir| dir.join(&header.data_file))
        .unwrap_or_else(|| header.data_file.clone());
    let data = fs::read(&raw_path)
        .map_err(|e| format!("Failed to open raw data file {}: {e}", raw_path.display()))?;
    let expected = header.resolution.iter().product::<usize>();
    if data.len() != expected {
        return Err(format!(
            "File size mismatch for {}: read {}, expected {expected}",
            raw_path.display(),
            data.len()
        ));
    }
    debug!(
        "loaded {:?} volume from {}",
        header.resolution,
        raw_path.display()
    );
    GrayVolumeU8::with_resolution(header.resolution, data)
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
