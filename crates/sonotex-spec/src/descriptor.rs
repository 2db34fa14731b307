//! Sound descriptors: the per-cell input record.
//!
//! A descriptor pairs a timbre class and a pitch class with an intensity for
//! each. Intensities drive tiling density, so they are clamped to
//! `1..=MAX_INTENSITY` when a descriptor is accepted. Unrecognized class names fall back to the
//! `None` variant of their enum, which selects the default line (straight)
//! and marker (triangle) generators downstream.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationWarning, WarningCode};

/// Largest intensity a descriptor keeps. A cell at intensity `n` holds
/// `n * n` markers, so larger values are clamped down to this.
pub const MAX_INTENSITY: u32 = 64;

/// Timbre class of a sound, selecting the line-pattern variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimbreType {
    Organic,
    Mechanical,
    #[default]
    None,
}

impl TimbreType {
    /// Get the class name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimbreType::Organic => "organic",
            TimbreType::Mechanical => "mechanical",
            TimbreType::None => "none",
        }
    }

    /// Parse a class name, returning `None` for unrecognized input.
    pub fn from_name(name: &str) -> Option<TimbreType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "organic" => Some(TimbreType::Organic),
            "mechanical" => Some(TimbreType::Mechanical),
            "none" | "" => Some(TimbreType::None),
            _ => None,
        }
    }

    /// Parse a class name, falling back to [`TimbreType::None`].
    pub fn from_name_or_default(name: &str) -> TimbreType {
        Self::from_name(name).unwrap_or_default()
    }
}

/// Pitch class of a sound, selecting the marker-shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchType {
    High,
    Low,
    #[default]
    None,
}

impl PitchType {
    /// Get the class name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PitchType::High => "high",
            PitchType::Low => "low",
            PitchType::None => "none",
        }
    }

    /// Parse a class name, returning `None` for unrecognized input.
    pub fn from_name(name: &str) -> Option<PitchType> {
        match name.trim().to_ascii_lowercase().as_str() {
            "high" => Some(PitchType::High),
            "low" => Some(PitchType::Low),
            "none" | "" => Some(PitchType::None),
            _ => None,
        }
    }

    /// Parse a class name, falling back to [`PitchType::None`].
    pub fn from_name_or_default(name: &str) -> PitchType {
        Self::from_name(name).unwrap_or_default()
    }
}

/// One cell's worth of sound data.
///
/// Both intensities are always >= 1; use [`SoundDescriptor::new`] to build one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SoundDescriptor {
    pub timbre: TimbreType,
    timbre_intensity: u32,
    pub pitch: PitchType,
    pitch_intensity: u32,
}

impl SoundDescriptor {
    /// Create a descriptor, clamping both intensities to `1..=MAX_INTENSITY`.
    pub fn new(timbre: TimbreType, timbre_intensity: u32, pitch: PitchType, pitch_intensity: u32) -> Self {
        Self {
            timbre,
            timbre_intensity: timbre_intensity.clamp(1, MAX_INTENSITY),
            pitch,
            pitch_intensity: pitch_intensity.clamp(1, MAX_INTENSITY),
        }
    }

    /// Line-texture density.
    pub fn timbre_intensity(&self) -> u32 {
        self.timbre_intensity
    }

    /// Marker-texture density.
    pub fn pitch_intensity(&self) -> u32 {
        self.pitch_intensity
    }
}

impl Default for SoundDescriptor {
    /// The descriptor substituted for cells past the end of the data feed.
    fn default() -> Self {
        Self::new(TimbreType::None, 1, PitchType::None, 1)
    }
}

/// A descriptor as read from a table, before class and intensity policies apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorRecord {
    /// 1-based data row number.
    pub row: usize,
    pub timbre: String,
    pub timbre_intensity: u32,
    pub pitch: String,
    pub pitch_intensity: u32,
}

impl DescriptorRecord {
    /// Apply fallback and clamping policies, collecting a warning for each
    /// value that had to be replaced.
    pub fn resolve(&self) -> (SoundDescriptor, Vec<ValidationWarning>) {
        let location = format!("row {}", self.row);
        let mut warnings = Vec::new();

        let timbre = TimbreType::from_name(&self.timbre).unwrap_or_else(|| {
            warnings.push(ValidationWarning::with_path(
                WarningCode::UnknownTimbre,
                format!("unknown timbre '{}', using straight lines", self.timbre),
                location.clone(),
            ));
            TimbreType::None
        });
        let pitch = PitchType::from_name(&self.pitch).unwrap_or_else(|| {
            warnings.push(ValidationWarning::with_path(
                WarningCode::UnknownPitch,
                format!("unknown pitch '{}', using triangle markers", self.pitch),
                location.clone(),
            ));
            PitchType::None
        });
        for (column, value) in [
            ("timbreIntensity", self.timbre_intensity),
            ("pitchIntensity", self.pitch_intensity),
        ] {
            let clamped = value.clamp(1, MAX_INTENSITY);
            if clamped != value {
                warnings.push(ValidationWarning::with_path(
                    WarningCode::ClampedIntensity,
                    format!("{} of {} clamped to {}", column, value, clamped),
                    location.clone(),
                ));
            }
        }

        let descriptor =
            SoundDescriptor::new(timbre, self.timbre_intensity, pitch, self.pitch_intensity);
        (descriptor, warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timbre: &str, ti: u32, pitch: &str, pi: u32) -> DescriptorRecord {
        DescriptorRecord {
            row: 1,
            timbre: timbre.to_string(),
            timbre_intensity: ti,
            pitch: pitch.to_string(),
            pitch_intensity: pi,
        }
    }

    #[test]
    fn test_new_clamps_zero_intensity() {
        let d = SoundDescriptor::new(TimbreType::Organic, 0, PitchType::Low, 0);
        assert_eq!(d.timbre_intensity(), 1);
        assert_eq!(d.pitch_intensity(), 1);
    }

    #[test]
    fn test_default_is_none_none_one() {
        let d = SoundDescriptor::default();
        assert_eq!(d.timbre, TimbreType::None);
        assert_eq!(d.pitch, PitchType::None);
        assert_eq!(d.timbre_intensity(), 1);
        assert_eq!(d.pitch_intensity(), 1);
    }

    #[test]
    fn test_unknown_classes_fall_back() {
        let (d, warnings) = record("glass", 2, "mid", 3).resolve();
        assert_eq!(d.timbre, TimbreType::None);
        assert_eq!(d.pitch, PitchType::None);
        let codes: Vec<_> = warnings.iter().map(|w| w.code).collect();
        assert_eq!(codes, vec![WarningCode::UnknownTimbre, WarningCode::UnknownPitch]);
    }

    #[test]
    fn test_class_names_are_case_insensitive() {
        let (d, warnings) = record(" Organic", 2, "HIGH", 3).resolve();
        assert_eq!(d.timbre, TimbreType::Organic);
        assert_eq!(d.pitch, PitchType::High);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_zero_intensity_warns() {
        let (d, warnings) = record("mechanical", 0, "low", 4).resolve();
        assert_eq!(d.timbre_intensity(), 1);
        assert_eq!(d.pitch_intensity(), 4);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::ClampedIntensity);
    }

    #[test]
    fn test_large_intensity_is_clamped() {
        let (d, warnings) = record("organic", MAX_INTENSITY, "high", 3000).resolve();
        assert_eq!(d.timbre_intensity(), MAX_INTENSITY);
        assert_eq!(d.pitch_intensity(), MAX_INTENSITY);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, WarningCode::ClampedIntensity);
        assert!(warnings[0].message.contains("pitchIntensity of 3000"));

        let d = SoundDescriptor::new(TimbreType::None, u32::MAX, PitchType::None, 1);
        assert_eq!(d.timbre_intensity(), MAX_INTENSITY);
    }
}
