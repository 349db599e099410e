//! Statistical format classification for decompressed payloads.
//!
//! No format tag survives in the archive, so each candidate encoding is
//! scored by fixed probes over sub-regions of the payload, laid out where
//! that encoding keeps its color and alpha sub-blocks. The scores are
//! heuristic; the selection rule is what makes the outcome deterministic.

use crate::format::TextureFormat;

/// Reserved placeholder color upstream tooling writes into empty blocks. A
/// window dominated by it is not real color data.
const PLACEHOLDER_GREEN: [i32; 3] = [0, 160, 0];

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Squared RGB distance below which consecutive block colors count as
    /// coherent.
    pub coherence_threshold: i64,
    /// Placeholder-green units tolerated per window before the color probes
    /// bail out with the sentinel.
    pub placeholder_limit: usize,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            coherence_threshold: 1000,
            placeholder_limit: 10,
        }
    }
}

pub type ProbeFn = fn(&[u8], &ClassifierConfig) -> f64;

/// One row of the format registry: the optional scoring probe and whether
/// the classifier may select the format at all. Block geometry lives on
/// [`TextureFormat`]; adding or removing a format is a data change here,
/// not new control flow.
pub struct FormatProfile {
    pub format: TextureFormat,
    pub probe: Option<ProbeFn>,
    pub selectable: bool,
}

/// Candidate formats in tie-break order: the first highest score wins.
///
/// BC2 has no probe and is never selected. BC5 has no probe either; it
/// scores zero and only wins when every scored candidate is excluded or
/// lands below zero.
pub const FORMAT_REGISTRY: &[FormatProfile] = &[
    FormatProfile { format: TextureFormat::Bc1, probe: Some(score_bc1), selectable: true },
    FormatProfile { format: TextureFormat::Bc2, probe: None, selectable: false },
    FormatProfile { format: TextureFormat::Bc3, probe: Some(score_bc3), selectable: true },
    FormatProfile { format: TextureFormat::Bc4, probe: Some(score_bc4), selectable: true },
    FormatProfile { format: TextureFormat::Bc5, probe: None, selectable: true },
    FormatProfile { format: TextureFormat::R8, probe: None, selectable: true },
];

pub struct FormatClassifier {
    config: ClassifierConfig,
}

impl FormatClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Assigns exactly one format to a payload: filter candidates whose
    /// block size does not divide the length, score the rest, keep the
    /// first maximum in registry order.
    #[must_use]
    pub fn classify(&self, payload: &[u8]) -> TextureFormat {
        let mut best: Option<(TextureFormat, f64)> = None;
        for profile in FORMAT_REGISTRY {
            if !profile.selectable || payload.len() % profile.format.block_size() != 0 {
                continue;
            }
            let score = profile
                .probe
                .map_or(0.0, |probe| probe(payload, &self.config));
            match best {
                Some((_, leader)) if score <= leader => {}
                _ => best = Some((profile.format, score)),
            }
        }
        // R8 has block size 1 and is always a surviving candidate.
        best.map_or(TextureFormat::R8, |(format, _)| format)
    }
}

impl Default for FormatClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn score_bc1(payload: &[u8], config: &ClassifierConfig) -> f64 {
    let half = payload.len() / 2;
    color_coherence_score(&payload[..half], config) + color_scatter_score(&payload[half..], config)
}

fn score_bc3(payload: &[u8], config: &ClassifierConfig) -> f64 {
    // BC3 interleaves an alpha sub-block before each color sub-block, so the
    // smooth and color probes each look at the eighths where their kind of
    // data concentrates.
    let eighth = payload.len() / 8;
    let sum = smooth_marker_score(&payload[..eighth])
        + color_coherence_score(&payload[eighth..eighth * 2], config)
        + saturated_byte_score(&payload[eighth * 3..eighth * 6])
        + color_scatter_score(&payload[eighth * 6..eighth * 8], config);
    sum / 2.0
}

fn score_bc4(payload: &[u8], _config: &ClassifierConfig) -> f64 {
    let half = payload.len() / 2;
    smooth_marker_score(&payload[..half]) + saturated_byte_score(&payload[half..])
}

/// Averaged 5-6-5 color of one 4-byte endpoint pair, interpolated with the
/// block coder's divide-by-3 step (floor semantics).
fn average_unit_color(unit: &[u8]) -> [i32; 3] {
    let combine = |high: i32, low: i32| low + (high - low).div_euclid(3);

    let r1 = i32::from(unit[1] & 0b1111_1000);
    let g1 = (i32::from(unit[1] & 0b0000_0111) << 5) + (i32::from(unit[0] & 0b1110_0000) >> 3);
    let b1 = i32::from(unit[0] & 0b0001_1111) << 3;
    let r2 = i32::from(unit[3] & 0b1111_1000);
    let g2 = (i32::from(unit[3] & 0b0000_0111) << 5) + (i32::from(unit[2] & 0b1110_0000) >> 3);
    let b2 = i32::from(unit[2] & 0b0001_1111) << 3;

    [combine(r1, r2), combine(g1, g2), combine(b1, b2)]
}

/// Fraction of 4-byte color units whose averaged color sits within the
/// coherence threshold of the previous unit's (the first is measured against
/// black). Returns the `-1` sentinel when the window holds more
/// placeholder-green units than the config tolerates.
fn color_coherence_score(window: &[u8], config: &ClassifierConfig) -> f64 {
    let units = window.len() / 4;
    if units == 0 {
        return 0.0;
    }

    let mut good = 0usize;
    let mut greens = 0usize;
    let mut prev = [0i32; 3];
    for unit in window.chunks_exact(4) {
        let color = average_unit_color(unit);
        let mut dist: i64 = color
            .iter()
            .zip(prev.iter())
            .map(|(c, p)| i64::from(c - p).pow(2))
            .sum();
        if color == PLACEHOLDER_GREEN {
            greens += 1;
            // Placeholder units can never count as coherent.
            dist = i64::MAX;
        }
        if dist < config.coherence_threshold {
            good += 1;
        }
        prev = color;
    }

    if greens > config.placeholder_limit {
        return -1.0;
    }
    good as f64 / units as f64
}

/// Inverse of the coherence probe on its own window: high when consecutive
/// block colors scatter. The placeholder-green sentinel applies
/// independently here, not as `1 - (-1)`.
fn color_scatter_score(window: &[u8], config: &ClassifierConfig) -> f64 {
    if window.len() < 4 {
        return 0.0;
    }
    let coherent = color_coherence_score(window, config);
    if coherent < 0.0 {
        return -1.0;
    }
    1.0 - coherent
}

/// Fraction of 2-byte units equal to the flat-block marker `00 05`.
fn smooth_marker_score(window: &[u8]) -> f64 {
    let units = window.len() / 2;
    if units == 0 {
        return 0.0;
    }
    let hits = window
        .chunks_exact(2)
        .filter(|unit| unit[0] == 0x00 && unit[1] == 0x05)
        .count();
    hits as f64 / units as f64
}

/// Fraction of bytes pinned to 0x00 or 0xFF, typical of saturated
/// single-channel data.
fn saturated_byte_score(window: &[u8]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let hits = window.iter().filter(|&&byte| byte == 0x00 || byte == 0xFF).count();
    hits as f64 / window.len() as f64
}
