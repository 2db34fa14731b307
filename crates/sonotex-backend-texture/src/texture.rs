//! Cell texture composition.
//!
//! A cell of width `W` is divided into `n` bands per axis, `n` being the
//! descriptor intensity, so the tiling gap is `W / n`. The first copy of
//! each pattern sits half a gap in from the cell's top-left corner, which
//! centers the tiling in the cell for every `n`.
//!
//! The timbre texture is a crossed grid of `n` vertical and `n` horizontal
//! lines. The pitch texture is an `n × n` grid of markers. Lines are drawn
//! beneath markers.

use sonotex_spec::{Point, SoundDescriptor, TextureStyle};

use crate::error::TextureError;
use crate::line_pattern::{LineRequest, LineVariant};
use crate::rng::DeterministicRng;
use crate::shape_pattern::MarkerVariant;
use crate::tiler::{tile_over_field, FieldTiling, TiledPath};

/// Both textures for one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellTexture {
    pub line_variant: LineVariant,
    pub marker_variant: MarkerVariant,
    /// Timbre lines, drawn first.
    pub lines: TiledPath,
    /// Pitch markers, drawn over the lines.
    pub markers: TiledPath,
}

/// Tiling gap and first-copy position for a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileLayout {
    pub gap: f64,
    /// Top-left-inward corner: half a gap in from the cell corner.
    pub start: Point,
}

impl TileLayout {
    /// Layout for a cell of `width` centered at `center` at `intensity`.
    ///
    /// An intensity of zero is treated as one.
    pub fn new(center: Point, width: f64, intensity: u32) -> Self {
        let gap = width / intensity.max(1) as f64;
        let inset = width / 2.0 - gap / 2.0;
        Self {
            gap,
            start: Point::new(center.x - inset, center.y - inset),
        }
    }
}

/// Builds cell textures from descriptors.
#[derive(Debug, Clone)]
pub struct TextureComposer {
    style: TextureStyle,
}

impl TextureComposer {
    /// Create a composer with the given style.
    pub fn new(style: TextureStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &TextureStyle {
        &self.style
    }

    /// Compose both textures for a cell.
    pub fn compose(
        &self,
        descriptor: &SoundDescriptor,
        center: Point,
        width: f64,
        rng: &mut DeterministicRng,
    ) -> Result<CellTexture, TextureError> {
        if !(width.is_finite() && width > 0.0) {
            return Err(TextureError::InvalidCellWidth(width));
        }

        let line_variant = LineVariant::for_timbre(descriptor.timbre);
        let marker_variant = MarkerVariant::for_pitch(descriptor.pitch);
        let lines = self.timbre_texture(
            line_variant,
            descriptor.timbre_intensity(),
            center,
            width,
            rng,
        )?;
        let markers =
            self.pitch_texture(marker_variant, descriptor.pitch_intensity(), center, width)?;

        Ok(CellTexture {
            line_variant,
            marker_variant,
            lines,
            markers,
        })
    }

    /// Crossed line grid at `intensity` lines per axis.
    pub fn timbre_texture(
        &self,
        variant: LineVariant,
        intensity: u32,
        center: Point,
        width: f64,
        rng: &mut DeterministicRng,
    ) -> Result<TiledPath, TextureError> {
        let layout = TileLayout::new(center, width, intensity);
        let request = LineRequest {
            origin: Point::new(layout.start.x, center.y - width / 2.0),
            length: width,
            stroke_width: self.style.line_stroke_width,
        };
        let unit = variant.generate(&request, &self.style, rng)?;
        Ok(tile_over_field(
            &unit,
            intensity.max(1),
            layout.gap,
            FieldTiling::Crossed,
            center,
        ))
    }

    /// `intensity × intensity` marker grid.
    pub fn pitch_texture(
        &self,
        variant: MarkerVariant,
        intensity: u32,
        center: Point,
        width: f64,
    ) -> Result<TiledPath, TextureError> {
        let layout = TileLayout::new(center, width, intensity);
        let unit = variant.generate(
            layout.start,
            variant.size_from(&self.style.markers),
            self.style.markers_filled,
            self.style.marker_stroke_width,
        )?;
        Ok(tile_over_field(
            &unit,
            intensity.max(1),
            layout.gap,
            FieldTiling::Grid,
            center,
        ))
    }
}

impl Default for TextureComposer {
    fn default() -> Self {
        Self::new(TextureStyle::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonotex_spec::{PitchType, TimbreType};

    #[test]
    fn test_layout_centers_tiling() {
        let layout = TileLayout::new(Point::new(100.0, 100.0), 80.0, 2);
        assert_eq!(layout.gap, 40.0);
        assert_eq!(layout.start, Point::new(80.0, 80.0));

        let single = TileLayout::new(Point::new(100.0, 100.0), 80.0, 1);
        assert_eq!(single.start, Point::new(100.0, 100.0));

        let zero = TileLayout::new(Point::new(0.0, 0.0), 80.0, 0);
        assert_eq!(zero.gap, 80.0);
    }

    #[test]
    fn test_compose_counts_follow_intensity() {
        let composer = TextureComposer::default();
        let descriptor = SoundDescriptor::new(TimbreType::Mechanical, 3, PitchType::High, 4);
        let mut rng = DeterministicRng::new(5);
        let texture = composer
            .compose(&descriptor, Point::new(100.0, 100.0), 80.0, &mut rng)
            .unwrap();

        assert_eq!(texture.line_variant, LineVariant::ZigZag);
        assert_eq!(texture.marker_variant, MarkerVariant::Arrow);
        assert_eq!(texture.lines.copies, 6);
        assert_eq!(texture.lines.path.subpath_count(), 6);
        assert_eq!(texture.markers.copies, 16);
        assert_eq!(texture.markers.path.subpath_count(), 16);
        assert_eq!(texture.markers.net_offset, (0.0, 0.0));
    }

    #[test]
    fn test_markers_stay_near_cell() {
        let composer = TextureComposer::default();
        let descriptor = SoundDescriptor::new(TimbreType::None, 1, PitchType::Low, 5);
        let mut rng = DeterministicRng::new(0);
        let texture = composer
            .compose(&descriptor, Point::new(0.0, 0.0), 80.0, &mut rng)
            .unwrap();
        let b = texture.markers.path.bounds().unwrap();
        // First marker center at -32, last at +32, circle radius 8
        assert!((b.x0 + 40.0).abs() < 1e-6 && (b.x1 - 40.0).abs() < 1e-6);
        assert!((b.y0 + 40.0).abs() < 1e-6 && (b.y1 - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_straight_lines_positions() {
        let composer = TextureComposer::default();
        let mut rng = DeterministicRng::new(0);
        let lines = composer
            .timbre_texture(LineVariant::Straight, 2, Point::new(100.0, 100.0), 80.0, &mut rng)
            .unwrap();
        let mut xs: Vec<f64> = lines
            .path
            .flatten()
            .iter()
            .filter(|p| (p.points[0].x - p.points[1].x).abs() < 1e-9)
            .map(|p| p.points[0].x)
            .collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(xs, vec![80.0, 120.0]);
    }

    #[test]
    fn test_rejects_bad_width() {
        let composer = TextureComposer::default();
        let mut rng = DeterministicRng::new(0);
        assert_eq!(
            composer
                .compose(&SoundDescriptor::default(), Point::ZERO, 0.0, &mut rng)
                .unwrap_err(),
            TextureError::InvalidCellWidth(0.0)
        );
    }
}
