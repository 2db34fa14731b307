//! End-to-end grid traversal tests.
//!
//! These drive the walker through the public API and check cell placement,
//! per-cell texture counts, descriptor defaulting, and that the canvas state
//! is balanced afterwards.

use pretty_assertions::assert_eq;
use sonotex_backend_texture::{
    Affine, ClipCompositor, Color, DescriptorFeed, GridWalker, LineVariant, MarkerVariant,
    RecordingCanvas, TextureComposer,
};
use sonotex_backend_texture::geometry::CellShape;
use sonotex_spec::{
    DescriptorRecord, GridSpec, PitchType, Point, ShapeKind, SoundDescriptor, TimbreType,
    MAX_INTENSITY,
};

fn compositor() -> ClipCompositor {
    ClipCompositor::new(TextureComposer::default(), Color::black()).with_background(Color::white())
}

fn square_grid() -> GridWalker {
    GridWalker::new(GridSpec::new(
        ShapeKind::Square,
        2,
        2,
        40.0,
        Point::new(100.0, 100.0),
    ))
    .unwrap()
}

fn record(timbre: &str, ti: u32, pitch: &str, pi: u32) -> SoundDescriptor {
    DescriptorRecord {
        row: 1,
        timbre: timbre.to_string(),
        timbre_intensity: ti,
        pitch: pitch.to_string(),
        pitch_intensity: pi,
    }
    .resolve()
    .0
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_two_by_two_square_grid() {
    let descriptors = vec![
        record("organic", 2, "low", 2),
        record("mechanical", 3, "high", 3),
        record("organic", 1, "high", 1),
        record("mechanical", 5, "low", 5),
    ];
    let mut canvas = RecordingCanvas::new(300.0, 300.0);
    let mut feed = DescriptorFeed::new(descriptors);

    let report = square_grid()
        .walk(&mut canvas, &mut feed, &compositor(), 7)
        .unwrap();

    let centers: Vec<Point> = report.cells.iter().map(|c| c.center).collect();
    assert_eq!(
        centers,
        vec![
            Point::new(100.0, 100.0),
            Point::new(180.0, 100.0),
            Point::new(100.0, 180.0),
            Point::new(180.0, 180.0),
        ]
    );

    let lines: Vec<usize> = report.cells.iter().map(|c| c.line_copies).collect();
    let markers: Vec<usize> = report.cells.iter().map(|c| c.marker_copies).collect();
    assert_eq!(lines, vec![4, 6, 2, 10]);
    assert_eq!(markers, vec![4, 9, 1, 25]);

    assert_eq!(report.defaulted_cells, 0);
    assert_eq!(report.cells[3].descriptor.timbre, TimbreType::Mechanical);
    assert_eq!(report.cells[3].descriptor.pitch, PitchType::Low);

    // background, lines, markers, outline per cell
    assert_eq!(canvas.commands().len(), 16);
    assert!(canvas.is_balanced());
    assert_eq!(canvas.current_transform(), Affine::IDENTITY);
}

#[test]
fn test_unknown_classes_fall_back() {
    let walker =
        GridWalker::new(GridSpec::new(ShapeKind::Square, 1, 1, 40.0, Point::new(50.0, 50.0)))
            .unwrap();
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    let mut feed = DescriptorFeed::new(vec![record("glass", 5, "mid", 5)]);
    let report = walker.walk(&mut canvas, &mut feed, &compositor(), 0).unwrap();

    assert_eq!(report.cells[0].descriptor.timbre, TimbreType::None);
    assert_eq!(report.cells[0].descriptor.pitch, PitchType::None);
    assert_eq!(report.cells[0].line_copies, 10);
    assert_eq!(report.cells[0].marker_copies, 25);
    assert_eq!(LineVariant::for_timbre_name("glass"), LineVariant::Straight);
    assert_eq!(MarkerVariant::for_pitch_name("mid"), MarkerVariant::Triangle);
}

#[test]
fn test_hexagon_vertices() {
    let cell = CellShape::new(ShapeKind::Hexagon, Point::new(50.0, 60.0), 20.0);
    assert_eq!(cell.vertices.len(), 6);
    for (k, v) in cell.vertices.iter().enumerate() {
        let angle = (60.0 * k as f64).to_radians();
        let expected = Point::new(50.0 + 20.0 * angle.cos(), 60.0 + 20.0 * angle.sin());
        assert!(v.distance(expected) < 1e-9, "vertex {}: {:?}", k, v);
    }
}

#[test]
fn test_every_cell_visited_once() {
    for shape in [ShapeKind::Square, ShapeKind::Hexagon] {
        let walker =
            GridWalker::new(GridSpec::new(shape, 5, 8, 40.0, Point::new(65.0, 97.0))).unwrap();
        let mut canvas = RecordingCanvas::new(1512.0, 1512.0);
        let mut feed = DescriptorFeed::new(Vec::new());
        let report = walker
            .walk(&mut canvas, &mut feed, &compositor(), 0)
            .unwrap();

        assert_eq!(report.cells.len(), 40);
        for (i, cell) in report.cells.iter().enumerate() {
            assert_eq!(cell.row as usize, i / 5);
            assert_eq!(cell.column as usize, i % 5);
        }
        let mut centers: Vec<(i64, i64)> = report
            .cells
            .iter()
            .map(|c| ((c.center.x * 1e6).round() as i64, (c.center.y * 1e6).round() as i64))
            .collect();
        centers.sort();
        centers.dedup();
        assert_eq!(centers.len(), 40, "{:?} cells overlap", shape);
        assert!(canvas.is_balanced());
        assert_eq!(canvas.current_transform(), Affine::IDENTITY);
        // outlines are drawn under the cell translation, so the last one
        // sits around the last visited center
        let last = report.cells.last().unwrap().center;
        let outline = canvas.commands().last().unwrap().path.bounds().unwrap();
        assert!((outline.center() - last).hypot() < 1e-9, "{:?}", shape);
    }
}

// ============================================================================
// Descriptor feed
// ============================================================================

#[test]
fn test_short_feed_defaults_remaining_cells() {
    let mut canvas = RecordingCanvas::new(300.0, 300.0);
    let first = SoundDescriptor::new(TimbreType::Organic, 4, PitchType::High, 2);
    let mut feed = DescriptorFeed::new(vec![first]);

    let report = square_grid()
        .walk(&mut canvas, &mut feed, &compositor(), 0)
        .unwrap();

    assert_eq!(report.defaulted_cells, 3);
    assert!(!report.cells[0].defaulted);
    assert_eq!(report.cells[0].descriptor, first);
    for cell in &report.cells[1..] {
        assert!(cell.defaulted);
        assert_eq!(cell.descriptor, SoundDescriptor::default());
        assert_eq!(cell.line_copies, 2);
        assert_eq!(cell.marker_copies, 1);
    }
}

#[test]
fn test_huge_intensity_is_capped() {
    let mut canvas = RecordingCanvas::new(300.0, 300.0);
    let mut feed = DescriptorFeed::new(vec![record("none", 1, "low", 3000)]);
    let report = square_grid()
        .walk(&mut canvas, &mut feed, &compositor(), 0)
        .unwrap();
    let cap = MAX_INTENSITY as usize;
    assert_eq!(report.cells[0].descriptor.pitch_intensity(), MAX_INTENSITY);
    assert_eq!(report.cells[0].marker_copies, cap * cap);
}

#[test]
fn test_zero_intensity_draws_one_copy() {
    let mut canvas = RecordingCanvas::new(300.0, 300.0);
    let mut feed = DescriptorFeed::new(vec![record("organic", 0, "low", 0)]);
    let report = square_grid()
        .walk(&mut canvas, &mut feed, &compositor(), 0)
        .unwrap();
    assert_eq!(report.cells[0].line_copies, 2);
    assert_eq!(report.cells[0].marker_copies, 1);
}

// ============================================================================
// Determinism
// ============================================================================

fn draw(seed: u32, descriptors: Vec<SoundDescriptor>) -> RecordingCanvas {
    let mut canvas = RecordingCanvas::new(300.0, 300.0);
    let mut feed = DescriptorFeed::new(descriptors);
    square_grid()
        .walk(&mut canvas, &mut feed, &compositor(), seed)
        .unwrap();
    canvas
}

#[test]
fn test_same_seed_same_drawing() {
    let descriptors = vec![SoundDescriptor::new(TimbreType::Mechanical, 4, PitchType::Low, 3); 4];
    let a = draw(11, descriptors.clone());
    let b = draw(11, descriptors.clone());
    assert_eq!(a.commands(), b.commands());

    let c = draw(12, descriptors);
    assert_ne!(a.commands(), c.commands());
}

#[test]
fn test_cells_draw_independently() {
    let zigzag = SoundDescriptor::new(TimbreType::Mechanical, 3, PitchType::None, 2);
    let a = draw(5, vec![zigzag; 4]);
    let mut changed = vec![zigzag; 4];
    changed[0] = SoundDescriptor::new(TimbreType::Mechanical, 6, PitchType::High, 5);
    let b = draw(5, changed);

    // commands 4.. belong to cells 1-3
    assert_ne!(a.commands()[..4], b.commands()[..4]);
    assert_eq!(a.commands()[4..], b.commands()[4..]);
}
