//! Clipping containment tests.
//!
//! Textures are generated dense enough to overrun their cells, then checked
//! both on the recorded geometry and on rasterized pixels.

use sonotex_backend_texture::geometry::{distance_to_segment, point_in_polygon, CellShape};
use sonotex_backend_texture::{
    rasterize, ClipCompositor, Color, DescriptorFeed, GridWalker, RecordingCanvas,
    TextureComposer,
};
use sonotex_spec::{GridSpec, PitchType, Point, ShapeKind, SoundDescriptor, TimbreType};

fn dense_descriptors() -> Vec<SoundDescriptor> {
    vec![
        SoundDescriptor::new(TimbreType::Mechanical, 7, PitchType::High, 6),
        SoundDescriptor::new(TimbreType::Organic, 5, PitchType::Low, 4),
        SoundDescriptor::new(TimbreType::None, 3, PitchType::None, 5),
    ]
}

fn draw(shape: ShapeKind) -> (RecordingCanvas, Vec<CellShape>) {
    let grid = GridSpec::new(shape, 3, 2, 30.0, Point::new(40.0, 40.0));
    let walker = GridWalker::new(grid.clone()).unwrap();
    let compositor = ClipCompositor::new(TextureComposer::default(), Color::black());
    let mut canvas = RecordingCanvas::new(240.0, 200.0);
    let mut feed = DescriptorFeed::new(dense_descriptors().into_iter().cycle().take(6));
    walker
        .walk(&mut canvas, &mut feed, &compositor, 3)
        .unwrap();

    let cells = walker
        .centers()
        .into_iter()
        .map(|center| CellShape::new(shape, center, grid.radius))
        .collect();
    (canvas, cells)
}

#[test]
fn test_visible_texture_stays_inside_clip() {
    for shape in [ShapeKind::Square, ShapeKind::Hexagon] {
        let (canvas, _) = draw(shape);
        let runs = canvas.visible_runs();
        assert!(!runs.is_empty());
        for run in runs {
            let command = &canvas.commands()[run.command];
            for clip in &command.clips {
                for p in &run.points {
                    assert!(
                        point_in_polygon(*p, clip),
                        "{:?}: point {:?} escaped its cell",
                        shape,
                        p
                    );
                }
            }
        }
    }
}

#[test]
fn test_unclipped_texture_overruns_cell() {
    // Without the clip, zigzag jitter and markers would spill out.
    let (canvas, _) = draw(ShapeKind::Hexagon);
    let escaped = canvas.commands().iter().filter(|c| !c.clips.is_empty()).any(|c| {
        let clip = &c.clips[0];
        c.path
            .flatten()
            .iter()
            .flat_map(|poly| poly.points.iter())
            .any(|p| !point_in_polygon(*p, clip))
    });
    assert!(escaped);
}

#[test]
fn test_ink_pixels_belong_to_cells() {
    for shape in [ShapeKind::Square, ShapeKind::Hexagon] {
        let (canvas, cells) = draw(shape);
        let buffer = rasterize(&canvas, Color::white()).unwrap();
        // outline stroke reaches half its width past the polygon
        let reach = 2.0 + 1e-9;
        let mut ink = 0;

        for y in 0..buffer.height {
            for x in 0..buffer.width {
                if buffer.get(x, y) != Color::black() {
                    continue;
                }
                ink += 1;
                let p = Point::new(x as f64 + 0.5, y as f64 + 0.5);
                let owned = cells.iter().any(|cell| {
                    cell.contains(p)
                        || (0..cell.vertices.len()).any(|i| {
                            let a = cell.vertices[i];
                            let b = cell.vertices[(i + 1) % cell.vertices.len()];
                            distance_to_segment(p, a, b) <= reach
                        })
                });
                assert!(owned, "{:?}: ink at ({}, {}) outside every cell", shape, x, y);
            }
        }
        assert!(ink > 0);
    }
}
