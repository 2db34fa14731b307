//! Export tests: full pipeline from config to files on disk.

use sonotex_backend_texture::export::{self, ExportError, ExportFormat};
use sonotex_backend_texture::png::hash_png;
use sonotex_backend_texture::{generate_texture_grid, save_grid_drawing, GenerateError};
use sonotex_spec::{
    ErrorCode, GridSpec, PitchType, Point, RenderConfig, ShapeKind, SoundDescriptor, SpecError,
    TimbreType,
};

fn config() -> RenderConfig {
    let mut config = RenderConfig {
        grid: GridSpec::new(ShapeKind::Hexagon, 3, 2, 24.0, Point::new(40.0, 40.0)),
        seed: 9,
        ..RenderConfig::default()
    };
    config.canvas.width = 200;
    config.canvas.height = 160;
    config
}

fn descriptors() -> Vec<SoundDescriptor> {
    vec![
        SoundDescriptor::new(TimbreType::Organic, 2, PitchType::High, 3),
        SoundDescriptor::new(TimbreType::Mechanical, 4, PitchType::Low, 2),
        SoundDescriptor::new(TimbreType::None, 1, PitchType::None, 4),
    ]
}

#[test]
fn test_save_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.svg");
    let drawing = generate_texture_grid(&config(), descriptors()).unwrap();

    let summary = save_grid_drawing(&drawing, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert_eq!(summary.format, ExportFormat::Svg);
    assert_eq!(summary.bytes, text.len());
    assert_eq!(summary.hash, hash_png(text.as_bytes()));
    assert!(text.starts_with("<svg"));
    // one clip polygon per cell
    assert_eq!(text.matches("<clipPath").count(), 6);
}

#[test]
fn test_save_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.png");
    let drawing = generate_texture_grid(&config(), descriptors()).unwrap();

    let summary = save_grid_drawing(&drawing, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();

    assert_eq!(summary.format, ExportFormat::Png);
    assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]);
    assert_eq!(summary.hash, hash_png(&bytes));
}

#[test]
fn test_output_is_reproducible() {
    let a = generate_texture_grid(&config(), descriptors()).unwrap();
    let b = generate_texture_grid(&config(), descriptors()).unwrap();
    for format in [ExportFormat::Svg, ExportFormat::Png] {
        let ea = export::encode(&a.canvas, a.background, format).unwrap();
        let eb = export::encode(&b.canvas, b.background, format).unwrap();
        assert_eq!(ea, eb, "{:?} differs between runs", format);
    }
}

#[test]
fn test_unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.pdf");
    let drawing = generate_texture_grid(&config(), descriptors()).unwrap();

    let err = save_grid_drawing(&drawing, &path).unwrap_err();
    assert!(matches!(
        err,
        GenerateError::Export(ExportError::UnsupportedFormat(_))
    ));
    assert!(!path.exists());
}

#[test]
fn test_oversized_canvas_is_rejected_before_drawing() {
    let mut config = config();
    config.canvas.width = 4_000_000_000;
    config.canvas.height = 4_000_000_000;

    let err = generate_texture_grid(&config, descriptors()).unwrap_err();
    match err {
        GenerateError::Config(SpecError::Invalid(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].code, ErrorCode::InvalidCanvasSize);
        }
        other => panic!("expected a configuration error, got {:?}", other),
    }
}
