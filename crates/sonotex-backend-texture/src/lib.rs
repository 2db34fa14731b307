//! Sonotex texture engine.
//!
//! Turns a grid of sound descriptors into a drawing: each cell of a square
//! or hexagonal grid gets a crossed line texture picked by timbre and a
//! marker grid picked by pitch, both clipped to the cell outline. Intensity
//! sets how many lines and markers a cell holds.
//!
//! All randomness comes from a PCG32 stream derived per cell from the run
//! seed, so a configuration and descriptor list always produce the same
//! drawing.
//!
//! # Example
//!
//! ```no_run
//! use sonotex_backend_texture::generate::{generate_texture_grid, save_grid_drawing};
//! use sonotex_spec::{PitchType, RenderConfig, SoundDescriptor, TimbreType};
//! use std::path::Path;
//!
//! let config = RenderConfig::default();
//! let descriptors = vec![
//!     SoundDescriptor::new(TimbreType::Organic, 3, PitchType::Low, 2),
//!     SoundDescriptor::new(TimbreType::Mechanical, 5, PitchType::High, 4),
//! ];
//!
//! let drawing = generate_texture_grid(&config, descriptors).unwrap();
//! save_grid_drawing(&drawing, Path::new("grid.svg")).unwrap();
//! ```
//!
//! # Layers
//!
//! - [`line_pattern`], [`shape_pattern`], [`wiggle`]: unit generators
//! - [`tiler`], [`texture`]: repeating units across a cell
//! - [`canvas`], [`clip`]: drawing surface and clipped cell composition
//! - [`grid`], [`feed`]: traversal and descriptor supply
//! - [`export`], [`raster`], [`png`]: SVG and PNG output

pub mod canvas;
pub mod clip;
pub mod color;
pub mod error;
pub mod export;
pub mod feed;
pub mod generate;
pub mod geometry;
pub mod grid;
pub mod line_pattern;
pub mod path;
pub mod png;
pub mod raster;
pub mod rng;
pub mod shape_pattern;
pub mod texture;
pub mod tiler;
pub mod wiggle;

// Re-export main types for convenience
pub use canvas::{Canvas, CanvasScope, DrawCommand, RecordingCanvas};
pub use clip::{clip_polyline, ClipCompositor};
pub use color::Color;
pub use error::TextureError;
pub use export::{ExportError, ExportFormat, ExportSummary};
pub use feed::{DescriptorFeed, FeedItem};
pub use generate::{generate_texture_grid, save_grid_drawing, GenerateError, GridDrawing};
pub use geometry::CellShape;
pub use grid::{CellRecord, GridCursor, GridWalker, WalkReport};
pub use line_pattern::{LineRequest, LineVariant};
pub use kurbo::Affine;
pub use path::Path;
pub use png::{PngConfig, PngError};
pub use raster::{rasterize, RasterError, TextureBuffer};
pub use rng::DeterministicRng;
pub use shape_pattern::MarkerVariant;
pub use texture::{CellTexture, TextureComposer};
pub use tiler::TiledPath;
