//! Grid traversal.
//!
//! Every cell is drawn at the grid origin under an accumulated translation.
//! Square grids step one cell width per column and return to the first
//! column one cell lower at the end of each row.
//!
//! Hexagon grids pack flat-topped hexagons in a serpentine: each column step
//! moves `x_move = 1.5·r` right and alternately `y_move = r·√3/2` down (even
//! columns) or up (odd columns). At the end of a row the cursor returns to
//! the first column and drops `2·y_move` when the column count is even, or
//! `y_move` when odd, which makes every row start exactly `2·y_move` below
//! the previous one.
//!
//! Each cell is drawn inside a transform scope holding its cursor
//! translation, so a traversal leaves the canvas transform where it found
//! it.

use kurbo::{Affine, Vec2};
use sonotex_spec::{validate_grid, GridSpec, Point, ShapeKind, SoundDescriptor};

use crate::canvas::{Canvas, CanvasScope};
use crate::clip::ClipCompositor;
use crate::error::TextureError;
use crate::feed::DescriptorFeed;
use crate::geometry::CellShape;
use crate::rng::DeterministicRng;

/// Column and row spacing derived from the cell polygon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStep {
    pub x_move: f64,
    pub y_move: f64,
}

impl GridStep {
    /// Spacing for `grid`, measured from its cell polygon.
    pub fn for_grid(grid: &GridSpec) -> Self {
        let cell = CellShape::new(grid.shape, Point::ZERO, grid.radius);
        let v = &cell.vertices;
        match grid.shape {
            ShapeKind::Square => {
                let side = v[0].x - v[3].x;
                GridStep {
                    x_move: side,
                    y_move: side,
                }
            }
            ShapeKind::Hexagon => GridStep {
                x_move: v[0].x - v[2].x,
                y_move: (v[1].y - v[4].y) / 2.0,
            },
        }
    }
}

/// Position of the traversal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCursor {
    pub row: u32,
    pub column: u32,
    /// Translation from the grid origin to the current cell.
    pub transform: Affine,
}

impl GridCursor {
    /// Center of the current cell in canvas coordinates.
    pub fn center(&self, origin: Point) -> Point {
        self.transform * origin
    }
}

/// One visited cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    pub row: u32,
    pub column: u32,
    pub center: Point,
    pub descriptor: SoundDescriptor,
    /// True when the feed was exhausted before this cell.
    pub defaulted: bool,
    pub line_copies: usize,
    pub marker_copies: usize,
}

/// Outcome of a full traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkReport {
    /// Cells in visit order.
    pub cells: Vec<CellRecord>,
    pub defaulted_cells: usize,
}

/// Walks a validated grid and paints each cell.
#[derive(Debug, Clone)]
pub struct GridWalker {
    grid: GridSpec,
    step: GridStep,
}

impl GridWalker {
    /// Create a walker, rejecting malformed grids before anything is drawn.
    pub fn new(grid: GridSpec) -> Result<Self, TextureError> {
        let result = validate_grid(&grid);
        if !result.is_ok() {
            let message = result
                .errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(TextureError::InvalidGrid(message));
        }
        let step = GridStep::for_grid(&grid);
        Ok(Self { grid, step })
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn step(&self) -> GridStep {
        self.step
    }

    /// Translation applied after drawing `column`.
    fn column_step(&self, column: u32) -> Vec2 {
        match self.grid.shape {
            ShapeKind::Square => Vec2::new(self.step.x_move, 0.0),
            ShapeKind::Hexagon => {
                let dy = if column % 2 == 0 {
                    self.step.y_move
                } else {
                    -self.step.y_move
                };
                Vec2::new(self.step.x_move, dy)
            }
        }
    }

    /// Translation applied at the end of a row.
    fn row_step(&self) -> Vec2 {
        let back = -self.step.x_move * self.grid.columns as f64;
        match self.grid.shape {
            ShapeKind::Square => Vec2::new(back, self.step.y_move),
            ShapeKind::Hexagon => {
                let drop = if self.grid.columns % 2 == 0 {
                    2.0 * self.step.y_move
                } else {
                    self.step.y_move
                };
                Vec2::new(back, drop)
            }
        }
    }

    /// Cursor positions in visit order, without drawing.
    pub fn cursors(&self) -> Vec<GridCursor> {
        let mut cursors = Vec::with_capacity(self.grid.cell_count());
        let mut transform = Affine::IDENTITY;

        for row in 0..self.grid.rows {
            for column in 0..self.grid.columns {
                cursors.push(GridCursor {
                    row,
                    column,
                    transform,
                });
                transform = transform.then_translate(self.column_step(column));
            }
            transform = transform.then_translate(self.row_step());
        }
        cursors
    }

    /// Cell centers in visit order.
    pub fn centers(&self) -> Vec<Point> {
        self.cursors()
            .iter()
            .map(|c| c.center(self.grid.origin))
            .collect()
    }

    /// Paint every cell, taking descriptors from `feed` in row-major order.
    ///
    /// Cell `i` draws with an RNG derived from `seed` and `i`, so a cell's
    /// randomness does not depend on what was drawn before it.
    pub fn walk<C, I>(
        &self,
        canvas: &mut C,
        feed: &mut DescriptorFeed<I>,
        compositor: &ClipCompositor,
        seed: u32,
    ) -> Result<WalkReport, TextureError>
    where
        C: Canvas + ?Sized,
        I: Iterator<Item = SoundDescriptor>,
    {
        let cursors = self.cursors();
        let mut cells = Vec::with_capacity(cursors.len());
        let mut defaulted_cells = 0;

        for (index, cursor) in cursors.iter().enumerate() {
            let item = feed.next_or_default();
            let descriptor = item.descriptor();
            if item.is_defaulted() {
                defaulted_cells += 1;
            }

            let cell = CellShape::new(self.grid.shape, self.grid.origin, self.grid.radius);
            let mut rng = DeterministicRng::for_cell(seed, index as u32);
            let texture = {
                let mut placed = CanvasScope::transform(canvas, cursor.transform);
                compositor.compose_cell(&mut *placed, &descriptor, &cell, &mut rng)?
            };

            log::debug!(
                "cell r{}c{}: {:?}/{} {:?}/{}",
                cursor.row,
                cursor.column,
                descriptor.timbre,
                descriptor.timbre_intensity(),
                descriptor.pitch,
                descriptor.pitch_intensity()
            );

            cells.push(CellRecord {
                row: cursor.row,
                column: cursor.column,
                center: cursor.center(self.grid.origin),
                descriptor,
                defaulted: item.is_defaulted(),
                line_copies: texture.lines.copies,
                marker_copies: texture.markers.copies,
            });
        }

        Ok(WalkReport {
            cells,
            defaulted_cells,
        })
    }

    /// Stroke every cell outline without textures.
    pub fn walk_outlines<C: Canvas + ?Sized>(&self, canvas: &mut C, stroke_width: f64) {
        let cell = CellShape::new(self.grid.shape, self.grid.origin, self.grid.radius);
        let outline = cell.outline(stroke_width);
        for cursor in self.cursors() {
            let mut placed = CanvasScope::transform(canvas, cursor.transform);
            placed.draw_path(&outline);
        }
    }
}
