use std::cell::RefCell;
use std::rc::Rc;

use crate::animation::animator::{BoxRoutine, RoutineExt, action, forever, run};
use crate::animation::sequence::{Timer, shared};
use crate::assets::texture::{ManualTexture, Texture};
use crate::foundation::core::{Color, Rect, TimeSource, Vector2f};
use crate::foundation::error::MotionResult;
use crate::foundation::math::Rng64;
use crate::render::ctx::RenderCtx;
use crate::render::surface::Surface;
use crate::scene::provider::{Scene, SceneEnv};

/// Virtual pixels per cell.
pub const CELL_SIZE: f64 = 8.0;
pub const GENERATION_PERIOD: f64 = 1.0 / 30.0;
const BACKGROUND: Color = Color::rgb(0xff, 0x57, 0x22);
const SEED: u64 = 0x11FE;

/// A bounded Conway grid. Cells outside the edges count as dead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            cells: vec![false; (cols as usize) * (rows as usize)],
        }
    }

    pub fn random(cols: u32, rows: u32, rng: &mut Rng64) -> Self {
        let mut grid = Self::new(cols, rows);
        for cell in &mut grid.cells {
            *cell = rng.chance(0.5);
        }
        grid
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.cols) || y >= i64::from(self.rows) {
            return None;
        }
        Some((y as usize) * (self.cols as usize) + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.index(i64::from(x), i64::from(y))
            .is_some_and(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u32, y: u32, alive: bool) {
        if let Some(i) = self.index(i64::from(x), i64::from(y)) {
            self.cells[i] = alive;
        }
    }

    pub fn live_neighbours(&self, x: u32, y: u32) -> u8 {
        let mut n = 0;
        for dy in -1..=1i64 {
            for dx in -1..=1i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if let Some(i) = self.index(i64::from(x) + dx, i64::from(y) + dy)
                    && self.cells[i]
                {
                    n += 1;
                }
            }
        }
        n
    }

    /// Advance one generation: survive on 2 or 3 neighbours, birth on exactly 3.
    pub fn step(&mut self) {
        let mut next = self.cells.clone();
        for y in 0..self.rows {
            for x in 0..self.cols {
                let alive = self.get(x, y);
                let n = self.live_neighbours(x, y);
                let i = (y as usize) * (self.cols as usize) + x as usize;
                next[i] = matches!((alive, n), (true, 2) | (_, 3));
            }
        }
        self.cells = next;
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// The grid and the texture that shows it, one texel per cell.
#[derive(Debug)]
pub struct Board {
    pub grid: Grid,
    pub texture: ManualTexture,
}

impl Board {
    pub fn new(grid: Grid) -> MotionResult<Self> {
        let texture = ManualTexture::new(grid.cols(), grid.rows())?;
        let mut board = Self { grid, texture };
        board.sync()?;
        Ok(board)
    }

    /// Copy the grid into the texture: live cells opaque black, dead cells transparent.
    pub fn sync(&mut self) -> MotionResult<()> {
        let cols = self.grid.cols as usize;
        for (i, px) in self.texture.pixels_mut().iter_mut().enumerate() {
            let alive = self.grid.get((i % cols) as u32, (i / cols) as u32);
            *px = if alive { Color::BLACK } else { Color::TRANSPARENT };
        }
        self.texture.commit()
    }

    pub fn advance(&mut self) -> MotionResult<()> {
        self.grid.step();
        self.sync()
    }
}

/// Conway's Game of Life on a randomly seeded grid, drawn as a pixelated texture.
pub struct GameOfLife {
    time: TimeSource,
    resolution: Vector2f,
    board: Rc<RefCell<Board>>,
}

impl GameOfLife {
    pub fn new(env: &SceneEnv) -> MotionResult<Self> {
        let cols = (env.resolution.x / CELL_SIZE).floor().max(1.0) as u32;
        let rows = (env.resolution.y / CELL_SIZE).floor().max(1.0) as u32;
        let grid = Grid::random(cols, rows, &mut Rng64::new(SEED));
        Ok(Self {
            time: env.time.clone(),
            resolution: env.resolution,
            board: Rc::new(RefCell::new(Board::new(grid)?)),
        })
    }

    pub fn board(&self) -> Rc<RefCell<Board>> {
        Rc::clone(&self.board)
    }
}

impl Scene for GameOfLife {
    fn name(&self) -> &str {
        "game-of-life"
    }

    fn render(&mut self, surface: &mut dyn Surface, _ctx: &mut RenderCtx) {
        let area = Rect::new(0.0, 0.0, self.resolution.x, self.resolution.y);
        surface.fill_rect(area, BACKGROUND);
        let board = self.board.borrow();
        if let Some(image) = board.texture.image() {
            surface.draw_image(image, image.bounds(), area);
        }
    }

    fn sequence(&mut self) -> BoxRoutine {
        let timer = shared(Timer::new(self.time.clone(), GENERATION_PERIOD));
        let board = Rc::clone(&self.board);
        forever(move || {
            let board = Rc::clone(&board);
            action(move || {
                if let Err(err) = board.borrow_mut().advance() {
                    tracing::warn!(%err, "game of life texture update failed");
                }
            })
            .then(run(timer.clone()))
            .boxed()
        })
        .boxed()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenes/game_of_life.rs"]
mod tests;
