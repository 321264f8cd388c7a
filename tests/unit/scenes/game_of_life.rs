use super::*;
use crate::animation::animator::Routine;
use crate::foundation::core::Clock;
use crate::render::recording::{DrawCmd, RecordingSurface};

fn grid_with(cols: u32, rows: u32, live: &[(u32, u32)]) -> Grid {
    let mut grid = Grid::new(cols, rows);
    for &(x, y) in live {
        grid.set(x, y, true);
    }
    grid
}

#[test]
fn blinker_oscillates() {
    let mut grid = grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]);
    grid.step();
    assert_eq!(grid, grid_with(5, 5, &[(2, 1), (2, 2), (2, 3)]));
    grid.step();
    assert_eq!(grid, grid_with(5, 5, &[(1, 2), (2, 2), (3, 2)]));
}

#[test]
fn block_is_stable_and_loners_die() {
    let block = grid_with(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
    let mut next = block.clone();
    next.step();
    assert_eq!(next, block);

    let mut lone = grid_with(3, 3, &[(1, 1)]);
    lone.step();
    assert_eq!(lone.population(), 0);
}

#[test]
fn edges_do_not_wrap() {
    let grid = grid_with(3, 3, &[(2, 0), (2, 2), (0, 2)]);
    assert_eq!(grid.live_neighbours(0, 0), 0);
    assert_eq!(grid.live_neighbours(1, 1), 3);
    assert!(!grid.get(3, 0));
}

#[test]
fn board_texture_mirrors_the_grid() {
    let board = Board::new(grid_with(2, 1, &[(1, 0)])).unwrap();
    assert_eq!(board.texture.get(0, 0), Some(Color::TRANSPARENT));
    assert_eq!(board.texture.get(1, 0), Some(Color::BLACK));
    assert!(board.texture.image().is_some_and(|i| !i.smooth()));
}

#[test]
fn grid_size_follows_the_resolution() {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(1280.0, 720.0));
    let scene = GameOfLife::new(&env).unwrap();
    let board = scene.board();
    assert_eq!((board.borrow().grid.cols(), board.borrow().grid.rows()), (160, 90));
    assert!(board.borrow().grid.population() > 0);
}

#[test]
fn one_generation_per_period() {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(80.0, 80.0));
    let mut scene = GameOfLife::new(&env).unwrap();
    let board = scene.board();
    let initial = board.borrow().grid.clone();

    let mut expected = initial.clone();
    expected.step();

    let mut routine = scene.sequence();
    routine.resume();
    assert_eq!(board.borrow().grid, expected);

    clock.advance_to(GENERATION_PERIOD / 2.0);
    routine.resume();
    assert_eq!(board.borrow().grid, expected);

    clock.advance_to(GENERATION_PERIOD);
    routine.resume();
    expected.step();
    assert_eq!(board.borrow().grid, expected);
}

#[test]
fn render_fills_the_background_then_draws_the_grid() {
    let clock = Clock::new();
    let env = SceneEnv::detached(clock.source(), Vector2f::new(1280.0, 720.0));
    let mut scene = GameOfLife::new(&env).unwrap();
    let mut surface = RecordingSurface::new(1280, 720);
    scene.render(&mut surface, &mut RenderCtx::default());

    let cmds = surface.commands();
    assert!(matches!(cmds[0], DrawCmd::FillPath { color, .. } if color == BACKGROUND));
    let DrawCmd::DrawImage { src, dst, .. } = &cmds[1] else {
        panic!("expected the grid image");
    };
    assert_eq!(*src, Rect::new(0.0, 0.0, 160.0, 90.0));
    assert_eq!(*dst, Rect::new(0.0, 0.0, 1280.0, 720.0));
}
