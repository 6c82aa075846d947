//! Propose day: a shared photo cut into a grid of draggable tiles.
//!
//! Tiles snap to the nearest cell centre on release; landing on the right
//! cell locks the tile, the wrong cell bounces it back to the tray. Without
//! the photo the board is an inert placeholder.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;

use super::{GameEvent, GameInput, GameView, Minigame, Phase};

/// Board width the tiles are laid out against.
pub const BOARD_W: f32 = 420.0;
/// A release snaps when it is within this fraction of the larger tile side.
const SNAP_FRACTION: f32 = 0.45;

const WIN_MESSAGE: &str = "So pretty 🥺 Will you be my Valentine?";
pub(crate) const MISSING_PHOTO_NOTE: &str = "Image not found.";

/// Pixel dimensions of the source photo.
#[derive(Debug, Clone, Copy)]
pub struct PhotoInfo {
    pub width: u32,
    pub height: u32,
}

impl PhotoInfo {
    /// Decode just enough of the bytes to learn the dimensions.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        use image::GenericImageView;
        image::load_from_memory(bytes).ok().map(|img| {
            let (width, height) = img.dimensions();
            Self { width, height }
        })
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    /// Cell index this tile belongs to (row-major).
    pub correct_cell: usize,
    /// Cell the tile is locked into, once placed correctly.
    pub locked_cell: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct JigsawView {
    pub rows: u8,
    pub cols: u8,
    pub tile_w: f32,
    pub tile_h: f32,
    /// Tray display order of unlocked tiles.
    pub tray: Vec<usize>,
    pub locked: Vec<bool>,
    pub remaining: usize,
    pub note: Option<&'static str>,
}

pub struct Jigsaw {
    rng: Pcg64,
    photo: Option<PhotoInfo>,
    rows: u8,
    cols: u8,
    tile_w: f32,
    tile_h: f32,
    tiles: Vec<Tile>,
    /// Shuffled tray order of tile indices.
    tray: Vec<usize>,
    phase: Phase,
}

impl Jigsaw {
    pub fn new(photo: Option<PhotoInfo>, seed: u64) -> Self {
        let mut game = Self {
            rng: Pcg64::seed_from_u64(seed),
            photo,
            rows: 2,
            cols: 3,
            tile_w: 0.0,
            tile_h: 0.0,
            tiles: Vec::new(),
            tray: Vec::new(),
            phase: if photo.is_some() {
                Phase::InProgress
            } else {
                Phase::Degraded
            },
        };
        game.start();
        game
    }

    fn start(&mut self) {
        self.tiles.clear();
        self.tray.clear();
        let Some(photo) = self.photo else {
            return;
        };

        self.tile_w = (BOARD_W / self.cols as f32).floor();
        let aspect = photo.height as f32 / photo.width as f32;
        self.tile_h = (aspect * BOARD_W / self.rows as f32).floor();

        let count = self.rows as usize * self.cols as usize;
        for cell in 0..count {
            self.tiles.push(Tile {
                correct_cell: cell,
                locked_cell: None,
            });
        }
        self.tray = (0..count).collect();
        self.tray.shuffle(&mut self.rng);
    }

    fn cell_center(&self, cell: usize) -> (f32, f32) {
        let col = cell % self.cols as usize;
        let row = cell / self.cols as usize;
        (
            col as f32 * self.tile_w + self.tile_w / 2.0,
            row as f32 * self.tile_h + self.tile_h / 2.0,
        )
    }

    fn locked_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.locked_cell.is_some()).count()
    }
}

impl Minigame for Jigsaw {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn input(&mut self, input: GameInput) -> Option<GameEvent> {
        match input {
            GameInput::SetGrid { rows, cols } => {
                // Only the two board sizes the game offers.
                if matches!((rows, cols), (2, 3) | (3, 3)) {
                    self.rows = rows;
                    self.cols = cols;
                    self.start();
                    if self.phase != Phase::Won && self.photo.is_some() {
                        self.phase = Phase::InProgress;
                    }
                }
                None
            }
            GameInput::PlaceTile { tile, x, y } => {
                if self.phase != Phase::InProgress {
                    return None;
                }
                let count = self.tiles.len();
                if tile >= count || self.tiles[tile].locked_cell.is_some() {
                    return None;
                }
                let snap_radius = SNAP_FRACTION * self.tile_w.max(self.tile_h);
                let nearest = (0..count).min_by(|a, b| {
                    let (ax, ay) = self.cell_center(*a);
                    let (bx, by) = self.cell_center(*b);
                    let da = (ax - x).hypot(ay - y);
                    let db = (bx - x).hypot(by - y);
                    da.total_cmp(&db)
                })?;
                let (cx, cy) = self.cell_center(nearest);
                if (cx - x).hypot(cy - y) >= snap_radius {
                    // Nowhere near a cell; tile drifts back to the tray.
                    return None;
                }
                if nearest == self.tiles[tile].correct_cell {
                    self.tiles[tile].locked_cell = Some(nearest);
                    self.tray.retain(|&t| t != tile);
                    if self.locked_count() == count {
                        self.phase = Phase::Won;
                        return Some(GameEvent::Won {
                            message: WIN_MESSAGE.to_string(),
                        });
                    }
                }
                // Wrong cell: the tile shakes back to the tray, unplaced.
                None
            }
            GameInput::Restart => {
                self.start();
                None
            }
            _ => None,
        }
    }

    fn tick(&mut self, _dt_ms: u64) -> Option<GameEvent> {
        None
    }

    fn view(&self) -> GameView {
        GameView::Jigsaw(JigsawView {
            rows: self.rows,
            cols: self.cols,
            tile_w: self.tile_w,
            tile_h: self.tile_h,
            tray: self.tray.clone(),
            locked: self.tiles.iter().map(|t| t.locked_cell.is_some()).collect(),
            remaining: self.tiles.len() - self.locked_count(),
            note: if self.photo.is_none() {
                Some(MISSING_PHOTO_NOTE)
            } else {
                None
            },
        })
    }

    fn reset(&mut self) {
        self.start();
        if self.phase != Phase::Won && self.photo.is_some() {
            self.phase = Phase::InProgress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> Option<PhotoInfo> {
        Some(PhotoInfo {
            width: 840,
            height: 560,
        })
    }

    fn place_correct(game: &mut Jigsaw, tile: usize) -> Option<GameEvent> {
        let (x, y) = game.cell_center(game.tiles[tile].correct_cell);
        game.input(GameInput::PlaceTile { tile, x, y })
    }

    #[test]
    fn missing_photo_degrades_to_an_inert_board() {
        let mut game = Jigsaw::new(None, 3);
        assert_eq!(game.phase(), Phase::Degraded);
        assert!(game
            .input(GameInput::PlaceTile {
                tile: 0,
                x: 0.0,
                y: 0.0
            })
            .is_none());
        match game.view() {
            GameView::Jigsaw(v) => assert_eq!(v.note, Some(MISSING_PHOTO_NOTE)),
            _ => unreachable!(),
        }
    }

    #[test]
    fn correct_placement_locks_the_tile() {
        let mut game = Jigsaw::new(photo(), 3);
        assert!(place_correct(&mut game, 0).is_none());
        assert_eq!(game.tiles[0].locked_cell, Some(0));
        assert!(!game.tray.contains(&0));
    }

    #[test]
    fn near_miss_within_snap_radius_still_locks() {
        let mut game = Jigsaw::new(photo(), 3);
        let (x, y) = game.cell_center(0);
        let slack = 0.4 * game.tile_w.max(game.tile_h);
        game.input(GameInput::PlaceTile {
            tile: 0,
            x: x + slack,
            y,
        });
        assert_eq!(game.tiles[0].locked_cell, Some(0));
    }

    #[test]
    fn wrong_cell_bounces_the_tile_back() {
        let mut game = Jigsaw::new(photo(), 3);
        let wrong = game.tiles[0].correct_cell + 1;
        let (x, y) = game.cell_center(wrong);
        assert!(game.input(GameInput::PlaceTile { tile: 0, x, y }).is_none());
        assert_eq!(game.tiles[0].locked_cell, None);
        assert!(game.tray.contains(&0));
    }

    #[test]
    fn far_drop_does_not_snap() {
        let mut game = Jigsaw::new(photo(), 3);
        game.input(GameInput::PlaceTile {
            tile: 0,
            x: BOARD_W * 4.0,
            y: BOARD_W * 4.0,
        });
        assert_eq!(game.tiles[0].locked_cell, None);
    }

    #[test]
    fn completing_the_board_wins_once() {
        let mut game = Jigsaw::new(photo(), 3);
        let count = game.tiles.len();
        let mut wins = 0;
        for tile in 0..count {
            if let Some(GameEvent::Won { .. }) = place_correct(&mut game, tile) {
                wins += 1;
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(game.phase(), Phase::Won);
        assert!(place_correct(&mut game, 0).is_none());
    }

    #[test]
    fn grid_switch_restarts_the_puzzle() {
        let mut game = Jigsaw::new(photo(), 3);
        place_correct(&mut game, 0);
        game.input(GameInput::SetGrid { rows: 3, cols: 3 });
        assert_eq!(game.tiles.len(), 9);
        assert!(game.tiles.iter().all(|t| t.locked_cell.is_none()));
        // Only the two supported grids are accepted.
        game.input(GameInput::SetGrid { rows: 5, cols: 5 });
        assert_eq!(game.tiles.len(), 9);
    }
}
