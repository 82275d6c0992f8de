//! DOM grid renderer and HUD
//!
//! Consumes read-only snapshots of the game; nothing here feeds back into
//! the core. Cells are plain divs reclassified in place each frame.

use web_sys::{Document, Element};

use crate::consts::*;
use crate::session::GamePhase;
use crate::sim::{Cell, CellKind, GameData};

/// Handles to the DOM nodes the game draws into
pub struct Renderer {
    /// Grid cells in row-major order
    cells: Vec<Element>,
    score: Option<Element>,
    level: Option<Element>,
    best: Option<Element>,
    speed: Option<Element>,
    menu_overlay: Option<Element>,
    pause_overlay: Option<Element>,
    game_over_overlay: Option<Element>,
    final_score: Option<Element>,
    new_best: Option<Element>,
}

impl Renderer {
    /// Build the cell grid under `#grid` and look up the HUD elements.
    /// Returns `None` when the grid container is missing.
    pub fn new(document: &Document) -> Option<Self> {
        let grid = document.get_element_by_id("grid")?;
        let _ = grid.set_attribute(
            "style",
            &format!(
                "display:grid;\
                 grid-template-columns:repeat({GRID_SIZE},{CELL_SIZE_PX}px);\
                 grid-template-rows:repeat({GRID_SIZE},{CELL_SIZE_PX}px)"
            ),
        );

        let mut cells = Vec::with_capacity((GRID_SIZE * GRID_SIZE) as usize);
        for _ in 0..GRID_SIZE * GRID_SIZE {
            let cell = document.create_element("div").ok()?;
            cell.set_class_name("cell empty");
            grid.append_child(&cell).ok()?;
            cells.push(cell);
        }

        let find = |selector: &str| document.query_selector(selector).ok().flatten();

        Some(Self {
            cells,
            score: find("#hud-score .hud-value"),
            level: find("#hud-level .hud-value"),
            best: find("#hud-best .hud-value"),
            speed: find("#hud-speed .hud-value"),
            menu_overlay: document.get_element_by_id("menu-overlay"),
            pause_overlay: document.get_element_by_id("pause-overlay"),
            game_over_overlay: document.get_element_by_id("game-over-overlay"),
            final_score: document.get_element_by_id("final-score"),
            new_best: document.get_element_by_id("new-best"),
        })
    }

    /// Redraw grid, HUD and overlays from a snapshot
    pub fn draw(&self, data: &GameData, phase: GamePhase) {
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let class = match data.cell_kind(Cell::new(x, y)) {
                    CellKind::Empty => "cell empty",
                    CellKind::SnakeHead => "cell snake-head",
                    CellKind::SnakeBody => "cell snake-body",
                    CellKind::Food => "cell food",
                };
                self.cells[(y * GRID_SIZE + x) as usize].set_class_name(class);
            }
        }

        Self::set_text(&self.score, &data.score.to_string());
        Self::set_text(&self.level, &data.level.to_string());
        Self::set_text(&self.best, &data.high_score.to_string());

        let multiplier = (INITIAL_SPEED_MS - data.speed_ms + MIN_SPEED_MS) / SPEED_STEP_MS;
        Self::set_text(&self.speed, &format!("{multiplier}x"));

        Self::set_hidden(&self.menu_overlay, phase != GamePhase::Menu);
        Self::set_hidden(&self.pause_overlay, phase != GamePhase::Paused);

        let game_over = phase == GamePhase::GameOver;
        Self::set_hidden(&self.game_over_overlay, !game_over);
        if game_over {
            Self::set_text(&self.final_score, &data.score.to_string());
            // callout only when this game set the record
            let set_record = data.score > 0 && data.score == data.high_score;
            Self::set_hidden(&self.new_best, !set_record);
        }
    }

    fn set_text(el: &Option<Element>, text: &str) {
        if let Some(el) = el {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(el: &Option<Element>, hidden: bool) {
        if let Some(el) = el {
            let _ = el.set_attribute("class", if hidden { "overlay hidden" } else { "overlay" });
        }
    }
}
