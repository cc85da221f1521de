//! GridView: draws a [`GridSnapshot`] into a framebuffer.
//!
//! Each grid cell is two terminal columns wide and one line high. Falling
//! pieces are drawn at the row nearest to their sprite position.

use crate::core::snapshot::{GridSnapshot, PieceSnapshot};
use crate::core::DroppableKind;
use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
use crate::types::{GemColor, CELL_SIZE_IN_PIXELS};

const CELL_WIDTH: u16 = 2;
const PANEL_GAP: u16 = 3;
const PANEL_WIDTH: u16 = 18;

const BORDER: GlyphStyle = GlyphStyle::fg(Rgb::new(120, 120, 140));
const TEXT: GlyphStyle = GlyphStyle::fg(Rgb::new(220, 220, 220));
const TITLE: GlyphStyle = GlyphStyle::fg(Rgb::new(255, 215, 90)).bold();

#[derive(Debug, Clone, Copy, Default)]
pub struct GridView;

impl GridView {
    /// Terminal size needed to show a grid of `rows` x `columns`.
    pub fn required_size(rows: u16, columns: u16) -> (u16, u16) {
        let width = columns * CELL_WIDTH + 2 + PANEL_GAP + PANEL_WIDTH;
        (width, rows + 2)
    }

    pub fn render(&self, fb: &mut FrameBuffer, snapshot: &GridSnapshot) {
        fb.clear();
        let (width, height) = Self::required_size(snapshot.rows, snapshot.columns);
        if fb.width() < width || fb.height() < height {
            fb.put_str(0, 0, "terminal too small", TEXT);
            return;
        }

        self.draw_border(fb, snapshot);
        for piece in &snapshot.pieces {
            self.draw_piece(fb, snapshot, piece);
        }
        self.draw_panel(fb, snapshot);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, snapshot: &GridSnapshot) {
        let inner = snapshot.columns * CELL_WIDTH;
        let bottom = snapshot.rows + 1;
        for x in 1..=inner {
            fb.set(x, 0, Glyph { ch: '─', style: BORDER });
            fb.set(x, bottom, Glyph { ch: '─', style: BORDER });
        }
        for y in 1..bottom {
            fb.set(0, y, Glyph { ch: '│', style: BORDER });
            fb.set(inner + 1, y, Glyph { ch: '│', style: BORDER });
        }
        fb.set(0, 0, Glyph { ch: '┌', style: BORDER });
        fb.set(inner + 1, 0, Glyph { ch: '┐', style: BORDER });
        fb.set(0, bottom, Glyph { ch: '└', style: BORDER });
        fb.set(inner + 1, bottom, Glyph { ch: '┘', style: BORDER });
    }

    fn draw_piece(&self, fb: &mut FrameBuffer, snapshot: &GridSnapshot, piece: &PieceSnapshot) {
        let region = piece.region;
        let cell = f32::from(CELL_SIZE_IN_PIXELS);
        let top = ((piece.y / cell).round() as u16).min(snapshot.rows.saturating_sub(region.height()));
        let (text, mut style) = glyphs_for(piece);
        if piece.controlled {
            style = style.bold();
        }

        for dy in 0..region.height() {
            for dx in 0..region.width() {
                let x = 1 + (region.left_column() + dx) * CELL_WIDTH;
                fb.put_str(x, 1 + top + dy, text, style);
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snapshot: &GridSnapshot) {
        let x = snapshot.columns * CELL_WIDTH + 2 + PANEL_GAP;
        fb.put_str(x, 0, "DIAMONDS", TITLE);
        fb.put_str(x, 2, &format!("Score  {}", snapshot.score), TEXT);
        fb.put_str(x, 3, &format!("Chain  {}", snapshot.chain), TEXT);
        fb.put_str(x, 4, &format!("Best   {}", snapshot.best_chain), TEXT);
        fb.put_str(x, 5, &format!("Stones {}", snapshot.stones_to_send), TEXT);

        fb.put_str(x, 7, "Next", TEXT);
        let (pivot, slave) = snapshot.next_pair;
        for (dy, kind) in [(8, slave), (9, pivot)] {
            let (text, style) = kind_glyphs(kind, 0);
            fb.put_str(x + 1, dy, text, style);
        }

        if snapshot.game_over {
            fb.put_str(x, 11, "GAME OVER", TITLE);
            fb.put_str(x, 12, "r restart  q quit", TEXT);
        } else {
            fb.put_str(x, 11, snapshot.state, TEXT);
        }
    }
}

fn glyphs_for(piece: &PieceSnapshot) -> (&'static str, GlyphStyle) {
    kind_glyphs(piece.kind, piece.animation_frame)
}

fn kind_glyphs(kind: DroppableKind, frame: u8) -> (&'static str, GlyphStyle) {
    match kind {
        DroppableKind::Gem(color) => ("◆◆", GlyphStyle::fg(color_rgb(color))),
        DroppableKind::BigGem(color) => ("██", GlyphStyle::fg(color_rgb(color))),
        DroppableKind::Chest(color) => {
            let text = if frame % 2 == 0 { "[]" } else { "][" };
            (text, GlyphStyle::fg(color_rgb(color)).bold())
        }
        DroppableKind::Flash => {
            let text = if frame % 2 == 0 { "**" } else { "++" };
            (text, GlyphStyle::fg(Rgb::new(255, 255, 255)).bold())
        }
        DroppableKind::Stone { turns_left, .. } => {
            let text = match turns_left {
                0 | 1 => "#1",
                2 => "#2",
                _ => "##",
            };
            (text, GlyphStyle::fg(Rgb::new(140, 140, 140)))
        }
    }
}

fn color_rgb(color: GemColor) -> Rgb {
    match color {
        GemColor::Diamond => Rgb::new(200, 240, 255),
        GemColor::Ruby => Rgb::new(230, 40, 60),
        GemColor::Sapphire => Rgb::new(50, 100, 240),
        GemColor::Emerald => Rgb::new(40, 200, 90),
        GemColor::Topaz => Rgb::new(250, 190, 40),
    }
}
