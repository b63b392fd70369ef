//! BoardView: maps a [`BoardSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each slot is drawn as a bracketed row of tile letters, bottom to top, e.g.
//! `[BRR···]`. Hex columns sit 9 terminal columns apart and half a hex height
//! maps to one terminal row, so odd columns appear one row lower than even ones.

use crate::core::BoardSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BoardPhase, Color, DockId, WorldPos};

/// Terminal columns per hex column step
const COL_PX: f32 = 9.0;

const PANEL_W: u16 = 22;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Drag state to overlay on the board
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragView {
    pub cursor: WorldPos,
    pub held: Option<DockId>,
}

/// Where the board lands on screen for one frame
#[derive(Debug, Clone, Copy)]
struct Layout {
    left: i32,
    top: i32,
    min_x: f32,
    min_z: f32,
    inner_w: u16,
    inner_h: u16,
}

pub struct BoardView {
    col_unit: f32,
    row_unit: f32,
}

impl BoardView {
    pub fn new(hex_radius: f32) -> Self {
        Self {
            col_unit: hex_radius * 1.5,
            row_unit: hex_radius * 3f32.sqrt() / 2.0,
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        drag: &DragView,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(crate::fb::Cell::default());

        let layout = self.layout(snap, viewport);
        let frame = CellStyle::fg(Rgb::new(110, 110, 130));
        fb.draw_box(
            clamp(layout.left - 2),
            clamp(layout.top - 1),
            layout.inner_w + 4,
            layout.inner_h + 2,
            frame,
        );

        for slot in &snap.slots {
            let (x, y) = self.project(&layout, slot.position);
            draw_stack(fb, x, y, &slot.colors, slot.max_height, ('[', ']'), false);
        }

        for pending in &snap.dock {
            let held = drag.held == Some(pending.id);
            let (x, y) = self.project(&layout, pending.position);
            let cap = snap.slots.first().map_or(0, |s| s.max_height);
            draw_stack(fb, x, y, &pending.colors, cap, ('<', '>'), held);
        }

        self.draw_cursor(fb, snap, drag, &layout);
        self.draw_panel(fb, snap, viewport, &layout);

        if snap.phase == BoardPhase::Ended {
            draw_call_to_action(fb, snap, &layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, drag: &DragView, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, drag, viewport, &mut fb);
        fb
    }

    fn layout(&self, snap: &BoardSnapshot, viewport: Viewport) -> Layout {
        let positions = snap
            .slots
            .iter()
            .map(|s| s.position)
            .chain(snap.dock.iter().map(|d| d.position));
        let (mut min_x, mut max_x) = (f32::INFINITY, f32::NEG_INFINITY);
        let (mut min_z, mut max_z) = (f32::INFINITY, f32::NEG_INFINITY);
        for p in positions {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_z = min_z.min(p.z);
            max_z = max_z.max(p.z);
        }
        if !min_x.is_finite() {
            (min_x, max_x, min_z, max_z) = (0.0, 0.0, 0.0, 0.0);
        }

        let box_w = snap.slots.first().map_or(2, |s| s.max_height as u16 + 2);
        let inner_w = ((max_x - min_x) / self.col_unit * COL_PX).round() as u16 + box_w;
        let inner_h = ((max_z - min_z) / self.row_unit).round() as u16 + 1;

        let used_w = inner_w + 4 + 2 + PANEL_W;
        let left = viewport.width.saturating_sub(used_w) / 2 + 2;
        let top = viewport.height.saturating_sub(inner_h + 2) / 2 + 1;
        Layout {
            left: left as i32,
            top: top as i32,
            min_x,
            min_z,
            inner_w,
            inner_h,
        }
    }

    fn project(&self, layout: &Layout, pos: WorldPos) -> (i32, i32) {
        let x = layout.left + ((pos.x - layout.min_x) / self.col_unit * COL_PX).round() as i32;
        let y = layout.top + ((pos.z - layout.min_z) / self.row_unit).round() as i32;
        (x, y)
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, drag: &DragView, layout: &Layout) {
        let (x, y) = self.project(layout, drag.cursor);
        if x < 1 || y < 0 {
            return;
        }
        let marker = CellStyle::fg(Rgb::new(255, 230, 90)).bold();
        fb.put_char((x - 1) as u16, y as u16, '▶', marker);

        // The held stack follows the cursor one row below it.
        let held = drag
            .held
            .and_then(|id| snap.dock.iter().find(|d| d.id == id));
        if let Some(pending) = held {
            let mut cx = x as u16;
            for &color in &pending.colors {
                fb.put_char(cx, (y + 1) as u16, color.letter(), tile_style(color).bold());
                cx += 1;
            }
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &BoardSnapshot, viewport: Viewport, layout: &Layout) {
        let panel_x = clamp(layout.left + layout.inner_w as i32 + 4);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let help = value.dim();

        let mut y = clamp(layout.top - 1);
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "MERGES", label);
        let end = fb.put_str(panel_x, y + 1, &format!("{}/", snap.merges), value);
        fb.put_u32(end, y + 1, snap.merge_limit, value);
        y += 3;

        fb.put_str(panel_x, y, "MOVES", label);
        fb.put_u32(panel_x, y + 1, snap.moves, value);
        y += 3;

        fb.put_str(panel_x, y, "STATE", label);
        fb.put_str(panel_x, y + 1, snap.phase.as_str(), value);
        y += 3;

        for line in ["arrows  move", "1-9     pick stack", "space   grab/drop", "esc     cancel", "q       quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y += 1;
        }
    }
}

fn clamp(v: i32) -> u16 {
    v.clamp(0, u16::MAX as i32) as u16
}

fn draw_stack(
    fb: &mut FrameBuffer,
    x: i32,
    y: i32,
    colors: &[Color],
    capacity: usize,
    (open, close): (char, char),
    dimmed: bool,
) {
    if x < 0 || y < 0 {
        return;
    }
    let (mut cx, y) = (x as u16, y as u16);
    let frame = CellStyle::fg(Rgb::new(150, 150, 160));
    let empty = CellStyle::fg(Rgb::new(90, 90, 100)).dim();

    fb.put_char(cx, y, open, frame);
    cx += 1;
    for i in 0..capacity.max(colors.len()) {
        match colors.get(i) {
            Some(&color) => {
                let style = if dimmed {
                    tile_style(color).dim()
                } else {
                    tile_style(color).bold()
                };
                fb.put_char(cx, y, color.letter(), style);
            }
            None => fb.put_char(cx, y, '·', empty),
        }
        cx += 1;
    }
    fb.put_char(cx, y, close, frame);
}

fn draw_call_to_action(fb: &mut FrameBuffer, snap: &BoardSnapshot, layout: &Layout) {
    let w = 26u16.min(layout.inner_w + 4);
    let h = 7u16;
    let x = clamp(layout.left - 2) + (layout.inner_w + 4).saturating_sub(w) / 2;
    let y = clamp(layout.top - 1) + (layout.inner_h + 2).saturating_sub(h) / 2;

    let bg = Rgb::new(20, 20, 40);
    let text = CellStyle::fg(Rgb::new(255, 255, 255)).on(bg);
    fb.fill_rect(x, y, w, h, ' ', text);
    fb.draw_box(x, y, w, h, CellStyle::fg(Rgb::new(255, 200, 60)).on(bg));

    fb.put_str_centered(x, w, y + 1, "WELL DONE!", text.bold());
    let summary = format!("{} merges  {} pts", snap.merges, snap.score);
    fb.put_str_centered(x, w, y + 3, &summary, text);
    fb.put_str_centered(
        x,
        w,
        y + 5,
        "PLAY NOW",
        CellStyle::fg(Rgb::new(20, 20, 20)).on(Rgb::new(255, 200, 60)).bold(),
    );
}

fn tile_style(color: Color) -> CellStyle {
    CellStyle::fg(color_rgb(color))
}

pub fn color_rgb(color: Color) -> Rgb {
    match color {
        Color::Red => Rgb::new(225, 70, 70),
        Color::Green => Rgb::new(90, 200, 100),
        Color::Blue => Rgb::new(80, 130, 235),
        Color::Yellow => Rgb::new(240, 210, 80),
        Color::White => Rgb::new(240, 240, 240),
        Color::Gray => Rgb::new(150, 150, 150),
        Color::Magenta => Rgb::new(210, 90, 210),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, BoardConfig};
    use crate::types::SlotId;

    fn view() -> BoardView {
        BoardView::new(BoardConfig::default().hex_radius)
    }

    fn screen(fb: &FrameBuffer) -> Vec<String> {
        (0..fb.height()).map(|y| fb.row_text(y)).collect()
    }

    #[test]
    fn renders_slots_dock_and_hud() {
        let mut board = Board::empty(BoardConfig::default()).unwrap();
        board
            .seed_stack(SlotId(0), &[Color::Blue, Color::Red, Color::Red])
            .unwrap();
        board.add_pending_stack(&[Color::Green, Color::Green]).unwrap();

        let fb = view().render(&board.snapshot(), &DragView::default(), Viewport::new(100, 30));
        let rows = screen(&fb);

        assert!(rows.iter().any(|r| r.contains("[BRR···]")));
        assert!(rows.iter().any(|r| r.contains("<GG····>")));
        assert!(rows.iter().any(|r| r.contains("SCORE")));
        assert!(rows.iter().any(|r| r.contains("0/3")));
        // 25 slots, one occupied
        let slots: usize = rows.iter().map(|r| r.matches('[').count()).sum();
        assert_eq!(slots, 25);
    }

    #[test]
    fn held_stack_is_drawn_at_cursor() {
        let mut board = Board::empty(BoardConfig::default()).unwrap();
        let dock = board.add_pending_stack(&[Color::Blue, Color::Blue]).unwrap();
        let drag = DragView {
            cursor: WorldPos::default(),
            held: Some(dock),
        };

        let fb = view().render(&board.snapshot(), &drag, Viewport::new(100, 30));
        let rows = screen(&fb);
        assert!(rows.iter().any(|r| r.contains('▶')));
        assert!(rows.iter().any(|r| r.contains("BB") && !r.contains('<')));
    }

    #[test]
    fn call_to_action_after_end() {
        let config = BoardConfig {
            merge_limit: 1,
            ..BoardConfig::default()
        };
        let mut board = Board::empty(config).unwrap();
        let dock = board.add_pending_stack(&[Color::Red; 3]).unwrap();
        board.place_pending_stack(dock, SlotId(12)).unwrap();
        board.settle();
        assert!(board.is_ended());

        let fb = view().render(&board.snapshot(), &DragView::default(), Viewport::new(100, 30));
        let rows = screen(&fb);
        assert!(rows.iter().any(|r| r.contains("WELL DONE!")));
        assert!(rows.iter().any(|r| r.contains("PLAY NOW")));
        assert!(rows.iter().any(|r| r.contains("1 merges  100 pts")));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let board = Board::new(BoardConfig::default(), 9).unwrap();
        let fb = view().render(&board.snapshot(), &DragView::default(), Viewport::new(10, 4));
        assert_eq!(fb.width(), 10);
    }
}
