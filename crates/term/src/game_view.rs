//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, ProblemSnapshot, SurvivalTime};
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

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

const LANE_BG: Rgb = Rgb::new(20, 24, 40);
const PANEL_W: u16 = 24;

/// A lightweight terminal renderer for the falling lane.
///
/// Problems are spread across `slots` columns by id so that consecutive
/// spawns do not overlap; their row is the fall position scaled to the lane.
pub struct GameView {
    /// Inner lane width in terminal columns.
    lane_cols: u16,
    /// Width of one problem slot.
    slot_w: u16,
    /// Upper bound for the inner lane height.
    max_rows: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            lane_cols: 36,
            slot_w: 12,
            max_rows: 24,
        }
    }
}

impl GameView {
    pub fn new(lane_cols: u16, slot_w: u16, max_rows: u16) -> Self {
        Self {
            lane_cols: lane_cols.max(1),
            slot_w: slot_w.clamp(1, lane_cols.max(1)),
            max_rows: max_rows.max(2),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let rows = viewport.height.saturating_sub(2).min(self.max_rows).max(2);
        let frame_w = self.lane_cols + 2;
        let frame_h = rows + 2;
        let total_w = frame_w + 2 + PANEL_W;
        let start_x = viewport.width.saturating_sub(total_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            self.lane_cols,
            rows,
            ' ',
            CellStyle::default().on(LANE_BG),
        );
        draw_border(
            fb,
            start_x,
            start_y,
            frame_w,
            frame_h,
            CellStyle::fg(Rgb::new(200, 200, 200)),
        );
        // The bottom edge is the miss boundary.
        let boundary = CellStyle::fg(Rgb::new(220, 90, 90));
        for dx in 1..frame_w - 1 {
            fb.put_char(start_x + dx, start_y + frame_h - 1, '═', boundary);
        }

        for p in &snap.problems {
            self.draw_problem(fb, snap.lane_height, start_x + 1, start_y + 1, rows, p);
        }

        self.draw_side_panel(fb, snap, viewport, start_x + frame_w + 2, start_y);

        if snap.game_over {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, "GAME OVER", "R restart  Esc return");
        } else if !snap.started {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h, "READY", "");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Lane row (0-based from the top) for a fall position.
    pub fn row_for(&self, vertical_position: u32, lane_height: u32, rows: u16) -> u16 {
        if lane_height == 0 || rows == 0 {
            return 0;
        }
        let last = (rows - 1) as u64;
        let row = vertical_position as u64 * last / lane_height as u64;
        row.min(last) as u16
    }

    /// Slot column offset (within the lane) for a problem id.
    pub fn slot_x(&self, id: u64) -> u16 {
        let slots = (self.lane_cols / self.slot_w).max(1) as u64;
        ((id.saturating_sub(1) % slots) as u16) * self.slot_w
    }

    fn draw_problem(
        &self,
        fb: &mut FrameBuffer,
        lane_height: u32,
        lane_x: u16,
        lane_y: u16,
        rows: u16,
        p: &ProblemSnapshot,
    ) {
        let style = if p.is_special {
            CellStyle::fg(Rgb::new(255, 210, 60)).on(LANE_BG).bold()
        } else {
            CellStyle::fg(Rgb::new(140, 200, 255)).on(LANE_BG)
        };

        let text_w = p.question.chars().count() as u16 + if p.is_special { 2 } else { 0 };
        let pad = self.slot_w.saturating_sub(text_w) / 2;
        let x = lane_x + self.slot_x(p.id) + pad;
        let y = lane_y + self.row_for(p.vertical_position, lane_height, rows);

        let limit = lane_x + self.lane_cols;
        let mut cx = x;
        let mut put = |fb: &mut FrameBuffer, ch: char| {
            if cx < limit {
                fb.put_char(cx, y, ch, style);
                cx += 1;
            }
        };
        if p.is_special {
            put(fb, '★');
            put(fb, ' ');
        }
        for ch in p.question.chars() {
            put(fb, ch);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));
        let dim = value.dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.score, value);
        y += 2;

        fb.put_str(panel_x, y, "MISSES", label);
        y += 1;
        let x = fb.put_u32(panel_x, y, snap.missed_count, value);
        let x = fb.put_str(x, y, "/", dim);
        fb.put_u32(x, y, snap.miss_limit, dim);
        y += 2;

        fb.put_str(panel_x, y, "TIME", label);
        y += 1;
        let t = SurvivalTime::from_millis(snap.elapsed_ms);
        let x = fb.put_u32(panel_x, y, t.minutes.min(u32::MAX as u64) as u32, value);
        let x = fb.put_str(x, y, ".", value);
        if t.seconds < 10 {
            fb.put_char(x, y, '0', value);
            fb.put_u32(x + 1, y, t.seconds as u32, value);
        } else {
            fb.put_u32(x, y, t.seconds as u32, value);
        }
        y += 2;

        fb.put_str(panel_x, y, "ANSWER", label);
        y += 1;
        let answer = CellStyle::fg(Rgb::new(120, 240, 140)).bold();
        let x = fb.put_str(panel_x, y, "> ", answer);
        let x = fb.put_str(x, y, &snap.answer_input, answer);
        if snap.playable() {
            fb.put_char(x, y, '_', answer.dim());
        }
        y += 2;

        for line in ["0-9 type  Enter submit", "R restart  Esc return", "Q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    title: &str,
    hint: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let style = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
    for (dy, text) in [(0u16, title), (1, hint)] {
        if text.is_empty() {
            continue;
        }
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        fb.put_str(x, mid_y + dy, text, if dy == 0 { style } else { style.dim() });
    }
}
