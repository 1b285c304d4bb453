//! Frame renderer
//!
//! Lays out one screen per mode. A full frame redraws the whole screen;
//! a partial frame while disarming rewrites only the time, progress bar
//! and hold-seconds rows.

use core::fmt::Write;

use defuse_core::output::{Frame, Redraw};
use defuse_core::setup::{Field, Hms};
use defuse_core::state::Mode;
use heapless::String;

use crate::screen::{Screen, LINE_LEN, SCREEN_COLS, SCREEN_ROWS};

/// Row of the big time readout while armed
pub const TIME_ROW: usize = 1;
/// Row of the hold progress bar
pub const BAR_ROW: usize = 5;
/// Row of the "hold for N more" text
pub const HOLD_ROW: usize = 6;

/// Setup rows for hours, minutes, seconds
const FIELD_ROWS: [usize; 3] = [2, 3, 4];

/// Cells inside the progress bar brackets
const BAR_CELLS: usize = SCREEN_COLS - 2;

type Line = String<LINE_LEN>;

/// Draw `frame` into `screen`
pub fn render(screen: &mut Screen, frame: &Frame) {
    if frame.redraw == Redraw::Partial && frame.mode == Mode::Disarming {
        render_disarming_rows(screen, frame);
        return;
    }

    screen.clear();
    match frame.mode {
        Mode::Setup => render_setup(screen, frame),
        Mode::Countdown => render_countdown(screen, frame),
        Mode::Disarming => render_disarming(screen, frame),
        Mode::Disarmed => render_disarmed(screen),
        Mode::Detonated => render_detonated(screen, frame),
    }
}

fn render_setup(screen: &mut Screen, frame: &Frame) {
    screen.set_line_centered(0, "SET TIMER");

    let labels = ["Hours:", "Minutes:", "Seconds:"];
    for (field, (row, label)) in Field::ALL.into_iter().zip(FIELD_ROWS.into_iter().zip(labels)) {
        let mut line = Line::new();
        let _ = write!(line, " {:<9}{:02}", label, frame.time.get(field));
        screen.set_line(row, &line);
        if field == frame.cursor {
            screen.set_highlight(row, 0, SCREEN_COLS as u8);
        }
    }

    screen.set_line(SCREEN_ROWS - 1, "A:Sel B:+/- C:Start");
}

fn render_countdown(screen: &mut Screen, frame: &Frame) {
    screen.set_line_centered(TIME_ROW, &clock_text(frame.time));
    screen.set_line_centered(HOLD_ROW, "Hold any button");
    screen.set_line_centered(HOLD_ROW + 1, "to disarm");
}

fn render_disarming(screen: &mut Screen, frame: &Frame) {
    screen.set_line_centered(3, "DISARMING...");
    render_disarming_rows(screen, frame);
}

fn render_disarming_rows(screen: &mut Screen, frame: &Frame) {
    screen.set_line_centered(TIME_ROW, &clock_text(frame.time));
    screen.set_line(BAR_ROW, &progress_bar(frame.progress));

    let mut hold = Line::new();
    let _ = write!(hold, "Hold for {} more s", frame.hold_remaining_s);
    screen.set_line_centered(HOLD_ROW, &hold);
}

fn render_disarmed(screen: &mut Screen) {
    screen.set_line_centered(2, "BOMB");
    screen.set_line_centered(3, "DISARMED");
    screen.set_line_centered(6, "Press any button");
    screen.set_line_centered(7, "to return");
}

fn render_detonated(screen: &mut Screen, frame: &Frame) {
    if !frame.flash_on {
        return;
    }
    screen.set_line_centered(3, "BOOM!");
    for row in 0..SCREEN_ROWS {
        screen.set_highlight(row, 0, SCREEN_COLS as u8);
    }
}

/// "HH:MM:SS"
pub fn clock_text(time: Hms) -> String<8> {
    let mut text = String::new();
    let _ = write!(text, "{:02}:{:02}:{:02}", time.hours, time.minutes, time.seconds);
    text
}

/// "[#####.....]" spanning the full width
pub fn progress_bar(progress: f32) -> Line {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * BAR_CELLS as f32) as usize;

    let mut bar = Line::new();
    let _ = bar.push('[');
    for cell in 0..BAR_CELLS {
        let _ = bar.push(if cell < filled { '#' } else { '.' });
    }
    let _ = bar.push(']');
    bar
}
