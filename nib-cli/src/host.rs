//! Host implementation for terminal runs.

use nib_vm::Host;

/// Forwards script output to stdout and drawing calls to the log.
///
/// A terminal has no canvas, so the drawing words become debug-level
/// log lines; `--verbose` makes them visible.
pub struct ConsoleHost;

impl Host for ConsoleHost {
    fn print(&mut self, text: &str) {
        print!("{text}");
    }

    fn set_fill_style(&mut self, r: f64, g: f64, b: f64) {
        log::debug!("set_fill_style({r}, {g}, {b})");
    }

    fn set_stroke_style(&mut self, r: f64, g: f64, b: f64) {
        log::debug!("set_stroke_style({r}, {g}, {b})");
    }

    fn rectangle(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        log::debug!("rectangle({x0}, {y0}, {x1}, {y1})");
    }

    fn begin_path(&mut self) {
        log::debug!("begin_path()");
    }

    fn move_to(&mut self, x: f64, y: f64) {
        log::debug!("move_to({x}, {y})");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        log::debug!("line_to({x}, {y})");
    }

    fn stroke(&mut self) {
        log::debug!("stroke()");
    }

    fn rotate(&mut self, angle: f64) {
        log::debug!("rotate({angle})");
    }

    fn translate(&mut self, x: f64, y: f64) {
        log::debug!("translate({x}, {y})");
    }

    fn save(&mut self) {
        log::debug!("save()");
    }

    fn restore(&mut self) {
        log::debug!("restore()");
    }
}
