use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};
use crossterm::style::Color;
use sixsides::config::Args;
use sixsides::graphics::Canvas;
use sixsides::scene::Viewport;
use sixsides::state::ViewState;
use sixsides::{CubeView, PanSample, PanTracker};
use std::io::{self, Write};
use std::time::Instant;
use tracing::debug;

const OVERLAY_COLOR: Color = Color::White;
const WHEEL_ZOOM_STEP: f32 = 1.1;

/// Terminal front end for a [`CubeView`]
pub struct CubeWidget {
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
    /// Drag in progress, read as a pan gesture
    pan: PanTracker,
    /// Last known pointer cell
    pointer: Option<(u16, u16)>,
    canvas: Canvas,
    cell_size: (f32, f32),
    data: ViewState,
}

impl CubeWidget {
    pub fn new(args: &Args, columns: u16, rows: u16) -> Self {
        CubeWidget {
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
            pan: PanTracker::new(args.cell_width, args.cell_height),
            pointer: None,
            canvas: Canvas::new(
                columns as usize,
                rows as usize,
                args.cell_width,
                args.cell_height,
            ),
            cell_size: (args.cell_width, args.cell_height),
            data: ViewState {
                debug: args.debug,
                wireframe: args.wireframe,
                ..ViewState::default()
            },
        }
    }

    pub fn is_paused(&self) -> bool {
        self.data.paused
    }

    fn viewport(&self) -> Viewport {
        let (width, height) = self.canvas.pixel_size();
        Viewport::new(width, height, self.data.zoom)
    }

    fn pointer_pixel(&self) -> Option<[f32; 2]> {
        let (column, row) = self.pointer?;
        Some([
            (column as f32 + 0.5) * self.cell_size.0,
            (row as f32 + 0.5) * self.cell_size.1,
        ])
    }

    fn forward_pan(&mut self, view: &mut CubeView, sample: PanSample) {
        if let Err(err) = view.on_pan(sample) {
            debug!(%err, "pan sample dropped");
        }
    }

    /// Handles one terminal event; returns false once the user asks to quit
    pub fn event(&mut self, event: &Event, view: &mut CubeView) -> bool {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return false;
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return false,
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    self.data.debug = !self.data.debug;
                }
                KeyCode::Char('p') | KeyCode::Char('P') => {
                    self.data.paused = !self.data.paused;
                    // Drop any drag that was in flight
                    self.pan.cancel();
                }
                KeyCode::Char('w') | KeyCode::Char('W') => {
                    if !self.data.paused {
                        self.data.wireframe = !self.data.wireframe;
                    }
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    if !self.data.paused {
                        view.reset();
                        self.data.zoom = 1.0;
                        self.data.wireframe = false;
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse_event) => {
                let (column, row) = (mouse_event.column, mouse_event.row);
                self.pointer = Some((column, row));
                if self.data.paused {
                    return true;
                }
                let now = Instant::now();
                match mouse_event.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        self.pan.begin(column, row, now);
                    }
                    MouseEventKind::Drag(MouseButton::Left) => {
                        if let Some(sample) = self.pan.drag(column, row, now) {
                            self.forward_pan(view, sample);
                        }
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        if let Some(sample) = self.pan.end(now) {
                            self.forward_pan(view, sample);
                        }
                    }
                    MouseEventKind::ScrollUp => self.data.zoom_by(WHEEL_ZOOM_STEP),
                    MouseEventKind::ScrollDown => self.data.zoom_by(1.0 / WHEEL_ZOOM_STEP),
                    _ => {}
                }
            }
            Event::Resize(columns, rows) => {
                debug!(columns, rows, "resize");
                self.canvas.resize(*columns as usize, *rows as usize);
            }
            _ => {}
        }
        true
    }

    /// Paints the cube and overlays onto the terminal
    pub fn paint<W: Write>(&mut self, out: &mut W, view: &CubeView) -> io::Result<()> {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        self.canvas.clear();
        let viewport = self.viewport();
        let faces = view.scene().project(&viewport);

        if self.data.wireframe {
            for face in &faces {
                for i in 0..4 {
                    let from = face.corners[i].screen_position;
                    let to = face.corners[(i + 1) % 4].screen_position;
                    self.canvas.draw_line(from, to, '#', face.color);
                }
            }
        } else {
            for face in &faces {
                for [a, b, c] in face.triangles() {
                    self.canvas
                        .draw_triangle(a, b, c, &self.data.light_position, face.color);
                }
            }
        }

        if self.data.debug {
            let state = view.state();
            let hovered = self
                .pointer_pixel()
                .and_then(|point| view.scene().pick(&viewport, point))
                .map_or("-", |face| face.name());
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!(
                    "Rotation X: {:.2}, Y: {:.2}",
                    state.rotation_x, state.rotation_y
                ),
                format!(
                    "Velocity X: {:.0}, Y: {:.0}",
                    state.velocity_x, state.velocity_y
                ),
                format!("FPS: {:.2}", self.fps),
                format!("Zoom: {:.2}", self.data.zoom),
                format!("Face: {hovered}"),
            ];
            for (row, line) in lines.iter().enumerate() {
                self.canvas.draw_text(1, row, line, OVERLAY_COLOR);
            }
            let help = "drag: spin  wheel: zoom  d p w r q";
            let bottom = self.canvas.height().saturating_sub(1);
            self.canvas.draw_text(1, bottom, help, Color::DarkGrey);
        }

        // Display 'Paused' if the simulation is paused
        if self.data.paused {
            self.canvas.dim(0.4);
            let text = "Paused";
            let column = self.canvas.width().saturating_sub(text.len()) / 2;
            let row = self.canvas.height() / 2;
            self.canvas.draw_text(column, row, text, OVERLAY_COLOR);
        }

        self.canvas.flush(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use crossterm::event::{KeyEvent, MouseEvent};

    fn widget() -> CubeWidget {
        let args = Args::try_parse_from(["sixsides"]).unwrap();
        CubeWidget::new(&args, 80, 24)
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut widget = widget();
        let mut view = CubeView::new();
        assert!(widget.event(&key('d'), &mut view));
        assert!(!widget.event(&key('q'), &mut view));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!widget.event(&ctrl_c, &mut view));
    }

    #[test]
    fn dragging_right_spins_the_cube() {
        let mut widget = widget();
        let mut view = CubeView::new();
        widget.event(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12), &mut view);
        widget.event(&mouse(MouseEventKind::Drag(MouseButton::Left), 43, 12), &mut view);
        assert!(view.state().velocity_x > 0.0);
        assert!(view.state().rotation_x > 0.0);
    }

    #[test]
    fn paused_widget_ignores_drags() {
        let mut widget = widget();
        let mut view = CubeView::new();
        widget.event(&key('p'), &mut view);
        assert!(widget.is_paused());
        widget.event(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 12), &mut view);
        widget.event(&mouse(MouseEventKind::Drag(MouseButton::Left), 43, 12), &mut view);
        assert_eq!(view.state().velocity_x, 0.0);
    }

    #[test]
    fn paint_draws_overlay_and_cube() {
        let mut widget = widget();
        let mut view = CubeView::new();
        widget.event(&key('d'), &mut view);
        widget.event(&mouse(MouseEventKind::Moved, 40, 12), &mut view);

        let mut out = Vec::new();
        widget.paint(&mut out, &view).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains(env!("CARGO_PKG_NAME")));
        assert!(written.contains("Face: front"));
        assert!(!written.contains("Light"));
        assert!(widget.canvas.cell(40, 12).unwrap().bg.is_some());
    }

    #[test]
    fn resize_and_zoom() {
        let mut widget = widget();
        let mut view = CubeView::new();
        widget.event(&Event::Resize(100, 30), &mut view);
        assert_eq!(widget.canvas.width(), 100);
        assert_eq!(widget.canvas.height(), 30);

        widget.event(&mouse(MouseEventKind::ScrollUp, 0, 0), &mut view);
        assert!(widget.data.zoom > 1.0);
        widget.event(&key('r'), &mut view);
        assert_eq!(widget.data.zoom, 1.0);
    }
}
