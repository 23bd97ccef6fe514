use crate::math::{apply_lighting, calculate_light_intensity, edge_function};
use crate::vertex::Vertex;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use std::io::{self, Write};

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub symbol: char,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            symbol: ' ',
            fg: None,
            bg: None,
        }
    }
}

/// Depth-buffered grid of terminal cells.
///
/// Geometry arrives in pixel coordinates; each cell covers
/// `cell_width` x `cell_height` pixels and is sampled at its center.
pub struct Canvas {
    width: usize,
    height: usize,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<Cell>,
    z_buffer: Vec<f32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, cell_width: f32, cell_height: f32) -> Self {
        Canvas {
            width,
            height,
            cell_width,
            cell_height,
            cells: vec![Cell::default(); width * height],
            z_buffer: vec![f32::INFINITY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Size of the canvas in pixels
    pub fn pixel_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_width,
            self.height as f32 * self.cell_height,
        )
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        if column < self.width && row < self.height {
            self.cells.get(row * self.width + column)
        } else {
            None
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::default(); width * height];
        self.z_buffer = vec![f32::INFINITY; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.z_buffer.fill(f32::INFINITY);
    }

    /// Fills a triangle with per-cell lighting and depth testing
    pub fn draw_triangle(
        &mut self,
        v0: &Vertex,
        v1: &Vertex,
        v2: &Vertex,
        light_pos_world: &[f32; 3],
        base_color: Color,
    ) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let to_cells = |v: &Vertex| {
            [
                v.screen_position[0] / self.cell_width,
                v.screen_position[1] / self.cell_height,
            ]
        };
        let (p0, p1, p2) = (to_cells(v0), to_cells(v1), to_cells(v2));

        // Compute bounding box of the triangle
        let min_x = p0[0].min(p1[0]).min(p2[0]).floor().max(0.0) as usize;
        let max_x = p0[0].max(p1[0]).max(p2[0]).ceil().min(self.width as f32 - 1.0);
        let min_y = p0[1].min(p1[1]).min(p2[1]).floor().max(0.0) as usize;
        let max_y = p0[1].max(p1[1]).max(p2[1]).ceil().min(self.height as f32 - 1.0);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as usize, max_y as usize);

        let area = edge_function(&p0, &p1, &p2);
        if area == 0.0 {
            return;
        }

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f32 + 0.5, y as f32 + 0.5];

                // Normalized barycentric weights, positive inside for either winding
                let w0 = edge_function(&p1, &p2, &p) / area;
                let w1 = edge_function(&p2, &p0, &p) / area;
                let w2 = edge_function(&p0, &p1, &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = v0.depth * w0 + v1.depth * w1 + v2.depth * w2;
                let offset = y * self.width + x;
                if depth >= self.z_buffer[offset] {
                    continue;
                }
                self.z_buffer[offset] = depth;

                let position = [
                    v0.position[0] * w0 + v1.position[0] * w1 + v2.position[0] * w2,
                    v0.position[1] * w0 + v1.position[1] * w1 + v2.position[1] * w2,
                    v0.position[2] * w0 + v1.position[2] * w1 + v2.position[2] * w2,
                ];
                let intensity = calculate_light_intensity(&v0.normal, &position, light_pos_world);

                self.cells[offset] = Cell {
                    symbol: ' ',
                    fg: None,
                    bg: Some(apply_lighting(base_color, intensity)),
                };
            }
        }
    }

    /// Draws a line between two pixel positions using Bresenham's algorithm
    pub fn draw_line(&mut self, from: [f32; 2], to: [f32; 2], symbol: char, color: Color) {
        let (mut x0, mut y0, x1, y1) = (
            (from[0] / self.cell_width).floor() as isize,
            (from[1] / self.cell_height).floor() as isize,
            (to[0] / self.cell_width).floor() as isize,
            (to[1] / self.cell_height).floor() as isize,
        );
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy; // error value e_xy

        loop {
            if x0 >= 0 && x0 < self.width as isize && y0 >= 0 && y0 < self.height as isize {
                let cell = &mut self.cells[y0 as usize * self.width + x0 as usize];
                cell.symbol = symbol;
                cell.fg = Some(color);
            }

            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Writes text over whatever is already drawn, clipped to the canvas
    pub fn draw_text(&mut self, column: usize, row: usize, text: &str, color: Color) {
        if row >= self.height {
            return;
        }
        for (i, symbol) in text.chars().enumerate() {
            let x = column + i;
            if x >= self.width {
                break;
            }
            let cell = &mut self.cells[row * self.width + x];
            cell.symbol = symbol;
            cell.fg = Some(color);
        }
    }

    /// Darkens every painted background
    pub fn dim(&mut self, factor: f32) {
        for cell in &mut self.cells {
            if let Some(bg) = cell.bg {
                cell.bg = Some(apply_lighting(bg, factor));
            }
        }
    }

    /// Queues the whole canvas onto a terminal writer
    pub fn flush<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in 0..self.height {
            queue!(
                out,
                MoveTo(0, row as u16),
                SetBackgroundColor(Color::Reset),
                SetForegroundColor(Color::Reset)
            )?;
            let mut fg = None;
            let mut bg = None;
            for cell in &self.cells[row * self.width..(row + 1) * self.width] {
                if cell.bg != bg {
                    queue!(out, SetBackgroundColor(cell.bg.unwrap_or(Color::Reset)))?;
                    bg = cell.bg;
                }
                if cell.fg != fg {
                    queue!(out, SetForegroundColor(cell.fg.unwrap_or(Color::Reset)))?;
                    fg = cell.fg;
                }
                queue!(out, Print(cell.symbol))?;
            }
            queue!(out, ResetColor)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f32, y: f32, depth: f32) -> Vertex {
        Vertex {
            position: [0.0, 0.0, 0.0],
            screen_position: [x, y],
            depth,
            normal: [0.0, 0.0, 1.0],
        }
    }

    const LIGHT: [f32; 3] = [0.0, 0.0, 10.0];
    const RED: Color = Color::Rgb { r: 200, g: 0, b: 0 };
    const BLUE: Color = Color::Rgb { r: 0, g: 0, b: 200 };

    #[test]
    fn triangle_fills_cells_in_either_winding() {
        let mut canvas = Canvas::new(10, 10, 1.0, 1.0);
        let (a, b, c) = (vertex(0.0, 0.0, 1.0), vertex(10.0, 0.0, 1.0), vertex(0.0, 10.0, 1.0));
        canvas.draw_triangle(&a, &b, &c, &LIGHT, RED);
        assert_eq!(canvas.cell(1, 1).unwrap().bg, Some(RED));
        assert_eq!(canvas.cell(9, 9).unwrap().bg, None);

        canvas.clear();
        canvas.draw_triangle(&a, &c, &b, &LIGHT, RED);
        assert_eq!(canvas.cell(1, 1).unwrap().bg, Some(RED));
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_order() {
        let quad = |depth| {
            [
                vertex(0.0, 0.0, depth),
                vertex(20.0, 0.0, depth),
                vertex(0.0, 20.0, depth),
            ]
        };
        let near = quad(1.0);
        let far = quad(5.0);

        let mut canvas = Canvas::new(8, 8, 1.0, 1.0);
        canvas.draw_triangle(&near[0], &near[1], &near[2], &LIGHT, RED);
        canvas.draw_triangle(&far[0], &far[1], &far[2], &LIGHT, BLUE);
        assert_eq!(canvas.cell(2, 2).unwrap().bg, Some(RED));

        canvas.clear();
        canvas.draw_triangle(&far[0], &far[1], &far[2], &LIGHT, BLUE);
        canvas.draw_triangle(&near[0], &near[1], &near[2], &LIGHT, RED);
        assert_eq!(canvas.cell(2, 2).unwrap().bg, Some(RED));
    }

    #[test]
    fn pixels_map_onto_cells() {
        let mut canvas = Canvas::new(4, 4, 8.0, 16.0);
        assert_eq!(canvas.pixel_size(), (32.0, 64.0));
        let (a, b, c) = (vertex(0.0, 0.0, 1.0), vertex(16.0, 0.0, 1.0), vertex(0.0, 32.0, 1.0));
        canvas.draw_triangle(&a, &b, &c, &LIGHT, RED);
        assert_eq!(canvas.cell(0, 0).unwrap().bg, Some(RED));
        assert_eq!(canvas.cell(3, 0).unwrap().bg, None);
    }

    #[test]
    fn offscreen_geometry_is_clipped() {
        let mut canvas = Canvas::new(4, 4, 1.0, 1.0);
        let (a, b, c) = (vertex(-9.0, -9.0, 1.0), vertex(-5.0, -9.0, 1.0), vertex(-9.0, -5.0, 1.0));
        canvas.draw_triangle(&a, &b, &c, &LIGHT, RED);
        canvas.draw_line([-10.0, 2.0], [10.0, 2.0], '-', Color::White);
        assert!((0..4).all(|x| canvas.cell(x, 2).unwrap().symbol == '-'));
        assert!((0..4).all(|x| canvas.cell(x, 0).unwrap().bg.is_none()));
    }

    #[test]
    fn line_reaches_both_endpoints() {
        let mut canvas = Canvas::new(6, 6, 1.0, 1.0);
        canvas.draw_line([0.0, 0.0], [5.0, 3.0], '*', Color::White);
        assert_eq!(canvas.cell(0, 0).unwrap().symbol, '*');
        assert_eq!(canvas.cell(5, 3).unwrap().symbol, '*');
        assert_eq!(canvas.cell(0, 5).unwrap().symbol, ' ');
    }

    #[test]
    fn text_is_clipped_and_flushed() {
        let mut canvas = Canvas::new(4, 2, 1.0, 1.0);
        canvas.draw_text(1, 1, "Hello", Color::White);
        canvas.draw_text(0, 5, "gone", Color::White);
        assert_eq!(canvas.cell(1, 1).unwrap().symbol, 'H');
        assert_eq!(canvas.cell(3, 1).unwrap().symbol, 'l');

        let mut out = Vec::new();
        canvas.flush(&mut out).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("Hel"));
        assert!(!written.contains("gone"));
    }

    #[test]
    fn dim_darkens_backgrounds() {
        let mut canvas = Canvas::new(2, 1, 1.0, 1.0);
        let (a, b, c) = (vertex(0.0, 0.0, 1.0), vertex(10.0, 0.0, 1.0), vertex(0.0, 10.0, 1.0));
        canvas.draw_triangle(&a, &b, &c, &LIGHT, RED);
        canvas.dim(0.5);
        assert_eq!(canvas.cell(0, 0).unwrap().bg, Some(Color::Rgb { r: 100, g: 0, b: 0 }));
    }
}
