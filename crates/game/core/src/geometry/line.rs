use super::Position;

/// Bresenham rasterization from `start` to `end`.
///
/// Yields every cell after `start` up to and including `end`. The start cell is
/// never produced, so `start == end` yields nothing.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    current: Position,
    end: Position,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
}

impl BresenhamLine {
    pub fn new(start: Position, end: Position) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            current: start,
            end,
            dx,
            dy,
            sx: if start.x < end.x { 1 } else { -1 },
            sy: if start.y < end.y { 1 } else { -1 },
            err: dx + dy,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.current == self.end {
            return None;
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.current.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.current.y += self.sy;
        }
        Some(self.current)
    }
}
