/// A cell coordinate. Plain value type, usable directly as a map/set key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Shift by a signed offset. Returns `None` if either axis goes negative;
    /// the upper bound is checked by whoever owns the grid.
    pub fn offset(self, dx: isize, dy: isize) -> Option<Coord> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        Some(Coord { x, y })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord { x, y }
    }
}

/// Orthogonal offsets (up, left, right, down), used for 4-connectivity.
pub const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];

/// Moore neighborhood offsets, row by row:
/// 1 2 3
/// 4 . 5
/// 6 7 8
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A fixed-size 2D grid stored row-major. Unlike a world map, edges do not wrap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tilemap<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Clone> Tilemap<T> {
    pub fn new_with(width: usize, height: usize, value: T) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Index into the data array, or `None` outside the grid.
    pub fn index(&self, coord: Coord) -> Option<usize> {
        self.in_bounds(coord).then(|| coord.y * self.width + coord.x)
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.index(coord).map(|idx| &self.data[idx])
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        let idx = self.index(coord)?;
        Some(&mut self.data[idx])
    }

    /// Write a value. Returns `false` (and writes nothing) outside the grid.
    pub fn set(&mut self, coord: Coord, value: T) -> bool {
        match self.index(coord) {
            Some(idx) => {
                self.data[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Fill the entire map with a value.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// In-bounds orthogonal neighbors (4-connectivity). Edges clip, never wrap.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        ORTHOGONAL_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| coord.offset(dx, dy))
            .filter(move |&c| self.in_bounds(c))
    }

    /// Iterate over all cells with their coordinates, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        let width = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(idx, val)| (Coord::new(idx % width, idx / width), val))
    }

    /// Iterate mutably over all cells with their coordinates.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Coord, &mut T)> {
        let width = self.width;
        self.data
            .iter_mut()
            .enumerate()
            .map(move |(idx, val)| (Coord::new(idx % width, idx / width), val))
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.width * self.height).map(move |idx| Coord::new(idx % width, idx / width))
    }
}
