//! Field storage for the staggered grid
//!
//! All grid quantities live in flat row-major buffers (`y * width + x`). The
//! [`Field`] selector maps a sampled quantity to its stagger offset so that the
//! sampler, boundary pass and diagnostics never repeat per-field branching.

/// Dense 2D buffer stored in row-major order.
///
/// Used for the velocity components and density (`FieldData<f32>`) and for the
/// solid mask (`FieldData<u8>`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData<T = f32> {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<T>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl<T: Copy + Default> FieldData<T> {
    /// Create a new field with given dimensions, initialized to `T::default()`
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_value(width, height, T::default())
    }

    /// Create a new field with given dimensions, initialized to a value
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Row-major index of `(x, y)`
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }

    /// Get value at grid position, `None` when out of bounds
    #[must_use]
    pub fn try_get(&self, x: usize, y: usize) -> Option<T> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Set value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x] = value;
    }

    /// Fill entire field with a value
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Overwrite this field with the contents of another of the same size
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ
    pub fn copy_from(&mut self, other: &Self) {
        assert!(
            self.width == other.width && self.height == other.height,
            "Field dimensions differ"
        );
        self.data.copy_from_slice(&other.data);
    }
}

/// Selects one of the sampled grid quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Horizontal velocity, stored on vertical faces at `(x·h, (y+0.5)·h)`
    U,
    /// Vertical velocity, stored on horizontal faces at `((x+0.5)·h, y·h)`
    V,
    /// Smoke concentration, stored at cell centres
    Density,
}

impl Field {
    /// All sampled fields
    pub const ALL: [Field; 3] = [Field::U, Field::V, Field::Density];

    /// Offset of this field's lattice from the cell corner, in multiples of h
    #[must_use]
    pub const fn stagger(self) -> (f32, f32) {
        match self {
            Field::U => (0.0, 0.5),
            Field::V => (0.5, 0.0),
            Field::Density => (0.5, 0.5),
        }
    }

    /// Offset of this field's lattice in simulation units for cell size `h`
    #[must_use]
    pub fn offset(self, h: f32) -> (f32, f32) {
        let (sx, sy) = self.stagger();
        (sx * h, sy * h)
    }
}
