//! Bounded linear remap for the extended-range tags.
//!
//! An unsigned integer code of `width` bytes is spread over `[min, max]` using
//! a power-of-two scale, keeping the top bit of the code in reserve. When the
//! range straddles zero the codes are offset so that 0.0 maps to an exact
//! integer code.

/// Scale factors for one `[min, max]` range at one byte width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemapScale {
    min: f64,
    forward: f64,
    reverse: f64,
    zero_offset: f64,
}

impl RemapScale {
    /// Compute the scale for a range and a code width of 1..=8 bytes.
    pub fn new(min: f64, max: f64, width: usize) -> Self {
        let b_pow = (max - min).log2().ceil();
        let d_pow = (8 * width) as f64 - 1.0;
        let forward = (d_pow - b_pow).exp2();
        let reverse = (b_pow - d_pow).exp2();
        let zero_offset = if min < 0.0 && max > 0.0 {
            forward * min - (forward * min).floor()
        } else {
            0.0
        };

        Self {
            min,
            forward,
            reverse,
            zero_offset,
        }
    }

    /// Map an integer code to its real value.
    pub fn decode(&self, code: u64) -> f64 {
        self.reverse * (code as f64 - self.zero_offset) + self.min
    }

    /// Map a real value to its integer code, truncating toward zero.
    pub fn encode(&self, value: f64) -> u64 {
        (self.forward * (value - self.min) + self.zero_offset) as u64
    }

    /// Size of one code step in output units.
    pub fn step(&self) -> f64 {
        self.reverse
    }
}

/// Decode `code` of `width` bytes into `[min, max]`.
pub fn linear_remap(min: f64, max: f64, width: usize, code: u64) -> f64 {
    RemapScale::new(min, max, width).decode(code)
}
