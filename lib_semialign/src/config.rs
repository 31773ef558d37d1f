/// Resource limits of the aligners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlignmentConfig {
    /// The number of bytes the quadratic matrices may occupy before falling back to linear memory.
    pub memory_limit: usize,

    /// The maximum depth of the divide and conquer recursion.
    pub recursion_limit: usize,

    /// Always align in linear memory.
    pub linear_memory: bool,
}

impl AlignmentConfig {
    /// Returns true if three `rows × columns` matrices of `element_size` bytes exceed the memory limit.
    pub fn exceeds_memory_limit(&self, rows: usize, columns: usize, element_size: usize) -> bool {
        3usize
            .checked_mul(rows)
            .and_then(|size| size.checked_mul(columns))
            .and_then(|size| size.checked_mul(element_size))
            .is_none_or(|size| size > self.memory_limit)
    }
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            memory_limit: 1 << 29,
            recursion_limit: 128,
            linear_memory: false,
        }
    }
}
