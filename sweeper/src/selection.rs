use rand::Rng;

/// Picks an index into an ordered collection of known length.
///
/// Implementations return a value in `[0, len)`. Callers never pass
/// `len == 0`; the empty case is handled before selection.
pub trait IndexPicker: Send + Sync {
    fn pick(&self, len: usize) -> usize;
}

/// Uniform draw over `[0, len)`.
///
/// Unseeded and non-reproducible. The draw only decides which record is
/// removed, so it is not security-sensitive.
pub struct UniformPicker;

impl IndexPicker for UniformPicker {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}
