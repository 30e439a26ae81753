//! Random index sources.
//!
//! Every random choice in the game (expansion cell, setup piece, AI move)
//! goes through [`RandomSource`], so tests can script the outcomes.

/// Source of uniformly distributed indices.
pub trait RandomSource {
    /// Return an index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl RandomSource for fastrand::Rng {
    #[inline]
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }
}

/// Replays a fixed list of indices, cycling when it runs out.
///
/// Each value is reduced modulo the requested length, so `0` always means
/// the first candidate.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    script: Vec<usize>,
    pos: usize,
}

impl ScriptedSource {
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, pos: 0 }
    }

    /// Always return the first candidate.
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for ScriptedSource {
    fn index(&mut self, len: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let v = self.script[self.pos % self.script.len()];
        self.pos += 1;
        v % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_cycles_and_wraps() {
        let mut src = ScriptedSource::new(vec![1, 5]);
        assert_eq!(src.index(4), 1);
        assert_eq!(src.index(4), 1); // 5 % 4
        assert_eq!(src.index(10), 1);
        assert_eq!(src.index(10), 5);
    }

    #[test]
    fn test_fastrand_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for len in 1..20 {
            assert!(rng.index(len) < len);
        }
    }
}
