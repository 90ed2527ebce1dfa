//! Tween targets.
//!
//! A tween animates one [`Property`] of one [`TargetId`]. At most one tween
//! runs per [`TweenKey`] at a time.

/// A stable identifier for something that can be animated: a chart path,
/// the whole chart surface, a readout, a segment cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

impl TargetId {
    /// Create a target ID from a string key.
    ///
    /// Uses FNV-1a so the same key always maps to the same ID.
    pub const fn new(key: &str) -> Self {
        Self(Self::hash_str(key))
    }

    const fn hash_str(s: &str) -> u64 {
        const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
        const FNV_PRIME: u64 = 0x100000001b3;

        let bytes = s.as_bytes();
        let mut hash = FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(FNV_PRIME);
            i += 1;
        }
        hash
    }
}

/// Properties that can be animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    /// Opacity (0.0 to 1.0)
    Opacity,
    /// Uniform scale
    Scale,
    /// Y coordinate of the moving end of a path segment
    SegmentY,
    /// Fraction of a readout's new text revealed (0.0 to 1.0)
    TextReveal,
}

/// A (target, property) pair: the unit of tween exclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenKey {
    pub target: TargetId,
    pub property: Property,
}

impl TweenKey {
    pub const fn new(target: TargetId, property: Property) -> Self {
        Self { target, property }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_id_stable() {
        assert_eq!(TargetId::new("ambient"), TargetId::new("ambient"));
        assert_ne!(TargetId::new("ambient"), TargetId::new("object"));
    }

    #[test]
    fn test_const_target() {
        const SURFACE: TargetId = TargetId::new("surface");
        assert_eq!(SURFACE, TargetId::new("surface"));
    }
}
