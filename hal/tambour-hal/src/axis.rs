//! Axis identifiers and axis bitsets

/// A named machine axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Hoop X axis
    X = 0,
    /// Hoop Y axis
    Y = 1,
}

impl Axis {
    /// Bit position of this axis inside an [`AxisMask`]
    pub const fn bit(self) -> u8 {
        self as u8
    }
}

/// Bitset over [`Axis`] values
///
/// The same type encodes two different things depending on where it is
/// passed: which axes pulse on a given tick (step mask), and which axes
/// move in the negative direction (direction mask).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisMask(u8);

impl AxisMask {
    /// Mask with no axes set
    pub const EMPTY: Self = Self(0);

    /// Return a copy of this mask with `axis` set
    pub const fn with(self, axis: Axis) -> Self {
        Self(self.0 | (1 << axis.bit()))
    }

    /// Set the bit for `axis`
    pub fn set(&mut self, axis: Axis) {
        self.0 |= 1 << axis.bit();
    }

    /// Check whether `axis` is set
    pub const fn contains(self, axis: Axis) -> bool {
        self.0 & (1 << axis.bit()) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set() {
        let mut mask = AxisMask::EMPTY;
        assert!(!mask.contains(Axis::X));
        assert!(!mask.contains(Axis::Y));

        mask.set(Axis::Y);
        assert!(mask.contains(Axis::Y));
        assert!(!mask.contains(Axis::X));

        // Setting twice is idempotent
        mask.set(Axis::Y);
        assert_eq!(mask, AxisMask::EMPTY.with(Axis::Y));
    }

    #[test]
    fn test_builder() {
        let mask = AxisMask::EMPTY.with(Axis::X).with(Axis::Y);
        assert!(mask.contains(Axis::X) && mask.contains(Axis::Y));
        assert_ne!(AxisMask::EMPTY.with(Axis::X), AxisMask::EMPTY.with(Axis::Y));
    }
}
