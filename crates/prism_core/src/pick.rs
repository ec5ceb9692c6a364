//! Pick-color allocation.
//!
//! Every live control owns a [`PickKey`]: a serial number that, shifted left
//! by [`PART_BITS`], becomes a flat 24-bit RGB color. The low bits carry a
//! part index so composite controls can tell their thumb from their track
//! without registering extra controls.
//!
//! ```text
//!  23                      4 3      0
//! ┌─────────────────────────┬────────┐
//! │         serial          │  part  │   alpha = 255
//! └─────────────────────────┴────────┘
//! ```
//!
//! Serial 0 is never handed out, so RGB `0x000000` (and any pixel with zero
//! alpha) means "no control". Serials only ever increase: a released key is
//! never reissued, which rules out aliasing between a destroyed control and a
//! new one within the same frame.

use std::collections::HashMap;

use crate::pixel::Rgba;

/// Number of low bits reserved for the part index.
pub const PART_BITS: u32 = 4;

/// Number of distinct parts per key.
pub const MAX_PARTS: u8 = 1 << PART_BITS;

/// Largest serial that still fits in 24 bits.
const MAX_SERIAL: u32 = (1 << (24 - PART_BITS)) - 1;

/// Errors raised by the pick allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PickError {
    /// Every serial in the 24-bit space has been used.
    #[error("pick key space exhausted after {0} allocations")]
    Exhausted(u32),
    /// Part index outside `0..MAX_PARTS`.
    #[error("part index {0} out of range (max {max})", max = MAX_PARTS - 1)]
    PartOutOfRange(u8),
}

/// A control's unique pick identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickKey(u32);

impl PickKey {
    /// The serial number behind this key.
    #[must_use]
    pub const fn serial(self) -> u32 {
        self.0
    }

    /// Flat pick color for part 0.
    #[must_use]
    pub const fn color(self) -> Rgba {
        Rgba::from_rgb24(self.0 << PART_BITS)
    }

    /// Flat pick color for the given part.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::PartOutOfRange`] if `part >= MAX_PARTS`.
    pub fn part_color(self, part: u8) -> Result<Rgba, PickError> {
        if part >= MAX_PARTS {
            return Err(PickError::PartOutOfRange(part));
        }
        Ok(Rgba::from_rgb24((self.0 << PART_BITS) | u32::from(part)))
    }

    /// Decodes a pick-buffer pixel into a key and part index.
    ///
    /// Returns `None` for transparent pixels and the background sentinel.
    #[must_use]
    pub fn decode(pixel: Rgba) -> Option<(Self, u8)> {
        if pixel.a != 255 {
            return None;
        }
        let value = pixel.rgb24();
        let serial = value >> PART_BITS;
        if serial == 0 {
            return None;
        }
        Some((Self(serial), (value & u32::from(MAX_PARTS - 1)) as u8))
    }
}

/// Hands out pick keys and resolves pick colors back to their owners.
///
/// `T` is the owner handle (typically a control id).
#[derive(Debug)]
pub struct PickAllocator<T> {
    /// Next serial to hand out.
    next: u32,
    /// Live keys and their owners.
    owners: HashMap<u32, T>,
}

impl<T: Copy> PickAllocator<T> {
    /// Creates an empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: 1,
            owners: HashMap::with_capacity(256),
        }
    }

    /// Allocates a fresh key for `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`PickError::Exhausted`] once the 24-bit space is used up.
    pub fn allocate(&mut self, owner: T) -> Result<PickKey, PickError> {
        if self.next > MAX_SERIAL {
            return Err(PickError::Exhausted(MAX_SERIAL));
        }
        let key = PickKey(self.next);
        self.next += 1;
        self.owners.insert(key.0, owner);
        Ok(key)
    }

    /// Releases a key. Returns the previous owner if the key was live.
    pub fn release(&mut self, key: PickKey) -> Option<T> {
        self.owners.remove(&key.0)
    }

    /// Returns the owner of a live key.
    #[must_use]
    pub fn owner(&self, key: PickKey) -> Option<T> {
        self.owners.get(&key.0).copied()
    }

    /// Resolves a pick-buffer pixel to its owner and part index.
    #[must_use]
    pub fn resolve(&self, pixel: Rgba) -> Option<(T, u8)> {
        let (key, part) = PickKey::decode(pixel)?;
        self.owner(key).map(|owner| (owner, part))
    }

    /// Number of live keys.
    #[must_use]
    pub fn live(&self) -> usize {
        self.owners.len()
    }

    /// Total keys ever allocated.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next - 1
    }
}

impl<T: Copy> Default for PickAllocator<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_unique_and_increasing() {
        let mut alloc = PickAllocator::new();
        let mut seen = HashSet::new();
        let mut last = 0;
        for owner in 0..5_000u32 {
            let key = alloc.allocate(owner).unwrap();
            assert!(key.serial() > last);
            last = key.serial();
            assert!(seen.insert(key.color()));
        }
        assert_eq!(alloc.live(), 5_000);
    }

    #[test]
    fn test_released_key_never_reused() {
        let mut alloc = PickAllocator::new();
        let a = alloc.allocate('a').unwrap();
        let b = alloc.allocate('b').unwrap();
        assert_eq!(alloc.release(a), Some('a'));
        assert_eq!(alloc.release(a), None);

        let c = alloc.allocate('c').unwrap();
        assert_ne!(c, a);
        assert_eq!(alloc.resolve(a.color()), None);
        assert_eq!(alloc.resolve(b.color()), Some(('b', 0)));
        assert_eq!(alloc.resolve(c.color()), Some(('c', 0)));
    }

    #[test]
    fn test_part_round_trip() {
        let mut alloc = PickAllocator::new();
        let key = alloc.allocate(7u8).unwrap();
        for part in 0..MAX_PARTS {
            let color = key.part_color(part).unwrap();
            assert_eq!(alloc.resolve(color), Some((7, part)));
        }
        assert_eq!(key.part_color(MAX_PARTS), Err(PickError::PartOutOfRange(MAX_PARTS)));
    }

    #[test]
    fn test_background_is_never_a_key() {
        let alloc: PickAllocator<u8> = PickAllocator::new();
        assert_eq!(PickKey::decode(Rgba::TRANSPARENT), None);
        assert_eq!(PickKey::decode(Rgba::BLACK), None);
        // Part bits alone do not make a key.
        assert_eq!(PickKey::decode(Rgba::from_rgb24(0x00_00_05)), None);
        assert_eq!(alloc.resolve(Rgba::WHITE), None);
    }

    #[test]
    fn test_exhaustion() {
        let mut alloc = PickAllocator::new();
        alloc.next = MAX_SERIAL;
        assert!(alloc.allocate(()).is_ok());
        assert_eq!(alloc.allocate(()), Err(PickError::Exhausted(MAX_SERIAL)));
    }
}
