use {ahash::AHashSet, std::fmt};

/// Color written into the picking framebuffer for a pickable object.
///
/// Black is the background of the picking pass and is never handed out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-1", derive(serde::Serialize, serde::Deserialize))]
pub struct PickColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl PickColor {
    pub const BLACK: Self = PickColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        PickColor { r, g, b }
    }

    /// Packs color into lookup key as `r | g << 8 | b << 16`.
    pub fn hash(self) -> u64 {
        u64::from(self.r) | u64::from(self.g) << 8 | u64::from(self.b) << 16
    }

    /// Inverse of [`PickColor::hash`].
    /// Returns `None` for keys that do not fit into 24 bits.
    pub fn from_hash(hash: u64) -> Option<Self> {
        if hash > 0xFF_FFFF {
            return None;
        }

        Some(PickColor {
            r: (hash & 0xFF) as u8,
            g: (hash >> 8 & 0xFF) as u8,
            b: (hash >> 16 & 0xFF) as u8,
        })
    }

    /// Color as normalized floats, ready to be written by a shader.
    pub fn to_unorm(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl From<[u8; 3]> for PickColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        PickColor { r, g, b }
    }
}

impl fmt::Display for PickColor {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Hands out distinct picking colors, skipping the reserved ones.
///
/// Colors are enumerated in the order of their [`PickColor::hash`], so
/// the generator never repeats itself until the whole 24-bit space is
/// exhausted, at which point it starts over.
#[derive(Clone, Debug)]
pub struct ColorGenerator {
    next: u32,
    reserved: AHashSet<PickColor>,
}

impl Default for ColorGenerator {
    fn default() -> Self {
        ColorGenerator::new()
    }
}

impl ColorGenerator {
    const LAST: u32 = 0xFF_FFFF;

    pub fn new() -> Self {
        ColorGenerator {
            next: 1,
            reserved: AHashSet::new(),
        }
    }

    pub fn with_reserved(
        mut self,
        reserved: impl IntoIterator<Item = PickColor>,
    ) -> Self {
        self.set_reserved(reserved);
        self
    }

    pub fn set_reserved(
        &mut self,
        reserved: impl IntoIterator<Item = PickColor>,
    ) {
        self.reserved = reserved.into_iter().collect();
    }

    pub fn is_reserved(&self, color: PickColor) -> bool {
        color == PickColor::BLACK || self.reserved.contains(&color)
    }

    pub fn next_color(&mut self) -> PickColor {
        loop {
            let hash = self.next;
            self.next = if hash >= Self::LAST {
                tracing::warn!("Picking colors exhausted, starting over");
                1
            } else {
                hash + 1
            };

            let color = PickColor::from_hash(u64::from(hash))
                .unwrap_or(PickColor::BLACK);

            if !self.is_reserved(color) {
                return color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_layout() {
        assert_eq!(PickColor::new(1, 0, 0).hash(), 1);
        assert_eq!(PickColor::new(0, 1, 0).hash(), 0x100);
        assert_eq!(PickColor::new(0, 0, 1).hash(), 0x1_0000);
        assert_eq!(PickColor::new(64, 127, 191).hash(), 0xBF7F40);
        assert_eq!(
            PickColor::from_hash(0xBF7F40),
            Some(PickColor::new(64, 127, 191))
        );
        assert_eq!(PickColor::from_hash(0x100_0000), None);
    }

    #[test]
    fn generator_skips_reserved() {
        let mut gen = ColorGenerator::new().with_reserved(vec![
            PickColor::new(2, 0, 0),
            PickColor::new(3, 0, 0),
        ]);

        assert_eq!(gen.next_color(), PickColor::new(1, 0, 0));
        assert_eq!(gen.next_color(), PickColor::new(4, 0, 0));
        assert_eq!(gen.next_color(), PickColor::new(5, 0, 0));
    }

    #[test]
    fn generator_never_yields_black() {
        let mut gen = ColorGenerator::new();
        let colors: AHashSet<_> = (0..1000).map(|_| gen.next_color()).collect();
        assert_eq!(colors.len(), 1000);
        assert!(!colors.contains(&PickColor::BLACK));
    }
}
