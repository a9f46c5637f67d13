/// Per-tile-index metadata flags.
///
/// Tile indices carry up to four properties: whether the tile renders in
/// front of sprites, whether it animates (and at which speed), and whether
/// it is climbable. The flags are packed into one byte and never change at
/// runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TileAttributes(u8);

impl TileAttributes {
    const FOREGROUND: u8 = 1 << 0;
    const ANIMATED: u8 = 1 << 1;
    const FAST_ANIMATION: u8 = 1 << 2;
    const LADDER: u8 = 1 << 3;

    /// Build an attribute set from individual flags.
    pub fn new(foreground: bool, animated: bool, fast_animation: bool, ladder: bool) -> Self {
        let mut bits = 0;
        if foreground {
            bits |= Self::FOREGROUND;
        }
        if animated {
            bits |= Self::ANIMATED;
        }
        if fast_animation {
            bits |= Self::FAST_ANIMATION;
        }
        if ladder {
            bits |= Self::LADDER;
        }
        TileAttributes(bits)
    }

    /// Tile renders in the foreground pass, in front of game objects.
    #[inline]
    pub fn is_foreground(self) -> bool {
        self.0 & Self::FOREGROUND != 0
    }

    /// Tile cycles through 4 animation states.
    #[inline]
    pub fn is_animated(self) -> bool {
        self.0 & Self::ANIMATED != 0
    }

    /// Animated tile advances every frame instead of every other frame.
    #[inline]
    pub fn is_fast_animation(self) -> bool {
        self.0 & Self::FAST_ANIMATION != 0
    }

    /// Tile is climbable.
    #[inline]
    pub fn is_ladder(self) -> bool {
        self.0 & Self::LADDER != 0
    }
}

/// Read-only lookup table from tile index to [`TileAttributes`].
///
/// Indices without an entry (including everything past the end of the
/// table) resolve to the empty attribute set; lookups never fail.
#[derive(Debug, Default, Clone)]
pub struct TileAttributeDict {
    flags: Vec<TileAttributes>,
}

impl TileAttributeDict {
    /// Build the dictionary from `(index, attributes)` pairs.
    pub fn from_entries(entries: impl IntoIterator<Item = (u16, TileAttributes)>) -> Self {
        let mut flags = Vec::new();
        for (index, attrs) in entries {
            let index = index as usize;
            if index >= flags.len() {
                flags.resize(index + 1, TileAttributes::default());
            }
            flags[index] = attrs;
        }
        TileAttributeDict { flags }
    }

    /// Look up the attributes for a tile index.
    #[inline]
    pub fn attributes(&self, index: u16) -> TileAttributes {
        self.flags
            .get(index as usize)
            .copied()
            .unwrap_or_default()
    }
}
