/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// Identity of a player, and therefore the owner of a disc.
///
/// On the wire, players are identified by `0` and `1`.
/// Player `0` moves first.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    Zero,
    One,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with [`Color::Zero`].
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Zero, Self::One]
    }

    /// Creates a new [`Color`] from a player id.
    ///
    /// `id` must be `[0,1]`.
    ///
    /// # Example
    /// ```
    /// # use mole::Color;
    /// assert_eq!(Color::from_id(1).unwrap(), Color::One);
    /// assert!(Color::from_id(2).is_err());
    /// ```
    #[inline(always)]
    pub fn from_id(id: u8) -> Result<Self> {
        match id {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            _ => bail!("Invalid player id: must be 0 or 1. Got {id}."),
        }
    }

    /// Returns this color's opponent.
    ///
    /// # Example
    /// ```
    /// # use mole::Color;
    /// assert_eq!(Color::Zero.opponent(), Color::One);
    /// assert_eq!(Color::One.opponent(), Color::Zero);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }

    /// Returns the player id of this color, usable as an index.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns the character used to encode a disc of this color on the wire.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
        }
    }

    /// Parses a [`Color`] from its wire character.
    #[inline(always)]
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            '0' => Ok(Self::Zero),
            '1' => Ok(Self::One),
            _ => bail!("Invalid char for Color: must be '0' or '1'. Got {c:?}."),
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u8>()
            .map_err(|e| anyhow::anyhow!("Invalid player id {s:?}: {e}"))?;
        Self::from_id(id)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.char())
    }
}
