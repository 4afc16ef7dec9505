/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

/// A real-valued evaluation of a position, from one player's perspective.
///
/// Scores are real-valued because a belief over several boards is scored by the mean of their evaluations.
#[derive(Clone, Copy, PartialEq, PartialOrd, Default)]
#[repr(transparent)]
pub struct Score(pub f64);

impl Score {
    /// Larger than any achievable score.
    pub const INF: Self = Self(f64::INFINITY);

    /// Neither side is ahead.
    pub const DRAW: Self = Self(0.0);

    /// Returns the greater of two scores.
    #[inline(always)]
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }

    /// Returns the lesser of two scores.
    #[inline(always)]
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Mean of an iterator of scores, or [`Score::DRAW`] if it is empty.
    pub fn mean(scores: impl IntoIterator<Item = Self>) -> Self {
        let (sum, n) = scores
            .into_iter()
            .fold((0.0, 0usize), |(sum, n), s| (sum + s.0, n + 1));

        if n == 0 {
            Self::DRAW
        } else {
            Self(sum / n as f64)
        }
    }
}

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i32> for Score {
    #[inline(always)]
    fn from(value: i32) -> Self {
        Self(value as f64)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_infinite() {
            write!(f, "{}inf", if self.0 < 0.0 { "-" } else { "+" })
        } else {
            write!(f, "{:.2}", self.0)
        }
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_nothing_is_a_draw() {
        assert_eq!(Score::mean(std::iter::empty()), Score::DRAW);
        assert_eq!(Score::mean([Score(1.0), Score(2.0)]), Score(1.5));
    }

    #[test]
    fn test_infinities_bound_everything() {
        assert!(-Score::INF < Score(-1e9));
        assert!(Score::INF > Score(1e9));
        assert_eq!(Score(3.0).max(-Score::INF), Score(3.0));
        assert_eq!(Score(3.0).min(Score::INF), Score(3.0));
    }
}
