/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Turn from which the evaluation only counts discs.
macro_rules! endgame_turn {
    () => {
        30
    };
}
pub(crate) use endgame_turn;

/// Turns before this one count as the early game, where mobility is boosted.
macro_rules! early_game_turn {
    () => {
        10
    };
}
pub(crate) use early_game_turn;

/// Turns from this one onward count as the late game, where disc difference is boosted.
macro_rules! late_game_turn {
    () => {
        20
    };
}
pub(crate) use late_game_turn;

/// Weight of the disc difference.
macro_rules! disc_weight {
    () => {
        1.0
    };
}
pub(crate) use disc_weight;

/// Weight of the corner-occupancy difference.
macro_rules! corner_weight {
    () => {
        10.0
    };
}
pub(crate) use corner_weight;

/// Weight of the edge-occupancy difference.
macro_rules! edge_weight {
    () => {
        5.0
    };
}
pub(crate) use edge_weight;

/// Weight of the mobility difference.
macro_rules! mobility_weight {
    () => {
        2.0
    };
}
pub(crate) use mobility_weight;

/// Multiplier on mobility during the early game.
macro_rules! early_game_multiplier {
    () => {
        2.0
    };
}
pub(crate) use early_game_multiplier;

/// Multiplier on disc difference during the late game.
macro_rules! late_game_multiplier {
    () => {
        2.0
    };
}
pub(crate) use late_game_multiplier;

/// Default depth of the information-set search.
macro_rules! default_search_depth {
    () => {
        4
    };
}
pub(crate) use default_search_depth;

/// Default number of illegal moves after which the match authority disqualifies a player.
macro_rules! default_max_illegal {
    () => {
        1000
    };
}
pub(crate) use default_max_illegal;
