//! Player marker

use bevy::prelude::*;

/// Маркер игрока
///
/// Используется двояко: transform игрока служит reference point для
/// поглощения снарядов, а сам маркер (на объекте или его родителе)
/// исключает объекты игрока из экспериментальной нейтрализации.
#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;
