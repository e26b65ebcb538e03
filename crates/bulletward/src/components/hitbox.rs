//! Hitbox удара ближнего боя
//!
//! Host-owned transient объект: спавнится и убивается анимационной системой
//! хоста, живёт доли секунды. Мы его НЕ создаём и НЕ удаляем, только вешаем
//! на него scanner и читаем флаг активности.

use bevy::prelude::*;

/// Активный удар ближнего боя (area of effect одного взмаха)
///
/// Форма задаётся `Collider` на том же entity. `enabled` мигает в течение
/// жизни удара (анимация включает hitbox только в активной фазе взмаха),
/// поэтому guard проверяет его каждый тик заново.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AttackHitbox {
    /// Активна ли зона поражения в текущей фазе взмаха
    pub enabled: bool,
}

impl Default for AttackHitbox {
    fn default() -> Self {
        Self { enabled: true }
    }
}
