//! Вражеские снаряды и контактный урон
//!
//! `EnemyBullet` — стандартный снаряд с нативной реакцией поглощения
//! (entry point `absorb_toward`). Сама реакция исполняется bullet behavior
//! системой игрового контента, не scanner'ом: scanner только дергает entry
//! point и смотрит на Result.
//!
//! `DamageDealer` — контактный урон игроку независимо от того, снаряд это
//! или нет (шипы, оружие боссов, ловушки).

use bevy::prelude::*;
use thiserror::Error;

/// Время полёта поглощённого снаряда до despawn (секунды)
pub const ABSORB_FLIGHT_SECS: f32 = 0.35;

/// Стандартный вражеский снаряд
///
/// Маркер + состояние нативной реакции. Снаряд умеет сам себя "гасить":
/// поглощение притягивает его к reference point (transform игрока) и
/// убивает по истечении полёта.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyBullet {
    /// Текущее состояние реакции
    pub state: BulletState,
    /// Скорость полёта к точке поглощения (m/s)
    pub absorb_speed: f32,
}

impl Default for EnemyBullet {
    fn default() -> Self {
        Self {
            state: BulletState::Live,
            absorb_speed: 18.0,
        }
    }
}

/// Состояние снаряда
#[derive(Debug, Clone, PartialEq, Reflect)]
pub enum BulletState {
    /// Летит, опасен
    Live,
    /// Поглощён: летит к reference point, скоро despawn
    Absorbed {
        /// Точка притяжения (позиция игрока на момент поглощения)
        toward: Vec3,
        /// Оставшееся время полёта (секунды)
        remaining: f32,
    },
}

/// Ошибка нативной реакции поглощения
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BulletAbsorbError {
    #[error("bullet is already absorbed")]
    AlreadyAbsorbed,
}

impl EnemyBullet {
    /// Нативный entry point нейтрализации
    ///
    /// Переводит снаряд в Absorbed с притяжением к `reference`.
    /// Повторный вызов возвращает ошибку: реакция одноразовая.
    pub fn absorb_toward(&mut self, reference: Vec3) -> Result<(), BulletAbsorbError> {
        match self.state {
            BulletState::Absorbed { .. } => Err(BulletAbsorbError::AlreadyAbsorbed),
            BulletState::Live => {
                self.state = BulletState::Absorbed {
                    toward: reference,
                    remaining: ABSORB_FLIGHT_SECS,
                };
                Ok(())
            }
        }
    }

    pub fn is_absorbed(&self) -> bool {
        matches!(self.state, BulletState::Absorbed { .. })
    }
}

/// Объект, наносящий игроку контактный урон
///
/// Не привязан к снарядам: висит и на шипах, и на оружии боссов.
#[derive(Component, Debug, Default, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DamageDealer {
    /// Урон при касании
    pub damage: u32,
}

impl DamageDealer {
    pub fn new(damage: u32) -> Self {
        Self { damage }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absorb_transitions_state() {
        let mut bullet = EnemyBullet::default();
        assert!(!bullet.is_absorbed());

        let reference = Vec3::new(1.0, 2.0, 3.0);
        bullet.absorb_toward(reference).unwrap();

        assert!(bullet.is_absorbed());
        match bullet.state {
            BulletState::Absorbed { toward, remaining } => {
                assert_eq!(toward, reference);
                assert_eq!(remaining, ABSORB_FLIGHT_SECS);
            }
            BulletState::Live => panic!("bullet should be absorbed"),
        }
    }

    #[test]
    fn test_absorb_is_one_shot() {
        let mut bullet = EnemyBullet::default();
        bullet.absorb_toward(Vec3::ZERO).unwrap();

        let second = bullet.absorb_toward(Vec3::ONE);
        assert_eq!(second, Err(BulletAbsorbError::AlreadyAbsorbed));
    }
}
