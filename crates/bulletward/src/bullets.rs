//! Поведение снарядов (игровой контент)
//!
//! Исполнитель нативной реакции поглощения: scanner только переводит снаряд
//! в Absorbed через entry point, а лететь к точке поглощения и умирать
//! снаряд обязан сам. В реальной игре этот plugin живёт на стороне контента,
//! рядом со спавном снарядов; здесь он referenced демо и тестами.

use bevy::prelude::*;

use crate::components::{BulletState, EnemyBullet};

/// Plugin поведения снарядов (регистрируется контент-слоем, не scanner'ом)
pub struct BulletBehaviorPlugin;

impl Plugin for BulletBehaviorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, update_absorbed_bullets);
    }
}

/// Система: полёт поглощённых снарядов к точке поглощения
///
/// Притягивает снаряд к reference point и убивает его по истечении
/// времени полёта. Живые (Live) снаряды не трогаем: их движение ведёт
/// физика хоста.
pub fn update_absorbed_bullets(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut bullets: Query<(Entity, &mut Transform, &mut EnemyBullet)>,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, mut bullet) in bullets.iter_mut() {
        let absorb_speed = bullet.absorb_speed;
        let BulletState::Absorbed { toward, remaining } = &mut bullet.state else {
            continue;
        };

        // Движение к точке поглощения, без перелёта
        let to_target = *toward - transform.translation;
        let step = absorb_speed * delta;
        if to_target.length() > step {
            transform.translation += to_target.normalize() * step;
        } else {
            transform.translation = *toward;
        }

        *remaining -= delta;
        if *remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ABSORB_FLIGHT_SECS;

    #[test]
    fn test_absorbed_bullet_moves_toward_reference() {
        // Логика шага напрямую, без App schedule
        let mut bullet = EnemyBullet::default();
        bullet.absorb_toward(Vec3::new(10.0, 0.0, 0.0)).unwrap();

        let mut position = Vec3::ZERO;
        let delta = 1.0 / 60.0;

        let BulletState::Absorbed { toward, .. } = bullet.state else {
            panic!("bullet should be absorbed");
        };
        let step = bullet.absorb_speed * delta;
        let to_target = toward - position;
        position += to_target.normalize() * step;

        assert!(position.x > 0.0);
        assert!(position.x < 10.0);
    }

    #[test]
    fn test_flight_time_expires() {
        let mut bullet = EnemyBullet::default();
        bullet.absorb_toward(Vec3::ZERO).unwrap();

        let delta = 1.0 / 60.0;
        let ticks_needed = (ABSORB_FLIGHT_SECS / delta).ceil() as usize;

        for _ in 0..ticks_needed {
            if let BulletState::Absorbed { remaining, .. } = &mut bullet.state {
                *remaining -= delta;
            }
        }

        let BulletState::Absorbed { remaining, .. } = bullet.state else {
            panic!("bullet should stay absorbed");
        };
        assert!(remaining <= 0.0);
    }
}
