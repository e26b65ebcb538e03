//! Нейтрализация целей
//!
//! Два пути:
//! - Стандартный: дергаем нативный entry point снаряда (`absorb_toward`),
//!   reference point — transform игрока. Ошибка entry point'а логируется и
//!   считается "не нейтрализовано в этом тике", без ретраев.
//! - Нестандартный (best-effort, объект не рассчитан на смерть в полёте):
//!   снимаем damage-маркер, гасим скорость динамического тела, выключаем
//!   collider, вешаем визуальный cue, затем пробуем нативную реакцию на
//!   bullet-предке, а при её недоступности — отложенный despawn с
//!   grace-периодом, чтобы визуал/физика успели устаканиться.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ColliderDisabled, RigidBody, Velocity};

use crate::components::EnemyBullet;
use crate::config::BulletwardConfig;
use crate::scanner::{BulletNeutralized, NeutralizeKind};

/// Grace-период отложенного despawn'а подавленного объекта (секунды)
pub const NEUTRALIZE_DESPAWN_GRACE: f32 = 0.3;

/// Отложенный despawn: entity умирает по истечении `remaining`
///
/// Fire-and-forget: teardown scanner'ов уже запланированные таймеры
/// не отзывает.
#[derive(Component, Debug, Clone)]
pub struct DespawnAfter {
    /// Оставшееся время жизни (секунды)
    pub remaining: f32,
}

impl DespawnAfter {
    pub fn new(secs: f32) -> Self {
        Self { remaining: secs }
    }
}

/// Визуальный cue "объект нейтрализован": полупрозрачный серый
///
/// Рендер принадлежит хосту, мы только помечаем entity. Визуальный слой
/// хоста перекрашивает материал/спрайт в этот цвет.
#[derive(Component, Debug, Clone)]
pub struct NeutralizedTint {
    pub color: Color,
}

impl Default for NeutralizedTint {
    fn default() -> Self {
        Self {
            color: Color::srgba(0.7, 0.7, 0.7, 0.5),
        }
    }
}

/// Стандартная нейтрализация: нативная реакция поглощения
///
/// Возвращает true, если entry point был реально вызван (успех ИЛИ ошибка):
/// вызов заносится в dedup, чтобы соседние collider'ы той же цели не
/// дергали реакцию повторно в этом тике. Без reference point (нет игрока)
/// вызова нет вовсе: пропуск логируется, dedup не пополняется.
pub fn invoke_native_absorb(
    target: Entity,
    hitbox: Entity,
    reference: Option<Vec3>,
    bullets: &mut Query<&mut EnemyBullet>,
    config: &BulletwardConfig,
    neutralized: &mut EventWriter<BulletNeutralized>,
) -> bool {
    let Some(reference) = reference else {
        if config.debug_log {
            crate::log(&format!(
                "Нет player transform, стандартная нейтрализация {:?} пропущена",
                target
            ));
        }
        return false;
    };

    let Ok(mut bullet) = bullets.get_mut(target) else {
        return false;
    };

    match bullet.absorb_toward(reference) {
        Ok(()) => {
            if config.debug_log {
                crate::log(&format!("💥 Снаряд {:?} поглощён", target));
            }
            neutralized.write(BulletNeutralized {
                target,
                hitbox,
                kind: NeutralizeKind::Standard,
            });
            true
        }
        Err(err) => {
            if config.debug_log {
                crate::log(&format!("Ошибка поглощения снаряда {:?}: {}", target, err));
            }
            true
        }
    }
}

/// Нестандартная нейтрализация damage-объекта
///
/// Последовательность side-эффектов фиксированная (см. модульный doc).
/// Ошибки внутри деградируют в "не нейтрализовано", наружу не выходят.
#[allow(clippy::too_many_arguments)]
pub fn suppress_damage_dealer(
    target: Entity,
    hitbox: Entity,
    bullet_ancestor: Option<Entity>,
    reference: Option<Vec3>,
    commands: &mut Commands,
    bullets: &mut Query<&mut EnemyBullet>,
    bodies: &mut Query<(&RigidBody, &mut Velocity)>,
    config: &BulletwardConfig,
    neutralized: &mut EventWriter<BulletNeutralized>,
) {
    // Цель могла умереть раньше в этом же тике
    let Ok(mut target_commands) = commands.get_entity(target) else {
        return;
    };

    if config.debug_log {
        crate::log(&format!("🛡️ Подавление damage-объекта {:?}", target));
    }

    // 1. Снимаем контактный урон
    target_commands.remove::<crate::components::DamageDealer>();

    // 2. Гасим движение (только динамические тела)
    if let Ok((body, mut velocity)) = bodies.get_mut(target) {
        if matches!(body, RigidBody::Dynamic) {
            velocity.linvel = Vec3::ZERO;
            velocity.angvel = Vec3::ZERO;
        }
    }

    // 3. Выключаем collider: повторные срабатывания невозможны
    target_commands.insert(ColliderDisabled);

    // 4. Визуальный cue для рендер-слоя хоста
    target_commands.insert(NeutralizedTint::default());

    // 5. Нативная реакция на bullet-предке, иначе отложенный despawn
    let absorbed_via_ancestor = match (bullet_ancestor, reference) {
        (Some(ancestor), Some(reference)) => bullets
            .get_mut(ancestor)
            .ok()
            .map(|mut bullet| bullet.absorb_toward(reference).is_ok())
            .unwrap_or(false),
        _ => false,
    };

    if !absorbed_via_ancestor {
        target_commands.insert(DespawnAfter::new(NEUTRALIZE_DESPAWN_GRACE));
    }

    neutralized.write(BulletNeutralized {
        target,
        hitbox,
        kind: NeutralizeKind::Suppressed,
    });
}

/// Система: despawn entities с истёкшим grace-периодом
pub fn despawn_after_timeout(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut query: Query<(Entity, &mut DespawnAfter)>,
) {
    let delta = time.delta_secs();

    for (entity, mut despawn) in query.iter_mut() {
        despawn.remaining -= delta;
        if despawn.remaining <= 0.0 {
            crate::log(&format!("⚰️ Despawn подавленного объекта {:?}", entity));
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_despawn_countdown_logic() {
        // Логика таймера напрямую, без App schedule
        let mut despawn = DespawnAfter::new(NEUTRALIZE_DESPAWN_GRACE);
        let delta = 1.0 / 60.0;

        // 17 тиков при 60Hz = 0.283s, ещё жив
        for _ in 0..17 {
            despawn.remaining -= delta;
        }
        assert!(despawn.remaining > 0.0);

        // 19-й тик переваливает за 0.3s
        despawn.remaining -= delta;
        despawn.remaining -= delta;
        assert!(despawn.remaining <= 0.0);
    }

    #[test]
    fn test_tint_is_translucent_gray() {
        let tint = NeutralizedTint::default();
        let srgba = tint.color.to_srgba();

        assert_eq!(srgba.red, srgba.green);
        assert_eq!(srgba.green, srgba.blue);
        assert!(srgba.alpha < 1.0);
    }
}
