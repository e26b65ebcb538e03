//! Verbose-дамп пересечений
//!
//! Полный дамп каждого объекта, пересекающего hitbox: имя, слой, позиция,
//! тип collider'а, capability-пробы, родитель, дети. Включается флагом
//! `log_all_collisions` и стоит дорого: это инструмент разбора "почему
//! этот снаряд не зарубился", не постоянный лог.
//!
//! Шаг не может уронить тик: все пробы опциональны, паник здесь нет.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{Collider, RigidBody, Velocity};

use crate::components::EnemyBullet;
use crate::layers;
use crate::scanner::scan::CapabilityProbes;

/// Дамп одного кандидата (gated по `log_all_collisions` на стороне вызова)
#[allow(clippy::too_many_arguments)]
pub fn log_candidate(
    candidate: Entity,
    bullets: &Query<&mut EnemyBullet>,
    bodies: &Query<(&RigidBody, &mut Velocity)>,
    probes: &CapabilityProbes,
    parents: &Query<&ChildOf>,
    names: &Query<&Name>,
    transforms: &Query<&GlobalTransform>,
    children: &Query<&Children>,
    colliders: &Query<&Collider>,
) {
    let mut message = format!("[CollisionDebug] Object: {}\n", describe(candidate, names));

    if let Ok((damage, groups, visibility, is_player)) = probes.get(candidate) {
        if let Some(groups) = groups {
            message.push_str(&format!(
                " - Layer: {}\n",
                layers::layer_name(groups.memberships)
            ));
        }
        if let Some(damage) = damage {
            message.push_str(&format!(" - DamageDealer: {} damage\n", damage.damage));
        }
        if let Some(visibility) = visibility {
            message.push_str(&format!(" - Renderer visible: {}\n", visibility.get()));
        }
        if is_player {
            message.push_str(" - Player object\n");
        }
    }

    if let Ok(transform) = transforms.get(candidate) {
        message.push_str(&format!(" - Position: {:?}\n", transform.translation()));
    }

    if let Ok(collider) = colliders.get(candidate) {
        message.push_str(&format!(" - Collider: {:?}\n", collider.raw.shape_type()));
    }

    if bullets.contains(candidate) {
        message.push_str(" - Bullet marker: YES\n");
    }

    if let Ok((body, velocity)) = bodies.get(candidate) {
        message.push_str(&format!(
            " - RigidBody: {:?}, velocity: {:?}\n",
            body, velocity.linvel
        ));
    }

    if let Ok(child_of) = parents.get(candidate) {
        let parent = child_of.parent();
        message.push_str(&format!(" - Parent: {}\n", describe(parent, names)));
        if bullets.contains(parent) {
            message.push_str(" - Parent has bullet marker: YES\n");
        }
    }

    if let Ok(children) = children.get(candidate) {
        if !children.is_empty() {
            message.push_str(&format!(" - Children: {}\n", children.len()));
        }
    }

    crate::log(&message);
}

/// Имя entity для лога (Name если есть, иначе id)
fn describe(entity: Entity, names: &Query<&Name>) -> String {
    match names.get(entity) {
        Ok(name) => format!("{} ({:?})", name, entity),
        Err(_) => format!("{:?}", entity),
    }
}
