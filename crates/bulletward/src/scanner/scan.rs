//! Per-tick сканирование hitbox'ов
//!
//! Алгоритм тика (на каждый hitbox со scanner'ом):
//! 1. Guard: master switch, выключенный shape, неактивный hitbox —
//!    проверяется заново каждый тик
//! 2. Очистка dedup-набора
//! 3. Overlap-запрос формой hitbox'а: trigger-inclusive, без маски слоёв,
//!    до 24 результатов в переиспользуемый буфер
//! 4. По каждому необработанному результату: verbose-дамп (по флагу),
//!    снапшот capability-проб, классификация, нейтрализация с записью
//!    в dedup

use bevy::prelude::*;
use bevy_rapier3d::prelude::{
    Collider, ColliderDisabled, CollisionGroups, QueryFilter, ReadRapierContext, RigidBody,
    Velocity,
};

use crate::components::{AttackHitbox, DamageDealer, EnemyBullet, Player};
use crate::config::BulletwardConfig;
use crate::layers;
use crate::scanner::classify::{classify, Classification, TargetSnapshot};
use crate::scanner::neutralize::{invoke_native_absorb, suppress_damage_dealer};
use crate::scanner::{diagnostics, BulletNeutralized, BulletScanner};

/// Capability-пробы кандидата: damage-маркер, слой, renderer, player-маркер
///
/// Все Option: кандидат не обязан иметь ни одной.
pub type CapabilityProbes<'w, 's> = Query<
    'w,
    's,
    (
        Option<&'static DamageDealer>,
        Option<&'static CollisionGroups>,
        Option<&'static ViewVisibility>,
        Has<Player>,
    ),
>;

/// Система: триаж пересечений по всем активным hitbox'ам
///
/// Выполняется раз в физический тик, строго после физического шага хоста.
#[allow(clippy::too_many_arguments)]
pub fn scan_attack_hitboxes(
    mut commands: Commands,
    config: Res<BulletwardConfig>,
    rapier: ReadRapierContext,
    mut hitboxes: Query<(
        Entity,
        &AttackHitbox,
        &Collider,
        &GlobalTransform,
        &mut BulletScanner,
        Has<ColliderDisabled>,
    )>,
    player: Query<&GlobalTransform, With<Player>>,
    mut bullets: Query<&mut EnemyBullet>,
    mut bodies: Query<(&RigidBody, &mut Velocity)>,
    probes: CapabilityProbes,
    parents: Query<&ChildOf>,
    names: Query<&Name>,
    transforms: Query<&GlobalTransform>,
    children: Query<&Children>,
    colliders: Query<&Collider>,
    mut neutralized: EventWriter<BulletNeutralized>,
) {
    // Master switch: ноль запросов, ноль нейтрализаций
    if !config.enabled {
        return;
    }

    let Ok(context) = rapier.single() else {
        return;
    };

    // Reference point поглощения: transform игрока (если игрок есть)
    let reference = player.iter().next().map(|t| t.translation());

    for (hitbox_entity, hitbox, collider, transform, scanner, shape_disabled) in
        hitboxes.iter_mut()
    {
        // Hitbox мигает enabled/disabled в течение удара, guard свежий
        if !hitbox.enabled || shape_disabled {
            continue;
        }

        let scanner = scanner.into_inner();
        scanner.hits.clear();
        scanner.processed.clear();

        // Запрос формой hitbox'а: сенсоры включены, маска слоёв не
        // применяется, свой collider исключён
        let filter = QueryFilter::default().exclude_collider(hitbox_entity);
        context.intersect_shape(
            transform.translation(),
            transform.rotation(),
            collider.raw.as_ref(),
            filter,
            |other| scanner.record_hit(other),
        );

        if scanner.hits.is_empty() {
            continue;
        }

        let BulletScanner { hits, processed } = scanner;

        for &candidate in hits.iter() {
            if processed.contains(&candidate) {
                continue;
            }

            if config.log_all_collisions {
                diagnostics::log_candidate(
                    candidate, &bullets, &bodies, &probes, &parents, &names, &transforms,
                    &children, &colliders,
                );
            }

            let snapshot = build_snapshot(candidate, &bullets, &probes, &parents);

            match classify(&snapshot, config.destroy_damage_dealers) {
                Classification::StandardDirect => {
                    // Dedup пополняется при любой реальной попытке вызова
                    // entry point'а, успешной или нет
                    if invoke_native_absorb(
                        candidate,
                        hitbox_entity,
                        reference,
                        &mut bullets,
                        &config,
                        &mut neutralized,
                    ) {
                        processed.insert(candidate);
                    }
                }
                Classification::StandardInherited(ancestor) => {
                    // Соседний collider того же предка уже отработал в этом
                    // тике: повторный вызов реакции не нужен
                    if processed.contains(&ancestor) {
                        continue;
                    }
                    if invoke_native_absorb(
                        ancestor,
                        hitbox_entity,
                        reference,
                        &mut bullets,
                        &config,
                        &mut neutralized,
                    ) {
                        processed.insert(candidate);
                        processed.insert(ancestor);
                    }
                }
                Classification::NonStandard => {
                    suppress_damage_dealer(
                        candidate,
                        hitbox_entity,
                        snapshot.ancestor_bullet,
                        reference,
                        &mut commands,
                        &mut bullets,
                        &mut bodies,
                        &config,
                        &mut neutralized,
                    );
                    processed.insert(candidate);
                }
                Classification::Ignored => {}
            }
        }
    }
}

/// Снапшот capability-проб кандидата (вход чистой классификации)
pub(crate) fn build_snapshot(
    candidate: Entity,
    bullets: &Query<&mut EnemyBullet>,
    probes: &CapabilityProbes,
    parents: &Query<&ChildOf>,
) -> TargetSnapshot<'static> {
    let mut snapshot = TargetSnapshot {
        has_bullet: bullets.contains(candidate),
        ancestor_bullet: bullet_ancestor(candidate, parents, bullets),
        ..Default::default()
    };

    if let Ok((damage, groups, visibility, is_player)) = probes.get(candidate) {
        snapshot.has_damage_dealer = damage.is_some();
        if let Some(groups) = groups {
            snapshot.layer = Some(layers::layer_name(groups.memberships));
            snapshot.in_reserved_attack_layer =
                groups.memberships.intersects(layers::LAYER_ENEMY_ATTACK);
        }
        snapshot.renderer_visible = visibility.map(|v| v.get());
        snapshot.player_owned = is_player || parent_is_player(candidate, probes, parents);
    }

    snapshot
}

/// Ближайший предок с bullet-маркером (сам объект не считается)
pub(crate) fn bullet_ancestor(
    entity: Entity,
    parents: &Query<&ChildOf>,
    bullets: &Query<&mut EnemyBullet>,
) -> Option<Entity> {
    let mut current = entity;
    while let Ok(child_of) = parents.get(current) {
        let parent = child_of.parent();
        if bullets.contains(parent) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

/// Прямой родитель помечен как Player (глубже не смотрим)
fn parent_is_player(entity: Entity, probes: &CapabilityProbes, parents: &Query<&ChildOf>) -> bool {
    let Ok(child_of) = parents.get(entity) else {
        return false;
    };
    probes
        .get(child_of.parent())
        .map(|(_, _, _, is_player)| is_player)
        .unwrap_or(false)
}
