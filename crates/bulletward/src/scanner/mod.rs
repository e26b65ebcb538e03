//! Collision Scanner: нейтрализация вражеских снарядов ударом
//!
//! Два кооперирующих куска:
//! - Attachment controller: на каждый инициализированный hitbox удара
//!   вешается ровно один `BulletScanner` (идемпотентно)
//! - Per-tick scan: раз в физический тик scanner собирает все пересечения
//!   hitbox'а, классифицирует каждого кандидата и нейтрализует подходящих
//!
//! Поток: hitbox initialized → attach → physics tick → overlap query →
//! classify → neutralize (с дедупликацией внутри тика).

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use std::collections::HashSet;

pub mod classify;
pub mod diagnostics;
pub mod neutralize;
pub mod scan;

pub use classify::{classify, is_attack_layer, Classification, TargetSnapshot};
pub use neutralize::{
    despawn_after_timeout, DespawnAfter, NeutralizedTint, NEUTRALIZE_DESPAWN_GRACE,
};
pub use scan::scan_attack_hitboxes;

/// Жёсткий потолок результатов overlap-запроса за тик
///
/// Результаты сверх потолка молча отбрасываются: деградация приемлема,
/// зато стоимость тика ограничена и буфер не аллоцирует.
pub const MAX_OVERLAP_HITS: usize = 24;

/// Состояние сканера, один на hitbox
///
/// Буфер и dedup-набор принадлежат только этому scanner'у и трогаются
/// только внутри его собственного тика.
#[derive(Component, Debug)]
pub struct BulletScanner {
    /// Переиспользуемый буфер результатов overlap-запроса (cap 24)
    pub(crate) hits: Vec<Entity>,
    /// Обработанные в ЭТОМ тике цели; чистится в начале каждого тика
    pub(crate) processed: HashSet<Entity>,
}

impl Default for BulletScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl BulletScanner {
    pub fn new() -> Self {
        Self {
            hits: Vec::with_capacity(MAX_OVERLAP_HITS),
            processed: HashSet::new(),
        }
    }

    /// Записывает результат overlap-запроса, возвращает "продолжать ли обход"
    ///
    /// После заполнения буфера возвращает false: лишние результаты
    /// отбрасываются на стороне запроса.
    pub(crate) fn record_hit(&mut self, entity: Entity) -> bool {
        if self.hits.len() < MAX_OVERLAP_HITS {
            self.hits.push(entity);
        }
        self.hits.len() < MAX_OVERLAP_HITS
    }
}

/// Событие: снаряд/объект нейтрализован (для VFX, звука, статистики хоста)
#[derive(Event, Debug, Clone)]
pub struct BulletNeutralized {
    /// Что нейтрализовали
    pub target: Entity,
    /// Каким hitbox'ом
    pub hitbox: Entity,
    /// Каким способом
    pub kind: NeutralizeKind,
}

/// Способ нейтрализации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NeutralizeKind {
    /// Нативная реакция поглощения стандартного снаряда
    Standard,
    /// Best-effort подавление объекта без bullet-маркера
    Suppressed,
}

/// Событие: полный teardown (выгрузка мода)
///
/// Снимает scanner со всех живых hitbox'ов. Уже запланированные
/// отложенные despawn'ы не отзываются.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DetachScanners;

/// Система: attach scanner'а на каждый новый hitbox
///
/// Срабатывает на инициализацию hitbox'а (включая повторную), строго после
/// того как инициализация хоста уже прошла. Идемпотентно: существующий
/// scanner не пересоздаётся. Без collision shape attach пропускается.
pub fn attach_scanners(
    mut commands: Commands,
    config: Res<crate::BulletwardConfig>,
    hitboxes: Query<(Entity, Option<&Collider>, Has<BulletScanner>), Added<AttackHitbox>>,
) {
    for (entity, collider, has_scanner) in hitboxes.iter() {
        if collider.is_none() {
            if config.debug_log {
                crate::log(&format!(
                    "Hitbox {:?} без collision shape, scanner не прикреплён",
                    entity
                ));
            }
            continue;
        }

        if has_scanner {
            continue;
        }

        commands.entity(entity).insert(BulletScanner::new());

        if config.debug_log {
            crate::log(&format!("Scanner прикреплён к hitbox {:?}", entity));
        }
    }
}

/// Система: обработка запросов полного teardown'а
pub fn process_detach_requests(
    mut commands: Commands,
    mut events: EventReader<DetachScanners>,
    scanners: Query<Entity, With<BulletScanner>>,
) {
    if events.read().next().is_none() {
        return;
    }

    let mut removed = 0usize;
    for entity in scanners.iter() {
        commands.entity(entity).remove::<BulletScanner>();
        removed += 1;
    }

    crate::log_info(&format!("Teardown: снято {} scanner(ов)", removed));
}

use crate::components::AttackHitbox;
