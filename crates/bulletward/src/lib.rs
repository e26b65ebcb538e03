//! BULLETWARD — нейтрализация вражеских снарядов ударом ближнего боя
//!
//! Runtime-аддон к боевой системе: на каждый hitbox удара вешается
//! collision scanner, который раз в физический тик собирает пересечения и
//! гасит вражеские снаряды (нативной реакцией поглощения) и, опционально,
//! прочие опасные объекты (экспериментальное подавление).
//!
//! Границы владения:
//! - Хост: физика (bevy_rapier3d), жизненный цикл hitbox'ов, рендер,
//!   settings UI, поведение снарядов
//! - Мы: attach/detach scanner'ов, классификация, нейтрализация, настройки

use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::plugin::PhysicsSet;
use std::path::PathBuf;

// Публичные модули
pub mod bullets;
pub mod components;
pub mod config;
pub mod layers;
pub mod logger;
pub mod scanner;

// Re-export базовых типов для удобства
pub use bullets::BulletBehaviorPlugin;
pub use components::{
    AttackHitbox, BulletAbsorbError, BulletState, DamageDealer, EnemyBullet, Player,
    ABSORB_FLIGHT_SECS,
};
pub use config::{BulletwardConfig, ConfigError, ConfigPath};
pub use logger::{log, log_error, log_info, log_warning, set_sink, LogLevel, LogSink};
pub use scanner::{
    classify, is_attack_layer, BulletNeutralized, BulletScanner, Classification, DespawnAfter,
    DetachScanners, NeutralizeKind, NeutralizedTint, TargetSnapshot, MAX_OVERLAP_HITS,
    NEUTRALIZE_DESPAWN_GRACE,
};

/// Главный plugin: attach controller + per-tick scanner + настройки
///
/// Физику НЕ добавляет: rapier принадлежит хост-приложению. Scanner-системы
/// встают в FixedPostUpdate после writeback'а физики, так что overlap-запросы
/// видят состояние текущего шага.
pub struct BulletwardPlugin {
    /// Файл настроек; None = без персистентности (headless тесты)
    pub config_path: Option<PathBuf>,
}

impl Default for BulletwardPlugin {
    fn default() -> Self {
        Self {
            config_path: Some(PathBuf::from("bulletward.ron")),
        }
    }
}

impl BulletwardPlugin {
    /// Вариант без файла настроек (всё в памяти)
    pub fn transient() -> Self {
        Self { config_path: None }
    }
}

impl Plugin for BulletwardPlugin {
    fn build(&self, app: &mut App) {
        logger::init_logger();

        // Настройки грузятся один раз при старте
        let config = match &self.config_path {
            Some(path) => BulletwardConfig::load_or_default(path),
            None => BulletwardConfig::default(),
        };
        app.insert_resource(config);

        app.add_event::<BulletNeutralized>().add_event::<DetachScanners>();

        // Порядок фиксированный: teardown → attach → scan → отложенные despawn'ы
        app.add_systems(
            FixedPostUpdate,
            (
                scanner::process_detach_requests,
                scanner::attach_scanners,
                scanner::scan_attack_hitboxes,
                scanner::despawn_after_timeout,
            )
                .chain()
                .after(PhysicsSet::Writeback),
        );

        // Персистентность настроек на выходе
        if let Some(path) = &self.config_path {
            app.insert_resource(ConfigPath(path.clone()));
            app.add_systems(Last, config::save_config_on_exit);
        }
    }
}

/// Создаёт minimal Bevy App для headless прогона (демо и интеграционные тесты)
///
/// TransformPlugin нужен rapier'у для GlobalTransform-синхронизации.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, TransformPlugin))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}
