//! Настройки мода (глобальные, персистентные)
//!
//! Один mutable resource на весь процесс:
//! - читается каждым scanner'ом каждый тик
//! - пишется только через settings UI хоста (вне этого crate)
//! - загружается один раз при старте, сохраняется при выходе
//!
//! Формат файла: RON. Битый или отсутствующий файл деградирует в defaults
//! с warning'ом, не ломает загрузку мода.

use bevy::app::AppExit;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Глобальные настройки: master switch + диагностика + экспериментальный режим
#[derive(Resource, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletwardConfig {
    /// Master kill switch: false = ни запросов, ни нейтрализаций
    pub enabled: bool,
    /// Debug-лог попыток attach/нейтрализаций
    pub debug_log: bool,
    /// Подробный дамп каждого объекта, пересекающего hitbox
    pub log_all_collisions: bool,
    /// Экспериментально: нейтрализация damage-объектов без bullet-маркера.
    /// Может задевать оружие боссов, поэтому выключено по умолчанию.
    pub destroy_damage_dealers: bool,
}

impl Default for BulletwardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debug_log: false,
            log_all_collisions: false,
            destroy_damage_dealers: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("config encode error: {0}")]
    Encode(#[from] ron::Error),
}

impl BulletwardConfig {
    /// Загрузка с деградацией в defaults (битый файл не фатален)
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            crate::log_info(&format!(
                "Config {} не найден, используем defaults",
                path.display()
            ));
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                crate::log_warning(&format!(
                    "Не удалось прочитать config {}: {} (используем defaults)",
                    path.display(),
                    err
                ));
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(ron::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, text)?;
        Ok(())
    }
}

/// Путь к файлу настроек (ставится плагином, если персистентность включена)
#[derive(Resource, Debug, Clone)]
pub struct ConfigPath(pub PathBuf);

/// Система: сохранение настроек при выходе из приложения
///
/// Персистентность "на выходе" вместо "на каждое изменение": settings UI
/// хоста может дергать флаги сколько угодно раз за сессию.
pub fn save_config_on_exit(
    mut exit_events: EventReader<AppExit>,
    config: Res<BulletwardConfig>,
    path: Option<Res<ConfigPath>>,
) {
    if exit_events.read().next().is_none() {
        return;
    }

    let Some(path) = path else {
        return;
    };

    match config.save(&path.0) {
        Ok(()) => crate::log_info(&format!("Config сохранён в {}", path.0.display())),
        Err(err) => crate::log_error(&format!(
            "Не удалось сохранить config {}: {}",
            path.0.display(),
            err
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BulletwardConfig::default();

        assert!(config.enabled);
        assert!(!config.debug_log);
        assert!(!config.log_all_collisions);
        // Экспериментальный режим всегда opt-in
        assert!(!config.destroy_damage_dealers);
    }

    #[test]
    fn test_roundtrip() {
        let path = std::env::temp_dir().join("bulletward_config_roundtrip.ron");

        let config = BulletwardConfig {
            enabled: false,
            debug_log: true,
            log_all_collisions: true,
            destroy_damage_dealers: true,
        };
        config.save(&path).unwrap();

        let loaded = BulletwardConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        // Файл со старой схемой (не все поля) должен грузиться
        let partial: BulletwardConfig = ron::from_str("(enabled: false)").unwrap();

        assert!(!partial.enabled);
        assert!(!partial.destroy_damage_dealers);
    }

    #[test]
    fn test_missing_file_degrades_to_defaults() {
        let path = std::env::temp_dir().join("bulletward_no_such_config.ron");
        let _ = std::fs::remove_file(&path);

        let config = BulletwardConfig::load_or_default(&path);
        assert_eq!(config, BulletwardConfig::default());
    }
}
