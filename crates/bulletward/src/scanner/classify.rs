//! Классификация целей (pure logic)
//!
//! Классификация — чистая функция от снапшота capability-проб к enum'у,
//! без доступа к World: легко тестируется без живой физики. Снапшот
//! собирает scan-система (см. scan.rs), здесь только решение.
//!
//! Приоритет фиксированный, первый матч выигрывает:
//! 1. Собственный bullet-маркер → стандартная нейтрализация
//! 2. Bullet-маркер у предка (строго не сам объект) → стандартная на предке
//! 3. Экспериментально: damage-объект на "атакующем" слое, не принадлежащий
//!    игроку и либо без renderer'а, либо видимый → подавление
//! 4. Иначе без действий

use bevy::prelude::Entity;

/// Снапшот capability-проб одного кандидата
///
/// Все пробы опциональны: кандидат не обязан иметь ни одной из них.
#[derive(Debug, Clone, Default)]
pub struct TargetSnapshot<'a> {
    /// Собственный bullet-маркер
    pub has_bullet: bool,
    /// Ближайший предок с bullet-маркером (сам объект не считается)
    pub ancestor_bullet: Option<Entity>,
    /// Маркер контактного урона
    pub has_damage_dealer: bool,
    /// Имя слоя (None = нет collision groups)
    pub layer: Option<&'a str>,
    /// Членство в зарезервированном слое "Enemy Attack"
    pub in_reserved_attack_layer: bool,
    /// Объект игрока: маркер на самом объекте или на прямом родителе
    pub player_owned: bool,
    /// Видимость renderer'а (None = renderer'а нет)
    pub renderer_visible: Option<bool>,
}

/// Результат классификации
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Стандартный снаряд, маркер на самом объекте
    StandardDirect,
    /// Стандартный снаряд через предка: нейтрализуется предок
    StandardInherited(Entity),
    /// Нестандартный опасный объект (только при экспериментальном флаге)
    NonStandard,
    /// Не наша цель
    Ignored,
}

/// Матчится ли имя слоя как "атакующий" слой
///
/// Подстрочный матч, case-sensitive: "Player Attack" матчится (содержит
/// "Attack"), "attack" — нет.
pub fn is_attack_layer(name: &str) -> bool {
    name.contains("Attack") || name.contains("Enemy") || name.contains("Projectile")
}

/// Классификация кандидата, первый матч выигрывает
pub fn classify(snapshot: &TargetSnapshot, experimental: bool) -> Classification {
    // 1. Собственный bullet-маркер всегда первым
    if snapshot.has_bullet {
        return Classification::StandardDirect;
    }

    // 2. Маркер у предка
    if let Some(ancestor) = snapshot.ancestor_bullet {
        return Classification::StandardInherited(ancestor);
    }

    // 3. Экспериментальный путь: проверяется только после стандартных
    if experimental && is_damage_dealer_target(snapshot) {
        return Classification::NonStandard;
    }

    Classification::Ignored
}

/// Эвристика нестандартного опасного объекта
///
/// Условия (все разом): damage-маркер, "атакующий" слой (подстрока или
/// зарезервированный "Enemy Attack"), не объект игрока, renderer либо
/// отсутствует, либо видим (невидимые объекты не трогаем).
fn is_damage_dealer_target(snapshot: &TargetSnapshot) -> bool {
    if !snapshot.has_damage_dealer {
        return false;
    }

    let attack_layer = snapshot.layer.map(is_attack_layer).unwrap_or(false)
        || snapshot.in_reserved_attack_layer;
    if !attack_layer {
        return false;
    }

    if snapshot.player_owned {
        return false;
    }

    snapshot.renderer_visible.unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn damage_target(layer: &str) -> TargetSnapshot<'_> {
        TargetSnapshot {
            has_damage_dealer: true,
            layer: Some(layer),
            ..Default::default()
        }
    }

    #[test]
    fn test_direct_bullet_wins_over_everything() {
        // Даже полный набор условий нестандартного пути не важен:
        // собственный маркер проверяется первым
        let snapshot = TargetSnapshot {
            has_bullet: true,
            ancestor_bullet: Some(Entity::from_raw(7)),
            has_damage_dealer: true,
            layer: Some("Enemy Attack"),
            in_reserved_attack_layer: true,
            ..Default::default()
        };

        assert_eq!(classify(&snapshot, true), Classification::StandardDirect);
    }

    #[test]
    fn test_inherited_bullet_wins_over_non_standard() {
        let ancestor = Entity::from_raw(3);
        let snapshot = TargetSnapshot {
            ancestor_bullet: Some(ancestor),
            has_damage_dealer: true,
            layer: Some("Enemy Projectile"),
            ..Default::default()
        };

        assert_eq!(
            classify(&snapshot, true),
            Classification::StandardInherited(ancestor)
        );
    }

    #[test]
    fn test_non_standard_requires_experimental_flag() {
        let snapshot = damage_target("Enemy Projectile");

        assert_eq!(classify(&snapshot, true), Classification::NonStandard);
        // Флаг выключен: объект без bullet-маркера не трогаем никогда
        assert_eq!(classify(&snapshot, false), Classification::Ignored);
    }

    #[test]
    fn test_player_owned_never_non_standard() {
        let mut snapshot = damage_target("Enemy Attack");
        snapshot.in_reserved_attack_layer = true;
        snapshot.player_owned = true;

        assert_eq!(classify(&snapshot, true), Classification::Ignored);
    }

    #[test]
    fn test_invisible_renderer_excluded() {
        let mut snapshot = damage_target("Enemy Projectile");
        snapshot.renderer_visible = Some(false);
        assert_eq!(classify(&snapshot, true), Classification::Ignored);

        snapshot.renderer_visible = Some(true);
        assert_eq!(classify(&snapshot, true), Classification::NonStandard);

        // Без renderer'а вообще — трогаем
        snapshot.renderer_visible = None;
        assert_eq!(classify(&snapshot, true), Classification::NonStandard);
    }

    #[test]
    fn test_reserved_layer_matches_without_substring() {
        // Членство в зарезервированном слое срабатывает даже если имя
        // слоя не содержит ни одной из подстрок
        let mut snapshot = damage_target("Hazard");
        assert_eq!(classify(&snapshot, true), Classification::Ignored);

        snapshot.in_reserved_attack_layer = true;
        assert_eq!(classify(&snapshot, true), Classification::NonStandard);
    }

    #[test]
    fn test_no_layer_no_match() {
        let snapshot = TargetSnapshot {
            has_damage_dealer: true,
            layer: None,
            ..Default::default()
        };

        assert_eq!(classify(&snapshot, true), Classification::Ignored);
    }

    #[test]
    fn test_damage_marker_required() {
        let snapshot = TargetSnapshot {
            layer: Some("Enemy Projectile"),
            ..Default::default()
        };

        assert_eq!(classify(&snapshot, true), Classification::Ignored);
    }

    #[test]
    fn test_attack_layer_substring_table() {
        // Подстрочная семантика, case-sensitive
        let cases = [
            ("Enemy Projectile", true),
            ("Enemy Attack", true),
            ("Enemies", true),
            ("Player Attack", true), // содержит "Attack"
            ("Projectiles", true),
            ("attack", false), // регистр важен
            ("enemy", false),
            ("projectile", false),
            ("Terrain", false),
            ("Water", false),
            ("Interactive", false),
            ("", false),
            ("ATTACK", false),
        ];

        for (name, expected) in cases {
            assert_eq!(
                is_attack_layer(name),
                expected,
                "layer name {:?} ожидался {}",
                name,
                expected
            );
        }
    }
}
