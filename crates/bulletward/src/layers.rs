//! Collision Layers — centralised constants для всего проекта
//!
//! ## Архитектура:
//! - **Memberships (битовая маска):** на каком слое находится объект
//! - **Filters (битовая маска):** с какими слоями объект коллидирует
//!
//! Слои именованные: классификация и debug-дамп оперируют именем слоя,
//! `layer_name` резолвит имя по первому установленному биту (аналог
//! глобальной таблицы имён слоёв у хоста).

use bevy_rapier3d::prelude::{CollisionGroups, Group};

/// Layer 1: Terrain (стены, пол, статика)
pub const LAYER_TERRAIN: Group = Group::GROUP_1;

/// Layer 2: Player (тело игрока и его hurtbox'ы)
pub const LAYER_PLAYER: Group = Group::GROUP_2;

/// Layer 3: Player Attack (hitbox'ы ударов игрока)
pub const LAYER_PLAYER_ATTACK: Group = Group::GROUP_3;

/// Layer 4: Enemies (тела врагов)
pub const LAYER_ENEMIES: Group = Group::GROUP_4;

/// Layer 5: Enemy Attack (зарезервированный слой контактных атак врагов)
pub const LAYER_ENEMY_ATTACK: Group = Group::GROUP_5;

/// Layer 6: Enemy Projectile (снаряды врагов)
pub const LAYER_ENEMY_PROJECTILE: Group = Group::GROUP_6;

/// Layer 7: Interactive (рычаги, сундуки, прочие не-боевые объекты)
pub const LAYER_INTERACTIVE: Group = Group::GROUP_7;

/// Имя слоя для классификации и debug-логов
///
/// Берём первый установленный бит (объект живёт на одном слое, как у хоста).
/// Неизвестные биты резолвятся в "Unknown".
pub fn layer_name(memberships: Group) -> &'static str {
    if memberships.intersects(LAYER_TERRAIN) {
        "Terrain"
    } else if memberships.intersects(LAYER_PLAYER) {
        "Player"
    } else if memberships.intersects(LAYER_PLAYER_ATTACK) {
        "Player Attack"
    } else if memberships.intersects(LAYER_ENEMIES) {
        "Enemies"
    } else if memberships.intersects(LAYER_ENEMY_ATTACK) {
        "Enemy Attack"
    } else if memberships.intersects(LAYER_ENEMY_PROJECTILE) {
        "Enemy Projectile"
    } else if memberships.intersects(LAYER_INTERACTIVE) {
        "Interactive"
    } else {
        "Unknown"
    }
}

/// Groups для hitbox'а удара (Player Attack, задевает врагов и их атаки)
pub fn attack_hitbox_groups() -> CollisionGroups {
    CollisionGroups::new(
        LAYER_PLAYER_ATTACK,
        LAYER_ENEMIES | LAYER_ENEMY_ATTACK | LAYER_ENEMY_PROJECTILE,
    )
}

/// Groups для вражеского снаряда
pub fn enemy_projectile_groups() -> CollisionGroups {
    CollisionGroups::new(
        LAYER_ENEMY_PROJECTILE,
        LAYER_TERRAIN | LAYER_PLAYER | LAYER_PLAYER_ATTACK,
    )
}

/// Groups для контактной атаки врага (слой "Enemy Attack")
pub fn enemy_attack_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_ENEMY_ATTACK, LAYER_PLAYER | LAYER_PLAYER_ATTACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_names() {
        assert_eq!(layer_name(LAYER_ENEMY_ATTACK), "Enemy Attack");
        assert_eq!(layer_name(LAYER_ENEMY_PROJECTILE), "Enemy Projectile");
        assert_eq!(layer_name(LAYER_PLAYER_ATTACK), "Player Attack");
        assert_eq!(layer_name(Group::GROUP_20), "Unknown");
    }

    #[test]
    fn test_projectiles_hit_player_attack_layer() {
        // Снаряды должны детектироваться hitbox'ами ударов
        let projectile = enemy_projectile_groups();
        let hitbox = attack_hitbox_groups();

        assert!(projectile.filters.intersects(hitbox.memberships));
        assert!(hitbox.filters.intersects(projectile.memberships));
    }
}
