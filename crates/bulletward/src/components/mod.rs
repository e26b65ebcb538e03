//! ECS Components игровой модели
//!
//! Организация по доменам:
//! - hitbox: активный удар ближнего боя (host-owned, мы только наблюдаем)
//! - bullet: стандартный вражеский снаряд с нативной реакцией поглощения
//! - player: player marker (источник reference transform)

pub mod bullet;
pub mod hitbox;
pub mod player;

// Re-exports для удобного импорта
pub use bullet::*;
pub use hitbox::*;
pub use player::*;
