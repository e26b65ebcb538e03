//! Headless демо BULLETWARD
//!
//! Собирает полный стек (физика хоста + scanner + поведение снарядов),
//! спавнит игрока с мигающим hitbox'ом удара, кольцо стандартных снарядов
//! и один безмаркерный damage-объект, прогоняет детерминированные тики.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use std::time::Duration;

use bulletward::*;

const TICKS: usize = 240;

fn main() {
    println!("Starting BULLETWARD headless demo ({} ticks)", TICKS);

    let mut app = create_headless_app();
    app
        // Каждый update = ровно один fixed tick (детерминизм без wall-clock)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_micros(
            16_667,
        )))
        .add_plugins((
            // Физика принадлежит хосту
            RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule(),
            BulletwardPlugin::transient(),
            BulletBehaviorPlugin,
        ));

    // Демонстрируем и экспериментальное подавление
    app.world_mut()
        .resource_mut::<BulletwardConfig>()
        .destroy_damage_dealers = true;

    let player = app
        .world_mut()
        .spawn((
            Name::new("Player"),
            Player,
            Transform::from_xyz(0.0, 0.0, 0.0),
            GlobalTransform::default(),
        ))
        .id();

    // Hitbox удара: ребёнок игрока, форма сбоку (взмах вправо)
    let hitbox = app
        .world_mut()
        .spawn((
            Name::new("SlashHitbox"),
            AttackHitbox::default(),
            Transform::from_xyz(1.2, 0.0, 0.0),
            GlobalTransform::default(),
            Collider::ball(1.0),
            Sensor,
            layers::attack_hitbox_groups(),
            ChildOf(player),
        ))
        .id();

    // Кольцо стандартных снарядов в зоне удара
    for i in 0..4 {
        let angle = i as f32 * std::f32::consts::FRAC_PI_4;
        app.world_mut().spawn((
            Name::new(format!("EnemyBullet {}", i)),
            EnemyBullet::default(),
            Transform::from_xyz(1.2 + 0.5 * angle.cos(), 0.0, 0.5 * angle.sin()),
            GlobalTransform::default(),
            Collider::ball(0.2),
            Sensor,
            layers::enemy_projectile_groups(),
        ));
    }

    // Безмаркерный опасный объект (оружие босса): только damage-маркер
    app.world_mut().spawn((
        Name::new("BossBlade"),
        DamageDealer::new(2),
        Transform::from_xyz(1.5, 0.0, 0.0),
        GlobalTransform::default(),
        Collider::cuboid(0.3, 0.1, 0.1),
        RigidBody::Dynamic,
        Velocity::linear(Vec3::new(-4.0, 0.0, 0.0)),
        GravityScale(0.0),
        layers::enemy_attack_groups(),
    ));

    for tick in 0..TICKS {
        // Мигание hitbox'а: фазы взмаха сменяются каждые 30 тиков
        if tick > 0 && tick % 30 == 0 {
            if let Some(mut hb) = app.world_mut().get_mut::<AttackHitbox>(hitbox) {
                hb.enabled = !hb.enabled;
            }
        }

        app.update();

        if tick % 60 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    let world = app.world_mut();
    let mut bullets = world.query::<&EnemyBullet>();
    let absorbed = bullets.iter(world).filter(|b| b.is_absorbed()).count();
    let remaining = bullets.iter(world).count();

    println!(
        "Demo complete: {} bullets remaining ({} mid-absorb)",
        remaining, absorbed
    );
}
