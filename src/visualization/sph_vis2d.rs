use bevy::app::AppExit;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::WindowResolution;
use log::{error, info};

use crate::simulation::driver::drive_one;
use crate::simulation::pressure::PressureField;
use crate::simulation::kernel::SmoothingKernel;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::{NVec2, Snapshot};

#[derive(Component)]
struct ParticleIndex(pub usize);

#[derive(Component)]
struct FpsText;

#[derive(Component)]
struct OverlayCell {
    x: f64,
    y: f64,
}

/// Pressure map toggled with `P`
#[derive(Resource, Default)]
struct PressureOverlay(bool);

const OVERLAY_SPACING: f64 = 10.0;
const BACKGROUND: (u8, u8, u8) = (0, 0, 30);
const PARTICLE_COLOUR: (u8, u8, u8) = (25, 255, 255);

pub fn run_2d(scenario: Scenario) {
    info!("run_2d: starting Bevy 2D viewer with {} particles", scenario.system.len());

    let width = scenario.parameters.domain_width as f32;
    let height = scenario.parameters.domain_height as f32;

    App::new()
        .insert_resource(scenario)
        .insert_resource(ClearColor(Color::rgb_u8(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2)))
        .init_resource::<PressureOverlay>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "sphsim".into(),
                resolution: WindowResolution::new(width, height),
                ..Default::default()
            }),
            ..Default::default()
        }).disable::<LogPlugin>()) // env_logger owns the `log` facade
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_systems(Startup, setup_particles_system)
        .add_systems(Update, (
            physics_step_system,
            sync_transforms_system,
            toggle_overlay_system,
            pressure_overlay_system,
            fps_text_system,
        ).chain())
        .run();
}

/// Domain coordinates have y pointing down from the top-left corner,
/// Bevy's 2D camera has y up around the window centre
fn to_screen(x: &NVec2, width: f64, height: f64, z: f32) -> Vec3 {
    Vec3::new((x.x - 0.5 * width) as f32, (0.5 * height - x.y) as f32, z)
}

fn setup_particles_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());

    let p = &scenario.parameters;
    let material = materials.add(ColorMaterial::from(Color::rgb_u8(PARTICLE_COLOUR.0, PARTICLE_COLOUR.1, PARTICLE_COLOUR.2)));

    for (i, particle) in scenario.system.particles.iter().enumerate() {
        let radius = particle.display_radius(p.particle_base_size) as f32;

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius.max(0.5)))),
                material: material.clone(),
                transform: Transform::from_translation(to_screen(&particle.x, p.domain_width, p.domain_height, 1.0)),
                ..Default::default()
            },
            ParticleIndex(i),
        ));
    }

    // Hidden until `P` is pressed
    let cols = (p.domain_width / OVERLAY_SPACING).ceil() as usize;
    let rows = (p.domain_height / OVERLAY_SPACING).ceil() as usize;
    for r in 0..rows {
        for c in 0..cols {
            let centre = NVec2::new((c as f64 + 0.5) * OVERLAY_SPACING, (r as f64 + 0.5) * OVERLAY_SPACING);
            commands.spawn((
                SpriteBundle {
                    sprite: Sprite {
                        color: Color::BLACK,
                        custom_size: Some(Vec2::splat(OVERLAY_SPACING as f32)),
                        ..Default::default()
                    },
                    transform: Transform::from_translation(to_screen(&centre, p.domain_width, p.domain_height, 0.0)),
                    visibility: Visibility::Hidden,
                    ..Default::default()
                },
                OverlayCell { x: centre.x, y: centre.y },
            ));
        }
    }

    commands.spawn((
        TextBundle::from_section("FPS: 0", TextStyle {
            font_size: 18.0,
            color: Color::WHITE,
            ..Default::default()
        })
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(0.0),
            left: Val::Px(0.0),
            ..Default::default()
        }),
        FpsText,
    ));
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut exit: EventWriter<AppExit>) {
    if let Err(e) = drive_one(&mut scenario) {
        error!("stopping viewer: {e:#}");
        exit.send(AppExit);
    }
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&ParticleIndex, &mut Transform)>) {
    let (w, h) = (scenario.parameters.domain_width, scenario.parameters.domain_height);
    for (ParticleIndex(i), mut transform) in &mut query {
        if let Some(p) = scenario.system.particles.get(*i) {
            transform.translation = to_screen(&p.x, w, h, 1.0);
        }
    }
}

fn toggle_overlay_system(keys: Res<ButtonInput<KeyCode>>, mut overlay: ResMut<PressureOverlay>, mut cells: Query<&mut Visibility, With<OverlayCell>>) {
    if !keys.just_pressed(KeyCode::KeyP) {
        return;
    }
    overlay.0 = !overlay.0;
    let visibility = if overlay.0 { Visibility::Visible } else { Visibility::Hidden };
    for mut v in &mut cells {
        *v = visibility;
    }
}

/// Grey level of each cell = pressure / target pressure, saturating at white
fn pressure_overlay_system(scenario: Res<Scenario>, overlay: Res<PressureOverlay>, mut cells: Query<(&OverlayCell, &mut Sprite)>) {
    if !overlay.0 {
        return;
    }
    let p = &scenario.parameters;
    let positions = scenario.system.positions();
    let masses = scenario.system.masses();
    let search = scenario.engine.neighbor_search.build(&positions);
    let kernel = SmoothingKernel::new(p.smoothing_radius);
    let field = PressureField::new(kernel, Snapshot { positions: &positions, masses: &masses }, &*search);

    for (cell, mut sprite) in &mut cells {
        let pressure = field.pressure(&NVec2::new(cell.x, cell.y));
        let brightness = (pressure / p.target_pressure).clamp(0.0, 1.0) as f32;
        sprite.color = Color::rgb(brightness, brightness, brightness);
    }
}

fn fps_text_system(diagnostics: Res<DiagnosticsStore>, mut query: Query<&mut Text, With<FpsText>>) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    for mut text in &mut query {
        text.sections[0].value = format!("FPS: {}", fps.round());
    }
}
