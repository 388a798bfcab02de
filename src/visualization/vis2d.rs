use std::collections::HashMap;

use bevy::input::keyboard::KeyboardInput;
use bevy::input::ButtonState;
use bevy::math::primitives::{Circle, Rectangle};
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PrimaryWindow;

use crate::error::{Error, Result};
use crate::simulation::constraint::{DragConstraint, DEFAULT_STIFFNESS};
use crate::simulation::engine::Bounds;
use crate::simulation::scene::Scene;
use crate::simulation::states::{BodyId, NVec2, Shape};
use crate::simulation::telemetry::{DrawSurface, ReadoutSink, StrokeStyle, TelemetrySample};

#[derive(Component)]
struct BodyIndex(pub BodyId);

/// UI text showing the speed of one tracked body
#[derive(Component)]
struct SpeedReadout(pub BodyId);

/// Gizmo group for the velocity vector, so its width leaves outlines alone
#[derive(Default, Reflect, GizmoConfigGroup)]
struct VelocityGizmos;

const READOUT_FONT_SIZE: f32 = 18.0;
const READOUT_SPACING: f32 = 22.0;

pub fn run_2d(scene: Scene) -> AppExit {
    let bounds = scene.engine.bounds;
    let step_seconds = scene.engine.delta_ms / 1000.0;

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "orbitsim".into(),
                resolution: (bounds.width() as f32, bounds.height() as f32).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(scene)
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Time::<Fixed>::from_seconds(step_seconds))
        .init_gizmo_group::<VelocityGizmos>()
        .add_systems(Startup, (setup_bodies_system, setup_readouts_system, setup_gizmos_system))
        .add_systems(PostStartup, check_readouts_system)
        .add_systems(Update, (keyboard_thrust_system, pointer_drag_system))
        .add_systems(FixedUpdate, physics_step_system)
        .add_systems(
            Update,
            (sync_transforms_system, outline_system, velocity_overlay_system, readout_system)
                .after(keyboard_thrust_system),
        )
        .run()
}

/// Display coordinates (origin top-left, +y down) to world space of the
/// default 2D camera (origin centered, +y up)
fn to_screen(p: NVec2, bounds: &Bounds) -> Vec2 {
    Vec2::new(
        (p.x - bounds.min.x - 0.5 * bounds.width()) as f32,
        (bounds.min.y + 0.5 * bounds.height() - p.y) as f32,
    )
}

fn rgb(c: [f32; 3]) -> Color {
    Color::srgb(c[0], c[1], c[2])
}

fn setup_bodies_system(
    mut commands: Commands,
    scene: Res<Scene>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    info!("starting 2D viewer with {} bodies", scene.system.bodies.len());

    commands.spawn(Camera2dBundle::default());

    let bounds = scene.engine.bounds;
    for b in &scene.system.bodies {
        let pos = to_screen(b.x, &bounds);
        // later bodies draw on top
        let transform = Transform::from_xyz(pos.x, pos.y, b.id.0 as f32);

        if let Some(texture) = &b.appearance.texture {
            let diameter = (2.0 * b.shape.bounding_radius()) as f32;
            commands.spawn((
                SpriteBundle {
                    texture: asset_server.load(texture.clone()),
                    sprite: Sprite {
                        custom_size: Some(Vec2::splat(diameter)),
                        ..default()
                    },
                    transform,
                    ..default()
                },
                BodyIndex(b.id),
            ));
            continue;
        }

        let mesh = match b.shape {
            Shape::Circle { radius } => Mesh2dHandle(meshes.add(Circle::new(radius as f32))),
            Shape::Rectangle { width, height } => {
                Mesh2dHandle(meshes.add(Rectangle::new(width as f32, height as f32)))
            }
        };

        commands.spawn((
            MaterialMesh2dBundle {
                mesh,
                material: materials.add(ColorMaterial::from(rgb(b.appearance.fill))),
                transform,
                ..default()
            },
            BodyIndex(b.id),
        ));
    }
}

fn setup_readouts_system(mut commands: Commands, scene: Res<Scene>) {
    if scene.telemetry.is_none() {
        return;
    }

    let tracked = scene.system.bodies.iter().filter(|b| b.tracked);
    for (row, b) in tracked.enumerate() {
        commands.spawn((
            TextBundle::from_section(
                format!("{}: -", b.name),
                TextStyle {
                    font_size: READOUT_FONT_SIZE,
                    color: Color::WHITE,
                    ..default()
                },
            )
            .with_style(Style {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0 + READOUT_SPACING * row as f32),
                left: Val::Px(10.0),
                ..default()
            }),
            SpeedReadout(b.id),
        ));
    }
}

fn setup_gizmos_system(scene: Res<Scene>, mut config_store: ResMut<GizmoConfigStore>) {
    if let Some(overlay) = &scene.telemetry {
        let (config, _) = config_store.config_mut::<VelocityGizmos>();
        config.line_width = overlay.stroke.width;
    }
}

/// A tracked body without a readout is a wiring bug; stop right away
fn check_readouts_system(
    scene: Res<Scene>,
    readouts: Query<&SpeedReadout>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(overlay) = &scene.telemetry else {
        return;
    };
    let check = overlay.check_targets(&scene.system, |id| readouts.iter().any(|r| r.0 == id));
    if let Err(e) = check {
        error!("telemetry overlay: {e}");
        exit.send(AppExit::error());
    }
}

fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::ArrowUp => Some("ArrowUp"),
        KeyCode::ArrowDown => Some("ArrowDown"),
        KeyCode::ArrowLeft => Some("ArrowLeft"),
        KeyCode::ArrowRight => Some("ArrowRight"),
        _ => None,
    }
}

/// Every press event, OS auto-repeat included, queues one impulse
fn keyboard_thrust_system(mut events: EventReader<KeyboardInput>, mut scene: ResMut<Scene>) {
    for ev in events.read() {
        if ev.state != ButtonState::Pressed {
            continue;
        }
        if let Some(key) = key_name(ev.key_code) {
            if scene.thrust.key_pressed(key) {
                trace!("thrust {key}, {} pending", scene.thrust.pending());
            }
        }
    }
}

fn pointer_drag_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scene: ResMut<Scene>,
) {
    if buttons.just_released(MouseButton::Left) {
        scene.drag = None;
        return;
    }

    let Ok(window) = windows.get_single() else {
        return;
    };
    // window logical pixels share the scene's top-left origin
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let point = NVec2::new(cursor.x as f64, cursor.y as f64) + scene.engine.bounds.min;

    if buttons.just_pressed(MouseButton::Left) {
        let picked = DragConstraint::pick(&scene.system, point, DEFAULT_STIFFNESS);
        if let Some(drag) = &picked {
            debug!("grabbed body {}", drag.body.0);
        }
        scene.drag = picked;
    } else if let Some(drag) = scene.drag.as_mut() {
        drag.point = point;
    }
}

fn physics_step_system(mut scene: ResMut<Scene>) {
    scene.step();
}

fn sync_transforms_system(scene: Res<Scene>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let bounds = scene.engine.bounds;
    for (BodyIndex(id), mut transform) in &mut query {
        if let Some(b) = scene.system.get(*id) {
            let pos = to_screen(b.x, &bounds);
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
        }
    }
}

/// Stroke outlines of bodies that carry a stroke color
fn outline_system(scene: Res<Scene>, mut gizmos: Gizmos) {
    let bounds = scene.engine.bounds;
    for b in &scene.system.bodies {
        let Some(stroke) = b.appearance.stroke else {
            continue;
        };
        let pos = to_screen(b.x, &bounds);
        match b.shape {
            Shape::Circle { radius } => {
                gizmos.circle_2d(pos, radius as f32, rgb(stroke));
            }
            Shape::Rectangle { width, height } => {
                gizmos.rect_2d(pos, 0.0, Vec2::new(width as f32, height as f32), rgb(stroke));
            }
        }
    }
}

/// Gizmos are immediate mode: whatever is stroked this frame is gone the next
struct GizmoSurface<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's, VelocityGizmos>,
    bounds: Bounds,
    path: Vec<Vec2>,
}

impl DrawSurface for GizmoSurface<'_, '_, '_> {
    fn move_to(&mut self, p: NVec2) {
        self.path.clear();
        self.path.push(to_screen(p, &self.bounds));
    }

    fn line_to(&mut self, p: NVec2) {
        self.path.push(to_screen(p, &self.bounds));
    }

    /// Width comes from the `VelocityGizmos` group, set from the overlay style
    fn stroke(&mut self, style: StrokeStyle) {
        self.gizmos.linestrip_2d(self.path.drain(..), rgb(style.color));
    }
}

fn velocity_overlay_system(scene: Res<Scene>, mut gizmos: Gizmos<VelocityGizmos>) {
    let Some(overlay) = &scene.telemetry else {
        return;
    };
    let mut surface = GizmoSurface {
        gizmos: &mut gizmos,
        bounds: scene.engine.bounds,
        path: Vec::new(),
    };
    overlay.draw(&scene.system, &mut surface);
}

struct TextReadouts<'a> {
    targets: HashMap<BodyId, Mut<'a, Text>>,
}

impl ReadoutSink for TextReadouts<'_> {
    fn write(&mut self, sample: &TelemetrySample, text: &str) -> Result<()> {
        let section = self
            .targets
            .get_mut(&sample.body)
            .and_then(|t| t.sections.first_mut())
            .ok_or_else(|| Error::MissingElement(sample.name.clone()))?;
        if section.value != text {
            section.value = text.to_string();
        }
        Ok(())
    }
}

fn readout_system(
    scene: Res<Scene>,
    mut texts: Query<(&SpeedReadout, &mut Text)>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(overlay) = &scene.telemetry else {
        return;
    };
    let mut sink = TextReadouts {
        targets: texts.iter_mut().map(|(r, t)| (r.0, t)).collect(),
    };
    if let Err(e) = overlay.publish(&scene.system, &mut sink) {
        error!("telemetry overlay: {e}");
        exit.send(AppExit::error());
    }
}
