// Hourglass demo: renders the sand simulation and flips it on click.
use bevy::asset::RenderAssetUsages;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use hourglass::{FlipRequest, HourglassPlugin, SandSimulation, SimParams};

const OUTLINE_SAMPLES: usize = 50;
const OUTLINE_MERIDIANS: usize = 12;
const ORBIT_SENSITIVITY: f32 = 0.005;
const ORBIT_DAMPING: f32 = 8.0;

#[derive(Component)]
struct HourglassRoot;

#[derive(Resource)]
struct SandMesh(Handle<Mesh>);

/// Camera circling the origin, steered by right-mouse drag.
#[derive(Component)]
struct OrbitCamera {
    radius: f32,
    yaw: f32,
    pitch: f32,
    target_yaw: f32,
    target_pitch: f32,
}

impl OrbitCamera {
    fn from_position(position: Vec3) -> Self {
        let radius = position.length();
        let yaw = position.x.atan2(position.z);
        let pitch = (position.y / radius).asin();
        Self {
            radius,
            yaw,
            pitch,
            target_yaw: yaw,
            target_pitch: pitch,
        }
    }

    fn translation(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.radius
    }
}

#[derive(Component)]
struct DiagnosticsText;

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<SandSimulation>,
) {
    let eye = Vec3::new(0.0, 2.0, 5.0);
    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(eye).looking_at(Vec3::ZERO, Vec3::Y),
        OrbitCamera::from_position(eye),
        AmbientLight {
            color: Color::WHITE,
            brightness: 400.0,
            ..default()
        },
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let mut sand = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    sand.insert_attribute(
        Mesh::ATTRIBUTE_POSITION,
        simulation.particles().points(),
    );
    let sand = meshes.add(sand);
    commands.insert_resource(SandMesh(sand.clone()));

    let sand_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xd9, 0xc0, 0x88),
        unlit: true,
        ..default()
    });

    commands
        .spawn((HourglassRoot, Transform::default(), Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(sand),
                MeshMaterial3d(sand_material),
                Transform::default(),
            ));
        });
}

fn setup_diagnostics(mut commands: Commands) {
    commands.spawn((
        Text::default(),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        DiagnosticsText,
    ));
}

fn flip_on_click(mouse: Res<ButtonInput<MouseButton>>, mut flips: MessageWriter<FlipRequest>) {
    if mouse.just_pressed(MouseButton::Left) {
        flips.write(FlipRequest);
    }
}

fn orbit_camera(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    time: Res<Time>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let Ok((mut orbit, mut transform)) = cameras.single_mut() else {
        return;
    };

    if mouse.pressed(MouseButton::Right) {
        orbit.target_yaw -= motion.delta.x * ORBIT_SENSITIVITY;
        orbit.target_pitch = (orbit.target_pitch + motion.delta.y * ORBIT_SENSITIVITY)
            .clamp(-1.5, 1.5);
    }

    let blend = (ORBIT_DAMPING * time.delta_secs()).min(1.0);
    orbit.yaw += (orbit.target_yaw - orbit.yaw) * blend;
    orbit.pitch += (orbit.target_pitch - orbit.pitch) * blend;

    *transform = Transform::from_translation(orbit.translation()).looking_at(Vec3::ZERO, Vec3::Y);
}

fn upload_sand_positions(
    mut simulation: ResMut<SandSimulation>,
    sand: Res<SandMesh>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !simulation.take_dirty() {
        return;
    }

    if let Some(mesh) = meshes.get_mut(&sand.0) {
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            simulation.particles().points(),
        );
    }
}

fn rotate_hourglass(
    simulation: Res<SandSimulation>,
    mut root: Query<&mut Transform, With<HourglassRoot>>,
) {
    let Ok(mut transform) = root.single_mut() else {
        return;
    };
    transform.rotation = Quat::from_rotation_z(simulation.container_angle());
}

fn draw_glass(simulation: Res<SandSimulation>, mut gizmos: Gizmos) {
    let rotation = Quat::from_rotation_z(simulation.container_angle());
    let outline = simulation.container().outline(OUTLINE_SAMPLES);
    let glass = Color::srgba(0.0, 0.33, 1.0, 0.6);

    for meridian in 0..OUTLINE_MERIDIANS {
        let angle = meridian as f32 / OUTLINE_MERIDIANS as f32 * std::f32::consts::TAU;
        let (sin, cos) = angle.sin_cos();
        gizmos.linestrip(
            outline
                .iter()
                .map(|p| rotation * Vec3::new(cos * p.x, p.y, sin * p.x)),
            glass,
        );
    }
}

fn update_diagnostics(
    diagnostics: Res<DiagnosticsStore>,
    simulation: Res<SandSimulation>,
    mut query: Query<&mut Text, With<DiagnosticsText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);

    for mut text in &mut query {
        text.0 = format!(
            "FPS: {:.1}\nGrains: {}\nSettled: {}\nFlipping: {}",
            fps,
            simulation.particle_count(),
            simulation.settled_count(),
            simulation.is_flipping(),
        );
    }
}

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb_u8(0xee, 0xee, 0xee)))
        .insert_resource(SimParams::default())
        .add_plugins(DefaultPlugins)
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(HourglassPlugin)
        .add_systems(Startup, (setup_scene, setup_diagnostics))
        .add_systems(
            Update,
            (
                flip_on_click.before(hourglass::handle_flip_requests),
                (upload_sand_positions, rotate_hourglass, draw_glass)
                    .after(hourglass::advance_sand),
                orbit_camera,
                update_diagnostics,
            ),
        )
        .run();
}
