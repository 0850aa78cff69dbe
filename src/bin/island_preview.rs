//! island-preview - headless run of the island scene
//!
//! Builds the full island (ocean, vegetation, back forest, stairs, pool,
//! lights and player rig), simulates a number of frames and logs what the
//! behaviors did. Useful for checking a scene file or a seed without a
//! renderer.
//!
//! # Usage
//!
//! ```bash
//! island-preview
//! island-preview --config scene.toml --frames 1200
//! island-preview --seed 42 --dump-config
//! RUST_LOG=debug island-preview
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use isle_fx::behaviors::{FloatBob, IslandBoundary, OrbitMotion, VerticalControls};
use isle_fx::builders::StairFlight;
use isle_fx::config::{self, SceneConfig};
use isle_fx::geometry::generate_plane;
use isle_fx::lighting::{DayNightCycle, DayNightTargets, ToggleDayNight, ToggleLightGroup};
use isle_fx::math::Aabb;
use isle_fx::model::{ForceOpaqueMaterials, ModelAutofit};
use isle_fx::scene::{
    Color, KeyInput, Light, LightKind, Material, Model, ModelPart, NodeId, Scene, SceneEvent, SceneNode, TextureMap,
};
use isle_fx::vegetation::{BackForest, IslandVegetation};
use isle_fx::water::{PoolWaterOverlay, WaterSurface};
use isle_fx::ComponentManager;

#[derive(Parser)]
#[command(name = "island-preview")]
#[command(author, version, about = "Headless preview of the island scene behaviors")]
struct Args {
    /// Scene configuration file (TOML); defaults are used when omitted
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Number of frames to simulate (overrides the config)
    #[arg(long, short = 'n')]
    frames: Option<u32>,

    /// Seed for both vegetation plantings (overrides the config)
    #[arg(long, short = 's')]
    seed: Option<u32>,

    /// Print the resolved configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,
}

/// Handles the preview pokes at while simulating
struct Stage {
    player: NodeId,
    mode_button: NodeId,
    mode_label: NodeId,
    dock_button: NodeId,
    dock_label: NodeId,
    pool: NodeId,
    vegetation: NodeId,
    forest: NodeId,
}

fn light(name: &str, kind: LightKind, color: u32, intensity: f32) -> SceneNode {
    SceneNode::new(name).with_light(Light::new(kind, Color::hex(color), intensity))
}

fn aabb(min: [f32; 3], max: [f32; 3]) -> Aabb {
    Aabb::new(min.into(), max.into())
}

fn pool_model() -> Model {
    let tile = Material::new(Color::hex(0xe9e4da), 0.8, 0.0);
    let baked_water = Material::new(Color::hex(0x2f8fd0), 0.1, 0.0).with_opacity(0.7);
    Model::new(vec![
        ModelPart {
            name: "PoolDeck".to_string(),
            bounds: aabb([-3.2, 0.0, -2.1], [3.2, 0.6, 2.1]),
            materials: vec![tile],
        },
        ModelPart {
            name: "Pool_InWater".to_string(),
            bounds: aabb([-2.6, -0.8, -1.5], [2.6, 0.4, 1.5]),
            materials: vec![baked_water],
        },
    ])
}

fn house_model() -> Model {
    let mut glass = Material::new(Color::hex(0xcfe6f2), 0.05, 0.0).with_opacity(0.3);
    glass.transmission = Some(0.9);
    Model::new(vec![ModelPart {
        name: "HouseWindows".to_string(),
        bounds: aabb([-4.0, 0.0, -3.0], [4.0, 5.0, 3.0]),
        materials: vec![glass, Material::new(Color::hex(0xb89c7d), 0.9, 0.0)],
    }])
}

fn build_stage(config: &SceneConfig, scene: &mut Scene, manager: &mut ComponentManager) -> Stage {
    let root = scene.add_node(SceneNode::new("scene"));

    let sky = scene.add_child(root, SceneNode::new("sky"));
    let sun = scene.add_child(root, light("sunLight", LightKind::Directional, 0xffffff, 1.0));
    let sun_visual = scene.add_child(root, SceneNode::new("sunVisual"));
    let ambient = scene.add_child(root, light("ambientLight", LightKind::Ambient, 0xffffff, 0.5));
    let fill = scene.add_child(root, light("fillLight", LightKind::Hemisphere, 0xffffff, 0.4));

    let ocean = scene.add_child(
        root,
        SceneNode::new("ocean")
            .with_surface(generate_plane(400.0, 400.0, 96, 96))
            .with_material(Material::new(Color::hex(0x62bce8), 0.25, 0.0).with_map(TextureMap::new("oceanTex"))),
    );
    manager.attach(WaterSurface::new(ocean, config.ocean.clone()), scene);

    let vegetation = scene.add_child(root, SceneNode::new("islandVegetation"));
    manager.attach(IslandVegetation::new(vegetation, config.island.clone()), scene);

    let forest = scene.add_child(root, SceneNode::new("backForest"));
    manager.attach(BackForest::new(forest, config.forest.clone()), scene);

    let stairs = scene.add_child(root, SceneNode::new("stairs").with_position(-6.0, 0.0, -14.0));
    manager.attach(StairFlight::new(stairs, config.stairs.clone()), scene);

    let player = scene.add_child(root, SceneNode::new("rig").with_position(0.0, 1.6, 8.0));
    manager.attach(IslandBoundary::new(player, config.boundary.clone()), scene);
    manager.attach(VerticalControls::new(player, config.vertical.clone()), scene);

    let boat = scene.add_child(root, SceneNode::new("boat").with_position(18.0, 0.2, 40.0));
    manager.attach(FloatBob::new(boat, config.boat.clone()), scene);

    let gull = scene.add_child(root, SceneNode::new("gull"));
    manager.attach(OrbitMotion::new(gull, config.gull.clone()), scene);

    let pool = scene.add_child(
        root,
        SceneNode::new("pool")
            .with_position(18.0, 0.0, -13.5)
            .with_model(pool_model()),
    );
    manager.attach(ModelAutofit::new(pool, config.pool_fit.clone()), scene);
    manager.attach(PoolWaterOverlay::new(pool, config.pool.clone()), scene);

    let house = scene.add_child(root, SceneNode::new("house").with_model(house_model()));
    manager.attach(ForceOpaqueMaterials::new(house, config.house_materials.clone()), scene);

    let cycle = DayNightCycle::shared(
        root,
        DayNightTargets {
            sky: Some(sky),
            sun: Some(sun),
            sun_visual: Some(sun_visual),
            ambient: Some(ambient),
            fill: Some(fill),
            ocean: Some(ocean),
        },
    );
    manager.attach(cycle.clone(), scene);

    let mode_button = scene.add_child(root, SceneNode::new("modeButton"));
    let mode_label = scene.add_child(root, SceneNode::new("modeLabel"));
    manager.attach(ToggleDayNight::new(mode_button, Some(cycle), Some(mode_label)), scene);

    let lamps: Vec<NodeId> = (0..3)
        .map(|i| scene.add_child(root, light(&format!("dockLamp{i}"), LightKind::Point, 0xffc98a, 1.3)))
        .collect();
    let bulbs: Vec<NodeId> = (0..3)
        .map(|i| scene.add_child(root, SceneNode::new(&format!("dockBulb{i}"))))
        .collect();
    let dock_button = scene.add_child(root, SceneNode::new("dockButton"));
    let dock_label = scene.add_child(root, SceneNode::new("dockLabel"));
    manager.attach(ToggleLightGroup::new(dock_button, lamps, bulbs, Some(dock_label)), scene);

    // The host reports the models once their assets resolve
    scene.emit(pool, SceneEvent::ModelLoaded);
    scene.emit(house, SceneEvent::ModelLoaded);

    Stage {
        player,
        mode_button,
        mode_label,
        dock_button,
        dock_label,
        pool,
        vegetation,
        forest,
    }
}

fn label_text(scene: &Scene, id: NodeId) -> &str {
    scene.node(id).and_then(|n| n.text.as_deref()).unwrap_or("-")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load(path).with_context(|| format!("loading scene config {}", path.display()))?,
        None => SceneConfig::default(),
    };
    if let Some(frames) = args.frames {
        config.preview.frames = frames;
    }
    if let Some(seed) = args.seed {
        config.island.seed = seed;
        config.forest.seed = seed;
    }

    if args.dump_config {
        let text = config::to_toml_string(&config).context("serializing scene config")?;
        println!("{text}");
        return Ok(());
    }

    let mut scene = Scene::new();
    let mut manager = ComponentManager::new();
    let stage = build_stage(&config, &mut scene, &mut manager);
    info!(
        "scene built: {} nodes, {} components",
        scene.node_count(),
        manager.len()
    );

    let frames = config.preview.frames;
    let toggle_at = config.preview.toggle_at.unwrap_or(frames / 2);
    let climb_until = frames / 4;

    scene.emit(stage.player, SceneEvent::KeyDown(KeyInput::new(&config.vertical.up_key)));
    for frame in 0..frames {
        if frame == climb_until {
            scene.emit(stage.player, SceneEvent::KeyUp(KeyInput::new(&config.vertical.up_key)));
        }
        if frame == toggle_at {
            scene.emit(stage.mode_button, SceneEvent::Click);
            scene.emit(stage.dock_button, SceneEvent::Click);
        }
        manager.tick(config.preview.frame_ms, &mut scene);
    }

    let player_y = scene
        .node(stage.player)
        .map(|n| n.transform.position.y)
        .unwrap_or_default();
    let pool_children = scene.children(stage.pool).len();
    if pool_children == 0 {
        warn!("pool overlay did not build a water plane");
    }

    info!(
        "simulated {} frames ({:.1} s): player at y {:.2}, {} / {}",
        frames,
        manager.elapsed_ms() * 0.001,
        player_y,
        label_text(&scene, stage.mode_label),
        label_text(&scene, stage.dock_label),
    );
    info!(
        "vegetation nodes: island {}, forest {}; pool overlay nodes: {}",
        scene.descendant_count(stage.vegetation),
        scene.descendant_count(stage.forest),
        pool_children,
    );

    manager.detach_all(&mut scene);
    Ok(())
}
