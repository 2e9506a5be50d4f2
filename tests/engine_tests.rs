//! Integration tests for the engine context: ticking, edits, events and snapshots.

use blockworld::{
    BlockType, ChunkCoord, EngineState, NoiseSource, StructureEvent, TerrainMode, World,
    WorldConfig, WorldError, WorldSnapshot,
};
use cgmath::{Point3, Vector3};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(50);

struct ConstantNoise(f64);

impl NoiseSource for ConstantNoise {
    fn noise_2d(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }

    fn noise_3d(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0
    }
}

fn flat_config(render_distance: i32) -> WorldConfig {
    WorldConfig {
        render_distance,
        terrain_mode: TerrainMode::Flat,
        ..Default::default()
    }
}

fn origin() -> Point3<f32> {
    Point3::new(8.0, 40.0, 8.0)
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = WorldConfig {
        chunk_size: 0,
        ..Default::default()
    };
    assert!(matches!(
        EngineState::new(config),
        Err(WorldError::InvalidConfig(_))
    ));
}

#[test]
fn test_tick_loads_and_meshes_the_neighbourhood() {
    let mut engine = EngineState::new(flat_config(1)).expect("valid config");
    let report = engine.tick(origin(), FRAME);

    assert_eq!(report.loaded.len(), 9);
    assert_eq!(report.rebuilt.len(), 9);
    assert_eq!(report.edits_applied, 0);
    assert!(engine.chunk_mesh(ChunkCoord::new(0, 0)).is_some());
    assert!(engine.chunk_mesh(ChunkCoord::new(2, 0)).is_none());
    assert_eq!(engine.take_pending_uploads().len(), 9);
    assert!(engine.take_pending_uploads().is_empty());
}

#[test]
fn test_block_edits_rebuild_on_next_tick() {
    let mut engine = EngineState::new(flat_config(1)).expect("valid config");
    engine.tick(origin(), FRAME);
    let before = engine
        .chunk_mesh(ChunkCoord::new(0, 0))
        .map(|mesh| mesh.vertex_count());

    assert_eq!(engine.set_block(15, 33, 3, BlockType::STONE), BlockType::AIR);
    assert_eq!(engine.get_block(15, 33, 3), BlockType::STONE);

    let report = engine.tick(origin(), FRAME);
    assert_eq!(report.rebuilt, vec![ChunkCoord::new(0, 0), ChunkCoord::new(1, 0)]);

    // The new voxel shows 5 faces and hides the grass face beneath it.
    let after = engine
        .chunk_mesh(ChunkCoord::new(0, 0))
        .map(|mesh| mesh.vertex_count());
    assert_eq!(after, before.map(|count| count + 4 * 6));
}

#[test]
fn test_scheduled_edits_wait_for_their_delay() {
    let mut engine = EngineState::new(flat_config(0)).expect("valid config");
    engine.tick(origin(), FRAME);

    engine.schedule_block_change(Duration::from_millis(120), Point3::new(3, 32, 3), BlockType::AIR);
    engine.schedule_block_change(Duration::ZERO, Point3::new(5, 33, 5), BlockType::LEAVES);
    assert_eq!(engine.pending_edit_count(), 2);

    let report = engine.tick(origin(), FRAME);
    assert_eq!(report.edits_applied, 1);
    assert_eq!(report.rebuilt, vec![ChunkCoord::new(0, 0)]);
    assert_eq!(engine.get_block(5, 33, 5), BlockType::LEAVES);
    assert_eq!(engine.get_block(3, 32, 3), BlockType::GRASS);

    assert_eq!(engine.tick(origin(), FRAME).edits_applied, 0);
    assert_eq!(engine.tick(origin(), FRAME).edits_applied, 1);
    assert_eq!(engine.get_block(3, 32, 3), BlockType::AIR);
    assert_eq!(engine.pending_edit_count(), 0);
}

#[test]
fn test_structure_events_reach_the_host_once() {
    let config = WorldConfig {
        render_distance: 1,
        ..Default::default()
    };
    let world = World::with_noise(config, Box::new(ConstantNoise(0.9)));
    let mut engine = EngineState::from_world(world);

    // Chunks 3..=5 lie in village region (0, 0) and portal region (0, 0).
    let observer = Point3::new(72.0, 60.0, 72.0);
    engine.tick(observer, FRAME);

    let events = engine.drain_structure_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], StructureEvent::Village { .. }));
    assert!(matches!(events[1], StructureEvent::Portal { .. }));
    assert_eq!(events[1].anchor(), Point3::new(72, 48, 72));

    engine.tick(observer, FRAME);
    assert!(engine.drain_structure_events().is_empty());
}

#[test]
fn test_world_queries() {
    let mut world = World::new(flat_config(1));
    world.generate_chunk(ChunkCoord::new(0, 0));

    assert_eq!(world.surface_height(8, 8), Some(32));
    assert_eq!(world.surface_height(40, 8), None);
    assert!(world.is_solid_at(8, 32, 8));
    assert!(!world.is_solid_at(8, 33, 8));

    world.set_block(8, 33, 8, BlockType::WATER);
    assert!(!world.is_solid_at(8, 33, 8));
    assert_eq!(world.surface_height(8, 8), Some(33));
}

#[test]
fn test_raycast_finds_first_block_and_placement_cell() {
    let mut world = World::new(flat_config(1));
    world.generate_chunk(ChunkCoord::new(0, 0));

    let down = world
        .raycast(Point3::new(8.5, 40.5, 8.5), Vector3::new(0.0, -1.0, 0.0), 20.0)
        .expect("ground below");
    assert_eq!(down.block_position, Point3::new(8, 32, 8));
    assert_eq!(down.place_position, Point3::new(8, 33, 8));
    assert_eq!(down.block, BlockType::GRASS);

    assert!(world
        .raycast(Point3::new(8.5, 40.5, 8.5), Vector3::new(0.0, 1.0, 0.0), 20.0)
        .is_none());
    assert!(world
        .raycast(Point3::new(8.5, 40.5, 8.5), Vector3::new(0.0, -1.0, 0.0), 3.0)
        .is_none());
    assert!(world
        .raycast(Point3::new(8.5, 40.5, 8.5), Vector3::new(0.0, 0.0, 0.0), 20.0)
        .is_none());

    world.set_block(12, 34, 8, BlockType::WOOD);
    let sideways = world
        .raycast(Point3::new(8.5, 34.5, 8.5), Vector3::new(2.0, 0.0, 0.0), 10.0)
        .expect("wall ahead");
    assert_eq!(sideways.block_position, Point3::new(12, 34, 8));
    assert_eq!(sideways.place_position, Point3::new(11, 34, 8));
}

#[test]
fn test_raycast_rejects_unbounded_distance() {
    let mut world = World::new(flat_config(1));
    world.generate_chunk(ChunkCoord::new(0, 0));
    let origin = Point3::new(8.5, 40.5, 8.5);

    for max_distance in [f32::INFINITY, f32::NAN] {
        assert!(world
            .raycast(origin, Vector3::new(0.0, 1.0, 0.0), max_distance)
            .is_none());
        assert!(world
            .raycast(origin, Vector3::new(0.0, -1.0, 0.0), max_distance)
            .is_none());
    }
}

#[test]
fn test_snapshot_round_trip() {
    let mut world = World::new(flat_config(1));
    world.generate_chunk(ChunkCoord::new(0, 0));
    world.generate_chunk(ChunkCoord::new(-1, 0));
    world.set_block(-3, 40, 2, BlockType::PORTAL);
    world.set_block(5, 32, 5, BlockType::AIR);

    let snapshot = world.snapshot();
    assert_eq!(snapshot.chunks, vec![ChunkCoord::new(-1, 0), ChunkCoord::new(0, 0)]);
    assert!(snapshot.voxels.windows(2).all(|pair| pair[0] < pair[1]));

    let json = snapshot.to_json().expect("serialize");
    let parsed = WorldSnapshot::from_json(&json).expect("parse");
    assert_eq!(parsed, snapshot);

    let mut restored = World::new(flat_config(1));
    restored.restore(&parsed).expect("restore");
    assert_eq!(restored.store().len(), world.store().len());
    assert_eq!(restored.get_block(-3, 40, 2), BlockType::PORTAL);
    assert_eq!(restored.get_block(5, 32, 5), BlockType::AIR);
    assert_eq!(restored.get_block(5, 31, 5), BlockType::DIRT);
    assert!(!restored.generate_chunk(ChunkCoord::new(0, 0)));
    assert!(restored.generate_chunk(ChunkCoord::new(1, 0)));
}

#[test]
fn test_restore_rejects_unknown_ids_without_changes() {
    let mut world = World::new(flat_config(1));
    world.set_block(1, 1, 1, BlockType::STONE);

    let json = r#"{ "seed": 0, "voxels": [ { "x": 0, "y": 0, "z": 0, "id": 3 }, { "x": 1, "y": 0, "z": 0, "id": 42 } ] }"#;
    let snapshot = WorldSnapshot::from_json(json).expect("parse");

    assert!(matches!(
        world.restore(&snapshot),
        Err(WorldError::UnknownBlockId(42))
    ));
    assert_eq!(world.get_block(1, 1, 1), BlockType::STONE);
    assert_eq!(world.get_block(0, 0, 0), BlockType::AIR);
}

#[test]
fn test_restore_does_not_duplicate_structures() {
    let mut world = World::with_noise(WorldConfig::default(), Box::new(ConstantNoise(0.9)));
    world.generate_chunk(ChunkCoord::new(0, 0));
    assert_eq!(world.drain_structure_events().len(), 2);
    let snapshot = world.snapshot();

    let mut restored = World::with_noise(WorldConfig::default(), Box::new(ConstantNoise(0.9)));
    restored.restore(&snapshot).expect("restore");
    assert!(restored.planner().is_village_region_generated(ChunkCoord::new(3, 3)));
    assert!(restored.planner().is_portal_region_generated(ChunkCoord::new(3, 3)));

    restored.generate_chunk(ChunkCoord::new(1, 0));
    assert!(restored.drain_structure_events().is_empty());
}

#[test]
fn test_restore_with_another_seed_keeps_custom_noise() {
    let source = World::new(WorldConfig {
        seed: 7,
        ..flat_config(1)
    });
    let snapshot = source.snapshot();

    let mut world = World::with_noise(WorldConfig::default(), Box::new(ConstantNoise(1.0)));
    world.restore(&snapshot).expect("restore");

    assert_eq!(world.config().seed, 7);
    assert_eq!(world.terrain().seed(), 7);
    for (x, z) in [(0, 0), (37, -12), (-250, 91)] {
        assert_eq!(world.terrain().height(x, z), 48, "column ({x}, {z})");
    }
}
