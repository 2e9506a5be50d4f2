//! Integration tests for one-shot structure placement.

use blockworld::{
    BlockType, ChunkCoord, NoiseSource, StructureBounds, StructureEvent, StructureListener,
    StructurePlanner, TerrainGenerator, VoxelStore, World, WorldConfig,
};
use cgmath::Point3;

struct ConstantNoise(f64);

impl NoiseSource for ConstantNoise {
    fn noise_2d(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }

    fn noise_3d(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0
    }
}

#[derive(Default)]
struct CountingListener {
    villages: Vec<Point3<i32>>,
    portals: Vec<Point3<i32>>,
    sick_villagers: u32,
}

impl StructureListener for CountingListener {
    fn on_village(&mut self, anchor: Point3<i32>) {
        self.villages.push(anchor);
    }

    fn on_portal(&mut self, anchor: Point3<i32>) {
        self.portals.push(anchor);
    }

    fn on_sick_village(&mut self, _anchor: Point3<i32>, villagers: u32) {
        self.sick_villagers += villagers;
    }
}

fn terrain(value: f64) -> TerrainGenerator {
    TerrainGenerator::with_noise(&WorldConfig::default(), Box::new(ConstantNoise(value)))
}

fn count(store: &VoxelStore, block: BlockType) -> usize {
    store.entries().filter(|(_, b)| *b == block).count()
}

#[test]
fn test_village_decision_is_true_once_per_region() {
    let terrain = terrain(0.9);
    let mut planner = StructurePlanner::new(16);

    assert!(planner.should_generate_village(&terrain, ChunkCoord::new(3, 5)));
    assert!(planner.is_village_region_generated(ChunkCoord::new(0, 0)));

    for x in 0..8 {
        for z in 0..8 {
            assert!(!planner.should_generate_village(&terrain, ChunkCoord::new(x, z)));
        }
    }

    // Neighbouring regions are independent.
    assert!(planner.should_generate_village(&terrain, ChunkCoord::new(8, 0)));
    assert!(planner.should_generate_village(&terrain, ChunkCoord::new(-1, 0)));
    assert!(!planner.should_generate_village(&terrain, ChunkCoord::new(-8, 7)));
}

#[test]
fn test_portal_regions_are_sixteen_chunks_wide() {
    let terrain = terrain(0.9);
    let mut planner = StructurePlanner::new(16);

    assert!(planner.should_generate_portal(&terrain, ChunkCoord::new(0, 0)));
    assert!(!planner.should_generate_portal(&terrain, ChunkCoord::new(15, 15)));
    assert!(planner.should_generate_portal(&terrain, ChunkCoord::new(16, 15)));
}

#[test]
fn test_thresholds_gate_decisions() {
    // 0.6 passes the village threshold but not the portal one.
    let terrain = terrain(0.6);
    let mut planner = StructurePlanner::new(16);
    assert!(planner.should_generate_village(&terrain, ChunkCoord::new(0, 0)));
    assert!(!planner.should_generate_portal(&terrain, ChunkCoord::new(0, 0)));
    assert!(!planner.is_portal_region_generated(ChunkCoord::new(0, 0)));

    let mut planner = StructurePlanner::new(16);
    for value in [0.5, 0.0, f64::NAN] {
        let terrain = self::terrain(value);
        assert!(!planner.should_generate_village(&terrain, ChunkCoord::new(0, 0)));
        assert!(!planner.should_generate_portal(&terrain, ChunkCoord::new(0, 0)));
    }
    assert!(!planner.is_village_region_generated(ChunkCoord::new(0, 0)));
}

#[test]
fn test_portal_frame_layout() {
    // Flat terrain at height 32, so the portal base sits at y = 33.
    let terrain = terrain(0.0);
    let planner = StructurePlanner::new(16);
    let mut store = VoxelStore::new(16);

    let event = planner.place_portal(&mut store, &terrain, 8, 8);
    assert_eq!(event.anchor(), Point3::new(8, 34, 8));

    assert_eq!(count(&store, BlockType::PORTAL), 27);
    assert_eq!(count(&store, BlockType::OBSIDIAN), 25 + 16 * 4 + 16);

    for y in 34..=36 {
        assert_eq!(store.get(8, y, 8), BlockType::PORTAL);
        assert_eq!(store.get(6, y, 8), BlockType::OBSIDIAN);
        assert_eq!(store.get(10, y, 10), BlockType::OBSIDIAN);
    }
    assert_eq!(store.get(8, 33, 8), BlockType::OBSIDIAN);
    assert_eq!(store.get(10, 38, 8), BlockType::OBSIDIAN);
    assert_eq!(store.get(8, 38, 8), BlockType::AIR);
    assert_eq!(store.get(8, 37, 8), BlockType::AIR);
}

#[test]
fn test_portal_clears_its_footprint() {
    let terrain = terrain(0.0);
    let planner = StructurePlanner::new(16);
    let mut store = VoxelStore::new(16);
    store.set(3, 35, 3, BlockType::STONE);
    store.set(13, 39, 13, BlockType::STONE);
    store.set(14, 35, 14, BlockType::STONE);

    let event = planner.place_portal(&mut store, &terrain, 8, 8);

    assert_eq!(store.get(3, 35, 3), BlockType::AIR);
    assert_eq!(store.get(13, 39, 13), BlockType::AIR);
    assert_eq!(store.get(14, 35, 14), BlockType::STONE);
    assert!(event.bounds().contains(Point3::new(3, 35, 3)));
    assert!(!event.bounds().contains(Point3::new(14, 35, 14)));
}

#[test]
fn test_village_layout() {
    let terrain = terrain(0.0);
    let planner = StructurePlanner::new(16);
    let mut store = VoxelStore::new(16);
    store.set(0, 36, 20, BlockType::LEAVES);

    let event = planner.place_village(&mut store, &terrain, 8, 8);
    assert!(matches!(event, StructureEvent::Village { .. }));
    assert_eq!(event.anchor(), Point3::new(8, 33, 8));

    // Ground flattened to grass across the whole footprint.
    assert_eq!(store.get(-7, 32, -7), BlockType::GRASS);
    assert_eq!(store.get(23, 32, 23), BlockType::GRASS);
    assert_eq!(store.get(24, 32, 23), BlockType::AIR);
    // Old vegetation above the ground is gone.
    assert_eq!(store.get(0, 36, 20), BlockType::AIR);

    // North-west house: floor, walls, door opening, hollow inside, overhanging roof.
    assert_eq!(store.get(2, 32, 2), BlockType::WOOD);
    assert_eq!(store.get(0, 33, 0), BlockType::WOOD);
    assert_eq!(store.get(3, 33, 0), BlockType::WOOD);
    assert_eq!(store.get(3, 34, 0), BlockType::AIR);
    assert_eq!(store.get(3, 35, 0), BlockType::WOOD);
    assert_eq!(store.get(2, 34, 2), BlockType::AIR);
    assert_eq!(store.get(-1, 37, -1), BlockType::WOOD);
    assert_eq!(store.get(6, 37, 6), BlockType::WOOD);
    assert_eq!(store.get(-1, 36, -1), BlockType::AIR);

    // The central shop is one voxel taller.
    assert_eq!(store.get(5, 37, 5), BlockType::WOOD);
    assert_eq!(store.get(4, 38, 4), BlockType::WOOD);
}

#[test]
fn test_sick_village_is_reproducible() {
    let terrain = terrain(0.0);
    let planner = StructurePlanner::new(16);
    let mut a = VoxelStore::new(16);
    let mut b = VoxelStore::new(16);

    let event = planner.place_sick_village(&mut a, &terrain, -40, 70);
    planner.place_sick_village(&mut b, &terrain, -40, 70);

    let mut left: Vec<_> = a.entries().map(|(p, block)| ((p.x, p.y, p.z), block)).collect();
    let mut right: Vec<_> = b.entries().map(|(p, block)| ((p.x, p.y, p.z), block)).collect();
    left.sort();
    right.sort();
    assert_eq!(left, right);

    match event {
        StructureEvent::SickVillage {
            anchor, villagers, ..
        } => {
            assert_eq!(anchor, Point3::new(-40, 33, 70));
            assert_eq!(villagers, 5);
        }
        other => panic!("unexpected event {other:?}"),
    }

    // Only obsidian is placed, scattered on the ground and in the ruined huts.
    assert!(a.entries().all(|(_, block)| block == BlockType::OBSIDIAN));
    assert!(a.entries().any(|(p, _)| p.y == 32));
    assert!(a.entries().any(|(p, _)| p.y > 32));
    assert!(a.entries().all(|(p, _)| (32..=35).contains(&p.y)));
}

#[test]
fn test_world_registers_each_portal_once() {
    let config = WorldConfig::default();
    let mut world = World::with_noise(config, Box::new(ConstantNoise(0.9)));

    assert!(world.generate_chunk(ChunkCoord::new(0, 0)));
    assert!(!world.generate_chunk(ChunkCoord::new(0, 0)));
    assert!(world.generate_chunk(ChunkCoord::new(1, 0)));
    assert!(world.generate_chunk(ChunkCoord::new(15, 15)));

    let mut listener = CountingListener::default();
    assert_eq!(world.dispatch_structure_events(&mut listener), 3);

    // One portal for portal region (0, 0); villages for village regions (0, 0) and (1, 1).
    assert_eq!(listener.portals, vec![Point3::new(8, 48, 8)]);
    assert_eq!(listener.villages.len(), 2);
    assert_eq!(listener.villages[0], Point3::new(8, 47, 8));

    // The queue is drained.
    assert_eq!(world.dispatch_structure_events(&mut listener), 0);
    assert_eq!(world.get_block(8, 48, 8), BlockType::PORTAL);
}

#[test]
fn test_world_sick_village_event_is_queued() {
    let mut world = World::with_noise(WorldConfig::default(), Box::new(ConstantNoise(0.0)));
    world.place_sick_village(100, 100);

    let mut listener = CountingListener::default();
    world.dispatch_structure_events(&mut listener);
    assert_eq!(listener.sick_villagers, 5);
    assert!(listener.villages.is_empty());
}

#[test]
fn test_bounds_overlap() {
    let a = StructureBounds {
        min: Point3::new(0, 0, 0),
        max: Point3::new(10, 5, 10),
    };
    let b = StructureBounds {
        min: Point3::new(10, 5, 10),
        max: Point3::new(20, 9, 20),
    };
    let c = StructureBounds {
        min: Point3::new(11, 0, 0),
        max: Point3::new(20, 5, 10),
    };

    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert!(!a.intersects(&c));
    assert!(a.contains(Point3::new(10, 5, 10)));
    assert!(!a.contains(Point3::new(10, 6, 10)));
}
