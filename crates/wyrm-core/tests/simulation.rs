use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wyrm_core::{
    Chain, CreatureConfig, DrawCommand, FollowOrder, FollowProfile, InputEvent, Preset, Simulation,
};

const DT: f32 = 1.0 / 60.0;

fn sim(preset: Preset) -> Simulation {
    Simulation::new(preset.config(), Vec2::new(800.0, 600.0)).unwrap()
}

fn wander(sim: &mut Simulation, rng: &mut StdRng) {
    let size = sim.size();
    let at = Vec2::new(rng.random_range(-50.0..size.x + 50.0), rng.random_range(-50.0..size.y + 50.0));
    sim.handle_input(InputEvent::PointerMove(Some(at)));
}

#[test]
fn body_starts_coincident_at_pointer() {
    for preset in Preset::ALL {
        let sim = sim(preset);
        let start = sim.pointer().position();
        assert!(
            sim.chain().points().iter().all(|p| p.pos == start),
            "{preset} did not start stacked"
        );
    }
}

#[test]
fn body_length_never_changes() {
    let mut rng = StdRng::seed_from_u64(17);
    for preset in Preset::ALL {
        let mut sim = sim(preset);
        let expected = sim.config().segments;
        for frame in 0..500 {
            if frame % 7 == 0 {
                wander(&mut sim, &mut rng);
            }
            if frame % 50 == 0 {
                sim.resize(Vec2::new(400.0 + frame as f32, 300.0));
            }
            sim.step(DT, &mut rng);
            assert_eq!(sim.chain().len(), expected);
        }
    }
}

/// Checks that every follower moved onto the segment between its old
/// position and its target, strictly closer to the target.
fn assert_followers_close_in(before: &Chain, after: &Chain, order: FollowOrder) {
    for i in 1..after.len() {
        let old = before.points()[i].pos;
        let new = after.points()[i].pos;
        let target = match order {
            FollowOrder::HeadFirst => after.target(i),
            FollowOrder::TailFirst => before.target(i),
        };
        let gap = old.distance(target);
        if gap < 1e-3 {
            continue;
        }
        assert!(new.distance(target) < gap, "segment {i} did not close in");
        let detour = old.distance(new) + new.distance(target) - gap;
        assert!(detour.abs() < 1e-2, "segment {i} overshot by {detour}");
    }
}

#[test]
fn followers_always_close_in_on_their_target() {
    let mut rng = StdRng::seed_from_u64(23);
    let profiles = [
        (Preset::Frost.config().follow, FollowOrder::HeadFirst),
        (Preset::Glow.config().follow, FollowOrder::HeadFirst),
        (Preset::Cloud.config().follow, FollowOrder::TailFirst),
        (FollowProfile::Constant { alpha: 0.5 }, FollowOrder::TailFirst),
    ];
    for (profile, order) in profiles {
        let mut chain = Chain::new(30, Vec2::new(400.0, 300.0), 0.4, profile, order);
        for _ in 0..300 {
            let pointer = Vec2::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
            let before = chain.clone();
            chain.advance(pointer);
            assert_followers_close_in(&before, &chain, order);
        }
    }
}

#[test]
fn head_jump_lands_strictly_between() {
    let mut chain = Chain::new(
        34,
        Vec2::new(100.0, 100.0),
        0.9,
        Preset::Frost.config().follow,
        FollowOrder::HeadFirst,
    );
    chain.advance(Vec2::new(500.0, 500.0));
    let head = chain.head();
    assert!(head.x > 100.0 && head.x < 500.0, "{head}");
    assert!(head.y > 100.0 && head.y < 500.0, "{head}");
}

#[test]
fn head_jump_through_the_simulation() {
    let mut rng = StdRng::seed_from_u64(1);
    for preset in Preset::ALL {
        let mut sim = sim(preset);
        sim.handle_input(InputEvent::PointerMove(Some(Vec2::new(100.0, 100.0))));
        for _ in 0..120 {
            sim.step(DT, &mut rng);
        }
        let settled = sim.chain().head();
        sim.handle_input(InputEvent::PointerMove(Some(Vec2::new(500.0, 500.0))));
        sim.step(DT, &mut rng);
        let head = sim.chain().head();
        assert!(head.x > settled.x && head.x < 500.0, "{preset}: {settled} -> {head}");
        assert!(head.y > settled.y && head.y < 500.0, "{preset}: {settled} -> {head}");
    }
}

#[test]
fn holding_press_breathes_fire() {
    for seed in [0, 1, 2, 99, 12345] {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut sim = sim(Preset::Frost);
        sim.handle_input(InputEvent::PointerDown);
        let flames: usize = (0..100).map(|_| sim.step(DT, &mut rng).spawned.flame).sum();
        assert!(flames > 0, "seed {seed} produced no flame");
    }
}

#[test]
fn no_flame_without_press() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut sim = sim(Preset::Frost);
    for _ in 0..300 {
        wander(&mut sim, &mut rng);
        assert_eq!(sim.step(DT, &mut rng).spawned.flame, 0);
    }
}

#[test]
fn particle_population_respects_cap() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut sim = sim(Preset::Frost);
    sim.handle_input(InputEvent::TouchStart(Some(Vec2::new(10.0, 10.0))));
    // A tiny dt keeps particles alive long enough to hit the cap.
    for frame in 0..3000 {
        let x = if frame % 2 == 0 { 0.0 } else { 800.0 };
        sim.handle_input(InputEvent::TouchMove(Some(Vec2::new(x, 300.0))));
        let report = sim.step(0.0001, &mut rng);
        assert!(report.live_particles <= 700);
    }
    assert_eq!(sim.particles().unwrap().len(), 700);
}

#[test]
fn live_particles_never_outlast_their_lifetime() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut sim = sim(Preset::Frost);
    sim.handle_input(InputEvent::PointerDown);
    let mut expired = 0;
    for _ in 0..600 {
        wander(&mut sim, &mut rng);
        expired += sim.step(DT, &mut rng).expired;
        let now = sim.clock();
        for p in sim.particles().unwrap().particles() {
            assert!(p.age(now) < f64::from(p.lifetime));
            assert!(p.life_ratio(now) > 0.0);
        }
    }
    assert!(expired > 0);
}

#[test]
fn every_preset_renders_a_frame() {
    let mut rng = StdRng::seed_from_u64(77);
    for preset in Preset::ALL {
        let mut sim = sim(preset);
        sim.handle_input(InputEvent::PointerDown);
        for _ in 0..30 {
            wander(&mut sim, &mut rng);
            sim.step(DT, &mut rng);
        }
        let frame = sim.render();
        assert_eq!(frame.first(), Some(&DrawCommand::Clear));
        assert!(frame.len() > sim.config().segments, "{preset}");
    }
}

#[test]
fn instances_are_independent() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut a = sim(Preset::Glow);
    let b = sim(Preset::Glow);
    a.handle_input(InputEvent::PointerMove(Some(Vec2::new(10.0, 10.0))));
    a.step(DT, &mut rng);
    assert_ne!(a.chain().head(), b.chain().head());
    assert_eq!(b.frame(), 0);
}

#[test]
fn config_file_drives_a_simulation() {
    let path = std::env::temp_dir().join(format!("wyrm-sim-{}.toml", std::process::id()));
    let mut config = Preset::Cloud.config();
    config.segments = 12;
    std::fs::write(&path, toml::to_string(&config).unwrap()).unwrap();
    let loaded = CreatureConfig::load(&path);
    let _ = std::fs::remove_file(&path);
    let sim = Simulation::new(loaded.unwrap(), Vec2::new(640.0, 480.0)).unwrap();
    assert_eq!(sim.chain().len(), 12);
}

#[test]
fn clock_keeps_ticking_after_a_week_of_uptime() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut sim = sim(Preset::Frost);
    // well past 2^19 s, where f32 seconds stop resolving a 1/60 s frame
    sim.step(600_000.0, &mut rng);
    let before = sim.clock();
    sim.handle_input(InputEvent::PointerDown);

    let mut expired = 0;
    for _ in 0..600 {
        expired += sim.step(DT, &mut rng).expired;
        let now = sim.clock();
        for p in sim.particles().unwrap().particles() {
            assert!(p.age(now) < f64::from(p.lifetime));
        }
    }
    let elapsed = sim.clock() - before;
    assert!((elapsed - 10.0).abs() < 1e-3, "clock advanced {elapsed}s");
    assert!(expired > 0);
    assert!(sim.particles().unwrap().len() < 700);
}
