//! minirace — end-to-end demo for the raceway framework.
//!
//! Builds a small forked course, round-trips it through JSON, then races a
//! 204-strong field over it under an accumulator-paced frame loop with
//! deliberately jittery frame times.  Run with `RUST_LOG=debug` to watch
//! the race log.

mod network;

use std::fs::File;
use std::time::Instant;

use anyhow::Result;

use rw_core::{FrameDriver, MoverProfile, SimRng, SurfaceCatalog, Tick, Vec2, format_secs};
use rw_map::{Map, MapSnapshot};
use rw_race::{RaceConfig, RaceObserver, RaceSim, Racer, write_standings_csv};

use network::build_course;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64   = 42;
const FIELD_SIZE:       usize = 200;
const TICKS_PER_SECOND: u32   = 60;

// ── Progress reporting ────────────────────────────────────────────────────────

struct ProgressPrinter {
    ticks_per_second: u32,
}

impl RaceObserver for ProgressPrinter {
    fn on_tick_end(&mut self, tick: Tick, racers: &[Racer]) {
        // One status line every 30 simulated seconds.
        if tick.0 % (30 * self.ticks_per_second as u64) != 0 {
            return;
        }
        let finished = racers.iter().filter(|r| r.finish_record().is_some()).count();
        let leader = racers
            .iter()
            .filter(|r| r.finish_record().is_none())
            .min_by(|a, b| a.distance_to_finish().total_cmp(&b.distance_to_finish()));
        if let Some(l) = leader {
            println!(
                "  t={} | {} finished | {} leads the rest with {:.1} units to go",
                format_secs(tick.0 as f64 / self.ticks_per_second as f64),
                finished,
                l.name,
                l.distance_to_finish(),
            );
        }
    }

    fn on_finish(&mut self, _tick: Tick, racer: &Racer, rank: u32) {
        if rank > 3 {
            return;
        }
        let Some(record) = racer.finish_record() else { return };
        println!("  place {rank}: {} in {}", racer.name, format_secs(record.secs));
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== minirace — raceway demo ===");
    println!("Field: {} racers  |  Seed: {SEED}", FIELD_SIZE + 4);
    println!();

    // 1. Build the course.
    let (map, [start, _junction, finish]) = build_course();
    println!("Course: {map}, start {start}, finish {finish}");

    // 2. Round-trip the course through its JSON snapshot and race on the
    //    reloaded copy, so the persistence path is exercised end to end.
    let snapshot = map.to_snapshot();
    let json = serde_json::to_string_pretty(&snapshot)?;
    std::fs::create_dir_all("output/minirace")?;
    std::fs::write("output/minirace/course.json", &json)?;
    let reloaded: MapSnapshot = serde_json::from_str(&json)?;
    let map = Map::from_snapshot(SurfaceCatalog::standard(), &reloaded)?;
    println!("Round-tripped through JSON ({} bytes): {map}", json.len());

    // The snapping query an editor front end would use.
    if let Some(p) = map.nearest_point_within(Vec2::new(41.0, 1.5), 5.0) {
        println!("A click at (41.0, 1.5) snaps to {p}");
    }
    println!();

    let water = map.catalog().by_name("water").unwrap();
    let sand = map.catalog().by_name("sand").unwrap();
    let trail = map.catalog().by_name("trail").unwrap();

    // 3. Set up the race.
    let config = RaceConfig {
        ticks_per_second: TICKS_PER_SECOND,
        seed:             SEED,
        ..RaceConfig::default()
    };
    let mut sim = RaceSim::new(map, start, finish, config)?;

    // Four stars with strong surface specialties, racing different lines.
    sim.add_racer("Marlin", MoverProfile::new(1.0).with_surface_modifier(water, 3.0));
    sim.add_racer("Sirocco", MoverProfile::new(1.0).with_surface_modifier(sand, 2.5));
    sim.add_racer("Bracken", MoverProfile::new(1.0).with_surface_modifier(trail, 2.2));
    sim.add_racer("Milestone", MoverProfile::new(1.25).with_surface_modifier(water, 0.0));

    // Plus a generated field; every third runner gets a random specialty.
    let mut rng = SimRng::new(SEED);
    for i in 0..FIELD_SIZE {
        let mut profile = MoverProfile::new(0.85 + rng.random::<f32>() * 0.4);
        if i % 3 == 0 {
            let surface = [water, sand, trail][rng.gen_range(0..3usize)];
            profile.set_surface_modifier(surface, 1.3 + rng.random::<f32>() * 0.7);
        }
        sim.add_racer(&format!("Runner {i:03}"), profile);
    }

    sim.start()?;

    // 4. Drive the race like a render loop: jittery ~60 Hz frames with a
    //    periodic stall.  The driver clamps the stall and would discard any
    //    deeper backlog instead of spiraling.
    let mut driver = FrameDriver::new(TICKS_PER_SECOND);
    let mut jitter = SimRng::new(SEED ^ 0xF0F0);
    let mut printer = ProgressPrinter { ticks_per_second: TICKS_PER_SECOND };

    let t0 = Instant::now();
    let mut frames: u64 = 0;
    'race: while !sim.is_over() && sim.clock.current.0 < sim.config.max_ticks {
        let real_dt = if frames % 240 == 239 {
            0.4
        } else {
            0.016 + jitter.random::<f32>() * 0.004
        };
        frames += 1;
        for _ in 0..driver.begin_frame(real_dt) {
            sim.tick(&mut printer);
            if sim.is_over() {
                break 'race;
            }
        }
    }
    let elapsed = t0.elapsed();

    println!();
    println!(
        "Race complete: {} sim ticks across {frames} frames in {:.3} s wall time",
        sim.clock.current.0,
        elapsed.as_secs_f64(),
    );
    println!(
        "Ranking cache held {} origins for {} racers",
        sim.cache.len(),
        sim.racers.len(),
    );
    println!();

    // 5. Final standings.
    let order = sim.standings();
    let winner_secs = sim.racer(order[0]).finish_record().map(|r| r.secs);
    println!("{:<6} {:<12} {:<8} {:<12} {:<12}", "Place", "Racer", "Gear", "Time", "Behind");
    println!("{}", "-".repeat(52));
    for (i, &id) in order.iter().take(10).enumerate() {
        let racer = sim.racer(id);
        let (time, behind) = match (racer.finish_record(), winner_secs) {
            (Some(record), Some(w)) => (
                format_secs(record.secs),
                if i == 0 {
                    "-".to_string()
                } else {
                    format!("+{}", format_secs(record.secs - w))
                },
            ),
            _ => (format!("{:.1} u left", racer.distance_to_finish()), String::new()),
        };
        println!(
            "{:<6} {:<12} {:<8} {:<12} {:<12}",
            i + 1,
            racer.name,
            racer.mode.as_str(),
            time,
            behind,
        );
    }
    if order.len() > 10 {
        println!("... and {} more", order.len() - 10);
    }

    // 6. Export the full table.
    write_standings_csv(&sim, File::create("output/minirace/standings.csv")?)?;
    println!();
    println!("Wrote output/minirace/course.json and output/minirace/standings.csv");

    Ok(())
}
