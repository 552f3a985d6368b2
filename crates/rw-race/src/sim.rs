//! The `RaceSim` struct and its tick loop.

use rw_core::{MoverId, MoverProfile, PointId, TickClock};
use rw_map::{Map, Transition};
use rw_nav::find_path;

use crate::cache::BestPathCache;
use crate::error::{RaceError, RaceResult};
use crate::racer::{FinishRecord, Racer};
use crate::RaceObserver;

// ── RaceConfig ────────────────────────────────────────────────────────────────

/// Tunables for one race.
#[derive(Clone, Debug)]
pub struct RaceConfig {
    /// Simulation rate.  60 is the stock rate; anything positive works.
    pub ticks_per_second: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Safety cap for [`RaceSim::run_until_finished`]: stop after this many
    /// ticks even if racers are still on course.
    pub max_ticks: u64,

    /// Per-tick probability that a racer swaps to a random movement mode.
    /// Set to zero for fully deterministic pacing.
    pub mode_switch_chance: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            ticks_per_second:   60,
            seed:               0,
            max_ticks:          1_000_000,
            mode_switch_chance: 1e-4,
        }
    }
}

// ── Gap queries ───────────────────────────────────────────────────────────────

/// The gap between two adjacent racers in the standings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceGap {
    /// The racer on the other side of the gap.
    pub other: MoverId,
    /// Distance between the two progress estimates, in map units.
    pub distance: f32,
    /// The distance priced at the trailing racer's current speed.  Infinite
    /// while the trailing racer stands still.
    pub secs: f32,
}

// ── RaceSim ───────────────────────────────────────────────────────────────────

/// A complete race: the course, the roster, and the tick loop.
///
/// Set up with [`new`](Self::new), register racers with
/// [`add_racer`](Self::add_racer), route everyone with
/// [`start`](Self::start), then drive ticks — either one at a time with
/// [`tick`](Self::tick) (e.g. under a `FrameDriver`) or to completion with
/// [`run_until_finished`](Self::run_until_finished).
///
/// The sim owns its map.  Edit it between races only, and
/// [clear][BestPathCache::clear] the ranking cache afterwards.
#[derive(Debug)]
pub struct RaceSim {
    /// Tunables the race was created with.
    pub config: RaceConfig,

    /// Race clock — `current` counts completed ticks.
    pub clock: TickClock,

    /// The course.
    pub map: Map,

    /// Memoized mover-agnostic best paths to the finish, shared by every
    /// racer's progress estimate.
    pub cache: BestPathCache,

    /// The roster, indexed by `MoverId`.
    pub racers: Vec<Racer>,

    start:          PointId,
    finish:         PointId,
    finished_count: u32,
    scratch:        Vec<Transition>,
}

impl RaceSim {
    // ── Setup ─────────────────────────────────────────────────────────────

    /// Create a race over `map` from `start` to `finish`.
    ///
    /// Both points must lie on the navigation network (belong to at least
    /// one line feature).
    pub fn new(map: Map, start: PointId, finish: PointId, config: RaceConfig) -> RaceResult<Self> {
        for p in [start, finish] {
            if !map.get_point(p).is_some_and(|pt| pt.has_line_feature()) {
                return Err(RaceError::NotOnNetwork(p));
            }
        }
        let clock = TickClock::new(config.ticks_per_second);
        Ok(Self {
            config,
            clock,
            cache: BestPathCache::new(finish),
            map,
            racers: Vec::new(),
            start,
            finish,
            finished_count: 0,
            scratch: Vec::new(),
        })
    }

    /// Register a racer at the start point.  Returns its roster ID.
    pub fn add_racer(&mut self, name: &str, profile: MoverProfile) -> MoverId {
        let id = MoverId(self.racers.len() as u32);
        self.racers
            .push(Racer::new(name, profile, self.start, self.config.seed, id));
        id
    }

    /// Route every racer from the start to the finish and prime the progress
    /// estimates.  Call once, after the roster is complete.
    ///
    /// Routes are mover-specific: each racer's own profile prices (and may
    /// forbid) surfaces, so rosters can take different courses.
    pub fn start(&mut self) -> RaceResult<()> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let map = &self.map;
        let cache = &mut self.cache;
        let finish = self.finish;

        for racer in &mut self.racers {
            let from = racer.motion.at();
            let route = find_path(map, &racer.profile, from, finish)
                .ok_or_else(|| RaceError::NoRouteToFinish(racer.name.clone()))?;
            racer.launch(map, cache, route);
        }
        log::info!(
            "race start: {} racers from {} to {}",
            self.racers.len(),
            self.start,
            self.finish,
        );
        Ok(())
    }

    #[inline]
    pub fn start_point(&self) -> PointId {
        self.start
    }

    #[inline]
    pub fn finish_point(&self) -> PointId {
        self.finish
    }

    // ── The tick loop ─────────────────────────────────────────────────────

    /// Advance the race by one tick.  Returns how many racers finished on it.
    ///
    /// Racers finishing within the same tick are ranked by their fractional
    /// crossing times, not by roster order.
    pub fn tick<O: RaceObserver>(&mut self, observer: &mut O) -> usize {
        self.clock.advance();
        let now = self.clock.current;
        let dt = self.clock.tick_delta_secs();

        // Explicit field borrows so the borrow checker sees disjoint access.
        let map = &self.map;
        let cache = &mut self.cache;
        let scratch = &mut self.scratch;
        let chance = self.config.mode_switch_chance;

        let mut arrivals: Vec<(usize, f32)> = Vec::new();
        for (i, racer) in self.racers.iter_mut().enumerate() {
            scratch.clear();
            if let Some(arrival) = racer.tick(map, cache, dt, chance, scratch) {
                arrivals.push((i, arrival.leftover));
            }
        }

        // A larger unused fraction means an earlier crossing.
        arrivals.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let finishers = arrivals.len();
        for (i, leftover) in arrivals {
            self.finished_count += 1;
            let rank = self.finished_count;
            let tick = now.0 as f64 - leftover as f64;
            let secs = self.clock.secs_for_ticks(tick);
            self.racers[i].finish = Some(FinishRecord { tick, secs, rank });
            log::debug!("{} takes place {rank} at {secs:.3}s", self.racers[i].name);
            observer.on_finish(now, &self.racers[i], rank);
        }

        observer.on_tick_end(now, &self.racers);
        finishers
    }

    /// Drive ticks until every racer has finished or `config.max_ticks`
    /// elapse, then report the final standings.
    pub fn run_until_finished<O: RaceObserver>(&mut self, observer: &mut O) {
        while !self.is_over() && self.clock.current.0 < self.config.max_ticks {
            self.tick(observer);
        }
        observer.on_race_end(self.clock.current, &self.standings());
    }

    /// `true` once every racer holds a finish record.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.finished_count as usize == self.racers.len()
    }

    // ── Standings ─────────────────────────────────────────────────────────

    /// # Panics
    /// Panics if `id` is not a roster ID from [`add_racer`](Self::add_racer).
    #[inline]
    pub fn racer(&self, id: MoverId) -> &Racer {
        &self.racers[id.index()]
    }

    /// Current standings: finished racers first in crossing order, then
    /// everyone else by ascending estimated distance to the finish.
    pub fn standings(&self) -> Vec<MoverId> {
        let mut order: Vec<MoverId> = (0..self.racers.len()).map(|i| MoverId(i as u32)).collect();
        order.sort_by(|&a, &b| {
            let ra = &self.racers[a.index()];
            let rb = &self.racers[b.index()];
            match (ra.finish_record(), rb.finish_record()) {
                (Some(fa), Some(fb)) => fa.rank.cmp(&fb.rank),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => ra
                    .distance_to_finish()
                    .total_cmp(&rb.distance_to_finish())
                    .then_with(|| a.cmp(&b)),
            }
        });
        order
    }

    /// Gap from `racer` to the racer directly ahead in the standings.
    /// `None` for the leader.
    pub fn gap_ahead(&self, racer: MoverId) -> Option<RaceGap> {
        let order = self.standings();
        let pos = order.iter().position(|&id| id == racer)?;
        if pos == 0 {
            return None;
        }
        let other = order[pos - 1];
        Some(self.gap_between(racer, other, racer))
    }

    /// Gap from `racer` to the racer directly behind in the standings.
    /// `None` for the last racer.
    pub fn gap_behind(&self, racer: MoverId) -> Option<RaceGap> {
        let order = self.standings();
        let pos = order.iter().position(|&id| id == racer)?;
        let other = *order.get(pos + 1)?;
        Some(self.gap_between(racer, other, other))
    }

    fn gap_between(&self, a: MoverId, b: MoverId, trailing: MoverId) -> RaceGap {
        let da = self.racers[a.index()].distance_to_finish();
        let db = self.racers[b.index()].distance_to_finish();
        let distance = (da - db).abs();
        let speed = self.racers[trailing.index()].current_speed;
        let secs = if speed > 0.0 { distance / speed } else { f32::INFINITY };
        RaceGap { other: b, distance, secs }
    }
}
