//! Course definition for the minirace demo.
//!
//! A forked cross-country course: an asphalt approach splits at a junction
//! into three ways to the same finish — a swimmable river crossing, a sand
//! dune detour, and a forest trail — so racers with different surface
//! strengths genuinely race different lines.

use rw_core::{PointId, SurfaceCatalog, Vec2};
use rw_map::{Map, PointSpec};

/// Build the demo course.
///
/// Returns `(map, [start, junction, finish])`.
pub fn build_course() -> (Map, [PointId; 3]) {
    let mut map = Map::new(SurfaceCatalog::standard());
    let asphalt = map.catalog().by_name("asphalt").unwrap();
    let water = map.catalog().by_name("water").unwrap();
    let sand = map.catalog().by_name("sand").unwrap();
    let trail = map.catalog().by_name("trail").unwrap();

    // Shared approach: 40 units of road into the junction.
    let approach = map.add_line_feature(
        vec![
            PointSpec::New(Vec2::new(0.0, 0.0)),
            PointSpec::New(Vec2::new(20.0, 0.0)),
            PointSpec::New(Vec2::new(40.0, 0.0)),
        ],
        asphalt,
    );
    let approach_pts = map.line(approach).points().to_vec();
    let start = approach_pts[0];
    let junction = approach_pts[2];

    // River crossing: shortest line (40 units) but slow unless you swim well.
    let river = map.add_line_feature(
        vec![
            PointSpec::Existing(junction),
            PointSpec::New(Vec2::new(60.0, 0.0)),
            PointSpec::New(Vec2::new(80.0, 0.0)),
        ],
        water,
    );
    let finish = *map.line(river).points().last().unwrap();

    // Dune detour: ~56 units of sand north of the river.
    map.add_line_feature(
        vec![
            PointSpec::Existing(junction),
            PointSpec::New(Vec2::new(50.0, 15.0)),
            PointSpec::New(Vec2::new(70.0, 15.0)),
            PointSpec::Existing(finish),
        ],
        sand,
    );

    // Forest trail: ~65 units looping south.
    map.add_line_feature(
        vec![
            PointSpec::Existing(junction),
            PointSpec::New(Vec2::new(50.0, -20.0)),
            PointSpec::New(Vec2::new(70.0, -20.0)),
            PointSpec::Existing(finish),
        ],
        trail,
    );

    // Decoration: the spectator infield between river and dunes.
    map.add_area_feature(
        vec![
            PointSpec::New(Vec2::new(45.0, 5.0)),
            PointSpec::New(Vec2::new(65.0, 5.0)),
            PointSpec::New(Vec2::new(55.0, 12.0)),
        ],
        "infield",
    );

    map.add_marker(PointSpec::Existing(start), "flag", "start").unwrap();
    map.add_marker(PointSpec::Existing(finish), "flag", "finish").unwrap();

    (map, [start, junction, finish])
}
