//! Standings export.

use std::io::Write;

use rw_core::format_secs;

use crate::error::RaceResult;
use crate::sim::RaceSim;

/// Write the current standings as CSV, one row per racer in standings order.
///
/// Columns: `place`, `name`, `mode`, `time`, `distance_left`.  The `time`
/// column is `m:ss.mmm` for finished racers and empty for racers still on
/// course; `distance_left` is the estimated distance to the finish in map
/// units (zero once finished).
pub fn write_standings_csv<W: Write>(sim: &RaceSim, out: W) -> RaceResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["place", "name", "mode", "time", "distance_left"])?;

    for (i, id) in sim.standings().into_iter().enumerate() {
        let racer = sim.racer(id);
        let time = match racer.finish_record() {
            Some(f) => format_secs(f.secs),
            None => String::new(),
        };
        wtr.write_record(&[
            (i + 1).to_string(),
            racer.name.clone(),
            racer.mode.to_string(),
            time,
            format!("{:.3}", racer.distance_to_finish()),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
