//! CSV projections of a run, plus a JSON statistics summary, for tools outside the simulator.

use std::io;

use serde::Serialize;

use crate::{
    core::{Engine, Ticks},
    error::ExportError,
    scheduler::Scheduler,
    stats::Stats,
};

#[derive(Serialize)]
struct TraceRow<'a> {
    time: Ticks,
    event: &'static str,
    pid: &'a str,
}

#[derive(Serialize)]
struct BlockRow<'a> {
    pid: &'a str,
    start: Ticks,
    end: Ticks,
}

/// `time,event,pid`, one row per trace event in emission order. Idle rows have an empty pid.
pub fn write_trace<S: Scheduler, W: io::Write>(
    engine: &Engine<S>,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if engine.trace().is_empty() {
        wtr.write_record(["time", "event", "pid"])?;
    }
    for event in engine.trace() {
        wtr.serialize(TraceRow {
            time: event.tick,
            event: event.kind.as_str(),
            pid: engine.pid_label(event.pid),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// `pid,start,end` for every closed block, idle blocks labelled `idle`.
pub fn write_blocks<S: Scheduler, W: io::Write>(
    engine: &Engine<S>,
    writer: W,
) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    if engine.blocks().is_empty() {
        wtr.write_record(["pid", "start", "end"])?;
    }
    for block in engine.blocks() {
        wtr.serialize(BlockRow {
            pid: engine.label(block.owner),
            start: block.start,
            end: block.end,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn trace_csv<S: Scheduler>(engine: &Engine<S>) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_trace(engine, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn blocks_csv<S: Scheduler>(engine: &Engine<S>) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_blocks(engine, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

pub fn stats_json(stats: &Stats) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(stats)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ProcessSpec;

    fn finished(specs: &[ProcessSpec], quantum: i64) -> Engine {
        let mut engine: Engine = Engine::new(specs, quantum).unwrap();
        while !engine.is_completed() {
            engine.tick();
        }
        engine
    }

    #[test]
    fn trace_rows_in_emission_order() {
        let engine = finished(&[ProcessSpec::new("P1", 1, 2)], 1);
        let csv = trace_csv(&engine).unwrap();

        assert_eq!(
            csv,
            "time,event,pid\n\
             0,idle,\n\
             1,arrived,P1\n\
             1,started,P1\n\
             2,preempted,P1\n\
             2,started,P1\n\
             3,finished,P1\n"
        );
    }

    #[test]
    fn block_rows_label_idle() {
        let engine = finished(&[ProcessSpec::new("P1", 2, 3)], 3);
        assert_eq!(
            blocks_csv(&engine).unwrap(),
            "pid,start,end\nidle,0,2\nP1,2,5\n"
        );
    }

    #[test]
    fn stats_summary_as_json() {
        let engine = finished(&[ProcessSpec::new("P1", 2, 3)], 3);
        let text = stats_json(&engine.stats()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(json["completed"], 1);
        assert_eq!(json["idle_ticks"], 2);
        assert_eq!(json["average_turnaround_time"], 3.0);
        assert_eq!(json["cpu_utilization"], 0.6);
        assert_eq!(json.as_object().unwrap().len(), 7);
    }

    #[test]
    fn header_only_before_first_tick() {
        let engine: Engine = Engine::new(&[ProcessSpec::new("P1", 0, 1)], 1).unwrap();
        assert_eq!(trace_csv(&engine).unwrap(), "time,event,pid\n");
        assert_eq!(blocks_csv(&engine).unwrap(), "pid,start,end\n");
    }
}
