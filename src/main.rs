use std::io;

use rr_model::{SimConfig, core::BlockOwner, export, sim::Sim};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    let mut sim: Sim = Sim::from_config(&config)?;

    let mut current_idle = 0;
    let mut max_idle = 0;

    while !sim.all_processes_completed() {
        let events = sim.step().to_vec();
        for event in &events {
            println!(
                "t={} {} {}",
                event.tick,
                event.kind,
                sim.engine.pid_label(event.pid)
            );
        }

        if events.iter().any(|e| e.pid.is_none()) {
            current_idle += 1;
            max_idle = max_idle.max(current_idle);
        } else {
            current_idle = 0;
        }
    }

    let engine = &sim.engine;
    println!();
    for block in engine.blocks() {
        let label = match block.owner {
            BlockOwner::Idle => "IDLE",
            BlockOwner::Process(pid) => engine.registry().name(pid),
        };
        println!("{label:>6} [{}, {})", block.start, block.end);
    }

    let stats = engine.stats();
    println!();
    println!("Average waiting time: {:.2} ticks", stats.average_waiting_time);
    println!("Average turnaround time: {:.2} ticks", stats.average_turnaround_time);
    println!("Average response time: {:.2} ticks", stats.average_response_time);
    println!("Throughput: {:.2}/t", stats.throughput);
    println!("CPU utilization: {:.1}%", stats.cpu_utilization_percent());
    println!("Longest idle period: {max_idle} ticks");
    println!();
    println!("{}", export::stats_json(&stats)?);
    println!();

    export::write_trace(engine, io::stdout().lock())?;
    Ok(())
}
