use rand::prelude::*;

use super::process::ProcessSpec;

/// Reproducible workload: on each of `ticks` ticks a process arrives with
/// probability `p_arrival`, and is short with probability `p_short`.
pub fn bernoulli_processes(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            processes.push(ProcessSpec::new(
                format!("P{}", processes.len() + 1),
                t as i64,
                burst as i64,
            ));
        }
    }

    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_workload() {
        let a = bernoulli_processes(200, 0.3, 0.3, 2, 6, 7);
        let b = bernoulli_processes(200, 0.3, 0.3, 2, 6, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn arrivals_are_ordered_and_bursts_bounded() {
        let processes = bernoulli_processes(100, 0.5, 0.5, 1, 4, 42);
        assert!(processes.windows(2).all(|w| w[0].arrival < w[1].arrival));
        assert!(processes.iter().all(|p| p.burst == 1 || p.burst == 4));
        assert!(processes.iter().all(|p| (0..100).contains(&p.arrival)));
    }

    #[test]
    fn certain_arrival_fills_every_tick() {
        let processes = bernoulli_processes(10, 1.0, 0.0, 1, 3, 0);
        assert_eq!(processes.len(), 10);
        assert_eq!(processes[9].id, "P10");
        assert!(processes.iter().all(|p| p.burst == 3));
    }
}
