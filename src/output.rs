use std::fmt::Write;

use crate::state::{CustomerStatus, SimulationResult};

pub trait Formatter {
    fn write(&self, result: &SimulationResult) -> String;
}

pub struct HumanFormatter;
pub struct SummaryFormatter;
pub struct JsonFormatter;

impl Formatter for SummaryFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        write_metadata(&mut out, result);
        write_summary(&mut out, result);
        out
    }
}

impl Formatter for HumanFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        let mut out = String::new();
        write_metadata(&mut out, result);
        let _ = writeln!(out, "Customers:");
        for customer in &result.customers {
            match customer.status {
                Some(CustomerStatus::Served) => {
                    let _ = writeln!(
                        out,
                        "Customer {}: arrived {:.2}, served (wait: {:.2}, system: {:.2})",
                        customer.id,
                        customer.arrived_at,
                        customer.wait().unwrap_or(0.0),
                        customer.system_time().unwrap_or(0.0),
                    );
                }
                Some(CustomerStatus::Abandoned) => {
                    let _ = writeln!(
                        out,
                        "Customer {}: arrived {:.2}, abandoned at {:.2}",
                        customer.id,
                        customer.arrived_at,
                        customer.abandoned_at.unwrap_or(customer.arrived_at),
                    );
                }
                None => {
                    let _ = writeln!(
                        out,
                        "Customer {}: arrived {:.2}, still in system at horizon",
                        customer.id, customer.arrived_at,
                    );
                }
            }
        }
        write_summary(&mut out, result);
        out
    }
}

impl Formatter for JsonFormatter {
    fn write(&self, result: &SimulationResult) -> String {
        serde_json::to_string_pretty(result)
            .map(|json| json + "\n")
            .unwrap_or_default()
    }
}

fn write_metadata(out: &mut String, result: &SimulationResult) {
    let _ = writeln!(out, "Metadata:");
    let _ = writeln!(out, "servers: {}", result.metadata.servers);
    let _ = writeln!(out, "horizon: {}", result.metadata.horizon);
    match result.metadata.seed {
        Some(seed) => {
            let _ = writeln!(out, "seed: {}", seed);
        }
        None => {
            let _ = writeln!(out, "seed: none");
        }
    }
}

fn write_summary(out: &mut String, result: &SimulationResult) {
    let summary = &result.summary;
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "arrivals: {}", summary.total_arrivals);
    let _ = writeln!(out, "served: {}", summary.served);
    let _ = writeln!(out, "abandoned: {}", summary.abandoned);
    let _ = writeln!(
        out,
        "abandonment rate: {:.2}%",
        summary.abandonment_rate * 100.0
    );
    match summary.mean_wait {
        Some(mean) => {
            let _ = writeln!(out, "mean wait: {:.2}", mean);
        }
        None => {
            let _ = writeln!(out, "mean wait: no data");
        }
    }
    match summary.mean_system_time {
        Some(mean) => {
            let _ = writeln!(out, "mean system time: {:.2}", mean);
        }
        None => {
            let _ = writeln!(out, "mean system time: no data");
        }
    }
    let _ = writeln!(out, "failures: {}", summary.failures);
}
