//! Session reports.

use ghoststack::core::{PlanSummary, RejectedBox};
use ghoststack::pallet::Pallet;
use ghoststack::{PlacementPlan, PlanWarning, PlanningSession, StabilityReport};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

/// Snapshot of a planning session for display or export.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub pallet: Pallet,
    pub summary: PlanSummary,
    pub stability: StabilityReport,
    pub warnings: Vec<PlanWarning>,
    pub rejected: Vec<RejectedBox>,
    pub plan: PlacementPlan,
}

impl SessionReport {
    /// Captures the current state of `session`.
    pub fn from_session(session: &PlanningSession) -> Self {
        Self {
            pallet: *session.pallet(),
            summary: session.summary(),
            stability: session.stability(),
            warnings: session.warnings().to_vec(),
            rejected: session.rejected(),
            plan: session.plan().clone(),
        }
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        let s = &self.summary;
        println!("Pallet: {} x {}", self.pallet.width, self.pallet.depth);
        println!("{:-<60}", "");
        println!(
            "  boxes={} planned={} placed={} rejected={}",
            s.total_boxes, s.planned, s.placed, s.rejected
        );
        println!(
            "  layers={} height={:.2} base_util={:.1}% time={}ms",
            s.layers, s.stack_height, s.base_utilization_percent, s.time_ms
        );

        let st = &self.stability;
        if st.confirmed > 0 {
            println!("\nStability ({} confirmed):", st.confirmed);
            println!("  lean={:.2}° com_drift={:+.3}", st.lean_degrees(), st.com_drift);
            if st.leaning {
                println!("  WARNING: stack is leaning");
            }
            for o in &st.overloads {
                println!(
                    "  WARNING: box {} carries {:.1} (max {:.1})",
                    o.box_index, o.load, o.max_load
                );
            }
        }

        if !self.warnings.is_empty() {
            println!("\nWarnings:");
            for w in &self.warnings {
                println!("  - {}", w);
            }
        }

        if !self.rejected.is_empty() {
            println!("\nRejected:");
            for r in &self.rejected {
                println!("  - box {}: {}", r.box_index, r.reason);
            }
        }
    }

    /// Writes the report as pretty-printed JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> io::Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}
