//! Plain-text summaries of engine results.

use std::fmt;

use meshplan_core::{Design, Matrix, Placement};

/// Summary of a placement: baseline cost, center, concentrators and the terminals on each, and
/// the final cost.
#[derive(Debug, Clone, Copy)]
pub struct AddReport<'a> {
    placement: &'a Placement,
    labels: Option<&'a [String]>,
}

impl<'a> AddReport<'a> {
    /// Creates a report with sites shown by index.
    pub fn new(placement: &'a Placement) -> Self {
        Self {
            placement,
            labels: None,
        }
    }

    /// Shows site `i` as `labels[i]`.
    pub fn with_labels(self, labels: &'a [String]) -> Self {
        Self {
            labels: Some(labels),
            ..self
        }
    }
}

impl fmt::Display for AddReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.placement;
        let per_site = p.terminals_per_site();
        writeln!(f, "Original cost: {}", p.baseline_cost)?;
        writeln!(f, "Central site: {}", label(self.labels, p.center.inner()))?;
        writeln!(f, "Concentrators: {}", per_site.len())?;
        writeln!(f, "{:>6}{:>11}", "Site", "Terminals")?;
        for (site, count) in per_site {
            writeln!(f, "{:>6}{:>11}", label(self.labels, site.inner()), count)?;
        }
        write!(f, "Total cost: {}", p.total_cost)
    }
}

/// The mesh of a design as a `From To Ch Cost` table, with the total at the bottom.
#[derive(Debug, Clone, Copy)]
pub struct MentorReport<'a> {
    design: &'a Design,
    cost: &'a Matrix,
    labels: Option<&'a [String]>,
}

impl<'a> MentorReport<'a> {
    /// Creates a report with nodes shown by index. Link costs are read from `cost`.
    pub fn new(design: &'a Design, cost: &'a Matrix) -> Self {
        Self {
            design,
            cost,
            labels: None,
        }
    }

    /// Shows node `i` as `labels[i]`.
    pub fn with_labels(self, labels: &'a [String]) -> Self {
        Self {
            labels: Some(labels),
            ..self
        }
    }
}

const RULE: &str = "====================";

impl fmt::Display for MentorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>4}{:>4}{:>4}{:>8}", "From", "To", "Ch", "Cost")?;
        writeln!(f, "{RULE}")?;
        for (a, b, ch) in self.design.links() {
            let cost = self.cost[[a.inner(), b.inner()]] * f64::from(ch);
            writeln!(
                f,
                "{:>4}{:>4}{:>4}{:>8.0}",
                label(self.labels, a.inner()),
                label(self.labels, b.inner()),
                ch,
                cost
            )?;
        }
        writeln!(f, "{RULE}")?;
        write!(
            f,
            "{:>12}{:>8.0}",
            "Total cost",
            self.design.link_cost(self.cost)
        )
    }
}

fn label(labels: Option<&[String]>, i: usize) -> String {
    labels
        .and_then(|l| l.get(i))
        .cloned()
        .unwrap_or_else(|| i.to_string())
}
