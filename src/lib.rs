pub mod plot_overlap;
pub mod venn;

pub mod io_utils {
    use crate::OverlapError;
    use std::path::{Path, PathBuf};

    /// Name of the figure written into the output directory.
    pub const OUTPUT_FILE_NAME: &str = "overlap_plot.png";

    /// Returns the path the figure should be written to.
    /// The directory has to exist already, it is never created here.
    pub fn get_output_path(outdir: &Path) -> Result<PathBuf, OverlapError> {
        if !outdir.is_dir() {
            return Err(OverlapError::MissingOutputDir(outdir.to_path_buf()));
        }

        Ok(outdir.join(OUTPUT_FILE_NAME))
    }
}

pub mod fmt_utils {
    /// Groups digits in thousands, `1234567` becomes `1,234,567`.
    pub fn group_digits(n: u64) -> String {
        let digits = n.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        grouped
    }

    /// Formats a percentage with a single decimal, e.g. `66.7%`.
    pub fn percent(value: f64) -> String {
        format!("{:.1}%", value)
    }
}

use fmt_utils::{group_digits, percent};
use std::path::PathBuf;
use structopt::StructOpt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("Output directory does not exist: {0:?}")]
    MissingOutputDir(PathBuf),
}

// Read counts comparing the alignments of one read set against two genomes
#[derive(Debug, StructOpt, PartialEq, Clone)]
pub struct ComparisonStats {
    /// Name of the first genome
    pub genome1: String,
    /// Name of the second genome
    pub genome2: String,
    /// Reads aligned to the first genome only
    pub unique1: u64,
    /// Reads aligned to the second genome only
    pub unique2: u64,
    /// Reads aligned to both genomes
    pub overlap: u64,
    /// Total reads in the first alignment
    pub count1: u64,
    /// Total reads in the second alignment
    pub count2: u64,
}

/// Share of `part` in `total` as a percentage, 0 for an empty total.
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

// Headroom above the tallest bar for its value label
const BAR_HEADROOM: f64 = 1.15;

impl ComparisonStats {
    pub fn pct_unique1(&self) -> f64 {
        percentage(self.unique1, self.count1)
    }

    pub fn pct_unique2(&self) -> f64 {
        percentage(self.unique2, self.count2)
    }

    pub fn pct_overlap1(&self) -> f64 {
        percentage(self.overlap, self.count1)
    }

    pub fn pct_overlap2(&self) -> f64 {
        percentage(self.overlap, self.count2)
    }

    /// Bar values in display order: first genome, overlap, second genome.
    pub fn bar_values(&self) -> [u64; 3] {
        [self.unique1, self.overlap, self.unique2]
    }

    pub fn bar_categories(&self) -> [String; 3] {
        [
            format!("{} Unique", self.genome1),
            String::from("Overlapping"),
            format!("{} Unique", self.genome2),
        ]
    }

    /// Upper bound of the bar chart's y axis.
    /// Falls back to 1 when every bar is empty so the axis keeps a range.
    pub fn y_upper_bound(&self) -> f64 {
        let max = self.bar_values().iter().copied().max().unwrap_or(0);
        if max == 0 {
            1.0
        } else {
            max as f64 * BAR_HEADROOM
        }
    }

    // Region labels are None when the region holds no reads,
    // those regions are left unlabelled in the diagram.

    pub fn unique1_label(&self) -> Option<[String; 2]> {
        if self.unique1 == 0 {
            return None;
        }
        Some([
            group_digits(self.unique1),
            format!("({})", percent(self.pct_unique1())),
        ])
    }

    pub fn unique2_label(&self) -> Option<[String; 2]> {
        if self.unique2 == 0 {
            return None;
        }
        Some([
            group_digits(self.unique2),
            format!("({})", percent(self.pct_unique2())),
        ])
    }

    pub fn overlap_label(&self) -> Option<[String; 2]> {
        if self.overlap == 0 {
            return None;
        }
        Some([
            group_digits(self.overlap),
            format!(
                "({} / {})",
                percent(self.pct_overlap1()),
                percent(self.pct_overlap2())
            ),
        ])
    }

    pub fn title(&self) -> String {
        format!("BAM Read Comparison: {} vs {}", self.genome1, self.genome2)
    }

    pub fn totals_footnote(&self) -> String {
        format!(
            "Total reads: {}={} | {}={}",
            self.genome1,
            group_digits(self.count1),
            self.genome2,
            group_digits(self.count2)
        )
    }
}
