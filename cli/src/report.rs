//! Plain-text rendering of experiment reports and listings.

use std::fmt;

use cogseq_config::LexiconSpec;
use cogseq_engine::{ExperimentReport, Strategy};

/// One experiment, as printed by `cogseq run`.
pub struct TextReport<'a> {
    pub report: &'a ExperimentReport,
    pub lexicon: &'a str,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        writeln!(
            f,
            "{} on {} (seed {}, {} run{})",
            report.strategy,
            self.lexicon,
            report.seed,
            report.runs(),
            if report.runs() == 1 { "" } else { "s" }
        )?;
        writeln!(f)?;
        for (i, (sequence, snapshot)) in report
            .sequences
            .iter()
            .zip(report.complexity.runs())
            .enumerate()
        {
            writeln!(
                f,
                "  run {:>3}: {:<24} mdl {:>4}  peak {:>3}",
                i + 1,
                sequence.names().join(" "),
                snapshot.mdl,
                snapshot.peak_space
            )?;
        }
        writeln!(f)?;
        writeln!(f, "  {:<18} {:>8}", "primitive", "calls")?;
        for (primitive, calls) in report.complexity.breakdown() {
            writeln!(f, "  {primitive:<18} {calls:>8}")?;
        }
        writeln!(f)?;
        write!(
            f,
            "  total mdl {}  mean {:.2}  peak space {}",
            report.total_mdl(),
            report.mean_mdl(),
            report.complexity.peak_space()
        )
    }
}

/// Strategies and lexicons, as printed by `cogseq list`.
pub struct Listing<'a> {
    pub lexicons: &'a [LexiconSpec],
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "strategies:")?;
        for strategy in Strategy::ALL {
            writeln!(
                f,
                "  {:<16} {}  (default lexicon {})",
                strategy.name(),
                strategy.dimension(),
                strategy.default_lexicon()
            )?;
        }
        writeln!(f)?;
        write!(f, "lexicons:")?;
        for spec in self.lexicons {
            let names: Vec<&str> = spec.tokens.iter().map(|t| t.name.as_str()).collect();
            let mut flags = Vec::new();
            if spec.linked {
                flags.push("linked");
            }
            if spec.ordered {
                flags.push("ordered");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            };
            write!(f, "\n  {:<16} {}{flags}", spec.name, names.join(" "))?;
        }
        Ok(())
    }
}
