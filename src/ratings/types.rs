use std::fmt;

/// One rated (question, answer, attribution) triple from `ratings.csv`.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingRow {
    pub system_name: String,
    pub question: String,
    pub answer: String,
    pub attribution: String,
    pub passage: String,
    /// Human AIS judgment (`Y`).
    pub human_ais: bool,
    /// AutoAIS judgment (`Y`).
    pub auto_ais: bool,
    pub nli_score: f32,
}

impl RatingRow {
    pub fn agrees(&self) -> bool {
        self.human_ais == self.auto_ais
    }
}

/// Rates over one group of rows. Groups are never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemSummary {
    pub system_name: String,
    pub count: usize,
    pub human_ais_rate: f64,
    pub auto_ais_rate: f64,
    pub mean_nli_score: f64,
    /// Fraction of rows where the human and automatic judgments match.
    pub agreement: f64,
}

/// Per-system summaries, sorted by name, plus the overall row.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingsSummary {
    pub systems: Vec<SystemSummary>,
    pub overall: SystemSummary,
}

const COLUMNS: [&str; 6] = ["system", "count", "human AIS", "AutoAIS", "mean NLI", "agreement"];

impl fmt::Display for RatingsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .systems
            .iter()
            .map(|s| s.system_name.len())
            .chain([self.overall.system_name.len(), COLUMNS[0].len()])
            .max()
            .unwrap_or(0);

        write!(f, "{:<width$}", COLUMNS[0])?;
        for column in &COLUMNS[1..] {
            write!(f, "  {column:>10}")?;
        }
        writeln!(f)?;

        for row in self.systems.iter().chain([&self.overall]) {
            writeln!(
                f,
                "{:<width$}  {:>10}  {:>10.4}  {:>10.4}  {:>10.4}  {:>10.4}",
                row.system_name,
                row.count,
                row.human_ais_rate,
                row.auto_ais_rate,
                row.mean_nli_score,
                row.agreement,
            )?;
        }
        Ok(())
    }
}
