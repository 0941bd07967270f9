//! CSV holdings adapter.
//!
//! Reads a spreadsheet export whose first row carries the column headers used
//! by the holdings workbook. Columns are located by header name, so extra or
//! reordered columns are fine.

use crate::domain::error::ThrustError;
use crate::domain::holding::Holding;
use crate::ports::holdings_port::HoldingsPort;
use std::fs;
use std::path::PathBuf;

pub const COL_TICKER: &str = "Ticker/Fund";
pub const COL_FREQUENCY: &str = "Frequency";
pub const COL_SHARES: &str = "# of Shares";
pub const COL_CURRENT_VALUE: &str = "Current Value";
pub const COL_YEARLY_THRUST: &str = "Yearly Thrust";
pub const COL_ESCAPE_RATIO: &str = "Escape Ratio (ER)";
pub const COL_DSI: &str = "Distribution Stability Index (DSI)";
pub const COL_GEQS: &str = "Gavel Engine Quality Score (GEQS)";
pub const COL_EEC: &str = "Engine Energy Cost (EEC)";

pub struct CsvHoldingsAdapter {
    path: PathBuf,
}

impl CsvHoldingsAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Parse holdings from CSV text.
    pub fn parse(content: &str) -> Result<Vec<Holding>, ThrustError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr
            .headers()
            .map_err(|e| ThrustError::SourceParse {
                reason: format!("CSV header error: {}", e),
            })?
            .clone();
        let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));

        let ticker_col = column(COL_TICKER).ok_or_else(|| ThrustError::SourceParse {
            reason: format!("missing {} column", COL_TICKER),
        })?;
        let frequency_col = column(COL_FREQUENCY);
        let shares_col = column(COL_SHARES);
        let value_col = column(COL_CURRENT_VALUE);
        let thrust_col = column(COL_YEARLY_THRUST);
        let escape_col = column(COL_ESCAPE_RATIO);
        let dsi_col = column(COL_DSI);
        let geqs_col = column(COL_GEQS);
        let eec_col = column(COL_EEC);

        let mut holdings = Vec::new();
        let mut skipped = 0usize;

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| ThrustError::SourceParse {
                reason: format!("CSV parse error at row {}: {}", row + 2, e),
            })?;
            let text = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

            let ticker = text(Some(ticker_col));
            if ticker.is_empty() {
                skipped += 1;
                continue;
            }

            let holding = Holding::new(
                ticker,
                parse_amount(text(shares_col)),
                parse_amount(text(value_col)),
                parse_amount(text(thrust_col)),
            )
            .with_frequency(text(frequency_col))
            .with_escape_ratio(text(escape_col))
            .with_stability_label(text(dsi_col))
            .with_geqs(text(geqs_col))
            .with_energy_cost_label(text(eec_col));

            if holding.engine_type.is_none() && !holding.geqs.is_empty() {
                tracing::warn!(ticker = %holding.ticker, geqs = %holding.geqs, "unrecognised GEQS label");
            }
            holdings.push(holding);
        }

        if skipped > 0 {
            tracing::debug!(skipped, "dropped rows without a ticker");
        }
        Ok(holdings)
    }
}

/// Lenient number parse: currency symbols and thousands separators are
/// ignored, anything unparsable reads as zero.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl HoldingsPort for CsvHoldingsAdapter {
    fn load_holdings(&self) -> Result<Vec<Holding>, ThrustError> {
        if !self.path.exists() {
            return Err(ThrustError::SourceUnavailable {
                path: self.path.display().to_string(),
            });
        }
        let content = fs::read_to_string(&self.path).map_err(|e| ThrustError::SourceParse {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let holdings = Self::parse(&content)?;
        tracing::debug!(path = %self.path.display(), count = holdings.len(), "loaded holdings");
        Ok(holdings)
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}
