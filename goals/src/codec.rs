use std::io::Write;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{GoalError, Result};
use crate::goal::{Goal, GoalSet};

/// Column layout of the original goal files.
pub const ORIGINAL_HEADER: &str = "Strategy,Instrument,Direction,AvgPrice,Target,\
TakeProfitPrice,StopLossPrice,OpenTimestamp,CurrentPosition,RealizedPnl";

/// Extended layout carrying the delayed-bracket columns.
pub const DELAYED_BRACKET_HEADER: &str = "Strategy,Instrument,Direction,AvgPrice,Target,\
TakeProfitPrice,StopLossPrice,OpenTimestamp,CurrentPosition,RealizedPnl,\
NextBracketEffectiveDate,CurrentTakeProfitPrice,CurrentStopLossPrice";

/// Open-timestamp patterns accepted on input, tried in order.
const DATE_PATTERNS: [&str; 4] = ["%m/%d/%Y", "%m-%d-%Y", "%Y/%d/%m", "%Y-%d-%m"];

const OUTPUT_DATE_FORMAT: &str = "%m/%d/%Y";

/// Which column layout a serialization targets. Ordered: later versions
/// extend earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchemaVersion {
    Original,
    DelayedBracket,
}

impl SchemaVersion {
    pub fn header(self) -> &'static str {
        match self {
            SchemaVersion::Original => ORIGINAL_HEADER,
            SchemaVersion::DelayedBracket => DELAYED_BRACKET_HEADER,
        }
    }
}

impl FromStr for SchemaVersion {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "original" => Ok(SchemaVersion::Original),
            "delayedbracket" | "delayed-bracket" => Ok(SchemaVersion::DelayedBracket),
            other => Err(GoalError::invalid_argument(format!(
                "unknown schema version '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedGoals {
    pub set: GoalSet,
    pub had_header: bool,
}

/// Parses goal lines into the goal set of a single strategy.
///
/// Zero-length lines are skipped. Line 1 is sniffed for a header: a
/// non-empty Target column that does not parse as a number marks it as
/// one. A data file whose first real target value is unparsable garbage
/// is therefore indistinguishable from a header and silently loses that
/// line; that ambiguity is inherent to the format.
///
/// Any malformed row aborts the parse and reports its 1-based line
/// number together with the expected column list.
pub fn parse_goals<I, S>(lines: I, require_header: bool) -> Result<ParsedGoals>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut strategy_name: Option<String> = None;
    let mut goals = Vec::new();
    let mut had_header = false;

    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = idx + 1;
        let line = line.as_ref();
        if line.is_empty() {
            continue;
        }
        match parse_line(line, line_no == 1, &mut strategy_name) {
            Ok(ParsedLine::Header) => had_header = true,
            Ok(ParsedLine::Row(goal)) => goals.push(goal),
            Err(message) => {
                return Err(GoalError::Format {
                    line: line_no,
                    message,
                    expected: DELAYED_BRACKET_HEADER,
                });
            }
        }
    }

    if require_header && !had_header {
        return Err(GoalError::MissingHeader);
    }

    Ok(ParsedGoals {
        set: GoalSet::new(strategy_name.unwrap_or_default(), goals),
        had_header,
    })
}

enum ParsedLine {
    Header,
    Row(Goal),
}

fn parse_line(
    line: &str,
    first_line: bool,
    strategy_name: &mut Option<String>,
) -> std::result::Result<ParsedLine, String> {
    let parts: Vec<&str> = line
        .split(['\t', ','])
        .map(|part| part.trim_matches(['"', '\'', ' ']))
        .collect();
    if parts.len() < 8 {
        return Err("Not enough columns".to_string());
    }

    let strategy = parts[0];
    let instrument = parts[1];
    let direction = parts[2];
    let avg_price_col = parts[3];
    let target_col = parts[4];
    let take_profit_col = parts[5];
    let stop_loss_col = parts[6];
    let open_timestamp_col = parts[7];
    let current_position_col = parts.get(8).copied();
    let realized_pnl_col = parts.get(9).copied();
    let next_bracket_date_col = parts.get(10).copied();
    let current_take_profit_col = parts.get(11).copied();
    let current_stop_loss_col = parts.get(12).copied();

    // Header sniff: a real data row leaves Target blank or numeric.
    if first_line && !target_col.is_empty() && target_col.parse::<f64>().is_err() {
        return Ok(ParsedLine::Header);
    }

    match strategy_name {
        None => *strategy_name = Some(strategy.to_string()),
        Some(expected) if strategy != expected.as_str() => {
            return Err("Mismatch between strategy names".to_string());
        }
        Some(_) => {}
    }

    if instrument.is_empty() {
        return Err("Instrument is missing".to_string());
    }

    let avg_price: f64 = avg_price_col.parse().unwrap_or(0.0);

    let magnitude: i64 = if target_col.is_empty() {
        0
    } else {
        target_col
            .parse()
            .map_err(|_| format!("Target '{}' is not a whole number", target_col))?
    };
    if magnitude < 0 {
        return Err("Target cannot be negative".to_string());
    }
    let target = if magnitude != 0 {
        match direction.to_lowercase().as_str() {
            "long" => magnitude,
            "short" => -magnitude,
            _ => return Err("Direction long or short is expected".to_string()),
        }
    } else {
        0
    };

    let take_profit_price = parse_strict_price(take_profit_col, "TakeProfitPrice")?;
    let stop_loss_price = parse_strict_price(stop_loss_col, "StopLossPrice")?;
    let open_timestamp = parse_goal_date(open_timestamp_col);

    let current_position: i64 = current_position_col
        .and_then(|col| col.parse().ok())
        .unwrap_or(0);
    let realized_pnl: f64 = realized_pnl_col
        .and_then(|col| col.parse().ok())
        .unwrap_or(0.0);

    let next_bracket_effective_date = next_bracket_date_col.and_then(parse_goal_date);
    let current_take_profit_price: f64 = match current_take_profit_col {
        Some(col) => col.parse().unwrap_or(0.0),
        None => take_profit_price,
    };
    let current_stop_loss_price: f64 = match current_stop_loss_col {
        Some(col) => col.parse().unwrap_or(0.0),
        None => stop_loss_price,
    };

    let mut goal = Goal::new(instrument, target).map_err(|e| e.to_string())?;
    goal.avg_price = avg_price;
    goal.take_profit_price = take_profit_price;
    goal.stop_loss_price = stop_loss_price;
    goal.open_timestamp = open_timestamp;
    goal.current_position = current_position;
    goal.realized_pnl = realized_pnl;
    goal.next_bracket_effective_date = next_bracket_effective_date;
    goal.current_take_profit_price = current_take_profit_price;
    goal.current_stop_loss_price = current_stop_loss_price;
    Ok(ParsedLine::Row(goal))
}

fn parse_strict_price(col: &str, what: &str) -> std::result::Result<f64, String> {
    if col.is_empty() {
        return Ok(0.0);
    }
    col.parse()
        .map_err(|_| format!("{} '{}' is not a number", what, col))
}

fn parse_goal_date(col: &str) -> Option<NaiveDate> {
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(col, pattern).ok())
}

/// Writes goals to `output` under the given schema version. `Original`
/// omits the bracket extension columns entirely, even when the goals
/// carry non-default values for them.
pub fn write_goals<W: Write + ?Sized>(
    output: &mut W,
    strategy_name: &str,
    goals: &[Goal],
    include_header: bool,
    version: SchemaVersion,
) -> Result<()> {
    if include_header {
        writeln!(output, "{}", version.header())?;
    }
    for goal in goals {
        writeln!(output, "{}", format_row(strategy_name, goal, version))?;
    }
    Ok(())
}

/// In-memory variant of [`write_goals`].
pub fn serialize_goals(
    strategy_name: &str,
    goals: &[Goal],
    include_header: bool,
    version: SchemaVersion,
) -> String {
    let mut text = String::new();
    if include_header {
        text.push_str(version.header());
        text.push('\n');
    }
    for goal in goals {
        text.push_str(&format_row(strategy_name, goal, version));
        text.push('\n');
    }
    text
}

fn format_row(strategy_name: &str, goal: &Goal, version: SchemaVersion) -> String {
    let mut columns = vec![
        strategy_name.to_string(),
        goal.instrument().to_string(),
        match goal.target {
            0 => String::new(),
            t if t > 0 => "Long".to_string(),
            _ => "Short".to_string(),
        },
        format_number(goal.avg_price),
        if goal.target == 0 {
            String::new()
        } else {
            goal.target.abs().to_string()
        },
        format_number(goal.take_profit_price),
        format_number(goal.stop_loss_price),
        format_date(goal.open_timestamp),
        format_integer(goal.current_position),
        format_number(goal.realized_pnl),
    ];
    if version >= SchemaVersion::DelayedBracket {
        columns.push(format_date(goal.next_bracket_effective_date));
        columns.push(format_number(goal.current_take_profit_price));
        columns.push(format_number(goal.current_stop_loss_price));
    }
    columns.join(",")
}

fn format_number(value: f64) -> String {
    if value == 0.0 || value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

fn format_integer(value: i64) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}

fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|date| date.format(OUTPUT_DATE_FORMAT).to_string())
        .unwrap_or_default()
}
