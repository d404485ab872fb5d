use console::{Alignment, Style, measure_text_width, pad_str};
use n8n_status_enrich::{DisplayStatus, EnrichedExecution, FailureInfo};

use crate::format::{format_duration, format_timestamp, truncate};

/// Printed instead of a table when there is nothing to show.
pub const NO_DATA: &str = "No data available - No execution records found in database";

const HEADERS: [&str; 4] = ["Workflow", "Started At", "Status", "Execution ID"];
const WIDTHS: [usize; 4] = [45, 20, 35, 12];
const MAX_ERROR_MESSAGE: usize = 100;
const DETAIL_INDENT: &str = "    ";

/// Render executions as an aligned table.
///
/// Each execution takes one row, followed by an error line when it failed and
/// a retry line (`Retry of execution <id>`, no retry count since the store
/// does not keep one) when it retries an earlier execution. With `colors` set,
/// status text and icons carry ANSI colors; column padding ignores them.
pub fn render_table(executions: &[EnrichedExecution], colors: bool) -> String {
  if executions.is_empty() {
    return format!("{NO_DATA}\n");
  }

  let header: String = HEADERS
    .iter()
    .zip(WIDTHS)
    .map(|(header, width)| cell(header, width))
    .collect();

  let mut lines = vec![
    paint(header.trim_end(), Style::new().bold(), colors),
    "-".repeat(WIDTHS.iter().sum()),
  ];
  for execution in executions {
    render_row(&mut lines, execution, colors);
  }

  let mut out = lines.join("\n");
  out.push('\n');
  out
}

fn render_row(lines: &mut Vec<String>, execution: &EnrichedExecution, colors: bool) {
  let record = &execution.record;
  let duration = format_duration(execution.duration_ms);
  let (icon, status_text, style) = status_parts(&execution.display_status, &duration);

  let workflow = match icon {
    Some(icon) => format!("{} {}", paint(icon, style.clone(), colors), record.workflow_name),
    None => format!("  {}", record.workflow_name),
  };

  let row = [
    cell(&workflow, WIDTHS[0]),
    cell(&format_timestamp(record.started_at), WIDTHS[1]),
    cell(&paint(&status_text, style, colors), WIDTHS[2]),
    truncate(&record.id, WIDTHS[3]),
  ]
  .concat();
  lines.push(row);

  if let Some(failure) = &execution.failure {
    let line = format!(
      "{DETAIL_INDENT}Error: {} ({})",
      truncate(&failure.message, MAX_ERROR_MESSAGE),
      node_display(failure)
    );
    lines.push(paint(&line, Style::new().red(), colors));
  }

  if let Some(retry_of) = &record.retry_of {
    let line = format!("{DETAIL_INDENT}Retry of execution {retry_of}");
    lines.push(paint(&line, Style::new().yellow(), colors));
  }
}

/// Icon, status text and color for a display status.
fn status_parts(status: &DisplayStatus, duration: &str) -> (Option<&'static str>, String, Style) {
  match status {
    DisplayStatus::Running => (Some("⟳"), format!("Running in {duration}"), Style::new().blue()),
    DisplayStatus::Success => (Some("✓"), format!("Succeeded in {duration}"), Style::new().green()),
    DisplayStatus::Error => (Some("✕"), format!("Error in {duration}"), Style::new().red()),
    DisplayStatus::Crashed => (Some("⛝"), format!("Crashed in {duration}"), Style::new().red()),
    DisplayStatus::Waiting => (Some("⏱"), format!("Waiting for {duration}"), Style::new().yellow()),
    DisplayStatus::Canceled => (Some("×"), format!("Canceled for {duration}"), Style::new().yellow()),
    DisplayStatus::Other(raw) => (None, format!("{raw} in {duration}"), Style::new()),
  }
}

/// The node label, with the raw reference appended unless it already shows.
fn node_display(failure: &FailureInfo) -> String {
  match &failure.node_ref {
    Some(node_ref) => {
      let node_ref = node_ref.to_string();
      if failure.node_label.contains(&node_ref) {
        failure.node_label.clone()
      } else {
        format!("{} (ID: {node_ref})", failure.node_label)
      }
    }
    None => failure.node_label.clone(),
  }
}

/// Left-align text in a column by visible width, keeping at least one space
/// before the next column.
fn cell(text: &str, width: usize) -> String {
  if measure_text_width(text) >= width {
    return format!("{text} ");
  }
  pad_str(text, width, Alignment::Left, None).into_owned()
}

fn paint(text: &str, style: Style, colors: bool) -> String {
  style.force_styling(colors).apply_to(text).to_string()
}
