//! Plain-text views rendered with `minijinja` templates.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use minijinja::{Environment, context};
use serde::Serialize;

use delta::{
    AnalyzeResponse, DeltaError, EmptyState, HistorySnapshot, ScanDetails, SessionState,
    relative_age,
};

const ANALYSIS_TEMPLATE: &str = "\
{{ title }}
by {{ author }} · {{ status }}
{{ url }}
Scanned {{ scanned_at }}{% if cached %} (cached){% endif %}

{{ summary }}
";

const HISTORY_TEMPLATE: &str = "\
{{ count_label }}
{% if empty %}
{{ empty_heading }}
{{ empty_message }}
{% else %}
{% for scan in scans %}
{{ scan.title }}
  MR !{{ scan.mr_iid }} · {{ scan.age }} · {{ scan.badge }}
  {{ scan.url }}
{% endfor %}
Showing {{ range_label }}{% if has_previous %}  [previous: --history-offset {{ previous_offset }}]{% endif %}{% if has_next %}  [next: --history-offset {{ next_offset }}]{% endif %}
{% endif %}";

const SCAN_TEMPLATE: &str = "\
{{ title }}
MR !{{ mr_iid }} · project {{ project_id }}
{{ url }}
Scanned {{ scanned_at }}{% if commit %} at {{ commit }}{% endif %}

{{ summary }}
";

#[derive(Debug, Serialize)]
struct HistoryRow {
    title: String,
    mr_iid: i64,
    age: String,
    badge: &'static str,
    url: String,
}

fn render(name: &str, source: &str, ctx: minijinja::Value) -> Result<String, DeltaError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
    env.add_template(name, source)
        .map_err(|error| DeltaError::Configuration {
            message: format!("invalid {name} template: {error}"),
        })?;
    let template = env.get_template(name).map_err(|error| DeltaError::Io {
        message: format!("failed to retrieve {name} template: {error}"),
    })?;
    template.render(ctx).map_err(|error| DeltaError::Io {
        message: format!("{name} rendering failed: {error}"),
    })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Renders an analysis result.
pub fn render_analysis(response: &AnalyzeResponse) -> Result<String, DeltaError> {
    render(
        "analysis",
        ANALYSIS_TEMPLATE,
        context! {
            title => &response.mr_header.title,
            author => &response.mr_header.author,
            status => &response.mr_header.status,
            url => &response.mr_header.url,
            scanned_at => format_timestamp(response.scanned_at),
            cached => response.cached,
            summary => response.summary_markdown.trim_end(),
        },
    )
}

/// Renders a history page as seen at `now`.
pub fn render_history(
    snapshot: &HistorySnapshot,
    now: DateTime<Utc>,
) -> Result<String, DeltaError> {
    let window = snapshot.window();
    let empty = snapshot.empty_state();
    let rows: Vec<HistoryRow> = snapshot
        .scans
        .iter()
        .map(|scan| HistoryRow {
            title: scan.title.clone(),
            mr_iid: scan.mr_iid,
            age: relative_age(scan.scanned_at, now),
            badge: if scan.is_up_to_date {
                "Up to date"
            } else {
                "Outdated"
            },
            url: scan.mr_url.clone(),
        })
        .collect();

    render(
        "history",
        HISTORY_TEMPLATE,
        context! {
            count_label => window.count_label(),
            empty => empty.is_some(),
            empty_heading => EmptyState::HEADING,
            empty_message => empty.map(EmptyState::message),
            scans => rows,
            range_label => window.range_label(),
            has_previous => window.has_previous(),
            previous_offset => window.previous_offset(),
            has_next => window.has_next(),
            next_offset => window.next_offset(),
        },
    )
}

/// Renders a stored scan.
pub fn render_scan(details: &ScanDetails) -> Result<String, DeltaError> {
    render(
        "scan",
        SCAN_TEMPLATE,
        context! {
            title => &details.title,
            mr_iid => details.mr_iid,
            project_id => details.project_id,
            url => &details.mr_url,
            scanned_at => format_timestamp(details.scanned_at),
            commit => &details.last_commit_sha,
            summary => details.summary_markdown.trim_end(),
        },
    )
}

/// Describes the session in one line.
pub fn describe_session(state: &SessionState) -> String {
    match state {
        SessionState::Authenticated(user) => format!("Signed in as {}", user.display_name()),
        SessionState::Unauthenticated => "Not signed in (run `delta --login`)".to_owned(),
        SessionState::Loading => "Session status unknown".to_owned(),
    }
}

/// Writes text to stdout.
pub fn write_stdout(text: &str) -> Result<(), DeltaError> {
    let mut stdout = io::stdout().lock();
    write_text(&mut stdout, text)
}

/// Writes text followed by a newline to the given writer.
pub fn write_text<W: Write>(writer: &mut W, text: &str) -> Result<(), DeltaError> {
    writeln!(writer, "{}", text.trim_end()).map_err(|error| DeltaError::Io {
        message: error.to_string(),
    })
}
