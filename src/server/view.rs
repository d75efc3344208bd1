/// HTML view for the dashboard
///
/// `DashboardView` holds render-ready strings derived from a snapshot;
/// `render` turns them into the full document. No sampling happens here.

use crate::core::{MetricsSnapshot, ProcessInfo};

pub const STYLESHEET_PATH: &str = "/static/dashboard.css";

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRow {
    pub pid: String,
    pub name: String,
    pub cpu_percent: String,
    pub memory_percent: String,
    pub status: String,
}

impl From<&ProcessInfo> for ProcessRow {
    fn from(p: &ProcessInfo) -> Self {
        ProcessRow {
            pid: p.pid.to_string(),
            name: p.name.clone(),
            cpu_percent: format!("{:.1}", p.cpu_percent),
            memory_percent: format!("{:.1}", p.memory_percent),
            status: p.status.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub refresh_secs: u64,
    pub cpu_percent: String,
    pub cpu_bar: Bar,
    pub cpu_cores: String,
    pub memory_used_gb: String,
    pub memory_total_gb: String,
    pub memory_percent: String,
    pub memory_bar: Bar,
    pub boot_time: String,
    pub processes: Vec<ProcessRow>,
}

/// Usage bar width and color class
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub width: String,
    pub class: &'static str,
}

impl Bar {
    fn for_percent(percent: f64) -> Self {
        let clamped = percent.clamp(0.0, 100.0);
        let class = if clamped > 80.0 {
            "bar critical"
        } else if clamped > 60.0 {
            "bar warn"
        } else {
            "bar"
        };
        Bar {
            width: format!("{:.1}", clamped),
            class,
        }
    }
}

impl DashboardView {
    pub fn from_snapshot(snapshot: &MetricsSnapshot, refresh_secs: u64) -> Self {
        DashboardView {
            refresh_secs,
            cpu_percent: format!("{:.1}", snapshot.cpu_percent),
            cpu_bar: Bar::for_percent(snapshot.cpu_percent),
            cpu_cores: snapshot.cpu_cores.to_string(),
            memory_used_gb: format!("{:.2}", snapshot.memory.used_gb),
            memory_total_gb: format!("{:.2}", snapshot.memory.total_gb),
            memory_percent: format!("{:.1}", snapshot.memory.percent),
            memory_bar: Bar::for_percent(snapshot.memory.percent),
            boot_time: snapshot.boot_time.clone(),
            processes: snapshot.processes.iter().map(ProcessRow::from).collect(),
        }
    }

    pub fn render(&self) -> String {
        let rows = if self.processes.is_empty() {
            "                <tr><td colspan=\"5\" class=\"empty\">No processes could be read</td></tr>\n"
                .to_string()
        } else {
            self.processes.iter().map(render_row).collect::<String>()
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>System Monitor</title>
    <meta charset="utf-8">
    <meta http-equiv="refresh" content="{refresh}">
    <link rel="icon" href="data:,">
    <link rel="stylesheet" href="{stylesheet}">
</head>
<body>
    <div class="container">
        <h1>System Monitor</h1>
        <div class="metric">
            <div class="title">CPU Usage</div>
            <div class="bar-container">
                <div class="{cpu_class}" style="width: {cpu_width}%"></div>
            </div>
            <p>{cpu}%</p>
        </div>

        <div class="metric">
            <div class="title">Memory Usage</div>
            <div class="bar-container">
                <div class="{mem_class}" style="width: {mem_width}%"></div>
            </div>
            <p>Used: {used}GB / Total: {total}GB ({mem}%)</p>
        </div>

        <div class="metric">
            <div class="title">System Information</div>
            <p>Boot Time: {boot}</p>
            <p>CPU Cores: {cores}</p>
        </div>

        <div class="metric">
            <div class="title">Top Processes</div>
            <table class="process-table">
                <tr>
                    <th>PID</th>
                    <th>Name</th>
                    <th>CPU %</th>
                    <th>Memory %</th>
                    <th>Status</th>
                </tr>
{rows}            </table>
        </div>
    </div>
</body>
</html>
"#,
            refresh = self.refresh_secs,
            stylesheet = STYLESHEET_PATH,
            cpu_class = self.cpu_bar.class,
            cpu_width = self.cpu_bar.width,
            cpu = self.cpu_percent,
            mem_class = self.memory_bar.class,
            mem_width = self.memory_bar.width,
            used = self.memory_used_gb,
            total = self.memory_total_gb,
            mem = self.memory_percent,
            boot = escape_html(&self.boot_time),
            cores = self.cpu_cores,
            rows = rows,
        )
    }
}

fn render_row(row: &ProcessRow) -> String {
    format!(
        "                <tr>\n                    <td>{}</td>\n                    <td>{}</td>\n                    <td>{}</td>\n                    <td>{}</td>\n                    <td>{}</td>\n                </tr>\n",
        row.pid,
        escape_html(&row.name),
        row.cpu_percent,
        row.memory_percent,
        escape_html(&row.status),
    )
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
