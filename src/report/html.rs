//! HTML report rendering.
//!
//! Produces a single self-contained page. Every value taken from a
//! provider is escaped before it is written into the markup.

use crate::results::ResultSnapshot;
use std::fmt::Write;

const STYLE: &str = r#"
:root { --primary: #1a2b42; --secondary: #3a5169; --accent: #d4af37; --light: #e8e6e3; --dark: #0d1520; --danger: #f44336; }
body { font-family: 'Courier New', monospace; background-color: var(--dark); color: var(--light); margin: 0; line-height: 1.6; }
.container { max-width: 1200px; margin: 0 auto; padding: 20px; }
header { background-color: var(--primary); padding: 20px 0; border-bottom: 3px solid var(--accent); margin-bottom: 30px; }
h1, h2, h3 { color: var(--accent); font-weight: normal; }
h1 { font-size: 2.2rem; letter-spacing: 1px; margin: 0; }
h2 { font-size: 1.5rem; border-bottom: 1px solid var(--secondary); padding-bottom: 10px; }
.report-meta { background-color: var(--primary); padding: 15px; margin-bottom: 20px; border-left: 4px solid var(--accent); }
.summary-cards { display: grid; grid-template-columns: repeat(auto-fill, minmax(250px, 1fr)); gap: 20px; margin-bottom: 30px; }
.card { background-color: var(--primary); padding: 20px; border-radius: 5px; border-left: 4px solid var(--accent); }
.card h3 { margin-top: 0; font-size: 1.1rem; }
.card-value { font-size: 1.8rem; font-weight: bold; }
.terminal { background-color: #0a0a0a; border: 1px solid var(--accent); border-radius: 5px; padding: 15px; margin: 20px 0; overflow-x: auto; color: var(--accent); }
.section { background-color: rgba(26, 43, 66, 0.5); padding: 20px; margin-bottom: 30px; border-radius: 5px; }
.filters { margin-bottom: 20px; display: flex; gap: 10px; }
.filter-btn { background-color: var(--secondary); border: none; color: var(--light); padding: 8px 15px; border-radius: 3px; cursor: pointer; }
.filter-btn.active { background-color: var(--accent); color: var(--dark); }
table { width: 100%; border-collapse: collapse; margin: 20px 0; font-size: 0.9rem; }
th { background-color: var(--secondary); color: var(--accent); padding: 12px 15px; text-align: left; font-weight: normal; text-transform: uppercase; }
#hosts-table th { cursor: pointer; }
td { padding: 10px 15px; border-bottom: 1px solid var(--secondary); vertical-align: top; }
.failure { color: var(--danger); }
.empty { color: var(--secondary); font-style: italic; }
footer { text-align: center; margin-top: 50px; padding: 20px; border-top: 1px solid var(--secondary); font-size: 0.8rem; color: var(--secondary); }
"#;

const SCRIPT: &str = r#"
function filterTable(type, button) {
    document.querySelectorAll('.filter-btn').forEach(b => b.classList.remove('active'));
    button.classList.add('active');
    document.querySelectorAll('#hosts-table tbody tr').forEach(row => {
        const hide = (type === 'subdomains' && !row.classList.contains('subdomain'))
            || (type === 'external' && !row.classList.contains('external'));
        row.style.display = hide ? 'none' : 'table-row';
    });
}

function sortTable(column) {
    const table = document.getElementById('hosts-table');
    const body = table.querySelector('tbody');
    const headers = table.querySelectorAll('thead th');
    const descending = headers[column].getAttribute('data-sort') === 'asc';
    headers.forEach(th => th.removeAttribute('data-sort'));
    headers[column].setAttribute('data-sort', descending ? 'desc' : 'asc');

    const rows = Array.from(body.querySelectorAll('tr'));
    rows.sort((a, b) => {
        const order = a.cells[column].textContent.localeCompare(b.cells[column].textContent);
        return descending ? -order : order;
    });
    rows.forEach(row => body.appendChild(row));
}
"#;

/// Escape text for safe inclusion in HTML content and attribute values.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

/// Render the snapshot as a standalone HTML page.
pub fn render_html(snapshot: &ResultSnapshot) -> String {
    let domain = escape(snapshot.domain().as_str());
    let completed = snapshot.completed_at().format("%Y-%m-%d %H:%M:%S UTC").to_string();
    let first_seen = snapshot.completed_at().format("%Y-%m-%d").to_string();
    let source_names: Vec<&str> = snapshot.sources().iter().map(|s| s.as_str()).collect();

    let mut html = String::with_capacity(8192);

    // `write!` into a String cannot fail.
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>GSIT Report for {domain}</title>
<style>{STYLE}</style>
</head>
<body>
<header><div class="container"><h1>GSIT INTELLIGENCE REPORT</h1></div></header>
<div class="container">
<div class="report-meta">
<strong>Target:</strong> {domain}<br>
<strong>Date:</strong> {completed}<br>
<strong>Run:</strong> {run_id}
</div>
"#,
        run_id = snapshot.run_id().short(),
    );

    let _ = write!(
        html,
        r#"<div class="summary-cards">
<div class="card"><h3>Hosts Discovered</h3><div class="card-value">{}</div></div>
<div class="card"><h3>IP Addresses</h3><div class="card-value">{}</div></div>
<div class="card"><h3>Emails Found</h3><div class="card-value">{}</div></div>
<div class="card"><h3>Data Sources</h3><div class="card-value">{}</div></div>
</div>
<div class="terminal">$ gsit search -d {domain} -b {} -l {}</div>
"#,
        snapshot.hosts().len(),
        snapshot.ips().len(),
        snapshot.emails().len(),
        snapshot.sources().len(),
        escape(&source_names.join(",")),
        snapshot.limit(),
    );

    html.push_str(
        r#"<div class="section">
<h2>Host Discovery Results</h2>
<div class="filters">
<button class="filter-btn active" onclick="filterTable('all', this)">All</button>
<button class="filter-btn" onclick="filterTable('subdomains', this)">Subdomains</button>
<button class="filter-btn" onclick="filterTable('external', this)">External</button>
</div>
"#,
    );

    if snapshot.hosts().is_empty() {
        html.push_str("<p class=\"empty\">No hosts found.</p>\n");
    } else {
        html.push_str(
            r#"<table id="hosts-table">
<thead><tr><th onclick="sortTable(0)">Host</th><th onclick="sortTable(1)">First Seen</th><th onclick="sortTable(2)">Source</th></tr></thead>
<tbody>
"#,
        );
        for host in snapshot.hosts() {
            let class = if snapshot.domain().is_subdomain_like(host) {
                "subdomain"
            } else {
                "external"
            };
            let sources: Vec<&str> = snapshot
                .sources_for(host)
                .iter()
                .map(|s| s.as_str())
                .collect();
            let _ = writeln!(
                html,
                "<tr class=\"{class}\"><td>{}</td><td>{first_seen}</td><td>{}</td></tr>",
                escape(host),
                escape(&sources.join(", ")),
            );
        }
        html.push_str("</tbody>\n</table>\n");
    }
    html.push_str("</div>\n");

    if !snapshot.ips().is_empty() {
        html.push_str(
            "<div class=\"section\">\n<h2>IP Addresses</h2>\n<table>\n<thead><tr><th>IP</th></tr></thead>\n<tbody>\n",
        );
        for ip in snapshot.ips() {
            let _ = writeln!(html, "<tr><td>{}</td></tr>", escape(ip));
        }
        html.push_str("</tbody>\n</table>\n</div>\n");
    }

    if !snapshot.emails().is_empty() {
        html.push_str("<div class=\"section\">\n<h2>Email Addresses</h2>\n<ul>\n");
        for email in snapshot.emails() {
            let _ = writeln!(html, "<li>{}</li>", escape(email));
        }
        html.push_str("</ul>\n</div>\n");
    }

    html.push_str("<div class=\"section\">\n<h2>Data Sources Used</h2>\n<ul>\n");
    for source in snapshot.sources() {
        let failure = snapshot.failures().iter().find(|f| f.source == *source);
        match failure {
            Some(f) => {
                let _ = writeln!(
                    html,
                    "<li>{} <span class=\"failure\">(failed: {})</span></li>",
                    source.as_str().to_uppercase(),
                    escape(&f.reason),
                );
            }
            None => {
                let _ = writeln!(html, "<li>{}</li>", source.as_str().to_uppercase());
            }
        }
    }
    html.push_str("</ul>\n</div>\n");

    let _ = write!(
        html,
        r#"<footer>GSIT v{version} | Generated by Global Search Intelligence Tool | {completed}</footer>
</div>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        version = env!("CARGO_PKG_VERSION"),
    );

    html
}
