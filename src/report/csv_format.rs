//! CSV report rendering.

use crate::error::ReportResult;
use crate::results::ResultSnapshot;

/// Render one row per host: `Host,IP,Source`.
///
/// The IP column carries every discovered address (hosts are not mapped
/// to addresses), the Source column the sources that reported the host.
pub fn render_csv(snapshot: &ResultSnapshot) -> ReportResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["Host", "IP", "Source"])?;

    let ips = if snapshot.ips().is_empty() {
        "N/A".to_string()
    } else {
        snapshot.ips().join(", ")
    };

    for host in snapshot.hosts() {
        let sources: Vec<&str> = snapshot
            .sources_for(host)
            .iter()
            .map(|s| s.as_str())
            .collect();
        wtr.write_record([host.as_str(), ips.as_str(), &sources.join(";")])?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
