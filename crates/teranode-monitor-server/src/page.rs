//! HTML render of the full dashboard view.
//!
//! One pure function over a snapshot; placeholder substitution over a const
//! template, no template engine. The page polls `/api/status` every 10s to
//! refresh the live values without a full reload.

use teranode_monitor::NodeStatus;

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Teranode Monitor | BSV Blockchain</title>
<style>
:root {
  --bg: #0a0e17; --card: #1a2234; --border: rgba(59, 130, 246, 0.2);
  --text: #f3f4f6; --muted: #9ca3af;
  --blue: #3b82f6; --green: #10b981; --yellow: #f59e0b; --red: #ef4444; --cyan: #06b6d4;
}
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: -apple-system, 'Segoe UI', sans-serif; background: var(--bg); color: var(--text); min-height: 100vh; }
.container { max-width: 1100px; margin: 0 auto; padding: 20px; }
.header { text-align: center; padding: 30px 10px 20px; }
.header h1 { font-size: 2rem; color: var(--blue); }
.badge { display: inline-block; margin-top: 12px; padding: 8px 18px; border-radius: 20px; font-weight: 600; font-size: 0.85rem; }
.badge.online { background: rgba(16,185,129,0.15); color: var(--green); border: 1px solid var(--green); }
.badge.offline { background: rgba(239,68,68,0.15); color: var(--red); border: 1px solid var(--red); }
.error-box { background: rgba(239,68,68,0.1); border: 1px solid var(--red); border-radius: 10px; padding: 14px; text-align: center; color: var(--red); margin-bottom: 18px; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(230px, 1fr)); gap: 16px; margin-bottom: 16px; }
.card { background: var(--card); border: 1px solid var(--border); border-radius: 12px; padding: 18px; }
.card h2 { font-size: 0.75rem; text-transform: uppercase; letter-spacing: 0.5px; color: var(--muted); margin-bottom: 12px; }
.row { display: flex; justify-content: space-between; padding: 7px 0; border-bottom: 1px solid rgba(255,255,255,0.05); font-size: 0.85rem; }
.row:last-child { border-bottom: none; }
.row .label { color: var(--muted); }
.row .value { font-family: monospace; font-weight: 600; word-break: break-all; text-align: right; }
.big { font-family: monospace; font-size: 2.6rem; font-weight: 700; color: var(--cyan); text-align: center; padding: 10px 0; }
.big-label { text-align: center; color: var(--muted); font-size: 0.8rem; text-transform: uppercase; margin-bottom: 14px; }
.progress { height: 12px; background: rgba(0,0,0,0.4); border: 1px solid var(--border); border-radius: 6px; overflow: hidden; }
.progress-fill { height: 100%; background: linear-gradient(90deg, var(--blue), var(--cyan)); }
.progress-head { display: flex; justify-content: space-between; font-size: 0.8rem; color: var(--muted); margin-bottom: 6px; }
table { width: 100%; border-collapse: collapse; font-size: 0.8rem; }
th { text-align: left; color: var(--muted); text-transform: uppercase; font-size: 0.7rem; padding: 8px 6px; border-bottom: 1px solid var(--border); }
td { font-family: monospace; padding: 8px 6px; border-bottom: 1px solid rgba(255,255,255,0.05); }
.footer { text-align: center; color: var(--muted); font-size: 0.8rem; padding: 22px; }
.footer span { color: var(--cyan); font-family: monospace; }
</style>
</head>
<body>
<div class="container">
  <header class="header">
    <h1>Teranode Monitor</h1>
    <div id="badge" class="badge {{badge_class}}">{{badge_text}}</div>
  </header>
  {{error_box}}
  <div class="card" style="margin-bottom: 16px;">
    <h2>Sync Progress</h2>
    <div class="big" id="block-height">{{block_height}}</div>
    <div class="big-label">Current Block Height</div>
    <div class="progress-head">
      <span>Progress to Target ({{target_height}})</span>
      <span id="sync-percent">{{sync_percentage}}%</span>
    </div>
    <div class="progress"><div class="progress-fill" id="progress-fill" style="width: {{sync_width}}%"></div></div>
    <div class="row" style="margin-top: 12px;">
      <span class="label">Blocks Remaining</span>
      <span class="value" id="blocks-remaining" style="color: var(--yellow);">{{blocks_remaining}}</span>
    </div>
  </div>
  <div class="grid">
    <div class="card">
      <h2>Blockchain</h2>
      <div class="row"><span class="label">Network</span><span class="value">{{chain}}</span></div>
      <div class="row"><span class="label">Best Block</span><span class="value">{{best_block_hash}}</span></div>
      <div class="row"><span class="label">Difficulty</span><span class="value">{{difficulty}}</span></div>
    </div>
    <div class="card">
      <h2>Network</h2>
      <div class="row"><span class="label">Connections</span><span class="value" id="connections">{{connections}}</span></div>
      <div class="row"><span class="label">Protocol</span><span class="value">{{protocol_version}}</span></div>
      <div class="row"><span class="label">Version</span><span class="value">{{version}}</span></div>
    </div>
    <div class="card">
      <h2>Mempool</h2>
      <div class="row"><span class="label">Transactions</span><span class="value" id="mempool-size">{{mempool_size}}</span></div>
      <div class="row"><span class="label">Size</span><span class="value" id="mempool-bytes">{{mempool_kb}} KB</span></div>
    </div>
    <div class="card">
      <h2>Node</h2>
      <div class="row"><span class="label">Host</span><span class="value">{{node_host}}</span></div>
      <div class="row"><span class="label">Port</span><span class="value">{{node_port}}</span></div>
      <div class="row"><span class="label">Status</span><span class="value">{{node_state}}</span></div>
    </div>
  </div>
  {{peers_card}}
  <footer class="footer">Last Updated: <span id="last-update">{{last_update}}</span></footer>
</div>
<script>
function refresh() {
  fetch('/api/status').then(function (r) { return r.json(); }).then(function (data) {
    document.getElementById('block-height').textContent = data.block_height.toLocaleString();
    document.getElementById('sync-percent').textContent = data.sync_percentage + '%';
    document.getElementById('progress-fill').style.width = Math.min(data.sync_percentage, 100) + '%';
    document.getElementById('blocks-remaining').textContent = data.blocks_remaining.toLocaleString();
    document.getElementById('connections').textContent = data.connections;
    document.getElementById('mempool-size').textContent = data.mempool_size.toLocaleString();
    document.getElementById('mempool-bytes').textContent = (data.mempool_bytes / 1024).toFixed(0) + ' KB';
    document.getElementById('last-update').textContent = data.last_update;
    var badge = document.getElementById('badge');
    badge.className = 'badge ' + (data.online ? 'online' : 'offline');
    badge.textContent = data.online ? 'Online - Syncing' : 'Offline';
  }).catch(function (e) { console.error('refresh failed', e); });
}
setInterval(refresh, 10000);
</script>
</body>
</html>
"#;

/// Render the dashboard for one snapshot plus the static node endpoint.
pub fn render(status: &NodeStatus, node_host: &str, node_port: u16) -> String {
    let error_box = match &status.error {
        Some(e) => format!(r#"<div class="error-box">{}</div>"#, escape(e)),
        None => String::new(),
    };

    let peers_card = if status.peers.is_empty() {
        String::new()
    } else {
        let rows: String = status
            .peers
            .iter()
            .map(|p| {
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    escape(&p.addr),
                    escape(&p.subver),
                    group_digits(p.synced_blocks as i64),
                )
            })
            .collect();
        format!(
            r#"<div class="card" style="margin-bottom: 16px;">
  <h2>Connected Peers</h2>
  <table>
    <thead><tr><th>Address</th><th>Client</th><th>Synced</th></tr></thead>
    <tbody>{rows}</tbody>
  </table>
</div>"#
        )
    };

    PAGE.replace(
        "{{badge_class}}",
        if status.online { "online" } else { "offline" },
    )
    .replace(
        "{{badge_text}}",
        if status.online {
            "Online - Syncing"
        } else {
            "Offline"
        },
    )
    .replace("{{error_box}}", &error_box)
    .replace("{{block_height}}", &group_digits(status.block_height as i64))
    .replace("{{target_height}}", &group_digits(status.target_height as i64))
    .replace("{{sync_percentage}}", &format!("{}", status.sync_percentage))
    .replace(
        "{{sync_width}}",
        &format!("{}", status.sync_percentage.min(100.0)),
    )
    .replace("{{blocks_remaining}}", &group_digits(status.blocks_remaining))
    .replace(
        "{{chain}}",
        &escape(&status.chain.to_uppercase()),
    )
    .replace("{{best_block_hash}}", &escape(&status.best_block_hash))
    .replace("{{difficulty}}", &format!("{:.2}", status.difficulty))
    .replace("{{connections}}", &status.connections.to_string())
    .replace("{{protocol_version}}", &status.protocol_version.to_string())
    .replace("{{version}}", &status.version.to_string())
    .replace("{{mempool_size}}", &group_digits(status.mempool_size as i64))
    .replace(
        "{{mempool_kb}}",
        &format!("{:.0}", status.mempool_bytes as f64 / 1024.0),
    )
    .replace("{{node_host}}", &escape(node_host))
    .replace("{{node_port}}", &node_port.to_string())
    .replace(
        "{{node_state}}",
        if status.online { "SYNCING" } else { "OFFLINE" },
    )
    .replace("{{peers_card}}", &peers_card)
    .replace("{{last_update}}", &escape(&status.last_update))
}

/// Minimal HTML escaping for values that originate from the remote node.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Thousands separators for display, e.g. 928100 -> "928,100".
fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{out}")
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use teranode_monitor::{MonitorConfig, PeerSummary};

    fn offline_status() -> NodeStatus {
        let config = MonitorConfig::default();
        let mut status: NodeStatus =
            serde_json::from_value(serde_json::json!({
                "online": false, "error": null, "block_height": 0,
                "best_block_hash": "", "chain": "", "difficulty": 0.0,
                "connections": 0, "version": 0, "protocol_version": 0,
                "verification_progress": 0.0, "sync_percentage": 0.0,
                "target_height": config.target_height,
                "blocks_remaining": config.target_height as i64,
                "mempool_size": 0, "mempool_bytes": 0, "peers": [],
                "last_update": "2026-01-01 00:00:00",
            }))
            .unwrap();
        status.error = Some("Request timed out".to_string());
        status
    }

    #[test]
    fn offline_page_shows_error_and_badge() {
        let page = render(&offline_status(), "10.0.0.5", 9292);
        assert!(page.contains("Teranode Monitor"));
        assert!(page.contains("badge offline"));
        assert!(page.contains("Request timed out"));
        assert!(page.contains("928,100"));
        assert!(page.contains("10.0.0.5"));
        // No peers card when the peer list is empty.
        assert!(!page.contains("Connected Peers"));
    }

    #[test]
    fn peer_values_are_escaped() {
        let mut status = offline_status();
        status.online = true;
        status.error = None;
        status.peers = vec![PeerSummary {
            addr: "1.2.3.4:8333".to_string(),
            subver: "<script>alert(1)</script>".to_string(),
            synced_blocks: 1,
        }];
        let page = render(&status, "localhost", 9292);
        assert!(page.contains("Connected Peers"));
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }

    #[test]
    fn group_digits_handles_negatives() {
        assert_eq!(group_digits(928_100), "928,100");
        assert_eq!(group_digits(-1_234), "-1,234");
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
    }
}
