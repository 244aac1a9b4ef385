//! Captured-style Envoy pages used as end-to-end fixtures.

/// `/home` as served by an Envoy-S running R3.9 firmware.
pub const HOME_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Envoy</title></head>
<body>
  <div id="header"><h1>Envoy</h1></div>
  <h2>System Overview</h2>
  <table class="summary">
    <tr><th colspan="2">System Statistics</th></tr>
    <tr>
      <td>Lifetime generation</td>
      <td><span class="value">81.5 MWh</span></td>
    </tr>
    <tr><td>Currently generating</td><td>1.5 kW</td></tr>
    <tr><td>Number of Microinverters</td><td>24</td></tr>
    <tr><td>Number of Microinverters Online</td><td>22</td></tr>
    <tr><td>Current Software Version</td><td>R3.9.20 (6ed292)</td></tr>
    <tr><td>Software Build Date</td><td>Mon Jan 07, 2019 11:48 AM PST</td></tr>
    <tr><td>Database Size</td><td>0 MB (0%)</td></tr>
    <tr><td>Envoy IP Address</td><td>192.168.1.50</td></tr>
  </table>
  <h2>Connection Status</h2>
  <div class="status good">Microinverters</div>
  <div class="status good">Web</div>
  <div class="status bad">Cellular</div>
</body>
</html>
"#;

/// `/production` from the same device.
pub const PRODUCTION_PAGE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Envoy</title></head>
<body>
  <h2>System Energy Production</h2>
  <div class="good">
    System has been live since <span>Tue Apr 02, 2019 02:39 PM PDT</span>
  </div>
  <table>
    <tr><td>Currently</td><td>92.8 W</td></tr>
    <tr><td>Today</td><td>11.7 kWh</td></tr>
    <tr><td>Past Week</td><td>94.2 kWh</td></tr>
    <tr><td>Since Installation</td><td>81.1 MWh</td></tr>
  </table>
</body>
</html>
"#;
