use std::path::Path;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use vision_common::config::Config;
use vision_common::error::ScanError;
use vision_common::scan::{ScanOutcome, ScanRequest, ScanType, Timing};
use vision_common::scanning::ScanEngine;
use vision_core::ScanService;

use crate::stub::{ECHO_TARGET_REPORT, StubScanner};

const TWO_HOST_REPORT: &str = r#"cat > "$out" <<'EOF'
<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nmaprun>
<nmaprun scanner="nmap" args="nmap -sS 192.168.1.0/24 -T4 -p 22,80" start="1700000000" version="7.94">
<host>
  <status state="up" reason="arp-response"/>
  <address addr="192.168.1.1" addrtype="ipv4"/>
  <address addr="AA:BB:CC:DD:EE:01" addrtype="mac" vendor="Netgear"/>
  <hostnames><hostname name="router.lan" type="PTR"/></hostnames>
  <ports>
    <port protocol="tcp" portid="22"><state state="closed"/></port>
    <port protocol="tcp" portid="80"><state state="open"/><service name="http"/></port>
  </ports>
</host>
<host>
  <status state="up" reason="arp-response"/>
  <address addr="192.168.1.20" addrtype="ipv4"/>
  <address addr="AA:BB:CC:DD:EE:14" addrtype="mac"/>
  <hostnames/>
  <ports>
    <port protocol="tcp" portid="22"><state state="open"/><service name="ssh"/></port>
  </ports>
</host>
<runstats><finished time="1700000004" summary="Nmap done at Tue Nov 14 22:13:24 2023; 256 IP addresses (2 hosts up) scanned in 3.52 seconds"/></runstats>
</nmaprun>
EOF"#;

fn service(scanner: &Path, reports: &Path, scan_timeout: Option<Duration>) -> ScanService {
    ScanService::from_config(&Config {
        scanner_path: scanner.to_path_buf(),
        artifact_dir: reports.to_path_buf(),
        scan_timeout,
        enrich_vendors: false,
    })
}

fn request(target: &str) -> ScanRequest {
    ScanRequest::new(ScanType::TcpSyn, target, Timing::Aggressive, None).unwrap()
}

fn leftover_reports(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn successful_scan_returns_parsed_hosts() {
    let stub = StubScanner::new(TWO_HOST_REPORT);
    let reports = tempfile::tempdir().unwrap();
    let scan_id = Uuid::new_v4();
    let request = ScanRequest::new(
        ScanType::TcpSyn,
        "192.168.1.0/24",
        Timing::Aggressive,
        Some("22,80".into()),
    )
    .unwrap();

    let outcome = service(stub.path(), reports.path(), None)
        .scan(scan_id, request, CancellationToken::new())
        .await
        .unwrap();

    let ScanOutcome::Completed(result) = outcome else {
        panic!("expected a completed scan, got {outcome:?}");
    };
    assert_eq!(result.devices.len(), 2);
    assert_eq!(
        result.scan_summary.as_deref(),
        Some("256 IP addresses (2 hosts up) scanned in 3.52 seconds")
    );

    let router = &result.devices[0];
    assert_eq!(router.hostname.as_deref(), Some("router.lan"));
    assert_eq!(router.vendor.as_deref(), Some("Netgear"));
    assert_eq!(router.open_ports.len(), 2);
    assert_eq!(router.open_ports[1].service_name.as_deref(), Some("http"));

    let workstation = &result.devices[1];
    assert_eq!(workstation.hostname, None);
    assert_eq!(workstation.vendor, None);
    assert_eq!(workstation.ip_address.as_deref(), Some("192.168.1.20"));

    let args = stub.recorded_args();
    assert_eq!(args[..6], ["-sS", "192.168.1.0/24", "-T4", "-p", "22,80", "-oX"]);
    let report = Path::new(&args[6]);
    assert_eq!(report.parent(), Some(reports.path()));
    assert!(
        report
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(&format!("vision-{scan_id}-"))
    );
    assert!(!report.exists());
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn tool_failure_carries_its_error_output() {
    let stub = StubScanner::new("echo 'permission denied' >&2; exit 1");
    let reports = tempfile::tempdir().unwrap();

    let outcome = service(stub.path(), reports.path(), None)
        .scan(Uuid::new_v4(), request("10.0.0.1"), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        outcome,
        ScanOutcome::Failed {
            message: "Scan failed.".into(),
            error_output: "permission denied".into(),
        }
    );
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn cancellation_kills_the_tool_and_cleans_up() {
    let stub = StubScanner::new("trap '' TERM\nexec sleep 30");
    let reports = tempfile::tempdir().unwrap();
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    let stub_dir = stub.dir().to_path_buf();
    tokio::spawn(async move {
        while !stub_dir.join("pid").exists() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let outcome = service(stub.path(), reports.path(), None)
        .scan(Uuid::new_v4(), request("10.0.0.0/24"), cancel)
        .await
        .unwrap();

    assert!(outcome.is_cancelled(), "got {outcome:?}");
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(leftover_reports(reports.path()), 0);

    #[cfg(target_os = "linux")]
    {
        let pid = stub.pid().unwrap();
        assert!(!Path::new(&format!("/proc/{pid}")).exists());
    }
}

#[tokio::test]
async fn cancelled_before_start_never_runs_the_tool() {
    let stub = StubScanner::new(ECHO_TARGET_REPORT);
    let reports = tempfile::tempdir().unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = service(stub.path(), reports.path(), None)
        .scan(Uuid::new_v4(), request("10.0.0.1"), cancel)
        .await
        .unwrap();

    assert!(outcome.is_cancelled(), "got {outcome:?}");
    assert!(!stub.was_invoked());
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn unreadable_report_is_corrupt() {
    let stub = StubScanner::new(r#"echo '<html><body>502 Bad Gateway</body></html>' > "$out""#);
    let reports = tempfile::tempdir().unwrap();

    let err = service(stub.path(), reports.path(), None)
        .scan(Uuid::new_v4(), request("10.0.0.1"), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::ReportCorrupt(_)), "got {err:?}");
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn report_never_written_is_corrupt() {
    let stub = StubScanner::new("exit 0");
    let reports = tempfile::tempdir().unwrap();

    let err = service(stub.path(), reports.path(), None)
        .scan(Uuid::new_v4(), request("10.0.0.1"), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::ReportCorrupt(_)), "got {err:?}");
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn tool_that_removes_its_report_is_tolerated_on_release() {
    let stub = StubScanner::new(r#"rm -f "$out"; exit 3"#);
    let reports = tempfile::tempdir().unwrap();

    let outcome = service(stub.path(), reports.path(), None)
        .scan(Uuid::new_v4(), request("10.0.0.1"), CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(outcome, ScanOutcome::Failed { .. }));
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn missing_scanner_is_a_launch_error() {
    let reports = tempfile::tempdir().unwrap();
    let missing = reports.path().join("no-such-nmap");

    let err = service(&missing, reports.path(), None)
        .scan(Uuid::new_v4(), request("10.0.0.1"), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Launch { .. }), "got {err:?}");
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn slow_tool_is_stopped_at_the_time_limit() {
    let stub = StubScanner::new("exec sleep 30");
    let reports = tempfile::tempdir().unwrap();

    let started = Instant::now();
    let outcome = service(stub.path(), reports.path(), Some(Duration::from_millis(200)))
        .scan(Uuid::new_v4(), request("10.0.0.1"), CancellationToken::new())
        .await
        .unwrap();

    let ScanOutcome::Failed { message, error_output } = outcome else {
        panic!("expected a failed scan, got {outcome:?}");
    };
    assert_eq!(message, "Scan timed out.");
    assert!(error_output.contains("200ms"));
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_scans_read_their_own_reports() {
    const SCANS: usize = 8;
    let stub = StubScanner::new(&format!("sleep 0.2\n{ECHO_TARGET_REPORT}"));
    let reports = tempfile::tempdir().unwrap();
    let engine = std::sync::Arc::new(service(stub.path(), reports.path(), None));

    let mut tasks = Vec::with_capacity(SCANS);
    for i in 0..SCANS {
        let engine = std::sync::Arc::clone(&engine);
        let target = format!("10.0.0.{}", i + 1);
        tasks.push(tokio::spawn(async move {
            let outcome = engine
                .scan(Uuid::new_v4(), request(&target), CancellationToken::new())
                .await
                .unwrap();
            (target, outcome)
        }));
    }

    for task in tasks {
        let (target, outcome) = task.await.unwrap();
        let ScanOutcome::Completed(result) = outcome else {
            panic!("scan of {target} did not complete: {outcome:?}");
        };
        assert_eq!(result.devices.len(), 1);
        assert_eq!(result.devices[0].ip_address.as_deref(), Some(target.as_str()));
    }
    assert_eq!(leftover_reports(reports.path()), 0);
}

#[tokio::test]
async fn target_reaches_the_tool_as_a_single_argument() {
    let stub = StubScanner::new(ECHO_TARGET_REPORT);
    let reports = tempfile::tempdir().unwrap();
    let marker = stub.dir().join("pwned");
    let target = format!("10.0.0.1;touch {}", marker.display());

    let outcome = service(stub.path(), reports.path(), None)
        .scan(Uuid::new_v4(), request(&target), CancellationToken::new())
        .await
        .unwrap();

    assert!(outcome.is_completed());
    assert_eq!(stub.recorded_args()[1], target);
    assert!(!marker.exists());
}
