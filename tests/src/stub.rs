use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Shell prelude shared by every stub. Records the arguments (one per line)
/// and the pid, and leaves the report path in `$out`.
const PRELUDE: &str = r#"#!/bin/sh
here="__HERE__"
out=""
prev=""
for arg in "$@"; do
  printf '%s\n' "$arg" >> "$here/args"
  if [ "$prev" = "-oX" ]; then out="$arg"; fi
  prev="$arg"
done
echo $$ > "$here/pid"
"#;

/// Writes a one-host report for the target (`$2`).
pub const ECHO_TARGET_REPORT: &str = r#"cat > "$out" <<EOF
<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE nmaprun>
<nmaprun scanner="nmap" args="nmap" start="1700000000" version="7.94">
<host><status state="up" reason="arp-response"/><address addr="$2" addrtype="ipv4"/></host>
<runstats><finished time="1700000001" summary="Nmap done at Tue Nov 14 22:13:21 2023; 1 IP address (1 host up) scanned in 0.10 seconds"/></runstats>
</nmaprun>
EOF"#;

/// A fake scanner executable living in its own temporary directory.
pub struct StubScanner {
    dir: TempDir,
    path: PathBuf,
}

impl StubScanner {
    pub fn new(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nmap");
        let script = PRELUDE.replace("__HERE__", &dir.path().display().to_string()) + body + "\n";

        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Arguments of every invocation so far, in order.
    pub fn recorded_args(&self) -> Vec<String> {
        match fs::read_to_string(self.dir.path().join("args")) {
            Ok(args) => args.lines().map(str::to_owned).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn was_invoked(&self) -> bool {
        self.dir.path().join("args").exists()
    }

    pub fn pid(&self) -> Option<u32> {
        fs::read_to_string(self.dir.path().join("pid"))
            .ok()
            .and_then(|pid| pid.trim().parse().ok())
    }
}
