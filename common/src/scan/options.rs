//! # Scan Options
//!
//! Scan techniques and timing templates the engine is willing to pass to the
//! scanner. Anything outside these lists is rejected before a process starts.

use std::fmt;
use std::str::FromStr;

use crate::error::ScanError;

/// Scan technique, identified on the wire by its scanner flag (e.g. `-sS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanType {
    TcpSyn,
    TcpConnect,
    Udp,
    TcpFin,
    TcpNull,
    Xmas,
    TcpAck,
    TcpWindow,
    TcpMaimon,
    TcpIdle,
    IpProtocol,
    FtpBounce,
    SctpInit,
    SctpCookieEcho,
}

impl ScanType {
    pub const ALL: [ScanType; 14] = [
        ScanType::TcpSyn,
        ScanType::TcpConnect,
        ScanType::Udp,
        ScanType::TcpFin,
        ScanType::TcpNull,
        ScanType::Xmas,
        ScanType::TcpAck,
        ScanType::TcpWindow,
        ScanType::TcpMaimon,
        ScanType::TcpIdle,
        ScanType::IpProtocol,
        ScanType::FtpBounce,
        ScanType::SctpInit,
        ScanType::SctpCookieEcho,
    ];

    pub fn flag(self) -> &'static str {
        match self {
            ScanType::TcpSyn => "-sS",
            ScanType::TcpConnect => "-sT",
            ScanType::Udp => "-sU",
            ScanType::TcpFin => "-sF",
            ScanType::TcpNull => "-sN",
            ScanType::Xmas => "-sX",
            ScanType::TcpAck => "-sA",
            ScanType::TcpWindow => "-sW",
            ScanType::TcpMaimon => "-sM",
            ScanType::TcpIdle => "-sI",
            ScanType::IpProtocol => "-sO",
            ScanType::FtpBounce => "-b",
            ScanType::SctpInit => "-sY",
            ScanType::SctpCookieEcho => "-sZ",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScanType::TcpSyn => "TCP SYN",
            ScanType::TcpConnect => "TCP Connect",
            ScanType::Udp => "UDP",
            ScanType::TcpFin => "TCP FIN",
            ScanType::TcpNull => "TCP NULL",
            ScanType::Xmas => "Xmas",
            ScanType::TcpAck => "TCP ACK",
            ScanType::TcpWindow => "TCP Window",
            ScanType::TcpMaimon => "TCP Maimon",
            ScanType::TcpIdle => "TCP Idle",
            ScanType::IpProtocol => "IP Protocol",
            ScanType::FtpBounce => "TCP FTP Bounce",
            ScanType::SctpInit => "SCTP INIT",
            ScanType::SctpCookieEcho => "SCTP COOKIE ECHO",
        }
    }
}

impl FromStr for ScanType {
    type Err = ScanError;

    /// Parses the exact scanner flag, e.g. `"-sS"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let flag = s.trim();
        if flag.is_empty() {
            return Err(ScanError::invalid("scan type must not be empty"));
        }
        Self::ALL
            .into_iter()
            .find(|scan_type| scan_type.flag() == flag)
            .ok_or_else(|| ScanError::invalid(format!("unknown scan type '{flag}'")))
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// Timing template, `-T0` (slowest) to `-T5` (fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Timing {
    Paranoid,
    Sneaky,
    Polite,
    Normal,
    Aggressive,
    Insane,
}

impl Timing {
    pub const ALL: [Timing; 6] = [
        Timing::Paranoid,
        Timing::Sneaky,
        Timing::Polite,
        Timing::Normal,
        Timing::Aggressive,
        Timing::Insane,
    ];

    pub fn flag(self) -> &'static str {
        match self {
            Timing::Paranoid => "-T0",
            Timing::Sneaky => "-T1",
            Timing::Polite => "-T2",
            Timing::Normal => "-T3",
            Timing::Aggressive => "-T4",
            Timing::Insane => "-T5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timing::Paranoid => "Very slow",
            Timing::Sneaky => "Slow",
            Timing::Polite => "Slower",
            Timing::Normal => "Normal",
            Timing::Aggressive => "Fast",
            Timing::Insane => "Very fast",
        }
    }
}

impl FromStr for Timing {
    type Err = ScanError;

    /// Parses the exact scanner flag, e.g. `"-T3"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let flag = s.trim();
        if flag.is_empty() {
            return Err(ScanError::invalid("timing must not be empty"));
        }
        Self::ALL
            .into_iter()
            .find(|timing| timing.flag() == flag)
            .ok_or_else(|| ScanError::invalid(format!("unknown timing '{flag}'")))
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}
