use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use chrono::Timelike;
use ipnet::{Ipv4Net, Ipv6Net};

use crate::core::models::activity_stats::DailyCount;
use crate::core::models::anomaly_report::AnomalyReport;
use crate::core::models::detection_config::DetectionConfig;
use crate::core::models::log_record::LogRecord;
use crate::core::services::aggregation_service::daily_counts;

/// Private-use and reserved IPv4 blocks (RFC 1918, 6890, 5737, 3927, 2544).
const PRIVATE_V4: [Ipv4Net; 13] = [
    Ipv4Net::new_assert(Ipv4Addr::new(0, 0, 0, 0), 8),
    Ipv4Net::new_assert(Ipv4Addr::new(10, 0, 0, 0), 8),
    Ipv4Net::new_assert(Ipv4Addr::new(127, 0, 0, 0), 8),
    Ipv4Net::new_assert(Ipv4Addr::new(169, 254, 0, 0), 16),
    Ipv4Net::new_assert(Ipv4Addr::new(172, 16, 0, 0), 12),
    Ipv4Net::new_assert(Ipv4Addr::new(192, 0, 0, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(192, 0, 2, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(192, 168, 0, 0), 16),
    Ipv4Net::new_assert(Ipv4Addr::new(198, 18, 0, 0), 15),
    Ipv4Net::new_assert(Ipv4Addr::new(198, 51, 100, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(203, 0, 113, 0), 24),
    Ipv4Net::new_assert(Ipv4Addr::new(240, 0, 0, 0), 4),
    Ipv4Net::new_assert(Ipv4Addr::new(255, 255, 255, 255), 32),
];

/// Globally reachable carve-outs inside `PRIVATE_V4` (RFC 7723, 8155).
const PUBLIC_V4_EXCEPTIONS: [Ipv4Net; 2] = [
    Ipv4Net::new_assert(Ipv4Addr::new(192, 0, 0, 9), 32),
    Ipv4Net::new_assert(Ipv4Addr::new(192, 0, 0, 10), 32),
];

/// Private-use and reserved IPv6 blocks (RFC 4193, 4291, 6890, 3849).
///
/// IPv4-mapped addresses are not listed; they are judged by their IPv4 part.
const PRIVATE_V6: [Ipv6Net; 8] = [
    Ipv6Net::new_assert(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1), 128),
    Ipv6Net::new_assert(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 0), 128),
    Ipv6Net::new_assert(Ipv6Addr::new(0x64, 0xff9b, 1, 0, 0, 0, 0, 0), 48),
    Ipv6Net::new_assert(Ipv6Addr::new(0x100, 0, 0, 0, 0, 0, 0, 0), 64),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 0, 0, 0, 0, 0, 0, 0), 23),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 0xdb8, 0, 0, 0, 0, 0, 0), 32),
    Ipv6Net::new_assert(Ipv6Addr::new(0xfc00, 0, 0, 0, 0, 0, 0, 0), 7),
    Ipv6Net::new_assert(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 0), 10),
];

/// Globally reachable carve-outs inside 2001::/23 (IANA special-purpose registry).
const PUBLIC_V6_EXCEPTIONS: [Ipv6Net; 6] = [
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 1, 0, 0, 0, 0, 0, 1), 128),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 1, 0, 0, 0, 0, 0, 2), 128),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 3, 0, 0, 0, 0, 0, 0), 32),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 4, 0x112, 0, 0, 0, 0, 0), 48),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 0x20, 0, 0, 0, 0, 0, 0), 28),
    Ipv6Net::new_assert(Ipv6Addr::new(0x2001, 0x30, 0, 0, 0, 0, 0, 0), 28),
];

/// Runs the four anomaly heuristics over a record set.
pub struct AnomalyService {
    pub config: DetectionConfig,
}

impl AnomalyService {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Apply every heuristic independently to the same input.
    ///
    /// Returns `None` for an empty slice.
    pub fn detect(&self, records: &[LogRecord]) -> Option<AnomalyReport> {
        if records.is_empty() {
            return None;
        }

        let cfg = &self.config;
        let report = AnomalyReport {
            off_hours: owned(off_hours(
                records,
                cfg.working_hours_start,
                cfg.working_hours_end,
            )),
            public_ip: owned(public_addresses(records)),
            rare_device: owned(rare_devices(records, cfg.rare_device_ratio)),
            spike_days: spike_days(records, cfg.spike_sigma),
        };

        tracing::debug!(
            records = records.len(),
            off_hours = report.off_hours.len(),
            public_ip = report.public_ip.len(),
            rare_device = report.rare_device.len(),
            spike_days = report.spike_days.len(),
            "anomaly detection finished"
        );
        Some(report)
    }
}

fn owned(flagged: Vec<&LogRecord>) -> Vec<LogRecord> {
    flagged.into_iter().cloned().collect()
}

/// Records whose hour lies outside `[start, end)`.
pub fn off_hours(records: &[LogRecord], start: u32, end: u32) -> Vec<&LogRecord> {
    records
        .iter()
        .filter(|r| {
            let hour = r.timestamp.hour();
            hour < start || hour >= end
        })
        .collect()
}

/// Records whose source address is not in a private or reserved block.
///
/// Unparseable addresses are flagged too.
pub fn public_addresses(records: &[LogRecord]) -> Vec<&LogRecord> {
    records
        .iter()
        .filter(|r| !is_private_address(&r.ip_address))
        .collect()
}

/// Returns true only for a well-formed address inside a private/reserved block.
pub fn is_private_address(raw: &str) -> bool {
    match raw.parse::<IpAddr>() {
        Ok(IpAddr::V4(v4)) => is_private_v4(&v4),
        Ok(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => is_private_v4(&v4),
            None => {
                PRIVATE_V6.iter().any(|net| net.contains(&v6))
                    && !PUBLIC_V6_EXCEPTIONS.iter().any(|net| net.contains(&v6))
            }
        },
        Err(_) => false,
    }
}

fn is_private_v4(v4: &Ipv4Addr) -> bool {
    PRIVATE_V4.iter().any(|net| net.contains(v4))
        && !PUBLIC_V4_EXCEPTIONS.iter().any(|net| net.contains(v4))
}

/// Records whose device occurs in strictly fewer than `len * ratio` records.
///
/// The comparison is done on the device's share of the records, so a count
/// exactly at the threshold is never flagged through float rounding.
pub fn rare_devices(records: &[LogRecord], ratio: f64) -> Vec<&LogRecord> {
    if records.is_empty() {
        return Vec::new();
    }
    let total = records.len() as f64;

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *frequency.entry(record.device.as_str()).or_default() += 1;
    }

    let rare: HashSet<&str> = frequency
        .into_iter()
        .filter(|&(_, count)| (count as f64) / total < ratio)
        .map(|(device, _)| device)
        .collect();

    tracing::debug!(
        threshold = total * ratio,
        rare_devices = rare.len(),
        "rare device threshold"
    );

    records
        .iter()
        .filter(|r| rare.contains(r.device.as_str()))
        .collect()
}

/// Days whose count exceeds `mean + sigma * stddev` of the daily counts.
///
/// Uses the sample standard deviation, so fewer than two distinct days
/// never produce a spike.
pub fn spike_days(records: &[LogRecord], sigma: f64) -> Vec<DailyCount> {
    let days = daily_counts(records);
    if days.len() < 2 {
        return Vec::new();
    }

    let n = days.len() as f64;
    let mean = days.iter().map(|d| d.count as f64).sum::<f64>() / n;
    let variance = days
        .iter()
        .map(|d| (d.count as f64 - mean).powi(2))
        .sum::<f64>()
        / (n - 1.0);
    let threshold = mean + sigma * variance.sqrt();

    tracing::debug!(mean, stddev = variance.sqrt(), threshold, "spike threshold");

    days.into_iter()
        .filter(|d| d.count as f64 > threshold)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::log_record::TIMESTAMP_FORMAT;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn record(id: u64, ts: &str, ip: &str, device: &str) -> LogRecord {
        LogRecord {
            id,
            username: "alice".to_string(),
            action: "login".to_string(),
            timestamp: NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).unwrap(),
            ip_address: ip.to_string(),
            device: device.to_string(),
        }
    }

    fn at(id: u64, ts: &str) -> LogRecord {
        record(id, ts, "10.0.0.1", "macOS")
    }

    fn ids(records: &[&LogRecord]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    /// `per_day[i]` records on the i-th day after 2024-01-01, all at noon.
    fn days_with_counts(per_day: &[usize]) -> Vec<LogRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let mut id = 0;
        let mut records = Vec::new();
        for (offset, &count) in per_day.iter().enumerate() {
            for _ in 0..count {
                id += 1;
                let ts = start + Duration::days(offset as i64);
                records.push(at(id, &ts.format(TIMESTAMP_FORMAT).to_string()));
            }
        }
        records
    }

    fn with_devices(devices: &[(&str, usize)]) -> Vec<LogRecord> {
        let mut id = 0;
        let mut records = Vec::new();
        for &(device, count) in devices {
            for _ in 0..count {
                id += 1;
                records.push(record(id, "2024-01-01 12:00:00", "10.0.0.1", device));
            }
        }
        records
    }

    // ─── Off-hours ──────────────────────────────────────────────

    #[test]
    fn off_hours_boundaries() {
        let records = vec![
            at(1, "2024-01-01 05:59:59"),
            at(2, "2024-01-01 06:00:00"),
            at(3, "2024-01-01 22:59:59"),
            at(4, "2024-01-01 23:00:00"),
            at(5, "2024-01-01 00:00:00"),
        ];
        let flagged = off_hours(&records, 6, 23);

        assert_eq!(ids(&flagged), vec![1, 4, 5]);
    }

    #[test]
    fn off_hours_respects_custom_window() {
        let records = vec![at(1, "2024-01-01 08:30:00"), at(2, "2024-01-01 09:00:00")];
        let flagged = off_hours(&records, 9, 17);

        assert_eq!(ids(&flagged), vec![1]);
    }

    // ─── Source address ─────────────────────────────────────────

    #[test]
    fn private_addresses_are_not_flagged() {
        assert!(is_private_address("192.168.1.5"));
        assert!(is_private_address("10.0.0.1"));
        assert!(is_private_address("172.20.3.4"));
        assert!(is_private_address("127.0.0.1"));
        assert!(is_private_address("fe80::1"));
        assert!(is_private_address("fd12:3456::1"));
    }

    #[test]
    fn public_and_malformed_addresses_are_flagged() {
        assert!(!is_private_address("8.8.8.8"));
        assert!(!is_private_address("not-an-ip"));
        assert!(!is_private_address(""));
        assert!(!is_private_address("256.1.1.1"));
        assert!(!is_private_address("2606:4700::1111"));
        // just outside 172.16.0.0/12
        assert!(!is_private_address("172.32.0.1"));
    }

    #[test]
    fn mapped_ipv4_is_judged_by_its_ipv4_part() {
        assert!(!is_private_address("::ffff:8.8.8.8"));
        assert!(is_private_address("::ffff:10.0.0.1"));
        assert!(is_private_address("::ffff:192.168.1.5"));
    }

    #[test]
    fn globally_reachable_carve_outs_are_flagged() {
        assert!(!is_private_address("192.0.0.9"));
        assert!(!is_private_address("192.0.0.10"));
        assert!(is_private_address("192.0.0.8"));

        assert!(!is_private_address("2001:1::1"));
        assert!(!is_private_address("2001:20::1"));
        assert!(!is_private_address("2001:4:112::53"));
        // rest of 2001::/23 stays reserved
        assert!(is_private_address("2001:2::1"));
    }

    #[test]
    fn public_addresses_selects_flagged_records() {
        let records = vec![
            record(1, "2024-01-01 12:00:00", "192.168.1.5", "macOS"),
            record(2, "2024-01-01 12:00:00", "8.8.8.8", "macOS"),
            record(3, "2024-01-01 12:00:00", "not-an-ip", "macOS"),
            record(4, "2024-01-01 12:00:00", "10.0.0.1", "macOS"),
        ];
        assert_eq!(ids(&public_addresses(&records)), vec![2, 3]);
    }

    // ─── Rare device ────────────────────────────────────────────

    #[test]
    fn rare_device_threshold_is_strict() {
        // 1000 records → threshold 10
        let records = with_devices(&[("Common", 981), ("Exactly", 10), ("Fewer", 9)]);
        assert_eq!(records.len(), 1000);

        let flagged = rare_devices(&records, 0.01);

        assert_eq!(flagged.len(), 9);
        assert!(flagged.iter().all(|r| r.device == "Fewer"));
    }

    #[test]
    fn share_equal_to_ratio_is_not_rare() {
        // 100 * 0.07 rounds to 7.000000000000001
        let records = with_devices(&[("Common", 87), ("Exactly", 7), ("Fewer", 6)]);

        let flagged = rare_devices(&records, 0.07);

        assert_eq!(flagged.len(), 6);
        assert!(flagged.iter().all(|r| r.device == "Fewer"));
    }

    #[test]
    fn tiny_sets_have_no_rare_devices() {
        // threshold 0.05: nothing can occur fewer times
        let records = with_devices(&[("A", 3), ("B", 2)]);
        assert!(rare_devices(&records, 0.01).is_empty());
    }

    #[test]
    fn all_records_of_a_rare_device_are_flagged() {
        let records = with_devices(&[("Common", 300), ("Odd", 2)]);
        let flagged = rare_devices(&records, 0.01);

        assert_eq!(ids(&flagged), vec![301, 302]);
    }

    // ─── Spike days ─────────────────────────────────────────────

    #[test]
    fn single_day_never_spikes() {
        let records = days_with_counts(&[500]);
        assert!(spike_days(&records, 2.0).is_empty());
    }

    #[test]
    fn flat_activity_has_no_spike() {
        let records = days_with_counts(&[4, 4, 4, 4]);
        assert!(spike_days(&records, 2.0).is_empty());
    }

    #[test]
    fn detects_outlier_day() {
        let records = days_with_counts(&[2, 2, 2, 2, 2, 2, 2, 2, 2, 30]);
        let spikes = spike_days(&records, 2.0);

        assert_eq!(spikes.len(), 1);
        assert_eq!(spikes[0].date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(spikes[0].count, 30);
    }

    #[test]
    fn uses_sample_standard_deviation() {
        // counts [1, 1, 1, 5]: mean 2, sample stddev 2 → threshold 6 with sigma 2.
        // Population stddev (√3) would give ≈5.46, still above 5; with sigma 1.5
        // sample gives 5.0 (not exceeded) while population would give ≈4.6.
        let records = days_with_counts(&[1, 1, 1, 5]);
        assert!(spike_days(&records, 2.0).is_empty());
        assert!(spike_days(&records, 1.5).is_empty());
        assert_eq!(spike_days(&records, 1.0).len(), 1);
    }

    // ─── Combined ───────────────────────────────────────────────

    #[test]
    fn detect_on_empty_input_is_no_data() {
        let svc = AnomalyService::new(DetectionConfig::default());
        assert!(svc.detect(&[]).is_none());
    }

    #[test]
    fn record_can_appear_in_several_lists() {
        let mut records = with_devices(&[("Common", 200)]);
        records.push(record(201, "2024-01-01 03:00:00", "8.8.8.8", "Odd"));

        let svc = AnomalyService::new(DetectionConfig::default());
        let report = svc.detect(&records).unwrap();

        assert_eq!(report.off_hours.len(), 1);
        assert_eq!(report.public_ip.len(), 1);
        assert_eq!(report.rare_device.len(), 1);
        assert_eq!(report.off_hours[0].id, 201);
        assert_eq!(report.public_ip[0].id, 201);
        assert_eq!(report.rare_device[0].id, 201);
        assert_eq!(report.flag_count(), 3);
    }

    #[test]
    fn detect_does_not_truncate() {
        let records: Vec<LogRecord> = (1..=50)
            .map(|i| record(i, "2024-01-01 02:00:00", "8.8.8.8", "macOS"))
            .collect();
        let report = AnomalyService::new(DetectionConfig::default())
            .detect(&records)
            .unwrap();

        assert_eq!(report.off_hours.len(), 50);
        assert_eq!(report.public_ip.len(), 50);
    }
}
