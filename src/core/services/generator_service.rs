use chrono::{Duration, NaiveDateTime, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::core::errors::{LogsightError, Result};
use crate::core::models::log_record::NewLogRecord;

pub const ACTIONS: [&str; 8] = [
    "login",
    "logout",
    "upload_file",
    "download_file",
    "delete_file",
    "view_dashboard",
    "update_profile",
    "send_message",
];

pub const DEVICES: [&str; 8] = [
    "Windows 11",
    "Windows 10",
    "Ubuntu Linux",
    "macOS",
    "iPhone 15",
    "Samsung Galaxy S23",
    "iPad Pro",
    "Android Tablet",
];

/// Generated usernames run from `user1` to `user{USER_POOL}`.
pub const USER_POOL: u32 = 998;

/// Produces synthetic activity records for demos and load testing.
///
/// Timestamps fall between `now - days` and roughly `now + 1 day`;
/// addresses are random IPv4 with every octet in 1..=255, so most
/// of them are public.
pub struct GeneratorService {
    rng: StdRng,
    start: NaiveDateTime,
    days: i64,
}

impl GeneratorService {
    /// A seed makes the output reproducible; `None` draws from OS entropy.
    ///
    /// Fails when the window `[now - days, now + 1 day]` is not representable.
    pub fn new(seed: Option<u64>, now: NaiveDateTime, days: u32) -> Result<Self> {
        let now = now.with_nanosecond(0).unwrap_or(now);
        let days = i64::from(days);

        let out_of_range = || LogsightError::InvalidArgument {
            detail: format!("--days {days} reaches outside the supported date range"),
        };
        let start = Duration::try_days(days)
            .and_then(|span| now.checked_sub_signed(span))
            .ok_or_else(out_of_range)?;
        now.checked_add_signed(Duration::seconds(86_400))
            .ok_or_else(out_of_range)?;

        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(Self { rng, start, days })
    }

    pub fn next_record(&mut self) -> NewLogRecord {
        let offset = Duration::days(self.rng.gen_range(0..=self.days))
            + Duration::seconds(self.rng.gen_range(0..=86_400));

        NewLogRecord {
            username: format!("user{}", self.rng.gen_range(1..=USER_POOL)),
            action: pick(&mut self.rng, &ACTIONS),
            // bounded by the window checked in `new`
            timestamp: self.start.checked_add_signed(offset).unwrap_or(self.start),
            ip_address: self.random_ipv4(),
            device: pick(&mut self.rng, &DEVICES),
        }
    }

    pub fn batch(&mut self, size: usize) -> Vec<NewLogRecord> {
        (0..size).map(|_| self.next_record()).collect()
    }

    fn random_ipv4(&mut self) -> String {
        let octets: [u8; 4] = std::array::from_fn(|_| self.rng.gen_range(1..=255));
        format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
    }
}

fn pick(rng: &mut StdRng, choices: &[&str]) -> String {
    choices.choose(rng).copied().unwrap_or_default().to_string()
}
