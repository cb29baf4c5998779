use chrono::{DateTime, Duration, NaiveTime, Utc};
use tokio::sync::mpsc::Sender;
use tracing::{info, warn};

use crate::jobs::Job;

/// Next occurrence of `hour:minute` UTC strictly after `now`.
pub fn next_run_after(now: DateTime<Utc>, hour: u32, minute: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let today = now.date_naive().and_time(time).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// Enqueues a full batch run every day at `hour:minute` UTC until the worker
/// goes away.
pub async fn run_daily(tx: Sender<Job>, hour: u32, minute: u32) {
    loop {
        let now = Utc::now();
        let next = next_run_after(now, hour, minute);
        info!("Next scheduled risk calculation at {}", next);

        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        if tx.send(Job::CalculateAll { score_date: None }).await.is_err() {
            warn!("Risk worker is gone, stopping scheduler");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_next_run_later_today() {
        let now = Utc.with_ymd_and_hms(2024, 8, 20, 3, 15, 0).unwrap();
        assert_eq!(
            next_run_after(now, 6, 0),
            Utc.with_ymd_and_hms(2024, 8, 20, 6, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_next_run_rolls_to_tomorrow() {
        let now = Utc.with_ymd_and_hms(2024, 8, 20, 6, 0, 0).unwrap();
        assert_eq!(
            next_run_after(now, 6, 0),
            Utc.with_ymd_and_hms(2024, 8, 21, 6, 0, 0).unwrap()
        );

        let late = Utc.with_ymd_and_hms(2024, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(
            next_run_after(late, 6, 30),
            Utc.with_ymd_and_hms(2025, 1, 1, 6, 30, 0).unwrap()
        );
    }
}
