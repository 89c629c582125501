//! Daily cron-style trigger with an explicit lifecycle.
//!
//! The service is constructed by the process entry point, started once, and
//! handed (behind an `Arc`) to the HTTP layer for status queries and manual
//! triggers. There is no module-level scheduler state.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Timelike};
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::ScheduleConfig;
use crate::job::DailyJob;

pub struct SchedulerService {
    schedule: ScheduleConfig,
    job: Arc<DailyJob>,
    shutdown_token: CancellationToken,
}

impl SchedulerService {
    pub fn new(schedule: ScheduleConfig, job: Arc<DailyJob>) -> Self {
        Self {
            schedule,
            job,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Spawn the background tick loop. Wall-clock time is evaluated once per
    /// minute; the job fires when it matches the configured `(hour, minute)`,
    /// at most once per day.
    pub fn start(&self) -> JoinHandle<()> {
        let schedule = self.schedule;
        let job = self.job.clone();
        let shutdown_token = self.shutdown_token.clone();

        info!(
            hour = schedule.hour,
            minute = schedule.minute,
            "scheduler started"
        );

        tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(60));
            let mut last_fired: Option<NaiveDate> = None;

            loop {
                tokio::select! {
                    _ = shutdown_token.cancelled() => {
                        info!("scheduler shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        let now = Local::now();
                        if should_fire(schedule, now, last_fired) {
                            last_fired = Some(now.date_naive());
                            job.run().await;
                        }
                    }
                }
            }
        })
    }

    /// Request shutdown of the tick loop. A job run already in progress is
    /// not cancelled.
    pub fn stop(&self) {
        self.shutdown_token.cancel();
    }

    /// Run the job immediately on the caller's task. Fully independent of the
    /// schedule: no lockout and no debounce, so a manual trigger overlapping
    /// the scheduled fire produces a second pair of notifications. Accepted
    /// limitation, not prevented.
    pub async fn trigger_now(&self) {
        info!("manual trigger");
        self.job.run().await;
    }

    /// The next local wall-clock instant the schedule will fire, for the
    /// status endpoint.
    pub fn next_run_time(&self) -> DateTime<Local> {
        next_run_after(self.schedule, Local::now())
    }
}

/// True when `now` lands in the scheduled minute and the job has not already
/// fired today. The per-day guard keeps a tick that lands twice in one minute
/// from double-firing.
fn should_fire(schedule: ScheduleConfig, now: DateTime<Local>, last_fired: Option<NaiveDate>) -> bool {
    now.hour() == u32::from(schedule.hour)
        && now.minute() == u32::from(schedule.minute)
        && last_fired != Some(now.date_naive())
}

/// First instant strictly after `now` matching the schedule. On DST
/// transitions where the scheduled minute is ambiguous or absent, the
/// earliest valid interpretation on the next possible day wins.
fn next_run_after(schedule: ScheduleConfig, now: DateTime<Local>) -> DateTime<Local> {
    let mut date = now.date_naive();
    loop {
        let naive = date
            .and_hms_opt(u32::from(schedule.hour), u32::from(schedule.minute), 0)
            .expect("validated schedule");
        if let Some(candidate) = Local.from_local_datetime(&naive).earliest() {
            if candidate > now {
                return candidate;
            }
        }
        date = date.succ_opt().expect("date overflow computing next run");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn schedule(hour: u8, minute: u8) -> ScheduleConfig {
        ScheduleConfig::new(hour, minute).unwrap()
    }

    fn local(s: &str) -> DateTime<Local> {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap()
    }

    #[test]
    fn fires_in_matching_minute() {
        let now = local("2024-03-07 15:45:02");
        assert!(should_fire(schedule(15, 45), now, None));
    }

    #[test]
    fn does_not_fire_outside_matching_minute() {
        assert!(!should_fire(schedule(15, 45), local("2024-03-07 15:44:59"), None));
        assert!(!should_fire(schedule(15, 45), local("2024-03-07 16:45:00"), None));
    }

    #[test]
    fn fires_at_most_once_per_day() {
        let now = local("2024-03-07 15:45:30");
        let fired_today = Some(now.date_naive());
        assert!(!should_fire(schedule(15, 45), now, fired_today));

        let fired_yesterday = now.date_naive().pred_opt();
        assert!(should_fire(schedule(15, 45), now, fired_yesterday));
    }

    #[test]
    fn next_run_is_today_when_still_ahead() {
        let now = local("2024-03-07 09:00:00");
        let next = next_run_after(schedule(15, 45), now);
        assert_eq!(next, local("2024-03-07 15:45:00"));
    }

    #[test]
    fn next_run_rolls_to_tomorrow_once_passed() {
        let now = local("2024-03-07 15:45:00");
        let next = next_run_after(schedule(15, 45), now);
        assert_eq!(next, local("2024-03-08 15:45:00"));
    }

    #[test]
    fn next_run_at_midnight_schedule() {
        let now = local("2024-03-07 00:00:01");
        let next = next_run_after(schedule(0, 0), now);
        assert_eq!(next, local("2024-03-08 00:00:00"));
    }
}
