use std::{
    sync::Arc,
    time::Duration,
};

use chrono::{
    Days,
    Local,
    NaiveDate,
    TimeZone,
};

use crate::{
    core::{
        utils::{
            local_date,
            start_of_day,
        },
        AttemptEvent,
        Clock,
        KanaError,
    },
    mastery::{
        GrowthLevel,
        KanaStore,
    },
};

/// Longest trailing window `daily_counts` reports, one leap year.
pub const MAX_DAILY_WINDOW: usize = 366;

/// Number of mastery records at each growth level. Every level is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GrowthCounts([u32; 6]);

impl GrowthCounts {
    pub fn get(&self, level: GrowthLevel) -> u32 {
        self.0[level.value() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (GrowthLevel, u32)> + '_ {
        GrowthLevel::ALL.iter().map(|level| (*level, self.get(*level)))
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    fn add(&mut self, level: GrowthLevel) {
        self.0[level.value() as usize] += 1;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodayStats {
    pub elapsed: Duration,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsOverview {
    pub growth: GrowthCounts,
    pub recent: Vec<AttemptEvent>,
    pub daily: Vec<DailyCount>,
    pub total_study_time: Duration,
    pub total_attempts: usize,
    pub today: TodayStats,
}

/// Read-only aggregations over the event log and the mastery records.
/// Day boundaries are calendar days in `tz`.
pub struct StatisticsReporter<Tz: TimeZone = Local> {
    store: Arc<dyn KanaStore>,
    clock: Arc<dyn Clock>,
    tz: Tz,
}

impl StatisticsReporter<Local> {
    pub fn new(store: Arc<dyn KanaStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_timezone(store, clock, Local)
    }
}

impl<Tz: TimeZone> StatisticsReporter<Tz> {
    pub fn with_timezone(store: Arc<dyn KanaStore>, clock: Arc<dyn Clock>, tz: Tz) -> Self {
        Self { store, clock, tz }
    }

    pub async fn growth_counts(&self) -> Result<GrowthCounts, KanaError> {
        let mut counts = GrowthCounts::default();
        for record in self.store.all_records().await? {
            counts.add(record.growth_level());
        }
        Ok(counts)
    }

    /// The `limit` most recent events, newest first.
    pub async fn recent_events(&self, limit: usize) -> Result<Vec<AttemptEvent>, KanaError> {
        let events = self.store.events_since(None).await?;
        Ok(events.into_iter().rev().take(limit).collect())
    }

    /// Attempts per calendar day for the trailing `days` days ending today,
    /// oldest first. Days without attempts are reported as zero. Windows
    /// longer than [`MAX_DAILY_WINDOW`] are rejected.
    pub async fn daily_counts(&self, days: usize) -> Result<Vec<DailyCount>, KanaError> {
        if days == 0 {
            return Ok(Vec::new());
        }
        if days > MAX_DAILY_WINDOW {
            return Err(KanaError::InvalidInput(format!(
                "daily window of {} days exceeds the {} day limit",
                days, MAX_DAILY_WINDOW
            )));
        }

        let today = local_date(&self.clock.now(), &self.tz);
        let first = today.checked_sub_days(Days::new(days as u64 - 1)).unwrap_or(NaiveDate::MIN);

        let mut counts: Vec<DailyCount> =
            first.iter_days().take(days).map(|date| DailyCount { date, count: 0 }).collect();

        let since = start_of_day(first, &self.tz);
        for event in self.store.events_since(Some(since)).await? {
            let date = local_date(&event.timestamp, &self.tz);
            let offset = (date - first).num_days();
            if offset >= 0 {
                if let Some(day) = counts.get_mut(offset as usize) {
                    day.count += 1;
                }
            }
        }
        Ok(counts)
    }

    pub async fn total_study_time(&self) -> Result<Duration, KanaError> {
        let events = self.store.events_since(None).await?;
        Ok(events.iter().map(AttemptEvent::elapsed).sum())
    }

    pub async fn total_attempts(&self) -> Result<usize, KanaError> {
        self.store.event_count().await
    }

    /// Time spent and attempts made since local midnight.
    pub async fn today(&self) -> Result<TodayStats, KanaError> {
        let today = local_date(&self.clock.now(), &self.tz);
        let events = self.store.events_since(Some(start_of_day(today, &self.tz))).await?;

        Ok(TodayStats {
            elapsed: events.iter().map(AttemptEvent::elapsed).sum(),
            count: events.len() as u32,
        })
    }

    pub async fn overview(
        &self,
        recent_limit: usize,
        daily_window: usize,
    ) -> Result<StatsOverview, KanaError> {
        let (growth, recent, daily, total_study_time, total_attempts, today) = futures::try_join!(
            self.growth_counts(),
            self.recent_events(recent_limit),
            self.daily_counts(daily_window),
            self.total_study_time(),
            self.total_attempts(),
            self.today(),
        )?;

        Ok(StatsOverview { growth, recent, daily, total_study_time, total_attempts, today })
    }
}
