//! Mock video-meeting link generation for interview scheduling

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

use crate::error::JobMatcherError;

/// Default simulated provider latency
pub const DEFAULT_DELAY: Duration = Duration::from_millis(800);

/// Source of time and delays, so tests can skip real waiting
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Wall-clock time and tokio timers
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingPlatform {
    Zoom,
    GoogleMeet,
    Teams,
}

impl FromStr for MeetingPlatform {
    type Err = JobMatcherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zoom" => Ok(Self::Zoom),
            "google-meet" | "meet" | "google" => Ok(Self::GoogleMeet),
            "teams" | "microsoft-teams" => Ok(Self::Teams),
            other => Err(JobMatcherError::InvalidInput(format!(
                "Unknown meeting platform: {}. Supported: zoom, google-meet, teams",
                other
            ))),
        }
    }
}

impl fmt::Display for MeetingPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Zoom => write!(f, "Zoom"),
            Self::GoogleMeet => write!(f, "Google Meet"),
            Self::Teams => write!(f, "Microsoft Teams"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingLink {
    pub platform: MeetingPlatform,
    pub title: String,
    pub url: String,
    pub meeting_id: String,
    pub passcode: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct MeetingLinkGenerator<C: Clock> {
    clock: C,
    delay: Duration,
}

impl Default for MeetingLinkGenerator<TokioClock> {
    fn default() -> Self {
        Self::new(TokioClock)
    }
}

impl<C: Clock> MeetingLinkGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Produce a link after one simulated provider round-trip.
    /// The wait always completes; there is no retry or cancellation.
    pub async fn generate(&self, platform: MeetingPlatform, title: &str) -> MeetingLink {
        self.clock.sleep(self.delay).await;

        let seed = Uuid::new_v4();
        let bytes = seed.as_bytes();

        let (url, meeting_id, passcode) = match platform {
            MeetingPlatform::Zoom => {
                let id = digits(bytes, 10);
                let pwd = seed.simple().to_string()[..16].to_string();
                (
                    format!("https://zoom.us/j/{}?pwd={}", id, pwd),
                    id,
                    Some(digits(&bytes[8..], 6)),
                )
            }
            MeetingPlatform::GoogleMeet => {
                let code = format!(
                    "{}-{}-{}",
                    letters(&bytes[0..3]),
                    letters(&bytes[3..7]),
                    letters(&bytes[7..10])
                );
                (format!("https://meet.google.com/{}", code), code, None)
            }
            MeetingPlatform::Teams => {
                let id = seed.simple().to_string();
                (
                    format!("https://teams.microsoft.com/l/meetup-join/19%3ameeting_{}%40thread.v2/0", id),
                    id,
                    Some(digits(&bytes[4..], 6)),
                )
            }
        };

        MeetingLink {
            platform,
            title: title.to_string(),
            url,
            meeting_id,
            passcode,
            created_at: self.clock.now(),
        }
    }
}

fn digits(bytes: &[u8], len: usize) -> String {
    bytes
        .iter()
        .cycle()
        .take(len)
        .enumerate()
        .map(|(i, b)| {
            // no leading zero
            let d = if i == 0 { 1 + b % 9 } else { b % 10 };
            char::from(b'0' + d)
        })
        .collect()
}

fn letters(bytes: &[u8]) -> String {
    bytes.iter().map(|b| char::from(b'a' + b % 26)).collect()
}
