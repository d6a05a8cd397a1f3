//! Clock state: face selection, hand geometry and the 1 Hz ticker.

use chrono::{DateTime, Local, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// How the clock is drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClockFace {
    #[default]
    Digital,
    Analog,
}

impl ClockFace {
    pub fn toggled(self) -> Self {
        match self {
            ClockFace::Digital => ClockFace::Analog,
            ClockFace::Analog => ClockFace::Digital,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ClockFace::Digital => "Digital",
            ClockFace::Analog => "Analog",
        }
    }
}

/// 12-hour or 24-hour digital display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HourFormat {
    #[default]
    #[serde(rename = "12h")]
    Twelve,
    #[serde(rename = "24h")]
    TwentyFour,
}

/// Digital rendering, e.g. "09:05:03 PM"
pub fn format_digital(time: NaiveTime, format: HourFormat) -> String {
    match format {
        HourFormat::Twelve => time.format("%I:%M:%S %p").to_string(),
        HourFormat::TwentyFour => time.format("%H:%M:%S").to_string(),
    }
}

/// Hand angles in degrees, clockwise from twelve o'clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn at(time: NaiveTime) -> Self {
        let hour = f64::from(time.hour() % 12);
        let minute = f64::from(time.minute());
        let second = f64::from(time.second());
        Self {
            hour: hour * 30.0 + minute * 0.5,
            minute: minute * 6.0,
            second: second * 6.0,
        }
    }
}

/// Tip of a hand of `length` at `degrees`, in a y-up plane centered on
/// the pivot
pub fn hand_tip(degrees: f64, length: f64) -> (f64, f64) {
    let radians = degrees.to_radians();
    (radians.sin() * length, radians.cos() * length)
}

/// Periodic wall-clock ticks from a background task.
///
/// The task stops when the ticker is dropped.
pub struct ClockTicker {
    rx: mpsc::UnboundedReceiver<DateTime<Local>>,
    handle: JoinHandle<()>,
}

impl ClockTicker {
    /// Start ticking every `period`. Must be called inside a tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(Local::now()).is_err() {
                    break; // Receiver dropped
                }
            }
        });
        tracing::debug!("Clock ticker started ({:?})", period);
        Self { rx, handle }
    }

    /// Most recent tick since the last call, if any
    pub fn latest(&mut self) -> Option<DateTime<Local>> {
        let mut latest = None;
        while let Ok(now) = self.rx.try_recv() {
            latest = Some(now);
        }
        latest
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!("Clock ticker stopped");
    }
}
