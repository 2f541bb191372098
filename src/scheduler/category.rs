//! The closed set of reminder categories and their static content.
//!
//! Preference rows address categories by string key; everything downstream
//! of the wire works with [`ReminderCategory`] so that adding a category
//! forces every match in the crate to be revisited.

use std::fmt;

/// How often a category may be delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// At most once per local calendar day.
    Daily,
    /// At most once per week, on Mondays.
    Weekly,
}

/// In-app destination opened when the user clicks a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppRoute {
    /// The app home screen.
    Home,
    /// The progress view on the profile screen.
    Progress,
}

impl AppRoute {
    /// Route path as the host app understands it.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/home",
            Self::Progress => "/profile/progress",
        }
    }
}

/// Static notification content for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationContent {
    /// Notification title.
    pub title: &'static str,
    /// Notification body text.
    pub body: &'static str,
    /// Icon asset path, relative to the app's static root.
    pub icon: &'static str,
}

/// A known reminder category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReminderCategory {
    /// Daily encouragement message.
    DailyMotivation,
    /// Daily prompt to log progress.
    ProgressCheckin,
    /// Weekly cessation tip, Mondays only.
    WeeklyTip,
}

impl ReminderCategory {
    /// All known categories, in delivery-priority order.
    pub const ALL: [Self; 3] = [Self::DailyMotivation, Self::ProgressCheckin, Self::WeeklyTip];

    /// Map a preference key to its category. Unknown keys return `None`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "daily_motivation" => Some(Self::DailyMotivation),
            "progress_checkin" => Some(Self::ProgressCheckin),
            "weekly_tip" => Some(Self::WeeklyTip),
            _ => None,
        }
    }

    /// The preference key and ledger key for this category.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DailyMotivation => "daily_motivation",
            Self::ProgressCheckin => "progress_checkin",
            Self::WeeklyTip => "weekly_tip",
        }
    }

    /// Delivery cadence.
    #[must_use]
    pub const fn cadence(self) -> Cadence {
        match self {
            Self::DailyMotivation | Self::ProgressCheckin => Cadence::Daily,
            Self::WeeklyTip => Cadence::Weekly,
        }
    }

    /// Static title/body/icon shown for this category.
    #[must_use]
    pub const fn content(self) -> NotificationContent {
        match self {
            Self::DailyMotivation => NotificationContent {
                title: "Daily Motivation",
                body: "Another smoke-free day is within reach. Keep going!",
                icon: "/icons/reminder-motivation.png",
            },
            Self::ProgressCheckin => NotificationContent {
                title: "Progress Check-in",
                body: "Take a minute to log how today went.",
                icon: "/icons/reminder-progress.png",
            },
            Self::WeeklyTip => NotificationContent {
                title: "Weekly Tip",
                body: "Your cessation tip for this week is ready.",
                icon: "/icons/reminder-tip.png",
            },
        }
    }

    /// Where a click on this category's notification navigates.
    #[must_use]
    pub const fn route(self) -> AppRoute {
        match self {
            Self::ProgressCheckin => AppRoute::Progress,
            Self::DailyMotivation | Self::WeeklyTip => AppRoute::Home,
        }
    }
}

impl fmt::Display for ReminderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
