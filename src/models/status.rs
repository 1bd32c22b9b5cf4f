use serde::Serialize;

/// Where the day is worked. Decided by the first clock-in (or manual entry)
/// of the day and never changed by later stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkMode {
    Office, // O
    Home,   // H
}

impl WorkMode {
    pub fn from_home_flag(home: bool) -> Self {
        if home { WorkMode::Home } else { WorkMode::Office }
    }

    pub fn code(&self) -> &'static str {
        match self {
            WorkMode::Office => "O",
            WorkMode::Home => "H",
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        self.code()
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "O" => Some(WorkMode::Office),
            "H" => Some(WorkMode::Home),
            _ => None,
        }
    }

    /// Travel time is only credited for days at the office.
    pub fn applies_travel_offset(&self) -> bool {
        matches!(self, WorkMode::Office)
    }
}

/// Day status as shown to the user and stored in `days.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayStatus {
    None,
    Home,
    Office,
    Sick,
}

impl DayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayStatus::None => "",
            DayStatus::Home => "Home",
            DayStatus::Office => "Office",
            DayStatus::Sick => "Sick",
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            DayStatus::None => "",
            DayStatus::Home => "home",
            DayStatus::Office => "office",
            DayStatus::Sick => "sick",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "" => Some(DayStatus::None),
            "home" => Some(DayStatus::Home),
            "office" => Some(DayStatus::Office),
            "sick" => Some(DayStatus::Sick),
            _ => None,
        }
    }
}
