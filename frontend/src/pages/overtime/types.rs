use chrono_tz::Tz;

use crate::api::{OvertimeRecord, UserRef};
use crate::utils::time::format_epoch_date;

pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OvertimeStatus {
    Pending,
    Approved,
    Rejected,
    Other(String),
}

impl OvertimeStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Pending" => Self::Pending,
            "Approved" => Self::Approved,
            "Rejected" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }

    pub fn color(&self) -> StatusColor {
        match self {
            Self::Approved => StatusColor::Green,
            Self::Rejected => StatusColor::Red,
            Self::Pending | Self::Other(_) => StatusColor::Blue,
        }
    }

    /// Approve/Reject is offered for Pending and Rejected entries only.
    pub fn accepts_decision(&self) -> bool {
        matches!(self, Self::Pending | Self::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Blue,
    Green,
    Red,
}

impl StatusColor {
    pub fn classes(self) -> &'static str {
        match self {
            StatusColor::Blue => "bg-blue-50 text-blue-700 border-blue-300",
            StatusColor::Green => "bg-green-50 text-green-700 border-green-300",
            StatusColor::Red => "bg-red-50 text-red-700 border-red-300",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Reject,
}

impl ApprovalDecision {
    pub fn target_status(self) -> OvertimeStatus {
        match self {
            ApprovalDecision::Approve => OvertimeStatus::Approved,
            ApprovalDecision::Reject => OvertimeStatus::Rejected,
        }
    }

    pub fn verb(self) -> &'static str {
        match self {
            ApprovalDecision::Approve => "Approve",
            ApprovalDecision::Reject => "Reject",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    /// The viewer created the entries; the counterparty is the approver.
    Owner,
    /// The entries await the viewer's decision; the counterparty is the creator.
    Approver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub align: Align,
}

const fn column(title: &'static str, align: Align) -> Column {
    Column { title, align }
}

const OWNER_COLUMNS: [Column; 7] = [
    column("Date", Align::Left),
    column("Time Worked", Align::Center),
    column("Duration", Align::Center),
    column("Description", Align::Left),
    column("Approver", Align::Left),
    column("Status", Align::Center),
    column("Action", Align::Center),
];

const APPROVER_COLUMNS: [Column; 7] = [
    column("Name", Align::Left),
    column("Date", Align::Center),
    column("Time Worked", Align::Center),
    column("Duration", Align::Center),
    column("Description", Align::Left),
    column("Status", Align::Center),
    column("Action", Align::Center),
];

impl ViewerRole {
    pub fn columns(self) -> &'static [Column] {
        match self {
            ViewerRole::Owner => &OWNER_COLUMNS,
            ViewerRole::Approver => &APPROVER_COLUMNS,
        }
    }

    fn counterparty(self, record: &OvertimeRecord) -> Option<&UserRef> {
        match self {
            ViewerRole::Owner => record.approver.as_ref(),
            ViewerRole::Approver => record.creator.as_ref(),
        }
    }
}

/// One table row, derived from an [`OvertimeRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct OvertimeRow {
    pub id: String,
    pub date: String,
    pub time_worked: String,
    pub duration: String,
    pub description: String,
    pub counterparty_name: String,
    pub status: OvertimeStatus,
}

impl OvertimeRow {
    pub fn project(record: &OvertimeRecord, role: ViewerRole, tz: Tz) -> Self {
        Self {
            id: record.id.clone(),
            date: format_epoch_date(record.date, tz),
            time_worked: format!("{} - {}", record.start_time, record.end_time),
            duration: record.duration.clone(),
            description: record.description.clone(),
            counterparty_name: role
                .counterparty(record)
                .map(UserRef::display_name)
                .unwrap_or_default(),
            status: OvertimeStatus::parse(&record.status),
        }
    }

    pub fn status_label(&self) -> String {
        self.status.as_str().to_uppercase()
    }
}

pub fn project_rows(records: &[OvertimeRecord], role: ViewerRole, tz: Tz) -> Vec<OvertimeRow> {
    records
        .iter()
        .map(|record| OvertimeRow::project(record, role, tz))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl Pagination {
    pub fn new(page: usize, total: usize) -> Self {
        let mut pagination = Self {
            page,
            page_size: PAGE_SIZE,
            total,
        };
        pagination.page = page.clamp(1, pagination.page_count());
        pagination
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = ((self.page - 1) * self.page_size).min(rows.len());
        let end = (start + self.page_size).min(rows.len());
        &rows[start..end]
    }
}
