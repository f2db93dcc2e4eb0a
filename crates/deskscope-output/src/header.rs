//! Desk header lines shown above the charts.

use deskscope_data::{Desk, DeskNo};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributes of the resolved desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskHeader {
    /// Desk number.
    pub desk_no: DeskNo,
    /// Desk name.
    pub desk_name: String,
    /// Desk head.
    pub desk_head: String,
    /// Office.
    pub office: String,
    /// Instruments traded.
    pub instruments: String,
}

impl DeskHeader {
    /// The two header lines.
    pub fn lines(&self) -> [String; 2] {
        [
            format!("Desk: {} | Desk head: {}", self.desk_name, self.desk_head),
            format!("Office: {} | Instruments: {}", self.office, self.instruments),
        ]
    }
}

impl From<&Desk> for DeskHeader {
    fn from(desk: &Desk) -> Self {
        Self {
            desk_no: desk.desk_no,
            desk_name: desk.desk_name.clone(),
            desk_head: desk.desk_head.clone(),
            office: desk.office.clone(),
            instruments: desk.instruments.clone(),
        }
    }
}

impl fmt::Display for DeskHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [desk, office] = self.lines();
        writeln!(f, "{desk}")?;
        write!(f, "{office}")
    }
}
