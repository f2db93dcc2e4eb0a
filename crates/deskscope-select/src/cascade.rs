//! Cascading selector resolution.
//!
//! The asset-class list drives the office list, and both drive the desk
//! list. Resolution is a pure function of the desk table and the current
//! selections, recomputed on every interaction.

use crate::choice::{ALL_ASSET_CLASSES, ALL_OFFICES, Choice};
use crate::error::SelectError;
use deskscope_data::{Desk, DeskTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// What the user picked in the three desk selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    /// Asset-class selector.
    pub asset_class: Choice,
    /// Office selector.
    pub office: Choice,
    /// Desk selector; `None` takes the first desk offered.
    pub desk: Option<String>,
}

impl Selections {
    /// Build selections from the labels shown in the selectors.
    pub fn from_labels(asset_class: &str, office: &str, desk: Option<&str>) -> Self {
        Self {
            asset_class: Choice::from_label(asset_class, ALL_ASSET_CLASSES),
            office: Choice::from_label(office, ALL_OFFICES),
            desk: desk.map(str::to_string),
        }
    }
}

/// Option lists for every selector plus the desk they resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorState {
    /// Asset-class options, sentinel first.
    pub asset_classes: Vec<String>,
    /// Office options, sentinel first, then ascending.
    pub offices: Vec<String>,
    /// Desk options, first-seen order, no sentinel.
    pub desks: Vec<String>,
    /// The resolved desk, `None` when no desk is offered.
    pub desk: Option<Desk>,
}

impl SelectorState {
    /// Whether the cascade ended without any desk to show.
    pub const fn is_empty(&self) -> bool {
        self.desk.is_none()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

/// Asset classes in first-seen order, headed by [`ALL_ASSET_CLASSES`].
pub fn asset_class_options(desks: &DeskTable) -> Vec<String> {
    let mut options = vec![ALL_ASSET_CLASSES.to_string()];
    options.extend(distinct(desks.rows().iter().map(|d| d.asset_class.as_str())));
    options
}

/// Offices of desks matching `asset_class`, sorted, headed by [`ALL_OFFICES`].
pub fn office_options(desks: &DeskTable, asset_class: &Choice) -> Vec<String> {
    let mut offices = distinct(
        desks
            .rows()
            .iter()
            .filter(|d| asset_class.matches(&d.asset_class))
            .map(|d| d.office.as_str()),
    );
    offices.sort();

    let mut options = Vec::with_capacity(offices.len() + 1);
    options.push(ALL_OFFICES.to_string());
    options.extend(offices);
    options
}

/// Desk names matching both filters, in first-seen order.
pub fn desk_options(desks: &DeskTable, asset_class: &Choice, office: &Choice) -> Vec<String> {
    distinct(
        desks
            .rows()
            .iter()
            .filter(|d| asset_class.matches(&d.asset_class) && office.matches(&d.office))
            .map(|d| d.desk_name.as_str()),
    )
}

/// Resolve the selector cascade.
///
/// Concrete asset classes and offices must be among the options offered at
/// their level. With no desk named the first offered desk is taken. An empty
/// desk list is not an error: the returned state simply has no desk.
pub fn resolve(desks: &DeskTable, selections: &Selections) -> Result<SelectorState, SelectError> {
    let asset_classes = asset_class_options(desks);
    if let Choice::Only(asset_class) = &selections.asset_class
        && !asset_classes.contains(asset_class)
    {
        return Err(SelectError::UnknownAssetClass(asset_class.clone()));
    }

    let offices = office_options(desks, &selections.asset_class);
    if let Choice::Only(office) = &selections.office
        && !offices.contains(office)
    {
        return Err(SelectError::UnknownOffice {
            office: office.clone(),
            options: offices,
        });
    }

    let desk_names = desk_options(desks, &selections.asset_class, &selections.office);
    let chosen = match &selections.desk {
        Some(name) if !desk_names.contains(name) => {
            return Err(SelectError::UnknownDesk {
                desk: name.clone(),
                options: desk_names,
            });
        }
        Some(name) => Some(name.as_str()),
        None => desk_names.first().map(String::as_str),
    };

    // first row with the name wins; names are assumed unique
    let desk = chosen.and_then(|name| desks.find_by_name(name)).cloned();

    debug!(
        asset_class = selections.asset_class.label(ALL_ASSET_CLASSES),
        office = selections.office.label(ALL_OFFICES),
        desks = desk_names.len(),
        resolved = desk.as_ref().map(|d| d.desk_name.as_str()),
        "resolved selectors"
    );

    Ok(SelectorState {
        asset_classes,
        offices,
        desks: desk_names,
        desk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskscope_data::DeskNo;
    use rstest::{fixture, rstest};

    fn desk(no: i64, name: &str, office: &str, asset_class: &str) -> Desk {
        Desk {
            desk_no: DeskNo::new(no),
            desk_name: name.to_string(),
            desk_head: format!("Head of {name}"),
            office: office.to_string(),
            asset_class: asset_class.to_string(),
            instruments: "Various".to_string(),
        }
    }

    #[fixture]
    fn desks() -> DeskTable {
        DeskTable::new(vec![
            desk(1, "FX Spot", "London", "FX"),
            desk(2, "Swaps", "New York", "Rates"),
            desk(3, "FX Options", "Tokyo", "FX"),
            desk(4, "Gilts", "London", "Rates"),
            desk(5, "FX Forwards", "London", "FX"),
        ])
    }

    #[rstest]
    fn test_asset_classes_first_seen(desks: DeskTable) {
        assert_eq!(
            asset_class_options(&desks),
            [ALL_ASSET_CLASSES, "FX", "Rates"]
        );
    }

    #[rstest]
    #[case(Choice::All, vec![ALL_OFFICES, "London", "New York", "Tokyo"])]
    #[case(Choice::only("FX"), vec![ALL_OFFICES, "London", "Tokyo"])]
    #[case(Choice::only("Rates"), vec![ALL_OFFICES, "London", "New York"])]
    fn test_office_options_sorted(
        desks: DeskTable,
        #[case] asset_class: Choice,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(office_options(&desks, &asset_class), expected);
    }

    #[rstest]
    #[case(Choice::All, Choice::All, vec!["FX Spot", "Swaps", "FX Options", "Gilts", "FX Forwards"])]
    #[case(Choice::only("FX"), Choice::All, vec!["FX Spot", "FX Options", "FX Forwards"])]
    #[case(Choice::All, Choice::only("London"), vec!["FX Spot", "Gilts", "FX Forwards"])]
    #[case(Choice::only("FX"), Choice::only("London"), vec!["FX Spot", "FX Forwards"])]
    #[case(Choice::only("Rates"), Choice::only("Tokyo"), vec![])]
    fn test_desk_options(
        desks: DeskTable,
        #[case] asset_class: Choice,
        #[case] office: Choice,
        #[case] expected: Vec<&str>,
    ) {
        assert_eq!(desk_options(&desks, &asset_class, &office), expected);
    }

    #[rstest]
    fn test_default_resolves_first_desk(desks: DeskTable) {
        let state = resolve(&desks, &Selections::default()).unwrap();
        let desk = state.desk.unwrap();
        assert_eq!(desk.desk_no, DeskNo::new(1));
        assert_eq!(desk.desk_head, "Head of FX Spot");
    }

    #[rstest]
    fn test_named_desk(desks: DeskTable) {
        let selections = Selections::from_labels("Rates", ALL_OFFICES, Some("Gilts"));
        let state = resolve(&desks, &selections).unwrap();
        assert_eq!(state.desks, ["Swaps", "Gilts"]);
        assert_eq!(state.desk.unwrap().desk_no, DeskNo::new(4));
    }

    #[rstest]
    fn test_desk_outside_cascade_rejected(desks: DeskTable) {
        let selections = Selections::from_labels("Rates", ALL_OFFICES, Some("FX Spot"));
        let err = resolve(&desks, &selections).unwrap_err();
        assert!(matches!(err, SelectError::UnknownDesk { desk, .. } if desk == "FX Spot"));
    }

    #[rstest]
    fn test_office_outside_asset_class_rejected(desks: DeskTable) {
        let selections = Selections::from_labels("Rates", "Tokyo", None);
        let err = resolve(&desks, &selections).unwrap_err();
        assert!(matches!(err, SelectError::UnknownOffice { .. }));
    }

    #[rstest]
    fn test_unknown_asset_class_rejected(desks: DeskTable) {
        let selections = Selections::from_labels("Commodities", ALL_OFFICES, None);
        assert_eq!(
            resolve(&desks, &selections).unwrap_err(),
            SelectError::UnknownAssetClass("Commodities".to_string())
        );
    }

    #[test]
    fn test_empty_table_has_no_desk() {
        let state = resolve(&DeskTable::default(), &Selections::default()).unwrap();
        assert!(state.is_empty());
        assert_eq!(state.asset_classes, [ALL_ASSET_CLASSES]);
        assert_eq!(state.offices, [ALL_OFFICES]);
        assert!(state.desks.is_empty());
    }

    #[test]
    fn test_duplicate_names_take_first_row() {
        let desks = DeskTable::new(vec![
            desk(1, "Macro", "London", "FX"),
            desk(2, "Macro", "London", "FX"),
        ]);
        let state = resolve(&desks, &Selections::default()).unwrap();
        assert_eq!(state.desks, ["Macro"]);
        assert_eq!(state.desk.unwrap().desk_no, DeskNo::new(1));
    }
}
