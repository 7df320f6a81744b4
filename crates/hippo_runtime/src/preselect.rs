//! Named filter presets for the statistics views.
//!
//! Each view mode offers its own catalog. Labels shared between the catalogs
//! carry over when the user switches mode; the rest fall back to the default
//! entry of the target catalog.

use serde::Serialize;

/// Selection lists a preset applies when activated. Platform chains are never
/// part of a preset; the platform choice survives preset changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FilteredItems {
    /// Consumer ids to select.
    pub consumers: &'static [i32],
    /// Producer ids to select.
    pub producers: &'static [i32],
    /// Logical address ids to select.
    pub logical_addresses: &'static [i32],
    /// Contract ids to select.
    pub contracts: &'static [i32],
    /// Domain ids to select.
    pub domains: &'static [i32],
}

/// A labelled preset in one of the statistics view catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewPreselect {
    /// Display label, also the lookup key.
    pub label: &'static str,
    /// Selections the preset stands for.
    pub filtered_items: FilteredItems,
}

const NO_ITEMS: FilteredItems = FilteredItems {
    consumers: &[],
    producers: &[],
    logical_addresses: &[],
    contracts: &[],
    domains: &[],
};

/// Presets for the simple statistics view. The first entry is the default.
pub const SIMPLE_VIEW_PRESELECTS: &[ViewPreselect] = &[
    ViewPreselect {
        label: "Översikt",
        filtered_items: NO_ITEMS,
    },
    ViewPreselect {
        label: "Journalen",
        filtered_items: FilteredItems {
            consumers: &[865],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[],
        },
    },
    ViewPreselect {
        label: "Nationell patientöversikt",
        filtered_items: FilteredItems {
            consumers: &[434],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[],
        },
    },
    ViewPreselect {
        label: "Remisser",
        filtered_items: FilteredItems {
            consumers: &[],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[115, 116],
        },
    },
    ViewPreselect {
        label: "Tidbokningar",
        filtered_items: FilteredItems {
            consumers: &[],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[13],
        },
    },
    ViewPreselect {
        label: "Listning",
        filtered_items: FilteredItems {
            consumers: &[],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[142],
        },
    },
];

/// Presets for the advanced statistics view. The first entry is the default.
pub const ADVANCED_VIEW_PRESELECTS: &[ViewPreselect] = &[
    ViewPreselect {
        label: "Översikt",
        filtered_items: NO_ITEMS,
    },
    ViewPreselect {
        label: "Journalen",
        filtered_items: FilteredItems {
            consumers: &[865],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[],
        },
    },
    ViewPreselect {
        label: "Nationell patientöversikt",
        filtered_items: FilteredItems {
            consumers: &[434],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[],
        },
    },
    ViewPreselect {
        label: "Remisser",
        filtered_items: FilteredItems {
            consumers: &[],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[115, 116],
        },
    },
    ViewPreselect {
        label: "Tidbokningar",
        filtered_items: FilteredItems {
            consumers: &[],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[13],
        },
    },
    ViewPreselect {
        label: "Infektionsverktyget",
        filtered_items: FilteredItems {
            consumers: &[],
            producers: &[],
            logical_addresses: &[],
            contracts: &[],
            domains: &[71],
        },
    },
];

/// Default preset of the simple view catalog.
pub fn simple_view_default() -> ViewPreselect {
    SIMPLE_VIEW_PRESELECTS[0]
}

/// Default preset of the advanced view catalog.
pub fn advanced_view_default() -> ViewPreselect {
    ADVANCED_VIEW_PRESELECTS[0]
}

/// Looks up a simple-view preset by label.
pub fn simple_view_preselect(label: &str) -> Option<ViewPreselect> {
    SIMPLE_VIEW_PRESELECTS
        .iter()
        .find(|preset| preset.label == label)
        .copied()
}

/// Looks up an advanced-view preset by label.
pub fn advanced_view_preselect(label: &str) -> Option<ViewPreselect> {
    ADVANCED_VIEW_PRESELECTS
        .iter()
        .find(|preset| preset.label == label)
        .copied()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults_are_the_empty_overview() {
        assert_eq!(simple_view_default().label, "Översikt");
        assert_eq!(advanced_view_default().label, "Översikt");
        assert_eq!(simple_view_default().filtered_items, NO_ITEMS);
    }

    #[test]
    fn shared_labels_exist_in_both_catalogs() {
        for label in ["Översikt", "Journalen", "Nationell patientöversikt"] {
            let simple = simple_view_preselect(label).unwrap();
            let advanced = advanced_view_preselect(label).unwrap();
            assert_eq!(simple.filtered_items, advanced.filtered_items);
        }
    }

    #[test]
    fn exclusive_labels_stay_in_their_catalog() {
        assert!(simple_view_preselect("Listning").is_some());
        assert!(advanced_view_preselect("Listning").is_none());
        assert!(advanced_view_preselect("Infektionsverktyget").is_some());
        assert!(simple_view_preselect("Infektionsverktyget").is_none());
    }

    #[test]
    fn unknown_labels_find_nothing() {
        assert!(simple_view_preselect("Okänd vy").is_none());
    }
}
