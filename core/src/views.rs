//! Flattened view models consumed by the address-book UI.
//!
//! # Design
//! Each raw record maps to exactly one view model, so parsed lists stay
//! positionally 1:1 with the `objects` array they came from. The mapping
//! itself never fails: required structure is enforced one stage earlier,
//! during deserialization, which is where records missing `org_data` or its
//! inner fields are rejected.

use serde::{Deserialize, Serialize};

use crate::types::{LocationRecord, OrgUnitRef, UserRecord};

/// A directory user flattened for display.
///
/// Nullable wire fields stay `Option` here; the UI renders absent values as
/// blanks. `org_search` and `visible` are derived, not served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: Option<String>,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
    pub employee_id: Option<String>,
    pub phone_landline: Option<String>,
    pub phone_extension: Option<String>,
    pub phone_mobile: Option<String>,
    pub cc_code: Option<String>,
    pub cc_name: Option<String>,
    pub location_id: Option<i64>,
    pub location_name: Option<String>,
    pub location_address: Option<String>,
    pub location_pobox: Option<String>,
    pub location_phone: Option<String>,
    pub location_fax: Option<String>,
    pub photo_url: Option<String>,
    pub org_units: Vec<OrgUnitRef>,
    /// Space-joined unit names and acronyms, precomputed for the UI's
    /// client-side search box.
    pub org_search: String,
    /// UI visibility toggle. Every freshly parsed user starts visible; the
    /// UI flips this as search terms narrow the list.
    pub visible: bool,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        let org_search = org_search_string(&record.org_data.units);
        User {
            id: record.pk,
            name: record.name,
            preferred_name: record.preferred_name,
            email: record.email,
            username: record.username,
            title: record.title,
            employee_id: record.employee_id,
            phone_landline: record.telephone,
            phone_extension: record.extension,
            phone_mobile: record.mobile_phone,
            cc_code: record.org_data.cost_centre.code,
            cc_name: record.org_data.cost_centre.name,
            location_id: record.location_id,
            location_name: record.location_name,
            location_address: record.location_address,
            location_pobox: record.location_pobox,
            location_phone: record.location_phone,
            location_fax: record.location_fax,
            photo_url: record.photo_ad,
            org_units: record.org_data.units,
            org_search,
            visible: true,
        }
    }
}

/// Join every unit's name and acronym with single spaces, in listing order.
/// Units without an acronym contribute just their name.
fn org_search_string(units: &[OrgUnitRef]) -> String {
    units
        .iter()
        .map(|unit| match &unit.acronym {
            Some(acronym) => format!("{} {}", unit.name, acronym),
            None => unit.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A physical site flattened for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Location {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub wkt_geom: Option<String>,
    pub info_url: Option<String>,
    pub bandwidth_url: Option<String>,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        Location {
            id: record.pk,
            name: record.name,
            email: record.email,
            address: record.address,
            phone: record.phone,
            fax: record.fax,
            wkt_geom: record.point,
            info_url: record.url,
            bandwidth_url: record.bandwidth_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CostCentreRef, OrgData};

    fn unit(name: &str, acronym: Option<&str>) -> OrgUnitRef {
        OrgUnitRef {
            name: name.to_string(),
            acronym: acronym.map(str::to_string),
        }
    }

    fn bare_record() -> UserRecord {
        UserRecord {
            pk: 1,
            name: None,
            preferred_name: None,
            email: None,
            username: None,
            title: None,
            employee_id: None,
            telephone: None,
            extension: None,
            mobile_phone: None,
            org_data: OrgData {
                cost_centre: CostCentreRef {
                    code: None,
                    name: None,
                },
                units: Vec::new(),
            },
            location_id: None,
            location_name: None,
            location_address: None,
            location_pobox: None,
            location_phone: None,
            location_fax: None,
            photo_ad: None,
        }
    }

    #[test]
    fn org_search_joins_units_in_listing_order() {
        assert_eq!(
            org_search_string(&[unit("Parks and Wildlife Service", Some("PWS")), unit("Swan Region", Some("SWR"))]),
            "Parks and Wildlife Service PWS Swan Region SWR"
        );
    }

    #[test]
    fn org_search_unit_without_acronym_contributes_just_its_name() {
        assert_eq!(
            org_search_string(&[unit("Directorate", None), unit("Swan Region", Some("SWR"))]),
            "Directorate Swan Region SWR"
        );
    }

    #[test]
    fn org_search_is_empty_for_no_units() {
        assert_eq!(org_search_string(&[]), "");
    }

    #[test]
    fn user_mapping_flattens_and_renames() {
        let mut record = bare_record();
        record.pk = 42;
        record.telephone = Some("9219 9000".to_string());
        record.extension = Some("8600".to_string());
        record.mobile_phone = Some("0400 111 222".to_string());
        record.org_data.cost_centre.code = Some("520".to_string());
        record.org_data.cost_centre.name = Some("Fire Management Services".to_string());
        record.org_data.units = vec![unit("Swan Region", Some("SWR"))];
        record.photo_ad = Some("https://example.org/photo.jpg".to_string());

        let user = User::from(record);
        assert_eq!(user.id, 42);
        assert_eq!(user.phone_landline.as_deref(), Some("9219 9000"));
        assert_eq!(user.phone_extension.as_deref(), Some("8600"));
        assert_eq!(user.phone_mobile.as_deref(), Some("0400 111 222"));
        assert_eq!(user.cc_code.as_deref(), Some("520"));
        assert_eq!(user.cc_name.as_deref(), Some("Fire Management Services"));
        assert_eq!(user.photo_url.as_deref(), Some("https://example.org/photo.jpg"));
        assert_eq!(user.org_units, vec![unit("Swan Region", Some("SWR"))]);
        assert_eq!(user.org_search, "Swan Region SWR");
    }

    #[test]
    fn every_mapped_user_starts_visible() {
        assert!(User::from(bare_record()).visible);
    }

    #[test]
    fn location_mapping_renames_point_and_urls() {
        let record = LocationRecord {
            pk: 5,
            name: Some("Kensington Headquarters".to_string()),
            email: None,
            address: Some("17 Dick Perry Ave".to_string()),
            phone: None,
            fax: None,
            point: Some("POINT (115.884 -31.994)".to_string()),
            url: Some("https://example.org/kensington".to_string()),
            bandwidth_url: None,
        };

        let location = Location::from(record);
        assert_eq!(location.id, 5);
        assert_eq!(location.wkt_geom.as_deref(), Some("POINT (115.884 -31.994)"));
        assert_eq!(location.info_url.as_deref(), Some("https://example.org/kensington"));
        assert_eq!(location.bandwidth_url, None);
        assert_eq!(location.address.as_deref(), Some("17 Dick Perry Ave"));
    }
}
