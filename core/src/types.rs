//! Wire-level records for the directory API.
//!
//! # Design
//! These types mirror the payloads the directory service actually sends,
//! JSON field names included — the double-underscored names come from the
//! server's flattened relational selects and are renamed here to plain
//! Rust identifiers. They are defined independently of the mock-server's
//! fixtures; integration tests catch any schema drift between the two
//! crates.
//!
//! Optionality follows fault behavior: fields the view-model mapping reads
//! directly are `Option` and simply come through absent, while `org_data`
//! and its inner structure are required because the mapping dereferences
//! through them. A record without them fails the decode.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standard response envelope: every directory endpoint wraps its rows in
/// an `objects` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing<T> {
    pub objects: Vec<T>,
}

/// One row of the compact user listing (`/api/users/fast/?compact`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub pk: i64,
    pub name: Option<String>,
    pub preferred_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub title: Option<String>,
    pub employee_id: Option<String>,
    pub telephone: Option<String>,
    pub extension: Option<String>,
    pub mobile_phone: Option<String>,
    pub org_data: OrgData,
    #[serde(rename = "org_unit__location__id")]
    pub location_id: Option<i64>,
    #[serde(rename = "org_unit__location__name")]
    pub location_name: Option<String>,
    #[serde(rename = "org_unit__location__address")]
    pub location_address: Option<String>,
    #[serde(rename = "org_unit__location__pobox")]
    pub location_pobox: Option<String>,
    #[serde(rename = "org_unit__location__phone")]
    pub location_phone: Option<String>,
    #[serde(rename = "org_unit__location__fax")]
    pub location_fax: Option<String>,
    pub photo_ad: Option<String>,
}

/// Organisational block nested in every user row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrgData {
    pub cost_centre: CostCentreRef,
    pub units: Vec<OrgUnitRef>,
}

/// Cost-centre reference nested in `OrgData`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostCentreRef {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// One organisational unit a user belongs to. Reused as-is in the user
/// view model's `org_units` list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrgUnitRef {
    pub name: String,
    pub acronym: Option<String>,
}

/// One row of the locations listing. Every field beyond the primary key is
/// optional: rows that carry no site data (see
/// `DirectoryClient::build_list_locations`) still parse, they just come
/// through empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationRecord {
    pub pk: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub point: Option<String>,
    pub url: Option<String>,
    pub bandwidth_url: Option<String>,
}

/// Server-side filters understood by the fast user listing. The server
/// treats them as mutually exclusive, so exactly one can be applied per
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserListFilter {
    /// Every account, inactive ones included. The unfiltered listing only
    /// returns active accounts.
    All,
    /// Case-insensitive match on the account email.
    Email(String),
    /// Match on the Active Directory object GUID.
    AdGuid(Uuid),
    /// Substring match on the cost-centre code.
    CostCentre(String),
    /// Single row by primary key.
    Pk(i64),
}

/// Partial update of the request user's own profile. Only populated fields
/// are sent; the server leaves the rest untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_record_decodes_renamed_location_fields() {
        let body = r#"{
            "pk": 7,
            "org_data": {"cost_centre": {"code": "520", "name": "Fire"}, "units": []},
            "org_unit__location__id": 5,
            "org_unit__location__name": "Kensington",
            "photo_ad": "https://example.org/photo.jpg"
        }"#;
        let record: UserRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.pk, 7);
        assert_eq!(record.location_id, Some(5));
        assert_eq!(record.location_name.as_deref(), Some("Kensington"));
        assert_eq!(record.location_address, None);
        assert_eq!(record.photo_ad.as_deref(), Some("https://example.org/photo.jpg"));
    }

    #[test]
    fn user_record_without_org_data_is_rejected() {
        let body = r#"{"pk": 7, "name": "A"}"#;
        let result: Result<UserRecord, _> = serde_json::from_str(body);
        assert!(result.is_err());
    }

    #[test]
    fn user_record_ignores_unknown_fields() {
        // The profile endpoint serves a wider row than the compact listing;
        // the extra fields must not break the decode.
        let body = r#"{
            "pk": 7,
            "org_data": {"cost_centre": {"code": null, "name": null}, "units": []},
            "shared_account": false,
            "account_type": 2
        }"#;
        let record: UserRecord = serde_json::from_str(body).unwrap();
        assert_eq!(record.pk, 7);
    }

    #[test]
    fn location_record_needs_only_a_primary_key() {
        let record: LocationRecord = serde_json::from_str(r#"{"pk": 3}"#).unwrap();
        assert_eq!(record.pk, 3);
        assert_eq!(record.point, None);
    }

    #[test]
    fn profile_update_serializes_only_populated_fields() {
        let update = ProfileUpdate {
            telephone: Some("9219 9000".to_string()),
            ..ProfileUpdate::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"telephone":"9219 9000"}"#);
    }
}
