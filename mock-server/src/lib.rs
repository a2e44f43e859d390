//! In-memory stand-in for the staff directory backend.
//!
//! Serves the compact user listing, the profile endpoint and the options
//! endpoint from a fixture set, behind the same session-cookie gate the
//! real deployment sits behind: requests without a valid `sessionid`
//! cookie receive a 200 HTML sign-in page, exactly what a single-sign-on
//! proxy would serve.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

/// Cookie header value that authenticates requests against the default
/// fixture set.
pub const SESSION_COOKIE: &str = "sessionid=mock-session";

/// Cost-centre block nested in each user row.
#[derive(Clone, Debug, Serialize)]
pub struct CostCentre {
    pub code: String,
    pub name: String,
}

/// Organisational unit nested in each user row.
#[derive(Clone, Debug, Serialize)]
pub struct OrgUnit {
    pub name: String,
    pub acronym: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct OrgData {
    pub cost_centre: CostCentre,
    pub units: Vec<OrgUnit>,
}

/// One directory account, serialized in the compact listing shape. The
/// `skip_serializing` fields drive server-side filtering and the profile
/// form but never appear on the wire.
#[derive(Clone, Debug, Serialize)]
pub struct DirectoryUser {
    pub pk: i64,
    pub name: String,
    pub preferred_name: Option<String>,
    pub email: String,
    pub username: String,
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
    /// Matched by the `ad_guid` filter; the compact listing does not
    /// expose it.
    #[serde(skip_serializing)]
    pub ad_guid: Uuid,
    /// Default listings exclude inactive accounts; `?all` includes them.
    #[serde(skip_serializing)]
    pub active: bool,
    /// Settable through the profile form; not part of the compact shape.
    #[serde(skip_serializing)]
    pub other_phone: Option<String>,
}

/// Directory fixture data plus the session expected to unlock it.
#[derive(Clone, Debug)]
pub struct Directory {
    pub users: Vec<DirectoryUser>,
    pub org_structure: Vec<serde_json::Value>,
    /// Expected value of the `sessionid` cookie.
    pub session: String,
    /// Email of the account served by the profile endpoint.
    pub profile_email: String,
}

impl Directory {
    /// Three accounts across two sites, one of them inactive so the `all`
    /// filter has something to reveal. Rows are kept in name order, the
    /// order the real listing serves.
    pub fn fixture() -> Self {
        let users = vec![
            DirectoryUser {
                pk: 1,
                name: "Erica Vann".to_string(),
                preferred_name: None,
                email: "erica.vann@env.wa.example".to_string(),
                username: "evann".to_string(),
                title: Some("Senior Ranger".to_string()),
                employee_id: Some("E5501".to_string()),
                telephone: Some("+61 8 9219 8600".to_string()),
                extension: Some("8600".to_string()),
                mobile_phone: Some("0400 111 222".to_string()),
                org_data: OrgData {
                    cost_centre: CostCentre {
                        code: "520".to_string(),
                        name: "Fire Management Services".to_string(),
                    },
                    units: vec![
                        OrgUnit {
                            name: "Parks and Wildlife Service".to_string(),
                            acronym: Some("PWS".to_string()),
                        },
                        OrgUnit {
                            name: "Swan Region".to_string(),
                            acronym: Some("SWR".to_string()),
                        },
                    ],
                },
                location_id: Some(5),
                location_name: Some("Kensington Headquarters".to_string()),
                location_address: Some("17 Dick Perry Ave, Kensington".to_string()),
                location_pobox: Some("Locked Bag 104".to_string()),
                location_phone: Some("+61 8 9219 9000".to_string()),
                location_fax: Some("+61 8 9219 8242".to_string()),
                photo_ad: Some("https://static.env.wa.example/photos/evann.jpg".to_string()),
                ad_guid: Uuid::from_u128(1),
                active: true,
                other_phone: None,
            },
            DirectoryUser {
                pk: 2,
                name: "Linh Tran".to_string(),
                preferred_name: Some("Lin".to_string()),
                email: "linh.tran@env.wa.example".to_string(),
                username: "ltran".to_string(),
                title: Some("GIS Analyst".to_string()),
                employee_id: Some("E5502".to_string()),
                telephone: None,
                extension: Some("9368".to_string()),
                mobile_phone: Some("0400 333 444".to_string()),
                org_data: OrgData {
                    cost_centre: CostCentre {
                        code: "204".to_string(),
                        name: "Biodiversity Information Office".to_string(),
                    },
                    units: vec![OrgUnit {
                        name: "Biodiversity and Conservation Science".to_string(),
                        acronym: Some("BCS".to_string()),
                    }],
                },
                location_id: Some(6),
                location_name: Some("Woodvale Research Centre".to_string()),
                location_address: Some("153 Ocean Reef Rd, Woodvale".to_string()),
                location_pobox: None,
                location_phone: Some("+61 8 9405 5100".to_string()),
                location_fax: None,
                photo_ad: None,
                ad_guid: Uuid::from_u128(2),
                active: true,
                other_phone: None,
            },
            DirectoryUser {
                pk: 3,
                name: "Marco Reyes".to_string(),
                preferred_name: None,
                email: "marco.reyes@env.wa.example".to_string(),
                username: "mreyes".to_string(),
                title: None,
                employee_id: None,
                telephone: None,
                extension: None,
                mobile_phone: None,
                org_data: OrgData {
                    cost_centre: CostCentre {
                        code: "520".to_string(),
                        name: "Fire Management Services".to_string(),
                    },
                    units: vec![OrgUnit {
                        name: "Fire Management Branch".to_string(),
                        acronym: None,
                    }],
                },
                location_id: None,
                location_name: None,
                location_address: None,
                location_pobox: None,
                location_phone: None,
                location_fax: None,
                photo_ad: None,
                ad_guid: Uuid::from_u128(3),
                active: false,
                other_phone: None,
            },
        ];

        let org_structure = vec![
            json!({
                "id": 10,
                "name": "Parks and Wildlife Service",
                "acronym": "PWS",
                "children": [
                    {"id": 11, "name": "Swan Region", "acronym": "SWR", "children": []},
                    {"id": 12, "name": "Fire Management Branch", "acronym": null, "children": []}
                ]
            }),
            json!({
                "id": 20,
                "name": "Biodiversity and Conservation Science",
                "acronym": "BCS",
                "children": []
            }),
        ];

        Directory {
            users,
            org_structure,
            session: "mock-session".to_string(),
            profile_email: "erica.vann@env.wa.example".to_string(),
        }
    }
}

pub type Db = Arc<RwLock<Directory>>;

#[derive(Serialize)]
struct Listing<T> {
    objects: Vec<T>,
}

/// Router backed by the default fixture set.
pub fn app() -> Router {
    app_with(Directory::fixture())
}

/// Router serving `directory`.
pub fn app_with(directory: Directory) -> Router {
    let db: Db = Arc::new(RwLock::new(directory));
    Router::new()
        .route("/api/users/fast/", get(list_users))
        .route("/api/users/profile/", get(get_profile).post(update_profile))
        .route("/api/options/", get(options))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Whether the request carries the expected `sessionid` cookie.
fn authenticated(headers: &HeaderMap, directory: &Directory) -> bool {
    let Some(cookie) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    cookie
        .split(';')
        .filter_map(|part| part.trim().split_once('='))
        .any(|(name, value)| name == "sessionid" && value == directory.session)
}

/// What the sign-on proxy serves an unauthenticated request: a perfectly
/// successful HTML page.
fn sign_in_page() -> Response {
    Html(concat!(
        "<!DOCTYPE html><html><head><title>Sign in</title></head>",
        "<body><form method=\"post\">Sign in to continue</form></body></html>",
    ))
    .into_response()
}

async fn list_users(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let directory = db.read().await;
    if !authenticated(&headers, &directory) {
        debug!("unauthenticated listing request, serving the sign-in page");
        return sign_in_page();
    }

    // Filters are mutually exclusive and checked in a fixed order. They
    // match regardless of the active flag; only the unfiltered listing
    // hides inactive accounts.
    let rows: Vec<DirectoryUser> = if params.contains_key("all") {
        directory.users.clone()
    } else if let Some(email) = params.get("email") {
        directory
            .users
            .iter()
            .filter(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect()
    } else if let Some(guid) = params.get("ad_guid") {
        directory
            .users
            .iter()
            .filter(|u| Some(u.ad_guid) == guid.parse().ok())
            .cloned()
            .collect()
    } else if let Some(code) = params.get("cost_centre") {
        directory
            .users
            .iter()
            .filter(|u| u.org_data.cost_centre.code.contains(code.as_str()))
            .cloned()
            .collect()
    } else if let Some(pk) = params.get("pk") {
        directory
            .users
            .iter()
            .filter(|u| Some(u.pk) == pk.parse().ok())
            .cloned()
            .collect()
    } else {
        directory.users.iter().filter(|u| u.active).cloned().collect()
    };

    Json(Listing { objects: rows }).into_response()
}

async fn get_profile(State(db): State<Db>, headers: HeaderMap) -> Response {
    let directory = db.read().await;
    if !authenticated(&headers, &directory) {
        return sign_in_page();
    }
    match directory.users.iter().find(|u| u.email == directory.profile_email) {
        Some(user) => Json(Listing {
            objects: vec![user.clone()],
        })
        .into_response(),
        None => (StatusCode::BAD_REQUEST, "no account for the session user").into_response(),
    }
}

/// Fields accepted by the profile form. Everything is optional; absent
/// fields leave the account untouched.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub telephone: Option<String>,
    pub mobile_phone: Option<String>,
    pub extension: Option<String>,
    pub other_phone: Option<String>,
    pub preferred_name: Option<String>,
}

async fn update_profile(
    State(db): State<Db>,
    headers: HeaderMap,
    Form(form): Form<ProfileForm>,
) -> Response {
    let mut directory = db.write().await;
    if !authenticated(&headers, &directory) {
        return sign_in_page();
    }
    let profile_email = directory.profile_email.clone();
    let Some(user) = directory.users.iter_mut().find(|u| u.email == profile_email) else {
        return (StatusCode::BAD_REQUEST, "no account for the session user").into_response();
    };
    if let Some(telephone) = form.telephone {
        user.telephone = Some(telephone);
    }
    if let Some(mobile_phone) = form.mobile_phone {
        user.mobile_phone = Some(mobile_phone);
    }
    if let Some(extension) = form.extension {
        user.extension = Some(extension);
    }
    if let Some(other_phone) = form.other_phone {
        user.other_phone = Some(other_phone);
    }
    if let Some(preferred_name) = form.preferred_name {
        user.preferred_name = Some(preferred_name);
    }
    let updated = user.clone();
    Json(Listing {
        objects: vec![updated],
    })
    .into_response()
}

#[derive(Deserialize)]
struct OptionsParams {
    list: Option<String>,
}

async fn options(
    State(db): State<Db>,
    Query(params): Query<OptionsParams>,
    headers: HeaderMap,
) -> Response {
    let directory = db.read().await;
    if !authenticated(&headers, &directory) {
        return sign_in_page();
    }
    match params.list.as_deref() {
        Some("org_structure") => Json(Listing {
            objects: directory.org_structure.clone(),
        })
        .into_response(),
        other => {
            debug!(list = ?other, "unknown options list");
            (StatusCode::BAD_REQUEST, "unknown options list").into_response()
        }
    }
}
