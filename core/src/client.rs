//! Stateless HTTP request builder and response parser for the directory API.
//!
//! # Design
//! `DirectoryClient` holds a `base_url` plus, optionally, the session cookie
//! of an already-established sign-on; it carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Parsing validates in a fixed order: HTTP status first, then the JSON
//! content type, then the body decode. An HTML sign-in page served in place
//! of data therefore surfaces as a content-type fault, not a decode fault.

use serde::de::DeserializeOwned;
use tracing::debug;
use url::form_urlencoded;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Listing, LocationRecord, ProfileUpdate, UserListFilter, UserRecord};
use crate::views::{Location, User};

/// Path of the compact user listing, query flag included.
const USERS_FAST_PATH: &str = "/api/users/fast/?compact";
/// Path of the options listing scoped to the organisation structure.
const ORG_STRUCTURE_PATH: &str = "/api/options/?list=org_structure";
/// Path of the request user's own profile.
const PROFILE_PATH: &str = "/api/users/profile/";

/// Synchronous, stateless client for the directory API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    base_url: String,
    session_cookie: Option<String>,
}

impl DirectoryClient {
    /// Client without credentials. Against a single-sign-on deployment the
    /// responses will be HTML sign-in pages, rejected at parse time by the
    /// content-type check.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: None,
        }
    }

    /// Client that sends `cookie` (e.g. `"sessionid=abc123"`) with every
    /// request. The session itself is established out of band; this client
    /// only carries the result.
    pub fn with_session(base_url: &str, cookie: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: Some(cookie.to_string()),
        }
    }

    pub fn build_list_users(&self) -> HttpRequest {
        self.get(USERS_FAST_PATH.to_string())
    }

    /// Compact user listing narrowed by one server-side filter.
    pub fn build_list_users_filtered(&self, filter: &UserListFilter) -> HttpRequest {
        self.get(format!("{USERS_FAST_PATH}&{}", filter_query(filter)))
    }

    /// Locations listing.
    ///
    /// This requests the same path as the user listing, so the rows come
    /// back user-shaped and every location-only field parses as absent.
    /// `parse_list_locations` already understands the real location row
    /// shape for when a dedicated endpoint exists.
    // TODO: switch to a dedicated locations endpoint once the backend
    // exposes one.
    pub fn build_list_locations(&self) -> HttpRequest {
        self.get(USERS_FAST_PATH.to_string())
    }

    pub fn build_org_structure(&self) -> HttpRequest {
        self.get(ORG_STRUCTURE_PATH.to_string())
    }

    pub fn build_get_profile(&self) -> HttpRequest {
        self.get(PROFILE_PATH.to_string())
    }

    /// Form-encoded partial update of the request user's own profile.
    pub fn build_update_profile(&self, input: &ProfileUpdate) -> HttpRequest {
        let mut form = form_urlencoded::Serializer::new(String::new());
        let fields = [
            ("telephone", &input.telephone),
            ("mobile_phone", &input.mobile_phone),
            ("extension", &input.extension),
            ("other_phone", &input.other_phone),
            ("preferred_name", &input.preferred_name),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                form.append_pair(key, value);
            }
        }

        let mut headers = self.base_headers();
        headers.push((
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ));
        let request = HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{PROFILE_PATH}", self.base_url),
            headers,
            body: Some(form.finish()),
        };
        debug!(path = %request.path, "built profile update request");
        request
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        let listing: Listing<UserRecord> = decode(&response)?;
        Ok(listing.objects.into_iter().map(User::from).collect())
    }

    pub fn parse_list_locations(&self, response: HttpResponse) -> Result<Vec<Location>, ApiError> {
        let listing: Listing<LocationRecord> = decode(&response)?;
        Ok(listing.objects.into_iter().map(Location::from).collect())
    }

    /// Passthrough: the organisation structure is rendered by the UI as
    /// served, so no reshaping happens here.
    pub fn parse_org_structure(
        &self,
        response: HttpResponse,
    ) -> Result<Vec<serde_json::Value>, ApiError> {
        let listing: Listing<serde_json::Value> = decode(&response)?;
        Ok(listing.objects)
    }

    pub fn parse_get_profile(&self, response: HttpResponse) -> Result<User, ApiError> {
        single_user(&response)
    }

    pub fn parse_update_profile(&self, response: HttpResponse) -> Result<User, ApiError> {
        single_user(&response)
    }

    /// Assemble a credentialed GET for `path_and_query`.
    fn get(&self, path_and_query: String) -> HttpRequest {
        let request = HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{path_and_query}", self.base_url),
            headers: self.base_headers(),
            body: None,
        };
        debug!(path = %request.path, "built directory request");
        request
    }

    fn base_headers(&self) -> Vec<(String, String)> {
        match &self.session_cookie {
            Some(cookie) => vec![("cookie".to_string(), cookie.clone())],
            None => Vec::new(),
        }
    }
}

/// Render one filter as a percent-encoded query fragment.
fn filter_query(filter: &UserListFilter) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    match filter {
        UserListFilter::All => {
            query.append_key_only("all");
        }
        UserListFilter::Email(email) => {
            query.append_pair("email", email);
        }
        UserListFilter::AdGuid(guid) => {
            query.append_pair("ad_guid", &guid.to_string());
        }
        UserListFilter::CostCentre(code) => {
            query.append_pair("cost_centre", code);
        }
        UserListFilter::Pk(pk) => {
            query.append_pair("pk", &pk.to_string());
        }
    }
    query.finish()
}

/// Validate the transport-visible response properties, in order: status
/// first, then content type.
fn check_response(response: &HttpResponse) -> Result<(), ApiError> {
    if !(200..300).contains(&response.status) {
        debug!(status = response.status, "rejected non-2xx response");
        return Err(ApiError::HttpError {
            status: response.status,
            body: response.body.clone(),
        });
    }
    match response.header("content-type") {
        Some(content_type) if content_type.contains("application/json") => Ok(()),
        found => {
            debug!(content_type = ?found, "rejected non-JSON response");
            Err(ApiError::ContentType(found.map(str::to_string)))
        }
    }
}

/// Validate `response` and decode its body.
fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_response(response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Decode an envelope expected to hold exactly one user record.
fn single_user(response: &HttpResponse) -> Result<User, ApiError> {
    let listing: Listing<UserRecord> = decode(response)?;
    let mut objects = listing.objects;
    match objects.pop() {
        Some(record) if objects.is_empty() => Ok(User::from(record)),
        Some(_) => Err(ApiError::DeserializationError(
            "profile listing held more than one record".to_string(),
        )),
        None => Err(ApiError::DeserializationError(
            "profile listing was empty".to_string(),
        )),
    }
}
