//! The identity record produced by a validated launch.

use serde::Serialize;
use serde::ser::Serializer;

/// LTI parameter names read into an [`Identity`].
pub mod params {
    /// Platform-unique, opaque user identifier.
    pub const USER_ID: &str = "user_id";
    /// Platform-provided username (SIS source id).
    pub const SOURCED_ID: &str = "lis_person_sourcedid";
    /// Primary contact email.
    pub const EMAIL: &str = "lis_person_contact_email_primary";
    /// Given name.
    pub const GIVEN_NAME: &str = "lis_person_name_given";
    /// Family name.
    pub const FAMILY_NAME: &str = "lis_person_name_family";
    /// Profile image URL.
    pub const USER_IMAGE: &str = "user_image";
    /// Comma-separated role list.
    pub const ROLES: &str = "roles";
}

/// A normalized user identity extracted from a validated LTI launch.
///
/// Only ever constructed by [`LaunchProcessor`](crate::LaunchProcessor) after
/// the launch signature has been verified. Fields are read through accessors,
/// so code outside this crate cannot assemble one by hand:
///
/// ```compile_fail
/// let forged = ltigate_core::Identity {
///     user_id: "admin".to_owned(),
///     username: "admin".to_owned(),
///     email: None,
///     first_name: None,
///     last_name: None,
///     image_url: None,
///     raw_params: Vec::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    user_id: String,
    username: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    image_url: Option<String>,
    #[serde(serialize_with = "serialize_params")]
    raw_params: Vec<(String, String)>,
}

impl Identity {
    /// Build an identity from a launch's parameters.
    ///
    /// Crate-private so that an identity can only come out of a verified launch.
    pub(crate) fn from_params(raw_params: Vec<(String, String)>) -> Self {
        let lookup = |name: &str| {
            raw_params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
                .filter(|v| !v.is_empty())
                .map(ToOwned::to_owned)
        };

        let user_id = lookup(params::USER_ID).unwrap_or_default();
        let username = lookup(params::SOURCED_ID).unwrap_or_else(|| user_id.clone());

        Self {
            email: lookup(params::EMAIL),
            first_name: lookup(params::GIVEN_NAME),
            last_name: lookup(params::FAMILY_NAME),
            image_url: lookup(params::USER_IMAGE),
            user_id,
            username,
            raw_params,
        }
    }

    /// The platform's `user_id`.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// `lis_person_sourcedid`, or `user_id` when the platform sends none.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// `lis_person_contact_email_primary`.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// `lis_person_name_given`.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    /// `lis_person_name_family`.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    /// `user_image`.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Every launch parameter exactly as received.
    #[must_use]
    pub fn raw_params(&self) -> &[(String, String)] {
        &self.raw_params
    }

    /// Value of the first raw launch parameter named `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.raw_params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Roles from the comma-separated `roles` parameter.
    #[must_use]
    pub fn roles(&self) -> Vec<&str> {
        self.param(params::ROLES)
            .map(|roles| {
                roles
                    .split(',')
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the user holds `role`.
    ///
    /// Matches either the full role URN or its short name, so
    /// `urn:lis:role:ims/lis/Instructor` satisfies `has_role("Instructor")`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ltigate_core::Identity;
    /// # fn check(identity: &Identity) {
    /// if identity.has_role("Instructor") {
    ///     // grant course editing
    /// }
    /// # }
    /// ```
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles()
            .into_iter()
            .any(|r| r == role || short_role_name(r) == role)
    }

    /// Human-readable name: given and family name, else the username.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        if full.is_empty() {
            self.username.clone()
        } else {
            full
        }
    }
}

/// Trailing segment of a role URN (`urn:lis:role:ims/lis/Learner` -> `Learner`).
fn short_role_name(role: &str) -> &str {
    role.rsplit(['/', ':']).next().unwrap_or(role)
}

fn serialize_params<S: Serializer>(
    params: &[(String, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(params.iter().map(|(k, v)| (k, v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(items: &[(&str, &str)]) -> Identity {
        Identity::from_params(
            items
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        )
    }

    #[test]
    fn test_should_map_lis_person_fields() {
        let id = identity(&[
            ("user_id", "u42"),
            ("lis_person_sourcedid", "ada.l"),
            ("lis_person_contact_email_primary", "ada@example.com"),
            ("lis_person_name_given", "Ada"),
            ("lis_person_name_family", "Lovelace"),
            ("user_image", "https://img.example.com/ada.png"),
        ]);

        assert_eq!(id.user_id, "u42");
        assert_eq!(id.username, "ada.l");
        assert_eq!(id.email.as_deref(), Some("ada@example.com"));
        assert_eq!(id.first_name.as_deref(), Some("Ada"));
        assert_eq!(id.last_name.as_deref(), Some("Lovelace"));
        assert_eq!(
            id.image_url.as_deref(),
            Some("https://img.example.com/ada.png")
        );
        assert_eq!(id.raw_params.len(), 6);
    }

    #[test]
    fn test_should_fall_back_to_user_id_for_username() {
        let id = identity(&[("user_id", "u42")]);
        assert_eq!(id.username, "u42");
        assert_eq!(id.email, None);
        assert_eq!(id.image_url, None);
    }

    #[test]
    fn test_should_treat_empty_values_as_absent() {
        let id = identity(&[
            ("user_id", "u42"),
            ("lis_person_sourcedid", ""),
            ("lis_person_contact_email_primary", ""),
        ]);
        assert_eq!(id.username, "u42");
        assert_eq!(id.email, None);
    }

    #[test]
    fn test_should_parse_roles() {
        let id = identity(&[
            ("user_id", "u42"),
            ("roles", "Instructor, urn:lis:role:ims/lis/TeachingAssistant,,"),
        ]);
        assert_eq!(
            id.roles(),
            vec!["Instructor", "urn:lis:role:ims/lis/TeachingAssistant"]
        );
        assert!(id.has_role("Instructor"));
        assert!(id.has_role("TeachingAssistant"));
        assert!(id.has_role("urn:lis:role:ims/lis/TeachingAssistant"));
        assert!(!id.has_role("Learner"));
    }

    #[test]
    fn test_should_have_no_roles_without_param() {
        let id = identity(&[("user_id", "u42")]);
        assert!(id.roles().is_empty());
        assert!(!id.has_role("Learner"));
    }

    #[test]
    fn test_should_build_display_name() {
        assert_eq!(
            identity(&[("user_id", "u1"), ("lis_person_name_given", "Ada")]).display_name(),
            "Ada"
        );
        assert_eq!(
            identity(&[
                ("user_id", "u1"),
                ("lis_person_name_given", "Ada"),
                ("lis_person_name_family", "Lovelace"),
            ])
            .display_name(),
            "Ada Lovelace"
        );
        assert_eq!(identity(&[("user_id", "u1")]).display_name(), "u1");
    }

    #[test]
    fn test_should_serialize_raw_params_as_map() {
        let id = identity(&[("user_id", "u42"), ("context_id", "c1")]);
        let json = serde_json::to_value(&id).unwrap();
        assert_eq!(json["user_id"], "u42");
        assert_eq!(json["raw_params"]["context_id"], "c1");
        assert!(json["email"].is_null());
    }
}
