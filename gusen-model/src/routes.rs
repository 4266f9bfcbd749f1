macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

pub const HEALTH: &str = "/health";

/// Versioned API route definitions shared by the server and its clients
pub mod v1 {
    pub const ROOT: &str = "/api/v1";

    pub mod auth {
        pub const LOGIN: &str = v1_path!("/auth/login");
    }

    pub mod users {
        pub const COLLECTION: &str = v1_path!("/users");
        pub const ITEM: &str = v1_path!("/users/{login_id}");
        pub const DEACTIVATE: &str = v1_path!("/users/{login_id}/deactivate");
        pub const PASSWORD: &str = v1_path!("/users/{login_id}/password");
        pub const PIN: &str = v1_path!("/users/{login_id}/pin");
        pub const CLIENTS: &str = v1_path!("/users/{login_id}/clients");
    }

    pub mod clients {
        pub const COLLECTION: &str = v1_path!("/clients");
        pub const AVAILABLE: &str = v1_path!("/clients/available");
    }

    pub mod cities {
        pub const COLLECTION: &str = v1_path!("/cities");
    }

    pub mod logs {
        pub const COLLECTION: &str = v1_path!("/logs");
    }
}

/// Helper utilities for working with route templates
pub mod utils {
    /// Replace a single path parameter (e.g. `"{login_id}"`) with the value.
    pub fn replace_param(
        route: &str,
        param: &str,
        value: impl AsRef<str>,
    ) -> String {
        route.replace(param, value.as_ref())
    }

    /// Strip the version prefix so a route can be mounted under a nested
    /// router.
    pub fn relative(route: &str) -> &str {
        route.strip_prefix(super::v1::ROOT).unwrap_or(route)
    }

    /// Append query parameters to the provided route.
    pub fn with_query(route: &str, params: &[(&str, &str)]) -> String {
        if params.is_empty() {
            return route.to_string();
        }

        let mut path = String::with_capacity(route.len() + 1 + params.len() * 8);
        path.push_str(route);
        path.push('?');

        for (i, (key, value)) in params.iter().enumerate() {
            if i > 0 {
                path.push('&');
            }
            path.push_str(key);
            path.push('=');
            path.push_str(value);
        }

        path
    }
}
