use mygram_core::merge::MergePolicy;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// JWT signing configuration (secret, issuer, audience).
    pub jwt: JwtConfig,
    /// Per-field update semantics for every resource.
    pub merge: MergeConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// JWT settings are documented on [`JwtConfig::from_env`] and merge
    /// policies on [`MergeConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            merge: MergeConfig::from_env(),
        }
    }
}

// ---------------------------------------------------------------------------
// Merge policies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserMergePolicy {
    pub username: MergePolicy,
    pub email: MergePolicy,
    pub date_of_birth: MergePolicy,
}

impl Default for UserMergePolicy {
    fn default() -> Self {
        Self {
            username: MergePolicy::Overwrite,
            email: MergePolicy::Overwrite,
            date_of_birth: MergePolicy::Overwrite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhotoMergePolicy {
    pub title: MergePolicy,
    pub caption: MergePolicy,
    pub url: MergePolicy,
}

impl Default for PhotoMergePolicy {
    fn default() -> Self {
        Self {
            title: MergePolicy::MergeIfPresent,
            caption: MergePolicy::MergeIfPresent,
            url: MergePolicy::MergeIfPresent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentMergePolicy {
    pub message: MergePolicy,
}

impl Default for CommentMergePolicy {
    fn default() -> Self {
        Self {
            message: MergePolicy::MergeIfPresent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SocialMediaMergePolicy {
    pub name: MergePolicy,
    pub url: MergePolicy,
}

impl Default for SocialMediaMergePolicy {
    fn default() -> Self {
        Self {
            name: MergePolicy::MergeIfPresent,
            url: MergePolicy::MergeIfPresent,
        }
    }
}

/// Merge policy for every updatable field, grouped by resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeConfig {
    pub user: UserMergePolicy,
    pub photo: PhotoMergePolicy,
    pub comment: CommentMergePolicy,
    pub social_media: SocialMediaMergePolicy,
}

impl MergeConfig {
    /// Load merge policies from `MERGE_<RESOURCE>_<FIELD>` environment
    /// variables, falling back to [`MergeConfig::default`].
    ///
    /// Accepted values are `overwrite` and `merge_if_present`, for example
    /// `MERGE_PHOTO_CAPTION=overwrite` or `MERGE_USER_EMAIL=merge_if_present`.
    ///
    /// # Panics
    ///
    /// Panics if a variable is set to an unknown policy name.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            user: UserMergePolicy {
                username: policy_from_env("MERGE_USER_USERNAME", d.user.username),
                email: policy_from_env("MERGE_USER_EMAIL", d.user.email),
                date_of_birth: policy_from_env("MERGE_USER_DATE_OF_BIRTH", d.user.date_of_birth),
            },
            photo: PhotoMergePolicy {
                title: policy_from_env("MERGE_PHOTO_TITLE", d.photo.title),
                caption: policy_from_env("MERGE_PHOTO_CAPTION", d.photo.caption),
                url: policy_from_env("MERGE_PHOTO_URL", d.photo.url),
            },
            comment: CommentMergePolicy {
                message: policy_from_env("MERGE_COMMENT_MESSAGE", d.comment.message),
            },
            social_media: SocialMediaMergePolicy {
                name: policy_from_env("MERGE_SOCIAL_MEDIA_NAME", d.social_media.name),
                url: policy_from_env("MERGE_SOCIAL_MEDIA_URL", d.social_media.url),
            },
        }
    }
}

fn policy_from_env(var: &str, default: MergePolicy) -> MergePolicy {
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|e| panic!("{var} is invalid: {e}")),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_fields_overwrite_by_default() {
        let merge = MergeConfig::default();
        assert_eq!(merge.user.username, MergePolicy::Overwrite);
        assert_eq!(merge.user.date_of_birth, MergePolicy::Overwrite);
    }

    #[test]
    fn owned_resources_merge_by_default() {
        let merge = MergeConfig::default();
        assert_eq!(merge.photo.caption, MergePolicy::MergeIfPresent);
        assert_eq!(merge.comment.message, MergePolicy::MergeIfPresent);
        assert_eq!(merge.social_media.url, MergePolicy::MergeIfPresent);
    }

    #[test]
    fn unset_variable_keeps_default() {
        let policy = policy_from_env("MERGE_TEST_UNSET_VARIABLE", MergePolicy::Overwrite);
        assert_eq!(policy, MergePolicy::Overwrite);
    }
}
